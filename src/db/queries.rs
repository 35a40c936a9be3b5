//! SQL text for the diagnostics and the destructive actions.

/// Server version lookup, run once at startup
pub const SERVER_VERSION: &str = "SHOW server_version;";

/// Statements ranked by mean execution time (needs pg_stat_statements)
pub const SLOW_QUERIES: &str = "
    SELECT
        queryid,
        query,
        calls,
        total_exec_time,
        mean_exec_time,
        stddev_exec_time,
        rows
    FROM
        pg_stat_statements
    ORDER BY
        mean_exec_time DESC
    LIMIT 10;
";

/// Replication slots with retained WAL as a human-readable size
pub const REPLICATION_SLOTS: &str = "
    SELECT
        slot_name,
        pg_size_pretty(pg_wal_lsn_diff(pg_current_wal_lsn(), restart_lsn)) AS size,
        active
    FROM
        pg_replication_slots;
";

/// Sessions waiting on a lock, paired with the session holding it
pub const BLOCKED_SESSIONS: &str = "
    SELECT
        blocked_locks.pid AS blocked_pid,
        blocked_activity.usename AS blocked_user,
        blocking_locks.pid AS blocking_pid,
        blocking_activity.usename AS blocking_user,
        blocked_activity.query AS blocked_statement,
        blocking_activity.query AS current_statement_in_blocking_process,
        blocked_activity.application_name AS blocked_application,
        blocking_activity.application_name AS blocking_application
    FROM
        pg_catalog.pg_locks blocked_locks
    JOIN
        pg_catalog.pg_stat_activity blocked_activity ON blocked_activity.pid = blocked_locks.pid
    JOIN
        pg_catalog.pg_locks blocking_locks
        ON blocking_locks.locktype = blocked_locks.locktype
        AND blocking_locks.DATABASE IS NOT DISTINCT FROM blocked_locks.DATABASE
        AND blocking_locks.relation IS NOT DISTINCT FROM blocked_locks.relation
        AND blocking_locks.page IS NOT DISTINCT FROM blocked_locks.page
        AND blocking_locks.tuple IS NOT DISTINCT FROM blocked_locks.tuple
        AND blocking_locks.virtualxid IS NOT DISTINCT FROM blocked_locks.virtualxid
        AND blocking_locks.transactionid IS NOT DISTINCT FROM blocked_locks.transactionid
        AND blocking_locks.classid IS NOT DISTINCT FROM blocked_locks.classid
        AND blocking_locks.objid IS NOT DISTINCT FROM blocked_locks.objid
        AND blocking_locks.objsubid IS NOT DISTINCT FROM blocked_locks.objsubid
        AND blocking_locks.pid != blocked_locks.pid
    JOIN
        pg_catalog.pg_stat_activity blocking_activity ON blocking_activity.pid = blocking_locks.pid
    WHERE
        NOT blocked_locks.GRANTED;
";

/// Backend termination, `$1` is the PID
pub const TERMINATE_BACKEND: &str = "SELECT pg_terminate_backend($1)";

/// Slot removal, `$1` is the slot name
pub const DROP_REPLICATION_SLOT: &str = "SELECT pg_drop_replication_slot($1)";
