//! PostgreSQL database provider
//!
//! Concrete implementation using tokio-postgres.

use crate::config::{ConnectionConfig, SslMode};
use crate::db::Database;
use crate::db::queries;
use crate::db::types::{CellValue, ColumnDef, DataType, QueryResults, Row};
use crate::error::{DbError, DbResult};
use rust_decimal::Decimal;
use tokio::sync::mpsc;
use tokio_postgres::Client;
use tokio_postgres::types::Type;

/// PostgreSQL database provider
pub struct PostgresProvider {
    /// The tokio-postgres client
    client: Client,
}

impl PostgresProvider {
    /// Connect to a PostgreSQL database.
    ///
    /// Returns the provider and a receiver that fires if the background
    /// connection is lost (e.g. server restart, idle timeout).
    pub async fn connect(
        config: &ConnectionConfig,
    ) -> DbResult<(Self, mpsc::UnboundedReceiver<String>)> {
        let pg_config = pg_config(config);
        let (conn_err_tx, conn_err_rx) = mpsc::unbounded_channel();

        let client = if config.ssl_mode.uses_tls() {
            let tls = tokio_postgres_rustls::MakeRustlsConnect::new(make_tls_config());
            let (client, connection) = pg_config
                .connect(tls)
                .await
                .map_err(|e| DbError::ConnectionFailed(describe(&e)))?;
            tokio::spawn(async move {
                if let Err(e) = connection.await {
                    let _ = conn_err_tx.send(format!("Connection lost: {}", e));
                }
            });
            client
        } else {
            let (client, connection) = pg_config
                .connect(tokio_postgres::NoTls)
                .await
                .map_err(|e| DbError::ConnectionFailed(describe(&e)))?;
            tokio::spawn(async move {
                if let Err(e) = connection.await {
                    let _ = conn_err_tx.send(format!("Connection lost: {}", e));
                }
            });
            client
        };

        tracing::info!(connection = %config.connection_string(), "connected");
        Ok((Self { client }, conn_err_rx))
    }
}

impl Database for PostgresProvider {
    async fn execute_query(&self, sql: &str) -> DbResult<QueryResults> {
        let start = std::time::Instant::now();

        let stmt = self
            .client
            .prepare(sql)
            .await
            .map_err(|e| DbError::QueryFailed(describe(&e)))?;

        let columns: Vec<ColumnDef> = stmt
            .columns()
            .iter()
            .map(|col| ColumnDef {
                name: col.name().to_string(),
                data_type: pg_type_to_datatype(col.type_()),
            })
            .collect();

        let pg_rows = self
            .client
            .query(&stmt, &[])
            .await
            .map_err(|e| DbError::QueryFailed(describe(&e)))?;

        let row_count = pg_rows.len();
        let mut rows = Vec::with_capacity(row_count);

        for pg_row in &pg_rows {
            let values = columns
                .iter()
                .enumerate()
                .map(|(i, col_def)| extract_cell_value(pg_row, i, &col_def.data_type))
                .collect();
            rows.push(Row { values });
        }

        Ok(QueryResults::new(columns, rows, start.elapsed(), row_count))
    }

    async fn terminate_session(&self, pid: i32) -> DbResult<()> {
        let row = self
            .client
            .query_one(queries::TERMINATE_BACKEND, &[&pid])
            .await
            .map_err(|e| DbError::ActionFailed {
                action: "terminate session",
                target: pid.to_string(),
                reason: describe(&e),
            })?;
        let terminated: Option<bool> = row
            .try_get(0)
            .map_err(|e| DbError::TypeConversion(e.to_string()))?;
        if terminated.unwrap_or(false) {
            Ok(())
        } else {
            Err(DbError::SessionNotFound(pid))
        }
    }

    async fn drop_replication_slot(&self, name: &str) -> DbResult<()> {
        self.client
            .execute(queries::DROP_REPLICATION_SLOT, &[&name])
            .await
            .map_err(|e| DbError::ActionFailed {
                action: "drop replication slot",
                target: name.to_string(),
                reason: describe(&e),
            })?;
        Ok(())
    }
}

/// Translate our connection settings into a tokio-postgres config.
///
/// verify-ca and verify-full map to `require`; the rustls connector always
/// validates the certificate chain and host name.
fn pg_config(config: &ConnectionConfig) -> tokio_postgres::Config {
    let mut pg = tokio_postgres::Config::new();
    pg.host(&config.host)
        .port(config.port)
        .user(&config.username)
        .dbname(&config.database)
        .application_name("pgdba")
        .ssl_mode(match config.ssl_mode {
            SslMode::Disable => tokio_postgres::config::SslMode::Disable,
            SslMode::Prefer => tokio_postgres::config::SslMode::Prefer,
            SslMode::Require | SslMode::VerifyCa | SslMode::VerifyFull => {
                tokio_postgres::config::SslMode::Require
            }
        });
    if let Some(password) = config.password.as_deref().filter(|p| !p.is_empty()) {
        pg.password(password);
    }
    pg
}

/// Prefer the server's own message over the driver's generic wrapper text
fn describe(e: &tokio_postgres::Error) -> String {
    match e.as_db_error() {
        Some(db) => db.message().to_string(),
        None => e.to_string(),
    }
}

/// Map tokio_postgres Type to our DataType enum
fn pg_type_to_datatype(pg_type: &Type) -> DataType {
    match *pg_type {
        Type::INT2 => DataType::SmallInt,
        Type::INT4 => DataType::Integer,
        Type::INT8 => DataType::BigInt,
        Type::FLOAT4 => DataType::Real,
        Type::FLOAT8 => DataType::Double,
        Type::NUMERIC => DataType::Numeric,
        Type::TEXT | Type::NAME | Type::VARCHAR | Type::BPCHAR => DataType::Text,
        Type::BOOL => DataType::Boolean,
        Type::TIMESTAMP => DataType::Timestamp,
        Type::TIMESTAMPTZ => DataType::TimestampTz,
        _ => DataType::Unknown(pg_type.name().to_string()),
    }
}

/// Build a rustls ClientConfig that trusts OS certificates (with Mozilla roots as fallback)
fn make_tls_config() -> rustls::ClientConfig {
    let mut root_store = rustls::RootCertStore::empty();

    let native_certs = rustls_native_certs::load_native_certs();
    let mut loaded = 0;
    for cert in native_certs.certs {
        if root_store.add(cert).is_ok() {
            loaded += 1;
        }
    }
    if loaded == 0 {
        root_store.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    }

    rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth()
}

/// Extract a cell value from a tokio_postgres Row based on the column's DataType.
///
/// Falls back to the string representation when the typed read fails.
fn extract_cell_value(row: &tokio_postgres::Row, idx: usize, data_type: &DataType) -> CellValue {
    match data_type {
        DataType::SmallInt => match row.try_get::<_, Option<i16>>(idx) {
            Ok(Some(v)) => CellValue::Integer(v as i64),
            Ok(None) => CellValue::Null,
            Err(_) => try_as_string(row, idx),
        },
        DataType::Integer => match row.try_get::<_, Option<i32>>(idx) {
            Ok(Some(v)) => CellValue::Integer(v as i64),
            Ok(None) => CellValue::Null,
            Err(_) => try_as_string(row, idx),
        },
        DataType::BigInt => match row.try_get::<_, Option<i64>>(idx) {
            Ok(Some(v)) => CellValue::Integer(v),
            Ok(None) => CellValue::Null,
            Err(_) => try_as_string(row, idx),
        },
        DataType::Real => match row.try_get::<_, Option<f32>>(idx) {
            Ok(Some(v)) => CellValue::Float(v as f64),
            Ok(None) => CellValue::Null,
            Err(_) => try_as_string(row, idx),
        },
        DataType::Double => match row.try_get::<_, Option<f64>>(idx) {
            Ok(Some(v)) => CellValue::Float(v),
            Ok(None) => CellValue::Null,
            Err(_) => try_as_string(row, idx),
        },
        DataType::Numeric => match row.try_get::<_, Option<Decimal>>(idx) {
            Ok(Some(v)) => CellValue::Text(v.to_string()),
            Ok(None) => CellValue::Null,
            Err(_) => try_as_string(row, idx),
        },
        DataType::Boolean => match row.try_get::<_, Option<bool>>(idx) {
            Ok(Some(v)) => CellValue::Boolean(v),
            Ok(None) => CellValue::Null,
            Err(_) => try_as_string(row, idx),
        },
        DataType::Timestamp => match row.try_get::<_, Option<chrono::NaiveDateTime>>(idx) {
            Ok(Some(v)) => CellValue::DateTime(v.to_string()),
            Ok(None) => CellValue::Null,
            Err(_) => try_as_string(row, idx),
        },
        DataType::TimestampTz => {
            match row.try_get::<_, Option<chrono::DateTime<chrono::Utc>>>(idx) {
                Ok(Some(v)) => CellValue::DateTime(v.to_string()),
                Ok(None) => CellValue::Null,
                Err(_) => try_as_string(row, idx),
            }
        }
        // Text types and fallback for unknown types
        _ => try_as_string(row, idx),
    }
}

/// Try to extract a value as a string (fallback for type mismatches).
///
/// When even the string fallback fails, includes the postgres type name
/// in the message so the user knows what type couldn't be displayed.
fn try_as_string(row: &tokio_postgres::Row, idx: usize) -> CellValue {
    match row.try_get::<_, Option<String>>(idx) {
        Ok(Some(v)) => CellValue::Text(v),
        Ok(None) => CellValue::Null,
        Err(_) => {
            let type_name = row
                .columns()
                .get(idx)
                .map_or("unknown", |c| c.type_().name());
            CellValue::Text(format!("<unable to display: {}>", type_name))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pg_type_mapping() {
        assert_eq!(pg_type_to_datatype(&Type::NAME), DataType::Text);
        assert_eq!(pg_type_to_datatype(&Type::FLOAT8), DataType::Double);
        assert_eq!(pg_type_to_datatype(&Type::INT4), DataType::Integer);
        assert_eq!(
            pg_type_to_datatype(&Type::PG_LSN),
            DataType::Unknown("pg_lsn".to_string())
        );
    }

    #[test]
    fn test_pg_config_skips_empty_password() {
        let config = ConnectionConfig {
            host: "db".into(),
            port: 6432,
            database: "ops".into(),
            username: "admin".into(),
            password: Some(String::new()),
            ssl_mode: SslMode::VerifyFull,
        };
        let pg = pg_config(&config);
        assert_eq!(pg.get_ports(), &[6432]);
        assert_eq!(pg.get_user(), Some("admin"));
        assert_eq!(pg.get_dbname(), Some("ops"));
        assert!(pg.get_password().is_none());
        assert_eq!(pg.get_ssl_mode(), tokio_postgres::config::SslMode::Require);
    }
}
