//! Database type definitions
//!
//! Core data structures for representing query results as typed tuples.

use std::time::Duration;

/// Query execution results
#[derive(Debug, Clone)]
pub struct QueryResults {
    /// Column definitions
    pub columns: Vec<ColumnDef>,
    /// Result rows
    pub rows: Vec<Row>,
    /// Query execution time
    pub execution_time: Duration,
    /// Total row count
    pub row_count: usize,
}

impl QueryResults {
    pub fn new(
        columns: Vec<ColumnDef>,
        rows: Vec<Row>,
        execution_time: Duration,
        row_count: usize,
    ) -> Self {
        Self {
            columns,
            rows,
            execution_time,
            row_count,
        }
    }

    /// Text of the first cell of the first row, if any
    pub fn first_text(&self) -> Option<String> {
        self.rows
            .first()
            .and_then(|r| r.values.first())
            .filter(|v| !v.is_null())
            .map(CellValue::as_text)
    }
}

/// Column definition in query results
#[derive(Debug, Clone)]
pub struct ColumnDef {
    /// Column name
    pub name: String,
    /// Data type
    pub data_type: DataType,
}

/// Database data types the dashboard distinguishes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    SmallInt,
    Integer,
    BigInt,
    Real,
    Double,
    Numeric,
    Text,
    Boolean,
    Timestamp,
    TimestampTz,
    Unknown(String),
}

/// A single row of query results
#[derive(Debug, Clone)]
pub struct Row {
    /// Cell values in column order
    pub values: Vec<CellValue>,
}

impl Row {
    pub fn new(values: Vec<CellValue>) -> Self {
        Self { values }
    }

    /// Cell at a position; missing trailing cells read as NULL
    pub fn get(&self, idx: usize) -> &CellValue {
        self.values.get(idx).unwrap_or(&NULL_CELL)
    }
}

static NULL_CELL: CellValue = CellValue::Null;

/// A cell value (single column value in a row)
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// NULL value
    Null,
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Text/string value (also numeric, rendered exactly)
    Text(String),
    /// Boolean value
    Boolean(bool),
    /// Date/time value
    DateTime(String),
}

impl CellValue {
    /// Full, untruncated text form. NULL renders as an empty string.
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            CellValue::Integer(i) => i.to_string(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Text(s) | CellValue::DateTime(s) => s.clone(),
            CellValue::Boolean(b) => b.to_string(),
        }
    }

    /// Numeric view used for ranking and statistics
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Integer(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            CellValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Check if this is a NULL value
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_renders_empty() {
        assert_eq!(CellValue::Null.as_text(), "");
        assert!(CellValue::Null.is_null());
        assert!(!CellValue::Integer(42).is_null());
    }

    #[test]
    fn test_numeric_text_parses_as_f64() {
        assert_eq!(CellValue::Text("12.50".into()).as_f64(), Some(12.5));
        assert_eq!(CellValue::Boolean(true).as_f64(), None);
    }

    #[test]
    fn test_row_get_past_end_is_null() {
        let row = Row::new(vec![CellValue::Integer(1)]);
        assert_eq!(row.get(0), &CellValue::Integer(1));
        assert!(row.get(5).is_null());
    }

    #[test]
    fn test_first_text() {
        let results = QueryResults::new(
            vec![ColumnDef {
                name: "server_version".into(),
                data_type: DataType::Text,
            }],
            vec![Row::new(vec![CellValue::Text("16.2".into())])],
            Duration::from_millis(1),
            1,
        );
        assert_eq!(results.first_text(), Some("16.2".to_string()));

        let empty = QueryResults::new(vec![], vec![], Duration::ZERO, 0);
        assert_eq!(empty.first_text(), None);
    }
}
