//! Display formatting for result-set values
//!
//! Pure functions applied once, when a table screen is built.

use crate::db::CellValue;

/// Longest free-text field kept before truncation, in characters
pub const MAX_TEXT_CHARS: usize = 50;

/// Appended to truncated free text
pub const ELLIPSIS: &str = "...";

/// How a column's raw value becomes its display string
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    /// Identifiers, counts, sizes, booleans: the literal text form
    Plain,
    /// Statement text: one line, truncated to [`MAX_TEXT_CHARS`]
    FreeText,
    /// Timings and other statistics: two fractional digits
    Stat,
}

/// Replace every line break with a single space so a row stays on one line.
///
/// A `\r\n` pair counts as one break.
pub fn single_line(s: &str) -> String {
    s.replace("\r\n", "\n").replace(['\n', '\r'], " ")
}

/// Keep at most `max` characters, appending [`ELLIPSIS`] when anything was cut
pub fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => format!("{}{}", &s[..byte_idx], ELLIPSIS),
        None => s.to_string(),
    }
}

/// Statement text as shown in tables
pub fn free_text(s: &str) -> String {
    truncate_chars(&single_line(s), MAX_TEXT_CHARS)
}

/// Fixed two-decimal rendering used for ranking columns
pub fn stat(value: f64) -> String {
    format!("{:.2}", value)
}

/// Literal "true"/"false"
pub fn boolean(value: bool) -> String {
    value.to_string()
}

/// Format one cell according to its column's rule
pub fn format_cell(value: &CellValue, format: CellFormat) -> String {
    match (format, value) {
        (_, CellValue::Null) => String::new(),
        (_, CellValue::Boolean(b)) => boolean(*b),
        (CellFormat::FreeText, v) => free_text(&v.as_text()),
        (CellFormat::Stat, v) => match v.as_f64() {
            Some(f) => stat(f),
            None => v.as_text(),
        },
        (CellFormat::Plain, v) => v.as_text(),
    }
}
