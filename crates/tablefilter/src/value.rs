//! Typed column values and canonical string rendering.
//!
//! Every comparison in the filter engine goes through a canonical string or
//! numeric form so that matching is locale- and type-independent: numbers
//! render through one fixed formatter, dates through one fixed display format,
//! and the result is lowercased before string comparison.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Display format used for dates in columns and in user-entered comparands.
pub const COLUMN_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Date-only fallback accepted for user input (midnight UTC).
const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// A typed value resolved from a row column.
///
/// This is a closed set: comparison operators pattern-match on the variant
/// tags instead of probing runtime types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnValue {
    /// An exact integer quantity (counts, ids).
    Integer(i64),
    /// A floating point quantity (prices, volumes).
    Number(f64),
    /// Free-form text.
    Text(String),
    /// A timestamp.
    Date(DateTime<Utc>),
    /// The row has no value for the column.
    Missing,
}

impl ColumnValue {
    /// Returns true if the value is [`ColumnValue::Missing`].
    pub fn is_missing(&self) -> bool {
        matches!(self, ColumnValue::Missing)
    }
}

/// Renders a value in its canonical string form.
///
/// Returns `None` for [`ColumnValue::Missing`]; a missing value never takes
/// part in string comparison.
pub fn canonical(value: &ColumnValue) -> Option<String> {
    match value {
        ColumnValue::Integer(i) => Some(i.to_string()),
        ColumnValue::Number(n) => Some(format_number(*n)),
        ColumnValue::Text(s) => Some(s.clone()),
        ColumnValue::Date(d) => Some(d.format(COLUMN_DATE_FORMAT).to_string()),
        ColumnValue::Missing => None,
    }
}

/// Canonicalizes user-entered comparand text.
///
/// The literal is tried as a number, then as a percent, then as a date in the
/// display format; anything else stays raw text. This mirrors [`canonical`]
/// so that e.g. the input `100.0` compares equal to a column value of `100.0`.
pub fn canonical_input(text: &str) -> String {
    if let Some(n) = parse_user_number(text) {
        return format_number(n);
    }
    if let Some(d) = parse_user_date(text) {
        return d.format(COLUMN_DATE_FORMAT).to_string();
    }
    text.to_string()
}

/// Formats a number without locale grouping.
///
/// Integral floats render without a fraction part, so `100.0` and the input
/// text `100` canonicalize identically.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Parses user text as a plain number.
///
/// Accepts an optional sign, `,` grouping and a decimal point; the whole
/// string must be consumed. Exponent, infinity and NaN spellings are
/// rejected.
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: String = trimmed.chars().filter(|&c| c != ',').collect();
    if !cleaned
        .chars()
        .all(|c| c.is_ascii_digit() || c == '.' || c == '-' || c == '+')
    {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

/// Parses user text as a percent, e.g. `50%` yields `50.0`.
pub fn parse_percent(text: &str) -> Option<f64> {
    let stripped = text.trim().strip_suffix('%')?;
    parse_number(stripped)
}

/// Parses user text as a number, falling back to the percent form.
pub fn parse_user_number(text: &str) -> Option<f64> {
    parse_number(text).or_else(|| parse_percent(text))
}

/// Parses user text as a date in the display format.
///
/// A date without a time component is taken as midnight UTC.
pub fn parse_user_date(text: &str) -> Option<DateTime<Utc>> {
    let trimmed = text.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, COLUMN_DATE_FORMAT) {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, INPUT_DATE_FORMAT) {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}
