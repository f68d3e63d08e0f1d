//! Polars AnyValue utility functions.
//!
//! Loaded frames keep whatever dtypes Polars infers, so every accessor here
//! accepts both numeric and string cells.

use polars::prelude::{AnyValue, Column, DataFrame};

use crate::historical::normalize_header;

/// Converts a Polars AnyValue to a String representation.
/// Returns an empty string for Null.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.trim().to_string(),
        AnyValue::StringOwned(s) => s.trim().to_string(),
        AnyValue::Boolean(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Formats a float without a trailing `.0` for integral values.
pub fn format_numeric(v: f64) -> String {
    if v.fract() == 0.0 && v.is_finite() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Converts an AnyValue to f64, returning None for null, empty or non-numeric values.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) if v.is_nan() => None,
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Converts an AnyValue to i64, returning None for null or non-integral values.
pub fn any_to_i64(value: AnyValue<'_>) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(i64::from(v)),
        AnyValue::Int16(v) => Some(i64::from(v)),
        AnyValue::Int32(v) => Some(i64::from(v)),
        AnyValue::Int64(v) => Some(v),
        AnyValue::UInt8(v) => Some(i64::from(v)),
        AnyValue::UInt16(v) => Some(i64::from(v)),
        AnyValue::UInt32(v) => Some(i64::from(v)),
        AnyValue::UInt64(v) => i64::try_from(v).ok(),
        AnyValue::Float32(v) => float_to_i64(f64::from(v)),
        AnyValue::Float64(v) => float_to_i64(v),
        AnyValue::String(s) => parse_i64(s),
        AnyValue::StringOwned(s) => parse_i64(&s),
        _ => None,
    }
}

fn float_to_i64(v: f64) -> Option<i64> {
    (v.is_finite() && v.fract() == 0.0).then_some(v as i64)
}

/// Parses a string as f64, returning None for invalid or empty strings.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Parses a string as i64, accepting integral floats such as `2024.0`.
pub fn parse_i64(value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed
        .parse::<i64>()
        .ok()
        .or_else(|| trimmed.parse::<f64>().ok().and_then(float_to_i64))
}

/// Finds a column whose normalized header equals `name`.
pub fn find_column<'a>(df: &'a DataFrame, name: &str) -> Option<&'a Column> {
    df.get_columns()
        .iter()
        .find(|column| normalize_header(column.name().as_str()) == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_numeric_and_string_cells() {
        assert_eq!(any_to_f64(AnyValue::Int64(12)), Some(12.0));
        assert_eq!(any_to_f64(AnyValue::String(" 3.5 ")), Some(3.5));
        assert_eq!(any_to_f64(AnyValue::String("")), None);
        assert_eq!(any_to_f64(AnyValue::Float64(f64::NAN)), None);
        assert_eq!(any_to_f64(AnyValue::Null), None);

        assert_eq!(any_to_i64(AnyValue::String("2024")), Some(2024));
        assert_eq!(any_to_i64(AnyValue::Float64(3.0)), Some(3));
        assert_eq!(any_to_i64(AnyValue::Float64(3.5)), None);

        assert_eq!(any_to_string(AnyValue::Int64(101)), "101");
        assert_eq!(any_to_string(AnyValue::Float64(2.0)), "2");
        assert_eq!(any_to_string(AnyValue::String(" Revenue ")), "Revenue");
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn parses_integral_floats() {
        assert_eq!(parse_i64("2024.0"), Some(2024));
        assert_eq!(parse_i64("abc"), None);
        assert_eq!(parse_f64("NaN"), None);
    }
}
