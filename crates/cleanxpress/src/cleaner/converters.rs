//! Type conversion functions for data cleaning.
//!
//! Every converter takes the already-stripped text of a column (see
//! [`strip_non_numeric`]) and produces a typed Series. Empty or unparsable
//! text becomes null; only integer conversion can fail outright.

use crate::error::{CleaningError, Result};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;

static NON_NUMERIC: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\d\.\-]").expect("Invalid regex: non-numeric characters"));

/// Layouts tried for datetime values, after stripping. Separators other than
/// `.` and `-` are gone by then, so `2020-01-15 10:30:00` arrives as
/// `2020-01-15103000`.
const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d%H%M%S%.f",
    "%Y-%m-%d%H%M%S",
    "%Y-%m-%d%H%M",
    "%Y%m%d%H%M%S",
    "%d.%m.%Y%H%M%S",
    "%m-%d-%Y%H%M%S",
];

const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%Y%m%d", "%m-%d-%Y", "%Y.%m.%d", "%m.%d.%Y", "%d.%m.%Y",
];

/// Remove every character that is not a digit, a decimal point or a minus sign.
pub(crate) fn strip_non_numeric(value: &str) -> String {
    NON_NUMERIC.replace_all(value, "").into_owned()
}

/// Convert stripped text to Float64.
pub(crate) fn strings_to_float(name: &str, values: &[String]) -> Series {
    let parsed: Vec<Option<f64>> = values
        .iter()
        .map(|v| v.parse::<f64>().ok().filter(|f| f.is_finite()))
        .collect();
    Series::new(name.into(), parsed)
}

/// Convert stripped text to Int64.
///
/// Unparsable text becomes null. A numeric value that is not a whole number,
/// or does not fit in an i64, fails the whole column.
pub(crate) fn strings_to_int(name: &str, values: &[String]) -> Result<Series> {
    let mut parsed: Vec<Option<i64>> = Vec::with_capacity(values.len());

    for value in values {
        if let Ok(int_val) = value.parse::<i64>() {
            parsed.push(Some(int_val));
            continue;
        }
        match value.parse::<f64>() {
            Ok(float_val) if is_exact_i64(float_val) => parsed.push(Some(float_val as i64)),
            Ok(float_val) => {
                return Err(CleaningError::TypeConversionFailed {
                    column: name.to_string(),
                    target_type: "int".to_string(),
                    reason: format!("cannot safely cast non-equivalent float {} to int64", float_val),
                });
            }
            Err(_) => parsed.push(None),
        }
    }

    Ok(Series::new(name.into(), parsed))
}

fn is_exact_i64(value: f64) -> bool {
    value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64
}

/// Convert stripped text to `Datetime(ms)`.
pub(crate) fn strings_to_datetime(name: &str, values: &[String]) -> Result<Series> {
    let millis: Vec<Option<i64>> = values
        .iter()
        .map(|v| parse_datetime(v).map(|dt| dt.and_utc().timestamp_millis()))
        .collect();

    let series = Series::new(name.into(), millis);
    Ok(series.cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?)
}

/// Parse one stripped value against the known layouts.
pub(crate) fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if value.is_empty() {
        return None;
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
