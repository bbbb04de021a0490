//! Shared utilities for profiling and cleaning.
//!
//! "Missing" throughout the crate means a null entry, or a NaN entry in a
//! floating-point column.

use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Category of a data type for cleaning purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DtypeCategory {
    /// Integer or floating point numbers
    Numeric,
    /// Date or datetime types
    Datetime,
    /// Boolean type
    Boolean,
    /// String/text type
    String,
    /// Other/unknown types
    Other,
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Check if a DataType holds free text that formatting should touch.
#[inline]
pub fn is_text_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String)
}

/// Get the category of a DataType.
pub fn get_dtype_category(dtype: &DataType) -> DtypeCategory {
    if is_numeric_dtype(dtype) {
        DtypeCategory::Numeric
    } else if is_datetime_dtype(dtype) {
        DtypeCategory::Datetime
    } else if matches!(dtype, DataType::Boolean) {
        DtypeCategory::Boolean
    } else if matches!(dtype, DataType::String | DataType::Categorical(_, _)) {
        DtypeCategory::String
    } else {
        DtypeCategory::Other
    }
}

/// Get the dtype category of a Series as a short label.
pub fn dtype_category_str(series: &Series) -> &'static str {
    match get_dtype_category(series.dtype()) {
        DtypeCategory::Numeric => "numeric",
        DtypeCategory::Datetime => "datetime",
        DtypeCategory::Boolean => "binary",
        DtypeCategory::String => "string",
        DtypeCategory::Other => "other",
    }
}

/// Names of the columns of `df`, in order.
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect()
}

// =============================================================================
// Missing Value Utilities
// =============================================================================

/// One flag per row: `true` where the value is missing.
pub fn missing_flags(series: &Series) -> PolarsResult<Vec<bool>> {
    if series.dtype().is_float() {
        let floats = series.cast(&DataType::Float64)?;
        Ok(floats
            .f64()?
            .into_iter()
            .map(|v| v.is_none_or(f64::is_nan))
            .collect())
    } else {
        Ok(series
            .is_null()
            .into_iter()
            .map(|v| v.unwrap_or(false))
            .collect())
    }
}

/// Number of missing entries in a Series.
pub fn missing_count(series: &Series) -> PolarsResult<usize> {
    Ok(missing_flags(series)?.into_iter().filter(|m| *m).count())
}

/// Number of distinct non-missing values in a Series.
pub fn distinct_count(series: &Series) -> PolarsResult<usize> {
    let keep: Vec<bool> = missing_flags(series)?.into_iter().map(|m| !m).collect();
    let mask = BooleanChunked::from_slice("mask".into(), &keep);
    series.filter(&mask)?.n_unique()
}

/// Row mask that is `true` for rows with no missing value in any column.
pub fn complete_rows_mask(df: &DataFrame) -> PolarsResult<BooleanChunked> {
    let mut keep = vec![true; df.height()];
    for col in df.get_columns() {
        let flags = missing_flags(col.as_materialized_series())?;
        for (k, missing) in keep.iter_mut().zip(flags) {
            *k &= !missing;
        }
    }
    Ok(BooleanChunked::from_slice("mask".into(), &keep))
}

// =============================================================================
// Numeric Statistics Utilities
// =============================================================================

/// Non-missing values of a numeric Series as `f64`, in row order.
pub fn numeric_values(series: &Series) -> PolarsResult<Vec<f64>> {
    let floats = series.cast(&DataType::Float64)?;
    Ok(floats
        .f64()?
        .into_iter()
        .flatten()
        .filter(|v| !v.is_nan())
        .collect())
}

/// Quantile with linear interpolation between the closest ranks.
///
/// `q` is clamped to `[0, 1]`. Returns `None` for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Replace missing entries of a numeric Series with `fill_value`.
///
/// The result is always Float64.
pub fn fill_numeric_missing(series: &Series, fill_value: f64) -> PolarsResult<Series> {
    let floats = series.cast(&DataType::Float64)?;
    let filled: Vec<f64> = floats
        .f64()?
        .into_iter()
        .map(|v| match v {
            Some(val) if !val.is_nan() => val,
            _ => fill_value,
        })
        .collect();

    Ok(Series::new(series.name().clone(), filled))
}

/// Render every entry of a Series as text. Missing entries are `None`.
pub fn series_to_strings(series: &Series) -> PolarsResult<Vec<Option<String>>> {
    let flags = missing_flags(series)?;
    let as_text = if is_text_dtype(series.dtype()) {
        series.clone()
    } else {
        series.cast(&DataType::String)?
    };

    Ok(as_text
        .str()?
        .into_iter()
        .zip(flags)
        .map(|(v, missing)| if missing { None } else { v.map(str::to_string) })
        .collect())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_dtype_category() {
        assert_eq!(get_dtype_category(&DataType::Int64), DtypeCategory::Numeric);
        assert_eq!(get_dtype_category(&DataType::Date), DtypeCategory::Datetime);
        assert_eq!(
            get_dtype_category(&DataType::Boolean),
            DtypeCategory::Boolean
        );
        assert_eq!(get_dtype_category(&DataType::String), DtypeCategory::String);
    }

    #[test]
    fn test_missing_flags_treats_nan_as_missing() {
        let series = Series::new("x".into(), &[Some(1.0), None, Some(f64::NAN)]);
        assert_eq!(missing_flags(&series).unwrap(), vec![false, true, true]);
        assert_eq!(missing_count(&series).unwrap(), 2);
    }

    #[test]
    fn test_missing_flags_strings() {
        let series = Series::new("s".into(), &[Some("a"), None, Some("")]);
        assert_eq!(missing_flags(&series).unwrap(), vec![false, true, false]);
    }

    #[test]
    fn test_distinct_count_excludes_missing() {
        let series = Series::new("x".into(), &[Some(1.0), Some(1.0), None, Some(f64::NAN), Some(2.0)]);
        assert_eq!(distinct_count(&series).unwrap(), 2);

        let empty = Series::new_empty("e".into(), &DataType::Int64);
        assert_eq!(distinct_count(&empty).unwrap(), 0);
    }

    #[test]
    fn test_complete_rows_mask() {
        let df = df![
            "a" => [Some(1), None, Some(3)],
            "b" => [Some("x"), Some("y"), None],
        ]
        .unwrap();
        let mask = complete_rows_mask(&df).unwrap();
        let flags: Vec<bool> = mask.into_iter().map(|v| v.unwrap()).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn test_numeric_values_skips_missing() {
        let series = Series::new("x".into(), &[Some(1_i64), None, Some(3)]);
        assert_eq!(numeric_values(&series).unwrap(), vec![1.0, 3.0]);

        let floats = Series::new("f".into(), &[Some(f64::NAN), Some(2.5)]);
        assert_eq!(numeric_values(&floats).unwrap(), vec![2.5]);
    }

    #[test]
    fn test_quantile_linear_interpolation() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_eq!(quantile(&values, 0.25), Some(3.25));
        assert_eq!(quantile(&values, 0.75), Some(7.75));
        assert_eq!(quantile(&[4.0], 0.25), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_fill_numeric_missing() {
        let series = Series::new("x".into(), &[Some(1), None, Some(3)]);
        let filled = fill_numeric_missing(&series, 2.0).unwrap();

        assert_eq!(filled.dtype(), &DataType::Float64);
        assert_eq!(filled.get(1).unwrap().try_extract::<f64>().unwrap(), 2.0);
        assert_eq!(filled.null_count(), 0);
    }

    #[test]
    fn test_series_to_strings() {
        let series = Series::new("x".into(), &[Some(10_i64), None]);
        assert_eq!(
            series_to_strings(&series).unwrap(),
            vec![Some("10".to_string()), None]
        );
    }
}
