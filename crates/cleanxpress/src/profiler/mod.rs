//! Data profiling module.
//!
//! Produces a per-column description of a table (dtype, inferred category,
//! missing count, distinct count) without modifying it. Empty tables and
//! all-missing columns profile to zero counts.

use crate::error::Result;
use crate::types::{ColumnProfile, DatasetProfile};
use crate::utils::{distinct_count, dtype_category_str, missing_count};
use polars::prelude::*;
use tracing::debug;

/// Data profiler for describing dataset structure.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile every column of a dataset, in column order.
    pub fn profile_dataset(df: &DataFrame) -> Result<DatasetProfile> {
        let mut column_profiles = Vec::with_capacity(df.width());

        for col in df.get_columns() {
            column_profiles.push(Self::profile_column(col.as_materialized_series())?);
        }

        debug!(
            "Profiled {} columns over {} rows",
            column_profiles.len(),
            df.height()
        );

        Ok(DatasetProfile {
            shape: (df.height(), df.width()),
            column_profiles,
        })
    }

    fn profile_column(series: &Series) -> Result<ColumnProfile> {
        Ok(ColumnProfile {
            name: series.name().to_string(),
            dtype: series.dtype().to_string(),
            inferred_type: dtype_category_str(series).to_string(),
            missing_count: missing_count(series)?,
            distinct_count: distinct_count(series)?,
        })
    }
}

/// Render the profile of `df` as the pipe-separated text table.
pub fn generate_profile(df: &DataFrame) -> Result<String> {
    Ok(DataProfiler::profile_dataset(df)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_counts() {
        let df = df![
            "age" => [Some(10.0), Some(12.0), Some(12.0), None, Some(f64::NAN)],
            "city" => [Some("Oslo"), Some("oslo"), None, Some("Oslo"), Some("Rome")],
        ]
        .unwrap();

        let profile = DataProfiler::profile_dataset(&df).unwrap();
        assert_eq!(profile.shape, (5, 2));

        let age = &profile.column_profiles[0];
        assert_eq!(age.name, "age");
        assert_eq!(age.inferred_type, "numeric");
        assert_eq!(age.missing_count, 2);
        assert_eq!(age.distinct_count, 2);

        let city = &profile.column_profiles[1];
        assert_eq!(city.inferred_type, "string");
        assert_eq!(city.missing_count, 1);
        assert_eq!(city.distinct_count, 3);
    }

    #[test]
    fn test_profile_empty_table_with_columns() {
        let df = DataFrame::new(vec![
            Series::new_empty("a".into(), &DataType::Int64).into(),
            Series::new_empty("b".into(), &DataType::String).into(),
        ])
        .unwrap();

        let profile = DataProfiler::profile_dataset(&df).unwrap();
        assert_eq!(profile.column_profiles.len(), 2);
        for col in &profile.column_profiles {
            assert_eq!(col.missing_count, 0);
            assert_eq!(col.distinct_count, 0);
        }

        let text = generate_profile(&df).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[2].starts_with("a | "));
        assert!(lines[2].ends_with(" | 0 | 0"));
        assert!(lines[3].starts_with("b | "));
    }

    #[test]
    fn test_profile_all_missing_column() {
        let df = df![
            "empty" => [None::<f64>, None, None],
        ]
        .unwrap();

        let profile = DataProfiler::profile_dataset(&df).unwrap();
        assert_eq!(profile.column_profiles[0].missing_count, 3);
        assert_eq!(profile.column_profiles[0].distinct_count, 0);
    }

    #[test]
    fn test_profile_does_not_mutate_input() {
        let df = df!["x" => [1, 1, 2]].unwrap();
        let before = df.clone();
        let _ = DataProfiler::profile_dataset(&df).unwrap();
        assert!(df.equals_missing(&before));
    }

    #[test]
    fn test_profile_no_columns() {
        let text = generate_profile(&DataFrame::empty()).unwrap();
        assert_eq!(text.lines().count(), 2);
    }
}
