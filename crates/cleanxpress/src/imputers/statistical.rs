//! Statistical imputation methods.
//!
//! Provides mean and median imputation for numeric columns and whole-row
//! removal for incomplete rows.

use crate::error::Result;
use crate::utils::{
    column_names, complete_rows_mask, fill_numeric_missing, is_numeric_dtype, missing_count,
    numeric_values,
};
use polars::prelude::*;
use std::fmt;
use tracing::debug;

/// Statistic used to fill missing numeric values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStatistic {
    Mean,
    Median,
}

impl FillStatistic {
    /// The statistic over the non-missing values of `series`, NaN included
    /// as missing.
    fn compute(&self, series: &Series) -> Result<Option<f64>> {
        let present = Series::new(series.name().clone(), numeric_values(series)?);
        Ok(match self {
            Self::Mean => present.mean(),
            Self::Median => present.median(),
        })
    }
}

impl fmt::Display for FillStatistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mean => f.write_str("mean"),
            Self::Median => f.write_str("median"),
        }
    }
}

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill missing entries of every numeric column with the column's
    /// statistic over its non-missing values.
    ///
    /// Columns without missing entries, without any non-missing value, or of
    /// a non-numeric type are left untouched. Filled columns become Float64.
    /// Returns the names of the filled columns.
    pub fn fill_numeric_columns(
        df: &mut DataFrame,
        statistic: FillStatistic,
    ) -> Result<Vec<String>> {
        let mut filled = Vec::new();

        for col_name in column_names(df) {
            let series = df.column(&col_name)?.as_materialized_series().clone();
            if !is_numeric_dtype(series.dtype()) || missing_count(&series)? == 0 {
                continue;
            }

            let Some(fill_value) = statistic.compute(&series)? else {
                debug!("Column '{}' has no values to compute a {} from", col_name, statistic);
                continue;
            };

            let result = fill_numeric_missing(&series, fill_value)?;
            df.replace(&col_name, result)?;
            debug!("Filled '{}' with {}: {:.2}", col_name, statistic, fill_value);
            filled.push(col_name);
        }

        Ok(filled)
    }

    /// Remove every row that has a missing value in any column.
    ///
    /// Returns the number of rows removed.
    pub fn drop_incomplete_rows(df: &mut DataFrame) -> Result<usize> {
        let before = df.height();
        let mask = complete_rows_mask(df)?;
        *df = df.filter(&mask)?;
        Ok(before - df.height())
    }
}
