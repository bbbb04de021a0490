//! Outlier handling module.
//!
//! Removes rows outside the IQR fences of numeric columns.

use crate::config::OutlierPass;
use crate::error::Result;
use crate::utils::{column_names, is_numeric_dtype, numeric_values, quantile};
use polars::prelude::*;
use tracing::debug;

/// Interquartile-range fences for one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IqrBounds {
    pub q1: f64,
    pub q3: f64,
    pub lower: f64,
    pub upper: f64,
}

impl IqrBounds {
    /// Fences `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` over the non-missing values of
    /// `series`. `None` if the column has no non-missing values.
    pub fn compute(series: &Series) -> Result<Option<Self>> {
        let values = numeric_values(series)?;
        let (Some(q1), Some(q3)) = (quantile(&values, 0.25), quantile(&values, 0.75)) else {
            return Ok(None);
        };
        let iqr = q3 - q1;
        Ok(Some(Self {
            q1,
            q3,
            lower: q1 - 1.5 * iqr,
            upper: q3 + 1.5 * iqr,
        }))
    }

    /// Per-row keep flags. Missing values are never within bounds.
    pub fn keep_flags(&self, series: &Series) -> Result<Vec<bool>> {
        let floats = series.cast(&DataType::Float64)?;
        Ok(floats
            .f64()?
            .into_iter()
            .map(|v| v.is_some_and(|val| val >= self.lower && val <= self.upper))
            .collect())
    }
}

/// Handles outlier detection and removal.
pub struct OutlierHandler;

impl OutlierHandler {
    /// Remove rows containing outliers in any numeric column, using the IQR
    /// method.
    ///
    /// With [`OutlierPass::Sequential`], columns are processed in order and
    /// each column's fences are computed on the rows that survived the
    /// previous columns. With [`OutlierPass::Simultaneous`], every fence is
    /// computed on the table as given and one combined filter is applied.
    ///
    /// Returns the number of rows removed.
    pub fn remove_outliers(df: &mut DataFrame, pass: OutlierPass) -> Result<usize> {
        let original_rows = df.height();
        let numeric_cols: Vec<String> = column_names(df)
            .into_iter()
            .filter(|name| {
                df.column(name)
                    .map(|c| is_numeric_dtype(c.dtype()))
                    .unwrap_or(false)
            })
            .collect();

        match pass {
            OutlierPass::Sequential => {
                for col_name in &numeric_cols {
                    let series = df.column(col_name)?.as_materialized_series();
                    let keep = Self::column_keep_flags(col_name, series)?;
                    let mask = BooleanChunked::from_slice("mask".into(), &keep);
                    *df = df.filter(&mask)?;
                    debug!("'{}' filtered, {} rows left", col_name, df.height());
                }
            }
            OutlierPass::Simultaneous => {
                let mut keep = vec![true; df.height()];
                for col_name in &numeric_cols {
                    let series = df.column(col_name)?.as_materialized_series();
                    let flags = Self::column_keep_flags(col_name, series)?;
                    for (k, inside) in keep.iter_mut().zip(flags) {
                        *k &= inside;
                    }
                }
                let mask = BooleanChunked::from_slice("mask".into(), &keep);
                *df = df.filter(&mask)?;
            }
        }

        let rows_removed = original_rows - df.height();
        debug!("Removed {} outlier rows", rows_removed);
        Ok(rows_removed)
    }

    /// Keep flags for one column. Without quartiles there are no fences to
    /// be inside of, so every row fails.
    fn column_keep_flags(col_name: &str, series: &Series) -> Result<Vec<bool>> {
        match IqrBounds::compute(series)? {
            Some(bounds) => {
                debug!("'{}' fences [{}, {}]", col_name, bounds.lower, bounds.upper);
                bounds.keep_flags(series)
            }
            None => {
                debug!("'{}' has no values to compute quartiles, no row passes", col_name);
                Ok(vec![false; series.len()])
            }
        }
    }
}
