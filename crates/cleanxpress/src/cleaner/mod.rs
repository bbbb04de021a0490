//! Data cleaning module.
//!
//! Runs the configured cleaning steps over a table, always in this order:
//! 1. Duplicate removal
//! 2. Missing value handling (fill with mean/median, or drop rows)
//! 3. Column and value formatting
//! 4. IQR outlier removal
//! 5. User-requested type conversions
//!
//! Each step that runs appends a line to the [`CleaningReport`].

mod converters;
mod sanitizers;
mod type_corrector;

pub use type_corrector::{ConversionOutcome, TypeCorrector};

use crate::config::{CleaningConfig, MissingValueStrategy};
use crate::error::Result;
use crate::imputers::{FillStatistic, StatisticalImputer};
use crate::outliers::OutlierHandler;
use crate::types::CleaningReport;
use polars::prelude::*;
use tracing::{debug, info};

/// Data cleaner applying a [`CleaningConfig`].
pub struct DataCleaner {
    config: CleaningConfig,
}

impl DataCleaner {
    pub fn new(config: CleaningConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Clean a table, returning the cleaned table and its report.
    ///
    /// The input is consumed; callers that need the original keep a clone.
    pub fn clean(&self, df: DataFrame) -> Result<(DataFrame, CleaningReport)> {
        self.config.validate()?;

        let mut df = df;
        let mut report = CleaningReport::start(df.shape());
        info!("Cleaning dataset with shape {:?}", df.shape());

        // 1. Duplicates
        if self.config.drop_duplicates {
            let removed = Self::remove_duplicates(&mut df)?;
            report.record(
                format!("Removed {} duplicate rows", removed),
                "Duplicate Removal",
            );
            debug!("Removed {} duplicate rows", removed);
        }

        // 2. Missing values
        match self.config.handle_missing {
            MissingValueStrategy::None => {}
            MissingValueStrategy::FillMean => {
                StatisticalImputer::fill_numeric_columns(&mut df, FillStatistic::Mean)?;
                report.record(
                    "Filled missing values with mean",
                    "Missing Value Imputation (Mean)",
                );
            }
            MissingValueStrategy::FillMedian => {
                StatisticalImputer::fill_numeric_columns(&mut df, FillStatistic::Median)?;
                report.record(
                    "Filled missing values with median",
                    "Missing Value Imputation (Median)",
                );
            }
            MissingValueStrategy::DropRows => {
                let dropped = StatisticalImputer::drop_incomplete_rows(&mut df)?;
                report.record(
                    format!("Dropped {} rows with missing values", dropped),
                    "Missing Value Row Drop",
                );
            }
        }

        // 3. Formatting
        if self.config.format_columns {
            sanitizers::format_columns(&mut df, self.config.missing_text)?;
            report.record("Formatted columns and string values", "Column Formatting");
        }

        // 4. Outliers
        if self.config.remove_outliers {
            let removed = OutlierHandler::remove_outliers(&mut df, self.config.outlier_pass)?;
            report.record(
                format!("Removed {} outlier rows using IQR method", removed),
                "Outlier Removal",
            );
        }

        // 5. Conversions
        for outcome in TypeCorrector::apply_conversions(&mut df, &self.config.convert_column_types)
        {
            match outcome {
                ConversionOutcome::Converted { column, target } => report.record(
                    format!("Converted column '{}' to {} after cleaning", column, target),
                    format!("{} → {}", column, target),
                ),
                ConversionOutcome::Failed {
                    column,
                    target,
                    reason,
                } => report.note(format!(
                    "Failed to convert column '{}' to {}: {}",
                    column, target, reason
                )),
                ConversionOutcome::Skipped { .. } => {}
            }
        }

        report.finish(df.shape());
        info!(
            "Cleaning complete: {:?} -> {:?}, quality score {}%",
            report.original_shape, report.final_shape, report.quality_score
        );

        Ok((df, report))
    }

    /// Remove exact duplicate rows, keeping the first occurrence in order.
    fn remove_duplicates(df: &mut DataFrame) -> Result<usize> {
        let before = df.height();
        *df = df
            .clone()
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?;
        Ok(before - df.height())
    }
}

/// Clean `df` with `config`. See [`DataCleaner::clean`].
pub fn clean_data(df: DataFrame, config: &CleaningConfig) -> Result<(DataFrame, CleaningReport)> {
    DataCleaner::new(config.clone()).clean(df)
}
