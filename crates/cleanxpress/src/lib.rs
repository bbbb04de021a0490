//! Tabular Data Profiling and Cleaning Library
//!
//! Profiles a CSV-derived table and applies a user-selected sequence of
//! cleaning operations to it, producing a cleaned table and a human-readable
//! report. Built on Polars.
//!
//! # Overview
//!
//! - **Profiling**: per-column dtype, inferred category, missing and distinct counts
//! - **Cleaning**: duplicate removal, missing value handling, formatting,
//!   IQR outlier removal, and user-requested type conversions, always in that order
//! - **Reporting**: an ordered report ending in a row-retention quality score,
//!   plus CSV/text/JSON artifacts
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cleanxpress::{CleaningConfig, MissingValueStrategy, TargetType};
//!
//! let df = cleanxpress::io::load_csv("data.csv")?;
//! println!("{}", cleanxpress::generate_profile(&df)?);
//!
//! let config = CleaningConfig::builder()
//!     .drop_duplicates(true)
//!     .handle_missing(MissingValueStrategy::FillMean)
//!     .format_columns(true)
//!     .remove_outliers(true)
//!     .convert_column("age", TargetType::Int)
//!     .build()?;
//!
//! let (cleaned, report) = cleanxpress::clean_data(df, &config)?;
//! println!("{}", report);
//! ```
//!
//! # Missing values
//!
//! A value counts as missing if it is null, or NaN in a floating-point column.

pub mod cleaner;
pub mod config;
pub mod error;
pub mod imputers;
pub mod io;
pub mod outliers;
pub mod profiler;
pub mod quality;
pub mod reporting;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use cleaner::{ConversionOutcome, DataCleaner, TypeCorrector, clean_data};
pub use config::{
    CleaningConfig, CleaningConfigBuilder, ColumnConversion, ConfigValidationError,
    MissingTextPolicy, MissingValueStrategy, OutlierPass, TargetType,
};
pub use error::{CleaningError, Result as CleaningResult, ResultExt};
pub use imputers::{FillStatistic, StatisticalImputer};
pub use outliers::{IqrBounds, OutlierHandler};
pub use profiler::{DataProfiler, generate_profile};
pub use quality::{completeness, quality_score};
pub use reporting::{CleaningSummary, GeneratedArtifacts, ReportGenerator};
pub use types::{CleaningReport, ColumnProfile, DatasetProfile};
pub use utils::{DtypeCategory, dtype_category_str, get_dtype_category, is_numeric_dtype};
