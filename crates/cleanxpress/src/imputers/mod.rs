//! Imputation module for handling missing values.
//!
//! This module provides:
//! - Statistical imputation (mean, median) for numeric columns
//! - Dropping rows that contain missing values

mod statistical;

pub use statistical::{FillStatistic, StatisticalImputer};
