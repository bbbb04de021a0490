//! Report generation module.
//!
//! Writes the artifacts of a cleaning run into an output directory:
//!
//! - `cleaned_data.csv`: the cleaned table
//! - `cleaning_report.txt`: the report lines
//! - `cleaning_report.json` (optional): a [`CleaningSummary`]
//!
//! # Example
//!
//! ```rust,ignore
//! use cleanxpress::reporting::{CleaningSummary, ReportGenerator};
//!
//! let (cleaned, report) = cleanxpress::clean_data(original.clone(), &config)?;
//! let summary = CleaningSummary::build(Some("data.csv"), &original, &cleaned, &report)?;
//!
//! let generator = ReportGenerator::new("outputs");
//! let artifacts = generator.write_all(&cleaned, &report, Some(&summary))?;
//! println!("{}", artifacts.csv_path.display());
//! ```

mod generator;

pub use generator::{
    CleaningSummary, GeneratedArtifacts, ReportGenerator, CLEANED_CSV_FILE, REPORT_JSON_FILE,
    REPORT_TEXT_FILE,
};
