use crate::error::{CleaningError, Result};
use crate::io::write_csv;
use crate::profiler::DataProfiler;
use crate::quality::completeness;
use crate::types::{CleaningReport, DatasetProfile};
use chrono::Local;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

pub const CLEANED_CSV_FILE: &str = "cleaned_data.csv";
pub const REPORT_TEXT_FILE: &str = "cleaning_report.txt";
pub const REPORT_JSON_FILE: &str = "cleaning_report.json";

// ============================================================================
// Summary
// ============================================================================

/// Machine-readable summary of one cleaning run.
///
/// Used for `--json` output on the command line and for
/// `cleaning_report.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningSummary {
    /// Timestamp when the summary was generated
    pub generated_at: String,
    /// Path of the input file, if the table came from one
    pub input_file: Option<String>,
    pub original_shape: (usize, usize),
    pub final_shape: (usize, usize),
    /// Negative if rows were added
    pub rows_removed: i64,
    pub quality_score: i64,
    /// Share of non-missing cells before cleaning (0.0-1.0)
    pub completeness_before: f64,
    /// Share of non-missing cells after cleaning (0.0-1.0)
    pub completeness_after: f64,
    pub operations: Vec<String>,
    pub report_lines: Vec<String>,
    pub profile_before: DatasetProfile,
    pub profile_after: DatasetProfile,
}

impl CleaningSummary {
    /// Build a summary from both tables and the run's report.
    pub fn build(
        input_file: Option<&str>,
        original: &DataFrame,
        cleaned: &DataFrame,
        report: &CleaningReport,
    ) -> Result<Self> {
        Ok(Self {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.map(str::to_string),
            original_shape: report.original_shape,
            final_shape: report.final_shape,
            rows_removed: report.rows_removed(),
            quality_score: report.quality_score,
            completeness_before: completeness(original)?,
            completeness_after: completeness(cleaned)?,
            operations: report.operations.clone(),
            report_lines: report.lines.clone(),
            profile_before: DataProfiler::profile_dataset(original)?,
            profile_after: DataProfiler::profile_dataset(cleaned)?,
        })
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ============================================================================
// Generator
// ============================================================================

/// Paths of the files written by [`ReportGenerator::write_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifacts {
    pub csv_path: PathBuf,
    pub report_path: PathBuf,
    pub summary_path: Option<PathBuf>,
}

pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write the cleaned table, the report text and, if given, the summary.
    pub fn write_all(
        &self,
        cleaned: &DataFrame,
        report: &CleaningReport,
        summary: Option<&CleaningSummary>,
    ) -> Result<GeneratedArtifacts> {
        let csv_path = self.write_cleaned_csv(cleaned)?;
        let report_path = self.write_report_text(report)?;
        let summary_path = summary
            .map(|s| self.write_summary_json(s))
            .transpose()?;

        Ok(GeneratedArtifacts {
            csv_path,
            report_path,
            summary_path,
        })
    }

    pub fn write_cleaned_csv(&self, cleaned: &DataFrame) -> Result<PathBuf> {
        self.ensure_output_dir()?;
        let path = self.output_dir.join(CLEANED_CSV_FILE);
        write_csv(cleaned, &path)?;
        info!("Dataset saved: {}", path.display());
        Ok(path)
    }

    pub fn write_report_text(&self, report: &CleaningReport) -> Result<PathBuf> {
        let path = self.output_dir.join(REPORT_TEXT_FILE);
        self.write_file(&path, report.to_text().as_bytes())?;
        info!("Report saved: {}", path.display());
        Ok(path)
    }

    pub fn write_summary_json(&self, summary: &CleaningSummary) -> Result<PathBuf> {
        let path = self.output_dir.join(REPORT_JSON_FILE);
        self.write_file(&path, summary.to_json_pretty()?.as_bytes())?;
        info!("Summary saved: {}", path.display());
        Ok(path)
    }

    fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            CleaningError::ReportGenerationFailed(format!(
                "cannot create {}: {}",
                self.output_dir.display(),
                e
            ))
        })
    }

    fn write_file(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.ensure_output_dir()?;
        let mut file = File::create(path)
            .map_err(|e| CleaningError::ReportGenerationFailed(format!("{}: {}", path.display(), e)))?;
        file.write_all(contents)?;
        Ok(())
    }
}
