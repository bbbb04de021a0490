use crate::quality::quality_score;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub inferred_type: String,
    pub missing_count: usize,
    pub distinct_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetProfile {
    pub shape: (usize, usize),
    pub column_profiles: Vec<ColumnProfile>,
}

pub(crate) const PROFILE_HEADER: &str = "Column Name | Data Type | Missing Values | Unique Values";
pub(crate) const PROFILE_RULE: &str =
    "-----------------------------------------------------------";

/// Renders the pipe-separated text table shown before cleaning.
impl fmt::Display for DatasetProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", PROFILE_HEADER, PROFILE_RULE)?;
        for col in &self.column_profiles {
            write!(
                f,
                "\n{} | {} | {} | {}",
                col.name, col.dtype, col.missing_count, col.distinct_count
            )?;
        }
        Ok(())
    }
}

// ============================================================================
// Cleaning Report
// ============================================================================

/// Append-only audit log produced by a cleaning run.
///
/// `lines` is the human-readable report; the remaining fields are the facts
/// the closing lines were derived from.
///
/// # Example
///
/// ```rust,ignore
/// let (cleaned, report) = cleanxpress::clean_data(df, &config)?;
/// println!("{}", report);
/// println!("score: {}", report.quality_score);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    /// `(rows, columns)` of the input table.
    pub original_shape: (usize, usize),
    /// `(rows, columns)` of the cleaned table.
    pub final_shape: (usize, usize),
    /// Row-retention score; may be negative, never clamped.
    pub quality_score: i64,
    /// Names of operations that ran, in order.
    pub operations: Vec<String>,
    /// Report lines, in order.
    pub lines: Vec<String>,
}

impl CleaningReport {
    /// Start a report for a table of the given shape.
    pub(crate) fn start(original_shape: (usize, usize)) -> Self {
        Self {
            original_shape,
            final_shape: original_shape,
            quality_score: 100,
            operations: Vec::new(),
            lines: vec![format!("Original shape: {:?}", original_shape)],
        }
    }

    /// Append a line for an operation that ran.
    pub(crate) fn record(&mut self, line: impl Into<String>, operation: impl Into<String>) {
        self.lines.push(line.into());
        self.operations.push(operation.into());
    }

    /// Append a line that does not correspond to a performed operation.
    pub(crate) fn note(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Close the report with the final shape, score and operation list.
    pub(crate) fn finish(&mut self, final_shape: (usize, usize)) {
        self.final_shape = final_shape;
        self.quality_score = quality_score(self.original_shape.0, final_shape.0);
        self.lines.push(format!("Final shape: {:?}", final_shape));
        self.lines.push(format!(
            "Estimated Data Quality Score: {}%",
            self.quality_score
        ));
        self.lines.push(format!(
            "Operations performed: {}",
            self.operations.join(", ")
        ));
    }

    /// Rows removed over the whole run (negative if rows were added).
    pub fn rows_removed(&self) -> i64 {
        self.original_shape.0 as i64 - self.final_shape.0 as i64
    }

    /// Report text, one line per entry.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl fmt::Display for CleaningReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
