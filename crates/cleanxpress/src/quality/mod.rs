//! Data quality metrics.
//!
//! - [`quality_score`]: the row-retention score closing every cleaning report
//! - [`completeness`]: share of non-missing cells, used in the JSON summary

use crate::utils::missing_count;
use polars::prelude::*;

/// Row-retention score: `100 - 100 * removed / max(original, 1)`, truncated
/// toward zero.
///
/// The score is not clamped: it exceeds 100 if rows were somehow added and
/// has no lower bound.
pub fn quality_score(original_rows: usize, final_rows: usize) -> i64 {
    let removed = original_rows as f64 - final_rows as f64;
    let ratio = removed / original_rows.max(1) as f64;
    (100.0 - ratio * 100.0) as i64
}

/// Fraction of cells that are not missing, in `[0, 1]`. An empty table is
/// fully complete.
pub fn completeness(df: &DataFrame) -> PolarsResult<f64> {
    let total_cells = df.height() * df.width();
    if total_cells == 0 {
        return Ok(1.0);
    }

    let mut missing = 0;
    for col in df.get_columns() {
        missing += missing_count(col.as_materialized_series())?;
    }
    Ok(1.0 - missing as f64 / total_cells as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_score_examples() {
        assert_eq!(quality_score(100, 90), 90);
        assert_eq!(quality_score(100, 100), 100);
        assert_eq!(quality_score(4, 0), 0);
    }

    #[test]
    fn test_quality_score_empty_input() {
        assert_eq!(quality_score(0, 0), 100);
    }

    #[test]
    fn test_quality_score_not_clamped() {
        assert_eq!(quality_score(10, 20), 200);
        assert_eq!(quality_score(0, 5), 600);
    }

    #[test]
    fn test_quality_score_truncates() {
        // 1/3 removed: 100 - 33.33.. = 66.66.. -> 66
        assert_eq!(quality_score(3, 2), 66);
    }

    #[test]
    fn test_completeness() {
        let df = df![
            "a" => [Some(1.0), None, Some(f64::NAN), Some(4.0)],
            "b" => ["w", "x", "y", "z"],
        ]
        .unwrap();
        assert_eq!(completeness(&df).unwrap(), 0.75);
        assert_eq!(completeness(&DataFrame::empty()).unwrap(), 1.0);
    }
}
