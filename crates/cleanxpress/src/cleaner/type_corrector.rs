//! Type correction for user-requested column conversions.

use super::converters::{strings_to_datetime, strings_to_float, strings_to_int, strip_non_numeric};
use crate::config::{ColumnConversion, TargetType};
use crate::error::{CleaningError, Result};
use crate::utils::series_to_strings;
use polars::prelude::*;
use tracing::{debug, warn};

/// What happened to one requested conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionOutcome {
    /// The column now has the target type.
    Converted { column: String, target: TargetType },
    /// Conversion failed. The column holds its stripped text.
    Failed {
        column: String,
        target: TargetType,
        reason: String,
    },
    /// The column is not in the table.
    Skipped { column: String },
}

/// Applies [`ColumnConversion`]s to a table.
pub struct TypeCorrector;

impl TypeCorrector {
    /// Apply every conversion in order. A failing column never aborts the
    /// others.
    pub fn apply_conversions(
        df: &mut DataFrame,
        conversions: &[ColumnConversion],
    ) -> Vec<ConversionOutcome> {
        let mut outcomes = Vec::with_capacity(conversions.len());

        for conversion in conversions {
            let column = conversion.column.clone();
            let target = conversion.target;

            match Self::convert_column(df, &column, target) {
                Ok(()) => {
                    debug!("Converted '{}' to {}", column, target);
                    outcomes.push(ConversionOutcome::Converted { column, target });
                }
                Err(CleaningError::ColumnNotFound(_)) => {
                    warn!("Column '{}' not found, skipping conversion to {}", column, target);
                    outcomes.push(ConversionOutcome::Skipped { column });
                }
                Err(e) => {
                    let reason = match e {
                        CleaningError::TypeConversionFailed { reason, .. } => reason,
                        other => other.to_string(),
                    };
                    warn!("Failed to convert '{}' to {}: {}", column, target, reason);
                    outcomes.push(ConversionOutcome::Failed {
                        column,
                        target,
                        reason,
                    });
                }
            }
        }

        outcomes
    }

    /// Strip non-numeric characters from the text of `column`, then convert
    /// it to `target`.
    ///
    /// The stripped text is written back before conversion is attempted, so
    /// on error the column is left as text.
    pub fn convert_column(df: &mut DataFrame, column: &str, target: TargetType) -> Result<()> {
        let series = df
            .column(column)
            .map_err(|_| CleaningError::ColumnNotFound(column.to_string()))?
            .as_materialized_series();
        let stripped: Vec<String> = series_to_strings(series)?
            .into_iter()
            .map(|v| v.map(|s| strip_non_numeric(&s)).unwrap_or_default())
            .collect();

        df.replace(column, Series::new(column.into(), stripped.clone()))?;

        let converted = match target {
            TargetType::Int => strings_to_int(column, &stripped)?,
            TargetType::Float => strings_to_float(column, &stripped),
            TargetType::Datetime => strings_to_datetime(column, &stripped)?,
        };
        df.replace(column, converted)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_int_strips_and_coerces() {
        let mut df = df!["age" => ["10", "12abc", "x"]].unwrap();

        TypeCorrector::convert_column(&mut df, "age", TargetType::Int).unwrap();

        let col = df.column("age").unwrap();
        assert_eq!(col.dtype(), &DataType::Int64);
        let values: Vec<Option<i64>> = col.i64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(10), Some(12), None]);
    }

    #[test]
    fn test_convert_float_from_numeric_column() {
        let mut df = df!["x" => [Some(1_i64), None, Some(3)]].unwrap();

        TypeCorrector::convert_column(&mut df, "x", TargetType::Float).unwrap();

        let values: Vec<Option<f64>> = df.column("x").unwrap().f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(1.0), None, Some(3.0)]);
    }

    #[test]
    fn test_fractional_int_failure_leaves_stripped_text() {
        let mut df = df!["price" => ["$10.5", "3 units"]].unwrap();

        let outcomes = TypeCorrector::apply_conversions(
            &mut df,
            &[ColumnConversion::new("price", TargetType::Int)],
        );

        assert!(matches!(&outcomes[0], ConversionOutcome::Failed { column, .. } if column == "price"));
        let values: Vec<Option<&str>> = df.column("price").unwrap().str().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some("10.5"), Some("3")]);
    }

    #[test]
    fn test_missing_column_is_skipped() {
        let mut df = df!["a" => [1, 2]].unwrap();
        let before = df.clone();

        let outcomes = TypeCorrector::apply_conversions(
            &mut df,
            &[ColumnConversion::new("ghost", TargetType::Float)],
        );

        assert_eq!(
            outcomes,
            vec![ConversionOutcome::Skipped {
                column: "ghost".to_string()
            }]
        );
        assert!(df.equals_missing(&before));
    }

    #[test]
    fn test_convert_missing_column_errors() {
        let mut df = df!["a" => [1, 2]].unwrap();

        let err = TypeCorrector::convert_column(&mut df, "ghost", TargetType::Int).unwrap_err();

        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_failure_does_not_stop_later_conversions() {
        let mut df = df![
            "a" => ["1.5"],
            "b" => ["2"],
        ]
        .unwrap();

        let outcomes = TypeCorrector::apply_conversions(
            &mut df,
            &[
                ColumnConversion::new("a", TargetType::Int),
                ColumnConversion::new("b", TargetType::Int),
            ],
        );

        assert!(matches!(outcomes[0], ConversionOutcome::Failed { .. }));
        assert!(matches!(outcomes[1], ConversionOutcome::Converted { .. }));
        assert_eq!(df.column("b").unwrap().dtype(), &DataType::Int64);
    }

    #[test]
    fn test_convert_datetime() {
        let mut df = df!["joined" => [Some("2020-01-15"), Some("bad"), None]].unwrap();

        TypeCorrector::convert_column(&mut df, "joined", TargetType::Datetime).unwrap();

        let col = df.column("joined").unwrap();
        assert!(matches!(col.dtype(), DataType::Datetime(TimeUnit::Milliseconds, _)));
        assert_eq!(col.null_count(), 2);
    }
}
