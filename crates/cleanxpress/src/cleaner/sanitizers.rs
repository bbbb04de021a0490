//! Column name and text value normalization.

use crate::config::MissingTextPolicy;
use crate::error::{CleaningError, Result};
use crate::utils::{column_names, is_text_dtype};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::debug;

/// Text substituted for missing values under [`MissingTextPolicy::NanLiteral`].
pub(crate) const MISSING_TEXT: &str = "nan";

/// Trimmed, lowercased form of a name or value.
pub(crate) fn normalize_text(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Normalize every column name, then every value of every text column.
///
/// Fails without touching the table if two names collide after normalization.
pub(crate) fn format_columns(df: &mut DataFrame, policy: MissingTextPolicy) -> Result<()> {
    let renames = normalized_names(df)?;

    for (old, new) in &renames {
        if old != new {
            df.rename(old, new.as_str().into())?;
        }
    }

    for (_, col_name) in &renames {
        let series = df.column(col_name)?.as_materialized_series();
        if !is_text_dtype(series.dtype()) {
            continue;
        }

        let values: Vec<Option<String>> = series
            .str()?
            .into_iter()
            .map(|opt_val| match (opt_val, policy) {
                (Some(val), _) => Some(normalize_text(val)),
                (None, MissingTextPolicy::NanLiteral) => Some(MISSING_TEXT.to_string()),
                (None, MissingTextPolicy::KeepMissing) => None,
            })
            .collect();

        df.replace(col_name, Series::new(col_name.as_str().into(), values))?;
        debug!("Formatted values of '{}'", col_name);
    }

    Ok(())
}

/// `(current, normalized)` pairs in column order.
fn normalized_names(df: &DataFrame) -> Result<Vec<(String, String)>> {
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut pairs = Vec::with_capacity(df.width());

    for name in column_names(df) {
        let normalized = normalize_text(&name);
        if let Some(first) = seen.get(&normalized) {
            return Err(CleaningError::DuplicateColumn {
                first: first.clone(),
                second: name,
                normalized,
            });
        }
        seen.insert(normalized.clone(), name.clone());
        pairs.push((name, normalized));
    }

    Ok(pairs)
}
