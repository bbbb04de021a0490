//! CSV input and output.

use crate::error::{CleaningError, Result, ResultExt};
use polars::prelude::*;
use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;
use tracing::{debug, info};

/// Rows scanned for schema inference. `None` scans the whole file.
const INFER_SCHEMA_ROWS: Option<usize> = None;

/// Cell texts read as missing, on top of empty cells. These are the tokens
/// pandas' `read_csv` treats as NA by default.
pub const NULL_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn read_options() -> CsvReadOptions {
    let null_values = NullValues::AllColumns(NULL_TOKENS.iter().map(|t| (*t).into()).collect());

    CsvReadOptions::default()
        .with_infer_schema_length(INFER_SCHEMA_ROWS)
        .with_has_header(true)
        .with_parse_options(
            CsvParseOptions::default()
                .with_quote_char(Some(b'"'))
                .with_null_values(Some(null_values)),
        )
}

/// Load a CSV file with a header row.
///
/// If the standard read fails, the file is read again after removing blank
/// lines and collapsing tripled quotes.
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();

    match read_options()
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("Could not open {}", path.display()))?
        .finish()
    {
        Ok(df) => {
            info!("Loaded {} with shape {:?}", path.display(), df.shape());
            return Ok(df);
        }
        Err(e) => debug!("Standard loading failed: {}", e),
    }

    let content = std::fs::read_to_string(path)
        .map_err(CleaningError::from)
        .context(format!("Could not read {}", path.display()))?;
    let df = read_csv_bytes(precleaned_content(&content).as_bytes())
        .context(format!("Could not parse {} after pre-cleaning", path.display()))?;
    info!(
        "Loaded {} after pre-cleaning, shape {:?}",
        path.display(),
        df.shape()
    );
    Ok(df)
}

/// Parse CSV text held in memory.
pub fn read_csv_bytes(bytes: &[u8]) -> Result<DataFrame> {
    Ok(read_options()
        .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
        .finish()?)
}

fn precleaned_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write `df` as CSV with a header row to `writer`.
pub fn write_csv_to<W: Write>(df: &DataFrame, writer: &mut W) -> Result<()> {
    let mut df = df.clone();
    CsvWriter::new(writer)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(&mut df)?;
    Ok(())
}

/// Write `df` as CSV to `path`, creating or truncating the file.
pub fn write_csv(df: &DataFrame, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut file = File::create(path).map_err(|e| {
        CleaningError::ReportGenerationFailed(format!("{}: {}", path.display(), e))
    })?;
    write_csv_to(df, &mut file)?;
    debug!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}
