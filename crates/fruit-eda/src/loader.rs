//! CSV loading.
//!
//! Reads a delimited text file with a header row into a `DataFrame`, letting
//! polars infer column types. Empty fields and the usual missing-value tokens
//! (`NA`, `N/A`, `null`, `NaN`, ...) load as nulls. A column holding any other
//! unparseable entry is read as text; the cleaner coerces it later.

use crate::error::{EdaError, Result};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// Rows sampled for schema inference on the fast path.
const INFER_SCHEMA_ROWS: usize = 100;

/// Tokens read as missing in every column, besides empty fields.
pub const MISSING_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn parse_options() -> CsvParseOptions {
    CsvParseOptions::default()
        .with_quote_char(Some(b'"'))
        .with_null_values(Some(NullValues::AllColumns(
            MISSING_TOKENS.iter().map(|token| (*token).into()).collect(),
        )))
}

/// Load a CSV file with multiple fallback strategies.
///
/// 1. Standard read with `"` quoting and schema inferred from the first rows.
/// 2. Schema inferred from the whole file, for files whose first rows look
///    numeric but later rows do not.
/// 3. Pre-clean the raw text (blank lines, doubled quotes) and parse from
///    memory.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(EdaError::FileNotFound(path.display().to_string()));
    }

    info!("Loading dataset from: {}", path.display());

    match CsvReadOptions::default()
        .with_infer_schema_length(Some(INFER_SCHEMA_ROWS))
        .with_has_header(true)
        .with_parse_options(parse_options())
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => {
            info!("Dataset loaded successfully: {:?}", df.shape());
            return Ok(df);
        }
        Err(e) => {
            debug!("Standard loading failed: {}", e);
        }
    }

    match CsvReadOptions::default()
        .with_infer_schema_length(None)
        .with_has_header(true)
        .with_parse_options(parse_options())
        .try_into_reader_with_file_path(Some(PathBuf::from(path)))?
        .finish()
    {
        Ok(df) => {
            info!("Dataset loaded with full schema inference: {:?}", df.shape());
            return Ok(df);
        }
        Err(e) => {
            debug!("Loading with full schema inference failed: {}", e);
        }
    }

    match std::fs::read_to_string(path) {
        Ok(content) => {
            let df = load_dataset_from_str(&clean_csv_content(&content))?;
            info!("Dataset loaded after pre-cleaning: {:?}", df.shape());
            Ok(df)
        }
        Err(e) => {
            error!("Could not read file: {}", e);
            Err(e.into())
        }
    }
}

/// Parse CSV text held in memory.
pub fn load_dataset_from_str(content: &str) -> Result<DataFrame> {
    let cursor = Cursor::new(content.to_string());
    let df = CsvReadOptions::default()
        .with_infer_schema_length(None)
        .with_has_header(true)
        .with_parse_options(parse_options())
        .into_reader_with_file_handle(cursor)
        .finish()?;
    Ok(df)
}

/// Drop blank lines and collapse doubled quotes.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
