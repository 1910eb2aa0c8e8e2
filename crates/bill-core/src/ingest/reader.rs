//! Delimited text to raw rows.

use std::path::Path;

use tracing::debug;

use crate::error::IngestError;
use crate::models::config::IngestConfig;

use super::Result;

/// Split CSV text into rows of raw cells.
///
/// Rows may have different widths. A leading byte-order mark is dropped and
/// rows whose cells are all blank are skipped.
pub fn read_rows(text: &str) -> Result<Vec<Vec<String>>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }
        rows.push(record.iter().map(str::to_string).collect());
    }

    debug!("Read {} non-blank rows", rows.len());
    Ok(rows)
}

/// Decode UTF-8 bytes and split them into rows.
pub fn read_rows_from_bytes(bytes: &[u8]) -> Result<Vec<Vec<String>>> {
    let text = std::str::from_utf8(bytes)?;
    read_rows(text)
}

/// Read a `.csv` file, enforcing the configured size ceiling.
pub fn read_csv_file(path: &Path, config: &IngestConfig) -> Result<Vec<Vec<String>>> {
    let is_csv = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(IngestError::UnsupportedFileType(path.display().to_string()));
    }

    let size = std::fs::metadata(path)?.len();
    if size > config.max_file_bytes {
        return Err(IngestError::TooLarge {
            size,
            limit: config.max_file_bytes,
        });
    }

    let bytes = std::fs::read(path)?;
    read_rows_from_bytes(&bytes)
}
