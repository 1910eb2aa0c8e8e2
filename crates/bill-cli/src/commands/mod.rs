//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod parse;
pub mod render;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use bill_core::ingest::read_csv_file;
use bill_core::{BillConfig, CsvInvoiceParser, Invoice, InvoiceForm, Warning};

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bill")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<BillConfig> {
    if let Some(path) = path {
        return Ok(BillConfig::from_file(path)?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(BillConfig::from_file(&default_path)?)
    } else {
        Ok(BillConfig::default())
    }
}

/// Read a bill from a CSV sheet or a JSON form document.
pub fn load_bill(path: &Path, config: &BillConfig) -> anyhow::Result<(Invoice, Vec<Warning>)> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "csv" => {
            let rows = read_csv_file(path, &config.ingest)?;
            let outcome = CsvInvoiceParser::from_config(&config.ingest).parse_rows(&rows)?;
            Ok((outcome.invoice, outcome.warnings))
        }
        "json" => {
            let form = InvoiceForm::from_json(&fs::read_to_string(path)?)?;
            Ok((form.into_invoice(config)?, Vec::new()))
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}
