//! CSV ingestion: raw rows to a normalized invoice plus advisory warnings.

mod parser;
pub mod reader;
pub mod rules;

pub use parser::CsvInvoiceParser;
pub use reader::{read_csv_file, read_rows, read_rows_from_bytes};

use serde::Serialize;

use crate::error::IngestError;
use crate::models::invoice::{Invoice, Warning, WarningKind};

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Trait for bill parsers working on delimited text.
pub trait InvoiceParser {
    /// Parse a bill from CSV text.
    fn parse(&self, text: &str) -> Result<ParseOutcome>;
}

/// A successfully ingested bill.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutcome {
    /// Normalized invoice.
    pub invoice: Invoice,
    /// Advisory issues, in the order they were found.
    pub warnings: Vec<Warning>,
}

impl ParseOutcome {
    fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }

    /// Rows flagged for a zero or missing quantity.
    pub fn error_count(&self) -> usize {
        self.count(WarningKind::MissingQuantity)
    }

    /// Rows flagged for a zero rate.
    pub fn warn_count(&self) -> usize {
        self.count(WarningKind::ZeroRate)
    }

    /// One-line summary, e.g. `"⚠ 4 rows, 1 error(s)"`.
    pub fn summary_badge(&self) -> String {
        let rows = self.invoice.items.len();
        let errors = self.error_count();
        let warns = self.warn_count();

        if errors > 0 {
            format!("⚠ {} rows, {} error(s)", rows, errors)
        } else if warns > 0 {
            format!("{} rows, {} warning(s)", rows, warns)
        } else {
            format!("✓ {} row(s) parsed", rows)
        }
    }

    /// Review message listing every warning, or a success line when there are none.
    pub fn validation_message(&self) -> String {
        if self.warnings.is_empty() {
            return format!(
                "✓ All {} items parsed successfully.",
                self.invoice.items.len()
            );
        }

        let details = self
            .warnings
            .iter()
            .map(|w| w.to_string())
            .collect::<Vec<_>>()
            .join(" • ");
        format!("⚠ {} warning(s): {}", self.warnings.len(), details)
    }
}
