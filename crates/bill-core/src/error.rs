//! Error types for the bill-core library.

use thiserror::Error;

/// Main error type for the bill library.
#[derive(Error, Debug)]
pub enum BillError {
    /// CSV ingestion error.
    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    /// Form validation error.
    #[error("form error: {0}")]
    Form(#[from] FormError),

    /// HTML or PDF rendering error.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning CSV input into an invoice.
#[derive(Error, Debug)]
pub enum IngestError {
    /// No item row survived ingestion.
    #[error(
        "No valid items found in CSV. Check that your CSV has an \"ITEMS\" section with at least one row."
    )]
    NoItemsFound,

    /// The input file is not a `.csv` file.
    #[error("Invalid file type. Please upload a .csv file.")]
    UnsupportedFileType(String),

    /// The input exceeds the configured size ceiling.
    #[error("File is too large ({size} bytes, max {limit} bytes). Please split your CSV into smaller files.")]
    TooLarge { size: u64, limit: u64 },

    /// The input is not valid UTF-8.
    #[error("CSV is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    /// The CSV reader rejected the input.
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error while reading the input.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A single field-level problem reported by the form entry path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field the message belongs to (`invoiceNumber`, `items`, ...).
    pub field: &'static str,
    /// Human-readable message.
    pub message: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised by the form entry path.
#[derive(Error, Debug)]
pub enum FormError {
    /// One or more fields failed validation.
    #[error("{}", join_field_errors(.0))]
    Invalid(Vec<FieldError>),

    /// The form document could not be decoded.
    #[error("failed to decode form: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FormError {
    /// Field errors carried by this error, empty for decode failures.
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            FormError::Invalid(errors) => errors,
            FormError::Decode(_) => &[],
        }
    }
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors related to HTML and PDF export.
#[derive(Error, Debug)]
pub enum RenderError {
    /// HTML template failed to compile or render.
    #[error("template error: {0}")]
    Template(String),

    /// PDF document assembly failed.
    #[error("failed to build PDF: {0}")]
    Pdf(String),

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the bill library.
pub type Result<T> = std::result::Result<T, BillError>;
