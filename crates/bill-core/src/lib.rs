//! Core library for the bill generator.
//!
//! This crate provides:
//! - CSV ingestion of hand-edited bill spreadsheets (metadata rows, `ITEMS` block)
//! - A validated form entry path producing the same invoice model
//! - Formatters for Indian currency grouping, display dates and amounts in words
//! - HTML preview and fixed-layout A4 PDF export (feature `render`)

pub mod error;
pub mod format;
pub mod form;
pub mod ingest;
pub mod models;
#[cfg(feature = "render")]
pub mod render;

pub use error::{BillError, FieldError, FormError, IngestError, RenderError, Result};
pub use form::{BankChoice, FormItem, InvoiceForm};
pub use ingest::{CsvInvoiceParser, InvoiceParser, ParseOutcome};
pub use models::config::BillConfig;
pub use models::invoice::{Invoice, ItemStatus, LineItem, Warning, WarningKind};
#[cfg(feature = "render")]
pub use render::{BillView, HtmlRenderer, PdfRenderer, export_file_name};
