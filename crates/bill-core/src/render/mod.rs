//! Presentation and export of a finished bill.
//!
//! Both renderers consume a [`BillView`], a set of display strings computed
//! once from an [`Invoice`]. Neither renderer touches the invoice itself.

mod html;
mod pdf;

pub use html::HtmlRenderer;
pub use pdf::PdfRenderer;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::RenderError;
use crate::format::{amount_in_words, placeholder, to_currency_string, to_display_date};
use crate::models::config::CompanyConfig;
use crate::models::invoice::Invoice;

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

/// Display-ready bill contents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillView {
    pub company_name: String,
    pub company_address: Vec<String>,
    pub title: String,
    pub invoice_number: String,
    /// Bill date as `DD/MM/YYYY` when recognised.
    pub invoice_date: String,
    pub receiver_name: String,
    /// Receiver address split into lines, never empty.
    pub receiver_addr: Vec<String>,
    pub rows: Vec<BillRow>,
    pub grand_total: String,
    /// Grand total in words, ending in `Only`.
    pub amount_in_words: String,
    pub bank_lines: Vec<String>,
}

/// One numbered item row of the bill table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillRow {
    /// Row number with a trailing dot, e.g. `"1."`.
    pub number: String,
    pub description: String,
    pub hsn: String,
    pub uom: String,
    pub qty: String,
    pub rate: String,
    pub total: String,
}

impl BillView {
    /// Compute the display strings for a bill.
    pub fn build(invoice: &Invoice, company: &CompanyConfig) -> Self {
        let rows = invoice
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| BillRow {
                number: format!("{}.", i + 1),
                description: item.description.clone(),
                hsn: item.hsn.clone(),
                uom: item.uom.clone(),
                qty: item.qty.normalize().to_string(),
                rate: to_currency_string(item.rate),
                total: to_currency_string(item.total()),
            })
            .collect();

        let mut receiver_addr = non_blank_lines(&invoice.receiver_addr);
        if receiver_addr.is_empty() {
            receiver_addr.push(placeholder("").to_string());
        }

        let total = invoice.grand_total();

        Self {
            company_name: company.name.clone(),
            company_address: company.address_lines.clone(),
            title: company.title.clone(),
            invoice_number: placeholder(invoice.invoice_number.trim()).to_string(),
            invoice_date: placeholder(&to_display_date(&invoice.invoice_date)).to_string(),
            receiver_name: placeholder(invoice.receiver_name.trim()).to_string(),
            receiver_addr,
            rows,
            grand_total: to_currency_string(total),
            amount_in_words: format!("{} Only", amount_in_words(total)),
            bank_lines: non_blank_lines(&invoice.bank_text),
        }
    }
}

fn non_blank_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// File name for an exported bill, e.g. `INV-7_AcmeCo_Bill_01042024.pdf`.
///
/// Uses the first two words of the receiver name (alphanumerics only) and
/// the first eight digits of the bill date, falling back to `today`.
pub fn export_file_name(invoice: &Invoice, today: NaiveDate) -> String {
    let number = invoice.invoice_number.trim().replace(['/', '\\'], "-");
    let prefix = if number.is_empty() {
        String::new()
    } else {
        format!("{}_", number)
    };

    let name: String = invoice
        .receiver_name
        .split_whitespace()
        .take(2)
        .flat_map(str::chars)
        .filter(char::is_ascii_alphanumeric)
        .collect();
    let name = if name.is_empty() { "Client".to_string() } else { name };

    let digits: String = invoice
        .invoice_date
        .chars()
        .filter(char::is_ascii_digit)
        .take(8)
        .collect();
    let date = if digits.is_empty() {
        today.format("%Y%m%d").to_string()
    } else {
        digits
    };

    format!("{}{}_Bill_{}.pdf", prefix, name, date)
}
