//! Form entry path: a structured bill record validated into an [`Invoice`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FieldError, FormError};
use crate::format::text::PLACEHOLDER;
use crate::models::config::BillConfig;
use crate::models::invoice::{Invoice, LineItem};

/// A bill as entered through a form or a JSON document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InvoiceForm {
    pub invoice_number: String,
    pub invoice_date: String,
    pub receiver_name: String,
    pub receiver_addr: String,
    pub items: Vec<FormItem>,
    pub bank: BankChoice,
}

/// One item row of the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormItem {
    /// Index into the configured product catalog. Fills blank fields.
    pub preset: Option<usize>,
    pub description: String,
    pub hsn: String,
    pub uom: String,
    pub qty: Decimal,
    /// Unit rate; the preset rate applies when absent.
    pub rate: Option<Decimal>,
}

impl Default for FormItem {
    fn default() -> Self {
        Self {
            preset: None,
            description: String::new(),
            hsn: String::new(),
            uom: String::new(),
            qty: Decimal::ONE,
            rate: None,
        }
    }
}

/// Where the bank text comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BankChoice {
    /// Index into the configured bank accounts.
    Preset(usize),
    /// Free text; blank renders as a placeholder.
    Custom(String),
}

impl Default for BankChoice {
    fn default() -> Self {
        BankChoice::Custom(String::new())
    }
}

impl InvoiceForm {
    /// Decode a form from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the form and build the bill.
    ///
    /// Item rows without a description or with a non-positive quantity are
    /// dropped. All field problems are reported together.
    pub fn into_invoice(self, config: &BillConfig) -> Result<Invoice, FormError> {
        let mut errors = Vec::new();

        let invoice_number = self.invoice_number.trim().to_string();
        if invoice_number.is_empty() {
            errors.push(field_error("invoiceNumber", "Bill Number is required."));
        }

        let receiver_name = self.receiver_name.trim().to_string();
        if receiver_name.is_empty() {
            errors.push(field_error("receiverName", "Party Name is required."));
        }

        let mut items = Vec::new();
        for (index, item) in self.items.into_iter().enumerate() {
            match resolve_item(item, config) {
                Ok(Some(line)) => items.push(line),
                Ok(None) => debug!("Dropping incomplete item row {}", index + 1),
                Err(message) => errors.push(field_error("items", message)),
            }
        }
        if items.is_empty() {
            errors.push(field_error(
                "items",
                "Please add at least one item with a name and quantity.",
            ));
        }

        let bank_text = match self.bank {
            BankChoice::Preset(index) => match config.banks.get(index) {
                Some(account) => account.to_bank_text(),
                None => {
                    errors.push(field_error("bank", format!("Unknown bank account {}", index)));
                    String::new()
                }
            },
            BankChoice::Custom(text) => {
                let text = text.trim();
                if text.is_empty() {
                    PLACEHOLDER.to_string()
                } else {
                    text.to_string()
                }
            }
        };

        if !errors.is_empty() {
            return Err(FormError::Invalid(errors));
        }

        Ok(Invoice {
            invoice_number,
            invoice_date: self.invoice_date.trim().to_string(),
            receiver_name,
            receiver_addr: self.receiver_addr.trim().to_string(),
            bank_text,
            items,
        })
    }
}

fn field_error(field: &'static str, message: impl Into<String>) -> FieldError {
    FieldError {
        field,
        message: message.into(),
    }
}

fn resolve_item(item: FormItem, config: &BillConfig) -> Result<Option<LineItem>, String> {
    let preset = match item.preset {
        Some(index) => Some(
            config
                .products
                .get(index)
                .ok_or_else(|| format!("Unknown product preset {}", index))?,
        ),
        None => None,
    };

    let pick = |own: &str, fallback: Option<&str>| -> String {
        let own = own.trim();
        if own.is_empty() {
            fallback.unwrap_or("").trim().to_string()
        } else {
            own.to_string()
        }
    };

    let description = pick(&item.description, preset.map(|p| p.name.as_str()));
    let hsn = pick(&item.hsn, preset.map(|p| p.hsn.as_str()));
    let uom = pick(&item.uom, preset.map(|p| p.uom.as_str()));
    let rate = item
        .rate
        .or(preset.map(|p| p.rate))
        .unwrap_or(Decimal::ZERO);

    if description.is_empty() || item.qty <= Decimal::ZERO {
        return Ok(None);
    }

    Ok(Some(LineItem::new(description, item.qty, rate, hsn, uom)))
}
