//! Configuration structures for the bill generator.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{BillError, Result};

/// Main configuration for the bill generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BillConfig {
    /// Issuing company identity printed on every bill.
    pub company: CompanyConfig,

    /// CSV ingestion limits.
    pub ingest: IngestConfig,

    /// PDF layout configuration.
    pub pdf: PdfConfig,

    /// HTML preview configuration.
    pub html: HtmlConfig,

    /// Bank accounts selectable from the form path.
    pub banks: Vec<BankAccount>,

    /// Product/service presets selectable from the form path.
    pub products: Vec<ProductPreset>,
}

impl Default for BillConfig {
    fn default() -> Self {
        Self {
            company: CompanyConfig::default(),
            ingest: IngestConfig::default(),
            pdf: PdfConfig::default(),
            html: HtmlConfig::default(),
            banks: Vec::new(),
            products: ProductPreset::catalog(),
        }
    }
}

/// Issuing company identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyConfig {
    /// Company name shown in the header and signature block.
    pub name: String,

    /// Address lines below the company name.
    pub address_lines: Vec<String>,

    /// Document title.
    pub title: String,
}

impl Default for CompanyConfig {
    fn default() -> Self {
        Self {
            name: "Devi Technical Services".to_string(),
            address_lines: vec![
                "A-166, Raju Park, Near Devali Village,".to_string(),
                "Khanpur, South Delhi, New Delhi - 110062".to_string(),
            ],
            title: "Bill".to_string(),
        }
    }
}

/// CSV ingestion limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Largest accepted input file in bytes.
    pub max_file_bytes: u64,

    /// Item count above which a multi-page advisory is emitted.
    pub large_bill_threshold: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: 2 * 1024 * 1024,
            large_bill_threshold: 50,
        }
    }
}

/// PDF layout configuration. Lengths are in millimetres.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Page margin on every side.
    pub margin_mm: f32,

    /// Vertical padding above and below text in item table cells.
    pub cell_padding_mm: f32,

    /// Empty rows appended below the items.
    pub min_padding_rows: usize,

    /// Accent colour (company name and bank details) as RGB 0-255.
    pub accent_rgb: [u8; 3],

    /// Base font family: "times", "helvetica" or "courier".
    pub font: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            margin_mm: 12.0,
            cell_padding_mm: 2.5,
            min_padding_rows: 2,
            accent_rgb: [198, 40, 40],
            font: "times".to_string(),
        }
    }
}

/// HTML preview configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Minimum number of visible item rows; shorter bills are padded.
    pub min_rows: usize,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self { min_rows: 3 }
    }
}

/// Bank account printed on the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BankAccount {
    /// Account holder.
    pub name: String,
    /// Account number.
    pub account_number: String,
    /// Bank name.
    pub bank: String,
    /// IFSC code.
    pub ifsc: String,
}

impl BankAccount {
    /// Multi-line bank text as printed on the bill.
    pub fn to_bank_text(&self) -> String {
        format!(
            "Bank Detail: {}\nA/C NO- {} {} IFSC CODE -\n{}",
            self.name, self.account_number, self.bank, self.ifsc
        )
    }
}

/// Product or service preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPreset {
    /// Description printed on the bill.
    pub name: String,
    /// HSN/SAC code.
    #[serde(default)]
    pub hsn: String,
    /// Unit of measure.
    pub uom: String,
    /// Default rate.
    pub rate: Decimal,
}

impl ProductPreset {
    fn new(name: &str, uom: &str, rate: i64) -> Self {
        Self {
            name: name.to_string(),
            hsn: String::new(),
            uom: uom.to_string(),
            rate: Decimal::from(rate),
        }
    }

    /// Built-in service catalog.
    pub fn catalog() -> Vec<Self> {
        vec![
            Self::new("Canon IR-3225 Photocopier & Network Printer Rent", "NOS", 3600),
            Self::new("Printer Cartridge Replacement", "NOS", 2500),
            Self::new("Annual Maintenance Contract (AMC)", "NOS", 12000),
            Self::new("Network Setup & Configuration", "NOS", 5000),
            Self::new("CCTV Camera Installation", "NOS", 4500),
            Self::new("Computer Hardware Repair", "HRS", 800),
        ]
    }
}

impl BillConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| BillError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| BillError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
