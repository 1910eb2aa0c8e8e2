//! Normalized invoice ("bill") model produced by the CSV and form paths.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Unit of measure used when a row leaves it blank.
pub const DEFAULT_UOM: &str = "NOS";

/// A complete bill, the canonical output of ingestion.
///
/// Optional fields are empty strings when absent, so renderers can rely on
/// every field being present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Invoice {
    /// Bill number.
    pub invoice_number: String,

    /// Bill date as entered (ISO or `D/M/YYYY`), reformatted only for display.
    pub invoice_date: String,

    /// Receiver (party) name.
    pub receiver_name: String,

    /// Receiver address, may contain line breaks.
    pub receiver_addr: String,

    /// Free-form bank details, multi-line.
    pub bank_text: String,

    /// Line items in display order.
    pub items: Vec<LineItem>,
}

/// A single billable row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Product/service description.
    pub description: String,

    /// Quantity.
    pub qty: Decimal,

    /// Unit rate.
    pub rate: Decimal,

    /// HSN/SAC tax classification code.
    #[serde(default)]
    pub hsn: String,

    /// Unit of measure.
    #[serde(default = "default_uom")]
    pub uom: String,

    /// Review status derived from quantity and rate.
    #[serde(default)]
    pub status: ItemStatus,
}

fn default_uom() -> String {
    DEFAULT_UOM.to_string()
}

impl LineItem {
    /// Build an item, deriving its status and defaulting a blank unit.
    pub fn new(
        description: impl Into<String>,
        qty: Decimal,
        rate: Decimal,
        hsn: impl Into<String>,
        uom: impl Into<String>,
    ) -> Self {
        let uom = uom.into();
        Self {
            description: description.into(),
            qty,
            rate,
            hsn: hsn.into(),
            uom: if uom.trim().is_empty() {
                default_uom()
            } else {
                uom
            },
            status: ItemStatus::derive(qty, rate),
        }
    }

    /// Line total (`qty * rate`), clamped to the representable range.
    pub fn total(&self) -> Decimal {
        self.qty.saturating_mul(self.rate)
    }
}

/// Review status of a line item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    /// Nothing to flag.
    #[default]
    Ok,
    /// Rate is zero; the line contributes nothing.
    Warn,
    /// Quantity is zero, negative or missing.
    Error,
}

impl ItemStatus {
    /// `Error` when `qty <= 0`, `Warn` when `rate == 0`, otherwise `Ok`.
    pub fn derive(qty: Decimal, rate: Decimal) -> Self {
        if qty <= Decimal::ZERO {
            ItemStatus::Error
        } else if rate.is_zero() {
            ItemStatus::Warn
        } else {
            ItemStatus::Ok
        }
    }

    /// Short label used by text reports.
    pub fn label(&self) -> &'static str {
        match self {
            ItemStatus::Ok => "OK",
            ItemStatus::Warn => "Rate 0",
            ItemStatus::Error => "Error",
        }
    }
}

/// Kind of soft issue found during ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// Quantity is zero or missing.
    MissingQuantity,
    /// Rate is zero.
    ZeroRate,
    /// Item count exceeds the large-bill threshold.
    LargeBill,
}

/// Advisory issue that does not block the bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    /// Row the issue refers to (item description), empty for bill-wide issues.
    pub context: String,
    /// Human-readable description.
    pub issue: String,
    /// Machine-readable kind.
    pub kind: WarningKind,
}

impl Warning {
    pub fn missing_quantity(description: &str) -> Self {
        Self {
            context: description.to_string(),
            issue: "Quantity is 0 or missing".to_string(),
            kind: WarningKind::MissingQuantity,
        }
    }

    pub fn zero_rate(description: &str) -> Self {
        Self {
            context: description.to_string(),
            issue: "Rate is 0 — total will be 0".to_string(),
            kind: WarningKind::ZeroRate,
        }
    }

    pub fn large_bill(count: usize) -> Self {
        Self {
            context: String::new(),
            issue: format!("Large bill: {} items. PDF may span multiple pages.", count),
            kind: WarningKind::LargeBill,
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.context.is_empty() {
            write!(f, "{}", self.issue)
        } else {
            write!(f, "\"{}\": {}", self.context, self.issue)
        }
    }
}

impl Invoice {
    /// Create a new empty invoice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sum of all line totals, flagged lines included.
    ///
    /// Saturates at `Decimal::MAX`/`Decimal::MIN` instead of overflowing.
    pub fn grand_total(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Validate the invoice data and return any issues found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.invoice_number.trim().is_empty() {
            issues.push("Missing bill number".to_string());
        }

        if self.receiver_name.trim().is_empty() {
            issues.push("Missing party name".to_string());
        }

        if self.items.is_empty() {
            issues.push("No line items".to_string());
        }

        let flagged = self
            .items
            .iter()
            .filter(|i| i.status == ItemStatus::Error)
            .count();
        if flagged > 0 {
            issues.push(format!("{} item(s) with zero or missing quantity", flagged));
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_status_derivation() {
        assert_eq!(ItemStatus::derive(dec("0"), dec("500")), ItemStatus::Error);
        assert_eq!(ItemStatus::derive(dec("-1"), dec("0")), ItemStatus::Error);
        assert_eq!(ItemStatus::derive(dec("2"), dec("0")), ItemStatus::Warn);
        assert_eq!(ItemStatus::derive(dec("2"), dec("10.5")), ItemStatus::Ok);
        assert_eq!(ItemStatus::derive(dec("0.5"), dec("-3")), ItemStatus::Ok);
    }

    #[test]
    fn test_grand_total_includes_flagged_lines() {
        let invoice = Invoice {
            items: vec![
                LineItem::new("Widget", dec("3"), dec("150"), "", "PCS"),
                LineItem::new("Service", dec("0"), dec("500"), "", ""),
                LineItem::new("Free", dec("2"), dec("0"), "", ""),
                LineItem::new("Half", dec("0.5"), dec("99.99"), "", ""),
            ],
            ..Invoice::default()
        };

        assert_eq!(invoice.grand_total(), dec("499.995"));
    }

    #[test]
    fn test_totals_saturate_on_huge_values() {
        let huge = dec("100000000000000000000");
        let item = LineItem::new("Widget", huge, huge, "", "");
        assert_eq!(item.total(), Decimal::MAX);

        let invoice = Invoice {
            items: vec![
                item.clone(),
                item,
                LineItem::new("Refund", dec("1"), -huge, "", ""),
            ],
            ..Invoice::default()
        };
        assert_eq!(invoice.grand_total(), Decimal::MAX - huge);

        let negative = Invoice {
            items: vec![
                LineItem::new("Refund", huge, -huge, "", ""),
                LineItem::new("Refund", huge, -huge, "", ""),
            ],
            ..Invoice::default()
        };
        assert_eq!(negative.grand_total(), Decimal::MIN);
    }

    #[test]
    fn test_blank_uom_defaults() {
        let item = LineItem::new("Repair", dec("1"), dec("800"), "", "  ");
        assert_eq!(item.uom, "NOS");
    }

    #[test]
    fn test_validate_reports_missing_fields() {
        let issues = Invoice::new().validate();
        assert_eq!(
            issues,
            vec![
                "Missing bill number".to_string(),
                "Missing party name".to_string(),
                "No line items".to_string(),
            ]
        );
    }

    #[test]
    fn test_json_uses_camel_case() {
        let invoice = Invoice {
            invoice_number: "INV-7".to_string(),
            ..Invoice::default()
        };
        let json = serde_json::to_value(&invoice).unwrap();
        assert_eq!(json["invoiceNumber"], "INV-7");
        assert_eq!(json["receiverAddr"], "");
    }

    #[test]
    fn test_warning_display() {
        assert_eq!(
            Warning::missing_quantity("Service").to_string(),
            "\"Service\": Quantity is 0 or missing"
        );
        assert_eq!(
            Warning::large_bill(60).to_string(),
            "Large bill: 60 items. PDF may span multiple pages."
        );
    }
}
