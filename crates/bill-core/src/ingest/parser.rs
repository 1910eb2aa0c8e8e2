//! Row-level bill parser.

use std::time::Instant;

use tracing::{debug, info, warn};

use crate::error::IngestError;
use crate::format::parse_lenient_decimal;
use crate::models::config::IngestConfig;
use crate::models::invoice::{Invoice, ItemStatus, LineItem, Warning};

use super::reader::read_rows;
use super::rules::classify;
use super::{InvoiceParser, ParseOutcome, Result};

/// Marker row that starts the item block.
const ITEMS_MARKER: &str = "ITEMS";

/// Parser for hand-edited bill spreadsheets.
///
/// The input is a block of `key,value` metadata rows, an `ITEMS` marker row,
/// an optional header row and then one row per item:
/// `description,qty,rate,hsn,uom`.
#[derive(Debug, Clone)]
pub struct CsvInvoiceParser {
    /// Item count above which a multi-page advisory is emitted.
    large_bill_threshold: usize,
    /// Largest accepted input text, in bytes.
    max_input_bytes: u64,
}

impl CsvInvoiceParser {
    /// Create a parser with default limits.
    pub fn new() -> Self {
        let defaults = IngestConfig::default();
        Self {
            large_bill_threshold: defaults.large_bill_threshold,
            max_input_bytes: defaults.max_file_bytes,
        }
    }

    /// Create a parser from ingestion settings.
    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new()
            .with_large_bill_threshold(config.large_bill_threshold)
            .with_max_input_bytes(config.max_file_bytes)
    }

    /// Set the size ceiling applied to [`InvoiceParser::parse`] input.
    pub fn with_max_input_bytes(mut self, limit: u64) -> Self {
        self.max_input_bytes = limit;
        self
    }

    /// Set the large-bill advisory threshold.
    pub fn with_large_bill_threshold(mut self, threshold: usize) -> Self {
        self.large_bill_threshold = threshold;
        self
    }

    /// Parse already-split rows.
    ///
    /// Fails only when no item row survives; malformed numbers read as zero.
    pub fn parse_rows<R, S>(&self, rows: &[R]) -> Result<ParseOutcome>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut invoice = Invoice::new();
        let mut warnings = Vec::new();
        let mut in_items = false;
        let mut header_checked = false;

        for raw in rows {
            let row: Vec<&str> = raw.as_ref().iter().map(|c| c.as_ref().trim()).collect();
            let first = row.first().copied().unwrap_or("");
            if first.is_empty() {
                continue;
            }

            if first.eq_ignore_ascii_case(ITEMS_MARKER) {
                in_items = true;
                continue;
            }

            if !in_items {
                apply_metadata(&mut invoice, first, cell(&row, 1));
                continue;
            }

            if !header_checked {
                header_checked = true;
                if is_header(first) {
                    debug!("Skipping item header row");
                    continue;
                }
            }

            let item = LineItem::new(
                first,
                parse_lenient_decimal(cell(&row, 1)),
                parse_lenient_decimal(cell(&row, 2)),
                cell(&row, 3),
                cell(&row, 4),
            );

            match item.status {
                ItemStatus::Error => warnings.push(Warning::missing_quantity(&item.description)),
                ItemStatus::Warn => warnings.push(Warning::zero_rate(&item.description)),
                ItemStatus::Ok => {}
            }
            invoice.items.push(item);
        }

        if invoice.items.is_empty() {
            return Err(IngestError::NoItemsFound);
        }

        let count = invoice.items.len();
        if count > self.large_bill_threshold {
            warn!("Large bill with {} items", count);
            warnings.push(Warning::large_bill(count));
        }

        Ok(ParseOutcome { invoice, warnings })
    }
}

impl Default for CsvInvoiceParser {
    fn default() -> Self {
        Self::new()
    }
}

impl InvoiceParser for CsvInvoiceParser {
    fn parse(&self, text: &str) -> Result<ParseOutcome> {
        let start = Instant::now();
        info!("Parsing bill from {} bytes of CSV", text.len());

        let size = text.len() as u64;
        if size > self.max_input_bytes {
            return Err(IngestError::TooLarge {
                size,
                limit: self.max_input_bytes,
            });
        }

        let rows = read_rows(text)?;
        let outcome = self.parse_rows(&rows)?;

        debug!(
            "Parsed {} items with {} warnings in {}ms",
            outcome.invoice.items.len(),
            outcome.warnings.len(),
            start.elapsed().as_millis()
        );

        Ok(outcome)
    }
}

fn cell<'a>(row: &[&'a str], index: usize) -> &'a str {
    row.get(index).copied().unwrap_or("")
}

fn is_header(first: &str) -> bool {
    let lower = first.to_lowercase();
    lower.contains("desc") || lower.contains("name")
}

fn apply_metadata(invoice: &mut Invoice, key: &str, value: &str) {
    let Some(field) = classify(key) else {
        debug!("Ignoring metadata key {:?}", key);
        return;
    };

    let slot = field.slot(invoice);
    if slot.is_empty() {
        *slot = value.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::invoice::WarningKind;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn rows(data: &[&[&str]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn parse(data: &[&[&str]]) -> Result<ParseOutcome> {
        CsvInvoiceParser::new().parse_rows(&rows(data))
    }

    #[test]
    fn test_basic_bill() {
        let outcome = parse(&[
            &["Number", "INV-7"],
            &["Date", "01/04/2024"],
            &["Name", "Acme Co"],
            &["ITEMS"],
            &["Widget", "3", "150", "", "PCS"],
        ])
        .unwrap();

        let invoice = &outcome.invoice;
        assert_eq!(invoice.invoice_number, "INV-7");
        assert_eq!(invoice.invoice_date, "01/04/2024");
        assert_eq!(invoice.receiver_name, "Acme Co");
        assert_eq!(invoice.receiver_addr, "");
        assert_eq!(invoice.bank_text, "");
        assert_eq!(
            invoice.items,
            vec![LineItem {
                description: "Widget".to_string(),
                qty: Decimal::from(3),
                rate: Decimal::from(150),
                hsn: String::new(),
                uom: "PCS".to_string(),
                status: ItemStatus::Ok,
            }]
        );
        assert_eq!(invoice.grand_total(), Decimal::from(450));
        assert_eq!(crate::format::to_currency_string(invoice.grand_total()), "450.00");
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_zero_quantity_is_error() {
        let outcome = parse(&[&["ITEMS"], &["Service", "0", "500"]]).unwrap();
        let item = &outcome.invoice.items[0];
        assert_eq!(item.status, ItemStatus::Error);
        assert_eq!(item.uom, "NOS");
        assert_eq!(outcome.warnings, vec![Warning::missing_quantity("Service")]);
        assert_eq!(outcome.warnings[0].issue, "Quantity is 0 or missing");
        assert_eq!(outcome.invoice.grand_total(), Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_is_warn() {
        let outcome = parse(&[&["ITEMS"], &["Service", "2", "0"]]).unwrap();
        assert_eq!(outcome.invoice.items[0].status, ItemStatus::Warn);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].kind, WarningKind::ZeroRate);
        assert!(outcome.warnings[0].issue.contains("Rate is 0"));
        assert_eq!(outcome.invoice.grand_total(), Decimal::ZERO);
    }

    #[test]
    fn test_flagged_rows_count_toward_total() {
        let outcome = parse(&[
            &["ITEMS"],
            &["A", "2", "10.10"],
            &["B", "-1", "5"],
            &["C", "4", "0"],
            &["D", "1.5", "0.333"],
        ])
        .unwrap();
        // 20.20 - 5 + 0 + 0.4995
        assert_eq!(
            outcome.invoice.grand_total(),
            "15.6995".parse::<Decimal>().unwrap()
        );
        let statuses: Vec<_> = outcome.invoice.items.iter().map(|i| i.status).collect();
        assert_eq!(
            statuses,
            vec![ItemStatus::Ok, ItemStatus::Error, ItemStatus::Warn, ItemStatus::Ok]
        );
    }

    #[test]
    fn test_no_items_marker() {
        let err = parse(&[&["Number", "1"], &["Widget", "1", "1"]]).unwrap_err();
        assert!(matches!(err, IngestError::NoItemsFound));
    }

    #[test]
    fn test_items_marker_with_only_skippable_rows() {
        let err = parse(&[
            &["ITEMS"],
            &["Description", "Qty", "Rate"],
            &["", "3", "150"],
            &[],
        ])
        .unwrap_err();
        assert!(matches!(err, IngestError::NoItemsFound));
    }

    #[test]
    fn test_header_detection_idempotent() {
        let with_header = parse(&[
            &["ITEMS"],
            &["Description", "Quantity", "Rate", "HSN", "UOM"],
            &["Widget", "3", "150"],
            &["Gadget", "1", "99.5", "8471", "HRS"],
        ])
        .unwrap();
        let without_header = parse(&[
            &["ITEMS"],
            &["Widget", "3", "150"],
            &["Gadget", "1", "99.5", "8471", "HRS"],
        ])
        .unwrap();
        assert_eq!(with_header, without_header);
    }

    #[test]
    fn test_only_first_item_row_can_be_header() {
        let outcome = parse(&[
            &["ITEMS"],
            &["Widget", "1", "1"],
            &["Item Name", "2", "2"],
        ])
        .unwrap();
        assert_eq!(outcome.invoice.items.len(), 2);
        assert_eq!(outcome.invoice.items[1].description, "Item Name");
    }

    #[test]
    fn test_metadata_case_insensitive_first_wins() {
        for key in ["Invoice Number", "NUMBER", "Bill No Number"] {
            let outcome = parse(&[
                &[key, "A-1"],
                &["number", "B-2"],
                &["ITEMS"],
                &["Widget", "1", "1"],
            ])
            .unwrap();
            assert_eq!(outcome.invoice.invoice_number, "A-1", "{key}");
        }
    }

    #[test]
    fn test_metadata_blank_value_does_not_claim_field() {
        let outcome = parse(&[
            &["Party Name"],
            &["Receiver Name", "Acme Co"],
            &["Billed To", "Other Co"],
            &["Address", "12 Main St\nDelhi"],
            &["Bank", "Bank Detail: X"],
            &["GSTIN", "07AAAAA0000A1Z5"],
            &["ITEMS"],
            &["Widget", "1", "1"],
        ])
        .unwrap();
        let invoice = &outcome.invoice;
        assert_eq!(invoice.receiver_name, "Acme Co");
        assert_eq!(invoice.receiver_addr, "12 Main St\nDelhi");
        assert_eq!(invoice.bank_text, "Bank Detail: X");
    }

    #[test]
    fn test_cells_are_trimmed_and_lenient() {
        let outcome = parse(&[
            &["  items  "],
            &[" Widget ", " 2kg ", "abc", " 8471 ", "  "],
        ])
        .unwrap();
        let item = &outcome.invoice.items[0];
        assert_eq!(item.description, "Widget");
        assert_eq!(item.qty, Decimal::from(2));
        assert_eq!(item.rate, Decimal::ZERO);
        assert_eq!(item.hsn, "8471");
        assert_eq!(item.uom, "NOS");
        assert_eq!(item.status, ItemStatus::Warn);
    }

    #[test]
    fn test_large_bill_advisory() {
        let mut data: Vec<Vec<String>> = vec![vec!["ITEMS".to_string()]];
        for i in 0..60 {
            data.push(vec![format!("Item {}", i), "1".to_string(), "10".to_string()]);
        }

        let outcome = CsvInvoiceParser::new().parse_rows(&data).unwrap();
        assert_eq!(outcome.invoice.items.len(), 60);
        assert_eq!(outcome.warnings, vec![Warning::large_bill(60)]);
        assert_eq!(
            outcome.warnings[0].issue,
            "Large bill: 60 items. PDF may span multiple pages."
        );

        let outcome = CsvInvoiceParser::new()
            .with_large_bill_threshold(100)
            .parse_rows(&data)
            .unwrap();
        assert!(outcome.warnings.is_empty());
    }

    fn bill_with_items(count: usize) -> Vec<Vec<String>> {
        let mut data = vec![vec!["ITEMS".to_string()]];
        for i in 0..count {
            data.push(vec![format!("Item {}", i), "1".to_string(), "10".to_string()]);
        }
        data
    }

    #[test]
    fn test_large_bill_threshold_is_exclusive() {
        let parser = CsvInvoiceParser::new();

        let at_limit = parser.parse_rows(&bill_with_items(50)).unwrap();
        assert_eq!(at_limit.invoice.items.len(), 50);
        assert!(at_limit.warnings.is_empty());

        let over_limit = parser.parse_rows(&bill_with_items(51)).unwrap();
        assert_eq!(over_limit.warnings, vec![Warning::large_bill(51)]);
    }

    #[test]
    fn test_huge_numeric_cells_parse() {
        let outcome = CsvInvoiceParser::new()
            .parse("ITEMS\nWidget,100000000000000000000,100000000000000000000\n")
            .unwrap();
        let item = &outcome.invoice.items[0];
        let huge: Decimal = "100000000000000000000".parse().unwrap();
        assert_eq!(item.qty, huge);
        assert_eq!(item.rate, huge);
        assert_eq!(item.status, ItemStatus::Ok);
        assert_eq!(outcome.invoice.grand_total(), Decimal::MAX);
    }

    #[test]
    fn test_text_input_size_limit() {
        let text = "Number,INV-7\nITEMS\nWidget,3,150\n";
        let config = IngestConfig {
            max_file_bytes: 16,
            ..IngestConfig::default()
        };

        let err = CsvInvoiceParser::from_config(&config).parse(text).unwrap_err();
        assert!(matches!(
            err,
            IngestError::TooLarge { size, limit: 16 } if size == text.len() as u64
        ));

        let limit = text.len() as u64;
        let outcome = CsvInvoiceParser::new()
            .with_max_input_bytes(limit)
            .parse(text)
            .unwrap();
        assert_eq!(outcome.invoice.items.len(), 1);
    }

    #[test]
    fn test_order_preserved_and_independent_runs() {
        let parser = CsvInvoiceParser::new();
        let first = parser
            .parse("Number,1\nITEMS\nB,1,1\nA,1,1\nC,1,1\n")
            .unwrap();
        let second = parser.parse("Number,2\nITEMS\nZ,1,1\n").unwrap();

        let names: Vec<_> = first
            .invoice
            .items
            .iter()
            .map(|i| i.description.as_str())
            .collect();
        assert_eq!(names, vec!["B", "A", "C"]);
        assert_eq!(first.invoice.invoice_number, "1");
        assert_eq!(second.invoice.invoice_number, "2");
        assert_eq!(second.invoice.items.len(), 1);
    }

    #[test]
    fn test_summary_and_validation_message() {
        let outcome = parse(&[
            &["ITEMS"],
            &["Widget", "1", "10"],
            &["Service", "0", "500"],
            &["Support", "2", "0"],
        ])
        .unwrap();
        assert_eq!(outcome.error_count(), 1);
        assert_eq!(outcome.warn_count(), 1);
        assert_eq!(outcome.summary_badge(), "⚠ 3 rows, 1 error(s)");
        assert_eq!(
            outcome.validation_message(),
            "⚠ 2 warning(s): \"Service\": Quantity is 0 or missing • \"Support\": Rate is 0 — total will be 0"
        );

        let clean = parse(&[&["ITEMS"], &["Widget", "1", "10"]]).unwrap();
        assert_eq!(clean.summary_badge(), "✓ 1 row(s) parsed");
        assert_eq!(
            clean.validation_message(),
            "✓ All 1 items parsed successfully."
        );

        let warn_only = parse(&[&["ITEMS"], &["Support", "2", "0"]]).unwrap();
        assert_eq!(warn_only.summary_badge(), "1 rows, 1 warning(s)");
    }
}
