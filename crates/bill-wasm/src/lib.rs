//! WASM bindings for the bill generator.
//!
//! This crate exposes CSV ingestion, the formatters and the HTML/PDF export
//! to browsers and Node.js.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use bill_core::format::{amount_in_words as words, to_currency_string, to_display_date};
use bill_core::{
    BillConfig, BillView, CsvInvoiceParser, HtmlRenderer, Invoice, InvoiceForm, InvoiceParser,
    PdfRenderer,
};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Parse bill CSV text into `{ invoice, warnings }`.
#[wasm_bindgen(js_name = parseCsv)]
pub fn parse_csv(text: &str) -> Result<JsValue, JsValue> {
    BillGenerator::new().parse_csv(text)
}

/// Spell an amount in Indian English, e.g. `"One Thousand Rupees"`.
#[wasm_bindgen(js_name = amountInWords)]
pub fn amount_in_words(amount: f64) -> String {
    words(to_decimal(amount))
}

/// Format an amount with Indian digit grouping and two decimals.
#[wasm_bindgen(js_name = formatCurrency)]
pub fn format_currency(amount: f64) -> String {
    to_currency_string(to_decimal(amount))
}

/// Reformat an ISO date as `DD/MM/YYYY`; other input is returned unchanged.
#[wasm_bindgen(js_name = formatDisplayDate)]
pub fn format_display_date(date: &str) -> String {
    to_display_date(date)
}

/// Render the HTML preview of an invoice object.
#[wasm_bindgen(js_name = renderPreviewHtml)]
pub fn render_preview_html(invoice: JsValue) -> Result<String, JsValue> {
    BillGenerator::new().render_preview_html(invoice)
}

/// Export an invoice object as PDF bytes.
#[wasm_bindgen(js_name = exportPdf)]
pub fn export_pdf(invoice: JsValue) -> Result<Vec<u8>, JsValue> {
    BillGenerator::new().export_pdf(invoice)
}

/// Download name for an invoice, dated today when the bill has no date.
#[wasm_bindgen(js_name = exportFileName)]
pub fn export_file_name(invoice: JsValue) -> Result<String, JsValue> {
    let invoice = invoice_from_js(invoice)?;
    Ok(bill_core::export_file_name(&invoice, today()))
}

/// Bill generator bound to a configuration, for repeated use from the page.
#[wasm_bindgen]
pub struct BillGenerator {
    config: BillConfig,
}

#[wasm_bindgen]
impl BillGenerator {
    /// Create a generator with the built-in configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: BillConfig::default(),
        }
    }

    /// Create a generator from a JSON configuration document.
    #[wasm_bindgen(js_name = fromConfigJson)]
    pub fn from_config_json(json: &str) -> Result<BillGenerator, JsValue> {
        let config: BillConfig = serde_json::from_str(json).map_err(to_js_error)?;
        Ok(Self { config })
    }

    /// Parse bill CSV text into `{ invoice, warnings }`.
    #[wasm_bindgen(js_name = parseCsv)]
    pub fn parse_csv(&self, text: &str) -> Result<JsValue, JsValue> {
        let outcome = CsvInvoiceParser::from_config(&self.config.ingest)
            .parse(text)
            .map_err(to_js_error)?;

        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct ParseResult {
            invoice: Invoice,
            warnings: Vec<String>,
            summary: String,
            message: String,
        }

        let output = ParseResult {
            summary: outcome.summary_badge(),
            message: outcome.validation_message(),
            warnings: outcome.warnings.iter().map(|w| w.to_string()).collect(),
            invoice: outcome.invoice,
        };

        to_js(&output)
    }

    /// Build an invoice from form state.
    ///
    /// Throws an object mapping field names to messages when validation fails.
    #[wasm_bindgen(js_name = buildInvoice)]
    pub fn build_invoice(&self, form: JsValue) -> Result<JsValue, JsValue> {
        let form: InvoiceForm = serde_wasm_bindgen::from_value(form)?;
        match form.into_invoice(&self.config) {
            Ok(invoice) => to_js(&invoice),
            Err(e) if !e.field_errors().is_empty() => {
                let mut fields = serde_json::Map::new();
                for error in e.field_errors() {
                    fields
                        .entry(error.field)
                        .or_insert_with(|| serde_json::Value::String(error.message.clone()));
                }
                Err(to_js(&fields)?)
            }
            Err(e) => Err(to_js_error(e)),
        }
    }

    /// Render the HTML preview of an invoice object.
    #[wasm_bindgen(js_name = renderPreviewHtml)]
    pub fn render_preview_html(&self, invoice: JsValue) -> Result<String, JsValue> {
        let invoice = invoice_from_js(invoice)?;
        let view = BillView::build(&invoice, &self.config.company);
        HtmlRenderer::from_config(&self.config)
            .and_then(|renderer| renderer.render(&view))
            .map_err(to_js_error)
    }

    /// Export an invoice object as PDF bytes.
    #[wasm_bindgen(js_name = exportPdf)]
    pub fn export_pdf(&self, invoice: JsValue) -> Result<Vec<u8>, JsValue> {
        let invoice = invoice_from_js(invoice)?;
        let view = BillView::build(&invoice, &self.config.company);
        PdfRenderer::with_config(self.config.pdf.clone())
            .render(&view)
            .map_err(to_js_error)
    }
}

impl Default for BillGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn invoice_from_js(value: JsValue) -> Result<Invoice, JsValue> {
    Ok(serde_wasm_bindgen::from_value(value)?)
}

/// Plain objects instead of `Map`s, so results read naturally from JS.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value.serialize(&serializer).map_err(JsValue::from)
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_decimal(amount: f64) -> Decimal {
    Decimal::from_f64(amount).unwrap_or_default()
}

fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const SAMPLE: &str = "Bill Number,INV-7\nName,Acme Co\nITEMS\nWidget,3,150\n";

    #[wasm_bindgen_test]
    fn test_amount_in_words() {
        assert_eq!(amount_in_words(1000.0), "One Thousand Rupees");
        assert_eq!(amount_in_words(0.5), "Fifty Paise");
    }

    #[wasm_bindgen_test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234567.5), "12,34,567.50");
    }

    #[wasm_bindgen_test]
    fn test_format_display_date() {
        assert_eq!(format_display_date("2024-04-01"), "01/04/2024");
        assert_eq!(format_display_date("soon"), "soon");
    }

    #[wasm_bindgen_test]
    fn test_parse_csv_and_export() {
        let generator = BillGenerator::new();
        let parsed = generator.parse_csv(SAMPLE).unwrap();
        let invoice = js_sys::Reflect::get(&parsed, &JsValue::from_str("invoice")).unwrap();

        let html = generator.render_preview_html(invoice.clone()).unwrap();
        assert!(html.contains("Acme Co"));

        let pdf = generator.export_pdf(invoice.clone()).unwrap();
        assert!(pdf.starts_with(b"%PDF"));

        let name = export_file_name(invoice).unwrap();
        assert!(name.starts_with("INV-7_AcmeCo_Bill_"));
    }

    #[wasm_bindgen_test]
    fn test_parse_csv_without_items() {
        assert!(parse_csv("Bill Number,INV-7\n").is_err());
    }

    #[wasm_bindgen_test]
    fn test_parse_csv_enforces_size_limit() {
        let generator =
            BillGenerator::from_config_json(r#"{ "ingest": { "max_file_bytes": 16 } }"#).unwrap();
        let err = generator.parse_csv(SAMPLE).unwrap_err();
        assert!(err.as_string().unwrap_or_default().contains("too large"));
    }

    #[wasm_bindgen_test]
    fn test_build_invoice_field_errors() {
        let form = js_sys::JSON::parse(r#"{ "items": [] }"#).unwrap();
        let err = BillGenerator::new().build_invoice(form).unwrap_err();
        let message = js_sys::Reflect::get(&err, &JsValue::from_str("invoiceNumber")).unwrap();
        assert_eq!(message.as_string().as_deref(), Some("Bill Number is required."));
    }
}
