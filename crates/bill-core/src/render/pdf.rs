//! Fixed-layout A4 PDF export using lopdf.
//!
//! Layout is expressed in millimetres from the top-left corner and converted
//! to PDF points when operations are emitted. Text is drawn with the
//! standard Type1 fonts, so it is restricted to Latin-1 first.

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, StringFormat, dictionary};
use tracing::{debug, warn};

use crate::error::RenderError;
use crate::format::pdf_safe;
use crate::models::config::PdfConfig;

use super::{BillView, Result};

const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MM_TO_PT: f32 = 72.0 / 25.4;
const PT_TO_MM: f32 = 25.4 / 72.0;

const TABLE_HEADERS: [&str; 7] = [
    "NO",
    "NAME OF PRODUCT / SERVICE",
    "HSN/SAC",
    "UOM",
    "QTY",
    "RATE",
    "TOTAL",
];
/// Column widths for a 186 mm wide table, scaled to the actual width.
const COLUMN_WIDTHS: [f32; 7] = [22.0, 62.0, 20.0, 16.0, 14.0, 26.0, 26.0];
const COLUMN_ALIGN: [Align; 7] = [
    Align::Left,
    Align::Left,
    Align::Center,
    Align::Center,
    Align::Center,
    Align::Right,
    Align::Right,
];

const TABLE_FONT_SIZE: f32 = 10.0;
const LINE_SPACING: f32 = 1.15;
const CELL_PAD_X: f32 = 2.0;
const HEADER_GRAY: f32 = 230.0 / 255.0;
const SIGNATURE_HEIGHT: f32 = 32.0;
const META_SIZE: f32 = 10.5;

/// Renders a bill as an A4 portrait PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    config: PdfConfig,
}

impl PdfRenderer {
    /// Create a renderer with the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given layout settings.
    pub fn with_config(config: PdfConfig) -> Self {
        Self { config }
    }

    /// Render the bill to PDF bytes.
    pub fn render(&self, view: &BillView) -> Result<Vec<u8>> {
        let family = FontFamily::from_name(&self.config.font);
        let mut page = PageLayout::new(&self.config, Canvas::new(family));

        page.header(view);
        page.meta(view);
        page.table(view, self.config.min_padding_rows);
        page.totals(view);
        page.bank(view);
        page.signature(view);

        let pages = page.finish();
        debug!("Laid out bill {} on {} page(s)", view.invoice_number, pages.len());

        assemble(pages, family, &view.title, &view.invoice_number)
    }

    /// Render the bill and write it to `path`.
    pub fn render_to_file(&self, view: &BillView, path: &Path) -> Result<()> {
        let bytes = self.render(view)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy)]
struct TextStyle {
    size: f32,
    bold: bool,
    align: Align,
    color: [u8; 3],
}

impl TextStyle {
    fn regular(size: f32) -> Self {
        Self {
            size,
            bold: false,
            align: Align::Left,
            color: [0, 0, 0],
        }
    }

    fn bold(size: f32) -> Self {
        Self {
            bold: true,
            ..Self::regular(size)
        }
    }

    fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    fn color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }
}

/// Standard Type1 font families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FontFamily {
    Times,
    Helvetica,
    Courier,
}

impl FontFamily {
    fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "times" | "times-roman" | "serif" => FontFamily::Times,
            "helvetica" | "arial" | "sans-serif" => FontFamily::Helvetica,
            "courier" | "monospace" => FontFamily::Courier,
            other => {
                warn!("Unknown PDF font {:?}, using Times", other);
                FontFamily::Times
            }
        }
    }

    fn base_fonts(self) -> (&'static str, &'static str) {
        match self {
            FontFamily::Times => ("Times-Roman", "Times-Bold"),
            FontFamily::Helvetica => ("Helvetica", "Helvetica-Bold"),
            FontFamily::Courier => ("Courier", "Courier-Bold"),
        }
    }

    /// Approximate advance width of a character in em.
    fn char_em(self, c: char) -> f32 {
        if self == FontFamily::Courier {
            return 0.6;
        }
        let times = self == FontFamily::Times;
        match c {
            ' ' => {
                if times {
                    0.25
                } else {
                    0.28
                }
            }
            'i' | 'l' | '.' | ',' | ':' | ';' | '\'' | '!' | '|' => {
                if times {
                    0.28
                } else {
                    0.24
                }
            }
            'f' | 'j' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' | '/' => 0.33,
            'm' => 0.8,
            'w' => 0.72,
            'M' | 'W' => 0.92,
            '0'..='9' => {
                if times {
                    0.5
                } else {
                    0.556
                }
            }
            c if c.is_lowercase() => {
                if times {
                    0.47
                } else {
                    0.52
                }
            }
            c if c.is_uppercase() => {
                if times {
                    0.68
                } else {
                    0.7
                }
            }
            _ => 0.55,
        }
    }

    /// Width of already Latin-1 text in millimetres.
    fn text_width(self, text: &str, bold: bool, size: f32) -> f32 {
        let em: f32 = text.chars().map(|c| self.char_em(c)).sum();
        let weight = if bold && self != FontFamily::Courier {
            1.06
        } else {
            1.0
        };
        em * weight * size * PT_TO_MM
    }

    /// Greedy word wrap to `max_width` millimetres.
    ///
    /// Words wider than a line are broken between characters. Explicit
    /// newlines start a new line.
    fn wrap(self, text: &str, bold: bool, size: f32, max_width: f32) -> Vec<String> {
        let text = pdf_safe(text);
        let fits = |s: &str| self.text_width(s, bold, size) <= max_width;
        let mut lines = Vec::new();

        for paragraph in text.split('\n') {
            let mut current = String::new();
            for word in paragraph.split_whitespace() {
                let candidate = if current.is_empty() {
                    word.to_string()
                } else {
                    format!("{} {}", current, word)
                };
                if fits(&candidate) {
                    current = candidate;
                    continue;
                }

                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                for c in word.chars() {
                    current.push(c);
                    if !fits(&current) && current.chars().count() > 1 {
                        current.pop();
                        lines.push(std::mem::take(&mut current));
                        current.push(c);
                    }
                }
            }
            if !current.is_empty() {
                lines.push(current);
            }
        }

        lines
    }
}

fn pt(mm: f32) -> Object {
    (mm * MM_TO_PT).into()
}

fn rgb_operands(color: [u8; 3]) -> Vec<Object> {
    color.iter().map(|&c| (c as f32 / 255.0).into()).collect()
}

/// Page content streams built up in millimetre coordinates.
struct Canvas {
    family: FontFamily,
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
}

impl Canvas {
    fn new(family: FontFamily) -> Self {
        Self {
            family,
            pages: Vec::new(),
            ops: Vec::new(),
        }
    }

    fn text(&mut self, x: f32, y: f32, text: &str, style: TextStyle) {
        let safe = pdf_safe(text);
        if safe.is_empty() {
            return;
        }

        let width = self.family.text_width(&safe, style.bold, style.size);
        let x = match style.align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };
        let font = if style.bold { "F2" } else { "F1" };
        // Latin-1 code points map directly onto WinAnsi bytes
        let bytes: Vec<u8> = safe.chars().map(|c| c as u32 as u8).collect();

        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font.as_bytes().to_vec()), style.size.into()],
        ));
        self.ops.push(Operation::new("rg", rgb_operands(style.color)));
        self.ops.push(Operation::new("Td", vec![pt(x), pt(PAGE_H - y)]));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::String(bytes, StringFormat::Literal)],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, width: f32) {
        self.ops.push(Operation::new("w", vec![pt(width)]));
        self.ops.push(Operation::new("RG", rgb_operands([0, 0, 0])));
        self.ops
            .push(Operation::new("m", vec![pt(x1), pt(PAGE_H - y1)]));
        self.ops
            .push(Operation::new("l", vec![pt(x2), pt(PAGE_H - y2)]));
        self.ops.push(Operation::new("S", vec![]));
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, width: f32) {
        self.ops.push(Operation::new("w", vec![pt(width)]));
        self.ops.push(Operation::new("RG", rgb_operands([0, 0, 0])));
        self.ops.push(Operation::new(
            "re",
            vec![pt(x), pt(PAGE_H - y - h), pt(w), pt(h)],
        ));
        self.ops.push(Operation::new("S", vec![]));
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, gray: f32) {
        self.ops.push(Operation::new("g", vec![gray.into()]));
        self.ops.push(Operation::new(
            "re",
            vec![pt(x), pt(PAGE_H - y - h), pt(w), pt(h)],
        ));
        self.ops.push(Operation::new("f", vec![]));
    }

    fn new_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(ops);
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.new_page();
        self.pages
    }
}

/// Bill layout with a running vertical cursor.
struct PageLayout {
    canvas: Canvas,
    margin: f32,
    width: f32,
    cell_pad_y: f32,
    accent: [u8; 3],
    columns: [f32; 7],
    y: f32,
}

impl PageLayout {
    fn new(config: &PdfConfig, canvas: Canvas) -> Self {
        let margin = config.margin_mm.clamp(0.0, 40.0);
        let width = PAGE_W - margin * 2.0;
        let scale = width / COLUMN_WIDTHS.iter().sum::<f32>();

        Self {
            canvas,
            margin,
            width,
            cell_pad_y: config.cell_padding_mm.max(0.0),
            accent: config.accent_rgb,
            columns: COLUMN_WIDTHS.map(|w| w * scale),
            y: margin + 8.0,
        }
    }

    fn center_x(&self) -> f32 {
        PAGE_W / 2.0
    }

    fn mid_x(&self) -> f32 {
        self.margin + self.width / 2.0
    }

    fn bottom(&self) -> f32 {
        PAGE_H - self.margin
    }

    fn rule(&mut self, width: f32) {
        let (m, y) = (self.margin, self.y);
        self.canvas.line(m, y, m + self.width, y, width);
    }

    fn border(&mut self, bottom: f32) {
        let m = self.margin;
        self.canvas.rect(m, m, self.width, bottom - m, 0.6);
    }

    /// Close the current page when `needed` millimetres do not fit.
    fn ensure_space(&mut self, needed: f32) -> bool {
        if self.y + needed <= self.bottom() {
            return false;
        }
        self.border(self.y);
        self.canvas.new_page();
        self.y = self.margin + 6.0;
        true
    }

    fn header(&mut self, view: &BillView) {
        let cx = self.center_x();
        let accent = self.accent;

        self.canvas.text(
            cx,
            self.y,
            &view.company_name.to_uppercase(),
            TextStyle::bold(24.0).align(Align::Center).color(accent),
        );
        self.y += 10.0;

        for line in &view.company_address {
            self.canvas.text(
                cx,
                self.y,
                &line.to_uppercase(),
                TextStyle::regular(9.0).align(Align::Center),
            );
            self.y += 5.0;
        }
        self.y += 2.0;

        self.rule(0.5);
        self.y += 6.0;

        self.rule(0.5);
        self.y += 6.0;
        self.canvas.text(
            cx,
            self.y,
            &view.title.to_uppercase(),
            TextStyle::bold(14.0).align(Align::Center),
        );
        self.y += 5.0;
        self.rule(0.5);
        self.y += 6.0;
    }

    fn meta(&mut self, view: &BillView) {
        let top = self.y;
        let lx = self.margin + 5.0;
        let colon_x = lx + 22.0;
        let mid = self.mid_x();
        let rx = mid + 6.0;
        let rvx = rx + 22.0;
        let value_width = self.width / 2.0 - 34.0;
        let line_h = META_SIZE * LINE_SPACING * PT_TO_MM;

        let left_rows = [
            ("Bill No.", view.invoice_number.as_str()),
            ("Bill Date", view.invoice_date.as_str()),
        ];
        for (i, (label, value)) in left_rows.iter().enumerate() {
            let ly = top + i as f32 * 8.0;
            self.canvas.text(lx, ly, label, TextStyle::bold(META_SIZE));
            self.canvas.text(
                colon_x,
                ly,
                &format!(": {}", value),
                TextStyle::regular(META_SIZE),
            );
        }
        let left_bottom = top + (left_rows.len() - 1) as f32 * 8.0;

        let heading = "Details of Receiver | Billed to:";
        let mut ry = top;
        self.canvas.text(rx, ry, heading, TextStyle::bold(META_SIZE));
        let underline = self.canvas.family.text_width(heading, true, META_SIZE);
        self.canvas.line(rx, ry + 1.2, rx + underline, ry + 1.2, 0.3);
        ry += 9.0;

        let address = view.receiver_addr.join(", ");
        for (label, value) in [("Name", view.receiver_name.as_str()), ("Address", address.as_str())] {
            self.canvas.text(rx, ry, label, TextStyle::bold(META_SIZE));
            let lines =
                self.canvas
                    .family
                    .wrap(&format!(": {}", value), false, META_SIZE, value_width);
            for (i, line) in lines.iter().enumerate() {
                self.canvas.text(
                    rvx,
                    ry + i as f32 * line_h,
                    line,
                    TextStyle::regular(META_SIZE),
                );
            }
            ry += lines.len().max(1) as f32 * 6.0 + 3.0;
        }

        self.y = (left_bottom + 10.0).max(ry + 4.0);
        self.canvas.line(mid, top - 5.0, mid, self.y, 0.4);
        self.rule(0.5);
        self.y += 2.0;
    }

    fn table_line_height(&self) -> f32 {
        TABLE_FONT_SIZE * LINE_SPACING * PT_TO_MM
    }

    fn table_row(&mut self, cells: &[String; 7], bold: bool, line_width: f32) {
        let line_h = self.table_line_height();
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(self.columns)
            .map(|(cell, w)| {
                self.canvas
                    .family
                    .wrap(cell, bold, TABLE_FONT_SIZE, w - CELL_PAD_X * 2.0)
            })
            .collect();
        let lines = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);
        let height = self.cell_pad_y * 2.0 + lines as f32 * line_h;

        if !bold && self.ensure_space(height) {
            self.table_header();
        }

        let top = self.y;
        if bold {
            self.canvas
                .fill_rect(self.margin, top, self.width, height, HEADER_GRAY);
        }

        let ascent = TABLE_FONT_SIZE * PT_TO_MM * 0.8;
        let mut x = self.margin;
        for ((lines, w), align) in wrapped.iter().zip(self.columns).zip(COLUMN_ALIGN) {
            self.canvas.rect(x, top, w, height, line_width);
            let anchor = match align {
                Align::Left => x + CELL_PAD_X,
                Align::Center => x + w / 2.0,
                Align::Right => x + w - CELL_PAD_X,
            };
            let style = if bold {
                TextStyle::bold(TABLE_FONT_SIZE)
            } else {
                TextStyle::regular(TABLE_FONT_SIZE)
            };
            for (i, line) in lines.iter().enumerate() {
                let baseline = top + self.cell_pad_y + ascent + i as f32 * line_h;
                self.canvas.text(anchor, baseline, line, style.align(align));
            }
            x += w;
        }

        self.y = top + height;
    }

    fn table_header(&mut self) {
        let cells = TABLE_HEADERS.map(str::to_string);
        self.table_row(&cells, true, 0.4);
    }

    fn table(&mut self, view: &BillView, padding_rows: usize) {
        self.table_header();

        for row in &view.rows {
            let cells = [
                row.number.clone(),
                row.description.clone(),
                row.hsn.clone(),
                row.uom.clone(),
                row.qty.clone(),
                row.rate.clone(),
                row.total.clone(),
            ];
            self.table_row(&cells, false, 0.3);
        }

        for _ in 0..padding_rows {
            self.table_row(&Default::default(), false, 0.3);
        }

        self.y += 1.0;
    }

    fn totals(&mut self, view: &BillView) {
        let words = format!("Amount in Words: {}", view.amount_in_words);
        let lines = self
            .canvas
            .family
            .wrap(&words, false, 9.5, self.width - 55.0);
        let line_h = 9.5 * LINE_SPACING * PT_TO_MM;
        let needed = 19.0 + lines.len().max(1) as f32 * 5.0 + 10.0;
        self.ensure_space(needed);

        let left = self.margin + 4.0;
        let right = self.margin + self.width - 4.0;
        let amount = format!("Rs. {}", view.grand_total);

        self.rule(0.6);
        self.y += 7.0;
        self.canvas
            .text(left, self.y, "Grand Total", TextStyle::bold(11.0));
        self.canvas.text(
            right,
            self.y,
            &amount,
            TextStyle::bold(11.0).align(Align::Right),
        );
        self.y += 5.0;
        self.rule(0.6);
        self.y += 7.0;

        for (i, line) in lines.iter().enumerate() {
            self.canvas.text(
                left,
                self.y + i as f32 * line_h,
                line,
                TextStyle::regular(9.5),
            );
        }
        self.canvas.text(
            right,
            self.y,
            &format!("Total: {}", amount),
            TextStyle::bold(11.0).align(Align::Right),
        );
        self.y += lines.len().max(1) as f32 * 5.0 + 3.0;
        self.rule(0.5);
        self.y += 7.0;
    }

    fn bank(&mut self, view: &BillView) {
        let cx = self.center_x();
        let style = TextStyle::bold(META_SIZE)
            .align(Align::Center)
            .color(self.accent);

        for line in &view.bank_lines {
            let wrapped = self
                .canvas
                .family
                .wrap(line, true, META_SIZE, self.width - 8.0);
            for part in &wrapped {
                self.ensure_space(5.5);
                self.canvas.text(cx, self.y, part, style);
                self.y += 5.5;
            }
            self.y += 1.0;
        }
        self.y += 4.0;
    }

    fn signature(&mut self, view: &BillView) {
        self.ensure_space(SIGNATURE_HEIGHT);

        let top = self.y;
        let bottom = top + SIGNATURE_HEIGHT;
        let mid = self.mid_x();
        let rhx = self.margin + self.width * 0.75;

        self.rule(0.4);
        self.canvas.line(mid, top, mid, bottom, 0.4);
        self.canvas.text(
            self.margin + 4.0,
            bottom - 4.0,
            "(Receiver Name and Sign)",
            TextStyle::regular(9.0),
        );
        self.canvas.text(
            rhx,
            top + 7.0,
            &format!("For {}", view.company_name),
            TextStyle::bold(META_SIZE).align(Align::Center),
        );
        self.canvas
            .line(rhx - 22.0, top + 25.0, rhx + 22.0, top + 25.0, 0.35);
        self.canvas.text(
            rhx,
            top + 30.0,
            "(Authorized Signatory)",
            TextStyle::regular(8.5).align(Align::Center),
        );

        self.border(bottom);
        self.y = bottom;
    }

    fn finish(self) -> Vec<Vec<Operation>> {
        self.canvas.finish()
    }
}

fn assemble(
    pages: Vec<Vec<Operation>>,
    family: FontFamily,
    title: &str,
    number: &str,
) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let (regular, bold) = family.base_fonts();
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => regular,
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => bold,
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        (PAGE_W * MM_TO_PT).into(),
        (PAGE_H * MM_TO_PT).into(),
    ];
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(pdf_safe(&format!("{} {}", title, number))),
        "Producer" => Object::string_literal(concat!("bill-core ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::CompanyConfig;
    use crate::models::invoice::{Invoice, LineItem};
    use crate::render::tests::sample_invoice;
    use rust_decimal::Decimal;

    fn view(invoice: &Invoice) -> BillView {
        BillView::build(invoice, &CompanyConfig::default())
    }

    fn page_count(bytes: &[u8]) -> usize {
        Document::load_mem(bytes).unwrap().get_pages().len()
    }

    #[test]
    fn test_single_page_bill() {
        let bytes = PdfRenderer::new().render(&view(&sample_invoice())).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_long_bill_spans_pages() {
        let mut invoice = sample_invoice();
        invoice.items = (1..=80)
            .map(|i| {
                LineItem::new(
                    format!("Item {}", i),
                    Decimal::ONE,
                    Decimal::from(100),
                    "",
                    "",
                )
            })
            .collect();

        let bytes = PdfRenderer::new().render(&view(&invoice)).unwrap();
        assert!(page_count(&bytes) > 1);
    }

    #[test]
    fn test_huge_amounts_render() {
        let huge: Decimal = "100000000000000000000".parse().unwrap();
        let mut invoice = sample_invoice();
        invoice.items = vec![
            LineItem::new("Widget", huge, huge, "", ""),
            LineItem::new("Widget", huge, huge, "", ""),
        ];

        let bytes = PdfRenderer::new().render(&view(&invoice)).unwrap();
        assert!(page_count(&bytes) >= 1);
    }

    #[test]
    fn test_unicode_text_does_not_fail() {
        let mut invoice = sample_invoice();
        invoice.receiver_name = "Ācme “Quoted” – ₹ (Test) \\ 日本".to_string();
        let bytes = PdfRenderer::with_config(PdfConfig {
            font: "helvetica".to_string(),
            ..PdfConfig::default()
        })
        .render(&view(&invoice))
        .unwrap();
        assert_eq!(page_count(&bytes), 1);
    }

    #[test]
    fn test_render_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bill.pdf");
        PdfRenderer::new()
            .render_to_file(&view(&sample_invoice()), &path)
            .unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_wrap_breaks_long_text() {
        let family = FontFamily::Times;
        let lines = family.wrap(
            "Canon IR-3225 Photocopier & Network Printer Rent for the month of April",
            false,
            10.0,
            58.0,
        );
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(family.text_width(line, false, 10.0) <= 58.0);
        }

        let word = family.wrap("ABCDEFGHIJKLMNOPQRSTUVWXYZ", true, 10.0, 10.0);
        assert!(word.len() > 2);
        assert_eq!(word.concat(), "ABCDEFGHIJKLMNOPQRSTUVWXYZ");

        assert!(family.wrap("", false, 10.0, 10.0).is_empty());
        assert_eq!(family.wrap("a\nb", false, 10.0, 50.0), vec!["a", "b"]);
    }

    #[test]
    fn test_font_names() {
        assert_eq!(FontFamily::from_name("Times"), FontFamily::Times);
        assert_eq!(FontFamily::from_name("arial"), FontFamily::Helvetica);
        assert_eq!(FontFamily::from_name("comic sans"), FontFamily::Times);
        assert_eq!(FontFamily::Courier.base_fonts().1, "Courier-Bold");
    }
}
