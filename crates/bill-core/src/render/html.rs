//! HTML bill preview.

use tera::{Context, Tera};
use tracing::debug;

use crate::error::RenderError;
use crate::models::config::BillConfig;

use super::{BillView, Result};

const TEMPLATE_NAME: &str = "bill.html";
const TEMPLATE: &str = include_str!("templates/bill.html");

/// Renders a bill as a standalone HTML page.
///
/// All bill content is autoescaped.
pub struct HtmlRenderer {
    tera: Tera,
    min_rows: usize,
    accent_rgb: [u8; 3],
}

impl HtmlRenderer {
    /// Create a renderer with the built-in template.
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_template(TEMPLATE_NAME, TEMPLATE)
            .map_err(|e| RenderError::Template(e.to_string()))?;

        Ok(Self {
            tera,
            min_rows: 3,
            accent_rgb: [198, 40, 40],
        })
    }

    /// Create a renderer using the preview and accent settings of a config.
    pub fn from_config(config: &BillConfig) -> Result<Self> {
        Ok(Self::new()?
            .with_min_rows(config.html.min_rows)
            .with_accent(config.pdf.accent_rgb))
    }

    /// Pad the item table to at least this many rows.
    pub fn with_min_rows(mut self, rows: usize) -> Self {
        self.min_rows = rows;
        self
    }

    /// Set the accent colour used for the company name and bank details.
    pub fn with_accent(mut self, rgb: [u8; 3]) -> Self {
        self.accent_rgb = rgb;
        self
    }

    /// Render the preview page.
    pub fn render(&self, view: &BillView) -> Result<String> {
        let mut context =
            Context::from_serialize(view).map_err(|e| RenderError::Template(e.to_string()))?;
        context.insert("pad_rows", &self.min_rows.saturating_sub(view.rows.len()));
        context.insert(
            "accent",
            &format!(
                "{}, {}, {}",
                self.accent_rgb[0], self.accent_rgb[1], self.accent_rgb[2]
            ),
        );

        let html = self
            .tera
            .render(TEMPLATE_NAME, &context)
            .map_err(|e| RenderError::Template(e.to_string()))?;

        debug!("Rendered HTML preview ({} bytes)", html.len());
        Ok(html)
    }
}
