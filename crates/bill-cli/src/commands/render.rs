//! Render command - produce the PDF (and optional HTML preview) of a bill.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use bill_core::{BillConfig, BillView, HtmlRenderer, Invoice, PdfRenderer, export_file_name};

use super::{load_bill, load_config};

/// Arguments for the render command.
#[derive(Args)]
pub struct RenderArgs {
    /// Input bill (CSV sheet or JSON form)
    #[arg(required = true)]
    input: PathBuf,

    /// Output PDF path (default: generated name in --out-dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory for the generated PDF name
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write the HTML preview to this file
    #[arg(long)]
    html: Option<PathBuf>,

    /// Date used in the file name when the bill has none (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
}

pub async fn run(args: RenderArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    info!("Rendering bill from {}", args.input.display());
    let (invoice, warnings) = load_bill(&args.input, &config)?;

    for warning in &warnings {
        eprintln!("{} {}", style("⚠").yellow(), warning);
    }

    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let pdf_path = args
        .output
        .clone()
        .unwrap_or_else(|| args.out_dir.join(export_file_name(&invoice, today)));

    if let Some(html_path) = &args.html {
        write_html(&invoice, &config, html_path)?;
        println!(
            "{} Preview written to {}",
            style("✓").green(),
            html_path.display()
        );
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message("Generating PDF…");
    pb.enable_steady_tick(Duration::from_millis(100));

    let bytes = render_pdf(invoice, config).await?;
    pb.finish_and_clear();

    if let Some(parent) = pdf_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(&pdf_path, bytes)?;

    println!(
        "{} PDF written to {}",
        style("✓").green(),
        pdf_path.display()
    );
    debug!("Total render time: {:?}", start.elapsed());

    Ok(())
}

/// Write the HTML preview of a bill.
pub fn write_html(invoice: &Invoice, config: &BillConfig, path: &Path) -> anyhow::Result<()> {
    let view = BillView::build(invoice, &config.company);
    let html = HtmlRenderer::from_config(config)?.render(&view)?;
    fs::write(path, html)?;
    Ok(())
}

/// Lay out and encode the PDF on a blocking worker.
pub async fn render_pdf(invoice: Invoice, config: BillConfig) -> anyhow::Result<Vec<u8>> {
    let bytes = tokio::task::spawn_blocking(move || {
        let view = BillView::build(&invoice, &config.company);
        PdfRenderer::with_config(config.pdf).render(&view)
    })
    .await??;
    Ok(bytes)
}
