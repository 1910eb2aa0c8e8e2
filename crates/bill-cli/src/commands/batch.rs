//! Batch command - render many bills matched by a glob pattern.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use bill_core::format::to_currency_string;
use bill_core::{BillConfig, Invoice, WarningKind, export_file_name};

use super::render::{render_pdf, write_html};
use super::{load_bill, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern of CSV sheets or JSON forms
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Also write an HTML preview next to each PDF
    #[arg(long)]
    html: bool,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Date used in file names when a bill has none (YYYY-MM-DD)
    #[arg(long)]
    today: Option<NaiveDate>,
}

/// Rendered bill details kept for the summary.
struct RenderedBill {
    invoice: Invoice,
    errors: usize,
    warnings: usize,
    pdf_path: PathBuf,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    bill: Option<RenderedBill>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "csv" | "json")
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    fs::create_dir_all(&args.output_dir)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let today = args
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let result = process_single_file(&path, &args, &config, today).await;
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match result {
            Ok(bill) => {
                debug!("Wrote {}", bill.pdf_path.display());
                results.push(ProcessResult {
                    path,
                    bill: Some(bill),
                    error: None,
                    processing_time_ms,
                });
            }
            Err(e) => {
                let error_msg = e.to_string();
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        bill: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing {} failed: {}", path.display(), error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let successful = results.iter().filter(|r| r.bill.is_some()).count();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if args.summary {
        let summary_path = args.output_dir.join("summary.csv");
        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

async fn process_single_file(
    path: &Path,
    args: &BatchArgs,
    config: &BillConfig,
    today: NaiveDate,
) -> anyhow::Result<RenderedBill> {
    let (invoice, warnings) = load_bill(path, config)?;

    let errors = warnings
        .iter()
        .filter(|w| w.kind == WarningKind::MissingQuantity)
        .count();
    let pdf_path = args.output_dir.join(export_file_name(&invoice, today));

    if args.html {
        write_html(&invoice, config, &pdf_path.with_extension("html"))?;
    }

    let bytes = render_pdf(invoice.clone(), config.clone()).await?;
    fs::write(&pdf_path, bytes)?;

    Ok(RenderedBill {
        invoice,
        errors,
        warnings: warnings.len() - errors,
        pdf_path,
    })
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "bill_number",
        "party_name",
        "items",
        "grand_total",
        "errors",
        "warnings",
        "output",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(bill) = &result.bill {
            wtr.write_record([
                filename,
                "success",
                &bill.invoice.invoice_number,
                &bill.invoice.receiver_name,
                &bill.invoice.items.len().to_string(),
                &to_currency_string(bill.invoice.grand_total()),
                &bill.errors.to_string(),
                &bill.warnings.to_string(),
                &bill.pdf_path.display().to_string(),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
