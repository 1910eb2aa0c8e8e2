//! Parse command - ingest a bill CSV and report what was found.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use bill_core::format::{amount_in_words, placeholder, to_currency_string, to_display_date};
use bill_core::ingest::read_csv_file;
use bill_core::{CsvInvoiceParser, ParseOutcome};

use super::load_config;

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input CSV file
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Check for missing bill number, party name and flagged items
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per item
    Csv,
    /// Plain text report
    Text,
}

pub async fn run(args: ParseArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Parsing file: {}", args.input.display());

    let rows = read_csv_file(&args.input, &config.ingest)?;
    let outcome = CsvInvoiceParser::from_config(&config.ingest).parse_rows(&rows)?;

    if !outcome.warnings.is_empty() {
        eprintln!("{}", style(outcome.summary_badge()).yellow());
        for warning in &outcome.warnings {
            eprintln!("  - {}", warning);
        }
    }

    if args.validate {
        let issues = outcome.invoice.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_outcome(&outcome, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn format_outcome(outcome: &ParseOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Csv => format_csv(outcome),
        OutputFormat::Text => Ok(format_text(outcome)),
    }
}

fn format_csv(outcome: &ParseOutcome) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "no",
        "description",
        "hsn",
        "uom",
        "qty",
        "rate",
        "total",
        "status",
    ])?;

    for (i, item) in outcome.invoice.items.iter().enumerate() {
        wtr.write_record([
            (i + 1).to_string().as_str(),
            &item.description,
            &item.hsn,
            &item.uom,
            &item.qty.normalize().to_string(),
            &to_currency_string(item.rate),
            &to_currency_string(item.total()),
            item.status.label(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(outcome: &ParseOutcome) -> String {
    let invoice = &outcome.invoice;
    let mut output = String::new();

    output.push_str(&format!("Bill Number: {}\n", placeholder(&invoice.invoice_number)));
    output.push_str(&format!(
        "Bill Date:   {}\n",
        placeholder(&to_display_date(&invoice.invoice_date))
    ));
    output.push_str(&format!("Party Name:  {}\n", placeholder(&invoice.receiver_name)));
    output.push_str(&format!("Address:     {}\n", placeholder(&invoice.receiver_addr)));
    output.push('\n');

    output.push_str("Items:\n");
    for (i, item) in invoice.items.iter().enumerate() {
        output.push_str(&format!(
            "  {}. {} [{}] {} {} x {} = {} ({})\n",
            i + 1,
            item.description,
            placeholder(&item.hsn),
            item.qty.normalize(),
            item.uom,
            to_currency_string(item.rate),
            to_currency_string(item.total()),
            item.status.label()
        ));
    }
    output.push('\n');

    let total = invoice.grand_total();
    output.push_str(&format!("Grand Total: Rs. {}\n", to_currency_string(total)));
    output.push_str(&format!("In Words:    {} Only\n", amount_in_words(total)));
    output.push('\n');

    output.push_str(&format!("{}\n", outcome.summary_badge()));
    output.push_str(&outcome.validation_message());

    output
}
