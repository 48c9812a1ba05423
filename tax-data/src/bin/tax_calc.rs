use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tax_core::{CalculationResult, DeductionMethod, TaxEngine, TaxYearConfig};
use tax_data::{BracketLoader, ReturnLoader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compute a federal income tax return from a JSON return snapshot.
///
/// Prints the full calculation result (every form line, totals, refund or
/// amount owed) as JSON, or a short human-readable summary.
#[derive(Debug, Parser)]
#[command(name = "tax-calc")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the JSON file containing the return snapshot
    #[arg(short, long = "return")]
    return_file: PathBuf,

    /// Optional CSV file overriding the built-in bracket tables
    /// (columns: tax_year, table, filing_status, rate, upper_limit)
    #[arg(short, long)]
    brackets: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Summary,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Logs go to stderr so stdout carries only the result.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .without_time()
        .with_target(false)
        .init();
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();

    let file = File::open(&args.return_file)
        .with_context(|| format!("Failed to open: {}", args.return_file.display()))?;
    let snapshot = ReturnLoader::from_json(file)
        .with_context(|| format!("Failed to parse return: {}", args.return_file.display()))?;

    let built_in = TaxYearConfig::for_year(snapshot.tax_year)
        .with_context(|| format!("No parameters for tax year {}", snapshot.tax_year))?;

    let result = match &args.brackets {
        Some(path) => {
            debug!("loading bracket overrides from {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open: {}", path.display()))?;
            let records = BracketLoader::parse(file)
                .with_context(|| format!("Failed to parse CSV: {}", path.display()))?;
            let config = BracketLoader::apply(built_in, &records)
                .with_context(|| format!("Invalid bracket overrides: {}", path.display()))?;
            TaxEngine::new(&config).calculate(&snapshot)
        }
        None => TaxEngine::new(built_in).calculate(&snapshot),
    }
    .context("Tax calculation failed")?;

    let mut stdout = io::stdout().lock();
    match args.format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut stdout, &result)
                .context("Failed to write result")?;
            writeln!(stdout)?;
        }
        OutputFormat::Summary => write_summary(&mut stdout, &result)?,
    }

    Ok(())
}

fn write_summary<W: Write>(
    out: &mut W,
    result: &CalculationResult,
) -> io::Result<()> {
    writeln!(out, "Tax year {} ({})", result.tax_year, result.filing_status)?;
    writeln!(out, "  Total income:     {:>12}", result.total_income)?;
    writeln!(out, "  AGI:              {:>12}", result.agi)?;
    writeln!(
        out,
        "  Deduction:        {:>12} ({})",
        match result.deduction_method {
            DeductionMethod::Standard => result.standard_deduction_amount,
            DeductionMethod::Itemized => result.itemized_deduction_amount,
        },
        result.deduction_method
    )?;
    writeln!(out, "  Taxable income:   {:>12}", result.taxable_income)?;
    writeln!(out, "  Total tax:        {:>12}", result.total_tax)?;
    writeln!(out, "  Total payments:   {:>12}", result.total_payments)?;
    if result.is_refund() {
        writeln!(out, "  Refund:           {:>12}", result.refund_amount)?;
    } else {
        writeln!(out, "  Amount owed:      {:>12}", result.amount_owed)?;
    }
    writeln!(
        out,
        "  Effective rate: {}  Marginal rate: {}",
        result.effective_tax_rate, result.marginal_tax_rate
    )?;
    let forms: Vec<&str> = result.required_forms.iter().map(|f| f.as_str()).collect();
    writeln!(out, "  Required forms: {}", forms.join(", "))?;
    Ok(())
}
