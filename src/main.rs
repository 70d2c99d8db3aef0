use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use ledger_lens::analysis::{AnalysisOutcome, AnalysisResult};
use ledger_lens::data::loader::load_file;
use ledger_lens::services::{self, DEFAULT_GROWTH_RATE};
use ledger_lens::{Clarification, Settings, analyze_with};

/// Success.
const EXIT_SUCCESS: u8 = 0;
/// Runtime failure (unreadable file, bad config, ...).
const EXIT_ERROR: u8 = 1;
/// The table was readable but its layout needs the user's help.
const EXIT_CLARIFICATION: u8 = 3;

#[derive(Parser)]
#[command(name = "ledger-lens")]
#[command(about = "Infer the layout of a transaction export and score cash-flow health")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a transaction export (.csv, .json or .parquet)
    #[command(after_help = "\
Examples:
  ledger-lens analyze bank.csv
  ledger-lens analyze bank.csv --json
  ledger-lens analyze ledger.parquet --config lens.toml --set profit_margin_high=20")]
    Analyze {
        /// Path to the export
        file: PathBuf,

        /// TOML settings file with [thresholds] and/or [columns]
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override a threshold, e.g. --set expense_ratio_risk=0.9
        #[arg(long = "set", value_name = "KEY=VALUE")]
        overrides: Vec<String>,

        /// Print the JSON record instead of a human summary
        #[arg(long)]
        json: bool,

        /// Also write the JSON record to a file
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Check whether GST registration is required for a revenue figure
    Gst {
        #[arg(allow_hyphen_values = true)]
        revenue: f64,

        #[arg(long)]
        threshold: Option<f64>,
    },

    /// Working-capital advice for a cash-flow figure
    WorkingCapital {
        #[arg(allow_hyphen_values = true)]
        cash_flow: f64,
    },

    /// Project next month and next quarter from past amounts
    Forecast {
        #[arg(required = true, allow_hyphen_values = true)]
        amounts: Vec<f64>,

        #[arg(long, default_value_t = DEFAULT_GROWTH_RATE)]
        growth_rate: f64,
    },

    /// Bucket transactions (description + amount columns) by keyword
    Categorize {
        file: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze { file, config, overrides, json, output } => {
            cmd_analyze(&file, config.as_deref(), &overrides, json, output.as_deref())
        }
        Commands::Gst { revenue, threshold } => {
            println!("{}", services::check_gst_compliance(revenue, threshold));
            Ok(EXIT_SUCCESS)
        }
        Commands::WorkingCapital { cash_flow } => {
            println!("{}", services::working_capital_analysis(cash_flow));
            Ok(EXIT_SUCCESS)
        }
        Commands::Forecast { amounts, growth_rate } => cmd_forecast(&amounts, growth_rate),
        Commands::Categorize { file, json } => cmd_categorize(&file, json),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(EXIT_ERROR)
        }
    }
}

fn load_settings(config: Option<&Path>, overrides: &[String]) -> Result<Settings> {
    let mut settings = match config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read config {}", path.display()))?;
            Settings::from_toml(&text).with_context(|| format!("in {}", path.display()))?
        }
        None => Settings::default(),
    };
    for assignment in overrides {
        settings.thresholds.apply_override(assignment)?;
    }
    Ok(settings)
}

fn cmd_analyze(
    file: &Path,
    config: Option<&Path>,
    overrides: &[String],
    json: bool,
    output: Option<&Path>,
) -> Result<u8> {
    let settings = load_settings(config, overrides)?;
    let table = load_file(file).with_context(|| format!("cannot load {}", file.display()))?;
    let outcome = analyze_with(&table, &settings.thresholds, &settings.columns);

    let json_str = serde_json::to_string_pretty(&outcome).context("JSON serialization error")?;
    if let Some(path) = output {
        std::fs::write(path, &json_str)
            .with_context(|| format!("cannot write {}", path.display()))?;
        eprintln!("wrote {}", path.display());
    }

    if json {
        println!("{json_str}");
    } else {
        match &outcome {
            AnalysisOutcome::Analysis(result) => print_summary(result),
            AnalysisOutcome::Clarification(c) => print_clarification(c),
        }
    }

    Ok(if outcome.needs_clarification() { EXIT_CLARIFICATION } else { EXIT_SUCCESS })
}

fn print_summary(r: &AnalysisResult) {
    println!("format           {}", r.source_format);
    println!("transactions     {}", r.transactions.len());
    println!("revenue          {:.2}", r.revenue);
    println!("expenses         {:.2}", r.expenses);
    println!("profit margin    {:.2}%", r.profit_margin);
    println!("cash flow        {:.2}", r.cash_flow);
    println!("health score     {}", r.health_score);
    println!("creditworthiness {}", r.creditworthiness);
    println!();
    println!("risks:");
    for risk in &r.risks {
        println!("  - {risk}");
    }
    println!("recommended:");
    for p in &r.recommended_products {
        println!("  - {} ({}): {}", p.product, p.provider, p.reason);
    }
}

fn print_clarification(c: &Clarification) {
    eprintln!("clarification needed: {}", c.message);
    for hint in &c.clarifications {
        eprintln!("hint:  {hint}");
    }
    if !c.sample_columns.is_empty() {
        eprintln!("columns seen: {}", c.sample_columns.join(", "));
    }
    eprintln!("accepted layouts:");
    for shape in &c.expected_formats {
        let cols: Vec<String> = shape.iter().map(|(k, v)| format!("{k} = {v}")).collect();
        eprintln!("  - {}", cols.join("; "));
    }
}

fn cmd_forecast(amounts: &[f64], growth_rate: f64) -> Result<u8> {
    let forecast = services::forecast_financials(amounts, growth_rate)?;
    println!("next month    {:.2}", forecast.next_month);
    println!("three months  {:.2}", forecast.three_months);
    Ok(EXIT_SUCCESS)
}

fn cmd_categorize(file: &Path, json: bool) -> Result<u8> {
    let table = load_file(file).with_context(|| format!("cannot load {}", file.display()))?;
    let categorized = services::categorize_transactions(&table)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&categorized)?);
    } else {
        for t in &categorized {
            println!("{:<16} {:>12.2}  {}", t.category.to_string(), t.amount, t.description);
        }
    }
    Ok(EXIT_SUCCESS)
}
