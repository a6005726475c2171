//! VeriGrade Analytics CLI
//!
//! Operator tooling for the scoring and anomaly engines: point it at JSON
//! exports of financial data and it prints reports.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;

use verigrade::anomaly::{
    recommend_vendor_switches, CategoryBudget, CategorySpending, MarketPrice, OptimizationConfig,
    PriceAnomalyDetector, PriceSeries, SpendingAnomalyDetector, VendorPriceHistory,
};
use verigrade::cli::{
    render_price_anomalies, render_report, render_spending_insights, OutputFormat,
};
use verigrade::health::{FinancialSnapshot, HealthScoreEngine};

/// VeriGrade Analytics CLI - financial health scoring and anomaly detection
#[derive(Parser)]
#[command(name = "verigrade")]
#[command(author = "VeriGrade Team")]
#[command(version = verigrade::VERSION)]
#[command(about = "Score financial health and detect anomalies from JSON data files", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format (text, json, json-pretty)
    #[arg(short, long, env = "VERIGRADE_FORMAT", default_value = "text")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a financial health score from a snapshot
    Score {
        /// Path to a JSON financial snapshot
        #[arg(short, long)]
        snapshot: PathBuf,
    },

    /// Detect vendor price anomalies and switch opportunities
    PriceAnomalies {
        /// Path to a JSON array of vendor price series
        #[arg(long)]
        history: PathBuf,

        /// Path to a JSON array of market reference prices
        #[arg(long)]
        market: Option<PathBuf>,
    },

    /// Analyze current-month spending against category baselines
    SpendingAnomalies {
        /// Path to a JSON array of category monthly series
        #[arg(long)]
        series: PathBuf,

        /// Path to a JSON map of category to current-month spend
        #[arg(long)]
        current: PathBuf,

        /// Path to a JSON array of category budgets
        #[arg(long)]
        budgets: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let output = match cli.command {
        Commands::Score { snapshot } => cmd_score(&snapshot, cli.format)?,
        Commands::PriceAnomalies { history, market } => {
            cmd_price_anomalies(&history, market.as_deref(), cli.format)?
        }
        Commands::SpendingAnomalies {
            series,
            current,
            budgets,
        } => cmd_spending_anomalies(&series, &current, budgets.as_deref(), cli.format)?,
    };

    println!("{}", output);
    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))
}

fn cmd_score(snapshot_path: &Path, format: OutputFormat) -> Result<String> {
    let snapshot: FinancialSnapshot = read_json(snapshot_path)?;
    let engine = HealthScoreEngine::default();
    let report = engine.score(&snapshot)?;
    Ok(render_report(&report, format)?)
}

fn cmd_price_anomalies(
    history_path: &Path,
    market_path: Option<&Path>,
    format: OutputFormat,
) -> Result<String> {
    let series: Vec<PriceSeries> = read_json(history_path)?;
    let histories: Vec<VendorPriceHistory> =
        series.into_iter().map(PriceSeries::into_history).collect();

    let markets: Vec<MarketPrice> = match market_path {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let now = Utc::now();
    let detector = PriceAnomalyDetector::default();
    let anomalies = detector.detect_all(&histories, &markets, now);
    let recommendations =
        recommend_vendor_switches(&histories, &OptimizationConfig::default(), now);

    Ok(render_price_anomalies(&anomalies, &recommendations, format)?)
}

fn cmd_spending_anomalies(
    series_path: &Path,
    current_path: &Path,
    budgets_path: Option<&Path>,
    format: OutputFormat,
) -> Result<String> {
    let series: Vec<CategorySpending> = read_json(series_path)?;
    let current: BTreeMap<String, Decimal> = read_json(current_path)?;
    let budgets: Vec<CategoryBudget> = match budgets_path {
        Some(path) => read_json(path)?,
        None => Vec::new(),
    };

    let detector = SpendingAnomalyDetector::default();
    let insights = detector.insights(&series, &current, &budgets, Utc::now());

    Ok(render_spending_insights(&insights, format)?)
}
