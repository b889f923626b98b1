//! Tour insights report binary
//!
//! Loads every month listed in the configuration, builds the month reports
//! and the all-months views, and prints them as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Use tour_insights.toml from a standard location
//! cargo run --bin tour-report
//!
//! # Use an explicit configuration file
//! RUST_LOG=debug cargo run --bin tour-report -- path/to/tour_insights.toml
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)

use std::env;

use anyhow::Context;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tour_insights::config::ReportConfig;
use tour_insights::io::loaders::MonthLoader;
use tour_insights::services::report::build_report;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so stdout stays valid JSON
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = match env::args().nth(1) {
        Some(path) => ReportConfig::from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        None => ReportConfig::from_default_location().context("Failed to load configuration")?,
    };

    let months = config.month_keys()?;
    if months.is_empty() {
        anyhow::bail!("No months configured in 'data.months'");
    }
    info!(
        "Building report for {} month(s) from {}",
        months.len(),
        config.data.directory.display()
    );

    let loader = MonthLoader::new(&config.data.directory);
    let missing: Vec<String> = months
        .iter()
        .filter(|month| !loader.has_month(**month))
        .map(|month| month.to_string())
        .collect();
    if !missing.is_empty() {
        anyhow::bail!(
            "Incomplete exports in {} for: {}",
            config.data.directory.display(),
            missing.join(", ")
        );
    }

    let datasets = loader.load_months(&months)?;
    let report = build_report(&datasets, &config.report_options());

    let failed = report
        .months
        .iter()
        .filter(|month| month.availability.is_err())
        .count();
    if failed > 0 {
        info!("{} month(s) have no availability metrics", failed);
    }

    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("Failed to serialize report")?
    );
    Ok(())
}
