use analyzer::Analyzer;
use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;
use configuration::{Config, DEFAULT_CONFIG_PATH, init_tracing, load_config_from};
use core_types::{PlayerId, ReportQuery, TimeWindow};
use database::{DbRepository, connect};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// The main entry point for the hand statistics report.
#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file, if there is one
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Per-player bet, win and rake totals over a date range of hand history.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// First day of the report (format: YYYY-MM-DD).
    start_date: NaiveDate,

    /// Last day of the report, inclusive (format: YYYY-MM-DD).
    end_date: NaiveDate,

    /// Player ids to report on. Defaults to the configured roster.
    player_ids: Vec<PlayerId>,

    /// Path to the configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Where to write the CSV export. Defaults to `<export_prefix>_<today>.csv`
    /// in the configured export directory.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Heading printed above the table.
    #[arg(long)]
    title: Option<String>,
}

// ==============================================================================
// Report Logic
// ==============================================================================

/// Handles the orchestration of one report run.
async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config_from(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    let _log_guard = init_tracing(&config.logging).context("Failed to initialise logging")?;

    let query = build_query(&cli, &config)?;
    tracing::info!(
        start = %cli.start_date,
        end = %cli.end_date,
        players = query.player_ids.len(),
        "Fetching user statistics."
    );

    let database = connect(&config.database)
        .await
        .context("Failed to connect to the database")?;
    let repository = DbRepository::new(database, &config.database);

    let analyzer = Analyzer::new(Arc::new(repository)).with_progress(progress_bar()?);
    let report = analyzer.run(&query).await.context("Report run failed")?;

    let title = cli.title.clone().unwrap_or_else(|| {
        format!("User Statistics ({} to {})", cli.start_date, cli.end_date)
    });
    println!(
        "\n{}",
        exporter::render_report(&title, &report.players, &report.totals)
    );

    let output = cli.output.clone().unwrap_or_else(|| {
        exporter::default_csv_path(
            &config.report.export_dir,
            &config.report.export_prefix,
            Utc::now().date_naive(),
        )
    });
    exporter::export_csv(&output, &report.players)
        .with_context(|| format!("Failed to export CSV to {}", output.display()))?;
    println!("\nResults exported to: {}", output.display());

    Ok(())
}

/// Builds the query from the CLI dates and either the explicit ids or the configured roster.
fn build_query(cli: &Cli, config: &Config) -> anyhow::Result<ReportQuery> {
    let window = TimeWindow::from_dates(cli.start_date, cli.end_date)
        .context("Invalid date range")?;
    let player_ids = if cli.player_ids.is_empty() {
        config.report.default_player_ids.clone()
    } else {
        cli.player_ids.clone()
    };
    Ok(ReportQuery::new(
        config.report.game_type.clone(),
        player_ids,
        window,
    ))
}

fn progress_bar() -> anyhow::Result<ProgressBar> {
    let progress_bar = ProgressBar::new(0);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    Ok(progress_bar)
}
