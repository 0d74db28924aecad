use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use configuration::{init_tracing, load_settings, Overrides};
use dashboard::{Dashboard, Selection, StatsPanel};
use std::path::PathBuf;
use std::sync::Arc;

/// The main entry point for the TickerLens dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref()).context("Failed to load configuration")?;
    settings.apply(&cli.overrides);
    let _log_guard = init_tracing(&settings.logging)?;

    let store = dataset::load_csv(&settings.data.path, &settings.data.date_format)
        .with_context(|| format!("Failed to load dataset from {}", settings.data.path.display()))?;
    let store = Arc::new(store);

    match cli.command {
        Commands::Serve => web_server::run_server(&settings.server, store).await?,
        Commands::Stats(args) => handle_stats(args, Dashboard::new(store))?,
        Commands::Tickers => handle_tickers(&Dashboard::new(store)),
    }

    Ok(())
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Daily price statistics for a set of tickers, served as a dashboard API.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file. Defaults to `tickerlens.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve,
    /// Print the statistics panel for one selection.
    Stats(StatsArgs),
    /// List the tickers and the dataset's date range.
    Tickers,
}

#[derive(Parser)]
struct StatsArgs {
    /// The ticker to summarize. Defaults to the first ticker alphabetically.
    #[arg(long)]
    ticker: Option<String>,

    /// Compare against this ticker.
    #[arg(long)]
    benchmark: Option<String>,

    /// First date to include (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last date to include (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,

    /// Print the raw statistics as JSON instead of a table.
    #[arg(long)]
    json: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn handle_stats(args: StatsArgs, dashboard: Dashboard) -> anyhow::Result<()> {
    let ticker = match args.ticker {
        Some(ticker) => ticker,
        None => dashboard
            .default_ticker()
            .map(str::to_string)
            .context("Dataset has no tickers")?,
    };

    let selection = Selection {
        ticker,
        benchmark: args.benchmark,
        range: dashboard.partial_range(args.from, args.to)?,
    };
    let range = dashboard.resolve_range(&selection);
    tracing::info!(?selection, "Computing statistics.");

    let stats = dashboard.stats(&selection);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    let panel = StatsPanel::from(&stats);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Statistic", "Value"]);
    for row in &panel.rows {
        table.add_row(vec![row.label, row.value.as_str()]);
    }

    println!("{} to {}", range.start(), range.end());
    println!("{table}");
    Ok(())
}

fn handle_tickers(dashboard: &Dashboard) {
    let bounds = dashboard.date_bounds();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Ticker", "Trading Days"]);
    for ticker in dashboard.tickers() {
        table.add_row(vec![ticker.to_string(), dashboard.store().rows(ticker).len().to_string()]);
    }

    println!("Dataset covers {} to {}", bounds.start(), bounds.end());
    println!("{table}");
}
