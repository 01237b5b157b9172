use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use divbook::app;
use divbook::clock::{Clock, SystemClock};
use divbook::config::{default_config_path, ResolvedConfig};
use divbook::dividends::CalendarMonth;
use divbook::models::InstrumentType;
use divbook::sort::{SortDirection, SortSpec};
use divbook::stock::StockHistory;
use divbook::view::{ViewMode, ViewProjection};
use serde::Serialize;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "divbook")]
#[command(about = "Brokerage portfolio and dividend calendar")]
struct Cli {
    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct SortArgs {
    /// Field to sort by (e.g. totalValue, name, date)
    #[arg(long)]
    sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long)]
    desc: bool,
}

impl SortArgs {
    fn resolve(&self, default: &SortSpec) -> SortSpec {
        match &self.sort {
            Some(key) if self.desc => SortSpec::new(key.clone(), SortDirection::Desc),
            Some(key) => SortSpec::ascending(key.clone()),
            None if self.desc => SortSpec::new(default.key.clone(), SortDirection::Desc),
            None => default.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Show current configuration
    Config,

    /// Portfolio totals and the change for the selected mode
    Summary {
        /// today or all-time
        #[arg(long, default_value = "today")]
        mode: ViewMode,

        /// Reference year for dividends (default: current year)
        #[arg(long)]
        year: Option<i32>,
    },

    /// The positions table
    Positions {
        #[command(flatten)]
        sort: SortArgs,

        /// today or all-time
        #[arg(long, default_value = "today")]
        mode: ViewMode,

        /// List every instrument type, not only the configured ones
        #[arg(long)]
        all: bool,
    },

    /// Dividend calendar for one month of any year
    Calendar {
        /// Month number, 1-12 (default: current month)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        #[command(flatten)]
        sort: SortArgs,
    },

    /// Dividends received in a year, per position
    Dividends {
        #[arg(long)]
        year: Option<i32>,
    },

    /// Dividend history of one ticker
    Stock {
        ticker: String,

        #[command(flatten)]
        sort: SortArgs,
    },

    /// Show whether the backend holds a brokerage token, or store one
    Token {
        #[arg(long)]
        set: Option<String>,
    },
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();

    let cli = Cli::parse();
    let config_path = cli.config.unwrap_or_else(default_config_path);
    let config = ResolvedConfig::load_or_default(&config_path)?;
    let clock = SystemClock;

    match cli.command {
        Command::Config => print_json(&app::config_output(&config_path, &config))?,
        Command::Summary { mode, year } => {
            let year = year.unwrap_or_else(|| clock.reference_year());
            let engine = app::load_engine(&config, year).await?;
            let view = ViewProjection::new(mode, clock.current_month());
            print_json(&app::summary_output(&engine, &view, &config.display))?;
        }
        Command::Positions { sort, mode, all } => {
            let engine = app::load_engine(&config, clock.reference_year()).await?;
            let spec = sort.resolve(&config.portfolio.default_sort);
            let types: &[InstrumentType] = if all {
                &[]
            } else {
                &config.portfolio.instrument_types
            };
            let view = ViewProjection::new(mode, clock.current_month());
            print_json(&app::positions_output(
                &engine,
                &spec,
                types,
                &view,
                &config.display,
            ))?;
        }
        Command::Calendar { month, sort } => {
            let engine = app::load_engine(&config, clock.reference_year()).await?;
            let month = match month {
                Some(m) => CalendarMonth::new(m - 1)?,
                None => clock.current_month(),
            };
            let spec = sort.resolve(&config.calendar.default_sort);
            print_json(&app::calendar_output(&engine, month, &spec, &config.display))?;
        }
        Command::Dividends { year } => {
            let year = year.unwrap_or_else(|| clock.reference_year());
            let engine = app::load_engine(&config, year).await?;
            print_json(&app::dividends_output(&engine, year, &config.display))?;
        }
        Command::Stock { ticker, sort } => {
            let history = app::load_stock(&config, &ticker).await?;
            let default = if config.stock.default_sort.key.is_empty() {
                StockHistory::default_sort()
            } else {
                config.stock.default_sort.clone()
            };
            let spec = sort.resolve(&default);
            print_json(&app::stock_output(&history, &spec, &config.display))?;
        }
        Command::Token { set } => print_json(&app::token_output(&config, set).await?)?,
    }

    Ok(())
}
