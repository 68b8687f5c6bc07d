//! Garp CLI binary.
//!
//! Provides the command-line interface for the garp fundamentals engine.
//! Inputs are instrument bundles: one JSON document per company holding its
//! daily closes and its annual and quarterly statements.

mod cmd;
mod data;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "GARP_LOG";

#[derive(Parser)]
#[command(name = "garp")]
#[command(about = "Trailing-twelve-month fundamentals and valuation ratios", long_about = None)]
#[command(version)]
struct Cli {
    /// Pipeline configuration file (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export one record per official reporting date
    Build {
        /// Instrument bundle (JSON)
        bundle: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Write the full report instead of the records only
        #[arg(long)]
        full: bool,
    },

    /// Re-enrich previously exported records
    Enrich {
        /// Instrument bundle (JSON)
        bundle: PathBuf,

        /// Exported records (JSON)
        records: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the daily merged series
    Daily {
        /// Instrument bundle (JSON)
        bundle: PathBuf,

        /// First date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Last date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,

        /// Only the last N rows
        #[arg(long)]
        tail: Option<usize>,

        /// Print rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show annual, quarterly and trailing solvency tables
    History {
        /// Instrument bundle (JSON)
        bundle: PathBuf,

        /// Print tables as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the latest valuation and PE bands
    Summary {
        /// Instrument bundle (JSON)
        bundle: PathBuf,
    },

    /// List exported metrics
    Metrics {
        /// Filter by category
        #[arg(short = 'k', long)]
        category: Option<String>,

        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    dotenvy::dotenv().ok();
    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = data::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Build {
            bundle,
            output,
            full,
        } => {
            cmd::build::build_records(&bundle, config, output.as_deref(), full)?;
        }
        Commands::Enrich {
            bundle,
            records,
            output,
        } => {
            cmd::enrich::enrich_records(&bundle, &records, config, output.as_deref())?;
        }
        Commands::Daily {
            bundle,
            from,
            to,
            tail,
            json,
        } => {
            cmd::daily::show_daily(&bundle, config, from, to, tail, json)?;
        }
        Commands::History { bundle, json } => {
            cmd::history::show_history(&bundle, config, json)?;
        }
        Commands::Summary { bundle } => {
            cmd::summary::show_summary(&bundle, config)?;
        }
        Commands::Metrics { category, verbose } => {
            cmd::metrics::list_metrics(category, verbose)?;
        }
    }

    Ok(())
}
