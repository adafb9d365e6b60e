pub mod commands;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use models::settings::AppSettings;

const DEFAULT_CONFIG: &str = "sector-crawler.json";

#[derive(Parser)]
#[command(
    name = "sector-crawler",
    about = "Fetch per-sector heatmap snapshots and save them as a spreadsheet",
    version
)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Crawl all configured sectors and write the workbook (default).
    Crawl {
        /// Path to the JSON settings file.
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        /// Output directory, overrides `output_dir` from the settings.
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },

    /// Show US Eastern / Korean time and whether the US market is open.
    Status {
        #[arg(long)]
        json: bool,
    },

    /// Print the effective settings.
    Config {
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        /// Write the default settings to the config path.
        #[arg(long)]
        init: bool,
    },
}

fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let command = cli.command.unwrap_or(Commands::Crawl {
        config: PathBuf::from(DEFAULT_CONFIG),
        out_dir: None,
    });

    match command {
        Commands::Crawl { config, out_dir } => {
            let settings = AppSettings::load(&config)?;
            commands::crawl_cmd::run_crawl(&settings, out_dir).await?;
        }
        Commands::Status { json } => commands::status_cmd::show_market_status(json)?,
        Commands::Config { config, init } => {
            commands::settings_cmd::show_or_init_settings(&config, init)?
        }
    }
    Ok(())
}
