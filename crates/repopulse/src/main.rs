//! repopulse - Repository star-history and influence charts

mod cli;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use repopulse_core::api::DEFAULT_API_BASE;
use repopulse_core::{Theme, WidgetKind};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "repopulse",
    version,
    about = "Repository star-history and influence charts",
    long_about = "Fetches precomputed repository metrics, buckets them by month and\n\
                  renders the star-history popup or the influence chart.\n\
                  \n\
                  Examples:\n\
                    repopulse star rust-lang/rust                 # Print chart options as JSON\n\
                    repopulse influence tokio-rs/tokio --format svg -o tokio.svg\n\
                    repopulse bucketize stars.json --latest       # Bucket a local series\n\
                  \n\
                  Environment Variables:\n\
                    REPOPULSE_API_BASE               # Override the metrics backend\n\
                    REPOPULSE_THEME                  # light|dark\n\
                    RUST_LOG                         # Log filter (default: warn)"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Metrics backend base URL
    #[arg(long, global = true, env = "REPOPULSE_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Chart theme (default: settings file, then light)
    #[arg(long, global = true, env = "REPOPULSE_THEME")]
    theme: Option<Theme>,

    /// Settings file (default: <config dir>/repopulse/settings.json)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "10")]
    timeout_secs: u64,

    /// Debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Star history popup (monthly stars gained)
    Star(WidgetArgs),
    /// Influence chart (monthly influence index)
    Influence(WidgetArgs),
    /// Bucket a local series file by month and print the dataset
    Bucketize {
        /// JSON file holding `[["YYYY-MM-DD", count], ...]`
        file: PathBuf,
        /// Keep the last value per month instead of summing
        #[arg(long)]
        latest: bool,
    },
}

#[derive(clap::Args)]
struct WidgetArgs {
    /// Repository as owner/name
    repo: String,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Write to file instead of stdout
    #[arg(long, short = 'o')]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Svg,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = cli::RunOptions {
        api_base: cli.api_base,
        theme: cli.theme,
        settings: cli.settings,
        timeout: std::time::Duration::from_secs(cli.timeout_secs.max(1)),
    };

    match cli.command {
        Command::Star(args) => {
            cli::run_widget(WidgetKind::StarPopup, &args.repo, args.format, args.output, options)
                .await?;
        }
        Command::Influence(args) => {
            cli::run_widget(
                WidgetKind::InfluenceChart,
                &args.repo,
                args.format,
                args.output,
                options,
            )
            .await?;
        }
        Command::Bucketize { file, latest } => {
            cli::run_bucketize(&file, latest).await?;
        }
    }

    Ok(())
}
