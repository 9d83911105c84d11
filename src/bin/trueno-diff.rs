//! trueno-diff binary.
//!
//! Compares two experiments or checkpoints. If an experiment ID is passed,
//! the best checkpoint of that experiment is used; if the experiment has no
//! primary metric, its latest checkpoint is used instead.

use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use trueno_diff::config::{Config, StorageUrl, DEFAULT_STORAGE_URL, STORAGE_URL_ENV};
use trueno_diff::report::{compare_two, OutputFormat, ReportOptions, DEFAULT_MIN_WIDTH};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compare two experiments or checkpoints",
    long_about = None
)]
struct Cli {
    /// First checkpoint or experiment ID (any unique prefix)
    left: String,

    /// Second checkpoint or experiment ID (any unique prefix)
    right: String,

    /// Storage location (local path or file:// URL)
    #[arg(short = 'S', long, env = STORAGE_URL_ENV, default_value = DEFAULT_STORAGE_URL)]
    storage_url: StorageUrl,

    /// Output format: table or json
    #[arg(short, long, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Minimum column width of the table
    #[arg(long, default_value_t = DEFAULT_MIN_WIDTH)]
    min_width: usize,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::builder()
        .storage(cli.storage_url)
        .report(
            ReportOptions::builder()
                .format(cli.format)
                .min_width(cli.min_width)
                .build(),
        )
        .build();
    debug!(storage = %config.storage().path().display(), "opening storage");

    let store = config
        .storage()
        .open()
        .with_context(|| format!("failed to open storage at {}", config.storage().path().display()))?;

    let mut stdout = io::stdout().lock();
    compare_two(&store, &cli.left, &cli.right, &mut stdout, config.report())?;
    stdout.flush()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
