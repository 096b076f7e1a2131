//! CLI entry point for the account profiler.
//!
//! Provides subcommands for profiling an account dump and for inspecting the
//! subreddit metadata table.

use account_profiler::analyzers::lurk::GapMeasure;
use account_profiler::output::{report_key, upload_report, write_report};
use account_profiler::source::{load_dump, source_for};
use account_profiler::subreddits::SubredditTable;
use account_profiler::{ProfileConfig, profile};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "account_profiler")]
#[command(about = "Builds a behavioral profile of a reddit account", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile an account dump from a file or URL
    Profile {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// File to write the JSON report to
        #[arg(short, long, default_value = "report.json")]
        output: PathBuf,

        /// Date to profile as of (YYYY-MM-DD), defaults to now
        #[arg(long)]
        today: Option<NaiveDate>,

        /// Subreddit metadata CSV replacing the embedded table
        #[arg(long)]
        subreddits: Option<PathBuf>,

        /// Posts needed in a subreddit before it says anything about the account
        #[arg(long, default_value_t = 3)]
        min_threshold: u64,

        /// Same as --min-threshold, for default subreddits
        #[arg(long, default_value_t = 10)]
        min_threshold_default: u64,

        /// How gaps between posts are measured when finding the lurk period
        #[arg(long, value_enum, default_value_t = GapMeasure::Elapsed)]
        gap_measure: GapMeasure,

        /// Gzip compress the report
        #[arg(long, default_value_t = false)]
        gzip: bool,

        /// Optional: S3 bucket name to upload the report to (e.g., "my-bucket")
        #[arg(long)]
        s3_bucket: Option<String>,
    },
    /// Load the subreddit metadata table and summarize it
    Subreddits {
        /// Subreddit metadata CSV replacing the embedded table
        #[arg(long)]
        subreddits: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/account_profiler.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("account_profiler.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Profile {
            source,
            output,
            today,
            subreddits,
            min_threshold,
            min_threshold_default,
            gap_measure,
            gzip,
            s3_bucket,
        } => {
            let table = load_table(subreddits.as_deref())?;

            let mut config = ProfileConfig::default();
            if let Some(today) = today {
                config = config.with_today(today);
            }
            config.thresholds.min = min_threshold;
            config.thresholds.min_default = min_threshold_default;
            config.gap_measure = gap_measure;

            let dump = load_dump(source_for(&source).as_ref()).await?;
            info!(
                username = %dump.about.name,
                comments = dump.comments.len(),
                submissions = dump.submissions.len(),
                "Dump loaded"
            );

            let report = profile(&dump, &table, &config)
                .with_context(|| format!("failed to profile {}", dump.about.name))?;

            write_report(&output, &report, gzip)?;
            info!(path = %output.display(), "Report written");

            if let Some(bucket) = s3_bucket {
                let aws = aws_config::load_from_env().await;
                let client = aws_sdk_s3::Client::new(&aws);
                let key = report_key(&report.username, gzip);
                upload_report(&client, &bucket, &key, &report, gzip).await?;
            }
        }
        Commands::Subreddits { subreddits } => {
            let table = load_table(subreddits.as_deref())?;

            let defaults = table.iter().filter(|(_, s)| s.is_default).count();
            let ignore_text = table.iter().filter(|(_, s)| s.ignore_text).count();
            let with_attribute = table.iter().filter(|(_, s)| s.attribute.is_some()).count();

            info!(
                total = table.len(),
                defaults,
                ignore_text,
                with_attribute,
                "Subreddit table summary"
            );
        }
    }

    Ok(())
}

/// Loads the table at `path`, or the embedded one.
fn load_table(path: Option<&Path>) -> Result<SubredditTable> {
    let table = match path {
        Some(path) => SubredditTable::load(path)
            .with_context(|| format!("failed to load subreddit table {}", path.display()))?,
        None => SubredditTable::embedded()?,
    };
    Ok(table)
}
