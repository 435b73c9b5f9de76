//! CLI entry point for the Minas Gerais traffic-accident pipelines.
//!
//! Each subcommand runs one pipeline end to end and writes its tables to
//! `<output-dir>/csv` and its charts to `<output-dir>/img`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use mg_accidents::config::{
    CITY_LOCATIONS_URL, DEFAULT_CAUSES_FILE, DEFAULT_DATA_DIR, DEFAULT_OUTPUT_DIR, DEFAULT_YEARS,
    FATAL_SOURCE_URL, FatalConfig, HighwayConfig, OutputLayout,
};
use mg_accidents::fetch::BasicClient;
use mg_accidents::pipeline::{RunSummary, run_fatal, run_highway};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "mg_accidents")]
#[command(about = "Normalize, enrich and chart Minas Gerais traffic-accident data", long_about = None)]
struct Cli {
    /// Directory receiving `csv/` and `img/`
    #[arg(short, long, global = true, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Deaths in land-transport accidents, joined with city locations
    Fatal {
        /// Path or URL of the deaths table
        #[arg(long, default_value = FATAL_SOURCE_URL)]
        source: String,

        /// Path or URL of the city location table
        #[arg(long, default_value = CITY_LOCATIONS_URL)]
        cities: String,
    },
    /// Federal highway police accident files, one per year
    Highway {
        /// Directory holding the datatran<YEAR>.csv files
        #[arg(short, long, default_value = DEFAULT_DATA_DIR)]
        data_dir: PathBuf,

        /// Years to load, in order (defaults to 2017-2022)
        #[arg(short, long, value_delimiter = ',')]
        years: Vec<u16>,

        /// Path or URL of the cause translation table
        #[arg(long, default_value = DEFAULT_CAUSES_FILE)]
        causes: String,
    },
}

fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/mg_accidents.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"))
        .to_path_buf();
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("mg_accidents.log"))
        .to_os_string();

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

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

    Ok(guard)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file
    let _log_guard = init_logging()?;

    let cli = Cli::parse();
    let output = OutputLayout::new(cli.output_dir);
    let client = BasicClient::new();

    let result = match cli.command {
        Commands::Fatal { source, cities } => {
            let config = FatalConfig {
                source,
                cities,
                output,
            };
            run_fatal(&client, &config).await
        }
        Commands::Highway {
            data_dir,
            years,
            causes,
        } => {
            let years = if years.is_empty() {
                DEFAULT_YEARS.to_vec()
            } else {
                years
            };
            let config = HighwayConfig {
                data_dir,
                years,
                causes,
                output,
            };
            run_highway(&client, &config).await
        }
    };

    match result {
        Ok(summary) => {
            report(&summary);
            Ok(())
        }
        Err(e) => {
            error!(error = %format!("{e:#}"), "Pipeline failed");
            Err(e)
        }
    }
}

fn report(summary: &RunSummary) {
    info!(
        rows = summary.rows,
        summary_rows = summary.summary_rows,
        tables = summary.tables.len(),
        charts = summary.charts.len(),
        "Run complete"
    );
    for path in summary.tables.iter().chain(&summary.charts) {
        info!(path = %path.display(), "Output");
    }
}
