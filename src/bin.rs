//! Binary entry point for `mind-triage`.
//!
//! This module provides the command-line interface for mind-triage with options
//! for configuration file paths, logging verbosity, and output format. It
//! initializes the necessary components and runs one session.

use std::sync::Arc;

use clap::Parser;
use mind_triage::{
    base::{config::Config, types::Void},
    interaction::report::OutputFormat,
    runtime::{Input, Session},
    triage::MatchMode,
};
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::{Protocol, WithExportConfig};
use tracing_subscriber::{fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt};

/// Mind-triage – keyword triage and emotion analysis for free-form text.
///
/// Configuration can come from `config.toml` or environment variables
/// prefixed with `MIND_TRIAGE_`. Text can be passed as arguments, piped on
/// stdin, or typed line by line with `--interactive`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Override the config file path (optional).
    ///
    /// By default, the tool will look for a config file at `.hidden/config.toml`
    /// in the current directory.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
    /// Increase log verbosity (-v, -vv, etc.).
    ///
    /// Use multiple times to increase verbosity:
    /// - No flag: INFO level
    /// - -v: DEBUG level
    /// - -vv or more: TRACE level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
    /// Export spans over OTLP/HTTP in addition to logging them.
    #[arg(long)]
    otlp: bool,
    /// Only match keywords on word boundaries ("down" no longer matches "download").
    #[arg(long)]
    word_boundary: bool,
    /// Emit the analysis as JSON instead of a text report.
    #[arg(long)]
    json: bool,
    /// Read one submission per line from stdin.
    #[arg(short, long, conflicts_with = "text")]
    interactive: bool,
    /// The text to analyze; read from stdin when omitted.
    text: Vec<String>,
}

/// Main entry point for the mind-triage binary.
///
/// Sets up logging based on verbosity, loads configuration, and runs the session.
#[tokio::main]
async fn main() -> Void {
    let args = Args::parse();

    // Construct the level filter.

    let level = match args.verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let level_filter = tracing_subscriber::filter::LevelFilter::from_level(level);

    // Prepare the log layer; stdout carries the report.

    let stderr = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_ansi(true)
        .with_level(true)
        .with_file(false)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);

    // Prepare the otlp layer, if requested.

    let otel = if args.otlp {
        let exporter = opentelemetry_otlp::SpanExporter::builder().with_http().with_protocol(Protocol::HttpBinary).build()?;
        let tracer = opentelemetry_sdk::trace::SdkTracerProvider::builder().with_simple_exporter(exporter).build().tracer("mind-triage");

        Some(tracing_opentelemetry::layer().with_tracer(tracer))
    } else {
        None
    };

    tracing_subscriber::registry().with(otel).with(level_filter).with(stderr).init();

    let mut config = Config::load(args.config.as_deref())?;

    if args.word_boundary {
        Arc::make_mut(&mut config.inner).match_mode = MatchMode::WordBoundary;
    }

    let input = if args.interactive {
        Input::Interactive
    } else if args.text.is_empty() {
        Input::Stdin
    } else {
        Input::Text(args.text.join(" "))
    };

    let format = if args.json { OutputFormat::Json } else { OutputFormat::Text };

    mind_triage::start(config, Session { input, format }).await
}
