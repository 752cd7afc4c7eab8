//! Command-line entry point for butternut.
//!
//! Converts every `.feature` file in a directory into a Markdown document.

use std::path::PathBuf;

use butternut::render::{LineEnding, RenderOptions};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use butternut_cli::batch::{BatchOptions, BatchReport, OutputFormat, convert_features};
use butternut_cli::config::{CliConfig, LogLevel, parse_line_ending};
use butternut_cli::error::CliError;
use butternut_cli::logging::init_logging;

/// Convert Gherkin feature files to Markdown documents.
#[derive(Parser, Debug)]
#[command(name = "butternut", version, about)]
struct Args {
    /// Directory containing `.feature` files. Defaults to the current
    /// directory.
    source: Option<PathBuf>,

    /// Directory receiving the generated files. Defaults to the source
    /// directory.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Search subdirectories of the source directory.
    #[arg(short, long)]
    recursive: bool,

    /// Parse and render without writing any files.
    #[arg(short, long)]
    dry_run: bool,

    /// Write the parsed document as JSON instead of Markdown.
    #[arg(short, long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<LogLevel>,

    /// Line ending of generated files (lf, crlf, native).
    #[arg(long, value_parser = parse_line_ending)]
    line_ending: Option<LineEnding>,
}

fn main() {
    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            init_logging(&CliConfig::default());
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(2);
        }
    };
    init_logging(&config);

    info!(version = env!("CARGO_PKG_VERSION"), "starting butternut");

    match run(&args, config) {
        Ok(report) if report.cancelled => {
            warn!(converted = report.outputs.len(), "stopped before all files were converted");
        }
        Ok(report) => {
            info!(converted = report.outputs.len(), "conversion finished");
        }
        Err(e) => {
            tracing::error!(error = %e, "conversion failed");
            std::process::exit(1);
        }
    }
}

fn build_config(args: &Args) -> Result<CliConfig, CliError> {
    let config = CliConfig::from_env()?;
    Ok(config.apply_overrides(args.log_level, args.line_ending))
}

fn batch_options(args: &Args, config: CliConfig) -> Result<BatchOptions, CliError> {
    let source = args.source.clone().map_or_else(std::env::current_dir, Ok)?;
    let output = args.output.clone().unwrap_or_else(|| source.clone());
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Markdown
    };
    Ok(BatchOptions::new(source)
        .with_output(output)
        .with_recursive(args.recursive)
        .with_dry_run(args.dry_run)
        .with_format(format)
        .with_render_options(RenderOptions::default().with_line_ending(config.line_ending)))
}

/// Run the conversion on a single-threaded runtime.
fn run(args: &Args, config: CliConfig) -> Result<BatchReport, CliError> {
    let options = batch_options(args, config)?;
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run_async(options))
}

async fn run_async(options: BatchOptions) -> Result<BatchReport, CliError> {
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received; finishing the current file");
            on_interrupt.cancel();
        }
    });
    convert_features(&options, &cancel).await
}
