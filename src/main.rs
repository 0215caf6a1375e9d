use addon_sigview::load::{FileByteSource, IOLimits, JsonReportInspector, LoadController};
use addon_sigview::logging::{init_tracing, init_tracing_json};
use addon_sigview::present::WriterSink;
use addon_sigview::{OutputFormat, SigviewConfig};
use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Summarize the signing status of add-on packages from inspector reports.
#[derive(Parser, Debug)]
#[command(name = "addon-sigview", version, about, long_about = None)]
struct Args {
    /// Raw inspector reports (JSON), shown in order
    #[arg(required = true)]
    reports: Vec<PathBuf>,

    /// Output format (overrides the configuration file)
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Do not print the raw inspector dump
    #[arg(long)]
    no_raw: bool,

    /// Configuration file (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Enable verbose logging (debug level unless RUST_LOG is set)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum Format {
    Text,
    Html,
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Html => OutputFormat::Html,
            Format::Json => OutputFormat::Json,
        }
    }
}

fn load_config(args: &Args) -> anyhow::Result<SigviewConfig> {
    let mut config = match &args.config {
        Some(path) => SigviewConfig::load(path)
            .with_context(|| format!("failed to load configuration '{}'", path.display()))?,
        None => SigviewConfig::default(),
    };
    if let Some(format) = args.format {
        config.output.format = format.into();
    }
    if args.no_raw {
        config.output.show_raw = false;
    }
    if args.json_logs {
        config.output.json_logs = true;
    }
    Ok(config)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = load_config(&args)?;

    let level = if args.verbose { "debug" } else { "warn" };
    if config.output.json_logs {
        init_tracing_json(level);
    } else {
        init_tracing(level);
    }

    let sink = WriterSink::new(
        std::io::stdout(),
        config.output.format,
        config.output.show_raw,
    );
    let source = FileByteSource::new(IOLimits::from(&config.io));
    let controller =
        LoadController::new(JsonReportInspector, source, sink).with_config(&config);

    for report in args.reports {
        controller.on_file_selected(Some(report)).await;
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("error: failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(args)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
