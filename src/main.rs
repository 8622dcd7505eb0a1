mod cli;

use clap::Parser;
use cli::{Cli, Command, ExtractArgs, FetchArgs, LayoutPreset};
use market_news_extractor::fetch::{self, HttpFetcher};
use market_news_extractor::pipeline::{
    Pipeline, PipelineConfig, RunSummary, DOCUMENT_FILE_NAME, RAW_DATA_DIR,
};
use market_news_extractor::report::TracingReporter;
use market_news_extractor::{sink, ExtractorError, Layout};
use std::path::Path;
use std::process::ExitCode;
use tokio::time::Duration;
use tracing::{error, info};
use tracing_error::ErrorLayer;
use tracing_subscriber::prelude::*;

/// The document was missing, or the layout or fetch failed.
const EXIT_FATAL: u8 = 1;
/// Some stage could not write its output.
const EXIT_PARTIAL_FAILURE: u8 = 2;

fn exit_status(result: &Result<RunSummary, ExtractorError>) -> u8 {
    match result {
        Ok(summary) if summary.has_failures() => EXIT_PARTIAL_FAILURE,
        Ok(_) => 0,
        Err(_) => EXIT_FATAL,
    }
}

fn extract(args: ExtractArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let mut config = PipelineConfig::from_data_root(&args.data_root);
    if let Some(input) = args.input {
        config.input = input;
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    config.cards = args.cards;

    let layout = match (args.selectors, args.layout) {
        (Some(path), _) => Layout::from_file(path)?,
        (None, LayoutPreset::Cnbc) => Layout::cnbc(),
        (None, LayoutPreset::Loose) => Layout::loose(),
    };

    let reporter = TracingReporter;
    let result = Pipeline::new(config, layout, &reporter).run();
    let status = exit_status(&result);
    match result {
        Err(e) => return Err(e.into()),
        Ok(_) if status == EXIT_PARTIAL_FAILURE => error!("Data filtering finished with errors"),
        Ok(_) => info!("Data filtering complete"),
    }
    Ok(ExitCode::from(status))
}

async fn download(args: FetchArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let fetcher = HttpFetcher::new(Duration::from_secs(args.settle_secs))?;
    let path = args.data_root.join(RAW_DATA_DIR).join(DOCUMENT_FILE_NAME);
    fetch::save_page(&fetcher, &args.url, &path).await?;
    Ok(ExitCode::SUCCESS)
}

fn explore(file: &Path) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let summary = sink::explore(file)?;
    println!("{}", summary);
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_env("LOG_LEVEL").unwrap_or_else(|_| {
                "info,html5ever=error,selectors=error,hyper=warn,reqwest=info".into()
            }),
        )
        .with(ErrorLayer::default())
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Extract(args) => extract(args),
        Command::Fetch(args) => download(args).await,
        Command::Explore { file } => explore(&file),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Run failed");
            ExitCode::from(EXIT_FATAL)
        }
    }
}
