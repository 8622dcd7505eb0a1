use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Extract market and news records from a saved news page")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse the saved page and write one CSV per record kind
    Extract(ExtractArgs),
    /// Download a page into `<data-root>/raw_data/web_data.html`
    Fetch(FetchArgs),
    /// Print a short summary of a CSV file
    Explore {
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct ExtractArgs {
    #[arg(short, long, env = "DATA_ROOT", default_value = "data")]
    pub data_root: PathBuf,

    /// Read this HTML file instead of `<data-root>/raw_data/web_data.html`
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write CSVs here instead of `<data-root>/processed_data`
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = LayoutPreset::Cnbc)]
    pub layout: LayoutPreset,

    /// JSON selector table, overrides `--layout`
    #[arg(short, long)]
    pub selectors: Option<PathBuf>,

    /// Also extract article cards
    #[arg(long)]
    pub cards: bool,
}

#[derive(Args, Debug)]
pub struct FetchArgs {
    #[arg(short, long, default_value = market_news_extractor::fetch::DEFAULT_URL)]
    pub url: String,

    #[arg(short, long, env = "DATA_ROOT", default_value = "data")]
    pub data_root: PathBuf,

    /// Seconds to wait after the page is loaded
    #[arg(long, default_value_t = 10)]
    pub settle_secs: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LayoutPreset {
    Cnbc,
    Loose,
}
