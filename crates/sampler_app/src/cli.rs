use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sampler_core::{SocialGroup, YearMonth};

#[derive(Parser, Debug)]
#[command(
    name = "sampler_app",
    version,
    about = "Request sampled post exports and track them to completion"
)]
pub struct Cli {
    /// Path to a RON config file. Defaults to ./sampler.ron when present.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Base url of the sampling service, overriding the config file.
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,
    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit a sampling job and poll it until it finishes. Ctrl-C stops tracking.
    Sample(SampleArgs),
    /// Send an issue report to the service maintainers.
    ReportIssue(ReportIssueArgs),
}

#[derive(Args, Debug)]
pub struct SampleArgs {
    /// Social group dataset: race or sexuality.
    #[arg(long)]
    pub group: Option<SocialGroup>,
    /// First month, YYYY-MM.
    #[arg(long)]
    pub start: Option<YearMonth>,
    /// Last month (inclusive), YYYY-MM.
    #[arg(long)]
    pub end: Option<YearMonth>,
    /// Number of documents to sample. Omit to bundle every matching file.
    #[arg(long, value_name = "N")]
    pub num_docs: Option<String>,
}

#[derive(Args, Debug)]
pub struct ReportIssueArgs {
    #[arg(long)]
    pub description: String,
    /// Contact address; anonymous reports use guest@local.
    #[arg(long)]
    pub email: Option<String>,
}
