use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "tz-checkr",
    about = "Audit procurement specification drafts for anti-competitive wording (44-FZ)",
    version
)]
pub struct Cli {
    /// Draft document (JSON) to check
    pub path: PathBuf,

    /// Policy config file [default: ./.tz-checkr/config.toml, fallback ~/.config/tz-checkr/config.toml]
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Minimum passing compliance score; overrides the config value
    #[arg(long, value_name = "SCORE")]
    pub min_score: Option<u32>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Write the normalized document to FILE
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Audit the rows as-is, without normalizing first
    #[arg(long)]
    pub raw: bool,

    /// Show type candidates and all corrected rows
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the summary line
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}
