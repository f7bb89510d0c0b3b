use clap::Parser;
use std::path::PathBuf;

/// Rebuild the doxa interpreter and run its conformance scenarios
#[derive(Parser, Debug)]
#[command(name = "doxa-test")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Project root containing the interpreter sources and fixtures
    #[arg(short = 'C', long, value_name = "DIR", default_value = ".")]
    pub project_dir: PathBuf,

    /// Configuration file (default: <DIR>/doxa-test.toml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seconds to wait for each interpreter run; 0 waits forever
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Fail scenarios whose fixture file is missing
    #[arg(long)]
    pub strict_fixtures: bool,

    /// List the scenario catalog without building or running anything
    #[arg(long)]
    pub list: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}
