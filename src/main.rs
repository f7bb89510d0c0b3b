mod assertions;
mod builder;
mod catalog;
mod cli;
mod config;
mod harness;
mod lock;
mod process;
mod runner;

use clap::Parser;
use cli::Cli;
use config::Config;
use harness::Harness;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Structured logging to stderr, filtered by RUST_LOG when set
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .try_init();
}

/// Build, then run every scenario. Returns whether the run succeeded.
fn run(cli: Cli) -> Result<bool, Box<dyn std::error::Error>> {
    if cli.list {
        print_catalog();
        return Ok(true);
    }

    let project_dir = std::path::absolute(&cli.project_dir)?;
    let mut config = Config::load(cli.config.as_deref(), &project_dir)?;
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs;
    }
    if cli.strict_fixtures {
        config.strict_fixtures = true;
    }
    config.validate()?;
    tracing::debug!(project_dir = %project_dir.display(), ?config, "resolved settings");

    // Held until every scenario has run
    let _build_lock = match builder::build(&project_dir, &config) {
        Ok(lock) => lock,
        Err(e) => {
            println!("Build failed: {}", e);
            return Ok(false);
        }
    };

    let harness = Harness::new(&project_dir, &config);
    let summary = runner::run_all(&harness);
    tracing::debug!(passed = summary.passed, total = summary.total, "run complete");

    Ok(summary.all_passed())
}

fn print_catalog() {
    for (suite, scenarios) in [
        ("positive", catalog::positive()),
        ("negative", catalog::negative()),
    ] {
        println!("{}:", suite);
        for scenario in scenarios {
            println!("  {}", scenario.label);
        }
    }
}
