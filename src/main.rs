use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;

use covgate::{check_report, GateConfig, GateError, Overrides};

#[derive(Parser)]
#[command(name = "covgate")]
#[command(about = "Fail the build if any tracked file is below 100% line coverage")]
#[command(version)]
struct Cli {
    /// Path to config file (default: covgate.toml, if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// LCOV report to check (default: lcov.info under the root)
    #[arg(short, long)]
    report: Option<PathBuf>,

    /// Directory record paths are resolved against (default: current directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Only files whose relative path starts with this are gated (default: src/)
    #[arg(short, long)]
    prefix: Option<String>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            let not_found = e
                .downcast_ref::<GateError>()
                .filter(|err| matches!(err, GateError::ReportNotFound { .. }));
            if let Some(err) = not_found {
                eprintln!("{} {}", "[ERROR]".red().bold(), err);
            } else {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
            }
            std::process::exit(1);
        }
    }
}

fn run() -> Result<bool> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let cwd = std::env::current_dir().context("Could not determine current directory")?;
    let overrides = Overrides {
        report: cli.report,
        root: cli.root,
        prefix: cli.prefix,
    };
    let config = GateConfig::load(&cwd, cli.config.as_deref(), &overrides)?;

    let result = check_report(&config)?;
    result.print_summary(&config.prefix);

    Ok(result.passed())
}
