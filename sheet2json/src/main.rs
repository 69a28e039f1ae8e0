mod config;
mod convert;
mod output;
mod pipeline;
mod report;
#[cfg(test)]
mod test_support;
mod walker;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use colored::*;

use config::{Overrides, Settings};

/// Convert spreadsheet config tables into JSON files
#[derive(Parser, Debug)]
#[command(name = "sheet2json", version, about, long_about = None)]
struct Cli {
    /// Directory to scan for spreadsheets
    #[arg(long, default_value = "./")]
    dir: PathBuf,

    /// Output directory [default: ./json]
    #[arg(long)]
    out: Option<PathBuf>,

    /// Settings file [default: <dir>/sheet2json.toml when present]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worksheet holding the config table [default: Sheet1]
    #[arg(long)]
    sheet: Option<String>,

    /// Treat unknown type labels as errors instead of strings
    #[arg(long)]
    strict_types: bool,

    /// Stop at the first spreadsheet that fails to convert
    #[arg(long)]
    fail_fast: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            println!("{} {:#}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<ExitCode> {
    let cwd = std::env::current_dir().context("Failed to determine working directory")?;

    let settings = Settings::discover(cli.config.as_deref(), &cwd.join(&cli.dir))?;
    let overrides = Overrides {
        output_dir: cli.out,
        sheet: cli.sheet,
        strict_types: cli.strict_types,
        fail_fast: cli.fail_fast,
    };
    let (ctx, options) = config::resolve(&cli.dir, &cwd, settings, overrides)?;

    log::info!(
        "Scanning {} into {}",
        ctx.root.display(),
        ctx.output_dir.display()
    );

    let report = match pipeline::run(&ctx, options) {
        Ok(report) => report,
        Err(aborted) => {
            aborted.report.print_summary();
            let context = format!("Failed to scan {}", aborted.root.display());
            return Err(anyhow::Error::new(aborted.source).context(context));
        }
    };

    report.print_summary();
    Ok(report.exit_code())
}
