use anyhow::{Context, Result, anyhow, bail};
use log::info;
use neuvec::cli::Cli;
use neuvec::runner::{self, RunOptions};
use neuvec::scenarios::SCENARIOS;
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_target(false)
        .init();

    let options = RunOptions {
        keep_going: cli.keep_going,
    };

    if cli.test {
        println!("Running built-in scenarios...");
        run_all_tests().context("Built-in scenarios failed")?;
        println!("All scenarios passed!");
    } else if let Some(file_path) = cli.file {
        run_script(&file_path, options)
            .with_context(|| format!("Failed to run script: {:?}", file_path))?;
    } else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
    }

    Ok(())
}

fn run_script(path: &Path, options: RunOptions) -> Result<()> {
    // 1. Verify file existence and extension
    if !path.exists() {
        return Err(anyhow!("File not found: {:?}", path));
    }
    if path.extension().and_then(|s| s.to_str()) != Some("vec") {
        return Err(anyhow!("File must have .vec extension: {:?}", path));
    }

    // 2. Read source
    let source =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;

    // 3. Run
    let report = runner::run_source(&source, options)?;
    for line in &report.output {
        println!("{line}");
    }

    if !report.failures.is_empty() {
        for failure in &report.failures {
            eprintln!("line {}: {}", failure.line, failure.message);
        }
        bail!("{} command(s) failed", report.failures.len());
    }

    Ok(())
}

fn run_all_tests() -> Result<()> {
    for scenario in SCENARIOS {
        println!("--- Running {} ---", scenario.name);
        let report = scenario.check()?;
        for line in &report.output {
            info!("{}: {line}", scenario.name);
        }
        if !report.failures.is_empty() {
            println!("recovered {} index error(s)", report.failures.len());
        }
    }
    Ok(())
}
