use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "neuvec")]
#[command(version, about = "Runs dynamic array code-along scripts", long_about = None)]
pub struct Cli {
    /// The .vec script file to run
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Run the built-in scenarios
    #[arg(short, long)]
    pub test: bool,

    /// Report index errors and continue with the next command
    #[arg(short, long)]
    pub keep_going: bool,

    /// Set verbose level
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Log level for the `-v` count; `RUST_LOG` still overrides it.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
