//! mracket CLI - mutation testing for DrRacket student programs.
//!
//! This is the main entry point for the mracket CLI application.
//! It uses clap for argument parsing, loads a mutation-configuration file,
//! runs the mutation-testing pipeline over one input file, and writes the
//! resulting report as JSON.

mod error;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use error::{CliError, Result};
use mracket_runner::{Config, Runner};

/// mracket - mutation testing for DrRacket student programs
#[derive(Parser, Debug)]
#[command(name = "mracket")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Mutation testing for DrRacket student programs", long_about = None)]
struct Cli {
    /// Input Racket file
    filepath: PathBuf,

    /// Path to mutation-configuration file
    #[arg(short, long)]
    config: PathBuf,

    /// Output JSON path (default: <cwd>/<basename>-analysis.json)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Allow overwriting an existing output file
    #[arg(short, long)]
    force: bool,

    /// Raise the log level to debug
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            let code = match e {
                CliError::InputNotFound(_) | CliError::OutputExists(_) => 1,
                _ => 2,
            };
            tracing::error!("{e}");
            ExitCode::from(code)
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { EnvFilter::new("debug") } else { EnvFilter::new("info") };
    let subscriber = fmt::layer().with_target(false).with_thread_ids(false).with_thread_names(false);
    let _ = tracing_subscriber::registry().with(filter).with(subscriber).try_init();
}

fn run(cli: &Cli) -> Result<()> {
    if !cli.filepath.is_file() {
        return Err(CliError::InputNotFound(cli.filepath.display().to_string()));
    }

    let output_path = cli.output.clone().unwrap_or_else(|| default_output_path(&cli.filepath));
    if output_path.exists() && !cli.force {
        return Err(CliError::OutputExists(output_path.display().to_string()));
    }

    let config_text = std::fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)
        .map_err(|source| CliError::Config { path: cli.config.display().to_string(), source })?;

    let runner = Runner { mutant_timeout: std::time::Duration::from_secs(10), ..Runner::default() };
    let output = runner.run(&cli.filepath, &config)?;

    let json = serde_json::to_string_pretty(&output).expect("RunnerOutput always serializes");
    std::fs::write(&output_path, json)?;
    tracing::info!(path = %output_path.display(), "wrote report");
    Ok(())
}

fn default_output_path(filepath: &Path) -> PathBuf {
    let basename = filepath.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(format!("{basename}-analysis.json"))
}
