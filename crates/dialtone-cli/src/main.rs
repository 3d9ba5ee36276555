mod commands;
mod error;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, disk, flatten, phone, Context};
use crate::error::{exit_code_for, report_error};
use dialtone_config as config;

#[derive(Debug, Parser)]
#[command(name = "dialtone", version, about = "dialtone CLI")]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Normalize phone numbers to +7(AAA)BBB-CC-DD
    Phone(phone::PhoneArgs),
    /// Flatten a JSON array of arrays
    Flatten(flatten::FlattenArgs),
    #[command(subcommand)]
    Disk(disk::DiskCommand),
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        config: config_path,
        json,
        verbose,
        command,
    } = cli;

    match command {
        Command::Completions(args) => completions::emit(args),
        command => {
            let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
            if verbose {
                match config::resolve_config_path(config_path) {
                    Ok(path) => {
                        if path.exists() {
                            debug!(path = %path.display(), "config resolved");
                        } else {
                            debug!(path = %path.display(), "config missing, using defaults");
                        }
                    }
                    Err(err) => {
                        debug!(error = %err, "config unavailable");
                    }
                }
            }

            let ctx = Context {
                json,
                config: &app_config,
            };

            match command {
                Command::Phone(args) => phone::normalize(&ctx, args),
                Command::Flatten(args) => flatten::flatten(&ctx, args),
                Command::Disk(cmd) => match cmd {
                    disk::DiskCommand::Stat(args) => disk::stat(&ctx, args),
                    disk::DiskCommand::Mkdir(args) => disk::mkdir(&ctx, args),
                    disk::DiskCommand::Rm(args) => disk::remove(&ctx, args),
                    disk::DiskCommand::Smoke(args) => disk::smoke(&ctx, args),
                },
                Command::Completions(_) => {
                    unreachable!("completions command handled before config load")
                }
            }
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
