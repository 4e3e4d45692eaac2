//! CLI for vidren.

mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use vidren_core::{config, logging};

use commands::{run_completions, run_inspect, run_manpage, run_rename};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "vidren", version)]
#[command(
    about = "vidren: build a performer-based rename mapping for video files",
    long_about = None
)]
pub struct Cli {
    /// Print step-by-step narration to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve performers for every filename in a JSON batch and write the CSV mapping.
    Rename {
        /// JSON file of the form {"data": [{"n": "<filename>"}, ...]}.
        input: PathBuf,

        /// Where to write the CSV mapping.
        #[arg(short, long, default_value = "rename_output.csv", value_name = "FILE")]
        output: PathBuf,

        /// Lower bound of the pause after each network lookup, in seconds.
        #[arg(long, value_name = "SECS")]
        min_delay: Option<f64>,

        /// Upper bound of the pause after each network lookup, in seconds.
        #[arg(long, value_name = "SECS")]
        max_delay: Option<f64>,
    },

    /// Show how filenames are parsed and classified, without any network access.
    Inspect {
        /// Filenames to inspect.
        #[arg(required = true)]
        filenames: Vec<String>,
    },

    /// Print a shell completion script.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff).
    Manpage,
}

impl CliCommand {
    /// Parse arguments, set up config and logging, dispatch. Returns the exit code.
    pub async fn run_from_args() -> Result<i32> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Manpage => return run_manpage(),
            _ => {}
        }

        let cfg = config::load_or_init()?;
        let verbose = cli.verbose || cfg.verbose;
        if let Err(err) = logging::init_logging(verbose) {
            logging::init_logging_stderr(verbose);
            tracing::warn!("log file unavailable, logging to stderr: {err:#}");
        }
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Rename {
                input,
                output,
                min_delay,
                max_delay,
            } => {
                let cfg = cfg.with_overrides(min_delay, max_delay, cli.verbose);
                run_rename(cfg, &input, &output).await
            }
            CliCommand::Inspect { filenames } => run_inspect(&cfg, &filenames),
            CliCommand::Completions { .. } | CliCommand::Manpage => Ok(0),
        }
    }
}

#[cfg(test)]
mod tests;
