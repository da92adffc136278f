//! # Tablesight CLI Library
//!
//! Command-line interface for the tablesight engine: replay recorded
//! detector frames, look up basic-strategy advice, and inspect the
//! engine configuration. Live video transport stays outside this tool;
//! it works from recordings only.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses
//! command-line arguments and executes the appropriate subcommand.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["tablesight", "advise", "--hand", "8C,8D", "--dealer", "5H"];
//! let code = tablesight_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `replay`: Drive the engine over a JSONL frame recording
//! - `advise`: Basic-strategy lookup for a hand vs. a dealer up-card
//! - `cfg`: Display the effective engine configuration

use clap::Parser;
use std::io::Write;

pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;

use cli::{Commands, TablesightCli};
use commands::{handle_advise_command, handle_cfg_command, handle_replay_command};
pub use error::CliError;

/// Parses command-line arguments and dispatches to the matching
/// subcommand handler.
///
/// Returns the process exit code: [`exit_code::SUCCESS`] on success,
/// [`exit_code::ERROR`] for argument or execution failures. Help and
/// version requests print to `out` and exit successfully.
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match TablesightCli::try_parse_from(&argv) {
        Err(e) => {
            use clap::error::ErrorKind;
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        exit_code::ERROR
                    } else {
                        exit_code::SUCCESS
                    }
                }
                _ => {
                    let _ = writeln!(err, "{}", e);
                    exit_code::ERROR
                }
            };
        }
        Ok(cli) => cli,
    };

    let result = match cli.cmd {
        Commands::Replay {
            input,
            config,
            decks_remaining,
        } => handle_replay_command(&input, config.as_deref(), decks_remaining, out, err),
        Commands::Advise { hand, dealer } => handle_advise_command(&hand, &dealer, out),
        Commands::Cfg { config } => handle_cfg_command(config.as_deref(), out),
    };
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            let _ = writeln!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}
