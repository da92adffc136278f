//! Command handler modules.
//!
//! Each subcommand lives in its own file with the same shape: a public
//! `handle_COMMAND_command(...) -> Result<(), CliError>` taking its output
//! streams as `&mut dyn Write`, plus module-private helpers.

mod advise;
mod cfg;
mod replay;

pub use advise::handle_advise_command;
pub use cfg::handle_cfg_command;
pub use replay::handle_replay_command;
