//! Cfg command handler: prints the effective engine configuration.

use std::io::Write;

use crate::config::load_config;
use crate::error::CliError;

pub fn handle_cfg_command(config: Option<&str>, out: &mut dyn Write) -> Result<(), CliError> {
    let config = load_config(config)?;
    let text =
        toml::to_string(&config).map_err(|e| CliError::Config(format!("serialize: {e}")))?;
    write!(out, "{}", text)?;
    Ok(())
}
