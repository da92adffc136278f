use std::fs;

use tablesight_engine::engine::EngineConfig;

use crate::error::CliError;

/// Loads the engine configuration: defaults, or a TOML file where any
/// subset of fields may be overridden.
pub fn load_config(path: Option<&str>) -> Result<EngineConfig, CliError> {
    match path {
        None => Ok(EngineConfig::default()),
        Some(path) => {
            let text = fs::read_to_string(path)?;
            toml::from_str(&text).map_err(|e| CliError::Config(format!("{path}: {e}")))
        }
    }
}
