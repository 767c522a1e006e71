//! Print the resolved configuration

use crate::config::Config;
use crate::error::Result;

/// Render the configuration as pretty JSON
pub fn render(config: &Config) -> Result<String> {
    Ok(serde_json::to_string_pretty(config)?)
}

pub fn run(config: &Config) -> Result<()> {
    println!("{}", render(config)?);
    Ok(())
}
