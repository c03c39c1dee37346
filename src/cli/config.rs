//! `taskboard config` command

use crate::error::Result;
use crate::storage::config::{self, Config};

/// Print the effective configuration
pub fn execute(config: &Config) -> Result<()> {
    print!("{}", config::to_toml(config)?);
    Ok(())
}
