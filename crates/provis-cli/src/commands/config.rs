//! Config command implementation.

use crate::cli::ConfigCommand;
use crate::config::CliConfig;
use crate::output::{info, success};

/// Runs a config command.
///
/// # Errors
///
/// Returns an error for unknown keys or if the file cannot be
/// written.
pub fn run_config(command: ConfigCommand, config: &mut CliConfig) -> crate::CliResult<()> {
    match command {
        ConfigCommand::Show => {
            info(&format!("endpoint: {}", config.endpoint));
            info(&format!(
                "token: {}",
                if config.token.is_some() { "set" } else { "unset" }
            ));
            info(&format!("audit_dir: {}", config.audit_dir));
            info(&format!("creator: {}", config.creator));
            Ok(())
        }
        ConfigCommand::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            success(&format!("Set {key}"));
            Ok(())
        }
    }
}
