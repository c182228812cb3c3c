//! CLI configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    /// Backend endpoint URL (e.g., http://localhost:8080).
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token for the backend session.
    #[serde(default)]
    pub token: Option<String>,

    /// Directory audit log files are written to.
    #[serde(default = "default_audit_dir")]
    pub audit_dir: String,

    /// Creator recorded in user creation tags.
    #[serde(default = "default_creator")]
    pub creator: String,
}

fn default_endpoint() -> String {
    "http://localhost:8080".to_string()
}

fn default_audit_dir() -> String {
    "logs".to_string()
}

fn default_creator() -> String {
    "provis".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            audit_dir: default_audit_dir(),
            creator: default_creator(),
        }
    }
}

impl CliConfig {
    /// Loads configuration from file, falling back to defaults when no
    /// file exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or
    /// parsed.
    pub fn load() -> crate::CliResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Self = toml::from_str(&content)
                .map_err(|e| crate::CliError::Config(format!("failed to parse config: {e}")))?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves configuration to file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self) -> crate::CliResult<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::CliError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// Gets the configuration file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn config_path() -> crate::CliResult<PathBuf> {
        let home = dirs_next::home_dir().ok_or_else(|| {
            crate::CliError::Config("could not determine home directory".to_string())
        })?;
        Ok(home.join(".provis").join("provis.toml"))
    }

    /// Gets the effective endpoint (from args or config).
    #[must_use]
    pub fn effective_endpoint(&self, arg_endpoint: Option<&str>) -> String {
        arg_endpoint
            .map(ToString::to_string)
            .unwrap_or_else(|| self.endpoint.clone())
    }

    /// Gets the effective token (from args or config).
    #[must_use]
    pub fn effective_token(&self, arg_token: Option<&str>) -> Option<String> {
        arg_token.map(ToString::to_string).or_else(|| self.token.clone())
    }

    /// Sets a configuration value by key.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown key.
    pub fn set(&mut self, key: &str, value: &str) -> crate::CliResult<()> {
        match key {
            "endpoint" => self.endpoint = value.to_string(),
            "token" => self.token = Some(value.to_string()),
            "audit_dir" => self.audit_dir = value.to_string(),
            "creator" => self.creator = value.to_string(),
            other => {
                return Err(crate::CliError::InvalidArgument(format!(
                    "unknown configuration key '{other}'"
                )));
            }
        }
        Ok(())
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
    /// Quiet (minimal output).
    Quiet,
}
