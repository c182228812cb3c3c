//! CLI argument parsing.

use clap::{Parser, Subcommand};

use crate::config::OutputFormat;

/// provis - declarative identity provisioning.
#[derive(Debug, Parser)]
#[command(name = "provis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Backend endpoint URL (overrides config).
    #[arg(short, long, env = "PROVIS_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Bearer token for the backend session (overrides config).
    #[arg(long, env = "PROVIS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Provision a batch document.
    Apply(ApplyArgs),

    /// Check that the backend session is usable.
    Status,

    /// Generate a console password.
    Password {
        /// Password length.
        #[arg(short, long, default_value = "16")]
        length: usize,
    },

    /// Configuration management.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Apply arguments.
#[derive(Debug, clap::Args)]
pub struct ApplyArgs {
    /// Batch document path.
    pub file: String,

    /// Directory for audit log files (overrides config).
    #[arg(long)]
    pub audit_dir: Option<String>,

    /// Creator recorded in user creation tags.
    #[arg(long)]
    pub creator: Option<String>,
}

/// Config commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },
}
