//! # provis-cli
//!
//! Command-line batch runner for identity provisioning:
//! - `apply` - provision a declarative batch document and write the
//!   audit log
//! - `status` - confirm the backend session is usable
//! - `password` - generate one console password
//! - `config` - manage the CLI configuration file

#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(missing_docs)]
#![allow(clippy::uninlined_format_args)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
