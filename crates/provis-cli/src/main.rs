//! # provis
//!
//! Command-line batch runner for identity provisioning.

#![forbid(unsafe_code)]
#![deny(warnings)]
#![allow(clippy::uninlined_format_args)]

use clap::Parser;
use provis_cli::{
    cli::{Cli, Command},
    commands::{run_apply, run_config, run_password, run_status},
    config::CliConfig,
    output::error,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // The subscriber is owned here, by the process entry point; the
    // library crates only emit events.
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match CliConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error(&format!("Failed to load configuration: {}", e));
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Apply(args) => {
            run_apply(
                args,
                &config,
                cli.endpoint.as_deref(),
                cli.token.as_deref(),
                cli.output,
            )
            .await
        }
        Command::Status => {
            run_status(
                &config,
                cli.endpoint.as_deref(),
                cli.token.as_deref(),
                cli.output,
            )
            .await
        }
        Command::Password { length } => run_password(length),
        Command::Config(cmd) => run_config(cmd, &mut config),
    };

    if let Err(e) = result {
        error(&e.to_string());
        std::process::exit(1);
    }
}
