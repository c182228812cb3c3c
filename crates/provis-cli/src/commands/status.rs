//! Status command implementation.

use provis_backend::{DirectoryClient, HttpDirectoryClient};

use crate::config::{CliConfig, OutputFormat};
use crate::output::{output_single, success};

/// Runs the status command: fetches the session identity and prints
/// it.
///
/// # Errors
///
/// Returns an error if the backend session is unusable.
pub async fn run_status(
    config: &CliConfig,
    endpoint: Option<&str>,
    token: Option<&str>,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let client = HttpDirectoryClient::new(
        config.effective_endpoint(endpoint),
        config.effective_token(token),
    )?;

    let identity = client.caller_identity().await?;

    success(&format!("Backend session is usable ({})", client.base_url()));
    output_single(&identity, format)?;
    Ok(())
}
