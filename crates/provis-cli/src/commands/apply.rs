//! Apply command implementation: the batch runner.

use std::path::{Path, PathBuf};

use chrono::Utc;
use provis_backend::HttpDirectoryClient;
use provis_engine::Provisioner;
use provis_model::{BatchReport, BatchSpec};
use tabled::Tabled;

use crate::cli::ApplyArgs;
use crate::config::{CliConfig, OutputFormat};
use crate::output::{info, output, success, warning};
use crate::CliError;

/// Row in the per-user summary table.
#[derive(Tabled, serde::Serialize)]
struct UserRow {
    #[tabled(rename = "USER")]
    username: String,
    #[tabled(rename = "ARN")]
    arn: String,
    #[tabled(rename = "CONSOLE")]
    console: bool,
    #[tabled(rename = "KEYS")]
    programmatic: bool,
    #[tabled(rename = "MFA")]
    mfa: bool,
}

/// Runs the apply command.
///
/// # Errors
///
/// Returns an error for a missing or malformed batch document, or
/// when the backend session cannot be validated. Per-entity failures
/// are reported in the summary and the audit log, not as an error.
pub async fn run_apply(
    args: ApplyArgs,
    config: &CliConfig,
    endpoint: Option<&str>,
    token: Option<&str>,
    format: OutputFormat,
) -> crate::CliResult<()> {
    let path = Path::new(&args.file);
    if !path.exists() {
        tracing::error!(file = %args.file, "batch document not found");
        return Err(CliError::Config(format!(
            "batch document '{}' not found",
            args.file
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let batch = BatchSpec::from_json(&content)
        .map_err(|e| CliError::Validation(format!("failed to parse batch document: {e}")))?;
    batch
        .validate()
        .map_err(|e| CliError::Validation(e.to_string()))?;

    info(&format!(
        "Provisioning {} group(s) and {} user(s) from '{}'...",
        batch.groups.len(),
        batch.users.len(),
        args.file
    ));

    let client = HttpDirectoryClient::new(
        config.effective_endpoint(endpoint),
        config.effective_token(token),
    )?;
    let creator = args.creator.unwrap_or_else(|| config.creator.clone());
    let provisioner = Provisioner::new(client).with_creator(creator);

    // Session check is the last gate before provisioning; a failure
    // here aborts before any entity is touched.
    let identity = provisioner.verify_session().await?;
    info(&format!("Authenticated as {}", identity.arn));

    let report = provisioner.run_batch(&batch).await;
    print_summary(&report, format)?;

    let audit_dir = args.audit_dir.as_deref().unwrap_or(&config.audit_dir);
    let audit_path = write_audit_log(&report, audit_dir)?;
    info(&format!("Audit log saved to {}", audit_path.display()));

    Ok(())
}

/// Prints the human-readable run summary.
fn print_summary(report: &BatchReport, format: OutputFormat) -> crate::CliResult<()> {
    println!();
    success(&format!(
        "{} user(s) provisioned, {} failed, {} group(s) processed",
        report.successful_users.len(),
        report.failed_users.len(),
        report.created_groups.len()
    ));

    for group in &report.created_groups {
        if group.already_exists {
            info(&format!("Group {} already existed", group.name));
        } else {
            info(&format!("Group {} created ({})", group.name, group.arn));
        }
    }

    let rows: Vec<UserRow> = report
        .successful_users
        .iter()
        .map(|user| UserRow {
            username: user.username.clone(),
            arn: user.arn.clone(),
            console: user.console_access,
            programmatic: user.programmatic_access,
            mfa: user.mfa_required,
        })
        .collect();
    if !rows.is_empty() {
        output(&rows, format)?;
    }

    for failed in &report.failed_users {
        warning(&format!("{}: {}", failed.username, failed.reason));
    }

    print_credentials(report);
    Ok(())
}

/// Prints issued credentials.
///
/// This is the single place generated secrets become visible; they are
/// not persisted anywhere, including the audit log.
fn print_credentials(report: &BatchReport) {
    let has_credentials = report
        .successful_users
        .iter()
        .any(|user| user.temporary_password.is_some() || user.access_key.is_some());
    if !has_credentials {
        return;
    }

    println!();
    warning("Issued credentials follow; store them now, they are not persisted.");
    for user in &report.successful_users {
        if let Some(password) = &user.temporary_password {
            println!("  {} temporary password: {}", user.username, password.expose());
        }
        if let Some(pair) = &user.access_key {
            println!("  {} access key id: {}", user.username, pair.access_key_id);
            println!(
                "  {} secret access key: {}",
                user.username,
                pair.secret_access_key.expose()
            );
        }
    }
}

/// Writes the audit log to a timestamped file under `dir`.
fn write_audit_log(report: &BatchReport, dir: &str) -> crate::CliResult<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let filename = format!("audit-{}.json", Utc::now().format("%Y%m%d-%H%M%S"));
    let path = Path::new(dir).join(filename);
    std::fs::write(&path, report.audit_log.to_json_pretty()?)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use provis_core::{AuditAction, AuditEntry};

    use super::*;

    #[test]
    fn audit_log_lands_in_a_timestamped_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut report = BatchReport::new();
        report
            .audit_log
            .push(AuditEntry::success(AuditAction::CreateUser, "alice", "user created"));

        let path = write_audit_log(&report, dir.path().to_str().unwrap()).unwrap();

        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("audit-"));
        assert!(name.ends_with(".json"));

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_batch_document_is_a_clean_error() {
        let config = CliConfig::default();
        let args = ApplyArgs {
            file: "/definitely/not/here/batch.json".to_string(),
            audit_dir: None,
            creator: None,
        };

        let err = run_apply(args, &config, None, None, OutputFormat::Quiet)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }
}
