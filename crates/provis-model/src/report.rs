//! Provisioning results and the batch report.
//!
//! Every entity processed in a batch produces exactly one outcome. A
//! user is only ever reported as created when the backend confirmed
//! the creation; everything else is a failure carrying the subject
//! name and a reason.

use chrono::{DateTime, Utc};
use serde::Serialize;

use provis_core::AuditLog;

use crate::{AccessKeyPair, SecretString};

/// A successfully provisioned user.
///
/// The capability flags record what was actually granted, which may be
/// less than what the spec requested when secondary steps failed.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedUser {
    /// Username.
    pub username: String,
    /// Backend resource identifier (ARN).
    pub arn: String,
    /// When the backend created the user.
    pub created_at: DateTime<Utc>,
    /// Whether a console login profile was created.
    pub console_access: bool,
    /// Whether an access-key pair was issued.
    pub programmatic_access: bool,
    /// Whether the MFA enforcement policy was attached.
    pub mfa_required: bool,
    /// Generated temporary console password, if console access was
    /// granted. Never serialized.
    #[serde(skip_serializing)]
    pub temporary_password: Option<SecretString>,
    /// Issued access-key pair, if programmatic access was granted.
    /// The secret half is never serialized.
    pub access_key: Option<AccessKeyPair>,
}

impl CreatedUser {
    /// Creates a record for a confirmed user with no capabilities
    /// granted yet.
    #[must_use]
    pub fn new(username: impl Into<String>, arn: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            username: username.into(),
            arn: arn.into(),
            created_at,
            console_access: false,
            programmatic_access: false,
            mfa_required: false,
            temporary_password: None,
            access_key: None,
        }
    }
}

/// A user that could not be provisioned.
#[derive(Debug, Clone, Serialize)]
pub struct FailedUser {
    /// Username from the spec (may be empty for a spec that failed
    /// validation).
    pub username: String,
    /// Why provisioning failed.
    pub reason: String,
}

impl FailedUser {
    /// Creates a failure record.
    #[must_use]
    pub fn new(username: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            reason: reason.into(),
        }
    }
}

/// Outcome of provisioning a single user.
#[derive(Debug, Clone)]
pub enum UserOutcome {
    /// The backend confirmed creation.
    Created(CreatedUser),
    /// Provisioning failed; the user was not created (or already
    /// existed).
    Failed(FailedUser),
}

impl UserOutcome {
    /// Returns whether the user was created.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }

    /// Returns the subject username.
    #[must_use]
    pub fn username(&self) -> &str {
        match self {
            Self::Created(user) => &user.username,
            Self::Failed(user) => &user.username,
        }
    }
}

/// A group confirmed to exist after processing.
#[derive(Debug, Clone, Serialize)]
pub struct CreatedGroup {
    /// Group name.
    pub name: String,
    /// Backend resource identifier (ARN).
    pub arn: String,
    /// Whether the group already existed before this run. An existing
    /// group is success, not failure, and is never mutated.
    pub already_exists: bool,
}

/// Outcome of provisioning a single group.
#[derive(Debug, Clone)]
pub enum GroupOutcome {
    /// The group exists (created now or already present).
    Created(CreatedGroup),
    /// The group could not be created.
    Failed {
        /// Group name from the spec.
        name: String,
        /// Why provisioning failed.
        reason: String,
    },
}

impl GroupOutcome {
    /// Returns whether the group exists after processing.
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self, Self::Created(_))
    }
}

/// Aggregated results of one batch run.
///
/// Created fresh per run and returned to the caller; only the audit
/// log is ever persisted.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    /// Users the backend confirmed.
    pub successful_users: Vec<CreatedUser>,
    /// Users that could not be provisioned.
    pub failed_users: Vec<FailedUser>,
    /// Groups that exist after the run (created or pre-existing).
    pub created_groups: Vec<CreatedGroup>,
    /// Ordered audit trail, one entry per attempted action.
    pub audit_log: AuditLog,
}

impl BatchReport {
    /// Creates an empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of users processed.
    #[must_use]
    pub fn total_users(&self) -> usize {
        self.successful_users.len() + self.failed_users.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn created_user_starts_with_no_capabilities() {
        let user = CreatedUser::new("alice", "arn:directory::0:user/alice", Utc::now());

        assert!(!user.console_access);
        assert!(!user.programmatic_access);
        assert!(!user.mfa_required);
        assert!(user.temporary_password.is_none());
        assert!(user.access_key.is_none());
    }

    #[test]
    fn temporary_password_is_not_serialized() {
        let mut user = CreatedUser::new("alice", "arn:directory::0:user/alice", Utc::now());
        user.console_access = true;
        user.temporary_password = Some(SecretString::new("s3cret-p4ssword!"));

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("s3cret-p4ssword!"));
        assert!(!json.contains("temporary_password"));
    }

    #[test]
    fn outcome_reports_subject() {
        let created = UserOutcome::Created(CreatedUser::new(
            "alice",
            "arn:directory::0:user/alice",
            Utc::now(),
        ));
        let failed = UserOutcome::Failed(FailedUser::new("bob", "user bob already exists"));

        assert!(created.is_created());
        assert_eq!(created.username(), "alice");
        assert!(!failed.is_created());
        assert_eq!(failed.username(), "bob");
    }

    #[test]
    fn report_counts_users() {
        let mut report = BatchReport::new();
        report
            .successful_users
            .push(CreatedUser::new("alice", "arn", Utc::now()));
        report.failed_users.push(FailedUser::new("bob", "conflict"));

        assert_eq!(report.total_users(), 2);
    }
}
