//! The provisioning workflow.
//!
//! A [`Provisioner`] wraps a directory client and turns declarative
//! specs into per-entity outcomes. Failure semantics:
//!
//! - A failed primary create converts to a failure outcome; nothing
//!   escapes the per-entity boundary, and siblings keep processing.
//! - Secondary steps (memberships, managed policy attachments, MFA)
//!   are best-effort: a failure is logged and the capability is simply
//!   absent from the result.
//! - Credential issuance (login profile, access keys) is not
//!   best-effort: the user was asked for credentials, so a failure
//!   there fails the user.
//! - An existing group is idempotent success and is never mutated; an
//!   existing user is a conflict failure and is never mutated.

use chrono::Utc;
use provis_backend::DirectoryClient;
use provis_core::{AuditAction, AuditEntry};
use provis_model::{
    BatchReport, BatchSpec, CreatedGroup, CreatedUser, FailedUser, GroupOutcome, GroupSpec, Tag,
    UserOutcome, UserSpec,
};

use crate::mfa;
use crate::password::{generate_password, DEFAULT_PASSWORD_LENGTH};

/// Tag value recorded when a spec omits department or role.
const UNKNOWN_TAG_VALUE: &str = "unknown";

/// Orchestrates provisioning against an identity backend.
pub struct Provisioner<C> {
    directory: C,
    creator: String,
}

impl<C: DirectoryClient> Provisioner<C> {
    /// Creates a provisioner over the given directory client.
    #[must_use]
    pub fn new(directory: C) -> Self {
        Self {
            directory,
            creator: "provis".to_string(),
        }
    }

    /// Sets the creator recorded in user creation tags.
    #[must_use]
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }

    /// Returns the underlying directory client.
    #[must_use]
    pub fn directory(&self) -> &C {
        &self.directory
    }

    /// Confirms the backend session is usable.
    ///
    /// Called once before any provisioning; a failure here aborts the
    /// run.
    ///
    /// # Errors
    ///
    /// Returns a fatal setup error if the identity lookup fails.
    pub async fn verify_session(&self) -> provis_core::Result<provis_model::CallerIdentity> {
        self.directory
            .caller_identity()
            .await
            .map_err(|e| provis_core::Error::Setup(format!("backend session is not usable: {e}")))
    }

    /// Ensures a group exists, creating it if necessary.
    ///
    /// An already-existing group is success with `already_exists` set,
    /// and the repeat call never touches the group's policies.
    pub async fn create_group(&self, spec: &GroupSpec) -> GroupOutcome {
        if let Err(e) = spec.validate() {
            return GroupOutcome::Failed {
                name: spec.name.clone(),
                reason: e.to_string(),
            };
        }
        let name = &spec.name;

        match self.directory.get_group(name).await {
            Ok(Some(existing)) => {
                tracing::info!(group = %name, "group already exists, leaving it untouched");
                return GroupOutcome::Created(CreatedGroup {
                    name: name.clone(),
                    arn: existing.arn,
                    already_exists: true,
                });
            }
            Ok(None) => {}
            Err(e) => {
                return GroupOutcome::Failed {
                    name: name.clone(),
                    reason: format!("failed to look up group {name}: {e}"),
                };
            }
        }

        let record = match self.directory.create_group(name, &spec.path).await {
            Ok(record) => record,
            Err(e) => {
                return GroupOutcome::Failed {
                    name: name.clone(),
                    reason: format!("failed to create group {name}: {e}"),
                };
            }
        };
        tracing::info!(group = %name, arn = %record.arn, "created group");

        for policy_arn in &spec.policies {
            match self.directory.attach_group_policy(name, policy_arn).await {
                Ok(()) => {
                    tracing::info!(group = %name, policy = %policy_arn, "attached policy to group");
                }
                Err(e) => {
                    tracing::warn!(
                        group = %name,
                        policy = %policy_arn,
                        error = %e,
                        "failed to attach policy to group"
                    );
                }
            }
        }

        GroupOutcome::Created(CreatedGroup {
            name: name.clone(),
            arn: record.arn,
            already_exists: false,
        })
    }

    /// Provisions a single user.
    ///
    /// Exactly one outcome per spec: either the backend confirmed the
    /// creation, or a failure carrying the subject name and reason.
    pub async fn create_user(&self, spec: &UserSpec) -> UserOutcome {
        if let Err(e) = spec.validate() {
            return UserOutcome::Failed(FailedUser::new(spec.username.clone(), e.to_string()));
        }
        let username = &spec.username;
        tracing::info!(user = %username, "creating user");

        // Existing users are a conflict, never a mutation target. This
        // is deliberately asymmetric with group handling.
        match self.directory.get_user(username).await {
            Ok(Some(_)) => {
                tracing::warn!(user = %username, "user already exists");
                return UserOutcome::Failed(FailedUser::new(
                    username.clone(),
                    format!("user {username} already exists"),
                ));
            }
            Ok(None) => {}
            Err(e) => {
                return UserOutcome::Failed(FailedUser::new(
                    username.clone(),
                    format!("failed to look up user {username}: {e}"),
                ));
            }
        }

        let tags = self.creation_tags(spec);
        let record = match self.directory.create_user(username, &spec.path, &tags).await {
            Ok(record) => record,
            Err(e) => {
                return UserOutcome::Failed(FailedUser::new(
                    username.clone(),
                    format!("failed to create user {username}: {e}"),
                ));
            }
        };
        let mut created = CreatedUser::new(record.username, record.arn, record.created_at);

        for group in &spec.groups {
            match self.directory.add_user_to_group(username, group).await {
                Ok(()) => {
                    tracing::info!(user = %username, group = %group, "added user to group");
                }
                Err(e) => {
                    tracing::warn!(
                        user = %username,
                        group = %group,
                        error = %e,
                        "failed to add user to group"
                    );
                }
            }
        }

        for policy_arn in &spec.policies {
            match self.directory.attach_user_policy(username, policy_arn).await {
                Ok(()) => {
                    tracing::info!(user = %username, policy = %policy_arn, "attached policy to user");
                }
                Err(e) => {
                    tracing::warn!(
                        user = %username,
                        policy = %policy_arn,
                        error = %e,
                        "failed to attach policy to user"
                    );
                }
            }
        }

        if spec.console_access {
            let password = generate_password(DEFAULT_PASSWORD_LENGTH);
            match self
                .directory
                .create_login_profile(username, &password, spec.force_password_change)
                .await
            {
                Ok(()) => {
                    created.console_access = true;
                    created.temporary_password = Some(password);
                }
                Err(e) => {
                    return UserOutcome::Failed(FailedUser::new(
                        username.clone(),
                        format!("failed to create login profile for {username}: {e}"),
                    ));
                }
            }
        }

        if spec.programmatic_access {
            match self.directory.create_access_key(username).await {
                Ok(pair) => {
                    created.programmatic_access = true;
                    created.access_key = Some(pair);
                }
                Err(e) => {
                    return UserOutcome::Failed(FailedUser::new(
                        username.clone(),
                        format!("failed to create access key for {username}: {e}"),
                    ));
                }
            }
        }

        if spec.require_mfa {
            let document = mfa::policy_document(username);
            match self
                .directory
                .put_user_inline_policy(username, &mfa::policy_name(username), &document)
                .await
            {
                Ok(()) => created.mfa_required = true,
                Err(e) => {
                    // Best-effort: the user stands, the capability is
                    // reported as not granted.
                    tracing::warn!(
                        user = %username,
                        error = %e,
                        "failed to attach MFA enforcement policy"
                    );
                }
            }
        }

        tracing::info!(user = %username, arn = %created.arn, "created user");
        UserOutcome::Created(created)
    }

    /// Runs a full batch: all groups first, then all users, in
    /// document order.
    ///
    /// Every entity processed appends exactly one audit entry,
    /// regardless of outcome.
    pub async fn run_batch(&self, batch: &BatchSpec) -> BatchReport {
        let mut report = BatchReport::new();

        for spec in &batch.groups {
            match self.create_group(spec).await {
                GroupOutcome::Created(group) => {
                    let detail = if group.already_exists {
                        "group already exists"
                    } else {
                        "group created"
                    };
                    report.audit_log.push(AuditEntry::success(
                        AuditAction::CreateGroup,
                        &group.name,
                        detail,
                    ));
                    report.created_groups.push(group);
                }
                GroupOutcome::Failed { name, reason } => {
                    tracing::error!(group = %name, %reason, "group provisioning failed");
                    report.audit_log.push(AuditEntry::failure(
                        AuditAction::CreateGroup,
                        name,
                        reason,
                    ));
                }
            }
        }

        for spec in &batch.users {
            match self.create_user(spec).await {
                UserOutcome::Created(user) => {
                    report.audit_log.push(AuditEntry::success(
                        AuditAction::CreateUser,
                        &user.username,
                        "user created",
                    ));
                    report.successful_users.push(user);
                }
                UserOutcome::Failed(failed) => {
                    tracing::error!(
                        user = %failed.username,
                        reason = %failed.reason,
                        "user provisioning failed"
                    );
                    report.audit_log.push(AuditEntry::failure(
                        AuditAction::CreateUser,
                        &failed.username,
                        &failed.reason,
                    ));
                    report.failed_users.push(failed);
                }
            }
        }

        report
    }

    fn creation_tags(&self, spec: &UserSpec) -> Vec<Tag> {
        vec![
            Tag::new("created-by", &self.creator),
            Tag::new("created-date", Utc::now().to_rfc3339()),
            Tag::new(
                "department",
                spec.department.as_deref().unwrap_or(UNKNOWN_TAG_VALUE),
            ),
            Tag::new("role", spec.role.as_deref().unwrap_or(UNKNOWN_TAG_VALUE)),
        ]
    }
}
