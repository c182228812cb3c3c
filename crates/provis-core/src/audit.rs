//! Audit trail for provisioning runs.
//!
//! Every attempted provisioning action produces exactly one
//! [`AuditEntry`] recording the subject, the outcome, and a
//! human-readable detail. Entries are append-only and ordered by
//! creation time; the whole log is serialized to disk at the end of a
//! run. Entries record outcomes, never secret material.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of provisioning action an audit entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A user creation attempt.
    CreateUser,
    /// A group creation attempt.
    CreateGroup,
}

impl AuditAction {
    /// Returns the string representation used in serialized logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreateUser => "create_user",
            Self::CreateGroup => "create_group",
        }
    }
}

/// Outcome of an audited action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditOutcome {
    /// The action succeeded.
    Success,
    /// The action failed.
    Failure,
}

/// One immutable record of an attempted provisioning action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique entry identifier.
    pub id: Uuid,
    /// When the action was attempted.
    pub timestamp: DateTime<Utc>,
    /// The kind of action.
    pub action: AuditAction,
    /// Name of the entity the action targeted.
    pub subject: String,
    /// Whether the action succeeded.
    pub outcome: AuditOutcome,
    /// Human-readable detail (creation confirmation or error message).
    pub detail: String,
}

impl AuditEntry {
    /// Creates an entry for a successful action.
    #[must_use]
    pub fn success(action: AuditAction, subject: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(action, subject, AuditOutcome::Success, detail)
    }

    /// Creates an entry for a failed action.
    #[must_use]
    pub fn failure(action: AuditAction, subject: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(action, subject, AuditOutcome::Failure, detail)
    }

    fn new(
        action: AuditAction,
        subject: impl Into<String>,
        outcome: AuditOutcome,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            timestamp: Utc::now(),
            action,
            subject: subject.into(),
            outcome,
            detail: detail.into(),
        }
    }

    /// Returns whether the recorded action succeeded.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        matches!(self.outcome, AuditOutcome::Success)
    }
}

/// An append-only, ordered list of audit entries.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
}

impl AuditLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry to the log.
    pub fn push(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    /// Returns the entries in creation order.
    #[must_use]
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the log as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }
}
