//! User spec.
//!
//! A [`UserSpec`] describes one user to provision: identity, profile
//! attributes recorded as tags, requested group memberships and policy
//! attachments, and the credential capabilities to grant. Specs are
//! read from the batch document and never mutated afterwards.

use serde::{Deserialize, Serialize};

use provis_core::Error;

/// Declarative description of a user to provision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSpec {
    /// Username, unique within a batch.
    pub username: String,

    /// Resource path prefix.
    #[serde(default = "default_path")]
    pub path: String,

    /// Department recorded as a creation tag.
    #[serde(default)]
    pub department: Option<String>,

    /// Role recorded as a creation tag.
    #[serde(default)]
    pub role: Option<String>,

    /// Groups the user should be added to.
    #[serde(default)]
    pub groups: Vec<String>,

    /// Managed policy identifiers to attach to the user.
    #[serde(default)]
    pub policies: Vec<String>,

    /// Whether to create a console login profile with a generated
    /// temporary password.
    #[serde(default)]
    pub console_access: bool,

    /// Whether to create a programmatic access-key pair.
    #[serde(default)]
    pub programmatic_access: bool,

    /// Whether to attach the MFA enforcement policy.
    #[serde(default)]
    pub require_mfa: bool,

    /// Whether the console password must be changed on first login.
    #[serde(default = "default_true")]
    pub force_password_change: bool,
}

fn default_path() -> String {
    "/".to_string()
}

const fn default_true() -> bool {
    true
}

impl UserSpec {
    /// Creates a spec with the given username and defaults for
    /// everything else.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            path: default_path(),
            department: None,
            role: None,
            groups: Vec::new(),
            policies: Vec::new(),
            console_access: false,
            programmatic_access: false,
            require_mfa: false,
            force_password_change: true,
        }
    }

    /// Sets the resource path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the department tag.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Sets the role tag.
    #[must_use]
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Adds a group membership request.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Adds a managed policy attachment request.
    #[must_use]
    pub fn with_policy(mut self, policy: impl Into<String>) -> Self {
        self.policies.push(policy.into());
        self
    }

    /// Requests a console login profile.
    #[must_use]
    pub const fn with_console_access(mut self, enabled: bool) -> Self {
        self.console_access = enabled;
        self
    }

    /// Requests a programmatic access-key pair.
    #[must_use]
    pub const fn with_programmatic_access(mut self, enabled: bool) -> Self {
        self.programmatic_access = enabled;
        self
    }

    /// Requests MFA enforcement.
    #[must_use]
    pub const fn with_require_mfa(mut self, enabled: bool) -> Self {
        self.require_mfa = enabled;
        self
    }

    /// Sets whether the console password must be changed on first login.
    #[must_use]
    pub const fn with_force_password_change(mut self, enabled: bool) -> Self {
        self.force_password_change = enabled;
        self
    }

    /// Validates the spec.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the username is empty.
    pub fn validate(&self) -> provis_core::Result<()> {
        if self.username.is_empty() {
            return Err(Error::Validation("username is required".to_string()));
        }
        Ok(())
    }
}
