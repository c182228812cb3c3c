//! Batch document.
//!
//! A batch is one execution of the provisioner over a full document:
//! an ordered `groups` sequence followed by an ordered `users`
//! sequence. Order is caller-significant: a group referenced by a
//! user must appear earlier in the same batch or already exist.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use provis_core::Error;

use crate::{GroupSpec, UserSpec};

/// A declarative batch of groups and users to provision.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct BatchSpec {
    /// Groups to provision, in order.
    #[serde(default)]
    pub groups: Vec<GroupSpec>,

    /// Users to provision, in order.
    #[serde(default)]
    pub users: Vec<UserSpec>,
}

impl BatchSpec {
    /// Creates an empty batch.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            groups: Vec::new(),
            users: Vec::new(),
        }
    }

    /// Adds a group spec.
    #[must_use]
    pub fn with_group(mut self, group: GroupSpec) -> Self {
        self.groups.push(group);
        self
    }

    /// Adds a user spec.
    #[must_use]
    pub fn with_user(mut self, user: UserSpec) -> Self {
        self.users.push(user);
        self
    }

    /// Parses a batch document from JSON.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the document is malformed.
    pub fn from_json(document: &str) -> provis_core::Result<Self> {
        Ok(serde_json::from_str(document)?)
    }

    /// Validates the document before any entity is processed.
    ///
    /// Usernames and group names must be unique within the batch; a
    /// duplicate entry would otherwise surface as a spurious conflict
    /// against a sibling from the same document.
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the first duplicate found.
    pub fn validate(&self) -> provis_core::Result<()> {
        let mut seen_groups = HashSet::new();
        for group in &self.groups {
            if !group.name.is_empty() && !seen_groups.insert(group.name.as_str()) {
                return Err(Error::Config(format!(
                    "duplicate group '{}' in batch document",
                    group.name
                )));
            }
        }

        let mut seen_users = HashSet::new();
        for user in &self.users {
            if !user.username.is_empty() && !seen_users.insert(user.username.as_str()) {
                return Err(Error::Config(format!(
                    "duplicate user '{}' in batch document",
                    user.username
                )));
            }
        }

        Ok(())
    }

    /// Returns whether the batch contains no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.users.is_empty()
    }
}
