//! Group spec.

use serde::{Deserialize, Serialize};

use provis_core::Error;

/// Declarative description of a group to provision.
///
/// Groups are processed before users so that membership requests in
/// the same batch can resolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSpec {
    /// Group name.
    pub name: String,

    /// Resource path prefix.
    #[serde(default = "default_path")]
    pub path: String,

    /// Managed policy identifiers to attach to the group.
    #[serde(default)]
    pub policies: Vec<String>,
}

fn default_path() -> String {
    "/".to_string()
}

impl GroupSpec {
    /// Creates a spec with the given name and defaults.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: default_path(),
            policies: Vec::new(),
        }
    }

    /// Sets the resource path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Adds a managed policy attachment request.
    #[must_use]
    pub fn with_policy(mut self, policy: impl Into<String>) -> Self {
        self.policies.push(policy.into());
        self
    }

    /// Validates the spec.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the group name is empty.
    pub fn validate(&self) -> provis_core::Result<()> {
        if self.name.is_empty() {
            return Err(Error::Validation("group name is required".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_spec_has_defaults() {
        let spec = GroupSpec::new("devs");

        assert_eq!(spec.name, "devs");
        assert_eq!(spec.path, "/");
        assert!(spec.policies.is_empty());
    }

    #[test]
    fn empty_name_fails_validation() {
        assert!(GroupSpec::new("").validate().is_err());
        assert!(GroupSpec::new("devs").validate().is_ok());
    }

    #[test]
    fn deserializes_with_defaults() {
        let spec: GroupSpec = serde_json::from_str(r#"{"name": "devs"}"#).unwrap();

        assert_eq!(spec.name, "devs");
        assert_eq!(spec.path, "/");
    }
}
