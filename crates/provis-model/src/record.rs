//! Records returned by the identity backend.
//!
//! These are the backend's confirmations: what actually exists after a
//! create or lookup call, as opposed to the specs which describe what
//! was requested.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::SecretString;

/// A key-value tag attached to a resource at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag key.
    pub key: String,
    /// Tag value.
    pub value: String,
}

impl Tag {
    /// Creates a tag.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A user as confirmed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    /// Username.
    pub username: String,
    /// Backend resource identifier (ARN).
    pub arn: String,
    /// When the backend created the user.
    pub created_at: DateTime<Utc>,
}

/// A group as confirmed by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Group name.
    pub name: String,
    /// Backend resource identifier (ARN).
    pub arn: String,
    /// When the backend created the group.
    pub created_at: DateTime<Utc>,
}

/// A programmatic access-key pair issued by the backend.
///
/// The secret half is only ever readable through
/// [`SecretString::expose`] and is skipped when the pair is
/// serialized into reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessKeyPair {
    /// Public key identifier.
    pub access_key_id: String,
    /// Secret key material.
    #[serde(skip_serializing)]
    pub secret_access_key: SecretString,
}

/// The identity behind the backend session.
///
/// Fetched once at startup to confirm the session is usable before any
/// provisioning begins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallerIdentity {
    /// Account the session belongs to.
    pub account: String,
    /// Resource identifier of the calling principal.
    pub arn: String,
    /// Opaque principal identifier.
    pub user_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_key_secret_is_not_serialized() {
        let pair = AccessKeyPair {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: SecretString::new("wJalrXUtnFEMI"),
        };

        let json = serde_json::to_string(&pair).unwrap();
        assert!(json.contains("AKIDEXAMPLE"));
        assert!(!json.contains("wJalrXUtnFEMI"));
    }

    #[test]
    fn access_key_deserializes_both_halves() {
        let pair: AccessKeyPair = serde_json::from_str(
            r#"{"access_key_id": "AKIDEXAMPLE", "secret_access_key": "wJalrXUtnFEMI"}"#,
        )
        .unwrap();

        assert_eq!(pair.access_key_id, "AKIDEXAMPLE");
        assert_eq!(pair.secret_access_key.expose(), "wJalrXUtnFEMI");
    }

    #[test]
    fn tag_construction() {
        let tag = Tag::new("department", "Engineering");
        assert_eq!(tag.key, "department");
        assert_eq!(tag.value, "Engineering");
    }
}
