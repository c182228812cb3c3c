//! Sensitive string material.
//!
//! Generated temporary passwords and secret access keys grant real
//! access; they must never reach logs or serialized reports by
//! accident. [`SecretString`] redacts itself in `Debug` and `Display`
//! and does not implement `Serialize`; the wrapped value is reachable
//! only through an explicit [`SecretString::expose`] call.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// A string holding secret material.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretString(String);

impl SecretString {
    /// Wraps secret material.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the wrapped value.
    ///
    /// Call sites of this method are the complete set of places secret
    /// material can leave the wrapper; keep them few and deliberate.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the length of the wrapped value in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns whether the wrapped value is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretString([redacted])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[redacted]")
    }
}

// Deserialize only: secrets arrive from the backend (access-key
// responses) but are never serialized back out by this crate.
impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_is_redacted() {
        let secret = SecretString::new("hunter2");
        assert_eq!(format!("{secret:?}"), "SecretString([redacted])");
    }

    #[test]
    fn display_is_redacted() {
        let secret = SecretString::new("hunter2");
        assert_eq!(secret.to_string(), "[redacted]");
    }

    #[test]
    fn expose_returns_wrapped_value() {
        let secret = SecretString::new("hunter2");
        assert_eq!(secret.expose(), "hunter2");
        assert_eq!(secret.len(), 7);
        assert!(!secret.is_empty());
    }

    #[test]
    fn deserializes_from_plain_string() {
        let secret: SecretString = serde_json::from_str("\"wJalrXUtnFEMI\"").unwrap();
        assert_eq!(secret.expose(), "wJalrXUtnFEMI");
    }
}
