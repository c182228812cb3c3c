//! The identity backend capability trait.

use async_trait::async_trait;
use provis_model::{AccessKeyPair, CallerIdentity, GroupRecord, SecretString, Tag, UserRecord};

use crate::error::BackendResult;

/// Capability interface for the external identity backend.
///
/// One client is created per run and shared read-only; calls are
/// awaited strictly sequentially by the provisioner. Implementations
/// must be thread-safe.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Looks up a user by name.
    ///
    /// Returns `Ok(None)` if no such user exists; an `Err` means the
    /// lookup itself failed.
    async fn get_user(&self, username: &str) -> BackendResult<Option<UserRecord>>;

    /// Looks up a group by name.
    ///
    /// Returns `Ok(None)` if no such group exists.
    async fn get_group(&self, name: &str) -> BackendResult<Option<GroupRecord>>;

    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::AlreadyExists` if the username is taken.
    async fn create_user(&self, username: &str, path: &str, tags: &[Tag]) -> BackendResult<UserRecord>;

    /// Creates a group.
    ///
    /// # Errors
    ///
    /// Returns `BackendError::AlreadyExists` if the name is taken.
    async fn create_group(&self, name: &str, path: &str) -> BackendResult<GroupRecord>;

    /// Adds a user to a group.
    async fn add_user_to_group(&self, username: &str, group: &str) -> BackendResult<()>;

    /// Attaches a managed policy to a user.
    async fn attach_user_policy(&self, username: &str, policy_arn: &str) -> BackendResult<()>;

    /// Attaches a managed policy to a group.
    async fn attach_group_policy(&self, group: &str, policy_arn: &str) -> BackendResult<()>;

    /// Creates a console login profile with the given password.
    async fn create_login_profile(
        &self,
        username: &str,
        password: &SecretString,
        reset_required: bool,
    ) -> BackendResult<()>;

    /// Issues a programmatic access-key pair.
    async fn create_access_key(&self, username: &str) -> BackendResult<AccessKeyPair>;

    /// Puts an inline policy document on a user, replacing any
    /// existing policy of the same name.
    async fn put_user_inline_policy(
        &self,
        username: &str,
        policy_name: &str,
        document: &serde_json::Value,
    ) -> BackendResult<()>;

    /// Returns the identity behind this session.
    ///
    /// Called once at startup; failure here is fatal to the run.
    async fn caller_identity(&self) -> BackendResult<CallerIdentity>;
}
