//! In-memory directory implementation.
//!
//! Used by the test suites in place of a real backend. Keeps enough
//! state to answer the inspection queries tests need (memberships,
//! attachments, issued credentials) and supports injecting failures
//! for specific policy identifiers or whole operation classes.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use parking_lot::RwLock;
use provis_model::{AccessKeyPair, CallerIdentity, GroupRecord, SecretString, Tag, UserRecord};

use crate::client::DirectoryClient;
use crate::error::{BackendError, BackendResult};

const ACCOUNT: &str = "000000000000";

struct StoredUser {
    record: UserRecord,
    tags: Vec<Tag>,
    groups: Vec<String>,
    attached_policies: Vec<String>,
    inline_policies: HashMap<String, serde_json::Value>,
    login_profile: Option<bool>,
    access_key_ids: Vec<String>,
}

struct StoredGroup {
    record: GroupRecord,
    attached_policies: Vec<String>,
}

#[derive(Default)]
struct DirectoryState {
    users: HashMap<String, StoredUser>,
    groups: HashMap<String, StoredGroup>,
    rejected_policies: HashSet<String>,
    fail_login_profiles: bool,
    fail_access_keys: bool,
    fail_identity: bool,
    key_counter: u64,
}

/// In-memory implementation of [`DirectoryClient`].
#[derive(Default)]
pub struct InMemoryDirectory {
    state: RwLock<DirectoryState>,
}

impl InMemoryDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes attachment calls for the given policy identifier fail
    /// with access denied.
    pub fn reject_policy(&self, policy: impl Into<String>) {
        self.state.write().rejected_policies.insert(policy.into());
    }

    /// Makes login profile creation fail.
    pub fn fail_login_profiles(&self) {
        self.state.write().fail_login_profiles = true;
    }

    /// Makes access-key issuance fail.
    pub fn fail_access_keys(&self) {
        self.state.write().fail_access_keys = true;
    }

    /// Makes session identity lookups fail, simulating bad
    /// credentials.
    pub fn fail_caller_identity(&self) {
        self.state.write().fail_identity = true;
    }

    /// Number of users in the directory.
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.state.read().users.len()
    }

    /// Number of groups in the directory.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.state.read().groups.len()
    }

    /// Groups a user is a member of, in join order.
    #[must_use]
    pub fn user_groups(&self, username: &str) -> Vec<String> {
        self.state
            .read()
            .users
            .get(username)
            .map(|u| u.groups.clone())
            .unwrap_or_default()
    }

    /// Managed policies attached to a user, in attachment order.
    #[must_use]
    pub fn user_attached_policies(&self, username: &str) -> Vec<String> {
        self.state
            .read()
            .users
            .get(username)
            .map(|u| u.attached_policies.clone())
            .unwrap_or_default()
    }

    /// Names of inline policies on a user.
    #[must_use]
    pub fn user_inline_policy_names(&self, username: &str) -> Vec<String> {
        self.state
            .read()
            .users
            .get(username)
            .map(|u| u.inline_policies.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Tags recorded on a user at creation.
    #[must_use]
    pub fn user_tags(&self, username: &str) -> Vec<Tag> {
        self.state
            .read()
            .users
            .get(username)
            .map(|u| u.tags.clone())
            .unwrap_or_default()
    }

    /// Managed policies attached to a group, in attachment order.
    #[must_use]
    pub fn group_attached_policies(&self, name: &str) -> Vec<String> {
        self.state
            .read()
            .groups
            .get(name)
            .map(|g| g.attached_policies.clone())
            .unwrap_or_default()
    }

    /// Whether a user has a console login profile.
    #[must_use]
    pub fn has_login_profile(&self, username: &str) -> bool {
        self.state
            .read()
            .users
            .get(username)
            .is_some_and(|u| u.login_profile.is_some())
    }

    /// Number of access keys issued to a user.
    #[must_use]
    pub fn access_key_count(&self, username: &str) -> usize {
        self.state
            .read()
            .users
            .get(username)
            .map(|u| u.access_key_ids.len())
            .unwrap_or_default()
    }
}

fn user_arn(path: &str, username: &str) -> String {
    format!("arn:directory::{ACCOUNT}:user{path}{username}")
}

fn group_arn(path: &str, name: &str) -> String {
    format!("arn:directory::{ACCOUNT}:group{path}{name}")
}

#[async_trait::async_trait]
impl DirectoryClient for InMemoryDirectory {
    async fn get_user(&self, username: &str) -> BackendResult<Option<UserRecord>> {
        Ok(self
            .state
            .read()
            .users
            .get(username)
            .map(|u| u.record.clone()))
    }

    async fn get_group(&self, name: &str) -> BackendResult<Option<GroupRecord>> {
        Ok(self
            .state
            .read()
            .groups
            .get(name)
            .map(|g| g.record.clone()))
    }

    async fn create_user(&self, username: &str, path: &str, tags: &[Tag]) -> BackendResult<UserRecord> {
        let mut state = self.state.write();
        if state.users.contains_key(username) {
            return Err(BackendError::already_exists("user", username));
        }

        let record = UserRecord {
            username: username.to_string(),
            arn: user_arn(path, username),
            created_at: Utc::now(),
        };
        state.users.insert(
            username.to_string(),
            StoredUser {
                record: record.clone(),
                tags: tags.to_vec(),
                groups: Vec::new(),
                attached_policies: Vec::new(),
                inline_policies: HashMap::new(),
                login_profile: None,
                access_key_ids: Vec::new(),
            },
        );
        Ok(record)
    }

    async fn create_group(&self, name: &str, path: &str) -> BackendResult<GroupRecord> {
        let mut state = self.state.write();
        if state.groups.contains_key(name) {
            return Err(BackendError::already_exists("group", name));
        }

        let record = GroupRecord {
            name: name.to_string(),
            arn: group_arn(path, name),
            created_at: Utc::now(),
        };
        state.groups.insert(
            name.to_string(),
            StoredGroup {
                record: record.clone(),
                attached_policies: Vec::new(),
            },
        );
        Ok(record)
    }

    async fn add_user_to_group(&self, username: &str, group: &str) -> BackendResult<()> {
        let mut state = self.state.write();
        if !state.groups.contains_key(group) {
            return Err(BackendError::no_such_entity("group", group));
        }
        let user = state
            .users
            .get_mut(username)
            .ok_or_else(|| BackendError::no_such_entity("user", username))?;

        if !user.groups.iter().any(|g| g == group) {
            user.groups.push(group.to_string());
        }
        Ok(())
    }

    async fn attach_user_policy(&self, username: &str, policy_arn: &str) -> BackendResult<()> {
        let mut state = self.state.write();
        if state.rejected_policies.contains(policy_arn) {
            return Err(BackendError::AccessDenied(format!(
                "not authorized to attach {policy_arn}"
            )));
        }
        let user = state
            .users
            .get_mut(username)
            .ok_or_else(|| BackendError::no_such_entity("user", username))?;

        if !user.attached_policies.iter().any(|p| p == policy_arn) {
            user.attached_policies.push(policy_arn.to_string());
        }
        Ok(())
    }

    async fn attach_group_policy(&self, group: &str, policy_arn: &str) -> BackendResult<()> {
        let mut state = self.state.write();
        if state.rejected_policies.contains(policy_arn) {
            return Err(BackendError::AccessDenied(format!(
                "not authorized to attach {policy_arn}"
            )));
        }
        let stored = state
            .groups
            .get_mut(group)
            .ok_or_else(|| BackendError::no_such_entity("group", group))?;

        if !stored.attached_policies.iter().any(|p| p == policy_arn) {
            stored.attached_policies.push(policy_arn.to_string());
        }
        Ok(())
    }

    async fn create_login_profile(
        &self,
        username: &str,
        _password: &SecretString,
        reset_required: bool,
    ) -> BackendResult<()> {
        let mut state = self.state.write();
        if state.fail_login_profiles {
            return Err(BackendError::AccessDenied(
                "login profile creation denied".to_string(),
            ));
        }
        let user = state
            .users
            .get_mut(username)
            .ok_or_else(|| BackendError::no_such_entity("user", username))?;

        if user.login_profile.is_some() {
            return Err(BackendError::already_exists("login profile", username));
        }
        user.login_profile = Some(reset_required);
        Ok(())
    }

    async fn create_access_key(&self, username: &str) -> BackendResult<AccessKeyPair> {
        let mut state = self.state.write();
        if state.fail_access_keys {
            return Err(BackendError::AccessDenied(
                "access key issuance denied".to_string(),
            ));
        }
        state.key_counter += 1;
        let serial = state.key_counter;
        let user = state
            .users
            .get_mut(username)
            .ok_or_else(|| BackendError::no_such_entity("user", username))?;

        let access_key_id = format!("AKID{serial:016}");
        user.access_key_ids.push(access_key_id.clone());
        Ok(AccessKeyPair {
            access_key_id,
            secret_access_key: SecretString::new(format!("secret{serial:032}")),
        })
    }

    async fn put_user_inline_policy(
        &self,
        username: &str,
        policy_name: &str,
        document: &serde_json::Value,
    ) -> BackendResult<()> {
        let mut state = self.state.write();
        if state.rejected_policies.contains(policy_name) {
            return Err(BackendError::AccessDenied(format!(
                "not authorized to put {policy_name}"
            )));
        }
        let user = state
            .users
            .get_mut(username)
            .ok_or_else(|| BackendError::no_such_entity("user", username))?;

        user.inline_policies
            .insert(policy_name.to_string(), document.clone());
        Ok(())
    }

    async fn caller_identity(&self) -> BackendResult<CallerIdentity> {
        let state = self.state.read();
        if state.fail_identity {
            return Err(BackendError::AccessDenied(
                "invalid session credentials".to_string(),
            ));
        }
        Ok(CallerIdentity {
            account: ACCOUNT.to_string(),
            arn: user_arn("/", "provisioner"),
            user_id: "PROVISIONER".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_and_get_user() {
        let directory = InMemoryDirectory::new();
        let tags = vec![Tag::new("department", "Engineering")];

        let record = directory.create_user("alice", "/", &tags).await.unwrap();
        assert_eq!(record.arn, "arn:directory::000000000000:user/alice");

        let fetched = directory.get_user("alice").await.unwrap().unwrap();
        assert_eq!(fetched.username, "alice");
        assert_eq!(directory.user_tags("alice").len(), 1);
    }

    #[tokio::test]
    async fn duplicate_user_is_a_conflict() {
        let directory = InMemoryDirectory::new();
        directory.create_user("alice", "/", &[]).await.unwrap();

        let err = directory.create_user("alice", "/", &[]).await.unwrap_err();
        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn missing_user_reads_as_none() {
        let directory = InMemoryDirectory::new();
        assert!(directory.get_user("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn membership_requires_both_entities() {
        let directory = InMemoryDirectory::new();
        directory.create_user("alice", "/", &[]).await.unwrap();

        let err = directory
            .add_user_to_group("alice", "devs")
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        directory.create_group("devs", "/").await.unwrap();
        directory.add_user_to_group("alice", "devs").await.unwrap();
        assert_eq!(directory.user_groups("alice"), vec!["devs"]);
    }

    #[tokio::test]
    async fn rejected_policy_is_denied() {
        let directory = InMemoryDirectory::new();
        directory.create_user("alice", "/", &[]).await.unwrap();
        directory.reject_policy("arn:directory::aws:policy/AdministratorAccess");

        let err = directory
            .attach_user_policy("alice", "arn:directory::aws:policy/AdministratorAccess")
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::AccessDenied(_)));
        assert!(directory.user_attached_policies("alice").is_empty());
    }

    #[tokio::test]
    async fn login_profile_is_single_use() {
        let directory = InMemoryDirectory::new();
        directory.create_user("alice", "/", &[]).await.unwrap();
        let password = SecretString::new("p4ssword!");

        directory
            .create_login_profile("alice", &password, true)
            .await
            .unwrap();
        assert!(directory.has_login_profile("alice"));

        let err = directory
            .create_login_profile("alice", &password, true)
            .await
            .unwrap_err();
        assert!(err.is_already_exists());
    }

    #[tokio::test]
    async fn access_keys_are_unique() {
        let directory = InMemoryDirectory::new();
        directory.create_user("alice", "/", &[]).await.unwrap();

        let first = directory.create_access_key("alice").await.unwrap();
        let second = directory.create_access_key("alice").await.unwrap();
        assert_ne!(first.access_key_id, second.access_key_id);
        assert_eq!(directory.access_key_count("alice"), 2);
    }

    #[tokio::test]
    async fn identity_failure_simulates_bad_credentials() {
        let directory = InMemoryDirectory::new();
        assert!(directory.caller_identity().await.is_ok());

        directory.fail_caller_identity();
        assert!(directory.caller_identity().await.is_err());
    }
}
