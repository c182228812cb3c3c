//! REST client for the identity backend.

use std::time::Duration;

use provis_model::{AccessKeyPair, CallerIdentity, GroupRecord, SecretString, Tag, UserRecord};

use crate::client::DirectoryClient;
use crate::error::{BackendError, BackendResult};

/// HTTP client for a directory-style identity backend.
pub struct HttpDirectoryClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl HttpDirectoryClient {
    /// Creates a new client against the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns a connection error if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> BackendResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Gets the configured endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_optional<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> BackendResult<Option<T>> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        if response.status().as_u16() == 404 {
            return Ok(None);
        }
        handle_response(response).await.map(Some)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        let response = self.request(reqwest::Method::GET, path).send().await?;
        handle_response(response).await
    }

    async fn post_json<B: serde::Serialize, T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> BackendResult<T> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        handle_response(response).await
    }

    async fn post_empty<B: serde::Serialize>(&self, path: &str, body: &B) -> BackendResult<()> {
        let response = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        handle_empty_response(response).await
    }

    async fn put_empty<B: serde::Serialize>(&self, path: &str, body: &B) -> BackendResult<()> {
        let response = self
            .request(reqwest::Method::PUT, path)
            .json(body)
            .send()
            .await?;
        handle_empty_response(response).await
    }
}

#[async_trait::async_trait]
impl DirectoryClient for HttpDirectoryClient {
    async fn get_user(&self, username: &str) -> BackendResult<Option<UserRecord>> {
        self.get_optional(&format!("/v1/users/{}", urlencoding::encode(username)))
            .await
    }

    async fn get_group(&self, name: &str) -> BackendResult<Option<GroupRecord>> {
        self.get_optional(&format!("/v1/groups/{}", urlencoding::encode(name)))
            .await
    }

    async fn create_user(&self, username: &str, path: &str, tags: &[Tag]) -> BackendResult<UserRecord> {
        let body = serde_json::json!({
            "username": username,
            "path": path,
            "tags": tags,
        });
        self.post_json("/v1/users", &body)
            .await
            .map_err(|e| conflict_as(e, "user", username))
    }

    async fn create_group(&self, name: &str, path: &str) -> BackendResult<GroupRecord> {
        let body = serde_json::json!({
            "name": name,
            "path": path,
        });
        self.post_json("/v1/groups", &body)
            .await
            .map_err(|e| conflict_as(e, "group", name))
    }

    async fn add_user_to_group(&self, username: &str, group: &str) -> BackendResult<()> {
        let body = serde_json::json!({ "username": username });
        self.post_empty(
            &format!("/v1/groups/{}/members", urlencoding::encode(group)),
            &body,
        )
        .await
        .map_err(|e| missing_as(e, "group", group))
    }

    async fn attach_user_policy(&self, username: &str, policy_arn: &str) -> BackendResult<()> {
        let body = serde_json::json!({ "policy_arn": policy_arn });
        self.post_empty(
            &format!("/v1/users/{}/attached-policies", urlencoding::encode(username)),
            &body,
        )
        .await
        .map_err(|e| missing_as(e, "policy", policy_arn))
    }

    async fn attach_group_policy(&self, group: &str, policy_arn: &str) -> BackendResult<()> {
        let body = serde_json::json!({ "policy_arn": policy_arn });
        self.post_empty(
            &format!("/v1/groups/{}/attached-policies", urlencoding::encode(group)),
            &body,
        )
        .await
        .map_err(|e| missing_as(e, "policy", policy_arn))
    }

    async fn create_login_profile(
        &self,
        username: &str,
        password: &SecretString,
        reset_required: bool,
    ) -> BackendResult<()> {
        // Deliberate expose: the password must be transmitted to the
        // backend. It is never logged on this path.
        let body = serde_json::json!({
            "password": password.expose(),
            "reset_required": reset_required,
        });
        self.post_empty(
            &format!("/v1/users/{}/login-profile", urlencoding::encode(username)),
            &body,
        )
        .await
        .map_err(|e| conflict_as(e, "login profile", username))
    }

    async fn create_access_key(&self, username: &str) -> BackendResult<AccessKeyPair> {
        self.post_json(
            &format!("/v1/users/{}/access-keys", urlencoding::encode(username)),
            &serde_json::json!({}),
        )
        .await
        .map_err(|e| missing_as(e, "user", username))
    }

    async fn put_user_inline_policy(
        &self,
        username: &str,
        policy_name: &str,
        document: &serde_json::Value,
    ) -> BackendResult<()> {
        self.put_empty(
            &format!(
                "/v1/users/{}/policies/{}",
                urlencoding::encode(username),
                urlencoding::encode(policy_name)
            ),
            document,
        )
        .await
        .map_err(|e| missing_as(e, "user", username))
    }

    async fn caller_identity(&self) -> BackendResult<CallerIdentity> {
        self.get_json("/v1/identity").await
    }
}

/// Handles a response with a body.
async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> BackendResult<T> {
    let status = response.status();

    if status.is_success() {
        response
            .json()
            .await
            .map_err(|e| BackendError::InvalidRequest(format!("malformed backend response: {e}")))
    } else {
        Err(error_for_status(status.as_u16(), read_message(response).await))
    }
}

/// Handles a response without a body.
async fn handle_empty_response(response: reqwest::Response) -> BackendResult<()> {
    let status = response.status();

    if status.is_success() {
        Ok(())
    } else {
        Err(error_for_status(status.as_u16(), read_message(response).await))
    }
}

async fn read_message(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|_| "unknown error".to_string())
}

fn error_for_status(status: u16, message: String) -> BackendError {
    match status {
        400 => BackendError::InvalidRequest(message),
        401 | 403 => BackendError::AccessDenied(message),
        _ => BackendError::Api { status, message },
    }
}

/// Rewrites a 409 API error into a typed conflict for the entity the
/// call was about.
fn conflict_as(err: BackendError, entity_type: &'static str, name: &str) -> BackendError {
    match err {
        BackendError::Api { status: 409, .. } => BackendError::already_exists(entity_type, name),
        other => other,
    }
}

/// Rewrites a 404 API error into a typed not-found for the entity the
/// call was about.
fn missing_as(err: BackendError, entity_type: &'static str, name: &str) -> BackendError {
    match err {
        BackendError::Api { status: 404, .. } => BackendError::no_such_entity(entity_type, name),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = HttpDirectoryClient::new("http://localhost:8080/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn conflict_mapping_is_scoped_to_409() {
        let conflict = conflict_as(
            BackendError::Api {
                status: 409,
                message: "conflict".to_string(),
            },
            "user",
            "alice",
        );
        assert!(conflict.is_already_exists());

        let other = conflict_as(
            BackendError::Api {
                status: 500,
                message: "boom".to_string(),
            },
            "user",
            "alice",
        );
        assert!(!other.is_already_exists());
    }

    #[test]
    fn missing_mapping_is_scoped_to_404() {
        let missing = missing_as(
            BackendError::Api {
                status: 404,
                message: "not found".to_string(),
            },
            "group",
            "devs",
        );
        assert!(missing.is_not_found());
    }

    #[test]
    fn statuses_map_to_error_kinds() {
        assert!(matches!(
            error_for_status(403, String::new()),
            BackendError::AccessDenied(_)
        ));
        assert!(matches!(
            error_for_status(400, String::new()),
            BackendError::InvalidRequest(_)
        ));
        assert!(matches!(
            error_for_status(500, String::new()),
            BackendError::Api { status: 500, .. }
        ));
    }
}
