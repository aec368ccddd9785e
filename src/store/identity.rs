use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::{StoreError, UserDirectory, UserPage, UserPageRequest};
use crate::models::user::User;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListUsersResponse {
    #[serde(default)]
    users: Vec<User>,
    #[serde(default)]
    next_token: Option<String>,
}

/// Identity directory reached over its JSON API.
#[derive(Clone)]
pub struct HttpUserDirectory {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpUserDirectory {
    pub fn new(base_url: String, token: Option<String>, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }
}

/// Pulls a human-readable reason out of an error body, if the service sent one.
fn rejection_reason(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<JsonValue>(body)
        .ok()
        .and_then(|v| {
            ["error", "message"]
                .iter()
                .find_map(|key| v.get(*key).and_then(|m| m.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| format!("Identity service responded with {}", status))
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn list_users(&self, request: UserPageRequest) -> Result<UserPage, StoreError> {
        let url = format!("{}/users", self.base_url);
        let mut query: Vec<(&str, String)> = vec![("limit", request.limit.to_string())];
        if let Some(token) = request.pagination_token {
            query.push(("paginationToken", token));
        }

        let mut builder = self.client.get(&url).query(&query);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }

        tracing::debug!(url = %url, limit = request.limit, "listing users from identity service");
        let response = builder.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected(rejection_reason(status, &body)));
        }

        let page = response
            .json::<ListUsersResponse>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        Ok(UserPage {
            users: page.users,
            next_token: page.next_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_prefers_error_then_message() {
        let status = reqwest::StatusCode::TOO_MANY_REQUESTS;
        assert_eq!(rejection_reason(status, r#"{"error":"Rate exceeded"}"#), "Rate exceeded");
        assert_eq!(rejection_reason(status, r#"{"message":"Slow down"}"#), "Slow down");
        assert_eq!(
            rejection_reason(status, "<html>"),
            "Identity service responded with 429 Too Many Requests"
        );
    }

    #[test]
    fn trims_trailing_slash_from_base_url() {
        let dir = HttpUserDirectory::new(
            "https://id.example.com/".into(),
            None,
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(dir.base_url, "https://id.example.com");
    }

    #[test]
    fn decodes_page_with_null_token() {
        let page: ListUsersResponse = serde_json::from_str(
            r#"{"users":[{"id":"u1","role":"admin","status":"active","createdAt":"2024-01-01"}],"nextToken":null}"#,
        )
        .unwrap();
        assert_eq!(page.users.len(), 1);
        assert_eq!(page.next_token, None);
    }

    #[test]
    fn record_without_role_does_not_fail_the_page() {
        let page: ListUsersResponse = serde_json::from_str(
            r#"{"users":[{"id":"u1","role":"admin","status":"active","createdAt":"2024-01-01"},{"id":"u2","createdAt":1704067200}],"nextToken":"abc"}"#,
        )
        .unwrap();
        assert_eq!(page.users.len(), 2);
        assert_eq!(page.users[1].role, "");
        assert_eq!(page.next_token.as_deref(), Some("abc"));
    }
}
