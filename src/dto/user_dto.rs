use serde::{Deserialize, Serialize};

use crate::models::user::User;
use crate::services::user_service::UserList;

/// `limit` stays a string so a non-numeric value falls back to the default
/// page size instead of rejecting the request.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct UserListQuery {
    pub role: Option<String>,
    pub status: Option<String>,
    pub limit: Option<String>,
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub users: Vec<User>,
    pub next_token: Option<String>,
}

impl From<UserList> for UserListResponse {
    fn from(value: UserList) -> Self {
        Self {
            users: value.users,
            next_token: value.next_token,
        }
    }
}
