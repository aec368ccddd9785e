use std::sync::Arc;

use crate::dto::user_dto::UserListQuery;
use crate::error::{Error, Result};
use crate::models::user::{User, ALL};
use crate::store::{UserDirectory, UserPageRequest};

pub const DEFAULT_PAGE_SIZE: u32 = 60;

#[derive(Debug)]
pub struct UserList {
    pub users: Vec<User>,
    pub next_token: Option<String>,
}

#[derive(Clone)]
pub struct UserService {
    directory: Arc<dyn UserDirectory>,
}

/// `None`, empty, and `all` mean "do not filter".
fn active_filter(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != ALL)
}

/// Absent, non-numeric or zero limits fall back to the default page size.
pub fn page_size(raw: Option<&str>) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|n| *n > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE)
}

impl UserService {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// Lists one directory page, filtered and sorted newest first.
    ///
    /// Filters only see the page that was fetched, so the result can be shorter
    /// than the limit while `next_token` still points at more users.
    pub async fn list(&self, query: UserListQuery) -> Result<UserList> {
        let request = UserPageRequest {
            limit: page_size(query.limit.as_deref()),
            pagination_token: query.next_token.filter(|t| !t.is_empty()),
        };

        let page = self.directory.list_users(request).await.map_err(|err| {
            tracing::error!(error = %err, "failed to list users");
            Error::upstream(&err, "Failed to list users")
        })?;

        let role = active_filter(query.role.as_deref());
        let status = active_filter(query.status.as_deref());

        let mut users: Vec<User> = page
            .users
            .into_iter()
            .filter(|u| role.map_or(true, |r| u.role == r))
            .filter(|u| status.map_or(true, |s| u.status == s))
            .collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(UserList {
            users,
            next_token: page.next_token,
        })
    }
}
