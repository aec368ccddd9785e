//! Collaborators the service delegates persistence and identity to.
//!
//! Jobs live in a document store that also hands out sequential posting ids;
//! users live in an external identity directory that is read one page at a time.
//! Each collaborator has a production implementation and an in-memory one used
//! for local runs and tests.

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::job::Job;
use crate::models::user::User;

pub mod identity;
pub mod memory;
pub mod postgres;

pub use identity::HttpUserDirectory;
pub use memory::{InMemoryJobStore, InMemoryUserDirectory};
pub use postgres::PgJobStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("identity service request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rejected by upstream: {0}")]
    Rejected(String),

    #[error("could not decode upstream data: {0}")]
    Decode(String),
}

impl StoreError {
    /// The reason reported by the collaborator itself, if it gave one.
    pub fn reason(&self) -> Option<String> {
        match self {
            StoreError::Rejected(reason) => Some(reason.clone()),
            StoreError::Database(err) => err.as_database_error().map(|db| db.message().to_string()),
            StoreError::Http(_) | StoreError::Decode(_) => None,
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn get_job(&self, id: Uuid) -> Result<Option<Job>, StoreError>;

    async fn create_job(&self, job: &Job) -> Result<(), StoreError>;

    /// Allocates the next human-facing posting id.
    async fn next_posting_id(&self) -> Result<i64, StoreError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPageRequest {
    pub limit: u32,
    pub pagination_token: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UserPage {
    pub users: Vec<User>,
    pub next_token: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self, request: UserPageRequest) -> Result<UserPage, StoreError>;
}
