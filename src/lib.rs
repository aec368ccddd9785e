pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod layout;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use crate::config::{Config, JobStoreProvider, UserDirectoryProvider};
use crate::error::{Error, Result};
use crate::services::{job_service::JobService, user_service::UserService};
use crate::store::{
    HttpUserDirectory, InMemoryJobStore, InMemoryUserDirectory, JobStore, PgJobStore,
    UserDirectory,
};

#[derive(Clone)]
pub struct AppState {
    pub job_service: JobService,
    pub user_service: UserService,
}

impl AppState {
    pub fn new(job_store: Arc<dyn JobStore>, user_directory: Arc<dyn UserDirectory>) -> Self {
        Self {
            job_service: JobService::new(job_store),
            user_service: UserService::new(user_directory),
        }
    }

    /// Wires the collaborators selected in `config`, running migrations when
    /// jobs live in Postgres.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let job_store: Arc<dyn JobStore> = match config.job_store {
            JobStoreProvider::Postgres => {
                let pool = database::pool::create_pool(config).await?;
                database::pool::run_migrations(&pool).await?;
                tracing::info!("using Postgres job store");
                Arc::new(PgJobStore::new(pool))
            }
            JobStoreProvider::Memory => {
                tracing::warn!("using in-memory job store; jobs are lost on restart");
                Arc::new(InMemoryJobStore::new())
            }
        };

        let user_directory: Arc<dyn UserDirectory> = match config.user_directory {
            UserDirectoryProvider::Http => {
                let url = config.identity_service_url.clone().ok_or_else(|| {
                    Error::Config("Missing environment variable: IDENTITY_SERVICE_URL".to_string())
                })?;
                tracing::info!(url = %url, "using HTTP identity directory");
                let directory = HttpUserDirectory::new(
                    url,
                    config.identity_service_token.clone(),
                    config.identity_timeout,
                )
                .map_err(|e| Error::Config(format!("Identity client setup failed: {}", e)))?;
                Arc::new(directory)
            }
            UserDirectoryProvider::Memory => {
                tracing::warn!("using empty in-memory user directory");
                Arc::new(InMemoryUserDirectory::default())
            }
        };

        Ok(Self::new(job_store, user_directory))
    }
}
