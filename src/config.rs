use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStoreProvider {
    Postgres,
    Memory,
}

impl FromStr for JobStoreProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown job store provider '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDirectoryProvider {
    Http,
    Memory,
}

impl FromStr for UserDirectoryProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Self::Http),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown user directory provider '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub job_store: JobStoreProvider,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub user_directory: UserDirectoryProvider,
    pub identity_service_url: Option<String>,
    pub identity_service_token: Option<String>,
    pub identity_timeout: Duration,
    pub jwt_secret: Option<String>,
    pub log_json: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let job_store: JobStoreProvider = get_env_parse_or("JOB_STORE_PROVIDER", JobStoreProvider::Postgres)?;
        let database_url = get_env_opt("DATABASE_URL");
        if job_store == JobStoreProvider::Postgres && database_url.is_none() {
            return Err(Error::Config(
                "Missing environment variable: DATABASE_URL".to_string(),
            ));
        }

        let user_directory: UserDirectoryProvider =
            get_env_parse_or("USER_DIRECTORY_PROVIDER", UserDirectoryProvider::Http)?;
        let identity_service_url = get_env_opt("IDENTITY_SERVICE_URL");
        if user_directory == UserDirectoryProvider::Http && identity_service_url.is_none() {
            return Err(Error::Config(
                "Missing environment variable: IDENTITY_SERVICE_URL".to_string(),
            ));
        }

        Ok(Self {
            server_address: get_env_opt("SERVER_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            job_store,
            database_url,
            database_max_connections: get_env_parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
            user_directory,
            identity_service_url,
            identity_service_token: get_env_opt("IDENTITY_SERVICE_TOKEN"),
            identity_timeout: Duration::from_secs(get_env_parse_or("IDENTITY_TIMEOUT_SECS", 30)?),
            jwt_secret: get_env_opt("JWT_SECRET"),
            log_json: get_env_opt("LOG_FORMAT").map_or(false, |f| f.eq_ignore_ascii_case("json")),
        })
    }
}

fn get_env_opt(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_opt(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        None => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> Result<&'static Config> {
    CONFIG
        .get()
        .ok_or_else(|| Error::Config("Configuration has not been initialized".to_string()))
}
