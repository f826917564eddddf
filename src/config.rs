use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_max_connections: u32,
    pub db_acquire_timeout: Duration,
    pub positions_cache_ttl: Duration,
    pub offers_cache_ttl: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8080"),
            db_host: get_env("DB_HOST")?,
            db_port: get_env_parse_or("DB_PORT", 3306)?,
            db_user: get_env("DB_USER")?,
            db_password: get_env("DB_PASSWORD")?,
            db_name: get_env("DB_NAME")?,
            db_max_connections: get_env_parse_or("DB_MAX_CONNECTIONS", 5)?,
            db_acquire_timeout: Duration::from_secs(get_env_parse_or("DB_ACQUIRE_TIMEOUT_SECS", 30)?),
            positions_cache_ttl: Duration::from_secs(get_env_parse_or("POSITIONS_CACHE_TTL_SECS", 600)?),
            offers_cache_ttl: Duration::from_secs(get_env_parse_or("OFFERS_CACHE_TTL_SECS", 300)?),
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}
