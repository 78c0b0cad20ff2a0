use anyhow::{Context, Result, anyhow};
use std::{env, fmt::Display, str::FromStr};
use strum_macros::{Display as StrumDisplay, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum StoreBackend {
    Mysql,
    Memory,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: String,
    pub store_backend: StoreBackend,
    /// Required when the backend is MySQL.
    pub database_url: Option<String>,
    pub api_prefix: String,

    // Rate limiting, 0 disables it
    pub rate_api_per_min: u32,

    pub log_dir: String,
    pub log_level: tracing::Level,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let store_backend: StoreBackend = var_or("STORE_BACKEND", "mysql")?;
        let database_url = env::var("DATABASE_URL").ok();
        if store_backend == StoreBackend::Mysql && database_url.is_none() {
            return Err(anyhow!("DATABASE_URL must be set when STORE_BACKEND=mysql"));
        }

        Ok(Self {
            server_addr: var_or("SERVER_ADDR", "0.0.0.0:8000")?,
            store_backend,
            database_url,
            api_prefix: var_or("API_PREFIX", "/api")?,
            rate_api_per_min: var_or("RATE_API_PER_MIN", "1000")?,
            log_dir: var_or("LOG_DIR", "logs")?,
            log_level: var_or("LOG_LEVEL", "debug")?,
        })
    }
}

fn var_or<T>(key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    parse_value(key, &raw)
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| anyhow!("{e}"))
        .with_context(|| format!("invalid value for {key}: {raw:?}"))
}
