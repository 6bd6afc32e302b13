//! Application configuration

use anyhow::{Context, Result};
use sqlx::postgres::PgConnectOptions;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// PostgreSQL host
    pub db_host: String,
    /// PostgreSQL port
    pub db_port: u16,
    /// PostgreSQL user
    pub db_user: String,
    /// PostgreSQL password
    pub db_password: String,
    /// PostgreSQL database name
    pub db_name: String,
    /// Maximum pooled connections
    pub db_max_connections: u32,
    /// Static index file served at `/`
    pub index_file: String,
    /// Supabase project URL
    pub supabase_url: Option<String>,
    /// Supabase API key
    pub supabase_key: Option<String>,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable if it is set
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let required = |key: &str| lookup(key).with_context(|| format!("{} is required", key));

        Ok(Self {
            host: var_or("HOST", "0.0.0.0"),
            port: var_or("PORT", "5000").parse().context("Invalid PORT")?,
            db_host: required("DB_HOST")?,
            db_port: var_or("DB_PORT", "5432")
                .parse()
                .context("Invalid DB_PORT")?,
            db_user: required("DB_USER")?,
            db_password: required("DB_PASSWORD")?,
            db_name: required("DB_NAME")?,
            db_max_connections: var_or("DB_MAX_CONNECTIONS", "5")
                .parse()
                .context("Invalid DB_MAX_CONNECTIONS")?,
            index_file: var_or("INDEX_FILE", "index.html"),
            supabase_url: lookup("SUPABASE_URL").filter(|v| !v.is_empty()),
            supabase_key: lookup("SUPABASE_KEY").filter(|v| !v.is_empty()),
        })
    }

    /// PostgreSQL connection options
    ///
    /// Credentials are passed as-is, so reserved URL characters in the
    /// password need no escaping.
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.db_host)
            .port(self.db_port)
            .username(&self.db_user)
            .password(&self.db_password)
            .database(&self.db_name)
    }

    /// Supabase credentials, when both URL and key are set
    pub fn supabase_credentials(&self) -> Option<(&str, &str)> {
        match (&self.supabase_url, &self.supabase_key) {
            (Some(url), Some(key)) => Some((url.as_str(), key.as_str())),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 5000,
        db_host: "localhost".to_string(),
        db_port: 5432,
        db_user: "postgres".to_string(),
        db_password: "secret".to_string(),
        db_name: "hazards".to_string(),
        db_max_connections: 5,
        index_file: "index.html".to_string(),
        supabase_url: None,
        supabase_key: None,
    }
}
