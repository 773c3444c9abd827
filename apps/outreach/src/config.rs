use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_GATEWAY_URL: &str = "https://hr-message-backend-2.onrender.com";

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub gateway_url: String,
    pub gateway_timeout_secs: u64,
    pub session_cookie_days: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gateway_url: std::env::var("GATEWAY_URL")
                .unwrap_or_else(|_| DEFAULT_GATEWAY_URL.to_string()),
            gateway_timeout_secs: parse_env("GATEWAY_TIMEOUT_SECS", 60)?,
            session_cookie_days: parse_env("SESSION_COOKIE_DAYS", 7)?,
            port: parse_env("PORT", 3000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn gateway_timeout(&self) -> Duration {
        Duration::from_secs(self.gateway_timeout_secs)
    }

    /// Lifetime of the `token` and `user_name` cookies.
    pub fn session_max_age(&self) -> Duration {
        Duration::from_secs(self.session_cookie_days * 24 * 60 * 60)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            gateway_timeout_secs: 60,
            session_cookie_days: 7,
            port: 3000,
            rust_log: "info".to_string(),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
