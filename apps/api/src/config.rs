use std::str::FromStr;

use anyhow::{Context, Result};

use crate::layout::{DEFAULT_MARGIN_MM, DEFAULT_TOLERANCE};

pub const DEFAULT_MAX_COPIES: u64 = 10_000;

/// Application configuration loaded from environment variables.
/// Every variable is optional; a present but malformed value fails startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Overshoot tolerance for layout boundary checks, in millimetres.
    pub layout_tolerance: f64,
    /// Margin used when a layout request does not supply its own page geometry.
    pub page_margin_mm: f64,
    pub filter_timeout_secs: u64,
    /// Upper bound on the total number of copies in one layout request.
    pub max_copies_per_request: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            port: env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            layout_tolerance: env_or("LAYOUT_TOLERANCE", DEFAULT_TOLERANCE)?,
            page_margin_mm: env_or("PAGE_MARGIN_MM", DEFAULT_MARGIN_MM)?,
            filter_timeout_secs: env_or("FILTER_TIMEOUT_SECS", 120)?,
            max_copies_per_request: env_or("MAX_COPIES_PER_REQUEST", DEFAULT_MAX_COPIES)?,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.layout_tolerance.is_finite() || self.layout_tolerance < 0.0 {
            anyhow::bail!("LAYOUT_TOLERANCE must be a non-negative number");
        }
        if !self.page_margin_mm.is_finite() || self.page_margin_mm < 0.0 {
            anyhow::bail!("PAGE_MARGIN_MM must be a non-negative number");
        }
        if self.filter_timeout_secs == 0 {
            anyhow::bail!("FILTER_TIMEOUT_SECS must be at least 1");
        }
        if self.max_copies_per_request == 0 {
            anyhow::bail!("MAX_COPIES_PER_REQUEST must be at least 1");
        }
        Ok(())
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has an invalid value: '{raw}'"))
}
