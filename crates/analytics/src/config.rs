//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `SHOPDESK_DEAD_STOCK_DAYS` - dead-stock duration for records that do not
//!   carry one (default: 90, must be a positive integer)

use thiserror::Error;

const DEAD_STOCK_DAYS_VAR: &str = "SHOPDESK_DEAD_STOCK_DAYS";
const DEFAULT_DEAD_STOCK_DAYS: u32 = 90;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub default_dead_stock_days: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            default_dead_stock_days: DEFAULT_DEAD_STOCK_DAYS,
        }
    }
}

impl DashboardConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let default_dead_stock_days = match lookup(DEAD_STOCK_DAYS_VAR) {
            None => DEFAULT_DEAD_STOCK_DAYS,
            Some(raw) => parse_positive_days(&raw)?,
        };
        Ok(Self {
            default_dead_stock_days,
        })
    }
}

fn parse_positive_days(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar(DEAD_STOCK_DAYS_VAR.to_string(), reason);
    let days = raw.trim().parse::<u32>().map_err(|e| invalid(e.to_string()))?;
    if days == 0 {
        return Err(invalid("must be at least 1".to_string()));
    }
    Ok(days)
}
