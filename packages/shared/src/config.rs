use std::time::Duration;

use crate::services::game_engine::EngineConfig;

pub const DEFAULT_STORE_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_MAX_CONFLICT_RETRIES: u32 = 3;

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid { name: &'static str, value: String },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Missing(name) => {
                write!(f, "{} environment variable must be set", name)
            }
            ConfigError::Invalid { name, value } => {
                write!(f, "Invalid value for {}: {}", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Settings read from the Lambda environment at cold start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub games_table: String,
    pub connections_table: String,
    pub matchmaking_table: String,
    pub websocket_api_endpoint: Option<String>,
    pub store_timeout: Duration,
    pub max_conflict_retries: u32,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let store_timeout_ms = match lookup("STORE_TIMEOUT_MS") {
            Some(value) => parse(&value, "STORE_TIMEOUT_MS")?,
            None => DEFAULT_STORE_TIMEOUT_MS,
        };
        let max_conflict_retries = match lookup("MAX_CONFLICT_RETRIES") {
            Some(value) => parse(&value, "MAX_CONFLICT_RETRIES")?,
            None => DEFAULT_MAX_CONFLICT_RETRIES,
        };
        let jump_over_opponent = match lookup("JUMP_OVER_OPPONENT") {
            Some(value) => parse(&value, "JUMP_OVER_OPPONENT")?,
            None => false,
        };

        Ok(AppConfig {
            games_table: required("GAMES_TABLE")?,
            connections_table: required("PLAYER_CONNECTIONS_TABLE")?,
            matchmaking_table: required("MATCHMAKING_TABLE")?,
            websocket_api_endpoint: lookup("WEBSOCKET_API_ENDPOINT").filter(|v| !v.is_empty()),
            store_timeout: Duration::from_millis(store_timeout_ms),
            max_conflict_retries,
            engine: EngineConfig { jump_over_opponent },
        })
    }
}

fn parse<T: std::str::FromStr>(value: &str, name: &'static str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        name,
        value: value.to_string(),
    })
}
