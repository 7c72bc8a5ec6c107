use std::fmt;

use secrecy::SecretString;
use thiserror::Error;

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_CHAT_MODEL: &str = "VENTABOT_CHAT_MODEL";
pub const ENV_EMBEDDING_MODEL: &str = "VENTABOT_EMBEDDING_MODEL";
pub const ENV_EMBEDDING_DIMENSION: &str = "VENTABOT_EMBEDDING_DIMENSION";
pub const ENV_TOP_K: &str = "VENTABOT_TOP_K";

pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 1536;
pub const DEFAULT_TOP_K: usize = 2;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{ENV_API_KEY} is not set; export it or add it to a .env file")]
    MissingApiKey,
    #[error("{var} is invalid: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

/// Startup configuration, loaded once before any component is built.
pub struct AppConfig {
    pub api_key: SecretString,
    pub base_url: Option<String>,
    pub chat_model: String,
    pub embedding_model: String,
    pub embedding_dimension: usize,
    pub top_k: usize,
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("chat_model", &self.chat_model)
            .field("embedding_model", &self.embedding_model)
            .field("embedding_dimension", &self.embedding_dimension)
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl AppConfig {
    /// Reads configuration from the process environment. The API key is
    /// required; everything else has a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = match std::env::var(ENV_API_KEY) {
            Ok(value) if !value.trim().is_empty() => SecretString::new(value),
            _ => return Err(ConfigError::MissingApiKey),
        };

        Ok(Self {
            api_key,
            base_url: env_nonempty(ENV_BASE_URL),
            chat_model: env_nonempty(ENV_CHAT_MODEL)
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            embedding_model: env_nonempty(ENV_EMBEDDING_MODEL)
                .unwrap_or_else(|| DEFAULT_EMBEDDING_MODEL.to_string()),
            embedding_dimension: env_positive(
                ENV_EMBEDDING_DIMENSION,
                DEFAULT_EMBEDDING_DIMENSION,
            )?,
            top_k: env_positive(ENV_TOP_K, DEFAULT_TOP_K)?,
        })
    }
}

fn env_nonempty(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn env_positive(var: &'static str, default: usize) -> Result<usize, ConfigError> {
    let Some(raw) = env_nonempty(var) else {
        return Ok(default);
    };
    let parsed = raw.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
        var,
        reason: format!("expected a positive integer, got {raw:?}"),
    })?;
    if parsed == 0 {
        return Err(ConfigError::InvalidValue {
            var,
            reason: "must be at least 1".to_string(),
        });
    }
    Ok(parsed)
}
