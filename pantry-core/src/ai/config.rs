//! AI configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default OpenAI-compatible base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {name}: {value:?}")]
    InvalidValue { name: String, value: String },
}

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key for the completion provider.
    pub api_key: String,
    /// Model name (e.g., "gpt-4.1-mini", "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Upper bound on completion tokens, if any.
    pub max_tokens: Option<u32>,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `OPENAI_API_KEY`: API key
    ///
    /// Optional:
    /// - `PANTRY_AI_MODEL`: Model name (default: "gpt-4.1-mini")
    /// - `PANTRY_AI_BASE_URL`: API base URL (default: "https://api.openai.com/v1")
    /// - `PANTRY_AI_MAX_TOKENS`: Completion token cap (default: provider default)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let model = env::var("PANTRY_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("PANTRY_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let max_tokens = match env::var("PANTRY_AI_MAX_TOKENS") {
            Ok(v) => Some(v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: "PANTRY_AI_MAX_TOKENS".to_string(),
                value: v.clone(),
            })?),
            Err(_) => None,
        };

        Ok(Self {
            api_key,
            model,
            base_url,
            max_tokens,
        })
    }
}
