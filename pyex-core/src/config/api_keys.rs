//! API key management for the model provider.
//!
//! Keys are resolved from environment variables first (including values loaded
//! from a `.env` file), then from `pyex.toml`.

use crate::config::constants::{env_vars, providers};
use anyhow::Result;
use std::env;
use tracing::{debug, warn};

/// Where to look for the model provider key
#[derive(Debug, Clone)]
pub struct ApiKeySources {
    /// Environment variable holding the key
    pub env_var: String,
    /// Key from configuration file
    pub config_value: Option<String>,
}

impl Default for ApiKeySources {
    fn default() -> Self {
        Self::for_provider(providers::OPENAI)
    }
}

impl ApiKeySources {
    /// Create API key sources for a provider with automatic environment variable inference
    pub fn for_provider(provider: &str) -> Self {
        let env_var = match provider.to_lowercase().as_str() {
            providers::LOCAL => env_vars::LOCAL_API_KEY,
            _ => env_vars::OPENAI_API_KEY,
        };
        Self {
            env_var: env_var.to_string(),
            config_value: None,
        }
    }

    pub fn with_env_var(mut self, env_var: impl Into<String>) -> Self {
        self.env_var = env_var.into();
        self
    }

    pub fn with_config_value(mut self, value: Option<String>) -> Self {
        self.config_value = value;
        self
    }
}

/// Load environment variables from a .env file in the current directory.
///
/// A missing file is fine; an unreadable one is logged and ignored.
pub fn load_dotenv() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(path) => {
            debug!(path = %path.display(), "loaded environment variables");
            Ok(())
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => {
            warn!("failed to load .env file: {e}");
            Ok(())
        }
    }
}

/// Get the API key for `provider`.
///
/// The `local` provider talks to a llama.cpp style server that usually runs
/// without authentication, so a missing key resolves to an empty string there.
pub fn get_api_key(provider: &str, sources: &ApiKeySources) -> Result<String> {
    if let Ok(key) = env::var(&sources.env_var) {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    if let Some(key) = &sources.config_value {
        if !key.is_empty() {
            return Ok(key.clone());
        }
    }

    if provider.eq_ignore_ascii_case(providers::LOCAL) {
        return Ok(String::new());
    }

    Err(anyhow::anyhow!(
        "No API key found for {} provider. Set {} environment variable (or add to .env file) or configure model.api_key in pyex.toml",
        provider,
        sources.env_var
    ))
}
