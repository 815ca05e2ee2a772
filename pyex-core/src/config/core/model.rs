use crate::config::constants::{defaults, env_vars, models, providers, urls};
use serde::{Deserialize, Serialize};

/// Model backend settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    /// Provider name (`openai` or `local`)
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Model identifier sent with each completion request
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Optional completion token cap
    #[serde(default)]
    pub max_tokens: Option<u32>,

    /// Override for the provider base URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// Environment variable holding the API key; inferred from the provider when unset
    #[serde(default)]
    pub api_key_env: Option<String>,

    /// API key fallback when the environment variable is not set
    #[serde(default)]
    pub api_key: Option<String>,

    /// Provenance tag attached to each invocation (overridden by `ENV_TAG`)
    #[serde(default = "default_tag")]
    pub tag: String,

    /// HTTP timeout for a single completion request
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
            base_url: None,
            api_key_env: None,
            api_key: None,
            tag: default_tag(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ModelConfig {
    /// Tag to attach to invocations, honouring the `ENV_TAG` override
    pub fn resolved_tag(&self) -> String {
        match std::env::var(env_vars::ENV_TAG) {
            Ok(tag) if !tag.trim().is_empty() => tag,
            _ => self.tag.clone(),
        }
    }

    /// Base URL for the configured provider
    pub fn resolved_base_url(&self) -> String {
        if let Some(url) = &self.base_url {
            return url.trim_end_matches('/').to_string();
        }
        if self.provider.eq_ignore_ascii_case(providers::LOCAL) {
            urls::LOCAL_API_BASE.to_string()
        } else {
            urls::OPENAI_API_BASE.to_string()
        }
    }
}

fn default_provider() -> String {
    providers::OPENAI.to_string()
}
fn default_model() -> String {
    models::openai::DEFAULT_MODEL.to_string()
}
fn default_temperature() -> f32 {
    defaults::TEMPERATURE
}
fn default_tag() -> String {
    defaults::TAG.to_string()
}
fn default_timeout_secs() -> u64 {
    defaults::REQUEST_TIMEOUT_SECS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_provider_uses_local_base_url() {
        let config = ModelConfig {
            provider: "local".to_string(),
            ..Default::default()
        };
        assert_eq!(config.resolved_base_url(), urls::LOCAL_API_BASE);
    }

    #[test]
    fn explicit_base_url_wins_and_is_trimmed() {
        let config = ModelConfig {
            base_url: Some("http://localhost:9000/v1/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolved_base_url(), "http://localhost:9000/v1");
    }
}
