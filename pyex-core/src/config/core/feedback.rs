use crate::config::constants::{defaults, env_vars};
use crate::error::PyexError;
use serde::{Deserialize, Serialize};
use std::env;

/// Feedback and run tracing backend settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedbackConfig {
    /// Environment variable holding the backend endpoint URL
    #[serde(default = "default_endpoint_env")]
    pub endpoint_env: String,

    /// Environment variable holding the backend API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// Endpoint fallback when the environment variable is not set
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Feedback key recorded with each submission
    #[serde(default = "default_key")]
    pub key: String,

    /// Log every model invocation as a run so feedback has something to attach to
    #[serde(default = "default_true")]
    pub trace_runs: bool,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            endpoint_env: default_endpoint_env(),
            api_key_env: default_api_key_env(),
            endpoint: None,
            key: default_key(),
            trace_runs: default_true(),
        }
    }
}

/// Resolved endpoint and key for the feedback backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackCredentials {
    pub endpoint: String,
    pub api_key: String,
}

impl FeedbackConfig {
    /// Resolve both credentials; either one missing is a configuration error.
    pub fn credentials(&self) -> Result<FeedbackCredentials, PyexError> {
        let endpoint = non_empty_env(&self.endpoint_env)
            .or_else(|| self.endpoint.clone().filter(|v| !v.trim().is_empty()))
            .ok_or_else(|| {
                PyexError::Config(format!(
                    "feedback endpoint is not set; export {}",
                    self.endpoint_env
                ))
            })?;
        let api_key = non_empty_env(&self.api_key_env).ok_or_else(|| {
            PyexError::Config(format!(
                "feedback API key is not set; export {}",
                self.api_key_env
            ))
        })?;

        Ok(FeedbackCredentials {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key,
        })
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn default_endpoint_env() -> String {
    env_vars::FEEDBACK_ENDPOINT.to_string()
}
fn default_api_key_env() -> String {
    env_vars::FEEDBACK_API_KEY.to_string()
}
fn default_key() -> String {
    defaults::FEEDBACK_KEY.to_string()
}
fn default_true() -> bool {
    true
}
