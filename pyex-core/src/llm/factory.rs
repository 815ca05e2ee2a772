use super::providers::OpenAIProvider;
use crate::config::ModelConfig;
use crate::config::api_keys::{ApiKeySources, get_api_key};
use crate::config::constants::{models, providers, urls};
use crate::llm::provider::{LLMError, LLMProvider};
use std::collections::HashMap;
use std::time::Duration;

type ProviderConstructor = Box<dyn Fn(ProviderConfig) -> Box<dyn LLMProvider> + Send + Sync>;

/// LLM provider factory and registry
pub struct LLMFactory {
    providers: HashMap<String, ProviderConstructor>,
}

#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub timeout: Option<Duration>,
}

impl LLMFactory {
    pub fn new() -> Self {
        let mut factory = Self {
            providers: HashMap::new(),
        };

        factory.register_provider(providers::OPENAI, |config: ProviderConfig| {
            let ProviderConfig {
                api_key,
                base_url,
                model,
                timeout,
            } = config;
            Box::new(OpenAIProvider::from_config(
                providers::OPENAI,
                api_key,
                model,
                base_url,
                timeout,
            )) as Box<dyn LLMProvider>
        });

        factory.register_provider(providers::LOCAL, |config: ProviderConfig| {
            let ProviderConfig {
                api_key,
                base_url,
                model,
                timeout,
            } = config;
            Box::new(OpenAIProvider::from_config(
                providers::LOCAL,
                api_key,
                model.or_else(|| Some(models::local::DEFAULT_MODEL.to_string())),
                base_url.or_else(|| Some(urls::LOCAL_API_BASE.to_string())),
                timeout,
            )) as Box<dyn LLMProvider>
        });

        factory
    }

    /// Register a new provider
    pub fn register_provider<F>(&mut self, name: &str, factory_fn: F)
    where
        F: Fn(ProviderConfig) -> Box<dyn LLMProvider> + Send + Sync + 'static,
    {
        self.providers
            .insert(name.to_string(), Box::new(factory_fn));
    }

    /// Create provider instance
    pub fn create_provider(
        &self,
        provider_name: &str,
        config: ProviderConfig,
    ) -> Result<Box<dyn LLMProvider>, LLMError> {
        let factory_fn = self
            .providers
            .get(&provider_name.to_lowercase())
            .ok_or_else(|| {
                LLMError::InvalidRequest(format!("Unknown provider: {provider_name}"))
            })?;

        Ok(factory_fn(config))
    }

    /// List available providers
    pub fn list_providers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for LLMFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Create provider with full configuration
pub fn create_provider_with_config(
    provider_name: &str,
    config: ProviderConfig,
) -> Result<Box<dyn LLMProvider>, LLMError> {
    LLMFactory::new().create_provider(provider_name, config)
}

/// Build the provider described by the `[model]` section, resolving its API key.
pub fn create_provider_from_model_config(
    model: &ModelConfig,
) -> Result<Box<dyn LLMProvider>, LLMError> {
    let mut sources = ApiKeySources::for_provider(&model.provider)
        .with_config_value(model.api_key.clone());
    if let Some(env_var) = &model.api_key_env {
        sources = sources.with_env_var(env_var.clone());
    }
    let api_key = get_api_key(&model.provider, &sources)
        .map_err(|e| LLMError::Authentication(e.to_string()))?;

    create_provider_with_config(
        &model.provider,
        ProviderConfig {
            api_key: Some(api_key),
            base_url: Some(model.resolved_base_url()),
            model: Some(model.model.clone()),
            timeout: Some(Duration::from_secs(model.timeout_secs)),
        },
    )
}
