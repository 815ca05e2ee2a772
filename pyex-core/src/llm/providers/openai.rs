use crate::config::constants::{message_roles, models, providers, urls};
use crate::llm::error_display;
use crate::llm::provider::{
    FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, Usage,
};
use async_trait::async_trait;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::{Value, json};
use std::time::Duration;

/// Chat completions provider for OpenAI and OpenAI-compatible servers
/// (llama.cpp `server`, vLLM, LM Studio).
pub struct OpenAIProvider {
    name: String,
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl OpenAIProvider {
    pub fn with_model(api_key: String, model: String) -> Self {
        Self::from_config(
            providers::OPENAI,
            Some(api_key),
            Some(model),
            None,
            None,
        )
    }

    pub fn from_config(
        name: &str,
        api_key: Option<String>,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Self {
        let http_client = match timeout {
            Some(timeout) => HttpClient::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_else(|_| HttpClient::new()),
            None => HttpClient::new(),
        };

        Self {
            name: name.to_string(),
            api_key: api_key.unwrap_or_default(),
            http_client,
            base_url: base_url
                .unwrap_or_else(|| urls::OPENAI_API_BASE.to_string())
                .trim_end_matches('/')
                .to_string(),
            model: model.unwrap_or_else(|| models::openai::DEFAULT_MODEL.to_string()),
        }
    }

    fn convert_to_openai_format(&self, request: &LLMRequest) -> Value {
        let mut messages = Vec::new();

        if let Some(system_prompt) = &request.system_prompt {
            messages.push(json!({
                "role": message_roles::SYSTEM,
                "content": system_prompt
            }));
        }

        for msg in &request.messages {
            messages.push(json!({
                "role": msg.role.as_openai_str(),
                "content": msg.content
            }));
        }

        let mut openai_request = json!({
            "model": request.model,
            "messages": messages,
            "stream": false
        });

        if let Some(max_tokens) = request.max_tokens {
            openai_request["max_tokens"] = json!(max_tokens);
        }

        if let Some(temperature) = request.temperature {
            openai_request["temperature"] = json!(temperature);
        }

        openai_request
    }

    fn parse_openai_response(&self, response_json: Value) -> Result<LLMResponse, LLMError> {
        let choices = response_json
            .get("choices")
            .and_then(|c| c.as_array())
            .ok_or_else(|| {
                LLMError::Provider("Invalid response format: missing choices".to_string())
            })?;

        let choice = choices
            .first()
            .ok_or_else(|| LLMError::Provider("No choices in response".to_string()))?;
        let message = choice.get("message").ok_or_else(|| {
            LLMError::Provider("Invalid response format: missing message".to_string())
        })?;

        let content = message
            .get("content")
            .and_then(|c| c.as_str())
            .map(|s| s.to_string());

        let finish_reason = choice
            .get("finish_reason")
            .and_then(|fr| fr.as_str())
            .map(|fr| match fr {
                "stop" => FinishReason::Stop,
                "length" => FinishReason::Length,
                "content_filter" => FinishReason::ContentFilter,
                _ => FinishReason::Error(fr.to_string()),
            })
            .unwrap_or(FinishReason::Stop);

        let usage = response_json.get("usage").map(|u| Usage {
            prompt_tokens: u
                .get("prompt_tokens")
                .and_then(|pt| pt.as_u64())
                .unwrap_or(0) as u32,
            completion_tokens: u
                .get("completion_tokens")
                .and_then(|ct| ct.as_u64())
                .unwrap_or(0) as u32,
            total_tokens: u
                .get("total_tokens")
                .and_then(|tt| tt.as_u64())
                .unwrap_or(0) as u32,
        });

        let response_id = response_json
            .get("id")
            .and_then(|id| id.as_str())
            .map(|id| id.to_string());

        Ok(LLMResponse {
            content,
            usage,
            finish_reason,
            response_id,
        })
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.validate_request(&request)?;
        let openai_request = self.convert_to_openai_format(&request);

        let url = format!("{}/chat/completions", self.base_url);

        let mut builder = self.http_client.post(&url).json(&openai_request);
        if !self.api_key.is_empty() {
            builder = builder.bearer_auth(&self.api_key);
        }

        let response = builder.send().await.map_err(|e| {
            let formatted_error =
                error_display::format_llm_error(&self.name, &format!("Network error: {e}"));
            LLMError::Network(formatted_error)
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let formatted_error = error_display::format_llm_error(
                &self.name,
                &format!("HTTP {status}: {error_text}"),
            );
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    LLMError::Authentication(formatted_error)
                }
                StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimit,
                _ => LLMError::Provider(formatted_error),
            });
        }

        let openai_response: Value = response.json().await.map_err(|e| {
            let formatted_error = error_display::format_llm_error(
                &self.name,
                &format!("Failed to parse response: {e}"),
            );
            LLMError::Provider(formatted_error)
        })?;

        self.parse_openai_response(openai_response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::provider::Message;

    fn provider() -> OpenAIProvider {
        OpenAIProvider::with_model("sk-test".to_string(), "gpt-3.5-turbo".to_string())
    }

    #[test]
    fn request_includes_system_prompt_and_sampling_options() {
        let request = LLMRequest {
            messages: vec![Message::user("hello".to_string())],
            system_prompt: Some("be terse".to_string()),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: Some(256),
            temperature: Some(0.8),
        };
        let body = provider().convert_to_openai_format(&request);

        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hello");
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["stream"], false);
        assert!(body["temperature"].as_f64().is_some());
    }

    #[test]
    fn parses_content_usage_and_id() {
        let response = provider()
            .parse_openai_response(json!({
                "id": "chatcmpl-123",
                "choices": [{
                    "message": {"role": "assistant", "content": "{\"topic\":\"Array\"}"},
                    "finish_reason": "stop"
                }],
                "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
            }))
            .unwrap();

        assert_eq!(response.content.as_deref(), Some("{\"topic\":\"Array\"}"));
        assert_eq!(response.finish_reason, FinishReason::Stop);
        assert_eq!(response.usage.unwrap().total_tokens, 15);
        assert_eq!(response.response_id.as_deref(), Some("chatcmpl-123"));
    }

    #[test]
    fn missing_choices_is_a_provider_error() {
        let err = provider()
            .parse_openai_response(json!({"error": "boom"}))
            .unwrap_err();
        assert!(matches!(err, LLMError::Provider(_)));

        let err = provider()
            .parse_openai_response(json!({"choices": []}))
            .unwrap_err();
        assert!(matches!(err, LLMError::Provider(_)));
    }

    #[test]
    fn empty_messages_fail_validation() {
        let request = LLMRequest {
            messages: vec![],
            system_prompt: None,
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: None,
            temperature: None,
        };
        assert!(matches!(
            provider().validate_request(&request),
            Err(LLMError::InvalidRequest(_))
        ));
    }
}
