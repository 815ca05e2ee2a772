use crate::config::ModelConfig;
use crate::config::constants::run_kinds;
use crate::error::PyexError;
use crate::feedback::tracer::{RunRecord, RunTracer};
use crate::llm::factory::create_provider_from_model_config;
use crate::llm::provider::{LLMProvider, LLMRequest, Message};
use crate::prompts::render_template;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// What a model invocation was for; recorded as run metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationKind {
    ExerciseGenerator,
    ExplanationGenerator,
    ExerciseRepair,
}

impl InvocationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvocationKind::ExerciseGenerator => run_kinds::EXERCISE_GENERATOR,
            InvocationKind::ExplanationGenerator => run_kinds::EXPLANATION_GENERATOR,
            InvocationKind::ExerciseRepair => run_kinds::EXERCISE_REPAIR,
        }
    }
}

impl fmt::Display for InvocationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One completed model call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelInvocation {
    /// Join key for feedback
    pub run_id: String,
    pub prompt: String,
    pub raw_response: String,
    pub tag: String,
    pub kind: InvocationKind,
}

/// Wraps a provider with per-call run ids, a provenance tag and optional run tracing
pub struct ModelClient {
    provider: Box<dyn LLMProvider>,
    tag: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    tracer: Option<Arc<dyn RunTracer>>,
}

impl ModelClient {
    pub fn new(provider: Box<dyn LLMProvider>, tag: impl Into<String>) -> Self {
        Self {
            provider,
            tag: tag.into(),
            temperature: None,
            max_tokens: None,
            tracer: None,
        }
    }

    /// Build the client described by the `[model]` section
    pub fn from_config(model: &ModelConfig) -> Result<Self, PyexError> {
        let provider = create_provider_from_model_config(model)?;
        Ok(Self::new(provider, model.resolved_tag())
            .with_temperature(Some(model.temperature))
            .with_max_tokens(model.max_tokens))
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_tracer(mut self, tracer: Arc<dyn RunTracer>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Render `template` with optional schema instructions and the user
    /// `question`, then run one completion.
    pub async fn invoke(
        &self,
        template: &str,
        schema_instructions: Option<&str>,
        question: &str,
        kind: InvocationKind,
    ) -> Result<ModelInvocation, PyexError> {
        let prompt = render_template(template, schema_instructions, question);
        self.invoke_prompt(prompt, kind).await
    }

    /// Run one completion for an already rendered prompt.
    ///
    /// Transport, auth and vendor failures come back as `ModelUnavailable`;
    /// nothing is retried here.
    pub async fn invoke_prompt(
        &self,
        prompt: String,
        kind: InvocationKind,
    ) -> Result<ModelInvocation, PyexError> {
        let run_id = Uuid::new_v4().to_string();
        let start_time = Utc::now();
        debug!(%run_id, %kind, tag = %self.tag, chars = prompt.len(), "invoking model");

        let request = LLMRequest {
            messages: vec![Message::user(prompt.clone())],
            system_prompt: None,
            model: self.provider.model().to_string(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self.provider.generate(request).await.map_err(|err| {
            warn!(%run_id, %kind, provider = self.provider.name(), "model call failed: {err}");
            PyexError::from(err)
        })?;

        let invocation = ModelInvocation {
            run_id,
            prompt,
            raw_response: response.content.unwrap_or_default(),
            tag: self.tag.clone(),
            kind,
        };
        info!(
            run_id = %invocation.run_id,
            %kind,
            tag = %invocation.tag,
            response_id = response.response_id.as_deref().unwrap_or("-"),
            "model invocation completed"
        );

        if let Some(tracer) = &self.tracer {
            let record = RunRecord::from_invocation(
                &invocation,
                self.provider.name(),
                self.provider.model(),
                start_time,
                Utc::now(),
            );
            if let Err(err) = tracer.record_run(&record).await {
                warn!(run_id = %invocation.run_id, "failed to trace run: {err}");
            }
        }

        Ok(invocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::tracer::RunRecord;
    use crate::llm::provider::{FinishReason, LLMError, LLMResponse};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct EchoProvider;

    #[async_trait]
    impl LLMProvider for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
            Ok(LLMResponse {
                content: Some(request.messages[0].content.to_uppercase()),
                usage: None,
                finish_reason: FinishReason::Stop,
                response_id: None,
            })
        }
    }

    struct DownProvider;

    #[async_trait]
    impl LLMProvider for DownProvider {
        fn name(&self) -> &str {
            "down"
        }

        fn model(&self) -> &str {
            "down-1"
        }

        async fn generate(&self, _request: LLMRequest) -> Result<LLMResponse, LLMError> {
            Err(LLMError::Network("connection refused".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingTracer {
        runs: Mutex<Vec<RunRecord>>,
    }

    #[async_trait]
    impl RunTracer for RecordingTracer {
        async fn record_run(&self, run: &RunRecord) -> Result<(), PyexError> {
            self.runs.lock().unwrap().push(run.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn invoke_renders_template_and_tags_run() {
        let client = ModelClient::new(Box::new(EchoProvider), "ci");
        let invocation = client
            .invoke("base", Some("fmt"), "ask", InvocationKind::ExerciseGenerator)
            .await
            .unwrap();

        assert_eq!(invocation.prompt, "base\n\nfmt\nask\n");
        assert_eq!(invocation.raw_response, "BASE\n\nFMT\nASK\n");
        assert_eq!(invocation.tag, "ci");
        assert!(Uuid::parse_str(&invocation.run_id).is_ok());
    }

    #[tokio::test]
    async fn every_invocation_gets_a_fresh_run_id() {
        let client = ModelClient::new(Box::new(EchoProvider), "ci");
        let a = client
            .invoke_prompt("a".into(), InvocationKind::ExerciseGenerator)
            .await
            .unwrap();
        let b = client
            .invoke_prompt("a".into(), InvocationKind::ExplanationGenerator)
            .await
            .unwrap();
        assert_ne!(a.run_id, b.run_id);
    }

    #[tokio::test]
    async fn transport_failure_is_model_unavailable() {
        let client = ModelClient::new(Box::new(DownProvider), "ci");
        let err = client
            .invoke_prompt("x".into(), InvocationKind::ExerciseGenerator)
            .await
            .unwrap_err();
        assert!(matches!(err, PyexError::ModelUnavailable(msg) if msg.contains("connection refused")));
    }

    #[tokio::test]
    async fn tracer_receives_run_with_metadata() {
        let tracer = Arc::new(RecordingTracer::default());
        let client = ModelClient::new(Box::new(EchoProvider), "prod").with_tracer(tracer.clone());
        let invocation = client
            .invoke_prompt("hi".into(), InvocationKind::ExplanationGenerator)
            .await
            .unwrap();

        let runs = tracer.runs.lock().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].id, invocation.run_id);
        assert_eq!(runs[0].tags, vec!["prod".to_string()]);
        assert_eq!(runs[0].kind, "explanation_generator");
    }
}
