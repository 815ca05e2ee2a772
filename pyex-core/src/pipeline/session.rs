use super::cache::{CacheStats, ResultCache};
use super::context::{
    Explanation, GeneratedExercise, GenerationContext, GenerationRequest, generate_exercise,
    generate_explanation,
};
use crate::config::PyexConfig;
use crate::dataset::{JsonDatasetStore, SampleRepository};
use crate::error::PyexError;
use crate::feedback::{FeedbackAck, FeedbackSink, LangSmithClient};
use crate::llm::client::ModelClient;
use serde_json::Value;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Exercise and explanation shown together to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationBundle {
    pub exercise: GeneratedExercise,
    pub explanation: Explanation,
}

/// Which invocation a piece of feedback is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackTarget {
    Exercise,
    Explanation,
}

impl FeedbackTarget {
    pub fn label(&self) -> &'static str {
        match self {
            FeedbackTarget::Exercise => "exercise",
            FeedbackTarget::Explanation => "explanation",
        }
    }
}

/// Per-user state: the current bundle, the result cache and feedback routing
pub struct Session {
    context: GenerationContext,
    cache: ResultCache<GenerationBundle>,
    feedback: Option<FeedbackSink>,
    current: Option<GenerationBundle>,
}

impl Session {
    pub fn new(context: GenerationContext) -> Self {
        let capacity = context.settings().cache_capacity;
        Self {
            context,
            cache: ResultCache::new(capacity),
            feedback: None,
            current: None,
        }
    }

    pub fn with_feedback(mut self, sink: FeedbackSink) -> Self {
        self.feedback = Some(sink);
        self
    }

    /// Wire the configured provider, the JSON dataset under `dataset_root` and,
    /// when credentials are present, the feedback backend.
    pub fn from_config(
        config: &PyexConfig,
        dataset_root: impl Into<PathBuf>,
    ) -> Result<Self, PyexError> {
        let mut client = ModelClient::from_config(&config.model)?;
        let store: Arc<dyn SampleRepository> = Arc::new(JsonDatasetStore::new(dataset_root));

        let feedback = match config.feedback.credentials() {
            Ok(credentials) => {
                let backend = Arc::new(LangSmithClient::new(credentials));
                if config.feedback.trace_runs {
                    client = client.with_tracer(backend.clone());
                }
                Some(FeedbackSink::new(backend, config.feedback.key.clone()))
            }
            Err(err) => {
                debug!("feedback disabled: {err}");
                None
            }
        };

        let context = GenerationContext::new(client, store, config.generation.clone());
        let session = Self::new(context);
        Ok(match feedback {
            Some(sink) => session.with_feedback(sink),
            None => session,
        })
    }

    pub fn context(&self) -> &GenerationContext {
        &self.context
    }

    pub fn has_feedback(&self) -> bool {
        self.feedback.is_some()
    }

    /// Generate an exercise and its explanation.
    ///
    /// With `fresh` set the cache is dropped first, so every explicit
    /// "Generate" talks to the model. The CLI always passes `fresh`; callers
    /// that redisplay a result for unchanged inputs pass `false` to reuse it.
    pub async fn generate(
        &mut self,
        request: &GenerationRequest,
        fresh: bool,
    ) -> Result<GenerationBundle, PyexError> {
        if fresh {
            self.cache.invalidate_all();
        }

        let key = request.cache_key();
        if let Some(bundle) = self.cache.get(&key) {
            debug!(run_id = %bundle.exercise.run_id, "serving cached generation");
            self.current = Some(bundle.clone());
            return Ok(bundle);
        }

        let exercise = generate_exercise(&self.context, request).await?;
        let explanation = generate_explanation(&self.context, &exercise.exercise).await?;
        info!(
            exercise_run_id = %exercise.run_id,
            explanation_run_id = %explanation.run_id,
            "generation bundle ready"
        );

        let bundle = GenerationBundle {
            exercise,
            explanation,
        };
        self.cache.insert(key, bundle.clone());
        self.current = Some(bundle.clone());
        Ok(bundle)
    }

    /// The bundle most recently generated or served from cache
    pub fn current(&self) -> Option<&GenerationBundle> {
        self.current.as_ref()
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    /// Run id feedback for `target` would attach to
    pub fn run_id_for(&self, target: FeedbackTarget) -> Option<&str> {
        self.current.as_ref().map(|bundle| match target {
            FeedbackTarget::Exercise => bundle.exercise.run_id.as_str(),
            FeedbackTarget::Explanation => bundle.explanation.run_id.as_str(),
        })
    }

    /// Record feedback against the current exercise or explanation.
    pub async fn submit_feedback(
        &self,
        target: FeedbackTarget,
        comment: &str,
        score: f64,
        correction: Value,
    ) -> Result<FeedbackAck, PyexError> {
        let sink = self.feedback.as_ref().ok_or_else(|| {
            PyexError::Config("feedback backend is not configured".to_string())
        })?;
        let run_id = self.run_id_for(target).unwrap_or_default();
        sink.submit_feedback(run_id, comment, score, correction)
            .await
    }

    pub fn topics(&self, language: &str) -> Result<Vec<String>, PyexError> {
        Ok(self.context.samples().topics(language)?)
    }
}
