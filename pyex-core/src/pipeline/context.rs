use super::cache::ResultCache;
use crate::config::GenerationConfig;
use crate::config::constants::reference_exercises;
use crate::dataset::{DatasetError, Difficulty, SampleKey, SampleRepository};
use crate::error::PyexError;
use crate::exercise::{Exercise, parse_response};
use crate::llm::client::{InvocationKind, ModelClient};
use crate::prompts::{
    EXPLANATION_REQUEST, build_explanation_prompt, build_exercise_prompt, exercise_request,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Dependencies for one generation run
pub struct GenerationContext {
    client: ModelClient,
    samples: Arc<dyn SampleRepository>,
    settings: GenerationConfig,
}

impl GenerationContext {
    pub fn new(
        client: ModelClient,
        samples: Arc<dyn SampleRepository>,
        settings: GenerationConfig,
    ) -> Self {
        Self {
            client,
            samples,
            settings,
        }
    }

    pub fn client(&self) -> &ModelClient {
        &self.client
    }

    pub fn samples(&self) -> &dyn SampleRepository {
        self.samples.as_ref()
    }

    pub fn settings(&self) -> &GenerationConfig {
        &self.settings
    }
}

/// What the user asked for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub language: String,
    pub difficulty: Difficulty,
    pub topic: String,
    /// Free-text theme the problem statement must mention
    pub context: String,
    pub reference_count: usize,
}

impl GenerationRequest {
    /// Validate raw user input.
    ///
    /// `difficulty` is matched case-insensitively and `reference_count` must
    /// lie within the reference exercise bounds.
    pub fn new(
        language: impl Into<String>,
        difficulty: &str,
        topic: impl Into<String>,
        context: impl Into<String>,
        reference_count: usize,
    ) -> Result<Self, PyexError> {
        let difficulty: Difficulty = difficulty.parse()?;
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(DatasetError::EmptyTopic.into());
        }
        if !(reference_exercises::MIN..=reference_exercises::MAX).contains(&reference_count) {
            return Err(DatasetError::CountOutOfRange {
                requested: reference_count,
                min: reference_exercises::MIN,
                max: reference_exercises::MAX,
            }
            .into());
        }

        Ok(Self {
            language: language.into(),
            difficulty,
            topic,
            context: context.into(),
            reference_count,
        })
    }

    pub fn sample_key(&self) -> SampleKey {
        SampleKey::new(&self.language, self.difficulty, &self.topic)
    }

    /// Stable cache key for this request
    pub fn cache_key(&self) -> String {
        let count = self.reference_count.to_string();
        ResultCache::<()>::digest(&[
            self.language.as_str(),
            self.difficulty.as_str(),
            self.topic.as_str(),
            count.as_str(),
            self.context.as_str(),
        ])
    }
}

/// A validated exercise and the invocation that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedExercise {
    pub exercise: Exercise,
    /// Run id of the first generation call; feedback attaches here
    pub run_id: String,
    pub prompt: String,
    pub repair_attempts: usize,
    pub repair_run_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Explanation {
    pub text: String,
    pub run_id: String,
}

/// Sample reference exercises, prompt the model and validate its answer.
pub async fn generate_exercise(
    ctx: &GenerationContext,
    request: &GenerationRequest,
) -> Result<GeneratedExercise, PyexError> {
    let samples = ctx
        .samples
        .sample(&request.sample_key(), request.reference_count)?;

    let template = build_exercise_prompt(&samples, &request.topic);
    let question = exercise_request(&request.language, &request.context);
    let instructions = Exercise::format_instructions();

    let invocation = ctx
        .client
        .invoke(
            &template,
            Some(&instructions),
            &question,
            InvocationKind::ExerciseGenerator,
        )
        .await?;

    let validated = parse_response(
        &invocation.raw_response,
        &ctx.client,
        &invocation.prompt,
        ctx.settings.max_repair_attempts,
    )
    .await?;

    info!(
        run_id = %invocation.run_id,
        topic = %request.topic,
        difficulty = %request.difficulty,
        repairs = validated.repair_attempts,
        "exercise generated"
    );

    Ok(GeneratedExercise {
        exercise: validated.exercise,
        run_id: invocation.run_id,
        prompt: invocation.prompt,
        repair_attempts: validated.repair_attempts,
        repair_run_ids: validated.repair_run_ids,
    })
}

/// Ask the model to explain the solution of `exercise`.
pub async fn generate_explanation(
    ctx: &GenerationContext,
    exercise: &Exercise,
) -> Result<Explanation, PyexError> {
    let template = build_explanation_prompt(&exercise.problem_statement, &exercise.solution);
    let invocation = ctx
        .client
        .invoke(
            &template,
            None,
            EXPLANATION_REQUEST,
            InvocationKind::ExplanationGenerator,
        )
        .await?;

    Ok(Explanation {
        text: invocation.raw_response,
        run_id: invocation.run_id,
    })
}
