//! Bounded repair loop for structured model output.
//!
//! A completion is parsed strictly. When it does not match the schema the
//! model is shown its own completion together with the parse error and asked
//! again, at most `max_repair_attempts` times.

use super::Exercise;
use super::schema::{SchemaError, parse_exercise};
use crate::error::PyexError;
use crate::llm::client::{InvocationKind, ModelClient};
use crate::prompts::build_repair_prompt;
use tracing::{debug, warn};

/// An exercise that passed validation, with the repair trail that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedExercise {
    pub exercise: Exercise,
    pub repair_attempts: usize,
    /// Run ids of the repair invocations, oldest first
    pub repair_run_ids: Vec<String>,
}

enum RepairState {
    Parsing { raw: String },
    Repairing { raw: String, error: SchemaError },
    Done(Exercise),
    Failed { raw: String, error: SchemaError },
}

/// Validate `raw_response` against the exercise schema, asking `client` for
/// corrections when it does not conform.
///
/// Transport failures during a repair propagate unchanged. Running out of
/// repair attempts yields [`PyexError::ExerciseGenerationFailed`] carrying the
/// last raw output.
pub async fn parse_response(
    raw_response: &str,
    client: &ModelClient,
    original_prompt: &str,
    max_repair_attempts: usize,
) -> Result<ValidatedExercise, PyexError> {
    let format_instructions = Exercise::format_instructions();
    let mut attempts = 0usize;
    let mut repair_run_ids = Vec::new();
    let mut state = RepairState::Parsing {
        raw: raw_response.to_string(),
    };

    loop {
        state = match state {
            RepairState::Parsing { raw } => match parse_exercise(&raw) {
                Ok(exercise) => RepairState::Done(exercise),
                Err(error) if attempts < max_repair_attempts => {
                    debug!(attempt = attempts, "completion rejected: {error}");
                    RepairState::Repairing { raw, error }
                }
                Err(error) => RepairState::Failed { raw, error },
            },
            RepairState::Repairing { raw, error } => {
                attempts += 1;
                warn!(
                    attempt = attempts,
                    max = max_repair_attempts,
                    "requesting schema repair: {error}"
                );
                let prompt = build_repair_prompt(
                    &format_instructions,
                    original_prompt,
                    &raw,
                    &error.to_string(),
                );
                let invocation = client
                    .invoke_prompt(prompt, InvocationKind::ExerciseRepair)
                    .await?;
                repair_run_ids.push(invocation.run_id);
                RepairState::Parsing {
                    raw: invocation.raw_response,
                }
            }
            RepairState::Done(exercise) => {
                return Ok(ValidatedExercise {
                    exercise,
                    repair_attempts: attempts,
                    repair_run_ids,
                });
            }
            RepairState::Failed { raw, error } => {
                warn!(attempts, "giving up on malformed completion: {error}");
                return Err(PyexError::ExerciseGenerationFailed {
                    attempts,
                    last_error: error.to_string(),
                    last_output: raw,
                });
            }
        };
    }
}
