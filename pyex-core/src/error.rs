//! Error taxonomy shared by the generation pipeline and the feedback sink.
//!
//! Every variant is scoped to a single user interaction: callers render it
//! with [`PyexError::user_message`] and keep the process alive.

use crate::dataset::DatasetError;
use crate::llm::provider::LLMError;

pub type Result<T> = std::result::Result<T, PyexError>;

#[derive(Debug, thiserror::Error)]
pub enum PyexError {
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Exercise generation failed after {attempts} repair attempt(s): {last_error}")]
    ExerciseGenerationFailed {
        attempts: usize,
        last_error: String,
        last_output: String,
    },

    #[error("Invalid run id: {0:?}")]
    InvalidRunId(String),

    #[error("Feedback submission failed: {0}")]
    Feedback(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<LLMError> for PyexError {
    fn from(err: LLMError) -> Self {
        PyexError::ModelUnavailable(err.to_string())
    }
}

impl PyexError {
    /// Whether the user can simply resubmit the same action.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PyexError::InvalidRunId(_) | PyexError::Feedback(_))
    }

    /// Short hint shown under the error line.
    pub fn hint(&self) -> &'static str {
        match self {
            PyexError::Dataset(_) => "Pick another topic, difficulty or reference count.",
            PyexError::ModelUnavailable(_) => {
                "Check the API key and network connection, then try again."
            }
            PyexError::ExerciseGenerationFailed { .. } => {
                "The model kept returning malformed output. Generate again or switch model."
            }
            PyexError::InvalidRunId(_) => "Generate an exercise first, then submit feedback.",
            PyexError::Feedback(_) => "Your feedback was not recorded. Submit it again.",
            PyexError::Config(_) => "Fix pyex.toml or the required environment variables.",
        }
    }

    /// Readable multi-line rendering for the terminal. Never includes a backtrace.
    pub fn user_message(&self) -> String {
        let mut message = format!("{self}\n  hint: {}", self.hint());
        if let PyexError::ExerciseGenerationFailed { last_output, .. } = self {
            if !last_output.trim().is_empty() {
                message.push_str("\n  last model output:\n");
                for line in last_output.lines() {
                    message.push_str("    ");
                    message.push_str(line);
                    message.push('\n');
                }
            }
        }
        message
    }
}
