use crate::config::constants::defaults;
use crate::error::PyexError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// One feedback submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub run_id: String,
    pub key: String,
    pub comment: String,
    pub score: f64,
    pub correction: Value,
}

/// Backend acknowledgement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackAck {
    pub feedback_id: String,
    pub run_id: String,
}

/// The external feedback service
#[async_trait]
pub trait FeedbackBackend: Send + Sync {
    async fn create_feedback(&self, entry: &FeedbackEntry) -> Result<FeedbackAck, PyexError>;
}

/// Records feedback against previously logged runs.
///
/// Delivery is a single attempt; failures are returned so the user can resubmit.
#[derive(Clone)]
pub struct FeedbackSink {
    backend: Arc<dyn FeedbackBackend>,
    key: String,
}

impl FeedbackSink {
    pub fn new(backend: Arc<dyn FeedbackBackend>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Submit feedback for `run_id`.
    ///
    /// The score is passed through as given; range clamping is the caller's
    /// job (see [`clamp_score`]).
    pub async fn submit_feedback(
        &self,
        run_id: &str,
        comment: &str,
        score: f64,
        correction: Value,
    ) -> Result<FeedbackAck, PyexError> {
        validate_run_id(run_id)?;

        let entry = FeedbackEntry {
            run_id: run_id.trim().to_string(),
            key: self.key.clone(),
            comment: comment.to_string(),
            score,
            correction,
        };

        match self.backend.create_feedback(&entry).await {
            Ok(ack) => {
                info!(run_id = %ack.run_id, feedback_id = %ack.feedback_id, "feedback recorded");
                Ok(ack)
            }
            Err(err) => {
                warn!(run_id = %entry.run_id, "feedback submission failed: {err}");
                Err(err)
            }
        }
    }
}

/// Run ids are UUIDs; anything else cannot refer to a logged run.
pub fn validate_run_id(run_id: &str) -> Result<(), PyexError> {
    let trimmed = run_id.trim();
    if trimmed.is_empty() || Uuid::parse_str(trimmed).is_err() {
        return Err(PyexError::InvalidRunId(run_id.to_string()));
    }
    Ok(())
}

/// Clamp a user supplied score into `[0, 1]`.
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return defaults::FEEDBACK_SCORE;
    }
    score.clamp(0.0, 1.0)
}

/// Correction payload in the shape the backend stores
pub fn correction_payload(text: &str) -> Value {
    json!({ "additional_correction": text })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryBackend {
        entries: Mutex<Vec<FeedbackEntry>>,
    }

    #[async_trait]
    impl FeedbackBackend for MemoryBackend {
        async fn create_feedback(&self, entry: &FeedbackEntry) -> Result<FeedbackAck, PyexError> {
            self.entries.lock().unwrap().push(entry.clone());
            Ok(FeedbackAck {
                feedback_id: "fb-1".to_string(),
                run_id: entry.run_id.clone(),
            })
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl FeedbackBackend for FailingBackend {
        async fn create_feedback(&self, _entry: &FeedbackEntry) -> Result<FeedbackAck, PyexError> {
            Err(PyexError::Feedback("HTTP 503".to_string()))
        }
    }

    #[test]
    fn score_is_clamped_into_unit_interval() {
        assert_eq!(clamp_score(1.3), 1.0);
        assert_eq!(clamp_score(-0.2), 0.0);
        assert_eq!(clamp_score(0.7), 0.7);
        assert_eq!(clamp_score(f64::NAN), 0.5);
    }

    #[test]
    fn run_id_must_be_a_uuid() {
        assert!(validate_run_id("").is_err());
        assert!(validate_run_id("   ").is_err());
        assert!(validate_run_id("run-42").is_err());
        assert!(validate_run_id("1b4c62ee-a79c-426d-8467-78eb075facf5").is_ok());
    }

    #[tokio::test]
    async fn submits_entry_with_configured_key() {
        let backend = Arc::new(MemoryBackend::default());
        let sink = FeedbackSink::new(backend.clone(), "left_comment");
        let run_id = Uuid::new_v4().to_string();

        let ack = sink
            .submit_feedback(&run_id, "Excellent hint", 0.7, correction_payload("O(n) time"))
            .await
            .unwrap();

        assert_eq!(ack.run_id, run_id);
        let entries = backend.entries.lock().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, "left_comment");
        assert_eq!(entries[0].score, 0.7);
        assert_eq!(entries[0].correction["additional_correction"], "O(n) time");
    }

    #[tokio::test]
    async fn invalid_run_id_never_reaches_backend() {
        let backend = Arc::new(MemoryBackend::default());
        let sink = FeedbackSink::new(backend.clone(), "left_comment");

        let err = sink
            .submit_feedback("", "c", 0.5, Value::Null)
            .await
            .unwrap_err();

        assert!(matches!(err, PyexError::InvalidRunId(_)));
        assert!(backend.entries.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn backend_failure_is_surfaced() {
        let sink = FeedbackSink::new(Arc::new(FailingBackend), "left_comment");
        let err = sink
            .submit_feedback(&Uuid::new_v4().to_string(), "c", 0.5, Value::Null)
            .await
            .unwrap_err();
        assert!(matches!(err, PyexError::Feedback(_)));
        assert!(err.is_recoverable());
    }
}
