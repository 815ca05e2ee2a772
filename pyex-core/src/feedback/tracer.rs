use crate::error::PyexError;
use crate::llm::client::ModelInvocation;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A completed model invocation as logged to the tracing backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub prompt: String,
    pub output: String,
    pub tags: Vec<String>,
    pub model: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

impl RunRecord {
    pub fn from_invocation(
        invocation: &ModelInvocation,
        provider: &str,
        model: &str,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Self {
        Self {
            id: invocation.run_id.clone(),
            name: provider.to_string(),
            kind: invocation.kind.as_str().to_string(),
            prompt: invocation.prompt.clone(),
            output: invocation.raw_response.clone(),
            tags: vec![invocation.tag.clone()],
            model: model.to_string(),
            start_time,
            end_time,
        }
    }

    /// Body for `POST /runs`
    pub fn to_payload(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "run_type": "llm",
            "inputs": { "prompt": self.prompt },
            "outputs": { "text": self.output },
            "tags": self.tags,
            "extra": {
                "metadata": { "type": self.kind, "model": self.model }
            },
            "start_time": self.start_time.to_rfc3339(),
            "end_time": self.end_time.to_rfc3339(),
        })
    }
}

/// Sink for completed runs. Failures are logged by the caller, never fatal.
#[async_trait]
pub trait RunTracer: Send + Sync {
    async fn record_run(&self, run: &RunRecord) -> Result<(), PyexError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::client::InvocationKind;

    #[test]
    fn payload_carries_tag_and_kind() {
        let invocation = ModelInvocation {
            run_id: "1b4c62ee-a79c-426d-8467-78eb075facf5".to_string(),
            prompt: "P".to_string(),
            raw_response: "R".to_string(),
            tag: "test-run".to_string(),
            kind: InvocationKind::ExerciseGenerator,
        };
        let now = Utc::now();
        let payload = RunRecord::from_invocation(&invocation, "openai", "gpt-3.5-turbo", now, now)
            .to_payload();

        assert_eq!(payload["id"], "1b4c62ee-a79c-426d-8467-78eb075facf5");
        assert_eq!(payload["run_type"], "llm");
        assert_eq!(payload["inputs"]["prompt"], "P");
        assert_eq!(payload["outputs"]["text"], "R");
        assert_eq!(payload["tags"][0], "test-run");
        assert_eq!(payload["extra"]["metadata"]["type"], "exercise_generator");
    }
}
