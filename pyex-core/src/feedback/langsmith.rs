use super::sink::{FeedbackAck, FeedbackBackend, FeedbackEntry};
use super::tracer::{RunRecord, RunTracer};
use crate::config::FeedbackCredentials;
use crate::error::PyexError;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

const API_KEY_HEADER: &str = "x-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for a LangSmith-compatible runs/feedback API
pub struct LangSmithClient {
    http_client: HttpClient,
    endpoint: String,
    api_key: String,
}

impl LangSmithClient {
    pub fn new(credentials: FeedbackCredentials) -> Self {
        let http_client = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| HttpClient::new());
        Self {
            http_client,
            endpoint: credentials.endpoint.trim_end_matches('/').to_string(),
            api_key: credentials.api_key,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn feedback_body(feedback_id: &str, entry: &FeedbackEntry) -> Value {
        json!({
            "id": feedback_id,
            "run_id": entry.run_id,
            "key": entry.key,
            "score": entry.score,
            "comment": entry.comment,
            "correction": entry.correction,
            "feedback_source": { "type": "api" },
        })
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, String> {
        let url = format!("{}/{path}", self.endpoint);
        debug!(%url, "posting to feedback backend");

        let response = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| format!("Network error: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(format!("HTTP {status}: {error_text}"));
        }

        // Some deployments answer 204 with no body.
        Ok(response.json::<Value>().await.unwrap_or(Value::Null))
    }
}

#[async_trait]
impl FeedbackBackend for LangSmithClient {
    async fn create_feedback(&self, entry: &FeedbackEntry) -> Result<FeedbackAck, PyexError> {
        let feedback_id = Uuid::new_v4().to_string();
        let body = Self::feedback_body(&feedback_id, entry);
        let response = self
            .post("feedback", &body)
            .await
            .map_err(PyexError::Feedback)?;

        let feedback_id = response
            .get("id")
            .and_then(|id| id.as_str())
            .map(|id| id.to_string())
            .unwrap_or(feedback_id);

        Ok(FeedbackAck {
            feedback_id,
            run_id: entry.run_id.clone(),
        })
    }
}

#[async_trait]
impl RunTracer for LangSmithClient {
    async fn record_run(&self, run: &RunRecord) -> Result<(), PyexError> {
        self.post("runs", &run.to_payload())
            .await
            .map(|_| ())
            .map_err(PyexError::Feedback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_body_matches_backend_shape() {
        let entry = FeedbackEntry {
            run_id: "1b4c62ee-a79c-426d-8467-78eb075facf5".to_string(),
            key: "left_comment".to_string(),
            comment: "Excellent hint generation".to_string(),
            score: 0.7,
            correction: json!({"additional_explanation": "The code runs in O(n) time"}),
        };
        let body = LangSmithClient::feedback_body("fb-id", &entry);

        assert_eq!(body["id"], "fb-id");
        assert_eq!(body["run_id"], entry.run_id);
        assert_eq!(body["key"], "left_comment");
        assert_eq!(body["score"], 0.7);
        assert_eq!(body["comment"], "Excellent hint generation");
        assert_eq!(
            body["correction"]["additional_explanation"],
            "The code runs in O(n) time"
        );
    }

    #[test]
    fn endpoint_is_normalized() {
        let client = LangSmithClient::new(FeedbackCredentials {
            endpoint: "https://api.smith.example/".to_string(),
            api_key: "ls-key".to_string(),
        });
        assert_eq!(client.endpoint(), "https://api.smith.example");
    }

    #[tokio::test]
    async fn unreachable_backend_is_feedback_error() {
        let client = LangSmithClient::new(FeedbackCredentials {
            endpoint: "http://127.0.0.1:9".to_string(),
            api_key: "ls-key".to_string(),
        });
        let entry = FeedbackEntry {
            run_id: Uuid::new_v4().to_string(),
            key: "left_comment".to_string(),
            comment: String::new(),
            score: 0.5,
            correction: Value::Null,
        };
        let err = client.create_feedback(&entry).await.unwrap_err();
        assert!(matches!(err, PyexError::Feedback(msg) if msg.contains("Network error")));
    }
}
