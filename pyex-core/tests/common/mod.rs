#![allow(dead_code)]

use async_trait::async_trait;
use pyex_core::PyexError;
use pyex_core::config::GenerationConfig;
use pyex_core::dataset::{JsonDatasetStore, SampleRepository};
use pyex_core::feedback::{FeedbackAck, FeedbackBackend, FeedbackEntry};
use pyex_core::llm::{FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, ModelClient};
use pyex_core::pipeline::GenerationContext;
use serde_json::json;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

pub const VALID_EXERCISE: &str = r#"{"topic":"Array","title":"Sum Pairs","problem_statement":"Count the pairs of train cars whose weights sum to k.","solution":"def count_pairs(cars, k):\n    return 0"}"#;

/// Dataset laid out on disk in a temporary directory
pub struct TestDataset {
    pub temp_dir: TempDir,
}

impl TestDataset {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dataset = Self { temp_dir };
        dataset.write_topic("python", "Easy", "Array", 3);
        dataset.write_topic("python", "Easy", "String", 1);
        dataset.write_topic("python", "Medium", "Graph", 2);
        dataset
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn write_topic(&self, language: &str, difficulty: &str, topic: &str, count: usize) -> PathBuf {
        let dir = self.temp_dir.path().join(language).join(difficulty);
        fs::create_dir_all(&dir).expect("Failed to create dataset directory");

        let records: Vec<_> = (1..=count)
            .map(|i| {
                json!({
                    "title": format!("{topic} sample {i}"),
                    "question": format!("Question {i} about {topic}"),
                    "answer": format!("def solve_{i}():\n    pass"),
                })
            })
            .collect();
        let path = dir.join(format!("{topic}.json"));
        fs::write(&path, serde_json::to_string_pretty(&records).expect("serialize records"))
            .expect("Failed to write dataset file");
        path
    }

    pub fn store(&self) -> Arc<dyn SampleRepository> {
        Arc::new(JsonDatasetStore::new(self.root()))
    }
}

/// Provider that replays canned replies and records each prompt it receives
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProvider {
    pub fn new(replies: &[&str]) -> (Self, Arc<Mutex<Vec<String>>>) {
        let prompts = Arc::new(Mutex::new(Vec::new()));
        let provider = Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: prompts.clone(),
        };
        (provider, prompts)
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-1"
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        self.prompts
            .lock()
            .expect("prompt log poisoned")
            .push(request.messages[0].content.clone());
        let content = self
            .replies
            .lock()
            .expect("reply queue poisoned")
            .pop_front()
            .ok_or_else(|| LLMError::Network("no scripted reply left".to_string()))?;
        Ok(LLMResponse {
            content: Some(content),
            usage: None,
            finish_reason: FinishReason::Stop,
            response_id: None,
        })
    }
}

pub fn scripted_context(
    dataset: &TestDataset,
    replies: &[&str],
) -> (GenerationContext, Arc<Mutex<Vec<String>>>) {
    let (provider, prompts) = ScriptedProvider::new(replies);
    let client = ModelClient::new(Box::new(provider), "test-run");
    let context = GenerationContext::new(client, dataset.store(), GenerationConfig::default());
    (context, prompts)
}

/// Feedback backend that keeps entries in memory
#[derive(Default)]
pub struct MemoryBackend {
    pub entries: Mutex<Vec<FeedbackEntry>>,
}

#[async_trait]
impl FeedbackBackend for MemoryBackend {
    async fn create_feedback(&self, entry: &FeedbackEntry) -> Result<FeedbackAck, PyexError> {
        self.entries
            .lock()
            .expect("entry log poisoned")
            .push(entry.clone());
        Ok(FeedbackAck {
            feedback_id: format!("fb-{}", entry.run_id),
            run_id: entry.run_id.clone(),
        })
    }
}
