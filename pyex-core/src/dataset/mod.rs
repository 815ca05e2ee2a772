//! Reference exercise dataset.
//!
//! Records live on disk as `<root>/<language>/<Difficulty>/<Topic>.json`,
//! each file holding a JSON array of `{title, question, answer}` objects.

pub mod store;

pub use store::{
    JsonDatasetStore, SampleRepository, select_random_n_from, select_random_n_questions,
};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// One reference exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRecord {
    #[serde(default)]
    pub topic: String,
    pub title: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(DatasetError::UnknownDifficulty(other.to_string())),
        }
    }
}

/// Locates one record collection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SampleKey {
    pub language: String,
    pub difficulty: Difficulty,
    pub topic: String,
}

impl SampleKey {
    pub fn new(language: impl Into<String>, difficulty: Difficulty, topic: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            difficulty,
            topic: topic.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("no sample collection at {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not a valid record collection: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("requested {requested} reference exercises but only {available} are available")]
    InsufficientSamples { requested: usize, available: usize },

    #[error("reference exercise count must be between {min} and {max}, got {requested}")]
    CountOutOfRange {
        requested: usize,
        min: usize,
        max: usize,
    },

    #[error("unknown difficulty {0:?}; expected Easy, Medium or Hard")]
    UnknownDifficulty(String),

    #[error("topic must not be empty")]
    EmptyTopic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(" HARD ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!(matches!(
            "extreme".parse::<Difficulty>(),
            Err(DatasetError::UnknownDifficulty(_))
        ));
    }

    #[test]
    fn record_topic_is_optional_on_disk() {
        let record: SampleRecord =
            serde_json::from_str(r#"{"title":"T","question":"Q","answer":"A"}"#).unwrap();
        assert!(record.topic.is_empty());
    }
}
