use crate::config::constants::{defaults, reference_exercises};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Exercise generation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GenerationConfig {
    /// Programming language requested from the model
    #[serde(default = "default_language")]
    pub language: String,

    /// Upper bound on schema repair requests after the first response
    #[serde(default = "default_max_repair_attempts")]
    pub max_repair_attempts: usize,

    /// Reference exercises used when the caller does not pick a count
    #[serde(default = "default_reference_count")]
    pub default_reference_count: usize,

    /// Number of generation results kept in the session cache
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            max_repair_attempts: default_max_repair_attempts(),
            default_reference_count: default_reference_count(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

/// Sample dataset location
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatasetConfig {
    /// Root directory laid out as `<language>/<Difficulty>/<Topic>.json`
    #[serde(default = "default_dataset_root")]
    pub root: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            root: default_dataset_root(),
        }
    }
}

impl DatasetConfig {
    /// Resolve the dataset root; relative paths are taken from `base`
    pub fn resolve_root(&self, base: Option<&Path>) -> PathBuf {
        let root = PathBuf::from(&self.root);
        match base {
            Some(base) if root.is_relative() => base.join(root),
            _ => root,
        }
    }
}

fn default_language() -> String {
    defaults::LANGUAGE.to_string()
}
fn default_max_repair_attempts() -> usize {
    defaults::MAX_REPAIR_ATTEMPTS
}
fn default_reference_count() -> usize {
    reference_exercises::DEFAULT
}
fn default_cache_capacity() -> usize {
    defaults::CACHE_CAPACITY
}
fn default_dataset_root() -> String {
    defaults::DATASET_ROOT.to_string()
}
