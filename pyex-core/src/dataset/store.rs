use super::{DatasetError, SampleKey, SampleRecord};
use crate::config::constants::reference_exercises;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

const RECORD_EXTENSION: &str = "json";

/// Read-only source of reference exercises
pub trait SampleRepository: Send + Sync {
    /// All records for `key`, in stored order
    fn get(&self, key: &SampleKey) -> Result<Vec<SampleRecord>, DatasetError>;

    /// Topics available for `language`, sorted
    fn topics(&self, language: &str) -> Result<Vec<String>, DatasetError>;

    /// `n` distinct records for `key`, drawn at random
    fn sample(&self, key: &SampleKey, n: usize) -> Result<Vec<SampleRecord>, DatasetError> {
        let pool = self.get(key)?;
        select_random_n_from(&pool, n, &mut rand::thread_rng())
    }
}

/// Dataset stored as JSON files under a root directory
#[derive(Debug, Clone)]
pub struct JsonDatasetStore {
    root: PathBuf,
}

impl JsonDatasetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the records for `key`
    pub fn dataset_path(&self, key: &SampleKey) -> PathBuf {
        self.root
            .join(&key.language)
            .join(key.difficulty.as_str())
            .join(format!("{}.{RECORD_EXTENSION}", key.topic))
    }
}

impl SampleRepository for JsonDatasetStore {
    fn get(&self, key: &SampleKey) -> Result<Vec<SampleRecord>, DatasetError> {
        if key.topic.trim().is_empty() {
            return Err(DatasetError::EmptyTopic);
        }
        load_records(&self.dataset_path(key))
    }

    fn topics(&self, language: &str) -> Result<Vec<String>, DatasetError> {
        let language_root = self.root.join(language);
        if !language_root.is_dir() {
            return Err(DatasetError::NotFound(language_root));
        }

        let mut topics = BTreeSet::new();
        for entry in WalkDir::new(&language_root)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(root = %language_root.display(), "skipping unreadable dataset entry: {err}");
                    None
                }
            })
        {
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(RECORD_EXTENSION)
            {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    topics.insert(stem.to_string());
                }
            }
        }
        Ok(topics.into_iter().collect())
    }
}

/// Load the collection at `dataset_path` and draw `n` distinct records from it.
pub fn select_random_n_questions(
    dataset_path: &Path,
    n: usize,
) -> Result<Vec<SampleRecord>, DatasetError> {
    let pool = load_records(dataset_path)?;
    select_random_n_from(&pool, n, &mut rand::thread_rng())
}

/// Draw `n` distinct records from `pool` without replacement.
///
/// `n` must lie in the reference exercise bounds and the pool must hold at
/// least `n` records.
pub fn select_random_n_from<R: Rng + ?Sized>(
    pool: &[SampleRecord],
    n: usize,
    rng: &mut R,
) -> Result<Vec<SampleRecord>, DatasetError> {
    if !(reference_exercises::MIN..=reference_exercises::MAX).contains(&n) {
        return Err(DatasetError::CountOutOfRange {
            requested: n,
            min: reference_exercises::MIN,
            max: reference_exercises::MAX,
        });
    }
    if pool.len() < n {
        return Err(DatasetError::InsufficientSamples {
            requested: n,
            available: pool.len(),
        });
    }

    Ok(pool.choose_multiple(rng, n).cloned().collect())
}

fn load_records(path: &Path) -> Result<Vec<SampleRecord>, DatasetError> {
    if !path.is_file() {
        return Err(DatasetError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut records: Vec<SampleRecord> =
        serde_json::from_str(&content).map_err(|source| DatasetError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();
    for record in records.iter_mut().filter(|r| r.topic.is_empty()) {
        record.topic = stem.clone();
    }

    debug!(path = %path.display(), count = records.len(), "loaded sample records");
    Ok(records)
}
