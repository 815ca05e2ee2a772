//! Configuration for PyEx.
//!
//! Everything is driven by `pyex.toml`. Sections default independently, so a
//! file only needs the keys it changes:
//!
//! ```toml
//! [model]
//! provider = "openai"
//! model = "gpt-3.5-turbo"
//! temperature = 0.8
//!
//! [generation]
//! max_repair_attempts = 3
//!
//! [dataset]
//! root = "dataset"
//!
//! [feedback]
//! endpoint_env = "LANGCHAIN_ENDPOINT"
//! api_key_env = "LANGCHAIN_API_KEY"
//! ```

pub mod api_keys;
pub mod constants;
pub mod core;
pub mod loader;

pub use self::core::{
    DatasetConfig, FeedbackConfig, FeedbackCredentials, GenerationConfig, ModelConfig,
};
pub use loader::{ConfigManager, PyexConfig};
