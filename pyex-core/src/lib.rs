//! # pyex-core - Runtime for PyEx
//!
//! `pyex-core` powers the PyEx exercise generator. It provides the building
//! blocks for prompting an LLM with reference exercises, validating the
//! structured response, explaining the generated solution and recording
//! human feedback against each model invocation.
//!
//! ## Architecture Overview
//!
//! - `config/`: `pyex.toml` loader, defaults, constants and credential lookup.
//! - `dataset/`: sample store that selects reference exercises from disk.
//! - `prompts/`: deterministic prompt builders.
//! - `llm/`: provider abstraction, OpenAI-compatible provider and the
//!   run-tagging [`llm::ModelClient`].
//! - `exercise/`: the exercise schema and the bounded repair loop.
//! - `feedback/`: feedback submission and run tracing.
//! - `pipeline/`: explicit generation context, result cache and session.
//!
//! ## Quickstart
//!
//! ```rust,ignore
//! use pyex_core::config::ConfigManager;
//! use pyex_core::pipeline::{GenerationRequest, Session};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let manager = ConfigManager::load()?;
//!     let mut session = Session::from_config(manager.config(), manager.dataset_root())?;
//!     let request = GenerationRequest::new("python", "Easy", "Array", "trains", 2)?;
//!     let bundle = session.generate(&request, true).await?;
//!     println!("{}", bundle.exercise.exercise.title);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod exercise;
pub mod feedback;
pub mod llm;
pub mod pipeline;
pub mod prompts;

pub use error::{PyexError, Result};
