//! # LLM Integration Layer
//!
//! A single completion call sits behind [`provider::LLMProvider`]. The
//! built-in [`providers::OpenAIProvider`] talks to OpenAI or to any
//! OpenAI-compatible server (llama.cpp `server` is registered as `local`).
//!
//! [`ModelClient`] wraps a provider with the bookkeeping the rest of the
//! crate needs: a fresh run id per call, the provenance tag, and optional run
//! tracing so feedback can be attached to the call later.

pub mod client;
pub mod error_display;
pub mod factory;
pub mod provider;
pub mod providers;

pub use client::{InvocationKind, ModelClient, ModelInvocation};
pub use factory::{LLMFactory, ProviderConfig, create_provider_with_config};
pub use provider::{FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, Message};
pub use providers::OpenAIProvider;
