//! LLM provider registry for switchyard.
//!
//! Wraps rig-core's provider clients (and a small Vertex client) behind a
//! fixed registry keyed by [`ProviderKind`], and resolves model names into
//! [`ModelHandle`]s and [`EmbeddingHandle`]s.

mod client;
mod handle;
mod kind;
mod listing;
mod registry;
pub mod vertex;

pub use client::ProviderClient;
pub use handle::{Dialect, EmbeddingHandle, ModelHandle};
pub use kind::{
    default_embedding_model_for, default_model_for, ProviderKind, CHAT_DIALECT_PROVIDERS,
};
pub use listing::{list_models, list_ollama_models};
pub use registry::{
    default_provider_for, get_default_provider, get_embedding_model, get_model, init, registry,
    ProviderEntry, ProviderRegistry,
};
