//! Error type for provider resolution and invocation.

use std::path::PathBuf;

use thiserror::Error;

use crate::provider::ProviderKind;

const SUPPORTED_PROVIDERS: &str =
    "openai, ollama, anthropic, groq, google, openrouter, fireworks, deepinfra, vertex";

/// Errors surfaced by the registry and by model handles.
///
/// Resolution only ever fails with [`UnknownProvider`](Self::UnknownProvider),
/// [`EmbeddingsUnsupported`](Self::EmbeddingsUnsupported) or a lifecycle
/// error. Everything else is raised when a handle is invoked.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {name}. Supported: {list}", name = .0, list = SUPPORTED_PROVIDERS)]
    UnknownProvider(String),

    #[error("invalid VERTEX_CREDENTIALS: {0}")]
    InvalidCredentials(String),

    #[error("provider {provider} is unavailable: {reason}")]
    Unavailable {
        provider: ProviderKind,
        reason: String,
    },

    #[error("provider {0} does not serve embedding models")]
    EmbeddingsUnsupported(ProviderKind),

    #[error("provider registry has not been initialized")]
    NotInitialized,

    #[error("provider registry is already initialized")]
    AlreadyInitialized,

    #[error(transparent)]
    Prompt(#[from] rig::completion::PromptError),

    #[error(transparent)]
    Embedding(#[from] rig::embeddings::EmbeddingError),

    #[error("streaming error: {0}")]
    Stream(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("vertex authentication failed: {0}")]
    Auth(String),

    #[error("failed to read key file {path:?}: {source}")]
    KeyFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unexpected response: {0}")]
    Response(String),
}
