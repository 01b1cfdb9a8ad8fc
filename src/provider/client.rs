//! Provider client construction.
//!
//! Builds one rig-core client (or the Vertex client) per [`ProviderKind`]
//! from [`Settings`]. A missing key never fails construction: the client is
//! built with an empty key and the provider rejects it when invoked.

use rig::client::Nothing;
use rig::providers::{anthropic, gemini, groq, ollama, openai, openrouter};

use super::kind::ProviderKind;
use super::vertex::VertexClient;
use crate::config::Settings;
use crate::constants;
use crate::error::ProviderError;

/// Internal enum wrapping provider-specific clients.
///
/// Fireworks and DeepInfra speak the OpenAI wire format but only implement
/// Chat Completions, so they get their own variant rather than sharing
/// `OpenAI`, whose default path is the Responses API.
pub enum ProviderClient {
    OpenAI(openai::Client),
    /// OpenAI-wire client for a third-party Chat Completions endpoint.
    OpenAICompatible(openai::Client),
    Ollama(ollama::Client),
    Anthropic(anthropic::Client),
    Groq(groq::Client),
    Gemini(gemini::Client),
    OpenRouter(openrouter::Client),
    Vertex(VertexClient),
    /// The client library refused to build; invoking fails with the reason.
    Unavailable(String),
}

impl std::fmt::Debug for ProviderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAI(_) => f.write_str("OpenAI"),
            Self::OpenAICompatible(_) => f.write_str("OpenAICompatible"),
            Self::Ollama(_) => f.write_str("Ollama"),
            Self::Anthropic(_) => f.write_str("Anthropic"),
            Self::Groq(_) => f.write_str("Groq"),
            Self::Gemini(_) => f.write_str("Gemini"),
            Self::OpenRouter(_) => f.write_str("OpenRouter"),
            Self::Vertex(v) => v.fmt(f),
            Self::Unavailable(reason) => f.debug_tuple("Unavailable").field(reason).finish(),
        }
    }
}

impl ProviderClient {
    /// Creates the client for `kind` from the loaded settings.
    ///
    /// # Errors
    ///
    /// Only Vertex can fail, when `VERTEX_CREDENTIALS` is malformed. Every
    /// other construction failure becomes [`ProviderClient::Unavailable`].
    pub fn from_settings(kind: ProviderKind, settings: &Settings) -> Result<Self, ProviderError> {
        let key = |value: &Option<String>| value.clone().unwrap_or_default();

        let built = match kind {
            ProviderKind::OpenAI => {
                let api_key = key(&settings.openai_api_key);
                match settings.openai_base_url.as_deref() {
                    Some(base_url) => openai::Client::builder()
                        .api_key(api_key.as_str())
                        .base_url(base_url)
                        .build()
                        .map(Self::OpenAI)
                        .map_err(|e| e.to_string()),
                    None => openai::Client::new(&api_key)
                        .map(Self::OpenAI)
                        .map_err(|e| e.to_string()),
                }
            }
            ProviderKind::Ollama => {
                let base_url = settings
                    .ollama_base_url
                    .as_deref()
                    .unwrap_or(constants::OLLAMA_DEFAULT_BASE_URL);
                ollama::Client::builder()
                    .api_key(Nothing)
                    .base_url(base_url.trim_end_matches('/'))
                    .build()
                    .map(Self::Ollama)
                    .map_err(|e| e.to_string())
            }
            ProviderKind::Anthropic => anthropic::Client::new(&key(&settings.anthropic_api_key))
                .map(Self::Anthropic)
                .map_err(|e| e.to_string()),
            ProviderKind::Groq => groq::Client::new(&key(&settings.groq_api_key))
                .map(Self::Groq)
                .map_err(|e| e.to_string()),
            ProviderKind::Google => {
                gemini::Client::new(&key(&settings.google_generative_ai_api_key))
                    .map(Self::Gemini)
                    .map_err(|e| e.to_string())
            }
            ProviderKind::OpenRouter => {
                openrouter::Client::new(&key(&settings.openrouter_api_key))
                    .map(Self::OpenRouter)
                    .map_err(|e| e.to_string())
            }
            ProviderKind::Fireworks => openai_compatible(
                &key(&settings.fireworks_api_key),
                constants::FIREWORKS_BASE_URL,
            ),
            ProviderKind::DeepInfra => openai_compatible(
                &key(&settings.deepinfra_api_key),
                constants::DEEPINFRA_BASE_URL,
            ),
            ProviderKind::Vertex => {
                return VertexClient::from_settings(settings).map(Self::Vertex);
            }
        };

        Ok(built.unwrap_or_else(|reason| {
            tracing::warn!(provider = %kind, %reason, "provider client unavailable");
            Self::Unavailable(reason)
        }))
    }

    /// Whether the client exposes the Chat Completions invocation path.
    pub fn supports_chat_dialect(&self) -> bool {
        matches!(self, Self::OpenAI(_) | Self::OpenAICompatible(_))
    }

    /// The construction failure, if the client could not be built.
    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            Self::Unavailable(reason) => Some(reason),
            _ => None,
        }
    }
}

/// OpenAI-wire client pointed at a third-party Chat Completions endpoint.
fn openai_compatible(api_key: &str, base_url: &str) -> Result<ProviderClient, String> {
    openai::Client::builder()
        .api_key(api_key)
        .base_url(base_url)
        .build()
        .map(ProviderClient::OpenAICompatible)
        .map_err(|e| e.to_string())
}
