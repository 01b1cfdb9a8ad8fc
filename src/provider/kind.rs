//! Provider kind enumeration and default model mapping.
//!
//! Defines [`ProviderKind`], the closed set of backends the registry knows,
//! and [`default_model_for`] / [`default_embedding_model_for`] which return
//! a sensible model for each provider when the caller names none.

use std::fmt;
use std::str::FromStr;

use crate::constants;
use crate::error::ProviderError;

/// Identifies which LLM provider to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderKind {
    /// OpenAI (GPT models).
    OpenAI,
    /// Ollama (local models via the native `/api/chat` API).
    Ollama,
    /// Anthropic (Claude models).
    Anthropic,
    /// Groq.
    Groq,
    /// Google Generative AI (Gemini API).
    Google,
    /// OpenRouter (multi-provider gateway).
    OpenRouter,
    /// Fireworks (OpenAI-compatible Chat Completions API).
    Fireworks,
    /// DeepInfra (OpenAI-compatible Chat Completions API).
    DeepInfra,
    /// Google Vertex AI.
    Vertex,
}

/// Providers forced onto the Chat Completions dialect instead of their
/// client's default invocation path.
pub const CHAT_DIALECT_PROVIDERS: &[ProviderKind] =
    &[ProviderKind::OpenAI, ProviderKind::DeepInfra];

impl ProviderKind {
    /// Every provider, in declaration order.
    pub const ALL: [ProviderKind; 9] = [
        ProviderKind::OpenAI,
        ProviderKind::Ollama,
        ProviderKind::Anthropic,
        ProviderKind::Groq,
        ProviderKind::Google,
        ProviderKind::OpenRouter,
        ProviderKind::Fireworks,
        ProviderKind::DeepInfra,
        ProviderKind::Vertex,
    ];

    /// Lowercase identifier, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenAI => "openai",
            ProviderKind::Ollama => "ollama",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Groq => "groq",
            ProviderKind::Google => "google",
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Fireworks => "fireworks",
            ProviderKind::DeepInfra => "deepinfra",
            ProviderKind::Vertex => "vertex",
        }
    }

    /// Whether this provider's client has an embedding accessor.
    pub fn serves_embeddings(&self) -> bool {
        default_embedding_model_for(*self).is_some()
    }

    /// Whether this provider is in the dialect-override set.
    pub fn wants_chat_dialect(&self) -> bool {
        CHAT_DIALECT_PROVIDERS.contains(self)
    }
}

impl FromStr for ProviderKind {
    type Err = ProviderError;

    /// Matching is case-insensitive. Unknown names are a lookup failure.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        ProviderKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| ProviderError::UnknownProvider(s.to_string()))
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the default chat model identifier for a given provider.
pub fn default_model_for(provider: ProviderKind) -> &'static str {
    match provider {
        ProviderKind::OpenAI => constants::DEFAULT_OPENAI_MODEL,
        ProviderKind::Ollama => constants::DEFAULT_OLLAMA_MODEL,
        ProviderKind::Anthropic => constants::DEFAULT_ANTHROPIC_MODEL,
        ProviderKind::Groq => constants::DEFAULT_GROQ_MODEL,
        ProviderKind::Google => constants::DEFAULT_GOOGLE_MODEL,
        ProviderKind::OpenRouter => constants::DEFAULT_OPENROUTER_MODEL,
        ProviderKind::Fireworks => constants::DEFAULT_FIREWORKS_MODEL,
        ProviderKind::DeepInfra => constants::DEFAULT_DEEPINFRA_MODEL,
        ProviderKind::Vertex => constants::DEFAULT_VERTEX_MODEL,
    }
}

/// Returns the default embedding model, or `None` for providers without one.
pub fn default_embedding_model_for(provider: ProviderKind) -> Option<&'static str> {
    match provider {
        ProviderKind::OpenAI => Some(constants::DEFAULT_OPENAI_EMBEDDING_MODEL),
        ProviderKind::Ollama => Some(constants::DEFAULT_OLLAMA_EMBEDDING_MODEL),
        ProviderKind::Google => Some(constants::DEFAULT_GOOGLE_EMBEDDING_MODEL),
        ProviderKind::Fireworks => Some(constants::DEFAULT_FIREWORKS_EMBEDDING_MODEL),
        ProviderKind::DeepInfra => Some(constants::DEFAULT_DEEPINFRA_EMBEDDING_MODEL),
        ProviderKind::Vertex => Some(constants::DEFAULT_VERTEX_EMBEDDING_MODEL),
        ProviderKind::Anthropic | ProviderKind::Groq | ProviderKind::OpenRouter => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_round_trips_every_kind() {
        for kind in ProviderKind::ALL {
            assert_eq!(kind.as_str().parse::<ProviderKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("DeepInfra".parse::<ProviderKind>().unwrap(), ProviderKind::DeepInfra);
        assert_eq!(" OPENAI ".parse::<ProviderKind>().unwrap(), ProviderKind::OpenAI);
    }

    #[test]
    fn test_from_str_unknown_is_lookup_error() {
        let err = "mistral".parse::<ProviderKind>().unwrap_err();
        assert!(matches!(err, ProviderError::UnknownProvider(ref s) if s == "mistral"));
    }

    #[test]
    fn test_chat_dialect_set() {
        let chat: Vec<_> = ProviderKind::ALL
            .into_iter()
            .filter(ProviderKind::wants_chat_dialect)
            .collect();
        assert_eq!(chat, vec![ProviderKind::OpenAI, ProviderKind::DeepInfra]);
    }

    #[test]
    fn test_embedding_defaults_absent_for_chat_only_providers() {
        assert!(default_embedding_model_for(ProviderKind::Anthropic).is_none());
        assert!(default_embedding_model_for(ProviderKind::Groq).is_none());
        assert!(default_embedding_model_for(ProviderKind::OpenRouter).is_none());
        assert_eq!(
            default_embedding_model_for(ProviderKind::OpenAI),
            Some("text-embedding-3-small")
        );
    }
}
