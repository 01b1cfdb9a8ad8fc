//! The provider registry and its process-wide instance.
//!
//! [`ProviderRegistry::build`] constructs one client per [`ProviderKind`],
//! picks the default provider and captures the model-name overrides. The
//! result is read-only. [`init`] installs one registry for the whole
//! process; the free functions below resolve against it.

use std::sync::{Arc, OnceLock};

use super::client::ProviderClient;
use super::handle::{Dialect, EmbeddingHandle, ModelHandle};
use super::kind::ProviderKind;
use crate::config::Settings;
use crate::error::ProviderError;

/// One registered provider.
#[derive(Debug)]
pub struct ProviderEntry {
    kind: ProviderKind,
    client: Arc<ProviderClient>,
    dialect: Dialect,
}

impl ProviderEntry {
    fn new(kind: ProviderKind, client: ProviderClient) -> Self {
        let dialect = if kind.wants_chat_dialect() && client.supports_chat_dialect() {
            Dialect::ChatCompletions
        } else {
            Dialect::Direct
        };
        Self {
            kind,
            client: Arc::new(client),
            dialect,
        }
    }

    pub fn kind(&self) -> ProviderKind {
        self.kind
    }

    /// Dialect every chat handle for this provider is invoked with.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn serves_embeddings(&self) -> bool {
        self.kind.serves_embeddings()
    }

    /// Why the client could not be built, if it could not.
    pub fn unavailable_reason(&self) -> Option<&str> {
        self.client.unavailable_reason()
    }
}

/// Fixed mapping from provider to client, plus the startup-time defaults.
#[derive(Debug)]
pub struct ProviderRegistry {
    /// Indexed by `ProviderKind as usize`, in [`ProviderKind::ALL`] order.
    entries: Vec<ProviderEntry>,
    default_provider: ProviderKind,
    model_override: Option<String>,
    embedding_override: Option<String>,
}

/// Default provider precedence: ollama, then deepinfra, then openai.
/// Blank values count as unset.
pub fn default_provider_for(settings: &Settings) -> ProviderKind {
    let is_set = |value: &Option<String>| value.as_deref().is_some_and(|v| !v.trim().is_empty());
    if is_set(&settings.ollama_base_url) {
        ProviderKind::Ollama
    } else if is_set(&settings.deepinfra_api_key) {
        ProviderKind::DeepInfra
    } else {
        ProviderKind::OpenAI
    }
}

impl ProviderRegistry {
    /// Builds a client for every provider. Blank settings count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidCredentials`] when `VERTEX_CREDENTIALS`
    /// is set but malformed. Missing configuration never fails.
    pub fn build(settings: &Settings) -> Result<Self, ProviderError> {
        let mut settings = settings.clone();
        settings.normalize();

        let entries = ProviderKind::ALL
            .into_iter()
            .map(|kind| {
                ProviderClient::from_settings(kind, &settings)
                    .map(|client| ProviderEntry::new(kind, client))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let default_provider = default_provider_for(&settings);
        tracing::info!(default_provider = %default_provider, "provider registry built");

        Ok(Self {
            entries,
            default_provider,
            model_override: settings.model_name,
            embedding_override: settings.model_embedding_name,
        })
    }

    /// The provider used when callers pass none, fixed at build time.
    pub fn default_provider(&self) -> ProviderKind {
        self.default_provider
    }

    pub fn entry(&self, kind: ProviderKind) -> &ProviderEntry {
        &self.entries[kind as usize]
    }

    pub fn entries(&self) -> &[ProviderEntry] {
        &self.entries
    }

    /// Resolves a chat model.
    ///
    /// `MODEL_NAME`, when configured, replaces `name`. Providers in the
    /// dialect-override set are invoked through Chat Completions.
    pub fn model(&self, name: &str, provider: Option<ProviderKind>) -> ModelHandle {
        let kind = provider.unwrap_or(self.default_provider);
        let model = self.model_override.as_deref().unwrap_or(name).to_string();
        let entry = self.entry(kind);
        tracing::debug!(
            provider = %kind,
            model = %model,
            dialect = %entry.dialect,
            "resolved model"
        );
        ModelHandle::new(kind, model, entry.dialect, Arc::clone(&entry.client))
    }

    /// Like [`model`](Self::model), with the provider given by name.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnknownProvider`] for names outside the
    /// enumerated set.
    pub fn model_for(&self, name: &str, provider: &str) -> Result<ModelHandle, ProviderError> {
        Ok(self.model(name, Some(provider.parse()?)))
    }

    /// Resolves an embedding model.
    ///
    /// `MODEL_EMBEDDING_NAME`, when configured, replaces `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::EmbeddingsUnsupported`] for providers whose
    /// client has no embedding accessor.
    pub fn embedding_model(
        &self,
        name: &str,
        provider: Option<ProviderKind>,
    ) -> Result<EmbeddingHandle, ProviderError> {
        let kind = provider.unwrap_or(self.default_provider);
        let entry = self.entry(kind);
        if !entry.serves_embeddings() {
            return Err(ProviderError::EmbeddingsUnsupported(kind));
        }
        let model = self.embedding_override.as_deref().unwrap_or(name).to_string();
        tracing::debug!(provider = %kind, model = %model, "resolved embedding model");
        Ok(EmbeddingHandle::new(kind, model, Arc::clone(&entry.client)))
    }

    /// Like [`embedding_model`](Self::embedding_model), with the provider
    /// given by name.
    pub fn embedding_model_for(
        &self,
        name: &str,
        provider: &str,
    ) -> Result<EmbeddingHandle, ProviderError> {
        self.embedding_model(name, Some(provider.parse()?))
    }
}

static REGISTRY: OnceLock<ProviderRegistry> = OnceLock::new();

/// Builds the process-wide registry. Call once at startup, before any
/// concurrent use.
///
/// # Errors
///
/// [`ProviderError::AlreadyInitialized`] on a second call, or any error
/// from [`ProviderRegistry::build`].
pub fn init(settings: Settings) -> Result<&'static ProviderRegistry, ProviderError> {
    if REGISTRY.get().is_some() {
        return Err(ProviderError::AlreadyInitialized);
    }
    let built = ProviderRegistry::build(&settings)?;
    REGISTRY
        .set(built)
        .map_err(|_| ProviderError::AlreadyInitialized)?;
    registry()
}

/// The process-wide registry.
pub fn registry() -> Result<&'static ProviderRegistry, ProviderError> {
    REGISTRY.get().ok_or(ProviderError::NotInitialized)
}

/// The default provider computed at startup.
pub fn get_default_provider() -> Result<ProviderKind, ProviderError> {
    Ok(registry()?.default_provider())
}

/// Resolves a chat model against the process-wide registry.
pub fn get_model(name: &str, provider: Option<ProviderKind>) -> Result<ModelHandle, ProviderError> {
    Ok(registry()?.model(name, provider))
}

/// Resolves an embedding model against the process-wide registry.
pub fn get_embedding_model(
    name: &str,
    provider: Option<ProviderKind>,
) -> Result<EmbeddingHandle, ProviderError> {
    registry()?.embedding_model(name, provider)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry_with(settings: Settings) -> ProviderRegistry {
        ProviderRegistry::build(&settings).unwrap()
    }

    #[test]
    fn test_default_is_ollama_when_base_url_set() {
        let settings = Settings {
            ollama_base_url: Some("http://localhost:11434".into()),
            deepinfra_api_key: Some("di-key".into()),
            openai_api_key: Some("sk-key".into()),
            ..Default::default()
        };
        assert_eq!(registry_with(settings).default_provider(), ProviderKind::Ollama);
    }

    #[test]
    fn test_default_is_deepinfra_without_ollama() {
        let settings = Settings {
            deepinfra_api_key: Some("di-key".into()),
            openai_api_key: Some("sk-key".into()),
            ..Default::default()
        };
        assert_eq!(registry_with(settings).default_provider(), ProviderKind::DeepInfra);
    }

    #[test]
    fn test_default_is_openai_otherwise() {
        let settings = Settings {
            anthropic_api_key: Some("ak".into()),
            ..Default::default()
        };
        assert_eq!(registry_with(settings).default_provider(), ProviderKind::OpenAI);
    }

    #[test]
    fn test_default_ignores_empty_ollama_url() {
        let settings = Settings::from_lookup(|var| match var {
            "OLLAMA_BASE_URL" => Some(String::new()),
            "DEEPINFRA_API_KEY" => Some("di-key".into()),
            _ => None,
        });
        assert_eq!(default_provider_for(&settings), ProviderKind::DeepInfra);
    }

    #[test]
    fn test_blank_literal_settings_count_as_unset() {
        let settings = Settings {
            ollama_base_url: Some(String::new()),
            deepinfra_api_key: Some("di-key".into()),
            model_name: Some("  ".into()),
            model_embedding_name: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(default_provider_for(&settings), ProviderKind::DeepInfra);

        let registry = registry_with(settings);
        assert_eq!(registry.default_provider(), ProviderKind::DeepInfra);
        let handle = registry.model("gpt-4o", Some(ProviderKind::OpenAI));
        assert_eq!(handle.name(), "gpt-4o");
        let emb = registry
            .embedding_model("text-embedding-3-small", Some(ProviderKind::OpenAI))
            .unwrap();
        assert_eq!(emb.name(), "text-embedding-3-small");
    }

    #[test]
    fn test_blank_openai_base_url_uses_default_endpoint() {
        let registry = registry_with(Settings {
            openai_base_url: Some(String::new()),
            ..Default::default()
        });
        let entry = registry.entry(ProviderKind::OpenAI);
        assert!(entry.unavailable_reason().is_none());
        assert_eq!(entry.dialect(), Dialect::ChatCompletions);
    }

    #[test]
    fn test_every_provider_has_one_entry() {
        let registry = registry_with(Settings::default());
        assert_eq!(registry.entries().len(), ProviderKind::ALL.len());
        for kind in ProviderKind::ALL {
            assert_eq!(registry.entry(kind).kind(), kind);
        }
    }

    #[test]
    fn test_openai_model_uses_chat_dialect() {
        let registry = registry_with(Settings::default());
        let handle = registry.model("gpt-4o", Some(ProviderKind::OpenAI));
        assert_eq!(handle.provider(), ProviderKind::OpenAI);
        assert_eq!(handle.name(), "gpt-4o");
        assert_eq!(handle.dialect(), Dialect::ChatCompletions);
    }

    #[test]
    fn test_deepinfra_model_uses_chat_dialect() {
        let registry = registry_with(Settings::default());
        let handle = registry.model("meta-llama/Llama-3.3-70B", Some(ProviderKind::DeepInfra));
        assert_eq!(handle.dialect(), Dialect::ChatCompletions);
    }

    #[test]
    fn test_anthropic_model_is_direct() {
        let registry = registry_with(Settings::default());
        let handle = registry.model("gpt-4o", Some(ProviderKind::Anthropic));
        assert_eq!(handle.name(), "gpt-4o");
        assert_eq!(handle.dialect(), Dialect::Direct);
    }

    #[test]
    fn test_ollama_and_fireworks_are_direct() {
        let registry = registry_with(Settings::default());
        for kind in [ProviderKind::Ollama, ProviderKind::Fireworks, ProviderKind::Vertex] {
            assert_eq!(registry.model("m", Some(kind)).dialect(), Dialect::Direct);
        }
    }

    #[test]
    fn test_model_name_override() {
        let registry = registry_with(Settings {
            model_name: Some("forced-model".into()),
            ..Default::default()
        });
        let handle = registry.model("anything", Some(ProviderKind::OpenAI));
        assert_eq!(handle.name(), "forced-model");
    }

    #[test]
    fn test_model_defaults_to_default_provider() {
        let registry = registry_with(Settings {
            ollama_base_url: Some("http://localhost:11434".into()),
            ..Default::default()
        });
        let handle = registry.model("llama3", None);
        assert_eq!(handle.provider(), ProviderKind::Ollama);
        assert_eq!(handle.dialect(), Dialect::Direct);
    }

    #[test]
    fn test_embedding_model_name() {
        let registry = registry_with(Settings::default());
        let handle = registry
            .embedding_model("text-embedding-3-small", Some(ProviderKind::OpenAI))
            .unwrap();
        assert_eq!(handle.name(), "text-embedding-3-small");
    }

    #[test]
    fn test_embedding_model_override() {
        let registry = registry_with(Settings {
            model_embedding_name: Some("emb-override".into()),
            ..Default::default()
        });
        let handle = registry
            .embedding_model("text-embedding-3-small", Some(ProviderKind::OpenAI))
            .unwrap();
        assert_eq!(handle.name(), "emb-override");
    }

    #[test]
    fn test_embedding_override_does_not_touch_chat_name() {
        let registry = registry_with(Settings {
            model_embedding_name: Some("emb-override".into()),
            ..Default::default()
        });
        assert_eq!(registry.model("gpt-4o", Some(ProviderKind::OpenAI)).name(), "gpt-4o");
    }

    #[test]
    fn test_embedding_unsupported_providers() {
        let registry = registry_with(Settings::default());
        for kind in [ProviderKind::Anthropic, ProviderKind::Groq, ProviderKind::OpenRouter] {
            let err = registry.embedding_model("x", Some(kind)).unwrap_err();
            assert!(matches!(err, ProviderError::EmbeddingsUnsupported(k) if k == kind));
        }
    }

    #[test]
    fn test_unknown_provider_is_lookup_failure() {
        let registry = registry_with(Settings::default());
        let err = registry.model_for("gpt-4o", "not-a-provider").unwrap_err();
        assert!(matches!(err, ProviderError::UnknownProvider(_)));
        let err = registry
            .embedding_model_for("text-embedding-3-small", "not-a-provider")
            .unwrap_err();
        assert!(matches!(err, ProviderError::UnknownProvider(_)));
    }

    #[test]
    fn test_model_for_parses_name() {
        let registry = registry_with(Settings::default());
        let handle = registry.model_for("gpt-4o", "openai").unwrap();
        assert_eq!(handle.dialect(), Dialect::ChatCompletions);
    }

    #[test]
    fn test_malformed_vertex_credentials_fail_build() {
        let err = ProviderRegistry::build(&Settings {
            vertex_credentials: Some("!!!".into()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidCredentials(_)));
    }

    #[test]
    fn test_global_lifecycle() {
        assert!(matches!(get_default_provider(), Err(ProviderError::NotInitialized)));
        assert!(matches!(get_model("gpt-4o", None), Err(ProviderError::NotInitialized)));

        let settings = Settings {
            deepinfra_api_key: Some("di-key".into()),
            ..Default::default()
        };
        init(settings.clone()).unwrap();
        assert!(matches!(init(settings), Err(ProviderError::AlreadyInitialized)));

        assert_eq!(get_default_provider().unwrap(), ProviderKind::DeepInfra);
        let handle = get_model("some-model", None).unwrap();
        assert_eq!(handle.provider(), ProviderKind::DeepInfra);
        assert_eq!(handle.dialect(), Dialect::ChatCompletions);
        let emb = get_embedding_model("BAAI/bge-large-en-v1.5", None).unwrap();
        assert_eq!(emb.provider(), ProviderKind::DeepInfra);
    }
}
