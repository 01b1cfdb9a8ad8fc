//! File loading and environment overlay for switchyard settings.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::resolve::non_empty;
use super::types::{Settings, ENV_VARS};

impl Settings {
    /// Reads every known variable from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();
        settings.overlay(&lookup);
        settings
    }

    /// Reads a TOML settings file and resolves its `{env:VAR}` placeholders.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;
        let mut settings: Settings = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse settings at {:?}", path))?;
        settings.resolve_substitutions();
        Ok(settings)
    }

    /// Load settings with precedence: environment > settings file.
    ///
    /// A missing settings file is not an error.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut settings = if path.exists() {
            Self::from_file(&path)?
        } else {
            Settings::default()
        };
        settings.overlay(&|var: &str| std::env::var(var).ok());
        settings.normalize();
        Ok(settings)
    }

    /// Overwrites fields with every non-empty value `lookup` yields.
    fn overlay<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        for var in ENV_VARS {
            if let Some(value) = lookup(var).and_then(non_empty) {
                if let Some(field) = self.field_mut(var) {
                    *field = Some(value);
                }
            }
        }
    }

    /// Copy of the settings with secret values masked, for display.
    pub fn redacted(&self) -> Self {
        let mask = |v: &Option<String>| v.as_ref().map(|_| "********".to_string());
        Self {
            openai_api_key: mask(&self.openai_api_key),
            anthropic_api_key: mask(&self.anthropic_api_key),
            groq_api_key: mask(&self.groq_api_key),
            google_generative_ai_api_key: mask(&self.google_generative_ai_api_key),
            openrouter_api_key: mask(&self.openrouter_api_key),
            fireworks_api_key: mask(&self.fireworks_api_key),
            deepinfra_api_key: mask(&self.deepinfra_api_key),
            vertex_credentials: mask(&self.vertex_credentials),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var| map.get(var).cloned()
    }

    #[test]
    fn test_from_lookup_reads_known_vars() {
        let settings = Settings::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("OLLAMA_BASE_URL", "http://localhost:11434"),
            ("MODEL_NAME", "forced-model"),
            ("UNRELATED", "ignored"),
        ]));
        assert_eq!(settings.openai_api_key.as_deref(), Some("sk-test"));
        assert_eq!(settings.ollama_base_url.as_deref(), Some("http://localhost:11434"));
        assert_eq!(settings.model_name.as_deref(), Some("forced-model"));
        assert_eq!(settings.deepinfra_api_key, None);
    }

    #[test]
    fn test_from_lookup_empty_is_unset() {
        let settings = Settings::from_lookup(lookup_from(&[("OLLAMA_BASE_URL", "")]));
        assert_eq!(settings.ollama_base_url, None);
    }

    #[test]
    fn test_from_file_with_placeholders() {
        std::env::set_var("SWITCHYARD_TEST_FILE_KEY", "sk-from-env");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "openai_api_key = \"{{env:SWITCHYARD_TEST_FILE_KEY}}\"\nmodel_embedding_name = \"emb\""
        )
        .unwrap();

        let settings = Settings::from_file(file.path()).unwrap();
        assert_eq!(settings.openai_api_key.as_deref(), Some("sk-from-env"));
        assert_eq!(settings.model_embedding_name.as_deref(), Some("emb"));
    }

    #[test]
    fn test_from_file_parse_error_mentions_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "openai_api_key = ").unwrap();
        let err = Settings::from_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings"));
    }

    #[test]
    fn test_overlay_env_wins_over_file() {
        let mut settings = Settings {
            groq_api_key: Some("from-file".into()),
            fireworks_api_key: Some("kept".into()),
            ..Default::default()
        };
        settings.overlay(&lookup_from(&[
            ("GROQ_API_KEY", "from-env"),
            ("FIREWORKS_API_KEY", ""),
        ]));
        assert_eq!(settings.groq_api_key.as_deref(), Some("from-env"));
        assert_eq!(settings.fireworks_api_key.as_deref(), Some("kept"));
    }

    #[test]
    fn test_redacted_masks_secrets_only() {
        let settings = Settings {
            openai_api_key: Some("sk-secret".into()),
            openai_base_url: Some("https://proxy.local/v1".into()),
            ..Default::default()
        };
        let shown = settings.redacted();
        assert_eq!(shown.openai_api_key.as_deref(), Some("********"));
        assert_eq!(shown.openai_base_url.as_deref(), Some("https://proxy.local/v1"));
    }
}
