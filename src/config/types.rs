//! Struct definitions for switchyard settings.

use serde::{Deserialize, Serialize};

/// Process-wide provider settings.
///
/// Every field is optional. An absent value never fails client construction;
/// the provider that needed it fails when a handle is invoked instead. Field
/// names match the lowercased environment variables, so a TOML file can use
/// the same keys (`openai_api_key = "{env:OPENAI_API_KEY}"`).
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    /// Also raises ollama to the default provider.
    pub ollama_base_url: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub groq_api_key: Option<String>,
    pub google_generative_ai_api_key: Option<String>,
    pub openrouter_api_key: Option<String>,
    pub fireworks_api_key: Option<String>,
    /// Raises deepinfra to the default provider when ollama is not configured.
    pub deepinfra_api_key: Option<String>,
    /// Base64-encoded service-account JSON.
    pub vertex_credentials: Option<String>,
    /// Key file read when `vertex_credentials` is absent.
    pub vertex_key_file: Option<String>,
    pub vertex_project: Option<String>,
    pub vertex_location: Option<String>,
    /// Global override of every requested chat/completion model name.
    pub model_name: Option<String>,
    /// Global override of every requested embedding model name.
    pub model_embedding_name: Option<String>,
}

/// Environment variable names, paired with the field they fill.
pub(super) const ENV_VARS: &[&str] = &[
    "OPENAI_API_KEY",
    "OPENAI_BASE_URL",
    "OLLAMA_BASE_URL",
    "ANTHROPIC_API_KEY",
    "GROQ_API_KEY",
    "GOOGLE_GENERATIVE_AI_API_KEY",
    "OPENROUTER_API_KEY",
    "FIREWORKS_API_KEY",
    "DEEPINFRA_API_KEY",
    "VERTEX_CREDENTIALS",
    "VERTEX_KEY_FILE",
    "VERTEX_PROJECT",
    "VERTEX_LOCATION",
    "MODEL_NAME",
    "MODEL_EMBEDDING_NAME",
];

impl Settings {
    /// Mutable access to the field backing an environment variable.
    pub(super) fn field_mut(&mut self, var: &str) -> Option<&mut Option<String>> {
        let field = match var {
            "OPENAI_API_KEY" => &mut self.openai_api_key,
            "OPENAI_BASE_URL" => &mut self.openai_base_url,
            "OLLAMA_BASE_URL" => &mut self.ollama_base_url,
            "ANTHROPIC_API_KEY" => &mut self.anthropic_api_key,
            "GROQ_API_KEY" => &mut self.groq_api_key,
            "GOOGLE_GENERATIVE_AI_API_KEY" => &mut self.google_generative_ai_api_key,
            "OPENROUTER_API_KEY" => &mut self.openrouter_api_key,
            "FIREWORKS_API_KEY" => &mut self.fireworks_api_key,
            "DEEPINFRA_API_KEY" => &mut self.deepinfra_api_key,
            "VERTEX_CREDENTIALS" => &mut self.vertex_credentials,
            "VERTEX_KEY_FILE" => &mut self.vertex_key_file,
            "VERTEX_PROJECT" => &mut self.vertex_project,
            "VERTEX_LOCATION" => &mut self.vertex_location,
            "MODEL_NAME" => &mut self.model_name,
            "MODEL_EMBEDDING_NAME" => &mut self.model_embedding_name,
            _ => return None,
        };
        Some(field)
    }
}
