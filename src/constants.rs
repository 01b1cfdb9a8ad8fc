//! Centralized constants for switchyard.
//!
//! Endpoints, default models and token lifetimes live here so they can be
//! changed in one place.

/// Application name used in CLI output and directory paths.
pub const APP_NAME: &str = "switchyard";

/// Configuration filename.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Environment variable naming an explicit settings file.
pub const CONFIG_PATH_ENV: &str = "SWITCHYARD_CONFIG";

/// Maximum tokens for LLM completions.
pub const MAX_TOKENS: u64 = 4096;

// --- Endpoints ---

/// OpenAI-compatible endpoint for DeepInfra.
pub const DEEPINFRA_BASE_URL: &str = "https://api.deepinfra.com/v1/openai";

/// OpenAI-compatible endpoint for Fireworks.
pub const FIREWORKS_BASE_URL: &str = "https://api.fireworks.ai/inference/v1";

/// Base URL for a local Ollama server when none is configured.
pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Vertex AI REST root.
pub const VERTEX_API_ROOT: &str = "https://aiplatform.googleapis.com/v1";

/// Default Vertex project.
pub const VERTEX_DEFAULT_PROJECT: &str = "firecrawl";

/// Default Vertex location.
pub const VERTEX_DEFAULT_LOCATION: &str = "global";

/// Key file used for Vertex when no inline credentials are configured.
pub const VERTEX_DEFAULT_KEY_FILE: &str = "./gke-key.json";

/// Google OAuth token endpoint used when the key omits `token_uri`.
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// OAuth scope for Vertex AI.
pub const VERTEX_SCOPE: &str = "https://www.googleapis.com/auth/cloud-platform";

/// Lifetime requested for signed JWT assertions, in seconds.
pub const JWT_LIFETIME_SECS: i64 = 3600;

/// Access tokens are refreshed this many seconds before they expire.
pub const TOKEN_REFRESH_MARGIN_SECS: i64 = 300;

// --- Default models ---

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4.1";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-5";
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_GOOGLE_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_OPENROUTER_MODEL: &str = "openai/gpt-4.1-mini";
pub const DEFAULT_FIREWORKS_MODEL: &str = "accounts/fireworks/models/llama-v3p1-70b-instruct";
pub const DEFAULT_DEEPINFRA_MODEL: &str = "meta-llama/Meta-Llama-3.1-70B-Instruct";
pub const DEFAULT_VERTEX_MODEL: &str = "gemini-2.5-pro";

/// Default embedding model, for providers that serve embeddings.
pub const DEFAULT_OPENAI_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_OLLAMA_EMBEDDING_MODEL: &str = "nomic-embed-text";
pub const DEFAULT_GOOGLE_EMBEDDING_MODEL: &str = "text-embedding-004";
pub const DEFAULT_FIREWORKS_EMBEDDING_MODEL: &str = "nomic-ai/nomic-embed-text-v1.5";
pub const DEFAULT_DEEPINFRA_EMBEDDING_MODEL: &str = "BAAI/bge-large-en-v1.5";
pub const DEFAULT_VERTEX_EMBEDDING_MODEL: &str = "text-embedding-005";
