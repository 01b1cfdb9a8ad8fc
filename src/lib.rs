//! Provider registry and model resolver for LLM backends.
//!
//! Build the registry once at startup, then resolve handles anywhere:
//!
//! ```no_run
//! # async fn run() -> Result<(), switchyard::ProviderError> {
//! use switchyard::{Settings, ProviderKind};
//!
//! switchyard::init(Settings::from_env())?;
//! let model = switchyard::get_model("gpt-4o", Some(ProviderKind::OpenAI))?;
//! let reply = model.prompt("Say hi", None).await?;
//! # let _ = reply;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod output;
pub mod provider;

pub use config::Settings;
pub use error::ProviderError;
pub use provider::{
    get_default_provider, get_embedding_model, get_model, init, registry, Dialect, EmbeddingHandle,
    ModelHandle, ProviderKind, ProviderRegistry,
};
