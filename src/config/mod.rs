//! Provider settings for switchyard.
//!
//! Settings come from the process environment, optionally layered over a
//! TOML file at the platform's XDG config path
//! (e.g. `~/.config/switchyard/config.toml` on Linux).

mod loader;
mod paths;
mod resolve;
mod types;

pub use types::Settings;
