//! Provider listing and discovery.
//!
//! Displays every registered provider with its dialect and embedding
//! support, plus dynamically queried Ollama models. Isolates display/UI
//! concerns from the registry core.

use anyhow::Result;
use colored::Colorize;

use super::kind::{default_embedding_model_for, default_model_for};
use super::registry::ProviderRegistry;

/// List every provider, marking the default.
pub async fn list_models(registry: &ProviderRegistry, ollama_base_url: &str) -> Result<()> {
    println!("Providers:\n");

    for entry in registry.entries() {
        let kind = entry.kind();
        let marker = if kind == registry.default_provider() {
            " (default)".green().to_string()
        } else {
            String::new()
        };
        println!("  {}{marker}", kind.as_str().bold());
        println!("    dialect:   {}", entry.dialect());
        println!("    model:     {}", default_model_for(kind));
        match default_embedding_model_for(kind) {
            Some(model) => println!("    embedding: {model}"),
            None => println!("    embedding: {}", "unsupported".dimmed()),
        }
        if let Some(reason) = entry.unavailable_reason() {
            println!("    {} {}", "unavailable:".red(), reason);
        }
    }

    println!("\n  local ollama models:");
    match list_ollama_models(ollama_base_url).await {
        Ok(models) if models.is_empty() => {
            println!("    (no models found -- run `ollama pull llama3`)");
        }
        Ok(models) => {
            for model in &models {
                println!("    {model}");
            }
        }
        Err(_) => {
            println!("    (ollama not running)");
        }
    }

    Ok(())
}

/// Query Ollama's local API for available models.
pub async fn list_ollama_models(base_url: &str) -> Result<Vec<String>> {
    let url = format!("{}/api/tags", base_url.trim_end_matches('/'));

    let resp: serde_json::Value = reqwest::get(&url).await?.error_for_status()?.json().await?;

    let models = resp["models"]
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|m| m["name"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default();

    Ok(models)
}
