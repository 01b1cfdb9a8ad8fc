//! Command-line interface definition and dispatch for switchyard.
//!
//! Uses [`clap`] for argument parsing with derive macros. Every subcommand
//! loads settings, initializes the process-wide registry and resolves
//! through it.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use switchyard::constants::OLLAMA_DEFAULT_BASE_URL;
use switchyard::output::StdoutRenderer;
use switchyard::provider::{default_embedding_model_for, default_model_for, list_models};
use switchyard::{ProviderKind, ProviderRegistry, Settings};

/// Top-level CLI structure for switchyard.
#[derive(Parser)]
#[command(name = "switchyard", about = "Resolve and invoke LLM providers")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the switchyard CLI.
///
/// The `///` doc comments on variants double as `--help` text rendered by clap.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the default provider
    Default,
    /// Show how a model name resolves, without calling the provider
    Resolve {
        /// Model name to resolve
        name: String,
        /// Provider to use (defaults to the configured default)
        #[arg(short, long)]
        provider: Option<String>,
        /// Resolve as an embedding model
        #[arg(long)]
        embedding: bool,
    },
    /// Ask a one-shot question
    Ask {
        /// The question to ask
        prompt: Vec<String>,
        /// Model to use (defaults to the provider's default model)
        #[arg(short, long)]
        model: Option<String>,
        /// Provider to use (defaults to the configured default)
        #[arg(short, long)]
        provider: Option<String>,
        /// System prompt
        #[arg(short, long)]
        system: Option<String>,
        /// Wait for the full response instead of streaming it
        #[arg(long)]
        no_stream: bool,
    },
    /// Embed text and print the vector summary
    Embed {
        /// The text to embed
        text: Vec<String>,
        /// Embedding model to use (defaults to the provider's default)
        #[arg(short, long)]
        model: Option<String>,
        /// Provider to use (defaults to the configured default)
        #[arg(short, long)]
        provider: Option<String>,
    },
    /// List registered providers
    Providers,
    /// Show the effective settings with secrets masked
    Config,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Loads settings and installs the process-wide registry.
fn bootstrap() -> Result<(Settings, &'static ProviderRegistry)> {
    let settings = Settings::load()?;
    let registry =
        switchyard::init(settings.clone()).context("Failed to build provider registry")?;
    Ok((settings, registry))
}

/// Parses an optional `--provider` value; unknown names are an error.
fn parse_provider(name: Option<&str>) -> Result<Option<ProviderKind>> {
    name.map(str::parse::<ProviderKind>)
        .transpose()
        .map_err(Into::into)
}

/// Dispatches the parsed CLI command to its handler.
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Default => {
            bootstrap()?;
            println!("{}", switchyard::get_default_provider()?);
            Ok(())
        }
        Commands::Resolve {
            name,
            provider,
            embedding,
        } => {
            bootstrap()?;
            let provider = parse_provider(provider.as_deref())?;
            if embedding {
                let handle = switchyard::get_embedding_model(&name, provider)?;
                println!("{} {}", handle.provider().as_str().cyan(), handle.name().yellow());
            } else {
                let handle = switchyard::get_model(&name, provider)?;
                println!(
                    "{} {} [{}]",
                    handle.provider().as_str().cyan(),
                    handle.name().yellow(),
                    handle.dialect()
                );
            }
            Ok(())
        }
        Commands::Ask {
            prompt,
            model,
            provider,
            system,
            no_stream,
        } => {
            let prompt = prompt.join(" ");
            if prompt.is_empty() {
                anyhow::bail!("No prompt provided. Usage: switchyard ask \"your question here\"");
            }

            let (_, registry) = bootstrap()?;
            let kind = parse_provider(provider.as_deref())?.unwrap_or(registry.default_provider());
            let name = model.unwrap_or_else(|| default_model_for(kind).to_string());
            let handle = switchyard::get_model(&name, Some(kind))?;

            println!(
                "{} [{}/{}]",
                "switchyard".bold().cyan(),
                handle.provider(),
                handle.name().yellow(),
            );
            println!();
            println!("{} {}", ">".green().bold(), prompt);
            println!();

            if no_stream {
                let reply = handle.prompt(&prompt, system.as_deref()).await?;
                println!("{reply}");
            } else {
                let mut renderer = StdoutRenderer::new();
                handle.stream(&prompt, system.as_deref(), &mut renderer).await?;
            }
            Ok(())
        }
        Commands::Embed {
            text,
            model,
            provider,
        } => {
            let text = text.join(" ");
            if text.is_empty() {
                anyhow::bail!("No text provided. Usage: switchyard embed \"some text\"");
            }

            let (_, registry) = bootstrap()?;
            let kind = parse_provider(provider.as_deref())?.unwrap_or(registry.default_provider());
            let name = match model {
                Some(m) => m,
                None => default_embedding_model_for(kind)
                    .map(String::from)
                    .ok_or(switchyard::ProviderError::EmbeddingsUnsupported(kind))?,
            };
            let handle = switchyard::get_embedding_model(&name, Some(kind))?;
            let vector = handle.embed_one(&text).await?;

            let preview: Vec<String> = vector.iter().take(5).map(|v| format!("{v:.4}")).collect();
            println!(
                "{} {}/{} dims={} [{}{}]",
                "embedding".bold().cyan(),
                handle.provider(),
                handle.name().yellow(),
                vector.len(),
                preview.join(", "),
                if vector.len() > 5 { ", ..." } else { "" }
            );
            Ok(())
        }
        Commands::Providers => {
            let (settings, registry) = bootstrap()?;
            let ollama = settings
                .ollama_base_url
                .as_deref()
                .unwrap_or(OLLAMA_DEFAULT_BASE_URL);
            list_models(registry, ollama).await
        }
        Commands::Config => {
            let settings = Settings::load()?;
            let path = Settings::config_path()?;
            println!("{} {}", "Config path:".bold(), path.display());
            println!();
            let toml_str = toml::to_string_pretty(&settings.redacted())?;
            println!("{}", toml_str);
            Ok(())
        }
    }
}
