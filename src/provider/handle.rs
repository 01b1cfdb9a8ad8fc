//! Model handles returned by the registry.
//!
//! A [`ModelHandle`] names one chat model on one provider; an
//! [`EmbeddingHandle`] names one embedding model. Resolution never performs
//! I/O; the network is only touched when a handle is invoked.

use std::fmt;
use std::sync::Arc;

use futures::StreamExt;
use rig::agent::{AgentBuilder, MultiTurnStreamItem};
use rig::client::{CompletionClient, EmbeddingsClient};
use rig::completion::Prompt;
use rig::embeddings::EmbeddingModel;
use rig::message::Text;
use rig::streaming::{StreamedAssistantContent, StreamingPrompt};

use super::client::ProviderClient;
use super::kind::ProviderKind;
use crate::error::ProviderError;
use crate::output::Renderer;

/// How a chat model is invoked on its client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// The client's own default path (the Responses API for OpenAI).
    Direct,
    /// Forced onto the Chat Completions API.
    ChatCompletions,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Direct => f.write_str("direct"),
            Dialect::ChatCompletions => f.write_str("chat-completions"),
        }
    }
}

/// Finishes an agent builder with the shared limits and optional preamble.
macro_rules! build_agent {
    ($builder:expr, $sys:expr) => {{
        let builder = $builder.max_tokens(crate::constants::MAX_TOKENS);
        match $sys {
            Some(sys) => builder.preamble(sys).build(),
            None => builder.build(),
        }
    }};
}

/// Dispatches over the rig-backed clients, binding a built agent to
/// `$agent`. Clients rig does not drive fall through to `$fallback`.
macro_rules! with_agent {
    ($handle:expr, $sys:expr, |$agent:ident| $body:expr, else $fallback:expr) => {
        match ($handle.client.as_ref(), $handle.dialect) {
            (ProviderClient::OpenAI(client), Dialect::ChatCompletions)
            | (ProviderClient::OpenAICompatible(client), _) => {
                let model = client.completion_model(&$handle.model).completions_api();
                let $agent = build_agent!(AgentBuilder::new(model), $sys);
                $body
            }
            (ProviderClient::OpenAI(client), Dialect::Direct) => {
                let $agent = build_agent!(client.agent(&$handle.model), $sys);
                $body
            }
            (ProviderClient::Ollama(client), _) => {
                let $agent = build_agent!(client.agent(&$handle.model), $sys);
                $body
            }
            (ProviderClient::Anthropic(client), _) => {
                let $agent = build_agent!(client.agent(&$handle.model), $sys);
                $body
            }
            (ProviderClient::Groq(client), _) => {
                let $agent = build_agent!(client.agent(&$handle.model), $sys);
                $body
            }
            (ProviderClient::Gemini(client), _) => {
                let $agent = build_agent!(client.agent(&$handle.model), $sys);
                $body
            }
            (ProviderClient::OpenRouter(client), _) => {
                let $agent = build_agent!(client.agent(&$handle.model), $sys);
                $body
            }
            (ProviderClient::Vertex(_), _) | (ProviderClient::Unavailable(_), _) => $fallback,
        }
    };
}

/// Renders text chunks and accumulates the full response.
macro_rules! process_stream {
    ($stream:expr, $renderer:expr, $full_response:expr) => {
        while let Some(chunk) = $stream.next().await {
            match chunk {
                Ok(MultiTurnStreamItem::StreamAssistantItem(StreamedAssistantContent::Text(
                    Text { text },
                ))) => {
                    $renderer.render_token(&text);
                    $full_response.push_str(&text);
                }
                Ok(MultiTurnStreamItem::FinalResponse(_)) => {
                    // Stream complete
                }
                Err(err) => {
                    $renderer.render_error(&err.to_string());
                    return Err(ProviderError::Stream(err.to_string()));
                }
                _ => {
                    // Reasoning and tool deltas are not rendered
                }
            }
        }
    };
}

/// One chat/completion model on one provider.
#[derive(Clone)]
pub struct ModelHandle {
    provider: ProviderKind,
    model: String,
    dialect: Dialect,
    client: Arc<ProviderClient>,
}

impl fmt::Debug for ModelHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelHandle")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("dialect", &self.dialect)
            .finish()
    }
}

impl ModelHandle {
    pub(crate) fn new(
        provider: ProviderKind,
        model: String,
        dialect: Dialect,
        client: Arc<ProviderClient>,
    ) -> Self {
        Self {
            provider,
            model,
            dialect,
            client,
        }
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn name(&self) -> &str {
        &self.model
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    fn unavailable(&self, reason: &str) -> ProviderError {
        ProviderError::Unavailable {
            provider: self.provider,
            reason: reason.to_string(),
        }
    }

    /// Sends a one-shot prompt and returns the full response.
    pub async fn prompt(
        &self,
        prompt: &str,
        preamble: Option<&str>,
    ) -> Result<String, ProviderError> {
        tracing::debug!(
            provider = %self.provider,
            model = %self.model,
            dialect = %self.dialect,
            "prompt"
        );
        with_agent!(self, preamble, |agent| Ok(agent.prompt(prompt).await?), else {
            match self.client.as_ref() {
                ProviderClient::Vertex(vertex) => {
                    vertex.generate(&self.model, prompt, preamble).await
                }
                ProviderClient::Unavailable(reason) => Err(self.unavailable(reason)),
                _ => Err(self.unavailable("no invocation path")),
            }
        })
    }

    /// Streams a prompt response, rendering tokens as they arrive via the
    /// given [`Renderer`]. Returns the accumulated text.
    ///
    /// Vertex replies are not streamed; the full reply is rendered as a
    /// single token.
    pub async fn stream(
        &self,
        prompt: &str,
        preamble: Option<&str>,
        renderer: &mut dyn Renderer,
    ) -> Result<String, ProviderError> {
        tracing::debug!(
            provider = %self.provider,
            model = %self.model,
            dialect = %self.dialect,
            "stream"
        );
        let mut full_response = String::new();

        with_agent!(self, preamble, |agent| {
            let mut stream = agent.stream_prompt(prompt).await;
            process_stream!(stream, renderer, full_response);
        }, else {
            let text = self.prompt(prompt, preamble).await.inspect_err(|err| {
                renderer.render_error(&err.to_string());
            })?;
            renderer.render_token(&text);
            full_response.push_str(&text);
        });

        renderer.render_done();
        Ok(full_response)
    }
}

/// One embedding model on one provider.
#[derive(Clone)]
pub struct EmbeddingHandle {
    provider: ProviderKind,
    model: String,
    client: Arc<ProviderClient>,
}

impl fmt::Debug for EmbeddingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingHandle")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .finish()
    }
}

impl EmbeddingHandle {
    pub(crate) fn new(provider: ProviderKind, model: String, client: Arc<ProviderClient>) -> Self {
        Self {
            provider,
            model,
            client,
        }
    }

    pub fn provider(&self) -> ProviderKind {
        self.provider
    }

    pub fn name(&self) -> &str {
        &self.model
    }

    /// Embeds each text, returning one vector per input in order.
    pub async fn embed(&self, texts: Vec<String>) -> Result<Vec<Vec<f64>>, ProviderError> {
        tracing::debug!(
            provider = %self.provider,
            model = %self.model,
            count = texts.len(),
            "embed"
        );
        match self.client.as_ref() {
            ProviderClient::OpenAI(client) | ProviderClient::OpenAICompatible(client) => {
                let model = client.embedding_model(&self.model);
                let embeddings = model.embed_texts(texts).await?;
                Ok(embeddings.into_iter().map(|e| e.vec).collect())
            }
            ProviderClient::Ollama(client) => {
                let model = client.embedding_model(&self.model);
                let embeddings = model.embed_texts(texts).await?;
                Ok(embeddings.into_iter().map(|e| e.vec).collect())
            }
            ProviderClient::Gemini(client) => {
                let model = client.embedding_model(&self.model);
                let embeddings = model.embed_texts(texts).await?;
                Ok(embeddings.into_iter().map(|e| e.vec).collect())
            }
            ProviderClient::Vertex(vertex) => vertex.embed(&self.model, &texts).await,
            ProviderClient::Unavailable(reason) => Err(ProviderError::Unavailable {
                provider: self.provider,
                reason: reason.clone(),
            }),
            ProviderClient::Anthropic(_)
            | ProviderClient::Groq(_)
            | ProviderClient::OpenRouter(_) => {
                Err(ProviderError::EmbeddingsUnsupported(self.provider))
            }
        }
    }

    /// Embeds a single text.
    pub async fn embed_one(&self, text: &str) -> Result<Vec<f64>, ProviderError> {
        let mut vectors = self.embed(vec![text.to_string()]).await?;
        vectors
            .pop()
            .ok_or_else(|| ProviderError::Response("no embedding returned".to_string()))
    }
}
