//! Service provider enums for static dispatch over HTTP bindings.

use crate::config::ServiceConfig;
use anyhow::Result;
use hcore::{Completion, Embedder};
use openai::reqwest::Client;
use openai::{Chat, Embeddings};

/// Unified completion provider (static dispatch, no dyn).
#[derive(Clone)]
pub enum Provider {
    /// Any OpenAI-compatible chat-completions service.
    OpenAi(Chat),
}

impl Provider {
    /// Create a provider from configuration.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        match config.provider.as_str() {
            "openai" => Ok(Self::OpenAi(Chat::api(
                Client::new(),
                &config.key,
                &config.model,
            )?)),
            "ollama" => Ok(Self::OpenAi(Chat::ollama(Client::new(), &config.model)?)),
            "custom" => {
                let endpoint = config.endpoint.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("custom completion provider requires an endpoint")
                })?;
                Ok(Self::OpenAi(Chat::custom(
                    Client::new(),
                    key_of(config),
                    endpoint,
                    &config.model,
                )?))
            }
            other => anyhow::bail!("unknown completion provider: {other}"),
        }
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAi(_) => f.write_str("Provider::OpenAi"),
        }
    }
}

impl Completion for Provider {
    async fn complete(&self, prompt: &str) -> Result<String> {
        match self {
            Self::OpenAi(chat) => chat.complete(prompt).await,
        }
    }
}

/// Unified embedding provider (static dispatch, no dyn).
#[derive(Clone)]
pub enum EmbeddingProvider {
    /// Any OpenAI-compatible embeddings service.
    OpenAi(Embeddings),
}

impl EmbeddingProvider {
    /// Create a provider from configuration.
    pub fn new(config: &ServiceConfig) -> Result<Self> {
        match config.provider.as_str() {
            "openai" => Ok(Self::OpenAi(Embeddings::api(
                Client::new(),
                &config.key,
                &config.model,
            )?)),
            "ollama" => Ok(Self::OpenAi(Embeddings::ollama(
                Client::new(),
                &config.model,
            )?)),
            "custom" => {
                let endpoint = config.endpoint.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("custom embedding provider requires an endpoint")
                })?;
                Ok(Self::OpenAi(Embeddings::custom(
                    Client::new(),
                    key_of(config),
                    endpoint,
                    &config.model,
                )?))
            }
            other => anyhow::bail!("unknown embedding provider: {other}"),
        }
    }
}

impl std::fmt::Debug for EmbeddingProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OpenAi(_) => f.write_str("EmbeddingProvider::OpenAi"),
        }
    }
}

impl Embedder for EmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        match self {
            Self::OpenAi(embeddings) => embeddings.embed(text).await,
        }
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        match self {
            Self::OpenAi(embeddings) => embeddings.embed_batch(texts).await,
        }
    }
}

fn key_of(config: &ServiceConfig) -> Option<&str> {
    if config.key.is_empty() {
        None
    } else {
        Some(&config.key)
    }
}
