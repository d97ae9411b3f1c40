//! OpenAI-compatible service bindings.
//!
//! Binds the [`Completion`](hcore::Completion) and
//! [`Embedder`](hcore::Embedder) contracts to any service exposing the
//! OpenAI chat-completions and embeddings APIs — OpenAI itself, local
//! Ollama, or any compatible gateway via [`Chat::custom`] /
//! [`Embeddings::custom`].

pub use chat::Chat;
pub use embedding::Embeddings;
pub use reqwest;

use anyhow::Result;
use reqwest::header::{self, HeaderMap};

mod chat;
mod embedding;

/// OpenAI-compatible endpoint URLs.
pub mod endpoint {
    /// OpenAI chat completions.
    pub const OPENAI_CHAT: &str = "https://api.openai.com/v1/chat/completions";
    /// OpenAI embeddings.
    pub const OPENAI_EMBEDDINGS: &str = "https://api.openai.com/v1/embeddings";
    /// Ollama local chat completions.
    pub const OLLAMA_CHAT: &str = "http://localhost:11434/v1/chat/completions";
    /// Ollama local embeddings.
    pub const OLLAMA_EMBEDDINGS: &str = "http://localhost:11434/v1/embeddings";
}

/// Standard JSON headers plus an optional bearer key (Ollama runs
/// without one).
fn headers(key: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, "application/json".parse()?);
    headers.insert(header::ACCEPT, "application/json".parse()?);
    if let Some(key) = key {
        headers.insert(header::AUTHORIZATION, format!("Bearer {key}").parse()?);
    }
    Ok(headers)
}
