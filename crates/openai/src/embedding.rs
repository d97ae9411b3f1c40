//! Embedder binding over the embeddings API.

use crate::{endpoint, headers};
use anyhow::Result;
use hcore::Embedder;
use reqwest::{Client, Method, header::HeaderMap};
use serde::{Deserialize, Serialize};

/// An embeddings client for a single model.
#[derive(Clone)]
pub struct Embeddings {
    client: Client,
    headers: HeaderMap,
    endpoint: String,
    model: String,
}

impl Embeddings {
    /// Create a client targeting the OpenAI API.
    pub fn api(client: Client, key: &str, model: impl Into<String>) -> Result<Self> {
        Self::custom(client, Some(key), endpoint::OPENAI_EMBEDDINGS, model)
    }

    /// Create a client targeting a local Ollama instance (no API key).
    pub fn ollama(client: Client, model: impl Into<String>) -> Result<Self> {
        Self::custom(client, None, endpoint::OLLAMA_EMBEDDINGS, model)
    }

    /// Create a client targeting a custom OpenAI-compatible endpoint.
    pub fn custom(
        client: Client,
        key: Option<&str>,
        endpoint: &str,
        model: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            client,
            headers: headers(key)?,
            endpoint: endpoint.to_owned(),
            model: model.into(),
        })
    }

    async fn request(&self, input: &[String]) -> Result<Vec<Vec<f32>>> {
        let body = Request {
            model: &self.model,
            input,
        };
        tracing::debug!("request: {}", serde_json::to_string(&body)?);

        let text = self
            .client
            .request(Method::POST, &self.endpoint)
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .await?
            .text()
            .await?;
        tracing::debug!("response: {} bytes", text.len());

        let mut response: Response = serde_json::from_str(&text)?;
        // The API may return entries out of order; index is authoritative.
        response.data.sort_by_key(|entry| entry.index);
        Ok(response.data.into_iter().map(|entry| entry.embedding).collect())
    }
}

impl Embedder for Embeddings {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let input = [text.to_owned()];
        let embeddings = self.request(&input).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("embeddings response is empty"))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let embeddings = self.request(texts).await?;
        anyhow::ensure!(
            embeddings.len() == texts.len(),
            "embeddings response has {} entries for {} inputs",
            embeddings.len(),
            texts.len()
        );
        Ok(embeddings)
    }
}

/// The request body for the embeddings API.
#[derive(Debug, Serialize)]
struct Request<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct Response {
    data: Vec<Embedding>,
}

#[derive(Debug, Deserialize)]
struct Embedding {
    index: usize,
    embedding: Vec<f32>,
}
