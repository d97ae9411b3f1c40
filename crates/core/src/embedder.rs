//! Embedding trait for converting text to vector representations.
//!
//! Every record in a store carries one embedding; retrieval embeds the
//! query with the same model and compares by cosine similarity.

use anyhow::Result;
use std::future::Future;

/// Converts text into a dense vector embedding.
///
/// Implementations may call external APIs (OpenAI, local models, etc.).
/// Uses RPITIT for async without boxing. Dimensionality is fixed per
/// configured model; all embeddings produced by one instance share it.
///
/// A failed call is an error, not an empty vector — a missing embedding
/// cannot be substituted downstream.
pub trait Embedder: Send + Sync {
    /// Embed the given text into a dense float vector.
    fn embed(&self, text: &str) -> impl Future<Output = Result<Vec<f32>>> + Send;

    /// Embed a batch of texts, one vector per input, in input order.
    ///
    /// The default implementation embeds one text at a time; backends
    /// with a native batch endpoint should override it.
    fn embed_batch(&self, texts: &[String]) -> impl Future<Output = Result<Vec<Vec<f32>>>> + Send {
        async move {
            let mut embeddings = Vec::with_capacity(texts.len());
            for text in texts {
                embeddings.push(self.embed(text).await?);
            }
            Ok(embeddings)
        }
    }
}
