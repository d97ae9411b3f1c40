//! The bank: distillation on write, similarity search on read.

use crate::distill;
use anyhow::Result;
use hcore::{Completion, Draft, Embedder, Experience, Payload, Store};
use serde::{Deserialize, Serialize};

/// What one stored record represents.
///
/// Per-item embeds each distilled lesson's content separately, so
/// retrieval returns fine-grained lessons. Per-experience embeds the
/// original query once, so retrieval returns whole past episodes
/// (query, trajectory, verdict, lessons). The store contract is the
/// same either way; callers interpret the payload shape accordingly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Granularity {
    /// One record per distilled lesson, embedded by its content.
    #[default]
    PerItem,
    /// One record per experience, embedded by its query.
    PerExperience,
}

/// Orchestrates distillation, embedding, storage, and retrieval over
/// injected services.
///
/// Holds no state beyond its dependencies; every retrieval re-embeds
/// the query, nothing is cached.
pub struct Bank<S, E, C> {
    /// The record store.
    pub store: S,
    /// The embedding service.
    pub embedder: E,
    /// The completion service used for judging and distilling.
    pub completion: C,
    granularity: Granularity,
}

impl<S: Store, E: Embedder, C: Completion> Bank<S, E, C> {
    /// Create a bank with per-item storage granularity.
    pub fn new(store: S, embedder: E, completion: C) -> Self {
        Self {
            store,
            embedder,
            completion,
            granularity: Granularity::default(),
        }
    }

    /// Set the storage granularity.
    pub fn with_granularity(mut self, granularity: Granularity) -> Self {
        self.granularity = granularity;
        self
    }

    /// Judge a finished attempt, distill it, and store the lessons.
    ///
    /// Yielding no lessons is a valid outcome, not an error: a
    /// judgment-request failure, unparseable distillation output, or a
    /// genuinely lesson-free trajectory all record nothing. Embedding
    /// and store failures propagate.
    pub async fn add_experience(&self, trajectory: &str, query: &str) -> Result<()> {
        let verdict = match distill::judge(&self.completion, trajectory, query).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!("judgment request failed, nothing recorded: {e:#}");
                return Ok(());
            }
        };

        let items = distill::distill(&self.completion, trajectory, query, verdict).await;
        if items.is_empty() {
            tracing::debug!(query, "no memory items distilled");
            return Ok(());
        }

        let drafts = match self.granularity {
            Granularity::PerItem => {
                let contents: Vec<String> =
                    items.iter().map(|item| item.content.clone()).collect();
                let embeddings = self.embedder.embed_batch(&contents).await?;
                anyhow::ensure!(
                    embeddings.len() == items.len(),
                    "embedding service returned {} vectors for {} items",
                    embeddings.len(),
                    items.len()
                );
                items
                    .iter()
                    .zip(embeddings)
                    .map(|(item, embedding)| Draft {
                        embedding,
                        payload: item.to_payload(),
                    })
                    .collect()
            }
            Granularity::PerExperience => {
                let embedding = self.embedder.embed(query).await?;
                let experience = Experience::new(query, trajectory, verdict, items);
                vec![Draft {
                    embedding,
                    payload: experience.to_payload(),
                }]
            }
        };

        let ids = self.store.insert(drafts).await?;
        tracing::debug!(recorded = ids.len(), verdict, "experience stored");
        Ok(())
    }

    /// Retrieve the payloads of the `k` memories nearest to the query.
    pub async fn retrieve_memories(&self, query: &str, k: usize) -> Result<Vec<Payload>> {
        let embedding = self.embedder.embed(query).await?;
        Ok(self.store.search(&embedding, k).await?)
    }
}
