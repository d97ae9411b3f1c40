//! The vector store contract shared by every backend.

use crate::{Draft, Payload};
use std::future::Future;
use ulid::Ulid;

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An embedding's length disagrees with the store's established
    /// dimensionality. The insert fails as a whole; prior contents are
    /// untouched.
    #[error("embedding dimension mismatch: store holds {expected}-dimensional vectors, got {got}")]
    DimensionMismatch {
        /// The store's established dimensionality.
        expected: usize,
        /// The offending embedding's length.
        got: usize,
    },

    /// The backing storage engine failed.
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// A durable, append-only collection of embedded records.
///
/// Backends differ in storage engine (flat file, external index) but
/// share this contract exactly, so callers are backend-agnostic.
///
/// The store is a shared resource: `insert` is atomic per batch with
/// respect to the backend's durability unit, and `search` may run
/// concurrently with `insert` without ever observing a partially
/// written record.
pub trait Store: Send + Sync {
    /// Append a batch of drafts, assigning each a fresh unique id.
    ///
    /// The first insert establishes the store's dimensionality; any
    /// embedding whose length differs fails the whole batch with
    /// [`StoreError::DimensionMismatch`]. Returns the assigned ids in
    /// input order.
    fn insert(
        &self,
        drafts: Vec<Draft>,
    ) -> impl Future<Output = Result<Vec<Ulid>, StoreError>> + Send;

    /// Return the payloads of the `k` records nearest to the query
    /// embedding under cosine similarity, most similar first.
    ///
    /// A store holding fewer than `k` records returns all of them; an
    /// empty store returns an empty vec. Ties break by insertion order,
    /// earliest first. `k == 0` returns nothing.
    fn search(
        &self,
        embedding: &[f32],
        k: usize,
    ) -> impl Future<Output = Result<Vec<Payload>, StoreError>> + Send;
}
