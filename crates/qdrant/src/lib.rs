//! Qdrant-backed memory store for hindsight.
//!
//! Provides [`QdrantStore`], a [`Store`](hcore::Store) implementation
//! that delegates storage and nearest-neighbor search to an external
//! Qdrant collection. The collection is created on connect with cosine
//! distance and the configured dimensionality; the index's canonical
//! state lives server-side and is not recoverable by this layer alone.

pub use value::{payload_from_qdrant, payload_to_qdrant};

use anyhow::{Context, Result};
use hcore::{Draft, Payload, Store, StoreError};
use qdrant_client::Qdrant;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, PointStruct, SearchPointsBuilder, UpsertPointsBuilder,
    VectorParamsBuilder,
};
use ulid::Ulid;
use uuid::Uuid;

mod value;

/// Store backed by a Qdrant collection.
///
/// Insert maps drafts to points in one batch upsert (Qdrant's own batch
/// guarantee provides insert atomicity); search unwraps the index's
/// scored points back into the ordered-payload contract.
pub struct QdrantStore {
    client: Qdrant,
    collection: String,
    dimension: usize,
}

impl QdrantStore {
    /// Connect to a Qdrant instance and ensure the collection exists.
    pub async fn connect(url: &str, collection: impl Into<String>, dimension: usize) -> Result<Self> {
        let client = Qdrant::from_url(url)
            .build()
            .context("failed to create qdrant client")?;
        let store = Self {
            client,
            collection: collection.into(),
            dimension,
        };
        store.ensure_collection().await?;
        Ok(store)
    }

    async fn ensure_collection(&self) -> Result<()> {
        let exists = self
            .client
            .collection_exists(&self.collection)
            .await
            .context("failed to check qdrant collection")?;
        if !exists {
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection).vectors_config(
                        VectorParamsBuilder::new(self.dimension as u64, Distance::Cosine),
                    ),
                )
                .await
                .context("failed to create qdrant collection")?;
            tracing::debug!(
                collection = %self.collection,
                dimension = self.dimension,
                "created qdrant collection"
            );
        }
        Ok(())
    }
}

impl Store for QdrantStore {
    async fn insert(&self, drafts: Vec<Draft>) -> Result<Vec<Ulid>, StoreError> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }
        check_dimensions(&drafts, self.dimension)?;

        let mut ids = Vec::with_capacity(drafts.len());
        let points: Vec<PointStruct> = drafts
            .into_iter()
            .map(|draft| {
                let id = Ulid::new();
                ids.push(id);
                PointStruct::new(
                    point_id(id),
                    draft.embedding,
                    payload_to_qdrant(draft.payload),
                )
            })
            .collect();

        self.client
            .upsert_points(UpsertPointsBuilder::new(&self.collection, points))
            .await
            .context("failed to upsert points into qdrant")?;

        tracing::debug!(inserted = ids.len(), collection = %self.collection, "records inserted");
        Ok(ids)
    }

    async fn search(&self, embedding: &[f32], k: usize) -> Result<Vec<Payload>, StoreError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let response = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, embedding.to_vec(), k as u64)
                    .with_payload(true),
            )
            .await
            .context("failed to search qdrant collection")?;

        Ok(response
            .result
            .into_iter()
            .map(|point| payload_from_qdrant(point.payload))
            .collect())
    }
}

/// Reject any draft whose embedding length differs from the configured
/// collection dimensionality, before touching the network.
fn check_dimensions(drafts: &[Draft], expected: usize) -> Result<(), StoreError> {
    for draft in drafts {
        if draft.embedding.len() != expected {
            return Err(StoreError::DimensionMismatch {
                expected,
                got: draft.embedding.len(),
            });
        }
    }
    Ok(())
}

/// Qdrant point ids must be UUIDs or integers; a ULID is 128 bits, so
/// it maps losslessly onto a UUID.
fn point_id(id: Ulid) -> String {
    Uuid::from_u128(u128::from(id)).to_string()
}
