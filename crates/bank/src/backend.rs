//! Store backend enum for static dispatch over storage engines.

use crate::config::StoreConfig;
use anyhow::Result;
use hcore::{Draft, Payload, Store, StoreError};
use json::JsonStore;
use qdrant::QdrantStore;
use ulid::Ulid;

/// Unified store backend (static dispatch, no dyn).
pub enum Backend {
    /// File-backed linear-scan store.
    Json(JsonStore),
    /// External Qdrant index.
    Qdrant(QdrantStore),
}

impl Backend {
    /// Create a backend from configuration.
    ///
    /// An unknown backend identifier or a missing required parameter is
    /// a fatal configuration error, surfaced immediately.
    pub async fn new(config: &StoreConfig) -> Result<Self> {
        match config.backend.as_str() {
            "json" => {
                let path = config
                    .path
                    .as_ref()
                    .ok_or_else(|| anyhow::anyhow!("json backend requires a file path"))?;
                Ok(Self::Json(JsonStore::open(path)?))
            }
            "qdrant" => {
                let url = config
                    .url
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("qdrant backend requires a url"))?;
                let dimension = config.dimension.ok_or_else(|| {
                    anyhow::anyhow!("qdrant backend requires the embedding dimension")
                })?;
                let collection = config.collection.clone().unwrap_or_else(|| "hindsight".into());
                Ok(Self::Qdrant(
                    QdrantStore::connect(url, collection, dimension).await?,
                ))
            }
            other => anyhow::bail!("unknown store backend: {other}"),
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Json(_) => f.write_str("Backend::Json"),
            Self::Qdrant(_) => f.write_str("Backend::Qdrant"),
        }
    }
}

impl Store for Backend {
    async fn insert(&self, drafts: Vec<Draft>) -> Result<Vec<Ulid>, StoreError> {
        match self {
            Self::Json(store) => store.insert(drafts).await,
            Self::Qdrant(store) => store.insert(drafts).await,
        }
    }

    async fn search(&self, embedding: &[f32], k: usize) -> Result<Vec<Payload>, StoreError> {
        match self {
            Self::Json(store) => store.search(embedding, k).await,
            Self::Qdrant(store) => store.search(embedding, k).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_backend_is_rejected() {
        let config = StoreConfig {
            backend: "redis".into(),
            ..Default::default()
        };
        let err = Backend::new(&config).await.unwrap_err();
        assert!(err.to_string().contains("unknown store backend"));
    }

    #[tokio::test]
    async fn json_backend_requires_path() {
        let config = StoreConfig {
            backend: "json".into(),
            ..Default::default()
        };
        assert!(Backend::new(&config).await.is_err());
    }

    #[tokio::test]
    async fn json_backend_opens_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig {
            backend: "json".into(),
            path: Some(dir.path().join("memories.json")),
            ..Default::default()
        };
        let backend = Backend::new(&config).await.unwrap();
        assert!(matches!(backend, Backend::Json(_)));
    }
}
