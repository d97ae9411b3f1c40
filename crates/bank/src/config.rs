//! Configuration for a bank deployment.

use crate::Granularity;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration: which store backend, which embedding and
/// completion services, and the storage granularity.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Store backend selection.
    pub store: StoreConfig,

    /// Embedding service selection.
    pub embedding: ServiceConfig,

    /// Completion service selection.
    pub completion: ServiceConfig,

    /// Storage granularity (defaults to per-item).
    #[serde(default)]
    pub granularity: Granularity,
}

/// Store backend selection with backend-specific parameters.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Backend identifier: `json` or `qdrant`.
    pub backend: String,

    /// Memory file path (json backend).
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Server URL (qdrant backend).
    #[serde(default)]
    pub url: Option<String>,

    /// Collection name (qdrant backend, defaults to `hindsight`).
    #[serde(default)]
    pub collection: Option<String>,

    /// Embedding dimensionality (qdrant backend).
    #[serde(default)]
    pub dimension: Option<usize>,
}

/// An external service selection: provider identifier, model, and
/// credentials.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Provider identifier: `openai`, `ollama`, or `custom`.
    pub provider: String,

    /// Model identifier.
    pub model: String,

    /// API key (empty for keyless local services).
    #[serde(default)]
    pub key: String,

    /// Endpoint URL (`custom` provider only).
    #[serde(default)]
    pub endpoint: Option<String>,
}

impl Config {
    /// Load the configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let config = toml::from_str(&std::fs::read_to_string(path)?)?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig {
                backend: "json".into(),
                path: Some("memories.json".into()),
                ..Default::default()
            },
            embedding: ServiceConfig {
                provider: "openai".into(),
                model: "text-embedding-3-small".into(),
                key: "YOUR_API_KEY".into(),
                endpoint: None,
            },
            completion: ServiceConfig {
                provider: "openai".into(),
                model: "gpt-4o-mini".into(),
                key: "YOUR_API_KEY".into(),
                endpoint: None,
            },
            granularity: Granularity::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_toml() {
        let config: Config = toml::from_str(
            r#"
            [store]
            backend = "json"
            path = "memories.json"

            [embedding]
            provider = "ollama"
            model = "nomic-embed-text"

            [completion]
            provider = "ollama"
            model = "llama3"
            "#,
        )
        .unwrap();
        assert_eq!(config.store.backend, "json");
        assert_eq!(config.granularity, Granularity::PerItem);
        assert!(config.embedding.key.is_empty());
    }

    #[test]
    fn parses_granularity_and_qdrant_backend() {
        let config: Config = toml::from_str(
            r#"
            granularity = "per-experience"

            [store]
            backend = "qdrant"
            url = "http://localhost:6334"
            collection = "lessons"
            dimension = 1536

            [embedding]
            provider = "openai"
            model = "text-embedding-3-small"
            key = "sk-test"

            [completion]
            provider = "openai"
            model = "gpt-4o-mini"
            key = "sk-test"
            "#,
        )
        .unwrap();
        assert_eq!(config.granularity, Granularity::PerExperience);
        assert_eq!(config.store.dimension, Some(1536));
        assert_eq!(config.store.collection.as_deref(), Some("lessons"));
    }

    #[test]
    fn default_round_trips_through_toml() {
        let rendered = toml::to_string(&Config::default()).unwrap();
        let parsed: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed.store.backend, "json");
        assert_eq!(parsed.completion.key, "YOUR_API_KEY");
    }
}
