//! File-backed memory store for hindsight.
//!
//! Provides [`JsonStore`], the reference [`Store`](hcore::Store)
//! implementation: all records held in memory, mirrored to a single
//! JSON file after every insert, searched by linear cosine scan.
//!
//! Suited to small stores (hundreds to low thousands of records). No
//! indexing, no pagination, no incremental persistence — deployments
//! that outgrow it swap in `hindsight-qdrant` behind the same contract.

use anyhow::{Context, Result};
use hcore::{Draft, MemoryRecord, Payload, Store, StoreError};
use parking_lot::RwLock;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};
use ulid::Ulid;

/// File-backed store with linear-scan cosine search.
///
/// Records live in memory behind an `RwLock`; `insert` serializes the
/// whole read-modify-rewrite cycle under the write lock, so concurrent
/// inserts cannot corrupt the file and searches never observe a
/// half-written batch.
pub struct JsonStore {
    path: Option<PathBuf>,
    records: RwLock<Vec<MemoryRecord>>,
}

impl JsonStore {
    /// Open or create a store persisted at the given path.
    ///
    /// A missing file is an empty store, not an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let records = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .with_context(|| format!("corrupt memory file at {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read memory file at {}", path.display()));
            }
        };
        tracing::debug!(path = %path.display(), count = records.len(), "opened memory file");
        Ok(Self {
            path: Some(path),
            records: RwLock::new(records),
        })
    }

    /// Create an ephemeral store with no backing file (useful for
    /// testing).
    pub fn in_memory() -> Self {
        Self {
            path: None,
            records: RwLock::new(Vec::new()),
        }
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Rewrite the whole persisted array.
    ///
    /// Writes to a sibling temp file first and renames it over the
    /// target, so an interrupted write never truncates acknowledged
    /// records.
    fn save(path: &Path, records: &[MemoryRecord]) -> Result<()> {
        let contents = serde_json::to_vec(records)?;
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, contents)
            .with_context(|| format!("failed to write memory file at {}", tmp.display()))?;
        std::fs::rename(&tmp, path)
            .with_context(|| format!("failed to replace memory file at {}", path.display()))?;
        Ok(())
    }
}

impl Store for JsonStore {
    async fn insert(&self, drafts: Vec<Draft>) -> Result<Vec<Ulid>, StoreError> {
        if drafts.is_empty() {
            return Ok(Vec::new());
        }

        let mut records = self.records.write();
        let expected = records
            .first()
            .map(|r| r.embedding.len())
            .unwrap_or_else(|| drafts[0].embedding.len());
        for draft in &drafts {
            if draft.embedding.len() != expected {
                return Err(StoreError::DimensionMismatch {
                    expected,
                    got: draft.embedding.len(),
                });
            }
        }

        let before = records.len();
        let mut ids = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let record = MemoryRecord::from_draft(draft);
            ids.push(record.id);
            records.push(record);
        }

        if let Some(path) = &self.path {
            if let Err(e) = Self::save(path, &records) {
                records.truncate(before);
                return Err(StoreError::Backend(e));
            }
        }

        tracing::debug!(inserted = ids.len(), total = records.len(), "records inserted");
        Ok(ids)
    }

    async fn search(&self, embedding: &[f32], k: usize) -> Result<Vec<Payload>, StoreError> {
        if k == 0 {
            return Ok(Vec::new());
        }

        let records = self.records.read();
        let mut scored: Vec<(usize, f32)> = records
            .iter()
            .enumerate()
            .map(|(i, record)| (i, cosine_similarity(embedding, &record.embedding)))
            .collect();

        // Most similar first; equal scores keep insertion order.
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(i, _)| records[i].payload.clone())
            .collect())
    }
}

/// Cosine similarity between two vectors.
///
/// Zero when either vector has zero magnitude or the lengths differ.
fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    dot / (magnitude_a * magnitude_b)
}
