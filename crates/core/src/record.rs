//! The data model: from raw attempt to persisted record.
//!
//! A finished attempt becomes an [`Experience`]; distillation extracts
//! [`MemoryItem`]s from it; embedding turns either into [`Draft`]s; the
//! store assigns ids and persists them as [`MemoryRecord`]s. All of
//! these are immutable once created — the store only ever grows.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ulid::Ulid;

/// Payload carried alongside an embedding, returned verbatim on search.
pub type Payload = serde_json::Map<String, Value>;

/// A distilled lesson: one reusable strategy or pitfall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryItem {
    /// Short label.
    pub title: String,
    /// One-sentence summary.
    pub description: String,
    /// The reusable reasoning text.
    pub content: String,
}

impl MemoryItem {
    /// Whether the item is storable: all three fields non-empty.
    pub fn is_valid(&self) -> bool {
        !self.title.is_empty() && !self.description.is_empty() && !self.content.is_empty()
    }

    /// The item's fields as a record payload.
    pub fn to_payload(&self) -> Payload {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Payload::new(),
        }
    }
}

/// One recorded task attempt: query, raw trajectory, judged verdict,
/// and the lessons distilled from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    /// The task or question the agent was given.
    pub query: String,
    /// The raw thoughts/actions/observations, opaque text.
    pub trajectory: String,
    /// Whether the attempt was judged successful.
    pub verdict: bool,
    /// Lessons distilled from the trajectory, in extraction order.
    pub items: Vec<MemoryItem>,
}

impl Experience {
    /// Create an experience from a judged, distilled attempt.
    pub fn new(
        query: impl Into<String>,
        trajectory: impl Into<String>,
        verdict: bool,
        items: Vec<MemoryItem>,
    ) -> Self {
        Self {
            query: query.into(),
            trajectory: trajectory.into(),
            verdict,
            items,
        }
    }

    /// The whole experience as a record payload, items serialized inline.
    pub fn to_payload(&self) -> Payload {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Payload::new(),
        }
    }
}

/// An embedded entry not yet inserted into a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    /// The embedding vector.
    pub embedding: Vec<f32>,
    /// The payload returned verbatim on search.
    pub payload: Payload,
}

/// The unit a store persists: a draft plus its assigned id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Opaque unique id, assigned at insertion.
    pub id: Ulid,
    /// The embedding vector.
    pub embedding: Vec<f32>,
    /// The payload returned verbatim on search.
    pub payload: Payload,
}

impl MemoryRecord {
    /// Persist a draft under a fresh id.
    pub fn from_draft(draft: Draft) -> Self {
        Self {
            id: Ulid::new(),
            embedding: draft.embedding,
            payload: draft.payload,
        }
    }
}
