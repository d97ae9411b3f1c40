//! Experience distillation, memory orchestration, and attempt scaling.
//!
//! The pipeline, write side: a finished (trajectory, query) pair is
//! judged for success, distilled into [`MemoryItem`](hcore::MemoryItem)
//! lessons, embedded, and inserted into a [`Store`](hcore::Store). Read
//! side: a query is embedded and the nearest stored payloads come back,
//! ready for prompt injection via [`format_memories`].
//!
//! [`Bank`] ties the two sides together over injected service traits;
//! the [`scaling`] module drives several agent attempts per query
//! against the same growing store. Prompt templates live in
//! `prompts/*.txt`, loaded via `include_str!`.

pub use {
    backend::Backend,
    bank::{Bank, Granularity},
    config::{Config, ServiceConfig, StoreConfig},
    distill::{distill, judge},
    format::format_memories,
    provider::{EmbeddingProvider, Provider},
};

mod backend;
mod bank;
mod config;
mod distill;
mod format;
mod provider;
pub mod scaling;
