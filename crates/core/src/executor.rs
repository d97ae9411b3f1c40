//! Agent executor trait: produce a trajectory for a query.

use anyhow::Result;
use std::future::Future;

/// Runs one agent attempt.
///
/// Given formatted prior memories and a query (or a refinement prompt
/// wrapping the query), returns the raw trajectory the agent produced:
/// its thoughts, actions, and observations as opaque text.
pub trait Executor: Send + Sync {
    /// Run the agent once and return the resulting trajectory.
    fn run(&self, memories: &str, query: &str) -> impl Future<Output = Result<String>> + Send;
}
