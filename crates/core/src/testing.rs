//! Deterministic test doubles for the service traits.
//!
//! Gated behind the `testing` feature. Tests that exercise the bank or
//! the scaling layer script the external services instead of calling
//! real APIs.

use crate::{Completion, Embedder, Executor};
use anyhow::Result;
use std::collections::VecDeque;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Mutex;

/// Deterministic embedder: derives a fixed-dimension vector from a hash
/// of the input text. Equal texts embed equally; no semantic meaning.
pub struct SeedEmbedder {
    dim: usize,
}

impl SeedEmbedder {
    /// Create an embedder producing `dim`-dimensional vectors.
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Embedder for SeedEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let hash = hasher.finish();
        Ok((0..self.dim)
            .map(|i| ((hash >> (i % 64)) & 1) as f32)
            .collect())
    }
}

/// Completion double that replays a fixed list of responses in order.
///
/// Errors with "script exhausted" once the list runs out, which doubles
/// as a service-failure stand-in for error-path tests.
pub struct ScriptedCompletion {
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedCompletion {
    /// Script the responses to replay.
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
        }
    }
}

impl Completion for ScriptedCompletion {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("completion script exhausted"))
    }
}

/// Executor double that replays scripted attempt outcomes in order.
pub struct ScriptedExecutor {
    steps: Mutex<VecDeque<Result<String, String>>>,
}

impl ScriptedExecutor {
    /// Script the outcomes to replay; `Err` entries become run errors.
    pub fn new(steps: impl IntoIterator<Item = Result<String, String>>) -> Self {
        Self {
            steps: Mutex::new(steps.into_iter().collect()),
        }
    }

    /// Convenience for an all-successful script.
    pub fn ok<I, S>(trajectories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(trajectories.into_iter().map(|t| Ok(t.into())))
    }
}

impl Executor for ScriptedExecutor {
    async fn run(&self, _memories: &str, _query: &str) -> Result<String> {
        match self.steps.lock().unwrap().pop_front() {
            Some(Ok(trajectory)) => Ok(trajectory),
            Some(Err(message)) => Err(anyhow::anyhow!(message)),
            None => Err(anyhow::anyhow!("executor script exhausted")),
        }
    }
}
