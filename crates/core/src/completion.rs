//! Completion trait for prompt-in, text-out language model calls.

use anyhow::Result;
use std::future::Future;

/// Sends a prompt to a language model and returns its text response.
///
/// Judging, distillation, and synthesis all go through this single
/// seam, so tests can script the model's answers.
pub trait Completion: Send + Sync {
    /// Complete the given prompt.
    fn complete(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}
