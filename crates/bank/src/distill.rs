//! Judging and distillation of raw trajectories.
//!
//! Both operations talk to an unreliable language model, so the
//! boundary is deliberately tolerant: judgment is a substring check
//! that defaults to failure, and distillation output that fails to
//! parse degrades to "no lesson extracted" instead of an error.

use hcore::{Completion, MemoryItem};
use serde_json::Value;

/// Judge whether a trajectory successfully addressed its query.
///
/// The response counts as success iff it contains "success"
/// case-insensitively; anything else — ambiguous, malformed, empty —
/// is failure. Errs only when the completion service itself fails.
pub async fn judge<C: Completion>(
    completion: &C,
    trajectory: &str,
    query: &str,
) -> anyhow::Result<bool> {
    let prompt = format!(
        include_str!("../prompts/judge.txt"),
        query = query,
        trajectory = trajectory,
    );
    let response = completion.complete(&prompt).await?;
    Ok(response.to_lowercase().contains("success"))
}

/// Distill a judged trajectory into reusable memory items.
///
/// Successful trajectories yield strategies, failed ones pitfalls; the
/// `verdict` must come from [`judge`] on the same pair. A completion
/// failure or unparseable output yields an empty list, never an error.
pub async fn distill<C: Completion>(
    completion: &C,
    trajectory: &str,
    query: &str,
    verdict: bool,
) -> Vec<MemoryItem> {
    let prompt = if verdict {
        format!(
            include_str!("../prompts/distill_success.txt"),
            query = query,
            trajectory = trajectory,
        )
    } else {
        format!(
            include_str!("../prompts/distill_failure.txt"),
            query = query,
            trajectory = trajectory,
        )
    };

    let response = match completion.complete(&prompt).await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("distillation request failed: {e:#}");
            return Vec::new();
        }
    };

    parse_items(&response)
}

/// Parse a distillation response into validated memory items.
fn parse_items(response: &str) -> Vec<MemoryItem> {
    let value: Value = match serde_json::from_str(response) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("distillation output is not valid JSON: {e}");
            return Vec::new();
        }
    };

    let Value::Array(entries) = value else {
        tracing::warn!("distillation output is not a list");
        return Vec::new();
    };

    entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<MemoryItem>(entry) {
            Ok(item) if item.is_valid() => Some(item),
            Ok(_) => {
                tracing::warn!("dropping memory item with empty fields");
                None
            }
            Err(e) => {
                tracing::warn!("dropping malformed memory item: {e}");
                None
            }
        })
        .collect()
}
