//! Test-time scaling: several agent attempts per query.
//!
//! Both strategies are built only from the bank's read/write operations,
//! an [`Executor`], and the completion service. Every attempt feeds the
//! store, so later queries benefit even when an individual run is
//! discarded.

use crate::{Bank, format_memories};
use anyhow::Result;
use futures_util::future::join_all;
use hcore::{Completion, Embedder, Executor, Store};

/// Fan out `k` independent attempts, then synthesize one answer.
///
/// Memories are retrieved once and shared by all attempts; the attempts
/// run concurrently. A failed attempt is excluded from synthesis and
/// logged — the batch only errors when every attempt fails. Each
/// surviving trajectory is recorded via
/// [`add_experience`](Bank::add_experience) (recording failures are
/// likewise isolated per attempt). Synthesis receives the trajectories
/// in issue order, regardless of completion order, and its response is
/// returned verbatim.
pub async fn parallel<S, E, C, X>(
    bank: &Bank<S, E, C>,
    executor: &X,
    query: &str,
    k: usize,
) -> Result<String>
where
    S: Store,
    E: Embedder,
    C: Completion,
    X: Executor,
{
    anyhow::ensure!(k > 0, "parallel scaling requires at least one attempt");

    let memories = bank.retrieve_memories(query, k).await?;
    let formatted = format_memories(&memories);

    let attempts = join_all((0..k).map(|_| executor.run(&formatted, query))).await;
    let mut trajectories = Vec::with_capacity(k);
    for (attempt, result) in attempts.into_iter().enumerate() {
        match result {
            Ok(trajectory) => trajectories.push(trajectory),
            Err(e) => {
                tracing::warn!(attempt, "agent attempt failed, excluded from synthesis: {e:#}");
            }
        }
    }
    anyhow::ensure!(!trajectories.is_empty(), "all {k} agent attempts failed");

    for trajectory in &trajectories {
        if let Err(e) = bank.add_experience(trajectory, query).await {
            tracing::warn!("failed to record attempt: {e:#}");
        }
    }

    let numbered = trajectories
        .iter()
        .enumerate()
        .map(|(i, trajectory)| format!("Attempt {}:\n{}", i + 1, trajectory))
        .collect::<Vec<_>>()
        .join("\n\n");
    let prompt = format!(
        include_str!("../prompts/synthesize.txt"),
        count = trajectories.len(),
        query = query,
        trajectories = numbered,
    );
    bank.completion.complete(&prompt).await
}

/// Refine a single trajectory over `k` iterations.
///
/// Each iteration re-retrieves the top memory for the query, wraps the
/// query and the current trajectory in a refinement prompt, and replaces
/// the trajectory with the executor's output. Iterations depend on each
/// other, so any executor failure propagates. Only the final trajectory
/// is recorded, then returned.
pub async fn sequential<S, E, C, X>(
    bank: &Bank<S, E, C>,
    executor: &X,
    query: &str,
    k: usize,
) -> Result<String>
where
    S: Store,
    E: Embedder,
    C: Completion,
    X: Executor,
{
    anyhow::ensure!(k > 0, "sequential scaling requires at least one iteration");

    let mut trajectory = String::new();
    for iteration in 0..k {
        let memories = bank.retrieve_memories(query, 1).await?;
        let formatted = format_memories(&memories);
        let prompt = format!(
            include_str!("../prompts/refine.txt"),
            query = query,
            trajectory = trajectory,
        );
        trajectory = executor.run(&formatted, &prompt).await?;
        tracing::debug!(iteration, length = trajectory.len(), "trajectory refined");
    }

    bank.add_experience(&trajectory, query).await?;
    Ok(trajectory)
}
