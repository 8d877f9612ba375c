//! Bounded-concurrency fan-out of lookups over one shared index handle.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Semaphore;

use lookup_core::types::{Artifact, ArtifactFinding, ArtifactId, LookupOutcome};

use crate::index::ArtifactIndex;

/// Tunables for one batch run.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum number of index searches in flight at any instant.
    pub parallelism: usize,
    /// Emit a progress line after every this many completed queries.
    pub log_interval: usize,
    /// Per-query hit limit. 1 resolves the best match only; larger
    /// values additionally bound the reported hit count.
    pub limit: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { parallelism: num_cpus::get(), log_interval: 100, limit: 1 }
    }
}

/// Run one lookup per identifier, at most `parallelism` concurrently.
///
/// Every identifier is processed exactly once and outcomes come back in
/// submission order regardless of completion order. Each lookup runs on
/// the blocking pool so index I/O never stalls the runtime; a semaphore
/// permit held for the duration of the search bounds concurrency. The
/// first failing query aborts the run: tasks that have not started yet
/// are skipped, tasks already running are awaited, then the error
/// propagates and no outcomes are returned.
pub async fn run_lookups(
    index: Arc<ArtifactIndex>,
    ids: Vec<ArtifactId>,
    config: &BatchConfig,
) -> Result<Vec<LookupOutcome>> {
    let semaphore = Arc::new(Semaphore::new(config.parallelism.max(1)));
    let completed = Arc::new(AtomicUsize::new(0));
    let aborted = Arc::new(AtomicBool::new(false));
    let log_interval = config.log_interval.max(1);
    let limit = config.limit.max(1);

    let mut tasks = Vec::with_capacity(ids.len());
    for id in ids {
        let semaphore = Arc::clone(&semaphore);
        let completed = Arc::clone(&completed);
        let aborted = Arc::clone(&aborted);
        let index = Arc::clone(&index);
        tasks.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            if aborted.load(Ordering::Relaxed) {
                return Ok(None);
            }
            let handle = Arc::clone(&index);
            let result = tokio::task::spawn_blocking(move || handle.lookup(&id, limit)).await?;
            match result {
                Ok(outcome) => {
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if done % log_interval == 0 {
                        println!("Processed {} identifiers", done);
                    }
                    Ok(Some(outcome))
                }
                Err(e) => {
                    aborted.store(true, Ordering::Relaxed);
                    Err(e)
                }
            }
        }));
    }

    let mut outcomes = Vec::with_capacity(tasks.len());
    let mut first_error = None;
    for joined in futures::future::join_all(tasks).await {
        match joined? {
            Ok(Some(outcome)) => outcomes.push(outcome),
            Ok(None) => {}
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(outcomes),
    }
}

/// Drop no-match outcomes and keep the resolved artifacts, in submission
/// order.
pub fn into_artifacts(outcomes: Vec<LookupOutcome>) -> Vec<Artifact> {
    outcomes.into_iter().filter_map(|o| o.artifact).collect()
}

/// Multi-match shape: resolved artifacts paired with their bounded hit
/// counts. No-match outcomes are dropped the same way.
pub fn into_findings(outcomes: Vec<LookupOutcome>) -> Vec<ArtifactFinding> {
    outcomes
        .into_iter()
        .filter_map(|o| {
            o.artifact.map(|artifact| ArtifactFinding {
                artifact,
                number_of_findings: o.total_hits,
            })
        })
        .collect()
}
