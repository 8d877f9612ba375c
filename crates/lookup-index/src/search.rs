//! Per-identifier lookup execution.

use anyhow::Result;

use lookup_core::types::LookupOutcome;

use crate::index::ArtifactIndex;
use crate::query::coordinate_query;

impl ArtifactIndex {
    /// Resolve one identifier: build its coordinate query, take the top
    /// `limit` hits and materialize the best one.
    ///
    /// Zero hits yield an outcome with no artifact, which is a normal
    /// result, not an error. Query construction or search failures
    /// propagate and are fatal to the whole batch; they are never
    /// silently skipped.
    pub fn lookup(&self, id: &str, limit: usize) -> Result<LookupOutcome> {
        let query = coordinate_query(self.coordinates_field, id)?;
        let hits = self.search(&query, limit)?;
        let Some(&(score, address)) = hits.first() else {
            return Ok(LookupOutcome {
                id: id.to_string(),
                artifact: None,
                total_hits: 0,
            });
        };
        let artifact = self.stored_artifact(score, address)?;
        Ok(LookupOutcome {
            id: id.to_string(),
            artifact: Some(artifact),
            total_hits: hits.len(),
        })
    }
}
