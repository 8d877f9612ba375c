//! lookup-index
//!
//! Tantivy-backed artifact resolution: the read-only index handle, the
//! delimited-coordinate query builder, the per-identifier lookup executor
//! and the bounded-concurrency batch driver. See `batch` for the entry
//! point the CLI uses.

pub mod batch;
pub mod index;
pub mod query;
pub mod search;

pub use batch::{into_artifacts, into_findings, run_lookups, BatchConfig};
pub use index::{artifact_schema, ArtifactIndex};
pub use query::{coordinate_pattern, coordinate_query};
