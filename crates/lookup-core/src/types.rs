//! Domain types shared by the index layer and the CLI.

use serde::{Deserialize, Serialize};

pub type ArtifactId = String;

/// One entry of the input batch. The input file is a JSON array of
/// objects carrying the identifier under `_id`; any other fields are
/// ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputEntry {
    #[serde(rename = "_id")]
    pub id: ArtifactId,
}

/// A resolved artifact materialized from the index's stored fields.
///
/// The wire names `u,i,m,n,d` are the index's stored-field names:
/// `u` holds the pipe-delimited coordinate list that queries match
/// against, the rest are descriptive metadata. A field missing from a
/// stored document becomes an empty string, never null. `score` is the
/// engine's relevance value for the hit; higher is better and only
/// comparable within one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    #[serde(rename = "u")]
    pub coordinates: String,
    #[serde(rename = "i")]
    pub info: String,
    #[serde(rename = "m")]
    pub modified: String,
    #[serde(rename = "n")]
    pub name: String,
    #[serde(rename = "d")]
    pub description: String,
    pub score: f32,
}

/// Multi-match output shape: the best hit plus how many hits the query
/// returned in total (bounded by the search limit, not the corpus-wide
/// match count).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactFinding {
    #[serde(flatten)]
    pub artifact: Artifact,
    #[serde(rename = "numberOfFindings")]
    pub number_of_findings: usize,
}

/// The outcome of resolving one input identifier: the best-matching
/// artifact if the query hit anything, and the number of hits returned.
/// `artifact == None` implies `total_hits == 0`.
#[derive(Debug, Clone)]
pub struct LookupOutcome {
    pub id: ArtifactId,
    pub artifact: Option<Artifact>,
    pub total_hits: usize,
}
