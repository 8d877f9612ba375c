use anyhow::Result;
use std::path::Path;
use tantivy::collector::TopDocs;
use tantivy::query::Query;
use tantivy::schema::{Schema, Value, STORED, STRING};
use tantivy::{DocAddress, Index, Searcher, TantivyDocument};

use lookup_core::error::Error;
use lookup_core::types::Artifact;

/// Stored-field names of the artifact index. `COORDINATES` holds the
/// pipe-delimited coordinate list that lookups match against; the rest
/// are descriptive metadata materialized into results verbatim.
pub const COORDINATES: &str = "u";
pub const INFO: &str = "i";
pub const MODIFIED: &str = "m";
pub const NAME: &str = "n";
pub const DESCRIPTION: &str = "d";

/// Shared read-only handle over an on-disk artifact index.
///
/// Opened once before any queries run and shared across workers behind
/// an `Arc`; the searcher is a point-in-time snapshot and is safe for
/// concurrent reads without locking. Underlying directory resources are
/// released exactly once when the handle drops, on every exit path.
#[derive(Debug)]
pub struct ArtifactIndex {
    searcher: Searcher,
    pub(crate) coordinates_field: tantivy::schema::Field,
    info_field: tantivy::schema::Field,
    modified_field: tantivy::schema::Field,
    name_field: tantivy::schema::Field,
    description_field: tantivy::schema::Field,
}

impl ArtifactIndex {
    pub fn open(index_dir: &Path) -> Result<Self> {
        let open_err = |e: &dyn std::fmt::Display| {
            Error::IndexOpen(index_dir.display().to_string(), e.to_string())
        };
        let index = Index::open_in_dir(index_dir).map_err(|e| open_err(&e))?;
        let reader = index.reader().map_err(|e| open_err(&e))?;
        let searcher = reader.searcher();
        let schema = index.schema();
        let coordinates_field = schema.get_field(COORDINATES).map_err(|e| open_err(&e))?;
        let info_field = schema.get_field(INFO).map_err(|e| open_err(&e))?;
        let modified_field = schema.get_field(MODIFIED).map_err(|e| open_err(&e))?;
        let name_field = schema.get_field(NAME).map_err(|e| open_err(&e))?;
        let description_field = schema.get_field(DESCRIPTION).map_err(|e| open_err(&e))?;
        Ok(Self {
            searcher,
            coordinates_field,
            info_field,
            modified_field,
            name_field,
            description_field,
        })
    }

    /// Top `limit` hits for `query`, ranked by descending score. Ties
    /// fall back to the engine's internal document order.
    pub fn search(&self, query: &dyn Query, limit: usize) -> Result<Vec<(f32, DocAddress)>> {
        let top_docs = self
            .searcher
            .search(query, &TopDocs::with_limit(limit.max(1)))
            .map_err(|e| Error::Search(e.to_string()))?;
        Ok(top_docs)
    }

    /// Materialize one hit's stored fields into an `Artifact`. A field
    /// absent from the stored document becomes an empty string.
    pub fn stored_artifact(&self, score: f32, address: DocAddress) -> Result<Artifact> {
        let doc: TantivyDocument = self
            .searcher
            .doc(address)
            .map_err(|e| Error::Search(e.to_string()))?;
        let text = |field: tantivy::schema::Field| {
            doc.get_first(field)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        Ok(Artifact {
            coordinates: text(self.coordinates_field),
            info: text(self.info_field),
            modified: text(self.modified_field),
            name: text(self.name_field),
            description: text(self.description_field),
            score,
        })
    }
}

/// Schema of the artifact index: five stored string fields. The
/// coordinate field is indexed raw so the delimited value stays a single
/// term for the lookup regex to run over. Index construction itself is
/// out of scope here; tests use this to build fixtures.
pub fn artifact_schema() -> Schema {
    let mut schema_builder = Schema::builder();
    let _coordinates_field = schema_builder.add_text_field(COORDINATES, STRING | STORED);
    let _info_field = schema_builder.add_text_field(INFO, STRING | STORED);
    let _modified_field = schema_builder.add_text_field(MODIFIED, STRING | STORED);
    let _name_field = schema_builder.add_text_field(NAME, STRING | STORED);
    let _description_field = schema_builder.add_text_field(DESCRIPTION, STRING | STORED);
    schema_builder.build()
}
