//! Query construction for coordinate lookups.

use anyhow::Result;
use tantivy::query::RegexQuery;
use tantivy::schema::Field;

use lookup_core::error::Error;

/// The regex pattern matching documents whose coordinate list contains
/// the identifier delimited by a literal pipe on both sides.
pub fn coordinate_pattern(id: &str) -> String {
    format!(".*\\|{}\\|.*", regex::escape(id))
}

/// Build the lookup query for one identifier against the coordinate
/// field.
///
/// Regex metacharacters in the identifier (pipes, dots, plus signs) are
/// escaped so they match literally. The coordinate field is indexed as a
/// single raw term, so the pattern runs over the whole delimited value.
/// A pattern the engine still rejects maps to `Error::MalformedQuery`.
pub fn coordinate_query(field: Field, id: &str) -> Result<RegexQuery> {
    let pattern = coordinate_pattern(id);
    RegexQuery::from_pattern(&pattern, field)
        .map_err(|e| Error::MalformedQuery(id.to_string(), e.to_string()).into())
}
