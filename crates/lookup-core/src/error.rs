use thiserror::Error;

/// Fatal error kinds for a batch lookup run. A query with zero hits is
/// not an error; it is filtered out during aggregation.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InputParse(String),

    #[error("Cannot open index at '{0}': {1}")]
    IndexOpen(String, String),

    #[error("Malformed query for identifier '{0}': {1}")]
    MalformedQuery(String, String),

    #[error("Search failed: {0}")]
    Search(String),
}

pub type Result<T> = std::result::Result<T, Error>;
