use crate::query::Query;
use crate::result::SearchResult;

/// Execution boundary: sends a serialized [`Query`] to the remote search API.
///
/// Implementations own transport, authentication, endpoint selection and
/// pagination.
pub trait Searcher {
    type Error;

    fn search(&self, query: &Query) -> Result<SearchResult, Self::Error>;

    /// Browser-facing URL for the same query.
    fn url(&self, query: &Query) -> String;
}
