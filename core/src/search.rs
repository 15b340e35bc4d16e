use crate::index::Dictionary;
use crate::stemmer::Stemmer;
use crate::tokenizer::first_token;
use crate::DocId;
use serde::Serialize;

/// How a query was resolved against the dictionary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryResolution {
    /// First token of the query; `None` when the query has no letters.
    pub token: Option<String>,
    /// The token after stemming.
    pub term: Option<String>,
    pub postings: Vec<DocId>,
}

/// Resolve only the first token of `query`. Later tokens are ignored.
pub fn resolve_query(query: &str, dictionary: &Dictionary, stemmer: &Stemmer) -> QueryResolution {
    let Some(token) = first_token(query) else {
        return QueryResolution { token: None, term: None, postings: Vec::new() };
    };
    let term = stemmer.stem(&token);
    let postings = dictionary.get(&term).map(<[DocId]>::to_vec).unwrap_or_default();
    QueryResolution { token: Some(token), term: Some(term), postings }
}

/// Postings for the stemmed first token of `query`, or empty.
pub fn search(query: &str, dictionary: &Dictionary, stemmer: &Stemmer) -> Vec<DocId> {
    resolve_query(query, dictionary, stemmer).postings
}
