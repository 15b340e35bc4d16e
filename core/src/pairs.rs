use crate::corpus::Corpus;
use crate::stemmer::Stemmer;
use crate::tokenizer::tokenize;
use crate::DocId;
use serde::{Deserialize, Serialize};

/// One (term, doc) occurrence before the index is built. Repeated tokens in a
/// document give repeated pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntermediatePair {
    pub term: String,
    pub doc_id: DocId,
    /// The token as it appeared (lowercased) before stemming.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_token: Option<String>,
}

impl IntermediatePair {
    pub fn new(term: impl Into<String>, doc_id: DocId) -> Self {
        Self { term: term.into(), doc_id, original_token: None }
    }

    /// Sort key: term by code point, then doc id.
    pub fn key(&self) -> (&str, DocId) { (&self.term, self.doc_id) }
}

/// Tokenize and stem every document, emitting pairs in document order and then
/// token order.
pub fn generate_pairs(corpus: &Corpus, stemmer: &Stemmer) -> Vec<IntermediatePair> {
    let mut pairs = Vec::new();
    for doc in corpus.documents() {
        for token in tokenize(&doc.text) {
            pairs.push(IntermediatePair {
                term: stemmer.stem(&token),
                doc_id: doc.id,
                original_token: Some(token),
            });
        }
    }
    pairs
}
