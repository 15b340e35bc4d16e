use crate::DocId;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub text: String,
}

impl Document {
    pub fn new(id: DocId, text: impl Into<String>) -> Self {
        Self { id, text: text.into() }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CorpusError {
    #[error("document id must be positive, got {0}")]
    InvalidDocumentId(DocId),
    #[error("duplicate document id {0}")]
    DuplicateDocumentId(DocId),
}

/// A validated, immutable collection of documents in caller order.
///
/// Ids are positive and unique; every later stage relies on that and is
/// therefore infallible.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Corpus {
    docs: Vec<Document>,
}

impl Corpus {
    pub fn new(docs: Vec<Document>) -> Result<Self, CorpusError> {
        let mut seen = HashSet::with_capacity(docs.len());
        for doc in &docs {
            if doc.id == 0 {
                return Err(CorpusError::InvalidDocumentId(doc.id));
            }
            if !seen.insert(doc.id) {
                return Err(CorpusError::DuplicateDocumentId(doc.id));
            }
        }
        Ok(Self { docs })
    }

    /// Five short lines from Julius Caesar.
    pub fn sample() -> Self {
        let docs = [
            (1, "Friends, Romans, countrymen, lend me your ears;"),
            (2, "I come to bury Caesar, not to praise him."),
            (3, "The evil that men do lives after them;"),
            (4, "The good is oft interred with their bones;"),
            (5, "So let it be with Caesar. The noble Brutus"),
        ];
        Self { docs: docs.into_iter().map(|(id, text)| Document::new(id, text)).collect() }
    }

    pub fn documents(&self) -> &[Document] { &self.docs }
    pub fn len(&self) -> usize { self.docs.len() }
    pub fn is_empty(&self) -> bool { self.docs.is_empty() }
    pub fn get(&self, id: DocId) -> Option<&Document> { self.docs.iter().find(|d| d.id == id) }
}

impl TryFrom<Vec<Document>> for Corpus {
    type Error = CorpusError;

    fn try_from(docs: Vec<Document>) -> Result<Self, Self::Error> {
        Self::new(docs)
    }
}
