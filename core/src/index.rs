use crate::pairs::IntermediatePair;
use crate::sort::IndexError;
use crate::DocId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub term: String,
    /// Distinct doc ids, ascending.
    pub postings: Vec<DocId>,
}

/// The finished index: entries with unique terms in ascending code point order.
/// Deserializing checks that order, since lookups binary-search it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<DictionaryEntry>", try_from = "Vec<DictionaryEntry>")]
pub struct Dictionary {
    entries: Vec<DictionaryEntry>,
}

impl TryFrom<Vec<DictionaryEntry>> for Dictionary {
    type Error = IndexError;

    fn try_from(entries: Vec<DictionaryEntry>) -> Result<Self, Self::Error> {
        if let Some(w) = entries.windows(2).find(|w| w[0].term >= w[1].term) {
            return Err(IndexError::UnsortedTerms(w[1].term.clone()));
        }
        if let Some(e) = entries.iter().find(|e| e.postings.windows(2).any(|p| p[0] >= p[1])) {
            return Err(IndexError::UnsortedPostings(e.term.clone()));
        }
        Ok(Self { entries })
    }
}

impl From<Dictionary> for Vec<DictionaryEntry> {
    fn from(dictionary: Dictionary) -> Self { dictionary.entries }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub num_terms: usize,
    pub num_postings: usize,
}

impl Dictionary {
    pub fn entries(&self) -> &[DictionaryEntry] { &self.entries }
    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn iter(&self) -> std::slice::Iter<'_, DictionaryEntry> { self.entries.iter() }

    /// Exact lookup of a stemmed term.
    pub fn get(&self, term: &str) -> Option<&[DocId]> {
        self.entries
            .binary_search_by(|e| e.term.as_str().cmp(term))
            .ok()
            .map(|i| self.entries[i].postings.as_slice())
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats {
            num_terms: self.entries.len(),
            num_postings: self.entries.iter().map(|e| e.postings.len()).sum(),
        }
    }
}

impl<'a> IntoIterator for &'a Dictionary {
    type Item = &'a DictionaryEntry;
    type IntoIter = std::slice::Iter<'a, DictionaryEntry>;

    fn into_iter(self) -> Self::IntoIter { self.entries.iter() }
}

/// Group sorted pairs into the dictionary in one pass.
///
/// Input must be sorted by `(term, doc_id)` (see [`crate::sort`]): a doc id is
/// appended only when it differs from the last posting, which drops every
/// duplicate because equal pairs are adjacent.
pub fn build_index(sorted_pairs: &[IntermediatePair]) -> Dictionary {
    let mut entries: Vec<DictionaryEntry> = Vec::new();
    for pair in sorted_pairs {
        match entries.last_mut() {
            Some(entry) if entry.term == pair.term => {
                if entry.postings.last() != Some(&pair.doc_id) {
                    entry.postings.push(pair.doc_id);
                }
            }
            _ => entries.push(DictionaryEntry { term: pair.term.clone(), postings: vec![pair.doc_id] }),
        }
    }
    Dictionary { entries }
}
