//! Static inverted index construction: tokenize, Porter-stem, sort
//! `(term, doc)` pairs, group them into a dictionary, and resolve single-term
//! queries against it.

pub mod corpus;
pub mod index;
pub mod ingest;
pub mod measure;
pub mod pairs;
pub mod pipeline;
pub mod search;
pub mod sort;
pub mod stemmer;
pub mod tokenizer;

pub type DocId = u32;

pub use corpus::{Corpus, CorpusError, Document};
pub use index::{build_index, Dictionary, DictionaryEntry, IndexStats};
pub use pairs::{generate_pairs, IntermediatePair};
pub use pipeline::{Pipeline, PipelineConfig, PipelineRun};
pub use search::{resolve_query, search, QueryResolution};
pub use sort::{sort_pairs, sort_pairs_blocked, IndexError};
pub use stemmer::{stem, Stemmer};
pub use tokenizer::tokenize;
