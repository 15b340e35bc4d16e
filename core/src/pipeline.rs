//! End-to-end driver: corpus → pairs → sorted pairs → dictionary.

use crate::corpus::Corpus;
use crate::index::{build_index, Dictionary, IndexStats};
use crate::pairs::{generate_pairs, IntermediatePair};
use crate::search::{resolve_query, QueryResolution};
use crate::sort::{sort_in_blocks, sort_pairs, IndexError};
use crate::stemmer::Stemmer;
use crate::DocId;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Sort in blocks of this many pairs and merge the runs. `None` sorts the
    /// whole stream at once.
    pub block_size: Option<usize>,
    /// Start from the built-in irregular table (`men`, `feet`).
    pub irregulars: bool,
    /// Caller-supplied irregular stems, applied after the built-in table.
    pub overrides: BTreeMap<String, String>,
}

impl PipelineConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
        let config = serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}

/// Every intermediate stage of one build, for callers that render the steps.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRun {
    pub pairs: Vec<IntermediatePair>,
    pub sorted_pairs: Vec<IntermediatePair>,
    pub dictionary: Dictionary,
}

impl PipelineRun {
    pub fn stats(&self) -> IndexStats { self.dictionary.stats() }
}

#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    stemmer: Stemmer,
    block_size: Option<NonZeroUsize>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self, IndexError> {
        let block_size = match config.block_size {
            Some(n) => Some(NonZeroUsize::new(n).ok_or(IndexError::InvalidBlockSize)?),
            None => None,
        };
        let mut stemmer = if config.irregulars { Stemmer::with_irregulars() } else { Stemmer::new() };
        stemmer.add_overrides(config.overrides);
        Ok(Self { stemmer, block_size })
    }

    pub fn stemmer(&self) -> &Stemmer { &self.stemmer }

    pub fn sort(&self, pairs: Vec<IntermediatePair>) -> Vec<IntermediatePair> {
        match self.block_size {
            Some(n) => sort_in_blocks(pairs, n),
            None => sort_pairs(pairs),
        }
    }

    pub fn run(&self, corpus: &Corpus) -> PipelineRun {
        let pairs = generate_pairs(corpus, &self.stemmer);
        tracing::debug!(num_docs = corpus.len(), num_pairs = pairs.len(), "generated pairs");

        let sorted_pairs = self.sort(pairs.clone());
        tracing::debug!(block_size = ?self.block_size, "sorted pairs");

        let dictionary = build_index(&sorted_pairs);
        let stats = dictionary.stats();
        tracing::info!(
            num_docs = corpus.len(),
            num_pairs = sorted_pairs.len(),
            num_terms = stats.num_terms,
            num_postings = stats.num_postings,
            "index built"
        );
        PipelineRun { pairs, sorted_pairs, dictionary }
    }

    /// Build only the dictionary, without keeping intermediate stages.
    pub fn build(&self, corpus: &Corpus) -> Dictionary {
        let sorted = self.sort(generate_pairs(corpus, &self.stemmer));
        build_index(&sorted)
    }

    pub fn resolve(&self, query: &str, dictionary: &Dictionary) -> QueryResolution {
        resolve_query(query, dictionary, &self.stemmer)
    }

    pub fn search(&self, query: &str, dictionary: &Dictionary) -> Vec<DocId> {
        self.resolve(query, dictionary).postings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_block_size() {
        let cfg = PipelineConfig { block_size: Some(0), ..Default::default() };
        assert_eq!(Pipeline::new(cfg).unwrap_err(), IndexError::InvalidBlockSize);
    }

    #[test]
    fn blocked_and_unblocked_agree() {
        let corpus = Corpus::sample();
        let plain = Pipeline::default().run(&corpus);
        let blocked = Pipeline::new(PipelineConfig { block_size: Some(3), ..Default::default() })
            .unwrap()
            .run(&corpus);
        assert_eq!(plain.sorted_pairs, blocked.sorted_pairs);
        assert_eq!(plain.dictionary, blocked.dictionary);
        assert_eq!(plain.dictionary, Pipeline::default().build(&corpus));
    }

    #[test]
    fn config_overrides_reach_the_stemmer() {
        let mut overrides = BTreeMap::new();
        overrides.insert("Caesar".to_string(), "emperor".to_string());
        let cfg = PipelineConfig { irregulars: true, overrides, ..Default::default() };
        let pipeline = Pipeline::new(cfg).unwrap();
        let dict = pipeline.build(&Corpus::sample());
        assert_eq!(pipeline.search("caesar", &dict), vec![2, 5]);
        assert_eq!(dict.get("emperor"), Some(&[2, 5][..]));
        assert_eq!(dict.get("men"), Some(&[3][..]));
    }

    #[test]
    fn config_from_json_defaults_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        fs::write(&path, r#"{"block_size": 16}"#).unwrap();
        let cfg = PipelineConfig::from_path(&path).unwrap();
        assert_eq!(cfg.block_size, Some(16));
        assert!(!cfg.irregulars);
        assert!(cfg.overrides.is_empty());
        assert!(PipelineConfig::from_path(dir.path().join("missing.json")).is_err());
    }
}
