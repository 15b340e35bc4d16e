//! Sort stage of sort-based index construction.
//!
//! Pairs are ordered by `(term, doc_id)`. [`sort_pairs_blocked`] sorts the
//! stream block by block and k-way merges the sorted runs, the same shape an
//! external sort takes when blocks are spilled to disk. Both entry points are
//! stable and produce identical output.

use crate::pairs::IntermediatePair;
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::num::NonZeroUsize;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IndexError {
    #[error("block size must be at least 1")]
    InvalidBlockSize,
    #[error("dictionary terms out of order or repeated at {0:?}")]
    UnsortedTerms(String),
    #[error("postings for {0:?} are not strictly ascending")]
    UnsortedPostings(String),
}

/// Stable sort by term, then doc id.
pub fn sort_pairs(mut pairs: Vec<IntermediatePair>) -> Vec<IntermediatePair> {
    pairs.sort_by(|a, b| a.key().cmp(&b.key()));
    pairs
}

/// Split into blocks of `block_size`, sort each block, then merge the runs.
pub fn sort_pairs_blocked(
    pairs: Vec<IntermediatePair>,
    block_size: usize,
) -> Result<Vec<IntermediatePair>, IndexError> {
    let block_size = NonZeroUsize::new(block_size).ok_or(IndexError::InvalidBlockSize)?;
    Ok(sort_in_blocks(pairs, block_size))
}

pub fn sort_in_blocks(pairs: Vec<IntermediatePair>, block_size: NonZeroUsize) -> Vec<IntermediatePair> {
    let mut runs = Vec::new();
    let mut iter = pairs.into_iter().peekable();
    while iter.peek().is_some() {
        let block: Vec<_> = iter.by_ref().take(block_size.get()).collect();
        runs.push(sort_pairs(block));
    }
    merge_runs(runs)
}

struct Head {
    pair: IntermediatePair,
    run: usize,
}

impl Ord for Head {
    fn cmp(&self, other: &Self) -> Ordering {
        // run index breaks ties so earlier input stays first
        (self.pair.key(), self.run).cmp(&(other.pair.key(), other.run))
    }
}

impl PartialOrd for Head {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Head {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Head {}

/// K-way merge of individually sorted runs. Runs must be given in input order
/// for the result to be stable.
pub fn merge_runs(runs: Vec<Vec<IntermediatePair>>) -> Vec<IntermediatePair> {
    let total = runs.iter().map(Vec::len).sum();
    let mut out = Vec::with_capacity(total);
    let mut sources: Vec<_> = runs.into_iter().map(Vec::into_iter).collect();
    let mut heap = BinaryHeap::with_capacity(sources.len());
    for (run, src) in sources.iter_mut().enumerate() {
        if let Some(pair) = src.next() {
            heap.push(Reverse(Head { pair, run }));
        }
    }
    while let Some(Reverse(Head { pair, run })) = heap.pop() {
        out.push(pair);
        if let Some(next) = sources[run].next() {
            heap.push(Reverse(Head { pair: next, run }));
        }
    }
    out
}

/// True when every adjacent pair is in `(term, doc_id)` order.
pub fn is_sorted_pairs(pairs: &[IntermediatePair]) -> bool {
    pairs.windows(2).all(|w| w[0].key() <= w[1].key())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(term: &str, doc: u32, tok: &str) -> IntermediatePair {
        IntermediatePair { term: term.into(), doc_id: doc, original_token: Some(tok.into()) }
    }

    fn sample() -> Vec<IntermediatePair> {
        vec![
            p("caesar", 5, "caesar"),
            p("to", 2, "to"),
            p("brutu", 5, "brutus"),
            p("caesar", 2, "caesar"),
            p("to", 2, "to"),
            p("be", 5, "be"),
            p("Zed", 1, "zed"),
            p("come", 2, "come"),
            p("caesar", 2, "caesars"),
        ]
    }

    fn keys(pairs: &[IntermediatePair]) -> Vec<(String, u32, Option<String>)> {
        pairs.iter().map(|p| (p.term.clone(), p.doc_id, p.original_token.clone())).collect()
    }

    #[test]
    fn orders_by_term_then_doc() {
        let sorted = sort_pairs(sample());
        assert!(is_sorted_pairs(&sorted));
        let order: Vec<(&str, u32)> = sorted.iter().map(|p| p.key()).collect();
        assert_eq!(
            order,
            vec![
                // code point order: uppercase before lowercase
                ("Zed", 1),
                ("be", 5),
                ("brutu", 5),
                ("caesar", 2),
                ("caesar", 2),
                ("caesar", 5),
                ("come", 2),
                ("to", 2),
                ("to", 2),
            ]
        );
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let sorted = sort_pairs(sample());
        let caesar2: Vec<&str> = sorted
            .iter()
            .filter(|p| p.key() == ("caesar", 2))
            .filter_map(|p| p.original_token.as_deref())
            .collect();
        assert_eq!(caesar2, vec!["caesar", "caesars"]);
    }

    #[test]
    fn output_is_a_permutation() {
        let input = sample();
        let mut a = keys(&input);
        let mut b = keys(&sort_pairs(input));
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn blocked_sort_matches_in_memory_sort() {
        let expected = keys(&sort_pairs(sample()));
        for block in 1..=10 {
            let got = sort_pairs_blocked(sample(), block).unwrap();
            assert_eq!(keys(&got), expected, "block size {block}");
        }
    }

    #[test]
    fn zero_block_size_rejected() {
        assert_eq!(sort_pairs_blocked(sample(), 0), Err(IndexError::InvalidBlockSize));
    }

    #[test]
    fn empty_input() {
        assert!(sort_pairs(vec![]).is_empty());
        assert!(sort_pairs_blocked(vec![], 4).unwrap().is_empty());
        assert!(merge_runs(vec![vec![], vec![]]).is_empty());
    }
}
