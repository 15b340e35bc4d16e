use stemdex_core::sort::is_sorted_pairs;
use stemdex_core::{
    build_index, generate_pairs, search, sort_pairs, sort_pairs_blocked, Corpus, Document, Pipeline, PipelineConfig,
    Stemmer,
};

fn sample_dictionary() -> stemdex_core::Dictionary {
    let pairs = generate_pairs(&Corpus::sample(), &Stemmer::new());
    build_index(&sort_pairs(pairs))
}

#[test]
fn sample_corpus_statistics() {
    let run = Pipeline::default().run(&Corpus::sample());
    assert_eq!(run.pairs.len(), 41);
    assert_eq!(run.sorted_pairs.len(), 41);
    let stats = run.stats();
    assert_eq!(stats.num_terms, 36);
    assert_eq!(stats.num_postings, 40);
    assert_eq!(run.dictionary.entries().first().map(|e| e.term.as_str()), Some("after"));
    assert_eq!(run.dictionary.entries().last().map(|e| e.term.as_str()), Some("your"));
}

#[test]
fn sorted_output_is_ordered_permutation() {
    let pairs = generate_pairs(&Corpus::sample(), &Stemmer::new());
    let sorted = sort_pairs(pairs.clone());
    assert!(is_sorted_pairs(&sorted));

    let mut before: Vec<_> = pairs.iter().map(|p| (p.term.clone(), p.doc_id)).collect();
    let mut after: Vec<_> = sorted.iter().map(|p| (p.term.clone(), p.doc_id)).collect();
    before.sort();
    after.sort();
    assert_eq!(before, after);

    for block in [1, 2, 7, 64] {
        assert_eq!(sort_pairs_blocked(pairs.clone(), block).unwrap(), sorted);
    }
}

#[test]
fn dictionary_invariants_hold() {
    let dict = sample_dictionary();
    assert!(dict.entries().windows(2).all(|w| w[0].term < w[1].term));
    for entry in &dict {
        assert!(!entry.postings.is_empty());
        assert!(entry.postings.windows(2).all(|w| w[0] < w[1]), "{}", entry.term);
    }
}

#[test]
fn repeated_terms_collapse_to_one_posting() {
    let dict = sample_dictionary();
    // "to" occurs twice in document 2
    assert_eq!(dict.get("to"), Some(&[2][..]));
    assert_eq!(dict.get("the"), Some(&[3, 4, 5][..]));
    assert_eq!(dict.get("with"), Some(&[4, 5][..]));
}

#[test]
fn single_occurrence_round_trip() {
    let corpus = Corpus::new(vec![Document::new(42, "Lonely word")]).unwrap();
    let dict = build_index(&sort_pairs(generate_pairs(&corpus, &Stemmer::new())));
    // lonely -> loneli (1c) -> lone (2)
    assert_eq!(dict.get("lone"), Some(&[42][..]));
    assert_eq!(search("lonely", &dict, &Stemmer::new()), vec![42]);
    assert_eq!(search("word", &dict, &Stemmer::new()), vec![42]);
}

#[test]
fn sample_queries() {
    let dict = sample_dictionary();
    let st = Stemmer::new();
    assert_eq!(search("Caesar", &dict, &st), vec![2, 5]);
    assert_eq!(search("Romans", &dict, &st), vec![1]);
    assert_eq!(search("Countrymen", &dict, &st), vec![1]);
    assert_eq!(search("Brutus", &dict, &st), vec![5]);
    assert_eq!(search("living", &dict, &st), vec![3]);
    assert_eq!(search("lives", &dict, &st), vec![3]);
    assert!(search("nonexistentword", &dict, &st).is_empty());
    assert!(search("", &dict, &st).is_empty());
}

#[test]
fn irregular_table_from_config() {
    let pipeline = Pipeline::new(PipelineConfig { irregulars: true, ..Default::default() }).unwrap();
    let dict = pipeline.build(&Corpus::sample());
    assert_eq!(pipeline.search("men", &dict), vec![3]);
    assert_eq!(pipeline.resolve("Feet", &dict).term.as_deref(), Some("feet"));
}

#[test]
fn empty_corpus_builds_empty_index() {
    let run = Pipeline::default().run(&Corpus::new(vec![]).unwrap());
    assert!(run.pairs.is_empty());
    assert!(run.dictionary.is_empty());
}
