use stemdex_core::tokenizer::tokenize;
use stemdex_core::{stem, Corpus, Stemmer};

#[test]
fn it_lowercases_and_strips_punctuation() {
    let corpus = Corpus::sample();
    let doc1 = &corpus.documents()[0];
    assert_eq!(tokenize(&doc1.text), vec!["friends", "romans", "countrymen", "lend", "me", "your", "ears"]);
}

#[test]
fn it_keeps_only_ascii_letters() {
    assert_eq!(tokenize("Café au lait, 2x!"), vec!["caf", "au", "lait", "x"]);
}

#[test]
fn it_stems_the_sample_tokens() {
    let stems: Vec<String> = tokenize("Friends, Romans, countrymen").iter().map(|t| stem(t)).collect();
    // no special case for irregular plurals
    assert_eq!(stems, vec!["friend", "roman", "countrymen"]);
}

#[test]
fn short_words_are_not_stemmed() {
    for w in ["I", "is", "TO", "be", "me", "So"] {
        assert_eq!(stem(w), w.to_lowercase());
        assert_eq!(Stemmer::new().stem(w), w.to_lowercase());
    }
}

#[test]
fn reference_stems() {
    assert_eq!(stem("running"), "run");
    assert_eq!(stem("caresses"), "caress");
    assert_eq!(stem("ponies"), "poni");
    // Step 2 rewrites to "relate"; Step 5 then drops the final e
    assert_eq!(stem("relational"), "relat");
}
