//! Porter suffix-stripping stemmer.
//!
//! Porter, M.F. "An algorithm for suffix stripping." Program 14.3 (1980).
//! Each step is a first-match-wins list of suffix rules applied to the word as
//! rewritten by the previous steps. A matching suffix whose condition fails
//! still ends the step.

use crate::measure::{contains_vowel, cvc, ends_with_double_consonant, measure};
use std::collections::HashMap;

const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
];

const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

// "ement" precedes "ment" and "ent".
const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ou", "ism",
    "ate", "iti", "ous", "ive", "ize",
];

/// Irregular forms that suffix stripping handles badly, e.g. `men`.
const IRREGULARS: &[(&str, &str)] = &[("men", "men"), ("feet", "feet")];

/// Stem a word with the plain algorithm, no override table.
///
/// ```
/// use stemdex_core::stemmer::stem;
///
/// assert_eq!(stem("running"), "run");
/// assert_eq!(stem("caresses"), "caress");
/// assert_eq!(stem("ponies"), "poni");
/// ```
pub fn stem(word: &str) -> String {
    let word = word.to_ascii_lowercase();
    if word.len() < 3 || !word.is_ascii() {
        return word;
    }

    let mut w = step1a(word);
    w = step1b(w);
    w = step1c(w);
    w = step2(w);
    w = step3(w);
    w = step4(w);
    step5(w)
}

/// A stemmer carrying a caller-supplied table of irregular forms, consulted
/// before the algorithm runs.
#[derive(Debug, Clone, Default)]
pub struct Stemmer {
    overrides: HashMap<String, String>,
}

impl Stemmer {
    pub fn new() -> Self { Self::default() }

    /// Keys are matched case-insensitively.
    pub fn with_overrides<I, K, V>(overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut stemmer = Self::new();
        stemmer.add_overrides(overrides);
        stemmer
    }

    /// Later entries replace earlier ones for the same word.
    pub fn add_overrides<I, K, V>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        self.overrides.extend(
            overrides
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into())),
        );
    }

    /// The small built-in table of irregular plurals (`men`, `feet`).
    pub fn with_irregulars() -> Self {
        Self::with_overrides(IRREGULARS.iter().copied())
    }

    pub fn overrides(&self) -> &HashMap<String, String> { &self.overrides }

    pub fn stem(&self, word: &str) -> String {
        if !self.overrides.is_empty() {
            if let Some(fixed) = self.overrides.get(&word.to_ascii_lowercase()) {
                return fixed.clone();
            }
        }
        stem(word)
    }
}

fn strip(word: &str, suffix_len: usize) -> &str {
    &word[..word.len() - suffix_len]
}

fn step1a(mut w: String) -> String {
    if w.ends_with("sses") || w.ends_with("ies") {
        w.truncate(w.len() - 2);
    } else if w.ends_with("ss") {
        // unchanged
    } else if w.ends_with('s') {
        w.pop();
    }
    w
}

fn step1b(mut w: String) -> String {
    let mut rewritten = false;
    if w.ends_with("eed") {
        if measure(strip(&w, 3)) > 0 {
            w.pop();
        }
    } else if w.ends_with("ed") {
        if contains_vowel(strip(&w, 2)) {
            w.truncate(w.len() - 2);
            rewritten = true;
        }
    } else if w.ends_with("ing") && contains_vowel(strip(&w, 3)) {
        w.truncate(w.len() - 3);
        rewritten = true;
    }

    if rewritten {
        if w.ends_with("at") || w.ends_with("bl") || w.ends_with("iz") {
            w.push('e');
        } else if ends_with_double_consonant(&w) && !w.ends_with(['l', 's', 'z']) {
            w.pop();
        } else if measure(&w) == 1 && cvc(&w) {
            w.push('e');
        }
    }
    w
}

fn step1c(mut w: String) -> String {
    if w.ends_with('y') && contains_vowel(strip(&w, 1)) {
        w.pop();
        w.push('i');
    }
    w
}

fn replace_suffix(w: String, rules: &[(&str, &str)]) -> String {
    for &(suffix, replacement) in rules {
        if let Some(base) = w.strip_suffix(suffix) {
            if measure(base) > 0 {
                return format!("{base}{replacement}");
            }
            break;
        }
    }
    w
}

fn step2(w: String) -> String {
    replace_suffix(w, STEP2_RULES)
}

fn step3(w: String) -> String {
    replace_suffix(w, STEP3_RULES)
}

fn step4(mut w: String) -> String {
    if let Some(suffix) = STEP4_SUFFIXES.iter().find(|s| w.ends_with(*s)) {
        if measure(strip(&w, suffix.len())) > 1 {
            w.truncate(w.len() - suffix.len());
        }
    }
    w
}

fn step5(mut w: String) -> String {
    if w.ends_with('e') {
        let base = strip(&w, 1);
        let m = measure(base);
        if m > 1 || (m == 1 && !cvc(base)) {
            w.pop();
        }
    }
    if measure(&w) > 1 && ends_with_double_consonant(&w) && w.ends_with('l') {
        w.pop();
    }
    w
}
