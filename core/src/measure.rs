//! Consonant/vowel predicates used by the Porter stemmer.
//!
//! A word is viewed as `[C](VC)^m[V]` where `C` is a run of consonants and `V`
//! a run of vowels. All functions take a lowercase ASCII word and never panic on
//! short input: length-gated predicates simply return `false`.

/// Is the letter at `i` a consonant?
///
/// `a e i o u` are vowels. `y` is a consonant at position 0 and otherwise takes
/// the opposite class of the letter before it, so `toy` ends in a consonant
/// while `by` ends in a vowel. Out-of-range positions return `false`.
pub fn is_consonant(word: &str, i: usize) -> bool {
    let b = word.as_bytes();
    if i >= b.len() {
        return false;
    }
    // only the prefix up to `i` decides its class
    classify(&b[..=i])[i]
}

/// Consonant flags for every position, resolved left to right so each `y`
/// reads the already-settled class of the letter before it.
fn classify(b: &[u8]) -> Vec<bool> {
    let mut cls: Vec<bool> = Vec::with_capacity(b.len());
    for (i, &c) in b.iter().enumerate() {
        let consonant = match c {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !cls[i - 1],
            _ => true,
        };
        cls.push(consonant);
    }
    cls
}

/// The number of vowel-run to consonant-run transitions after any leading
/// consonants.
///
/// ```
/// use stemdex_core::measure::measure;
///
/// assert_eq!(measure("tree"), 0);
/// assert_eq!(measure("trouble"), 1);
/// assert_eq!(measure("private"), 2);
/// ```
pub fn measure(word: &str) -> usize {
    let cls = classify(word.as_bytes());
    let len = cls.len();
    let mut i = 0;
    while i < len && cls[i] {
        i += 1;
    }

    let mut m = 0;
    while i < len {
        while i < len && !cls[i] {
            i += 1;
        }
        if i == len {
            break;
        }
        while i < len && cls[i] {
            i += 1;
        }
        m += 1;
    }
    m
}

/// True when any position classifies as a vowel.
pub fn contains_vowel(word: &str) -> bool {
    classify(word.as_bytes()).iter().any(|&c| !c)
}

/// Last two letters are the same consonant (`-tt`, `-ss`, ...).
pub fn ends_with_double_consonant(word: &str) -> bool {
    let b = word.as_bytes();
    let len = b.len();
    len >= 2 && b[len - 1] == b[len - 2] && classify(b)[len - 1]
}

/// Ends consonant-vowel-consonant with the final consonant not `w`, `x` or `y`
/// (`hop`, `fil`, but not `snow` or `box`).
pub fn cvc(word: &str) -> bool {
    let b = word.as_bytes();
    let len = b.len();
    if len < 3 {
        return false;
    }
    let cls = classify(b);
    cls[len - 3] && !cls[len - 2] && cls[len - 1] && !matches!(b[len - 1], b'w' | b'x' | b'y')
}
