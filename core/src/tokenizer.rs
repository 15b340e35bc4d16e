use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref RE: Regex = Regex::new(r"[a-z]+").expect("valid regex");
}

/// Tokenize text into lowercase runs of ASCII letters, in document order.
/// Digits, punctuation and whitespace only separate tokens. No stemming here.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    RE.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

/// First token of `text`, if any.
pub fn first_token(text: &str) -> Option<String> {
    let lowered = text.to_lowercase();
    RE.find(&lowered).map(|m| m.as_str().to_string())
}
