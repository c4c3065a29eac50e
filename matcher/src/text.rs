//! Shared text normalization for both scoring methods.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref URL_RE: Regex = Regex::new(r"http\S+|www\S+").unwrap();
    static ref EMAIL_RE: Regex = Regex::new(r"\S+@\S+").unwrap();
}

/// Lowercases, strips URL-like and email-like tokens, squeezes every run of
/// characters outside `[a-z0-9]` into a single space and trims.
pub fn normalize(text: &str) -> String {
    let text = text.to_lowercase();
    let text = URL_RE.replace_all(&text, " ");
    let text = EMAIL_RE.replace_all(&text, " ");
    let mut cleaned = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            cleaned.push(c);
        } else {
            cleaned.push(' ');
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Unique whitespace tokens longer than two characters.
pub(crate) fn token_set(normalized: &str) -> HashSet<&str> {
    normalized
        .split_whitespace()
        .filter(|token| token.len() > 2)
        .collect()
}
