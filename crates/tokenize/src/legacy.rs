//! Built-in word tokenizer.
//!
//! Lowercases, treats every non-word character as a separator, and splits on
//! the resulting boundaries. A word character is alphanumeric or `_`.

use unicode_normalization::UnicodeNormalization;

use crate::strategy::Tokenizer;

/// Self-contained lowercasing word tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyTokenizer {
    normalize_unicode: bool,
}

impl LegacyTokenizer {
    pub fn new(normalize_unicode: bool) -> Self {
        Self { normalize_unicode }
    }
}

impl Tokenizer for LegacyTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        if self.normalize_unicode {
            tokenize_words(text.nfkc().collect::<String>().as_str())
        } else {
            tokenize_words(text)
        }
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

fn tokenize_words(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    for ch in text.chars() {
        if is_word_char(ch) {
            // Lowercasing can expand a single character into several
            // (e.g. U+0130 lowercases to i + combining dot).
            for lower in ch.to_lowercase() {
                current.push(lower);
            }
        } else if !current.is_empty() {
            tokens.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

/// Replace every character that is neither a word character nor whitespace
/// with a space, preserving everything else.
pub(crate) fn collapse_non_word(text: &str) -> String {
    text.chars()
        .map(|ch| {
            if is_word_char(ch) || ch.is_whitespace() {
                ch
            } else {
                ' '
            }
        })
        .collect()
}
