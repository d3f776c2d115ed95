//! Text analysis: tokenize, lowercase, drop stopwords, stem.
//!
//! Documents and queries go through the same pipeline, so a query term only
//! matches an index key if both were produced by an identically configured
//! [`Analyzer`].

use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

/// A normalized token; the key space of the inverted index.
pub type Term = String;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"[\p{L}\p{N}]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &["a", "and", "be", "have", "i", "in", "of", "that", "the", "to"];
        words.iter().copied().collect()
    };
}

/// Exact match against the fixed stopword set; expects lowercased input.
pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Split on every rune that is neither a letter nor a numeral.
///
/// Runs of separators collapse, so no empty tokens are produced. Case and
/// source order are preserved.
pub fn tokenize(text: &str) -> Vec<&str> {
    WORD.find_iter(text).map(|m| m.as_str()).collect()
}

pub fn lowercase(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_lowercase()).collect()
}

pub fn filter_stopwords(tokens: Vec<String>) -> Vec<String> {
    tokens.into_iter().filter(|t| !is_stopword(t)).collect()
}

/// Snowball English stem of every token.
///
/// A stem that lands on a stopword (`"having"` -> `"have"`) keeps its
/// surface form instead, so analyzed output never contains a stopword.
pub fn stem(tokens: Vec<String>) -> Vec<String> {
    tokens
        .into_iter()
        .map(|token| {
            let stemmed = STEMMER.stem(&token);
            if is_stopword(&stemmed) {
                token
            } else {
                stemmed.into_owned()
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Apply NFKC normalization before tokenizing. Off by default.
    pub unicode_normalization: bool,
}

/// Configured analysis pipeline. Cheap to copy; all heavy state is shared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    pub fn new(config: AnalyzerConfig) -> Self { Self { config } }

    pub fn analyze(&self, text: &str) -> Vec<Term> {
        let normalized: String;
        let text = if self.config.unicode_normalization {
            normalized = text.nfkc().collect();
            normalized.as_str()
        } else {
            text
        };
        let tokens = lowercase(&tokenize(text));
        stem(filter_stopwords(tokens))
    }
}

/// Analyze `text` with the default pipeline.
pub fn analyze(text: &str) -> Vec<Term> {
    Analyzer::default().analyze(text)
}
