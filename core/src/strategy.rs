//! Interchangeable search strategies.
//!
//! The two scans exist as baselines to benchmark the index against; all three
//! answer the same question and return ascending document ids.

use crate::index::{DocId, Document, InvertedIndex};
use crate::search::SearchConfig;
use anyhow::{bail, Context, Result};
use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub trait Searcher {
    fn name(&self) -> &'static str;
    fn search(&self, query: &str) -> Result<Vec<DocId>>;
}

/// Case-sensitive substring scan over every document's text.
pub struct SubstringSearcher<'a> {
    docs: &'a [Document],
}

impl<'a> SubstringSearcher<'a> {
    pub fn new(docs: &'a [Document]) -> Self { Self { docs } }
}

impl Searcher for SubstringSearcher<'_> {
    fn name(&self) -> &'static str { "substring" }

    fn search(&self, query: &str) -> Result<Vec<DocId>> {
        Ok(collect_ids(self.docs.iter().filter(|d| d.text.contains(query))))
    }
}

/// Case-insensitive whole-word regex scan.
pub struct RegexSearcher<'a> {
    docs: &'a [Document],
}

impl<'a> RegexSearcher<'a> {
    pub fn new(docs: &'a [Document]) -> Self { Self { docs } }
}

impl Searcher for RegexSearcher<'_> {
    fn name(&self) -> &'static str { "regex" }

    fn search(&self, query: &str) -> Result<Vec<DocId>> {
        // `\b` only holds next to a word char; edges like "(" match as written.
        let edge = |c: Option<char>| if c.is_some_and(is_word_char) { r"\b" } else { "" };
        let pattern = format!("{}{}{}", edge(query.chars().next()), regex::escape(query), edge(query.chars().last()));
        let re = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("compiling pattern for query {query:?}"))?;
        Ok(collect_ids(self.docs.iter().filter(|d| re.is_match(&d.text))))
    }
}

fn is_word_char(c: char) -> bool { c.is_alphanumeric() || c == '_' }

pub struct IndexSearcher<'a> {
    index: &'a InvertedIndex,
    config: SearchConfig,
}

impl<'a> IndexSearcher<'a> {
    pub fn new(index: &'a InvertedIndex, config: SearchConfig) -> Self { Self { index, config } }
}

impl Searcher for IndexSearcher<'_> {
    fn name(&self) -> &'static str { "index" }

    fn search(&self, query: &str) -> Result<Vec<DocId>> {
        Ok(self.index.search_with(query, &self.config))
    }
}

fn collect_ids<'a>(docs: impl Iterator<Item = &'a Document>) -> Vec<DocId> {
    let mut ids: Vec<DocId> = docs.map(|d| d.id).collect();
    ids.sort_unstable();
    ids
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Index,
    Substring,
    Regex,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 3] = [StrategyKind::Index, StrategyKind::Substring, StrategyKind::Regex];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Index => "index",
            StrategyKind::Substring => "substring",
            StrategyKind::Regex => "regex",
        }
    }

    /// Build the searcher for this strategy over a loaded corpus and its index.
    pub fn searcher<'a>(
        &self,
        docs: &'a [Document],
        index: &'a InvertedIndex,
        config: SearchConfig,
    ) -> Box<dyn Searcher + 'a> {
        match self {
            StrategyKind::Index => Box::new(IndexSearcher::new(index, config)),
            StrategyKind::Substring => Box::new(SubstringSearcher::new(docs)),
            StrategyKind::Regex => Box::new(RegexSearcher::new(docs)),
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "index" => Ok(StrategyKind::Index),
            "substring" => Ok(StrategyKind::Substring),
            "regex" => Ok(StrategyKind::Regex),
            other => bail!("unknown strategy {other:?} (expected index, substring or regex)"),
        }
    }
}
