//! Conjunctive query resolution over an [`InvertedIndex`].

use crate::index::{DocId, InvertedIndex};
use crate::intersect::intersect_all;
use serde::{Deserialize, Serialize};

/// What to do with a query term that no document contains.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingTermPolicy {
    /// Strict AND: the whole result is empty.
    #[default]
    Empty,
    /// Ignore the term and intersect the remaining ones.
    Skip,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    pub missing_terms: MissingTermPolicy,
}

impl InvertedIndex {
    /// Documents containing every analyzed term of `query`, ascending by id.
    pub fn search(&self, query: &str) -> Vec<DocId> {
        self.search_with(query, &SearchConfig::default())
    }

    pub fn search_with(&self, query: &str, config: &SearchConfig) -> Vec<DocId> {
        let mut terms = self.analyzer().analyze(query);
        let mut seen = std::collections::HashSet::new();
        terms.retain(|t| seen.insert(t.clone()));

        let mut lists: Vec<&[DocId]> = Vec::with_capacity(terms.len());
        for term in &terms {
            match self.lookup(term) {
                Some(ids) => lists.push(ids),
                None if config.missing_terms == MissingTermPolicy::Skip => {
                    tracing::trace!(term = %term, "skipping unknown query term");
                }
                None => return Vec::new(),
            }
        }
        intersect_all(&lists)
    }
}
