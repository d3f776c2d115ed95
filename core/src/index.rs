use crate::analyzer::Analyzer;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type DocId = u32;

/// A loaded document. The index never holds these, only their ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub url: String,
    pub text: String,
}

impl Document {
    pub fn new(id: DocId, text: impl Into<String>) -> Self {
        Self { id, title: String::new(), url: String::new(), text: text.into() }
    }
}

/// Term -> posting list. Built once with [`InvertedIndex::add`], then read-only.
///
/// Every posting list is strictly ascending with no duplicates.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    postings: HashMap<String, Vec<DocId>>,
    analyzer: Analyzer,
    num_docs: usize,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn with_analyzer(analyzer: Analyzer) -> Self {
        Self { analyzer, ..Self::default() }
    }

    pub fn analyzer(&self) -> &Analyzer { &self.analyzer }

    /// Index every document, in the order given.
    pub fn add(&mut self, docs: &[Document]) {
        for doc in docs {
            self.add_document(doc);
        }
        tracing::info!(num_docs = self.num_docs, num_terms = self.postings.len(), "indexed documents");
    }

    pub fn add_document(&mut self, doc: &Document) {
        for term in self.analyzer.analyze(&doc.text) {
            let ids = self.postings.entry(term).or_default();
            match ids.last() {
                Some(&last) if last == doc.id => continue,
                Some(&last) if last > doc.id => {
                    // Out-of-order insert: place it, unless already present.
                    if let Err(pos) = ids.binary_search(&doc.id) {
                        tracing::debug!(doc_id = doc.id, last, "out-of-order posting insert");
                        ids.insert(pos, doc.id);
                    }
                }
                _ => ids.push(doc.id),
            }
        }
        self.num_docs += 1;
    }

    /// Posting list for an already-analyzed term, or `None` if never seen.
    pub fn lookup(&self, term: &str) -> Option<&[DocId]> {
        self.postings.get(term).map(Vec::as_slice)
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> + '_ {
        self.postings.keys().map(String::as_str)
    }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    pub fn num_postings(&self) -> usize { self.postings.values().map(Vec::len).sum() }

    /// Documents passed to `add`, counting repeats.
    pub fn num_docs(&self) -> usize { self.num_docs }

    pub fn is_empty(&self) -> bool { self.postings.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(texts: &[&str]) -> Vec<Document> {
        texts.iter().enumerate().map(|(i, t)| Document::new(i as DocId, *t)).collect()
    }

    fn assert_strictly_ascending(index: &InvertedIndex) {
        for term in index.terms() {
            let ids = index.lookup(term).unwrap();
            assert!(ids.windows(2).all(|w| w[0] < w[1]), "{term}: {ids:?}");
        }
    }

    #[test]
    fn repeated_term_in_one_document_posts_once() {
        let mut idx = InvertedIndex::new();
        idx.add(&docs(&["cat cat cats CAT", "dog"]));
        assert_eq!(idx.lookup("cat"), Some(&[0][..]));
        assert_eq!(idx.lookup("dog"), Some(&[1][..]));
    }

    #[test]
    fn stopwords_are_not_keys() {
        let mut idx = InvertedIndex::new();
        idx.add(&docs(&["the quick fox"]));
        assert!(idx.lookup("the").is_none());
        assert!(idx.lookup("quick").is_some());
    }

    #[test]
    fn lookup_absent_term() {
        let idx = InvertedIndex::new();
        assert!(idx.is_empty());
        assert!(idx.lookup("anything").is_none());
    }

    #[test]
    fn re_adding_same_documents_adds_no_duplicates() {
        let d = docs(&["small wild cat", "large wild dog", "wild cat"]);
        let mut idx = InvertedIndex::new();
        idx.add(&d);
        idx.add(&d);
        assert_eq!(idx.lookup("wild"), Some(&[0, 1, 2][..]));
        assert_eq!(idx.lookup("cat"), Some(&[0, 2][..]));
        assert_strictly_ascending(&idx);
    }

    #[test]
    fn out_of_order_insert_keeps_lists_sorted() {
        let mut idx = InvertedIndex::new();
        idx.add(&[Document::new(5, "wild cat"), Document::new(2, "wild dog"), Document::new(7, "cat")]);
        assert_eq!(idx.lookup("wild"), Some(&[2, 5][..]));
        assert_eq!(idx.lookup("cat"), Some(&[5, 7][..]));
        assert_strictly_ascending(&idx);
    }

    #[test]
    fn counts() {
        let mut idx = InvertedIndex::new();
        idx.add(&docs(&["wild cat", "wild dog"]));
        assert_eq!(idx.num_docs(), 2);
        assert_eq!(idx.num_terms(), 3);
        assert_eq!(idx.num_postings(), 4);
    }
}
