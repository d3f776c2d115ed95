//! In-memory full-text search: an analyzer, an inverted index and
//! conjunctive (AND) query resolution over it.

pub mod analyzer;
pub mod index;
pub mod intersect;
pub mod loader;
pub mod search;
pub mod strategy;

pub use analyzer::{analyze, Analyzer, AnalyzerConfig, Term};
pub use index::{DocId, Document, InvertedIndex};
pub use intersect::{intersect, intersect_all};
pub use loader::load_documents;
pub use search::{MissingTermPolicy, SearchConfig};
pub use strategy::{IndexSearcher, RegexSearcher, Searcher, StrategyKind, SubstringSearcher};
