use proptest::prelude::*;
use search_core::analyzer::{analyze, is_stopword, Analyzer, AnalyzerConfig};

#[test]
fn it_normalizes_and_stems() {
    let words = analyze("Running Runners RUN! The café's menu.");
    assert!(words.contains(&"run".to_string()));
    assert!(words.contains(&"runner".to_string()));
    assert!(words.contains(&"café".to_string()));
    assert!(words.contains(&"menu".to_string()));
}

#[test]
fn it_filters_stopwords() {
    let words = analyze("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert_eq!(words.len(), 5);
}

#[test]
fn empty_input_yields_no_terms() {
    assert!(analyze("").is_empty());
    assert!(analyze(" \t\n").is_empty());
}

#[test]
fn same_pipeline_for_documents_and_queries() {
    let a = Analyzer::new(AnalyzerConfig { unicode_normalization: true });
    assert_eq!(a.analyze("Ｃats"), a.analyze("cats"));
}

proptest! {
    #[test]
    fn output_is_lowercase_and_stopword_free(text in "\\PC{0,80}") {
        for term in analyze(&text) {
            prop_assert!(!term.is_empty());
            prop_assert_eq!(term.to_lowercase(), term.clone());
            prop_assert!(!is_stopword(&term));
        }
    }

    #[test]
    fn stopword_casings_never_survive(word in prop::sample::select(vec!["a", "and", "be", "have", "i", "in", "of", "that", "the", "to"]), upper in any::<bool>()) {
        let text = if upper { word.to_uppercase() } else { word.to_string() };
        prop_assert!(analyze(&text).is_empty());
    }
}
