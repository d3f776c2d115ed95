use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::StatusCode, routing::get, Json, Router};
use search_core::{load_documents, DocId, Document, InvertedIndex, SearchConfig, StrategyKind};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub strategy: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}
fn default_limit() -> usize { 10 }

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub strategy: StrategyKind,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<SearchHit>,
}

#[derive(Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub title: String,
    pub url: String,
    pub snippet: Option<String>,
}

/// Loaded corpus plus its index. Immutable once built.
pub struct Catalog {
    pub docs: Vec<Document>,
    pub index: InvertedIndex,
    pub search_config: SearchConfig,
}

impl Catalog {
    pub fn new(docs: Vec<Document>, search_config: SearchConfig) -> Self {
        let mut index = InvertedIndex::new();
        index.add(&docs);
        Self { docs, index, search_config }
    }

    fn doc(&self, id: DocId) -> Option<&Document> {
        self.docs.get(id as usize).filter(|d| d.id == id)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
}

pub fn build_app(docs_path: &str, search_config: SearchConfig) -> Result<Router> {
    let docs = load_documents(docs_path)?;
    Ok(build_app_from_docs(docs, search_config))
}

pub fn build_app_from_docs(docs: Vec<Document>, search_config: SearchConfig) -> Router {
    let app_state = AppState { catalog: Arc::new(Catalog::new(docs, search_config)) };

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val
                .split(',')
                .filter_map(|s| s.trim().parse().ok())
                .collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let strategy = match params.strategy.as_deref() {
        Some(s) => s.parse::<StrategyKind>().map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?,
        None => StrategyKind::default(),
    };

    let catalog = &state.catalog;
    let searcher = strategy.searcher(&catalog.docs, &catalog.index, catalog.search_config);
    let ids = searcher
        .search(&params.q)
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("{e:#}")))?;
    let total_hits = ids.len();
    let limit = params.limit.clamp(1, 100);

    let raw_terms: Vec<String> = params.q.split_whitespace().map(|s| s.to_string()).collect();
    let results = ids
        .into_iter()
        .take(limit)
        .filter_map(|id| catalog.doc(id))
        .map(|doc| SearchHit {
            doc_id: doc.id,
            title: doc.title.clone(),
            url: doc.url.clone(),
            snippet: snippet(&doc.text, &raw_terms),
        })
        .collect();

    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, %strategy, total_hits, ?elapsed, "search");
    Ok(Json(SearchResponse { query: params.q, strategy, took_s: elapsed.as_secs_f64(), total_hits, results }))
}

pub async fn doc_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
) -> Result<Json<Document>, (StatusCode, String)> {
    state
        .catalog
        .doc(doc_id)
        .map(|doc| Json(doc.clone()))
        .ok_or((StatusCode::NOT_FOUND, format!("document {doc_id} not found")))
}

fn term_pattern(term: &str) -> Option<regex::Regex> {
    regex::RegexBuilder::new(&regex::escape(term)).case_insensitive(true).build().ok()
}

/// 200 chars starting up to 50 chars before the first raw-term hit, or the
/// first 200 chars when nothing matches.
fn snippet(text: &str, raw_terms: &[String]) -> Option<String> {
    if text.is_empty() { return None; }
    let first_idx = raw_terms
        .iter()
        .filter(|t| !t.trim().is_empty())
        .find_map(|t| term_pattern(t)?.find(text).map(|m| m.start()));
    let skip = first_idx.map_or(0, |idx| text[..idx].chars().count().saturating_sub(50));
    let snippet: String = text.chars().skip(skip).take(200).collect();
    Some(highlight_terms(&snippet, raw_terms))
}

/// Wrap every term occurrence in `<em>` in a single pass, preferring the
/// longest term where several match at the same position.
fn highlight_terms(snippet: &str, terms: &[String]) -> String {
    let mut alternatives: Vec<&str> = terms.iter().map(|t| t.trim()).filter(|t| !t.is_empty()).collect();
    if alternatives.is_empty() { return snippet.to_string(); }
    alternatives.sort_by_key(|t| std::cmp::Reverse(t.len()));
    alternatives.dedup();
    let pattern = alternatives.iter().map(|t| regex::escape(t)).collect::<Vec<_>>().join("|");
    match regex::RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(pat) => pat.replace_all(snippet, |caps: &regex::Captures| format!("<em>{}</em>", &caps[0])).into_owned(),
        Err(_) => snippet.to_string(),
    }
}
