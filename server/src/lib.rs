use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, put},
    Json, Router,
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stemdex_core::ingest::load_corpus;
use stemdex_core::{Corpus, Dictionary, DocId, Document, IntermediatePair, Pipeline, PipelineConfig, PipelineRun};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub token: Option<String>,
    pub term: Option<String>,
    pub total_hits: usize,
    pub postings: Vec<DocId>,
    pub took_s: f64,
}

#[derive(Deserialize)]
pub struct StemParams {
    pub word: String,
}

#[derive(Serialize)]
pub struct StemResponse {
    pub word: String,
    pub stem: String,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub num_docs: usize,
    pub num_pairs: usize,
    pub num_terms: usize,
    pub num_postings: usize,
}

/// One corpus and every stage built from it. Replaced whole, never mutated.
pub struct Snapshot {
    pub corpus: Corpus,
    pub run: PipelineRun,
}

#[derive(Clone)]
pub struct AppState {
    pipeline: Arc<Pipeline>,
    snapshot: Arc<RwLock<Arc<Snapshot>>>,
    admin_token: Option<String>,
}

impl AppState {
    pub fn new(corpus: Corpus, config: PipelineConfig, admin_token: Option<String>) -> Result<Self> {
        let pipeline = Pipeline::new(config)?;
        let run = pipeline.run(&corpus);
        Ok(Self {
            pipeline: Arc::new(pipeline),
            snapshot: Arc::new(RwLock::new(Arc::new(Snapshot { corpus, run }))),
            admin_token,
        })
    }

    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.snapshot.read().clone()
    }

    fn dictionary(&self) -> Dictionary {
        self.snapshot().run.dictionary.clone()
    }
}

/// Corpus from a JSON/JSONL file or directory, or the built-in sample.
pub fn load_corpus_or_sample(path: Option<&str>) -> Result<Corpus> {
    match path {
        Some(p) => load_corpus(p),
        None => Ok(Corpus::sample()),
    }
}

pub fn build_app(corpus: Corpus, config: PipelineConfig) -> Result<Router> {
    let admin_token = std::env::var("ADMIN_TOKEN").ok();
    let state = AppState::new(corpus, config, admin_token)?;

    // CORS: read CORS_ALLOW_ORIGIN (comma-separated) or allow Any by default
    let cors = match std::env::var("CORS_ALLOW_ORIGIN") {
        Ok(val) => {
            let origins: Vec<_> = val.split(',').filter_map(|s| s.trim().parse().ok()).collect();
            if origins.is_empty() {
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            } else {
                CorsLayer::new().allow_origin(AllowOrigin::list(origins)).allow_methods(Any).allow_headers(Any)
            }
        }
        Err(_) => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    Ok(router(state).layer(cors))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/stem", get(stem_handler))
        .route("/pairs", get(pairs_handler))
        .route("/pairs/sorted", get(sorted_pairs_handler))
        .route("/dictionary", get(dictionary_handler))
        .route("/stats", get(stats_handler))
        .route("/doc/:doc_id", get(doc_handler))
        .route("/corpus", put(replace_corpus))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let snapshot = state.snapshot();
    let r = state.pipeline.resolve(&params.q, &snapshot.run.dictionary);
    let elapsed = start.elapsed();
    tracing::debug!(query = %params.q, term = ?r.term, hits = r.postings.len(), "search");
    Json(SearchResponse {
        query: params.q,
        token: r.token,
        term: r.term,
        total_hits: r.postings.len(),
        postings: r.postings,
        took_s: elapsed.as_secs_f64(),
    })
}

pub async fn stem_handler(State(state): State<AppState>, Query(params): Query<StemParams>) -> Json<StemResponse> {
    let stem = state.pipeline.stemmer().stem(&params.word);
    Json(StemResponse { word: params.word, stem })
}

pub async fn pairs_handler(State(state): State<AppState>) -> Json<Vec<IntermediatePair>> {
    Json(state.snapshot().run.pairs.clone())
}

pub async fn sorted_pairs_handler(State(state): State<AppState>) -> Json<Vec<IntermediatePair>> {
    Json(state.snapshot().run.sorted_pairs.clone())
}

pub async fn dictionary_handler(State(state): State<AppState>) -> Json<Dictionary> {
    Json(state.dictionary())
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let snapshot = state.snapshot();
    let stats = snapshot.run.stats();
    Json(StatsResponse {
        num_docs: snapshot.corpus.len(),
        num_pairs: snapshot.run.pairs.len(),
        num_terms: stats.num_terms,
        num_postings: stats.num_postings,
    })
}

pub async fn doc_handler(State(state): State<AppState>, Path(doc_id): Path<DocId>) -> Result<Json<Document>, (StatusCode, String)> {
    match state.snapshot().corpus.get(doc_id) {
        Some(doc) => Ok(Json(doc.clone())),
        None => Err((StatusCode::NOT_FOUND, format!("document {doc_id} not found"))),
    }
}

/// Replace the corpus and rebuild every stage; readers keep the old snapshot
/// until the new one is swapped in.
async fn replace_corpus(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(docs): Json<Vec<Document>>,
) -> Result<Json<StatsResponse>, (StatusCode, String)> {
    authorize(&state, &headers)?;
    let corpus = Corpus::new(docs).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let run = state.pipeline.run(&corpus);
    let stats = run.stats();
    let response = StatsResponse {
        num_docs: corpus.len(),
        num_pairs: run.pairs.len(),
        num_terms: stats.num_terms,
        num_postings: stats.num_postings,
    };
    *state.snapshot.write() = Arc::new(Snapshot { corpus, run });
    tracing::info!(num_docs = response.num_docs, num_terms = response.num_terms, "corpus replaced");
    Ok(Json(response))
}

fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), (StatusCode, String)> {
    let required = match &state.admin_token {
        Some(t) => t,
        None => return Err((StatusCode::UNAUTHORIZED, "ADMIN_TOKEN not set".into())),
    };
    let provided = headers.get("X-ADMIN-TOKEN").and_then(|v| v.to_str().ok()).unwrap_or("");
    if provided == required {
        Ok(())
    } else {
        Err((StatusCode::UNAUTHORIZED, "invalid admin token".into()))
    }
}
