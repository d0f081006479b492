use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use parking_lot::{Mutex, RwLock};
use search_core::corpus::{load_documents, InputDocument};
use search_core::{DocId, Document, DocumentStatus, ErrorKind, RequestStats, SearchError, SearchServer};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Corpus file or directory indexed at startup.
    pub input: Option<PathBuf>,
    /// Space-separated stop words.
    pub stop_words: String,
    /// Token required by write endpoints; writes are refused when unset.
    pub admin_token: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub status: DocumentStatus,
}

#[derive(Deserialize)]
pub struct MatchParams {
    pub q: String,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub took_s: f64,
    pub results: Vec<Document>,
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub doc_id: DocId,
    pub words: Vec<String>,
    pub status: DocumentStatus,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub documents: usize,
    pub no_result_requests: usize,
}

/// The engine sits behind a lock so that document writes are serialized
/// against concurrent searches.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<RwLock<SearchServer>>,
    pub stats: Arc<Mutex<RequestStats>>,
    pub admin_token: Option<String>,
}

pub fn build_app(config: ServerConfig) -> Result<Router> {
    let mut engine = SearchServer::with_stop_words_text(&config.stop_words)?;
    if let Some(input) = &config.input {
        let docs = load_documents(input)?;
        let total = docs.len();
        let accepted = engine.add_documents(docs);
        tracing::info!(total, accepted, input = %input.display(), "indexed corpus");
    }
    let app_state = AppState {
        engine: Arc::new(RwLock::new(engine)),
        stats: Arc::new(Mutex::new(RequestStats::new())),
        admin_token: config.admin_token,
    };

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

    let app = Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/search", get(search_handler))
        .route("/match/:doc_id", get(match_handler))
        .route("/documents", post(add_document_handler))
        .route("/stats", get(stats_handler))
        .with_state(app_state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());
    Ok(app)
}

pub async fn search_handler(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let start = std::time::Instant::now();
    let results = state
        .engine
        .read()
        .find_top_documents_with_status(&params.q, params.status)
        .map_err(error_response)?;
    state.stats.lock().record(results.len());

    let elapsed = start.elapsed();
    Ok(Json(SearchResponse { query: params.q, took_s: elapsed.as_secs_f64(), results }))
}

pub async fn match_handler(
    State(state): State<AppState>,
    Path(doc_id): Path<DocId>,
    Query(params): Query<MatchParams>,
) -> Result<Json<MatchResponse>, (StatusCode, String)> {
    let (words, status) = state
        .engine
        .read()
        .match_document(&params.q, doc_id)
        .map_err(error_response)?;
    Ok(Json(MatchResponse { doc_id, words, status }))
}

pub async fn add_document_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(doc): Json<InputDocument>,
) -> Result<(StatusCode, Json<serde_json::Value>), (StatusCode, String)> {
    authorize(&state, &headers)?;
    state
        .engine
        .write()
        .add_document(doc.id, &doc.text, doc.status, &doc.ratings)
        .map_err(error_response)?;
    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": doc.id }))))
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let documents = state.engine.read().document_count();
    let no_result_requests = state.stats.lock().no_result_requests();
    Json(StatsResponse { documents, no_result_requests })
}

fn error_response(err: SearchError) -> (StatusCode, String) {
    let status = match err.kind() {
        ErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
    };
    (status, err.to_string())
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
