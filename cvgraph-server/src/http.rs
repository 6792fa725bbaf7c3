//! CVGraph HTTP REST API
//!
//! Axum-based HTTP server exposing the candidate ontology over REST plus a
//! raw SPARQL passthrough.
//!
//! Architecture: each endpoint has a thin axum handler that delegates to a
//! pure inner function. The inner functions are directly testable without
//! axum dispatch machinery.
//!
//! Endpoints:
//! - GET  /                      — service descriptor
//! - GET  /health                — health check with triple count
//! - GET  /version               — server version info
//! - GET  /api/candidates        — all candidates, most experienced first
//! - POST /api/candidates/search — filtered candidate search
//! - GET  /api/candidates/:id    — single candidate
//! - GET  /api/skills            — skill catalog partitioned by category
//! - GET  /api/profiles          — sorted unique profile labels
//! - GET  /api/stats             — aggregated statistics
//! - POST /api/sparql/execute    — raw SPARQL passthrough
//! - GET  /api/sparql/examples   — example query catalog

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use cvgraph_core::models::SearchFilters;
use cvgraph_core::{examples, queries, search, sparql, stats};
use cvgraph_core::{CvgraphConfig, CvgraphError, OntologyStore};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::CorsLayer;

/// Shared state for all HTTP handlers
#[derive(Clone)]
pub struct HttpState {
    pub store: OntologyStore,
    pub config: CvgraphConfig,
}

/// Build the Axum router with all endpoints
pub fn build_router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        .route("/api/candidates", get(candidates_handler))
        .route("/api/candidates/search", post(search_handler))
        .route("/api/candidates/:id", get(candidate_handler))
        .route("/api/skills", get(skills_handler))
        .route("/api/profiles", get(profiles_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/sparql/execute", post(sparql_execute_handler))
        .route("/api/sparql/examples", get(sparql_examples_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Gracefully shuts down when the broadcast shutdown signal fires.
pub async fn start_http_server(
    store: OntologyStore,
    config: CvgraphConfig,
    mut shutdown: broadcast::Receiver<()>,
) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.http.host, config.http.port);
    let state = Arc::new(HttpState { store, config });

    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("CVGraph HTTP API listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
            tracing::info!("HTTP server shutting down...");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SparqlRequest {
    pub query: String,
}

/// Standard HTTP error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            status: "error".to_string(),
        }
    }
}

// ============================================================================
// Inner (directly testable) business logic functions
// ============================================================================

/// Map a core error to (status, body): invalid queries and identifiers are
/// the caller's fault, everything else is internal.
pub fn error_response(err: &CvgraphError) -> (StatusCode, serde_json::Value) {
    let status = match err {
        CvgraphError::BadQuery(_) | CvgraphError::InvalidId(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        serde_json::json!(ErrorResponse::new(err.to_string())),
    )
}

/// Inner root — static service descriptor (pure, no IO).
pub fn root_inner() -> serde_json::Value {
    serde_json::json!({
        "message": "CVGraph semantic recruitment API",
        "version": env!("CARGO_PKG_VERSION"),
        "technology": "oxigraph + OWL",
    })
}

/// Inner health check — reports the loaded triple count.
pub fn health_inner(store: &OntologyStore, ontology_file: &str) -> (StatusCode, serde_json::Value) {
    match store.triple_count() {
        Ok(triples) => (
            StatusCode::OK,
            serde_json::json!({
                "status": "healthy",
                "version": env!("CARGO_PKG_VERSION"),
                "triples": triples,
                "ontology": ontology_file,
            }),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            serde_json::json!({
                "status": "unhealthy",
                "error": e.to_string(),
            }),
        ),
    }
}

/// Inner version — returns version info (pure, no IO).
pub fn version_inner() -> serde_json::Value {
    serde_json::json!({
        "version": env!("CARGO_PKG_VERSION"),
        "protocol": "cvgraph/1",
    })
}

/// Inner candidate listing — full records, most experienced first.
pub fn candidates_inner(store: &OntologyStore) -> (StatusCode, serde_json::Value) {
    match queries::all_candidates(store) {
        Ok(candidates) => (StatusCode::OK, serde_json::json!(candidates)),
        Err(e) => error_response(&e),
    }
}

/// Inner search — materializes the full list, then filters in memory.
pub fn search_inner(
    store: &OntologyStore,
    filters: &SearchFilters,
) -> (StatusCode, serde_json::Value) {
    match queries::all_candidates(store) {
        Ok(candidates) => (
            StatusCode::OK,
            serde_json::json!(search::apply_filters(candidates, filters)),
        ),
        Err(e) => error_response(&e),
    }
}

/// Inner single-candidate lookup — a missing record is 404, never an
/// empty-but-successful body.
pub fn candidate_inner(store: &OntologyStore, id: &str) -> (StatusCode, serde_json::Value) {
    match queries::candidate_by_id(store, id) {
        Ok(Some(candidate)) => (StatusCode::OK, serde_json::json!(candidate)),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            serde_json::json!(ErrorResponse::new(format!("Candidate {id} not found"))),
        ),
        Err(e) => error_response(&e),
    }
}

/// Inner skill catalog — total plus category partitions plus the full list.
pub fn skills_inner(store: &OntologyStore) -> (StatusCode, serde_json::Value) {
    use cvgraph_core::models::SkillCategory;

    match queries::all_skills(store) {
        Ok(skills) => {
            let technical: Vec<_> = skills
                .iter()
                .filter(|s| s.category == SkillCategory::Technical)
                .collect();
            let soft: Vec<_> = skills
                .iter()
                .filter(|s| s.category == SkillCategory::Soft)
                .collect();
            (
                StatusCode::OK,
                serde_json::json!({
                    "total": skills.len(),
                    "technical": technical,
                    "soft": soft,
                    "all": skills,
                }),
            )
        }
        Err(e) => error_response(&e),
    }
}

/// Inner profile listing — sorted unique labels.
pub fn profiles_inner(store: &OntologyStore) -> (StatusCode, serde_json::Value) {
    match queries::all_profiles(store) {
        Ok(profiles) => (
            StatusCode::OK,
            serde_json::json!({
                "total": profiles.len(),
                "profiles": profiles,
            }),
        ),
        Err(e) => error_response(&e),
    }
}

/// Inner statistics — aggregates over the materialized lists.
pub fn stats_inner(store: &OntologyStore) -> (StatusCode, serde_json::Value) {
    let report = queries::all_candidates(store).and_then(|candidates| {
        let skills = queries::all_skills(store)?;
        let profiles = queries::all_profiles(store)?;
        Ok(stats::aggregate(&candidates, &skills, &profiles))
    });
    match report {
        Ok(report) => (StatusCode::OK, serde_json::json!(report)),
        Err(e) => error_response(&e),
    }
}

/// Inner SPARQL passthrough — tagged columns/rows envelope.
pub fn sparql_execute_inner(store: &OntologyStore, query: &str) -> (StatusCode, serde_json::Value) {
    match sparql::execute(store, query) {
        Ok(result) => {
            let count = result.rows.len();
            let message = if count == 0 {
                "Query executed successfully, no results".to_string()
            } else {
                format!("{count} result(s) found")
            };
            (
                StatusCode::OK,
                serde_json::json!({
                    "success": true,
                    "results": result.rows,
                    "columns": result.columns,
                    "count": count,
                    "message": message,
                }),
            )
        }
        Err(e) => error_response(&e),
    }
}

/// Inner example catalog (pure, no IO).
pub fn sparql_examples_inner(namespace: &str) -> serde_json::Value {
    let examples = examples::catalog(namespace);
    serde_json::json!({
        "examples": examples,
        "count": examples.len(),
    })
}

// ============================================================================
// Axum handler wrappers (thin — delegate to inner functions)
// ============================================================================

pub async fn root_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(root_inner()))
}

pub async fn health_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = health_inner(&state.store, &state.config.ontology.file);
    (status, Json(body))
}

pub async fn version_handler() -> impl IntoResponse {
    (StatusCode::OK, Json(version_inner()))
}

pub async fn candidates_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = candidates_inner(&state.store);
    (status, Json(body))
}

pub async fn search_handler(
    State(state): State<Arc<HttpState>>,
    Json(filters): Json<SearchFilters>,
) -> impl IntoResponse {
    let (status, body) = search_inner(&state.store, &filters);
    (status, Json(body))
}

pub async fn candidate_handler(
    State(state): State<Arc<HttpState>>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let (status, body) = candidate_inner(&state.store, &id);
    (status, Json(body))
}

pub async fn skills_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = skills_inner(&state.store);
    (status, Json(body))
}

pub async fn profiles_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = profiles_inner(&state.store);
    (status, Json(body))
}

pub async fn stats_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    let (status, body) = stats_inner(&state.store);
    (status, Json(body))
}

pub async fn sparql_execute_handler(
    State(state): State<Arc<HttpState>>,
    Json(req): Json<SparqlRequest>,
) -> impl IntoResponse {
    let (status, body) = sparql_execute_inner(&state.store, &req.query);
    (status, Json(body))
}

pub async fn sparql_examples_handler(State(state): State<Arc<HttpState>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(sparql_examples_inner(state.store.namespace())),
    )
}

// ============================================================================
// Unit Tests — call inner functions directly
// ============================================================================
