use axum::{routing::post, Router, Json};
use tower_http::cors::{CorsLayer, Any};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::candidate::generate;
use crate::roster::{Roster, RosterAliases};

#[derive(Deserialize)]
pub struct CandidatesRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct CandidatesResponse {
    pub name: String,
    pub candidates: Vec<String>,
}

#[derive(Deserialize)]
pub struct ReconcileRequest {
    pub roster: Roster,
}

#[derive(Serialize)]
pub struct ReconcileResponse {
    pub labels: usize,
    pub aliases: RosterAliases,
}

async fn candidates(Json(req): Json<CandidatesRequest>) -> Json<CandidatesResponse> {
    let candidates = generate(&req.name);
    info!(name = %req.name, count = candidates.len(), "candidates generated");
    Json(CandidatesResponse { name: req.name, candidates })
}

async fn reconcile(Json(req): Json<ReconcileRequest>) -> Json<ReconcileResponse> {
    let started = std::time::Instant::now();
    let aliases = RosterAliases::from_roster(&req.roster);
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    info!(ms = elapsed_ms, labels = aliases.len(), "roster reconciled");
    Json(ReconcileResponse { labels: aliases.len(), aliases })
}

/// Stateless HTTP surface over candidate generation and roster reconciliation.
pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::POST])
        .allow_headers(Any);
    Router::new()
        .route("/v1/candidates", post(candidates))
        .route("/v1/reconcile", post(reconcile))
        .layer(cors)
}
