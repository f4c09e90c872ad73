use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::advisor::{Advisor, AdvisorResponse};
use crate::error::AppError;
use crate::scoring::{CalculationRequest, CalculationResponse, ScoringEngine};
use crate::stats::CatalogView;

/// Shared, read-only handles used by the HTTP handlers.
#[derive(Debug, Clone)]
pub struct ScorerState {
    pub engine: ScoringEngine,
    pub advisor: Advisor,
}

/// Router builder exposing the catalog, scoring and advisor endpoints.
pub fn scorer_router(state: Arc<ScorerState>) -> Router {
    Router::new()
        .route("/api/v1/stats", get(catalog_handler))
        .route("/api/v1/stats/normalize", post(normalize_handler))
        .route("/api/v1/score", post(score_handler))
        .route("/api/v1/advisor", post(advisor_handler))
        .with_state(state)
}

pub(crate) async fn catalog_handler(State(state): State<Arc<ScorerState>>) -> Json<CatalogView> {
    Json(CatalogView::from_catalog(state.engine.catalog()))
}

#[derive(Debug, Deserialize)]
pub(crate) struct NormalizeRequest {
    pub(crate) stats: Vec<String>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub(crate) struct NormalizedStat {
    pub(crate) raw: String,
    pub(crate) id: String,
}

pub(crate) async fn normalize_handler(
    State(state): State<Arc<ScorerState>>,
    Json(payload): Json<NormalizeRequest>,
) -> Json<Vec<NormalizedStat>> {
    let catalog = state.engine.catalog();
    let normalized = payload
        .stats
        .into_iter()
        .map(|raw| {
            let id = catalog.normalize_label(&raw);
            NormalizedStat { raw, id }
        })
        .collect();
    Json(normalized)
}

pub(crate) async fn score_handler(
    State(state): State<Arc<ScorerState>>,
    Json(request): Json<CalculationRequest>,
) -> Json<CalculationResponse> {
    let response = state.engine.score(&request);
    debug!(
        discs = response.discs.len(),
        total_score = response.total_score,
        "scored calculation request"
    );
    Json(response)
}

pub(crate) async fn advisor_handler(
    State(state): State<Arc<ScorerState>>,
    Json(payload): Json<serde_json::Value>,
) -> Result<Json<AdvisorResponse>, AppError> {
    let response = state.advisor.handle(payload).await?;
    Ok(Json(response))
}
