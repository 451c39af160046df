//! # Inference Endpoint Handlers
//!
//! Applies truth-value rules and serves the bounded inference log. None of
//! these handlers touch the store.

use super::{
    AppState,
    error::ApiError,
    types::{
        HistoryParams, HistoryResponse, InferRequest, InferenceResponse, InferenceStatsResponse,
        MessageResponse,
    },
};
use atomspace_core::{InferenceRule, primitives::DEFAULT_HISTORY_LIMIT};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    response::IntoResponse,
};

/// Apply the rule named in the path.
pub async fn infer_handler(
    State(state): State<AppState>,
    rule: Result<Path<String>, PathRejection>,
    body: Result<Json<InferRequest>, JsonRejection>,
) -> Result<Json<InferenceResponse>, ApiError> {
    let Path(rule) = rule?;
    let rule: InferenceRule = rule.parse()?;
    let Json(request) = body?;
    let premises = request.premises(rule)?;

    let inference = state.inference.write().await.infer(rule, premises)?;

    tracing::info!(
        event = "rule_applied",
        rule = %rule,
        strength = inference.result.strength(),
        confidence = inference.result.confidence(),
        "Applied inference rule"
    );
    Ok(Json(InferenceResponse {
        success: true,
        inference,
    }))
}

/// The most recent records, oldest first.
pub async fn history_handler(
    State(state): State<AppState>,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Query(params) = params?;
    let limit = params.limit.unwrap_or(DEFAULT_HISTORY_LIMIT);

    let inference = state.inference.read().await;
    let history = inference.recent(limit);
    Ok(Json(HistoryResponse {
        success: true,
        count: history.len(),
        total_inferences: inference.len(),
        history,
    }))
}

/// Drop every record and reset the applied-rules counter.
pub async fn clear_history_handler(State(state): State<AppState>) -> impl IntoResponse {
    let cleared = state.inference.write().await.clear();
    tracing::info!(event = "history_cleared", cleared, "Cleared inference history");
    Json(MessageResponse::success(format!(
        "Cleared {} inference entries",
        cleared
    )))
}

pub async fn inference_stats_handler(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.inference.read().await.stats();
    Json(InferenceStatsResponse {
        success: true,
        stats,
    })
}
