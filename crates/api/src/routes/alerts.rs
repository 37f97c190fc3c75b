//! Alert Routes

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use alerting::{prioritize, summarize, Alert, AlertSummary, EscalationCandidate};
use chrono::Utc;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::SharedState;

/// Query parameters for alerts endpoint
#[derive(Debug, Deserialize)]
pub struct AlertQuery {
    /// Only unresolved alerts
    #[serde(default = "default_active_only")]
    pub active_only: bool,
}

fn default_active_only() -> bool {
    true
}

/// Get alerts
pub async fn get_alerts(
    State(state): State<SharedState>,
    params: Result<Query<AlertQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Alert>>> {
    let Query(params) = params?;
    let state = state.read().await;
    Ok(Json(state.repository.list_alerts(params.active_only)))
}

/// Counts over every alert raised
pub async fn get_summary(State(state): State<SharedState>) -> Json<AlertSummary> {
    let state = state.read().await;
    Json(summarize(state.repository.alerts()))
}

/// Active alerts, highest severity and oldest first
pub async fn get_prioritized(State(state): State<SharedState>) -> Json<Vec<Alert>> {
    let state = state.read().await;
    Json(prioritize(&state.repository.list_alerts(true)))
}

/// Active alerts past their escalation deadline
pub async fn get_escalations(State(state): State<SharedState>) -> Json<Vec<EscalationCandidate>> {
    let state = state.read().await;
    Json(
        state
            .engine
            .escalation_candidates(state.repository.alerts(), Utc::now()),
    )
}

/// Resolve one alert
pub async fn resolve_alert(
    State(state): State<SharedState>,
    Path(alert_id): Path<String>,
) -> ApiResult<Json<Alert>> {
    let mut state = state.write().await;
    Ok(Json(state.repository.resolve_alert(&alert_id)?))
}
