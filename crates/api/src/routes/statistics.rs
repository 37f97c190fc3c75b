//! Statistics Routes

use axum::{extract::State, Json};
use storage::Statistics;

use crate::SharedState;

/// Get overall system statistics
pub async fn get_statistics(State(state): State<SharedState>) -> Json<Statistics> {
    let state = state.read().await;
    Json(state.repository.statistics())
}
