//! Bin Routes

use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use storage::{Bin, BinDetail, StorageError};

use crate::error::ApiResult;
use crate::SharedState;

/// Confirmation for bin actions
#[derive(Debug, Serialize)]
pub struct BinActionResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// List all bins with their current status
pub async fn list_bins(State(state): State<SharedState>) -> Json<Vec<Bin>> {
    let state = state.read().await;
    Json(state.repository.list_bins())
}

/// Get one bin with recent readings
pub async fn get_bin(
    State(state): State<SharedState>,
    Path(bin_id): Path<String>,
) -> ApiResult<Json<BinDetail>> {
    let state = state.read().await;
    Ok(Json(state.repository.get_bin(&bin_id)?))
}

/// Mark a bin as emptied after collection
pub async fn empty_bin(
    State(state): State<SharedState>,
    Path(bin_id): Path<String>,
) -> ApiResult<Json<BinActionResponse>> {
    let mut state = state.write().await;
    let bin = state.repository.mark_emptied(&bin_id)?;
    metrics::counter!("waste_bins_emptied_total").increment(1);

    Ok(Json(BinActionResponse {
        message: format!("Bin {} marked as emptied", bin_id),
        timestamp: bin.last_updated,
    }))
}

/// Delete a bin and its history
pub async fn delete_bin(
    State(state): State<SharedState>,
    Path(bin_id): Path<String>,
) -> ApiResult<Json<BinActionResponse>> {
    let mut state = state.write().await;
    if !state.repository.delete_bin(&bin_id) {
        return Err(StorageError::NotFound {
            entity: "Bin",
            id: bin_id,
        }
        .into());
    }
    metrics::counter!("waste_bins_deleted_total").increment(1);

    Ok(Json(BinActionResponse {
        message: format!("Bin {} deleted successfully", bin_id),
        timestamp: Utc::now(),
    }))
}
