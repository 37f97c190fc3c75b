//! Sensor Routes

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use classifier::{BinStatus, Reading};
use serde::{Deserialize, Serialize};
use tracing::warn;

use alerting::Alert;

use crate::error::ApiResult;
use crate::SharedState;

/// Reading payload posted by a bin device
#[derive(Debug, Deserialize)]
pub struct SensorPayload {
    pub bin_id: String,
    /// Defaults to the time the server received the payload
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    pub fill_level: f64,
    pub temperature: f64,
    pub weight_kg: f64,
    pub location: String,
}

impl SensorPayload {
    fn into_reading(self) -> Reading {
        Reading {
            bin_id: self.bin_id,
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            fill_level: self.fill_level,
            temperature: self.temperature,
            weight_kg: self.weight_kg,
            location: self.location,
        }
    }
}

/// Response for sensor data submission
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub message: String,
    pub bin_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: BinStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<Alert>,
}

/// Receive one reading: validate, classify, raise alert, persist
pub async fn post_sensor_data(
    State(state): State<SharedState>,
    payload: Result<Json<SensorPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<IngestResponse>)> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!(error = %rejection.body_text(), "Rejected sensor payload");
        metrics::counter!("waste_readings_rejected_total").increment(1);
        rejection
    })?;
    let reading = payload.into_reading();

    let mut state = state.write().await;
    if let Err(err) = state.validator.validate_reading(&reading) {
        warn!(bin_id = %reading.bin_id, error = %err, "Rejected sensor reading");
        metrics::counter!("waste_readings_rejected_total").increment(1);
        return Err(err.into());
    }

    let state = &mut *state;
    let outcome = state.repository.ingest(reading, &state.engine)?;

    metrics::counter!("waste_readings_ingested_total").increment(1);
    if let Some(alert) = &outcome.alert {
        metrics::counter!("waste_alerts_raised_total", "type" => alert.alert_type.as_str())
            .increment(1);
    }

    let response = IngestResponse {
        message: "Sensor data received successfully".to_string(),
        bin_id: outcome.reading.reading.bin_id,
        timestamp: outcome.reading.reading.timestamp,
        status: outcome.reading.status,
        alert: outcome.alert,
    };

    Ok((StatusCode::CREATED, Json(response)))
}
