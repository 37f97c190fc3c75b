//! Sensor reading records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::status::BinStatus;

/// One telemetry sample reported by a bin sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Stable bin identifier
    pub bin_id: String,
    /// Sample time as reported by the device
    pub timestamp: DateTime<Utc>,
    /// Fill level percentage (0-100)
    pub fill_level: f64,
    /// Temperature in Celsius
    pub temperature: f64,
    /// Weight in kilograms
    pub weight_kg: f64,
    /// Free-text physical location
    pub location: String,
}

impl Reading {
    /// Create a reading stamped with the current time
    pub fn now(
        bin_id: impl Into<String>,
        fill_level: f64,
        temperature: f64,
        weight_kg: f64,
        location: impl Into<String>,
    ) -> Self {
        Self {
            bin_id: bin_id.into(),
            timestamp: Utc::now(),
            fill_level,
            temperature,
            weight_kg,
            location: location.into(),
        }
    }
}

/// A reading together with the fields derived from it by [`crate::classify`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedReading {
    #[serde(flatten)]
    pub reading: Reading,
    pub status: BinStatus,
    pub needs_attention: bool,
    pub temperature_alert: bool,
}

impl ProcessedReading {
    pub fn bin_id(&self) -> &str {
        &self.reading.bin_id
    }

    pub fn fill_level(&self) -> f64 {
        self.reading.fill_level
    }

    pub fn temperature(&self) -> f64 {
        self.reading.temperature
    }

    pub fn location(&self) -> &str {
        &self.reading.location
    }
}
