//! Stored records

use alerting::Alert;
use chrono::{DateTime, Utc};
use classifier::{BinStatus, ProcessedReading};
use serde::{Deserialize, Serialize};

/// Current-state snapshot of a bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub bin_id: String,
    pub location: String,
    pub current_fill_level: f64,
    pub current_weight_kg: f64,
    pub current_temperature: f64,
    pub status: BinStatus,
    pub last_updated: DateTime<Utc>,
    pub last_emptied: Option<DateTime<Utc>>,
    /// Readings received for this bin
    pub total_readings: u64,
}

impl Bin {
    pub(crate) fn from_reading(processed: &ProcessedReading) -> Self {
        let reading = &processed.reading;
        Self {
            bin_id: reading.bin_id.clone(),
            location: reading.location.clone(),
            current_fill_level: reading.fill_level,
            current_weight_kg: reading.weight_kg,
            current_temperature: reading.temperature,
            status: processed.status,
            last_updated: reading.timestamp,
            last_emptied: None,
            total_readings: 1,
        }
    }

    /// Overwrite current fields from a newer reading. Location is kept from creation.
    pub(crate) fn apply(&mut self, processed: &ProcessedReading) {
        let reading = &processed.reading;
        self.current_fill_level = reading.fill_level;
        self.current_weight_kg = reading.weight_kg;
        self.current_temperature = reading.temperature;
        self.status = processed.status;
        self.last_updated = reading.timestamp;
        self.total_readings += 1;
    }

    pub(crate) fn empty(&mut self, at: DateTime<Utc>) {
        self.current_fill_level = 0.0;
        self.current_weight_kg = 0.0;
        self.status = BinStatus::Normal;
        self.last_emptied = Some(at);
        self.last_updated = at;
    }
}

/// Bin snapshot with recent history and collection hints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinDetail {
    #[serde(flatten)]
    pub bin: Bin,
    pub recent_readings: Vec<ProcessedReading>,
    pub collection_priority: u8,
    pub requires_collection: bool,
}

/// Result of the record -> decide -> persist pipeline
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub reading: ProcessedReading,
    pub alert: Option<Alert>,
}

/// Aggregate statistics over the whole store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_bins: usize,
    pub active_alerts: usize,
    pub bins_needing_collection: usize,
    pub average_fill_level: f64,
    pub total_waste_collected_kg: f64,
    pub total_readings: usize,
    pub total_alerts_generated: usize,
    pub last_updated: DateTime<Utc>,
}
