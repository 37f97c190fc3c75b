//! Repository Implementation

use alerting::{Alert, AlertEngine};
use chrono::{DateTime, Utc};
use classifier::{
    classify, collection_priority, BinStatus, ProcessedReading, Reading,
};
use data_validator::Validator;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::models::{Bin, BinDetail, IngestOutcome, Statistics};
use crate::StorageError;

/// Number of trailing history entries scanned by [`Repository::get_bin`]
pub const DEFAULT_RECENT_WINDOW: usize = 10;

/// Volatile store for bins, readings and alerts.
///
/// Mutating methods take `&mut self`; the owner wraps the repository in a
/// single lock so a reading, its alert and the bin update land together.
#[derive(Debug)]
pub struct Repository {
    /// Current bin snapshots by id
    bins: BTreeMap<String, Bin>,
    /// Append-only reading history
    readings: Vec<ProcessedReading>,
    /// Every alert ever raised
    alerts: Vec<Alert>,
    validator: Validator,
    recent_window: usize,
}

impl Repository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self::with_recent_window(DEFAULT_RECENT_WINDOW)
    }

    /// Create a repository scanning `recent_window` history entries in `get_bin`
    pub fn with_recent_window(recent_window: usize) -> Self {
        info!(recent_window, "Creating in-memory repository");
        Self {
            bins: BTreeMap::new(),
            readings: Vec::with_capacity(1000),
            alerts: Vec::new(),
            validator: Validator::default(),
            recent_window,
        }
    }

    /// Classify a reading, append it to history and upsert the bin snapshot
    pub fn record(&mut self, reading: Reading) -> Result<ProcessedReading, StorageError> {
        self.validator.validate_reading(&reading)?;

        let processed = classify(reading);
        match self.bins.get_mut(processed.bin_id()) {
            Some(bin) => bin.apply(&processed),
            None => {
                info!(bin_id = processed.bin_id(), location = processed.location(), "New bin registered");
                self.bins
                    .insert(processed.bin_id().to_string(), Bin::from_reading(&processed));
            }
        }

        self.readings.push(processed.clone());
        debug!(bin_id = processed.bin_id(), status = %processed.status, "Recorded reading");
        Ok(processed)
    }

    /// Record a reading, run the alert engine and persist any alert raised
    pub fn ingest(
        &mut self,
        reading: Reading,
        engine: &AlertEngine,
    ) -> Result<IngestOutcome, StorageError> {
        let processed = self.record(reading)?;
        let alert = engine.decide(&processed);
        if let Some(alert) = &alert {
            self.save_alert(alert.clone());
        }
        Ok(IngestOutcome {
            reading: processed,
            alert,
        })
    }

    /// Append an alert
    pub fn save_alert(&mut self, alert: Alert) {
        debug!(alert_id = %alert.alert_id, "Saved alert");
        self.alerts.push(alert);
    }

    /// All bin snapshots
    pub fn list_bins(&self) -> Vec<Bin> {
        self.bins.values().cloned().collect()
    }

    /// One bin with its entries among the most recent history window
    pub fn get_bin(&self, bin_id: &str) -> Result<BinDetail, StorageError> {
        let bin = self
            .bins
            .get(bin_id)
            .ok_or_else(|| StorageError::bin_not_found(bin_id))?;

        let start = self.readings.len().saturating_sub(self.recent_window);
        let recent_readings = self.readings[start..]
            .iter()
            .filter(|r| r.bin_id() == bin_id)
            .cloned()
            .collect();

        Ok(BinDetail {
            bin: bin.clone(),
            recent_readings,
            collection_priority: collection_priority(bin.current_fill_level, &bin.location),
            requires_collection: bin.status.requires_collection(),
        })
    }

    /// Alerts, optionally only unresolved ones
    pub fn list_alerts(&self, active_only: bool) -> Vec<Alert> {
        self.alerts
            .iter()
            .filter(|a| !active_only || !a.resolved)
            .cloned()
            .collect()
    }

    /// Every alert ever raised, in creation order
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Reset a bin after collection and resolve its open alerts
    pub fn mark_emptied(&mut self, bin_id: &str) -> Result<Bin, StorageError> {
        self.mark_emptied_at(bin_id, Utc::now())
    }

    pub fn mark_emptied_at(
        &mut self,
        bin_id: &str,
        at: DateTime<Utc>,
    ) -> Result<Bin, StorageError> {
        let bin = self
            .bins
            .get_mut(bin_id)
            .ok_or_else(|| StorageError::bin_not_found(bin_id))?;
        bin.empty(at);
        let snapshot = bin.clone();

        // The empty event is kept in history as a zero-fill reading
        self.readings.push(ProcessedReading {
            reading: Reading {
                bin_id: snapshot.bin_id.clone(),
                timestamp: at,
                fill_level: 0.0,
                temperature: snapshot.current_temperature,
                weight_kg: 0.0,
                location: snapshot.location.clone(),
            },
            status: BinStatus::Normal,
            needs_attention: false,
            temperature_alert: false,
        });

        let resolved = self.resolve_alerts_for_at(bin_id, at);
        info!(bin_id, resolved, "Bin marked as emptied");
        Ok(snapshot)
    }

    /// Resolve every open alert for a bin. Returns how many were resolved.
    pub fn resolve_alerts_for(&mut self, bin_id: &str) -> usize {
        self.resolve_alerts_for_at(bin_id, Utc::now())
    }

    fn resolve_alerts_for_at(&mut self, bin_id: &str, at: DateTime<Utc>) -> usize {
        self.alerts
            .iter_mut()
            .filter(|a| a.bin_id == bin_id)
            .map(|a| a.resolve(at))
            .filter(|changed| *changed)
            .count()
    }

    /// Resolve a single alert by id
    pub fn resolve_alert(&mut self, alert_id: &str) -> Result<Alert, StorageError> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.alert_id == alert_id)
            .ok_or_else(|| StorageError::alert_not_found(alert_id))?;
        if alert.resolve(Utc::now()) {
            info!(alert_id, "Alert resolved");
        }
        Ok(alert.clone())
    }

    /// Remove a bin, purge its history and resolve its alerts.
    ///
    /// Returns false if the bin is unknown.
    pub fn delete_bin(&mut self, bin_id: &str) -> bool {
        if self.bins.remove(bin_id).is_none() {
            return false;
        }
        self.readings.retain(|r| r.bin_id() != bin_id);
        let resolved = self.resolve_alerts_for(bin_id);
        info!(bin_id, resolved, "Bin deleted");
        true
    }

    /// Aggregate statistics.
    ///
    /// `total_waste_collected_kg` sums the weight of every history entry with a
    /// fill level of exactly zero, whether emptied or reported empty.
    pub fn statistics(&self) -> Statistics {
        let total_bins = self.bins.len();
        let average_fill_level = if total_bins > 0 {
            self.bins.values().map(|b| b.current_fill_level).sum::<f64>() / total_bins as f64
        } else {
            0.0
        };
        let total_waste_collected: f64 = self
            .readings
            .iter()
            .filter(|r| r.fill_level() == 0.0)
            .map(|r| r.reading.weight_kg)
            .sum();

        Statistics {
            total_bins,
            active_alerts: self.alerts.iter().filter(|a| !a.resolved).count(),
            bins_needing_collection: self
                .bins
                .values()
                .filter(|b| b.status.requires_collection())
                .count(),
            average_fill_level: round2(average_fill_level),
            total_waste_collected_kg: round2(total_waste_collected),
            total_readings: self.readings.len(),
            total_alerts_generated: self.alerts.len(),
            last_updated: Utc::now(),
        }
    }

    /// Get total bin count
    pub fn bin_count(&self) -> usize {
        self.bins.len()
    }

    /// Get total reading count
    pub fn reading_count(&self) -> usize {
        self.readings.len()
    }

    /// Get total alert count
    pub fn alert_count(&self) -> usize {
        self.alerts.len()
    }

    /// Clear all data (for testing)
    pub fn clear(&mut self) {
        self.bins.clear();
        self.readings.clear();
        self.alerts.clear();
    }
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
