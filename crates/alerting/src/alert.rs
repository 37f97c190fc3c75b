//! Alert records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl AlertLevel {
    /// Ordering rank used for prioritization (critical = 4 ... low = 1)
    pub fn rank(self) -> u8 {
        match self {
            AlertLevel::Critical => 4,
            AlertLevel::High => 3,
            AlertLevel::Medium => 2,
            AlertLevel::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlertLevel::Low => "low",
            AlertLevel::Medium => "medium",
            AlertLevel::High => "high",
            AlertLevel::Critical => "critical",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condition that raised an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertType {
    BinFull,
    HighFillLevel,
    TemperatureAlert,
}

impl AlertType {
    pub fn as_str(self) -> &'static str {
        match self {
            AlertType::BinFull => "bin_full",
            AlertType::HighFillLevel => "high_fill_level",
            AlertType::TemperatureAlert => "temperature_alert",
        }
    }
}

impl fmt::Display for AlertType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raised condition with its own resolution lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub alert_id: String,
    pub bin_id: String,
    pub alert_type: AlertType,
    pub level: AlertLevel,
    pub message: String,
    pub location: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    pub resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Alert {
    /// Mark the alert resolved. Returns false if it already was.
    pub fn resolve(&mut self, at: DateTime<Utc>) -> bool {
        if self.resolved {
            return false;
        }
        self.resolved = true;
        self.resolved_at = Some(at);
        true
    }

    /// Hours elapsed between creation and `now`
    pub fn hours_open(&self, now: DateTime<Utc>) -> f64 {
        (now - self.timestamp).num_seconds() as f64 / 3600.0
    }
}

/// Build an alert id: `ALT-<bin_id>-<YYYYMMDDHHMMSS>-<8 hex chars>`.
///
/// The random suffix keeps ids unique for the same bin within one second.
pub fn generate_alert_id(bin_id: &str, at: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("ALT-{}-{}-{}", bin_id, at.format("%Y%m%d%H%M%S"), &suffix[..8])
}
