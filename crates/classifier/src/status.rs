//! Status classification

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::reading::{ProcessedReading, Reading};

/// Fill level (%) at which a bin enters the warning band
pub const WARNING_THRESHOLD: f64 = 60.0;
/// Fill level (%) at which a bin enters the critical band
pub const CRITICAL_THRESHOLD: f64 = 80.0;
/// Fill level (%) at which a bin is considered full
pub const FULL_THRESHOLD: f64 = 95.0;

/// Lowest safe storage temperature (°C, inclusive)
pub const TEMP_MIN_C: f64 = 15.0;
/// Highest safe storage temperature (°C, inclusive)
pub const TEMP_MAX_C: f64 = 30.0;

/// Fill urgency of a bin
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BinStatus {
    Normal,
    Warning,
    Critical,
    Full,
}

impl BinStatus {
    /// Classify a fill level. Band lower bounds are inclusive.
    pub fn from_fill_level(fill_level: f64) -> Self {
        if fill_level >= FULL_THRESHOLD {
            BinStatus::Full
        } else if fill_level >= CRITICAL_THRESHOLD {
            BinStatus::Critical
        } else if fill_level >= WARNING_THRESHOLD {
            BinStatus::Warning
        } else {
            BinStatus::Normal
        }
    }

    /// Whether a bin in this state should be collected
    pub fn requires_collection(self) -> bool {
        matches!(self, BinStatus::Critical | BinStatus::Full)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinStatus::Normal => "normal",
            BinStatus::Warning => "warning",
            BinStatus::Critical => "critical",
            BinStatus::Full => "full",
        }
    }
}

impl fmt::Display for BinStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a temperature lies outside the safe storage window
pub fn is_temperature_unsafe(temperature: f64) -> bool {
    temperature < TEMP_MIN_C || temperature > TEMP_MAX_C
}

/// Derive status, temperature flag and attention flag for a reading
pub fn classify(reading: Reading) -> ProcessedReading {
    let status = BinStatus::from_fill_level(reading.fill_level);
    let temperature_alert = is_temperature_unsafe(reading.temperature);
    let needs_attention = status.requires_collection() || temperature_alert;

    debug!(
        bin_id = %reading.bin_id,
        fill_level = reading.fill_level,
        %status,
        temperature_alert,
        "Classified reading"
    );

    ProcessedReading {
        reading,
        status,
        needs_attention,
        temperature_alert,
    }
}

/// Point-in-time status of a bin, independent of any stored state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinStatusCheck {
    pub bin_id: String,
    pub status: BinStatus,
    pub fill_level: f64,
    pub requires_collection: bool,
}

/// Classify a bare fill level for a bin
pub fn check_bin_status(bin_id: &str, fill_level: f64) -> BinStatusCheck {
    let status = BinStatus::from_fill_level(fill_level);
    BinStatusCheck {
        bin_id: bin_id.to_string(),
        status,
        fill_level,
        requires_collection: status.requires_collection(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reading(fill_level: f64, temperature: f64) -> Reading {
        Reading::now("BIN-TEST-001", fill_level, temperature, 10.0, "TestWard")
    }

    #[test]
    fn test_status_bands() {
        assert_eq!(BinStatus::from_fill_level(0.0), BinStatus::Normal);
        assert_eq!(BinStatus::from_fill_level(59.9), BinStatus::Normal);
        assert_eq!(BinStatus::from_fill_level(70.0), BinStatus::Warning);
        assert_eq!(BinStatus::from_fill_level(85.0), BinStatus::Critical);
        assert_eq!(BinStatus::from_fill_level(100.0), BinStatus::Full);
    }

    #[test]
    fn test_boundaries_belong_to_higher_band() {
        assert_eq!(BinStatus::from_fill_level(60.0), BinStatus::Warning);
        assert_eq!(BinStatus::from_fill_level(80.0), BinStatus::Critical);
        assert_eq!(BinStatus::from_fill_level(95.0), BinStatus::Full);
    }

    #[test]
    fn test_temperature_window() {
        assert!(!is_temperature_unsafe(15.0));
        assert!(!is_temperature_unsafe(22.5));
        assert!(!is_temperature_unsafe(30.0));
        assert!(is_temperature_unsafe(14.9));
        assert!(is_temperature_unsafe(30.1));
        assert!(is_temperature_unsafe(-5.0));
    }

    #[test]
    fn test_needs_attention() {
        assert!(!classify(reading(50.0, 22.0)).needs_attention);
        assert!(!classify(reading(70.0, 22.0)).needs_attention);
        assert!(classify(reading(85.0, 22.0)).needs_attention);
        assert!(classify(reading(97.0, 22.0)).needs_attention);

        let hot = classify(reading(40.0, 35.0));
        assert!(hot.needs_attention);
        assert!(hot.temperature_alert);
        assert_eq!(hot.status, BinStatus::Normal);
    }

    #[test]
    fn test_classify_keeps_reading() {
        let raw = reading(65.0, 22.0);
        let processed = classify(raw.clone());
        assert_eq!(processed.reading, raw);
        assert_eq!(processed.status, BinStatus::Warning);
    }

    #[test]
    fn test_check_bin_status() {
        let check = check_bin_status("BIN-001", 82.0);
        assert_eq!(check.status, BinStatus::Critical);
        assert!(check.requires_collection);

        let check = check_bin_status("BIN-001", 61.0);
        assert_eq!(check.status, BinStatus::Warning);
        assert!(!check.requires_collection);
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&BinStatus::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }

    proptest! {
        #[test]
        fn prop_status_matches_band(fill in 0.0f64..=100.0) {
            let status = BinStatus::from_fill_level(fill);
            let expected = if fill < 60.0 {
                BinStatus::Normal
            } else if fill < 80.0 {
                BinStatus::Warning
            } else if fill < 95.0 {
                BinStatus::Critical
            } else {
                BinStatus::Full
            };
            prop_assert_eq!(status, expected);
        }

        #[test]
        fn prop_temperature_alert_outside_window(t in -50.0f64..80.0) {
            prop_assert_eq!(is_temperature_unsafe(t), t < 15.0 || t > 30.0);
        }

        #[test]
        fn prop_attention_iff_collection_or_temperature(
            fill in 0.0f64..=100.0,
            t in -20.0f64..60.0,
        ) {
            let processed = classify(reading(fill, t));
            prop_assert_eq!(
                processed.needs_attention,
                fill >= 80.0 || t < 15.0 || t > 30.0
            );
        }
    }
}
