//! Collection planning helpers

use crate::status::BinStatus;

/// Location substrings that mark a clinically sensitive area
pub const CRITICAL_LOCATIONS: [&str; 4] = ["ICU", "ER", "OR", "Surgery"];

/// Hours until a bin reaches 100% at a constant fill rate.
///
/// Returns `f64::INFINITY` when the bin is not filling (`rate_per_hour <= 0`).
pub fn estimate_time_to_full(current_fill_level: f64, rate_per_hour: f64) -> f64 {
    if rate_per_hour <= 0.0 {
        return f64::INFINITY;
    }
    (100.0 - current_fill_level) / rate_per_hour
}

/// Collection urgency score in 2..=10.
///
/// Base score follows the fill-level bands; bins in a critical location get
/// +2, capped at 10.
pub fn collection_priority(fill_level: f64, location: &str) -> u8 {
    let base: u8 = match BinStatus::from_fill_level(fill_level) {
        BinStatus::Full => 10,
        BinStatus::Critical => 8,
        BinStatus::Warning => 5,
        BinStatus::Normal => 2,
    };

    if CRITICAL_LOCATIONS.iter().any(|loc| location.contains(loc)) {
        (base + 2).min(10)
    } else {
        base
    }
}
