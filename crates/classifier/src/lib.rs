//! Reading Classification
//!
//! Turns raw bin sensor readings into a status classification, a
//! temperature-safety flag and an attention decision. Also provides the
//! collection-planning helpers (time-to-full estimate, collection priority).

mod collection;
mod reading;
mod status;

pub use collection::{collection_priority, estimate_time_to_full, CRITICAL_LOCATIONS};
pub use reading::{ProcessedReading, Reading};
pub use status::{
    check_bin_status, classify, is_temperature_unsafe, BinStatus, BinStatusCheck,
    CRITICAL_THRESHOLD, FULL_THRESHOLD, TEMP_MAX_C, TEMP_MIN_C, WARNING_THRESHOLD,
};
