//! Storage Layer
//!
//! Owns bin snapshots, the reading history and the alert list. All mutation
//! goes through [`Repository`]; callers serialize access to it.

mod models;
mod repository;

pub use models::{Bin, BinDetail, IngestOutcome, Statistics};
pub use repository::{Repository, DEFAULT_RECENT_WINDOW};

use data_validator::ValidationError;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },
    #[error("Invalid reading: {0}")]
    InvalidReading(#[from] ValidationError),
}

impl StorageError {
    pub(crate) fn bin_not_found(bin_id: &str) -> Self {
        StorageError::NotFound {
            entity: "Bin",
            id: bin_id.to_string(),
        }
    }

    pub(crate) fn alert_not_found(alert_id: &str) -> Self {
        StorageError::NotFound {
            entity: "Alert",
            id: alert_id.to_string(),
        }
    }
}
