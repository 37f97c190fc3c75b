//! Alerting System
//!
//! Decides whether a classified reading raises an alert, assigns severity,
//! and provides escalation, summary and prioritization over alert lists.

mod alert;
mod engine;
mod escalation;
mod summary;

pub use alert::{generate_alert_id, Alert, AlertLevel, AlertType};
pub use engine::AlertEngine;
pub use escalation::{EscalationCandidate, EscalationPolicy};
pub use summary::{prioritize, summarize, AlertSummary};
