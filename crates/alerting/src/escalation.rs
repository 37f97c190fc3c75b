//! Escalation policy

use serde::{Deserialize, Serialize};

use crate::alert::{Alert, AlertLevel};

/// Hours an alert may stay unresolved before it escalates, per severity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EscalationPolicy {
    pub critical_hours: f64,
    pub high_hours: f64,
    pub medium_hours: f64,
    pub low_hours: f64,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self {
            critical_hours: 1.0,
            high_hours: 4.0,
            medium_hours: 12.0,
            low_hours: 24.0,
        }
    }
}

impl EscalationPolicy {
    /// Escalation deadline for a severity
    pub fn threshold_hours(&self, level: AlertLevel) -> f64 {
        match level {
            AlertLevel::Critical => self.critical_hours,
            AlertLevel::High => self.high_hours,
            AlertLevel::Medium => self.medium_hours,
            AlertLevel::Low => self.low_hours,
        }
    }

    /// Whether an alert unresolved for `hours_unresolved` has reached its deadline
    pub fn should_escalate(&self, alert: &Alert, hours_unresolved: f64) -> bool {
        hours_unresolved >= self.threshold_hours(alert.level)
    }
}

/// An unresolved alert past its escalation deadline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationCandidate {
    #[serde(flatten)]
    pub alert: Alert,
    pub hours_unresolved: f64,
}
