//! Alert summaries and prioritization

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::alert::{Alert, AlertLevel, AlertType};

/// Aggregate counts over a list of alerts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertSummary {
    pub total: usize,
    pub by_level: BTreeMap<AlertLevel, usize>,
    pub by_type: BTreeMap<AlertType, usize>,
    pub unresolved_count: usize,
}

/// Count alerts by severity, by type, and unresolved
pub fn summarize(alerts: &[Alert]) -> AlertSummary {
    alerts.iter().fold(AlertSummary::default(), |mut summary, alert| {
        summary.total += 1;
        *summary.by_level.entry(alert.level).or_default() += 1;
        *summary.by_type.entry(alert.alert_type).or_default() += 1;
        if !alert.resolved {
            summary.unresolved_count += 1;
        }
        summary
    })
}

/// Order alerts highest severity first, older first within a severity
pub fn prioritize(alerts: &[Alert]) -> Vec<Alert> {
    let mut sorted = alerts.to_vec();
    sorted.sort_by(|a, b| {
        b.level
            .rank()
            .cmp(&a.level.rank())
            .then_with(|| a.timestamp.cmp(&b.timestamp))
    });
    sorted
}
