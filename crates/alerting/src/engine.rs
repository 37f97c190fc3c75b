//! Alert Engine Implementation

use chrono::{DateTime, Utc};
use classifier::{BinStatus, ProcessedReading, TEMP_MAX_C, TEMP_MIN_C};
use tracing::{debug, info};

use crate::alert::{generate_alert_id, Alert, AlertLevel, AlertType};
use crate::escalation::{EscalationCandidate, EscalationPolicy};

/// Stateless alert decision engine
#[derive(Debug, Clone, Default)]
pub struct AlertEngine {
    policy: EscalationPolicy,
}

impl AlertEngine {
    /// Create a new alert engine
    pub fn new(policy: EscalationPolicy) -> Self {
        debug!("Creating alert engine with policy: {:?}", policy);
        Self { policy }
    }

    pub fn policy(&self) -> &EscalationPolicy {
        &self.policy
    }

    /// Decide whether a reading raises an alert, stamped with the current time
    pub fn decide(&self, processed: &ProcessedReading) -> Option<Alert> {
        self.decide_at(processed, Utc::now())
    }

    /// Decide whether a reading raises an alert.
    ///
    /// At most one alert per reading. Fill-level conditions take precedence
    /// over the temperature condition.
    pub fn decide_at(&self, processed: &ProcessedReading, now: DateTime<Utc>) -> Option<Alert> {
        if !processed.needs_attention {
            return None;
        }

        let bin_id = processed.bin_id();
        let (alert_type, level, message) = match processed.status {
            BinStatus::Full => (
                AlertType::BinFull,
                AlertLevel::Critical,
                format!(
                    "URGENT: Bin {} is {:.1}% full and must be emptied immediately!",
                    bin_id,
                    processed.fill_level()
                ),
            ),
            BinStatus::Critical => (
                AlertType::HighFillLevel,
                AlertLevel::High,
                format!(
                    "Bin {} is {:.1}% full and requires collection soon",
                    bin_id,
                    processed.fill_level()
                ),
            ),
            BinStatus::Warning | BinStatus::Normal if processed.temperature_alert => (
                AlertType::TemperatureAlert,
                AlertLevel::Medium,
                format!(
                    "Temperature alert for bin {}: {:.1}°C (safe range: {:.0}-{:.0}°C)",
                    bin_id,
                    processed.temperature(),
                    TEMP_MIN_C,
                    TEMP_MAX_C
                ),
            ),
            BinStatus::Warning | BinStatus::Normal => {
                debug!(bin_id, "Reading flagged for attention but matched no alert rule");
                return None;
            }
        };

        info!(bin_id, %alert_type, %level, "Alert raised");

        Some(Alert {
            alert_id: generate_alert_id(bin_id, now),
            bin_id: bin_id.to_string(),
            alert_type,
            level,
            message,
            location: processed.location().to_string(),
            timestamp: now,
            resolved: false,
            resolved_at: None,
        })
    }

    /// Whether an alert should be escalated after `hours_unresolved`
    pub fn should_escalate(&self, alert: &Alert, hours_unresolved: f64) -> bool {
        self.policy.should_escalate(alert, hours_unresolved)
    }

    /// Unresolved alerts that have reached their escalation deadline at `now`
    pub fn escalation_candidates(
        &self,
        alerts: &[Alert],
        now: DateTime<Utc>,
    ) -> Vec<EscalationCandidate> {
        alerts
            .iter()
            .filter(|alert| !alert.resolved)
            .filter_map(|alert| {
                let hours = alert.hours_open(now);
                self.should_escalate(alert, hours).then(|| EscalationCandidate {
                    alert: alert.clone(),
                    hours_unresolved: hours,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use classifier::{classify, Reading};

    fn processed(fill_level: f64, temperature: f64) -> ProcessedReading {
        classify(Reading::now("BIN-TEST-001", fill_level, temperature, 12.0, "ICU-Floor3"))
    }

    fn alert_with(level: AlertLevel, created: DateTime<Utc>) -> Alert {
        Alert {
            alert_id: generate_alert_id("BIN-TEST-001", created),
            bin_id: "BIN-TEST-001".to_string(),
            alert_type: AlertType::HighFillLevel,
            level,
            message: "test".to_string(),
            location: "Ward".to_string(),
            timestamp: created,
            resolved: false,
            resolved_at: None,
        }
    }

    #[test]
    fn test_full_bin_alert() {
        let engine = AlertEngine::default();
        let alert = engine.decide(&processed(97.0, 22.0)).unwrap();

        assert_eq!(alert.alert_type, AlertType::BinFull);
        assert_eq!(alert.level, AlertLevel::Critical);
        assert!(alert.message.contains("URGENT"));
        assert!(alert.message.contains("97.0%"));
        assert_eq!(alert.location, "ICU-Floor3");
        assert!(!alert.resolved);
        assert!(alert.resolved_at.is_none());
    }

    #[test]
    fn test_high_fill_alert() {
        let engine = AlertEngine::default();
        let alert = engine.decide(&processed(85.0, 22.0)).unwrap();

        assert_eq!(alert.alert_type, AlertType::HighFillLevel);
        assert_eq!(alert.level, AlertLevel::High);
        assert!(alert.message.contains("85.0%"));
    }

    #[test]
    fn test_temperature_alert() {
        let engine = AlertEngine::default();
        let alert = engine.decide(&processed(40.0, 35.0)).unwrap();

        assert_eq!(alert.alert_type, AlertType::TemperatureAlert);
        assert_eq!(alert.level, AlertLevel::Medium);
        assert!(alert.message.contains("35.0°C"));
        assert!(alert.message.contains("15-30°C"));
    }

    #[test]
    fn test_fill_level_takes_precedence() {
        let engine = AlertEngine::default();
        let alert = engine.decide(&processed(96.0, 35.0)).unwrap();
        assert_eq!(alert.alert_type, AlertType::BinFull);

        let alert = engine.decide(&processed(82.0, 5.0)).unwrap();
        assert_eq!(alert.alert_type, AlertType::HighFillLevel);
    }

    #[test]
    fn test_no_alert_when_normal() {
        let engine = AlertEngine::default();
        assert!(engine.decide(&processed(50.0, 22.0)).is_none());
        assert!(engine.decide(&processed(79.9, 30.0)).is_none());
    }

    #[test]
    fn test_no_alert_without_matching_rule() {
        let engine = AlertEngine::default();
        let mut reading = processed(50.0, 22.0);
        reading.needs_attention = true;
        assert!(engine.decide(&reading).is_none());
    }

    #[test]
    fn test_rapid_alerts_have_distinct_ids() {
        let engine = AlertEngine::default();
        let reading = processed(97.0, 22.0);
        let now = Utc::now();

        let first = engine.decide_at(&reading, now).unwrap();
        let second = engine.decide_at(&reading, now).unwrap();
        assert_ne!(first.alert_id, second.alert_id);
    }

    #[test]
    fn test_escalation_thresholds() {
        let engine = AlertEngine::default();
        let now = Utc::now();

        assert!(engine.should_escalate(&alert_with(AlertLevel::Critical, now), 1.0));
        assert!(!engine.should_escalate(&alert_with(AlertLevel::Critical, now), 0.5));
        assert!(engine.should_escalate(&alert_with(AlertLevel::High, now), 4.0));
        assert!(!engine.should_escalate(&alert_with(AlertLevel::High, now), 3.9));
        assert!(engine.should_escalate(&alert_with(AlertLevel::Medium, now), 12.0));
        assert!(!engine.should_escalate(&alert_with(AlertLevel::Low, now), 23.0));
        assert!(engine.should_escalate(&alert_with(AlertLevel::Low, now), 24.0));
    }

    #[test]
    fn test_custom_policy() {
        let engine = AlertEngine::new(EscalationPolicy {
            critical_hours: 0.25,
            ..Default::default()
        });
        let alert = alert_with(AlertLevel::Critical, Utc::now());
        assert!(engine.should_escalate(&alert, 0.25));
        assert_eq!(engine.policy().high_hours, 4.0);
    }

    #[test]
    fn test_escalation_candidates() {
        let engine = AlertEngine::default();
        let now = Utc::now();

        let overdue = alert_with(AlertLevel::Critical, now - Duration::hours(2));
        let fresh = alert_with(AlertLevel::High, now - Duration::hours(1));
        let mut resolved = alert_with(AlertLevel::Critical, now - Duration::hours(5));
        resolved.resolve(now);

        let candidates =
            engine.escalation_candidates(&[overdue.clone(), fresh, resolved], now);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].alert.alert_id, overdue.alert_id);
        assert!((candidates[0].hours_unresolved - 2.0).abs() < 0.01);
    }
}
