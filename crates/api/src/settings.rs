//! Server configuration loaded with the `config` crate

use alerting::EscalationPolicy;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thiserror::Error;
use tracing::Level;

/// Environment variable naming the config file
pub const CONFIG_PATH_ENV: &str = "WASTE_MONITOR_CONFIG";
/// Prefix for environment overrides, e.g. `WASTE_MONITOR__BIND_ADDR`
pub const ENV_PREFIX: &str = "WASTE_MONITOR";

const DEFAULT_CONFIG_PATH: &str = "waste-monitor.toml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Listen address
    pub bind_addr: String,
    /// Max tracing level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines
    pub log_json: bool,
    /// History entries scanned when listing a bin's recent readings
    pub recent_readings_window: usize,
    /// Escalation deadlines per severity
    pub escalation: EscalationPolicy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8000".to_string(),
            log_level: "info".to_string(),
            log_json: false,
            recent_readings_window: storage::DEFAULT_RECENT_WINDOW,
            escalation: EscalationPolicy::default(),
        }
    }
}

impl AppConfig {
    /// Load from the file named by `WASTE_MONITOR_CONFIG` (default
    /// `waste-monitor.toml`, optional) plus environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check values the deserializer cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        self.level()?;
        if self.recent_readings_window == 0 {
            return Err(ConfigError::Invalid {
                field: "recent_readings_window",
                reason: "must be greater than zero".to_string(),
            });
        }
        let policy = &self.escalation;
        let thresholds = [
            policy.critical_hours,
            policy.high_hours,
            policy.medium_hours,
            policy.low_hours,
        ];
        if thresholds.iter().any(|h| !h.is_finite() || *h < 0.0) {
            return Err(ConfigError::Invalid {
                field: "escalation",
                reason: "thresholds must be non-negative hours".to_string(),
            });
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind_addr.parse().map_err(|_| ConfigError::Invalid {
            field: "bind_addr",
            reason: format!("{:?} is not a socket address", self.bind_addr),
        })
    }

    pub fn level(&self) -> Result<Level, ConfigError> {
        self.log_level.parse().map_err(|_| ConfigError::Invalid {
            field: "log_level",
            reason: format!("unknown level {:?}", self.log_level),
        })
    }
}
