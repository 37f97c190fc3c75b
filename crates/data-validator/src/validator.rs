//! Reading Validator for Range Checking

use classifier::Reading;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ValidationError;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Fill level valid range (%)
    pub fill_level_range: (f64, f64),
    /// Minimum weight (kg)
    pub min_weight_kg: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            fill_level_range: (0.0, 100.0),
            min_weight_kg: 0.0,
        }
    }
}

/// Result of validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all values are valid
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    /// Create a valid result
    pub fn valid(fields_checked: usize) -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
            fields_checked,
        }
    }

    /// Create an invalid result with errors
    pub fn invalid(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: false,
            errors,
            fields_checked,
        }
    }
}

/// Validator for bin sensor readings
#[derive(Debug, Clone)]
pub struct Validator {
    config: ValidationConfig,
}

impl Validator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against an inclusive range
    pub fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite { field });
        }
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate fill level
    pub fn validate_fill_level(&self, fill_level: f64) -> Result<(), ValidationError> {
        self.validate_range("fill_level", fill_level, self.config.fill_level_range)
    }

    /// Validate weight
    pub fn validate_weight(&self, weight_kg: f64) -> Result<(), ValidationError> {
        if !weight_kg.is_finite() {
            return Err(ValidationError::NotFinite { field: "weight_kg" });
        }
        if weight_kg < self.config.min_weight_kg {
            return Err(ValidationError::BelowMinimum {
                field: "weight_kg",
                value: weight_kg,
                min: self.config.min_weight_kg,
            });
        }
        Ok(())
    }

    /// Validate temperature. Any finite value is accepted.
    pub fn validate_temperature(&self, temperature: f64) -> Result<(), ValidationError> {
        if temperature.is_finite() {
            Ok(())
        } else {
            Err(ValidationError::NotFinite {
                field: "temperature",
            })
        }
    }

    fn validate_present(field: &'static str, value: &str) -> Result<(), ValidationError> {
        if value.trim().is_empty() {
            Err(ValidationError::MissingField(field))
        } else {
            Ok(())
        }
    }

    /// Run every check and collect all failures
    pub fn check(&self, reading: &Reading) -> ValidationResult {
        let checks = [
            Self::validate_present("bin_id", &reading.bin_id),
            Self::validate_present("location", &reading.location),
            self.validate_fill_level(reading.fill_level),
            self.validate_temperature(reading.temperature),
            self.validate_weight(reading.weight_kg),
        ];
        let fields_checked = checks.len();
        let errors: Vec<_> = checks.into_iter().filter_map(Result::err).collect();

        if errors.is_empty() {
            ValidationResult::valid(fields_checked)
        } else {
            warn!(bin_id = %reading.bin_id, errors = errors.len(), "Reading failed validation");
            ValidationResult::invalid(errors, fields_checked)
        }
    }

    /// Validate a reading, returning the first failure
    pub fn validate_reading(&self, reading: &Reading) -> Result<(), ValidationError> {
        match self.check(reading).errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn reading(fill_level: f64, weight_kg: f64) -> Reading {
        Reading::now("BIN-TEST-001", fill_level, 22.0, weight_kg, "TestWard")
    }

    #[test]
    fn test_valid_reading() {
        let validator = Validator::default();
        assert!(validator.validate_reading(&reading(65.0, 10.5)).is_ok());
        assert!(validator.validate_reading(&reading(0.0, 0.0)).is_ok());
        assert!(validator.validate_reading(&reading(100.0, 0.0)).is_ok());
    }

    #[test]
    fn test_invalid_fill_level() {
        let validator = Validator::default();
        let err = validator.validate_reading(&reading(150.0, 10.0)).unwrap_err();
        assert_eq!(err.field(), "fill_level");
        assert!(validator.validate_reading(&reading(-1.0, 10.0)).is_err());
    }

    #[test]
    fn test_negative_weight() {
        let validator = Validator::default();
        let err = validator.validate_reading(&reading(50.0, -5.0)).unwrap_err();
        assert!(matches!(err, ValidationError::BelowMinimum { field: "weight_kg", .. }));
    }

    #[test]
    fn test_missing_text_fields() {
        let validator = Validator::default();
        let mut r = reading(50.0, 1.0);
        r.bin_id = "  ".to_string();
        r.location = String::new();

        let result = validator.check(&r);
        assert!(!result.valid);
        assert_eq!(result.errors.len(), 2);
        assert_eq!(result.errors[0], ValidationError::MissingField("bin_id"));
        assert_eq!(result.errors[1], ValidationError::MissingField("location"));
    }

    #[test]
    fn test_non_finite_values() {
        let validator = Validator::default();
        assert!(validator.validate_reading(&reading(f64::NAN, 1.0)).is_err());

        let mut r = reading(50.0, 1.0);
        r.temperature = f64::INFINITY;
        assert_eq!(
            validator.validate_reading(&r),
            Err(ValidationError::NotFinite { field: "temperature" })
        );
    }

    proptest! {
        #[test]
        fn prop_fill_level_range(fill in -200.0f64..200.0) {
            let validator = Validator::default();
            let ok = validator.validate_fill_level(fill).is_ok();
            prop_assert_eq!(ok, (0.0..=100.0).contains(&fill));
        }
    }
}
