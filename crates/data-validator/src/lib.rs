//! Reading Validation
//!
//! Range and presence checks applied to sensor readings before they reach
//! the classifier and the store.

mod error;
mod validator;

pub use error::ValidationError;
pub use validator::{ValidationConfig, ValidationResult, Validator};
