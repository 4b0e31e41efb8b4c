//! Configuration error model.

use thiserror::Error;

/// A setting that fails validation before the world is built.
///
/// Always fatal at startup; the simulator never runs on a configuration it
/// could not validate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid setting `{field}`: {reason}")]
pub struct ConfigValidationError {
    pub field: String,
    pub reason: String,
}

impl ConfigValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
