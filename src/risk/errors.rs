// Risk calculation error types
use thiserror::Error;

use crate::validation::ValidationErrors;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RiskError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid input for {field}: {message}")]
    InvalidInput { field: String, message: String },

    #[error("Unknown therapy: {name}")]
    UnknownTherapy { name: String },

    #[error("Unknown intervention: {name}")]
    UnknownIntervention { name: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl RiskError {
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        RiskError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
