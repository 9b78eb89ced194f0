use std::fmt;
use axum::{http::StatusCode, response::{IntoResponse, Response}, Json};
use serde_json::json;

use crate::config::ReferenceDataError;
use crate::risk::RiskError;
use crate::validation::ValidationErrors;

#[derive(Debug, Clone)]
pub enum AppError {
    ValidationError(ValidationErrors),
    BadRequest(String),
    ConfigError(String),
    NotFound(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => write!(f, "Validation error: {}", errors),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConfigError(_) | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match &self {
            AppError::ValidationError(errors) => json!({
                "error": self.to_string(),
                "status": status.as_u16(),
                "violations": errors,
            }),
            _ => json!({
                "error": self.to_string(),
                "status": status.as_u16(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RiskError> for AppError {
    fn from(err: RiskError) -> Self {
        match err {
            RiskError::Validation(errors) => AppError::ValidationError(errors),
            RiskError::ConfigurationError { message } => AppError::ConfigError(message),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationError(errors)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<ReferenceDataError> for AppError {
    fn from(err: ReferenceDataError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::BadRequest(format!("JSON error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::InternalError(format!("I/O error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn test_risk_validation_maps_to_bad_request() {
        let errors = ValidationErrors(vec![ValidationError::UnknownIntervention {
            name: "Yoga".to_string(),
        }]);
        let app_error: AppError = RiskError::Validation(errors).into();
        assert_eq!(app_error.status_code(), StatusCode::BAD_REQUEST);
        assert!(matches!(app_error, AppError::ValidationError(_)));
    }

    #[test]
    fn test_configuration_error_is_server_side() {
        let app_error: AppError = RiskError::ConfigurationError {
            message: "no reference data".to_string(),
        }
        .into();
        assert_eq!(app_error.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_not_found_status() {
        let app_error = AppError::NotFound("citation for Niacin".to_string());
        assert_eq!(app_error.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(app_error.to_string(), "Not found: citation for Niacin");
    }
}
