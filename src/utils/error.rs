use axum::{
    extract::rejection::FormRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use super::response::ErrorResponse;

/// Application-wide HTTP error type
#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    FormParseFailed(String),
}

impl AppError {
    /// Error message shown to the client
    pub fn message(&self) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::FormParseFailed(msg) => format!("Malformed form submission: {}", msg),
        }
    }

    /// Error code
    pub fn error_code(&self) -> String {
        match self {
            AppError::ValidationError(_) => "STATION400",
            AppError::FormParseFailed(_) => "COMMON400",
        }
        .to_string()
    }

    /// HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::FormParseFailed(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.message();

        error!("Error [{}]: {}", error_code, message);

        let error_response = ErrorResponse::new(error_code, message);

        (status, Json(error_response)).into_response()
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        AppError::FormParseFailed(rejection.to_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_validation_error_to_bad_request() {
        // Arrange
        let err = AppError::ValidationError("station: too long".to_string());

        // Act & Assert
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "STATION400");
    }

    #[test]
    fn should_prefix_form_parse_message() {
        let err = AppError::FormParseFailed("missing field".to_string());

        assert_eq!(err.message(), "Malformed form submission: missing field");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn should_display_code_and_message() {
        let err = AppError::ValidationError("station: too long".to_string());

        assert_eq!(err.to_string(), "[STATION400] station: too long");
    }
}
