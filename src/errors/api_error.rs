use axum::{
    http::{header::X_CONTENT_TYPE_OPTIONS, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};

use crate::utils::form_values::FormError;

/// Errors surfaced to the caller. Bodies are plain text so a failed request is
/// never mistaken for an echo.
#[derive(Debug)]
pub enum ApiError {
    InternalServerError,
    InvalidForm(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error".to_owned(),
            ),
            ApiError::InvalidForm(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        (
            status,
            [(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"))],
            message,
        )
            .into_response()
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        ApiError::InvalidForm(err.to_string())
    }
}
