use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use empowrhr_auth::{AuthError, INVALID_CREDENTIALS};

pub fn auth_error_to_response(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::InvalidCredentials => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", INVALID_CREDENTIALS)
        }
        AuthError::DuplicateIdentifier => {
            json_error(StatusCode::CONFLICT, "duplicate_identifier", "identifier already exists")
        }
        AuthError::Invalid(e) => json_error(StatusCode::BAD_REQUEST, "validation_error", e.to_string()),
        // Store details stay in the logs.
        AuthError::StoreUnavailable(_) => json_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "store_unavailable",
            "service temporarily unavailable",
        ),
        AuthError::Internal(_) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
