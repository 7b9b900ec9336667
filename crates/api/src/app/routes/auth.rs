//! `/api/auth`: registration and login.
//!
//! Login returns the identity directly (`{identifier, role}`); no token or
//! cookie is issued.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};

use empowrhr_auth::{RegistrationPolicy, Role};

use crate::app::dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::app::{errors, services::AppServices};

pub fn router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}

/// POST /api/auth/login
pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", e.body_text()),
    };

    match services.auth.login(&body.identifier, &body.secret).await {
        Ok(assertion) => (StatusCode::OK, Json(LoginResponse::from(assertion))).into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}

/// POST /api/auth/register
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_body", e.body_text()),
    };

    // Under a fixed policy the request's role is never read, valid or not.
    let requested_role = match (services.auth.registration_policy(), body.role.as_deref()) {
        (RegistrationPolicy::FromRequest(_), Some(raw)) => match raw.parse::<Role>() {
            Ok(role) => Some(role),
            Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "invalid_role", e.to_string()),
        },
        (RegistrationPolicy::Fixed(assigned), Some(raw)) => {
            tracing::debug!(requested = raw, %assigned, "requested role ignored by registration policy");
            None
        }
        (_, None) => None,
    };

    match services
        .auth
        .register(&body.identifier, &body.secret, requested_role)
        .await
    {
        Ok(_) => (
            StatusCode::CREATED,
            Json(MessageResponse {
                message: "User created",
            }),
        )
            .into_response(),
        Err(e) => errors::auth_error_to_response(e),
    }
}
