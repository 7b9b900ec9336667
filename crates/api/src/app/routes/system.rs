use axum::http::StatusCode;

pub async fn root() -> &'static str {
    "EMS Backend is running!"
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}
