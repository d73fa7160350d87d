use axum::http::StatusCode;
use axum::response::IntoResponse;

/// GET report that the relay is accepting requests
///
/// Unauthenticated so the proxy and orchestrators can probe it. It does not
/// reach the proxy control endpoints.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Relay is up and responding to requests", body = String),
    )
)]
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "healthy")
}
