use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap, Method},
    middleware::Next,
    response::{IntoResponse, Response},
};
use log::*;
use service::config::Config;

use crate::{AppState, Error};

/// A request is authorized iff its `Authorization` header is exactly
/// `Bearer <configured token>`.
pub(crate) fn is_authorized(headers: &HeaderMap, config: &Config) -> bool {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value == config.expected_authorization())
}

/// Bearer authorization middleware that returns 401 Unauthorized for requests
/// without the configured credential.
///
/// CORS preflight requests are let through untouched: browsers never attach
/// credentials to them.
pub async fn require_bearer(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS
        || is_authorized(request.headers(), &app_state.config)
    {
        next.run(request).await
    } else {
        debug!("Rejecting unauthorized {} {}", request.method(), request.uri().path());
        Error::Unauthorized.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{recording_state, test_config};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Router,
    };
    use tower::ServiceExt;

    async fn test_handler() -> &'static str {
        "authorized"
    }

    fn app() -> Router {
        let (app_state, _publisher) = recording_state(&[]);
        Router::new()
            .route("/test", get(test_handler).options(test_handler))
            .route_layer(from_fn_with_state(app_state.clone(), require_bearer))
            .with_state(app_state)
    }

    #[test]
    fn test_is_authorized_requires_exact_credential() {
        let config = test_config(&[]);
        let mut headers = HeaderMap::new();
        assert!(!is_authorized(&headers, &config));

        for rejected in ["1234", "Bearer 12345", "bearer 1234", "Basic 1234", "Bearer  1234"] {
            headers.insert(AUTHORIZATION, rejected.parse().unwrap());
            assert!(!is_authorized(&headers, &config), "{rejected} should be rejected");
        }

        headers.insert(AUTHORIZATION, "Bearer 1234".parse().unwrap());
        assert!(is_authorized(&headers, &config));
    }

    #[test]
    fn test_is_authorized_honors_configured_token() {
        let config = test_config(&["--auth-token", "s3cret"]);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, "Bearer 1234".parse().unwrap());
        assert!(!is_authorized(&headers, &config));

        headers.insert(AUTHORIZATION, "Bearer s3cret".parse().unwrap());
        assert!(is_authorized(&headers, &config));
    }

    #[tokio::test]
    async fn test_require_bearer_returns_401_without_credential() {
        let request = Request::builder().uri("/test").body(Body::empty()).unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_require_bearer_allows_authorized_request() {
        let request = Request::builder()
            .uri("/test")
            .header(AUTHORIZATION, "Bearer 1234")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_require_bearer_lets_preflight_through() {
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/test")
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
