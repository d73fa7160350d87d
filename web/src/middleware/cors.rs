//! CORS headers applied to every response, and the preflight answer.

use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use tower_http::set_header::SetResponseHeaderLayer;

pub(crate) const ALLOW_ORIGIN: &str = "*";
pub(crate) const ALLOW_METHODS: &str = "GET, POST, OPTIONS";
pub(crate) const ALLOW_HEADERS: &str =
    "Origin, Content-Type, Authorization, Cache-Control, X-Requested-With, X-Channel-Name";

fn header_layer(name: HeaderName, value: &'static str) -> SetResponseHeaderLayer<HeaderValue> {
    SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
}

pub(crate) fn allow_origin() -> SetResponseHeaderLayer<HeaderValue> {
    header_layer(header::ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW_ORIGIN)
}

pub(crate) fn allow_methods() -> SetResponseHeaderLayer<HeaderValue> {
    header_layer(header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS)
}

pub(crate) fn allow_headers() -> SetResponseHeaderLayer<HeaderValue> {
    header_layer(header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS)
}

/// OPTIONS on any GRIP route. The CORS layers add the headers; nothing else
/// about the request is looked at.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}
