use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use log::*;

/// Dumps the method, path and every header of each request at debug level.
pub async fn log_request_headers(request: Request, next: Next) -> Response {
    if log_enabled!(Level::Debug) {
        debug!("{} {}", request.method(), request.uri());
        for (name, value) in request.headers() {
            debug!("{}: {}", name, display_value(name, value));
        }
    }

    next.run(request).await
}

fn display_value<'a>(name: &HeaderName, value: &'a HeaderValue) -> &'a str {
    if *name == AUTHORIZATION {
        "<redacted>"
    } else {
        value.to_str().unwrap_or("<non-ascii>")
    }
}
