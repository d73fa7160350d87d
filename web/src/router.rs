use crate::{
    controller::{
        health_check_controller, hold_controller, publish_controller, websocket_controller,
    },
    middleware::{auth::require_bearer, cors, request_log::log_request_headers},
    AppState, Error,
};
use axum::{
    extract::DefaultBodyLimit,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};

use utoipa::{
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

// This is the global definition of our OpenAPI document. To be a part
// of the rendered document, a path and schema must be listed here.
#[derive(OpenApi)]
#[openapi(
        info(
            title = "GRIP Relay API"
        ),
        paths(
            health_check_controller::health_check,
            hold_controller::sse,
            hold_controller::longpoll,
            publish_controller::publish,
            websocket_controller::subscribe,
        ),
        modifiers(&SecurityAddon),
        tags(
            (name = "grip_relay", description = "Bridges SSE, long-poll and WebSocket clients to a GRIP proxy")
        )
    )]
struct ApiDoc;

struct SecurityAddon;

// Defines the fixed bearer credential requirement for the hold and publish
// endpoints in OpenAPI.
impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(websocket_routes(app_state.clone()))
        .merge(hold_routes(app_state.clone()))
        .merge(publish_routes(app_state))
        .merge(RapiDoc::with_openapi("/api-docs/openapi.json", ApiDoc::openapi()).path("/rapidoc"))
        .fallback(not_found)
        .layer(cors::allow_headers())
        .layer(cors::allow_methods())
        .layer(cors::allow_origin())
        .layer(from_fn(log_request_headers))
}

async fn not_found() -> Error {
    Error::NotFound
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

fn websocket_routes(app_state: AppState) -> Router {
    let routes = Router::new().route(
        "/websocket",
        get(websocket_controller::subscribe).options(cors::preflight),
    );

    let routes = if app_state.config.websocket_requires_auth {
        routes.route_layer(from_fn_with_state(app_state.clone(), require_bearer))
    } else {
        routes
    };

    routes.with_state(app_state)
}

fn hold_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/sse", get(hold_controller::sse).options(cors::preflight))
        .route(
            "/longpoll",
            get(hold_controller::longpoll).options(cors::preflight),
        )
        .route_layer(from_fn_with_state(app_state.clone(), require_bearer))
        .with_state(app_state)
}

fn publish_routes(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/publish",
            post(publish_controller::publish).options(cors::preflight),
        )
        .layer(DefaultBodyLimit::max(
            app_state.config.max_publish_body_bytes,
        ))
        .route_layer(from_fn_with_state(app_state.clone(), require_bearer))
        .with_state(app_state)
}
