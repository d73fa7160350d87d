//! HTTP surface of the relay.
//!
//! Four GRIP routes (`/websocket`, `/sse`, `/longpoll`, `/publish`) plus a
//! health check and the OpenAPI viewer. None of the handlers holds a
//! connection itself: they set GRIP headers or send a control frame and the
//! proxy in front keeps the client connection open.

use log::*;
use tokio::net::TcpListener;
use tokio::signal;

pub(crate) use service::AppState;

pub use error::{Error, Result};

mod controller;
mod error;
mod extractors;
mod middleware;
pub mod router;

#[cfg(test)]
mod test_support;

pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let server_url = format!(
        "{}:{}",
        app_state.config.interface, app_state.config.port
    );
    let listener = TcpListener::bind(&server_url).await?;

    info!("Server starting on {server_url}...");

    axum::serve(listener, router::define_routes(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!("Failed to install SIGTERM handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down...");
        },
    }
}
