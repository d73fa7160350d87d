use axum::extract::ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket, WebSocketUpgrade};
use axum::http::{header::SEC_WEBSOCKET_EXTENSIONS, HeaderValue};
use axum::response::Response;
use grip::control::{ControlMessage, GRIP_WEBSOCKET_EXTENSION};
use log::*;

use crate::extractors::channel::{ChannelParams, QueryChannel};
use crate::{Error, Result as WebResult};

/// GET upgrade to a WebSocket subscribed to a channel
///
/// The first frame sent after the upgrade is a GRIP subscribe control message
/// naming the channel. The proxy intercepts it and from then on forwards every
/// `ws-message` published on that channel to this connection.
#[utoipa::path(
    get,
    path = "/websocket",
    params(ChannelParams),
    responses(
        (status = 101, description = "Switched to a GRIP WebSocket subscribed to the channel"),
        (status = 400, description = "Not a valid WebSocket upgrade request"),
        (status = 500, description = "Control message could not be built"),
    )
)]
pub async fn subscribe(
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    QueryChannel(channel): QueryChannel,
) -> WebResult<Response> {
    let frame = ControlMessage::subscribe(channel.as_str())
        .to_frame()
        .map_err(Error::ControlMessage)?;
    let upgrade = upgrade.map_err(Error::Upgrade)?;

    debug!("Upgrading WebSocket for channel {channel}");

    let failed_channel = channel.clone();
    let mut response = upgrade
        .on_failed_upgrade(move |err| {
            warn!("WebSocket upgrade for channel {failed_channel} failed: {err}");
        })
        .on_upgrade(move |socket| hold_subscription(socket, channel, frame));

    // Lets the proxy recognize and intercept control frames
    response.headers_mut().insert(
        SEC_WEBSOCKET_EXTENSIONS,
        HeaderValue::from_static(GRIP_WEBSOCKET_EXTENSION),
    );

    Ok(response)
}

async fn hold_subscription(mut socket: WebSocket, channel: String, frame: String) {
    if let Err(err) = socket.send(Message::Text(frame.into())).await {
        warn!("Failed to send subscribe frame for channel {channel}: {err}");
        return;
    }
    info!("WebSocket subscribed to channel {channel}");

    // Nothing else is written from here. Inbound frames are discarded until
    // the peer closes so the connection stays up.
    while let Some(message) = socket.recv().await {
        match message {
            Ok(Message::Close(_)) | Err(_) => break,
            Ok(_) => trace!("Discarding inbound frame on channel {channel}"),
        }
    }

    debug!("WebSocket for channel {channel} closed");
}

#[cfg(test)]
mod tests {
    use crate::router::define_routes;
    use crate::test_support::recording_state;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use futures_util::StreamExt;
    use grip::control::CONTROL_PREFIX;
    use serde_json::{json, Value};
    use std::time::Duration;
    use tokio::net::TcpListener;
    use tokio::time::timeout;
    use tokio_tungstenite::{connect_async, tungstenite::client::IntoClientRequest, tungstenite::Message};
    use tower::ServiceExt;

    const TIMEOUT: Duration = Duration::from_secs(5);

    async fn serve(args: &[&str]) -> String {
        let (app_state, _) = recording_state(args);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, define_routes(app_state)).await.ok();
        });
        format!("ws://{addr}/websocket")
    }

    async fn first_frame<R>(request: R) -> (String, Option<String>)
    where
        R: IntoClientRequest + Unpin,
    {
        let (mut stream, response) = timeout(TIMEOUT, connect_async(request))
            .await
            .expect("connect timed out")
            .expect("handshake failed");

        let extensions = response
            .headers()
            .get("sec-websocket-extensions")
            .map(|v| v.to_str().unwrap().to_string());

        let message = timeout(TIMEOUT, stream.next())
            .await
            .expect("no frame within timeout")
            .expect("stream ended")
            .expect("read failed");

        match message {
            Message::Text(text) => (text.as_str().to_string(), extensions),
            other => panic!("expected a text frame, got {other:?}"),
        }
    }

    fn control_body(frame: &str) -> Value {
        let body = frame
            .strip_prefix(CONTROL_PREFIX)
            .expect("first frame should carry the control prefix");
        serde_json::from_str(body).unwrap()
    }

    #[tokio::test]
    async fn test_first_frame_subscribes_to_query_channel() {
        let url = serve(&[]).await;
        let (frame, extensions) = first_frame(format!("{url}?channel=room42")).await;

        assert_eq!(
            control_body(&frame),
            json!({"type": "subscribe", "channel": "room42"})
        );
        assert_eq!(extensions.as_deref(), Some("grip; message-prefix=\"\""));
    }

    #[tokio::test]
    async fn test_first_frame_defaults_channel() {
        let url = serve(&[]).await;
        let (frame, _) = first_frame(url.as_str()).await;

        assert_eq!(control_body(&frame)["channel"], "default-channel");
    }

    #[tokio::test]
    async fn test_websocket_requires_bearer_when_configured() {
        let url = serve(&["--websocket-requires-auth"]).await;
        assert!(connect_async(url.as_str()).await.is_err());

        let mut request = url.as_str().into_client_request().unwrap();
        request
            .headers_mut()
            .insert("authorization", "Bearer 1234".parse().unwrap());
        let (frame, _) = first_frame(request).await;
        assert_eq!(control_body(&frame)["type"], "subscribe");
    }

    #[tokio::test]
    async fn test_plain_get_is_rejected_not_ignored() {
        let (app_state, _) = recording_state(&[]);
        let request = Request::builder()
            .uri("/websocket?channel=room42")
            .body(Body::empty())
            .unwrap();

        let response = define_routes(app_state).oneshot(request).await.unwrap();
        assert!(response.status().is_client_error());
        assert_ne!(response.status(), StatusCode::NOT_FOUND);
    }
}
