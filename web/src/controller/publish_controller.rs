use axum::body::Bytes;
use axum::extract::{rejection::BytesRejection, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use grip::format::Item;
use grip::framing;
use log::*;

use crate::error::Transport;
use crate::extractors::channel::HeaderChannel;
use crate::{AppState, Error, Result as WebResult};

/// POST publish a message to every subscriber of a channel
///
/// The body is published three times, once per transport, in a fixed order:
/// as an SSE event, as a literal HTTP response for long-polls, and as a
/// WebSocket message. The first failure ends the request; later transports
/// are not attempted.
#[utoipa::path(
    post,
    path = "/publish",
    params(
        ("X-Channel-Name" = Option<String>, Header, description = "Channel to publish to"),
    ),
    request_body(content = String, description = "Arbitrary message payload", content_type = "text/plain"),
    responses(
        (status = 200, description = "Message published on every transport", body = String),
        (status = 401, description = "Unauthorized"),
        (status = 413, description = "Request body too large"),
        (status = 500, description = "Body could not be read or a publish failed"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn publish(
    State(app_state): State<AppState>,
    HeaderChannel(channel): HeaderChannel,
    body: Result<Bytes, BytesRejection>,
) -> WebResult<impl IntoResponse> {
    let body = body.map_err(Error::BodyRead)?;
    debug!("PUBLISH {} bytes to channel {channel}", body.len());

    let publisher = app_state.publisher_ref();
    let attempts = [
        (Transport::Sse, Item::http_stream(channel.as_str(), framing::sse_event(&body))),
        (
            Transport::LongPoll,
            Item::http_response(channel.as_str(), framing::http_response(&body)),
        ),
        (Transport::WebSocket, Item::ws_message(channel.as_str(), body.to_vec())),
    ];

    for (transport, item) in attempts {
        publisher
            .publish(item)
            .await
            .map_err(|source| Error::Publish { transport, source })?;
        trace!("Published to {transport} subscribers of {channel}");
    }

    info!("Message published to channel {channel}");
    Ok((StatusCode::OK, "Message published"))
}
