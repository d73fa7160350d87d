use axum::http::{header, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use grip::control::{Hold, GRIP_CHANNEL, GRIP_HOLD};
use log::*;

use crate::extractors::channel::HeaderChannel;
use crate::{Error, Result as WebResult};

fn channel_header(channel: &str) -> WebResult<HeaderValue> {
    HeaderValue::from_str(channel).map_err(|_| Error::InvalidChannel)
}

/// GET hold an SSE stream open on a channel
#[utoipa::path(
    get,
    path = "/sse",
    params(
        ("X-Channel-Name" = Option<String>, Header, description = "Channel to hold the stream on"),
    ),
    responses(
        (status = 200, description = "Proxy instructed to hold the response as an event stream"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn sse(HeaderChannel(channel): HeaderChannel) -> WebResult<impl IntoResponse> {
    debug!("SSE hold on channel {channel}");

    Ok((
        StatusCode::OK,
        [
            (GRIP_HOLD, HeaderValue::from_static(Hold::Stream.as_str())),
            (GRIP_CHANNEL, channel_header(&channel)?),
        ],
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/event-stream"),
        )],
    ))
}

/// GET hold a long-poll response until the next publish on a channel
#[utoipa::path(
    get,
    path = "/longpoll",
    params(
        ("X-Channel-Name" = Option<String>, Header, description = "Channel to hold the response on"),
    ),
    responses(
        (status = 200, description = "Proxy instructed to hold the response until a publish"),
        (status = 401, description = "Unauthorized"),
    ),
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn longpoll(HeaderChannel(channel): HeaderChannel) -> WebResult<impl IntoResponse> {
    debug!("Long-poll hold on channel {channel}");

    Ok((
        StatusCode::OK,
        [
            (GRIP_HOLD, HeaderValue::from_static(Hold::Response.as_str())),
            (GRIP_CHANNEL, channel_header(&channel)?),
        ],
    ))
}
