use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use log::*;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{AppState, Error};

/// Header naming the channel on SSE, long-poll and publish requests.
pub(crate) const X_CHANNEL_NAME: &str = "X-Channel-Name";

/// Channel taken from the `X-Channel-Name` header, falling back to the
/// configured default when the header is missing or empty.
pub(crate) struct HeaderChannel(pub String);

impl FromRequestParts<AppState> for HeaderChannel {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let channel = match parts.headers.get(X_CHANNEL_NAME) {
            Some(value) => value.to_str().map_err(|_| {
                warn!("Non-ASCII {X_CHANNEL_NAME} header rejected");
                Error::InvalidChannel
            })?,
            None => "",
        };

        Ok(HeaderChannel(or_default(channel, state)))
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ChannelParams {
    /// Channel to subscribe to. Defaults to the configured default channel.
    pub channel: Option<String>,
}

/// Channel taken from the first `channel` query parameter, with the same
/// default. Repeated parameters after the first are ignored.
pub(crate) struct QueryChannel(pub String);

impl FromRequestParts<AppState> for QueryChannel {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Query(pairs) =
            Query::<Vec<(String, String)>>::try_from_uri(&parts.uri).map_err(|err| {
                warn!("Malformed channel query parameter: {err}");
                Error::InvalidChannel
            })?;

        let channel = pairs
            .iter()
            .find(|(key, _)| key == "channel")
            .map(|(_, value)| value.as_str())
            .unwrap_or_default();

        Ok(QueryChannel(or_default(channel, state)))
    }
}

fn or_default(channel: &str, state: &AppState) -> String {
    if channel.is_empty() {
        state.config.default_channel().to_string()
    } else {
        channel.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::recording_state;
    use axum::http::Request;

    async fn header_channel(header: Option<&[u8]>) -> Result<String, Error> {
        let (state, _) = recording_state(&[]);
        let mut builder = Request::builder().uri("/sse");
        if let Some(value) = header {
            builder = builder.header(X_CHANNEL_NAME, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        HeaderChannel::from_request_parts(&mut parts, &state)
            .await
            .map(|HeaderChannel(channel)| channel)
    }

    async fn query_channel(uri: &str) -> String {
        let (state, _) = recording_state(&["--default-channel", "lobby"]);
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        let QueryChannel(channel) = QueryChannel::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        channel
    }

    #[tokio::test]
    async fn test_header_channel_defaults() {
        assert_eq!(header_channel(None).await.unwrap(), "default-channel");
        assert_eq!(header_channel(Some(b"")).await.unwrap(), "default-channel");
    }

    #[tokio::test]
    async fn test_header_channel_uses_header() {
        assert_eq!(header_channel(Some(b"room42")).await.unwrap(), "room42");
    }

    #[tokio::test]
    async fn test_header_channel_rejects_non_ascii() {
        let result = header_channel(Some(&[0x72, 0xe9])).await;
        assert!(matches!(result, Err(Error::InvalidChannel)));
    }

    #[tokio::test]
    async fn test_query_channel() {
        assert_eq!(query_channel("/websocket?channel=room42").await, "room42");
        assert_eq!(query_channel("/websocket?channel=a%20b").await, "a b");
        assert_eq!(query_channel("/websocket?channel=").await, "lobby");
        assert_eq!(query_channel("/websocket").await, "lobby");
    }

    #[tokio::test]
    async fn test_query_channel_takes_first_of_repeated() {
        assert_eq!(query_channel("/websocket?channel=a&channel=b").await, "a");
        assert_eq!(query_channel("/websocket?other=x&channel=b").await, "b");
        assert_eq!(query_channel("/websocket?channel=&channel=b").await, "lobby");
    }
}
