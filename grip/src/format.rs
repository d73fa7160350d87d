//! Publish items and the per-transport formats the proxy delivers.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Raw payload carried by a format. Anything that is not valid UTF-8 goes over
/// the wire base64-encoded under the format's `-bin` key.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Text(String),
    Binary(Vec<u8>),
}

impl Payload {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        match String::from_utf8(bytes) {
            Ok(text) => Payload::Text(text),
            Err(err) => Payload::Binary(err.into_bytes()),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Payload::Text(text) => text.as_bytes(),
            Payload::Binary(bytes) => bytes,
        }
    }

    fn serialize_into<M: SerializeMap>(
        &self,
        map: &mut M,
        text_key: &'static str,
        bin_key: &'static str,
    ) -> Result<(), M::Error> {
        match self {
            Payload::Text(text) => map.serialize_entry(text_key, text),
            Payload::Binary(bytes) => map.serialize_entry(bin_key, &STANDARD.encode(bytes)),
        }
    }
}

/// Content appended to held `Grip-Hold: stream` responses.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpStreamFormat {
    pub content: Payload,
}

/// Body that completes held `Grip-Hold: response` responses.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponseFormat {
    pub body: Payload,
}

/// Message delivered to subscribed WebSocket connections.
#[derive(Debug, Clone, PartialEq)]
pub struct WsMessageFormat {
    pub content: Payload,
}

impl Serialize for HttpStreamFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        self.content
            .serialize_into(&mut map, "content", "content-bin")?;
        map.end()
    }
}

impl Serialize for HttpResponseFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        self.body.serialize_into(&mut map, "body", "body-bin")?;
        map.end()
    }
}

impl Serialize for WsMessageFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        self.content
            .serialize_into(&mut map, "content", "content-bin")?;
        map.end()
    }
}

/// The formats carried by one item, keyed by their GRIP format name.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Formats {
    #[serde(rename = "http-stream", skip_serializing_if = "Option::is_none")]
    pub http_stream: Option<HttpStreamFormat>,
    #[serde(rename = "http-response", skip_serializing_if = "Option::is_none")]
    pub http_response: Option<HttpResponseFormat>,
    #[serde(rename = "ws-message", skip_serializing_if = "Option::is_none")]
    pub ws_message: Option<WsMessageFormat>,
}

/// One publish instruction: push the given formats to every connection held
/// or subscribed on `channel`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Item {
    pub channel: String,
    pub formats: Formats,
}

impl Item {
    pub fn new(channel: impl Into<String>, formats: Formats) -> Self {
        Self {
            channel: channel.into(),
            formats,
        }
    }

    pub fn http_stream(channel: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::new(
            channel,
            Formats {
                http_stream: Some(HttpStreamFormat {
                    content: Payload::from_bytes(content.into()),
                }),
                ..Default::default()
            },
        )
    }

    pub fn http_response(channel: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new(
            channel,
            Formats {
                http_response: Some(HttpResponseFormat {
                    body: Payload::from_bytes(body.into()),
                }),
                ..Default::default()
            },
        )
    }

    pub fn ws_message(channel: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self::new(
            channel,
            Formats {
                ws_message: Some(WsMessageFormat {
                    content: Payload::from_bytes(content.into()),
                }),
                ..Default::default()
            },
        )
    }
}
