//! WebSocket control messages and the GRIP header vocabulary.

use serde::Serialize;

use crate::error::Error;

/// Prefix marking a WebSocket text frame as addressed to the proxy.
pub const CONTROL_PREFIX: &str = "c:";

/// Response header telling the proxy to hold the response open.
pub const GRIP_HOLD: &str = "Grip-Hold";

/// Response header naming the channel a held response is bound to.
pub const GRIP_CHANNEL: &str = "Grip-Channel";

/// Extension negotiated on upgrade so the proxy intercepts control frames.
/// An empty message prefix means every other frame passes through untouched.
pub const GRIP_WEBSOCKET_EXTENSION: &str = "grip; message-prefix=\"\"";

/// How the proxy should hold an HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hold {
    /// Keep the response open and append every publish to it.
    Stream,
    /// Keep the response pending until a single publish completes it.
    Response,
}

impl Hold {
    pub fn as_str(&self) -> &'static str {
        match self {
            Hold::Stream => "stream",
            Hold::Response => "response",
        }
    }
}

/// A message addressed to the proxy over a GRIP WebSocket.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ControlMessage {
    Subscribe { channel: String },
}

impl ControlMessage {
    pub fn subscribe(channel: impl Into<String>) -> Self {
        ControlMessage::Subscribe {
            channel: channel.into(),
        }
    }

    /// Serializes the message into a complete text frame, prefix included.
    pub fn to_frame(&self) -> Result<String, Error> {
        let body = serde_json::to_string(self)?;
        Ok(format!("{CONTROL_PREFIX}{body}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    #[test]
    fn test_subscribe_frame_is_prefixed_json() {
        let frame = ControlMessage::subscribe("room42").to_frame().unwrap();

        let body = frame
            .strip_prefix(CONTROL_PREFIX)
            .expect("frame should start with the control prefix");
        let value: Value = serde_json::from_str(body).unwrap();
        assert_eq!(value, json!({"type": "subscribe", "channel": "room42"}));
    }

    #[test]
    fn test_subscribe_frame_escapes_channel() {
        let frame = ControlMessage::subscribe("a\"b").to_frame().unwrap();
        let value: Value = serde_json::from_str(&frame[CONTROL_PREFIX.len()..]).unwrap();
        assert_eq!(value["channel"], "a\"b");
    }

    #[test]
    fn test_hold_values() {
        assert_eq!(Hold::Stream.as_str(), "stream");
        assert_eq!(Hold::Response.as_str(), "response");
    }
}
