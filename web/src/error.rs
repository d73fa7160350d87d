use std::error::Error as StdError;
use std::fmt;

use axum::extract::rejection::BytesRejection;
use axum::extract::ws::rejection::WebSocketUpgradeRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::*;

pub type Result<T> = core::result::Result<T, Error>;

/// The transport a publish was formatted for, in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Sse,
    LongPoll,
    WebSocket,
}

impl fmt::Display for Transport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Transport::Sse => write!(f, "SSE"),
            Transport::LongPoll => write!(f, "long polling"),
            Transport::WebSocket => write!(f, "WebSocket"),
        }
    }
}

/// Every failure is terminal for the request that hit it.
#[derive(Debug)]
pub enum Error {
    Unauthorized,
    InvalidChannel,
    BodyRead(BytesRejection),
    Publish {
        transport: Transport,
        source: grip::Error,
    },
    ControlMessage(grip::Error),
    Upgrade(WebSocketUpgradeRejection),
    NotFound,
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::BodyRead(rejection) => Some(rejection),
            Error::Publish { source, .. } | Error::ControlMessage(source) => Some(source),
            Error::Upgrade(rejection) => Some(rejection),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Unauthorized => write!(f, "Unauthorized"),
            Error::InvalidChannel => write!(f, "Invalid channel name"),
            Error::BodyRead(_) => write!(f, "Error reading request body"),
            Error::Publish { transport, .. } => write!(f, "Failed to publish to {transport}"),
            Error::ControlMessage(_) => write!(f, "Failed to create control message"),
            Error::Upgrade(rejection) => write!(f, "{rejection}"),
            Error::NotFound => write!(f, "Not Found"),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()).into_response(),
            Error::InvalidChannel => (StatusCode::BAD_REQUEST, self.to_string()).into_response(),
            Error::BodyRead(ref rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                warn!("Rejected oversized publish body");
                (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response()
            }
            Error::BodyRead(ref rejection) => {
                warn!("Failed to read request body: {rejection}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
            Error::Publish {
                transport,
                ref source,
            } => {
                error!("Publish to {transport} failed: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
            Error::ControlMessage(ref source) => {
                error!("Failed to build WebSocket control message: {source}");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
            Error::Upgrade(rejection) => {
                warn!("WebSocket upgrade rejected: {rejection}");
                rejection.into_response()
            }
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()).into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grip::error::{ErrorKind, HttpErrorKind};

    fn grip_error() -> grip::Error {
        grip::Error {
            source: None,
            error_kind: ErrorKind::Http(HttpErrorKind::Network),
        }
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (Error::Unauthorized, StatusCode::UNAUTHORIZED),
            (Error::InvalidChannel, StatusCode::BAD_REQUEST),
            (Error::NotFound, StatusCode::NOT_FOUND),
            (Error::ControlMessage(grip_error()), StatusCode::INTERNAL_SERVER_ERROR),
            (
                Error::Publish {
                    transport: Transport::LongPoll,
                    source: grip_error(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(error.into_response().status(), status);
        }
    }

    #[test]
    fn test_publish_messages_name_the_transport() {
        for (transport, expected) in [
            (Transport::Sse, "Failed to publish to SSE"),
            (Transport::LongPoll, "Failed to publish to long polling"),
            (Transport::WebSocket, "Failed to publish to WebSocket"),
        ] {
            let error = Error::Publish {
                transport,
                source: grip_error(),
            };
            assert_eq!(error.to_string(), expected);
        }
    }
}
