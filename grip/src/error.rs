//! Error types for the `grip` crate.
//!
//! Follows the same pattern as the other layers: a root Error struct holding an
//! optional source and a tree of error kind enums.

use std::error::Error as StdError;
use std::fmt;

/// Top-level error type for the grip crate.
#[derive(Debug)]
pub struct Error {
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub error_kind: ErrorKind,
}

/// Major categories of errors in grip.
#[derive(Debug, PartialEq)]
pub enum ErrorKind {
    Message(MessageErrorKind),
    Endpoint(EndpointErrorKind),
    Auth,
    Http(HttpErrorKind),
}

/// Errors from building control messages or publish payloads.
#[derive(Debug, PartialEq)]
pub enum MessageErrorKind {
    Serialization,
}

/// Errors from resolving proxy control endpoints.
#[derive(Debug, PartialEq)]
pub enum EndpointErrorKind {
    NoneConfigured,
    Unreadable,
    Invalid,
}

/// Errors from talking to a proxy control endpoint.
#[derive(Debug, PartialEq)]
pub enum HttpErrorKind {
    BuilderFailed,
    Network,
    Status(u16),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.error_kind {
            ErrorKind::Message(kind) => write!(f, "Message error: {:?}", kind),
            ErrorKind::Endpoint(kind) => write!(f, "Endpoint error: {:?}", kind),
            ErrorKind::Auth => write!(f, "Control API auth error"),
            ErrorKind::Http(kind) => write!(f, "HTTP error: {:?}", kind),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn StdError + 'static))
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        // Builder errors happen before any network call is made.
        let error_kind = if err.is_builder() {
            ErrorKind::Http(HttpErrorKind::BuilderFailed)
        } else if let Some(status) = err.status() {
            ErrorKind::Http(HttpErrorKind::Status(status.as_u16()))
        } else {
            ErrorKind::Http(HttpErrorKind::Network)
        };

        Error {
            source: Some(Box::new(err)),
            error_kind,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Message(MessageErrorKind::Serialization),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for Error {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Auth,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error {
            source: Some(Box::new(err)),
            error_kind: ErrorKind::Endpoint(EndpointErrorKind::Unreadable),
        }
    }
}

/// Helper function to create endpoint errors.
pub fn endpoint_error(kind: EndpointErrorKind, message: &str) -> Error {
    Error {
        source: Some(message.to_string().into()),
        error_kind: ErrorKind::Endpoint(kind),
    }
}

/// Helper function to create errors for non-success control API responses.
pub fn status_error(status: u16, body: &str) -> Error {
    Error {
        source: Some(format!("control endpoint responded {status}: {body}").into()),
        error_kind: ErrorKind::Http(HttpErrorKind::Status(status)),
    }
}
