//! GRIP (Generic Realtime Intermediary Protocol) plumbing for talking to a
//! realtime proxy such as Pushpin.
//!
//! The proxy owns every long-lived connection. This crate only produces the
//! strings the proxy understands and ships publishes to its control API.
//!
//! # Architecture
//!
//! - **Control messages**: WebSocket frames addressed to the proxy itself
//!   (e.g. "subscribe this connection to channel X"), prefixed with `c:`.
//! - **Publish items**: one item per publish, carrying one format per
//!   transport (`http-stream`, `http-response`, `ws-message`).
//! - **Endpoints**: proxy control URIs are obtained from an
//!   [`endpoint::EndpointResolver`] on every publish, so membership can change
//!   at runtime.
//! - **Publisher**: a single pooled HTTP client fans each item out to every
//!   resolved endpoint concurrently.
//!
//! # Example: publishing to SSE subscribers
//!
//! ```rust,ignore
//! use grip::{framing, format::Item, publisher::Publisher};
//!
//! let item = Item::http_stream("room42", framing::sse_event(b"hello"));
//! app_state.publisher.publish(item).await?;
//! ```
//!
//! # Modules
//!
//! - `auth`: HS256 control-API tokens
//! - `control`: WebSocket control messages and GRIP header names
//! - `endpoint`: control endpoint descriptors and resolvers
//! - `format`: publish items and their per-transport formats
//! - `framing`: transport-specific payload framing
//! - `publisher`: the `Publisher` trait and its HTTP implementation

pub mod auth;
pub mod control;
pub mod endpoint;
pub mod error;
pub mod format;
pub mod framing;
pub mod publisher;

pub use error::{Error, ErrorKind};
pub use publisher::{GripPublisher, Publisher};
