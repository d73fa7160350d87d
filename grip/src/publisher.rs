//! Publishing items to the proxy control API.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use log::*;
use serde::Serialize;

use crate::endpoint::{ControlEndpoint, EndpointResolver};
use crate::error::{endpoint_error, status_error, EndpointErrorKind, Error};
use crate::format::Item;

/// Anything that can push an item to every connection on its channel.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, item: Item) -> Result<(), Error>;
}

/// Shared HTTP client settings for the publisher.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Per-request timeout against a control endpoint.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: format!("grip-relay/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

#[derive(Serialize)]
struct PublishRequest<'a> {
    items: [&'a Item; 1],
}

/// Publishes over HTTP to every endpoint the resolver returns.
///
/// Holds one pooled `reqwest::Client`, so it is meant to be built once and
/// shared for the life of the process.
pub struct GripPublisher {
    client: reqwest::Client,
    resolver: Arc<dyn EndpointResolver>,
}

impl GripPublisher {
    pub fn new(resolver: Arc<dyn EndpointResolver>, config: PublisherConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(config.timeout)
            .user_agent(config.user_agent)
            .build()?;

        Ok(Self { client, resolver })
    }

    async fn publish_to(
        &self,
        endpoint: &ControlEndpoint,
        request: &PublishRequest<'_>,
    ) -> Result<(), Error> {
        let url = endpoint.publish_url();
        let mut builder = self.client.post(&url).json(request);
        if let Some(auth) = endpoint.auth() {
            builder = builder.bearer_auth(auth.token()?);
        }

        let response = builder.send().await.map_err(|err| {
            warn!("Failed to reach control endpoint {url}: {err}");
            Error::from(err)
        })?;

        let status = response.status();
        if status.is_success() {
            debug!("Published to {url}");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            warn!("Control endpoint {url} rejected publish: {status} - {body}");
            Err(status_error(status.as_u16(), &body))
        }
    }
}

#[async_trait]
impl Publisher for GripPublisher {
    async fn publish(&self, item: Item) -> Result<(), Error> {
        let endpoints = self.resolver.resolve().await?;
        if endpoints.is_empty() {
            return Err(endpoint_error(
                EndpointErrorKind::NoneConfigured,
                "no proxy control endpoints available",
            ));
        }

        debug!(
            "Publishing to channel {} via {} endpoint(s)",
            item.channel,
            endpoints.len()
        );

        let request = PublishRequest { items: [&item] };
        let results = join_all(
            endpoints
                .iter()
                .map(|endpoint| self.publish_to(endpoint, &request)),
        )
        .await;

        results.into_iter().collect::<Result<Vec<()>, Error>>()?;
        Ok(())
    }
}
