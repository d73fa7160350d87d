//! Proxy control endpoint descriptors and the resolvers that supply them.

use std::path::PathBuf;

use async_trait::async_trait;
use log::*;
use reqwest::Url;
use secrecy::SecretString;
use serde::Deserialize;

use crate::auth::ControlAuth;
use crate::error::{endpoint_error, EndpointErrorKind, Error};

/// One proxy control API the publisher fans out to.
#[derive(Debug, Clone)]
pub struct ControlEndpoint {
    control_uri: Url,
    auth: Option<ControlAuth>,
}

impl ControlEndpoint {
    /// Parses `control_uri`, which must be an absolute http(s) URL.
    pub fn parse(control_uri: &str) -> Result<Self, Error> {
        let url = Url::parse(control_uri).map_err(|err| Error {
            source: Some(Box::new(err)),
            error_kind: crate::ErrorKind::Endpoint(EndpointErrorKind::Invalid),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(endpoint_error(
                EndpointErrorKind::Invalid,
                &format!("unsupported control URI scheme: {control_uri}"),
            ));
        }

        Ok(Self {
            control_uri: url,
            auth: None,
        })
    }

    pub fn with_auth(mut self, auth: ControlAuth) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn control_uri(&self) -> &Url {
        &self.control_uri
    }

    pub fn auth(&self) -> Option<&ControlAuth> {
        self.auth.as_ref()
    }

    /// The publish resource of this endpoint's control API.
    pub fn publish_url(&self) -> String {
        format!(
            "{}/publish/",
            self.control_uri.as_str().trim_end_matches('/')
        )
    }
}

/// Supplies the current set of control endpoints. Called once per publish.
#[async_trait]
pub trait EndpointResolver: Send + Sync {
    async fn resolve(&self) -> Result<Vec<ControlEndpoint>, Error>;
}

/// Fixed endpoint list, set at start-up.
pub struct StaticResolver {
    endpoints: Vec<ControlEndpoint>,
}

impl StaticResolver {
    pub fn new(endpoints: Vec<ControlEndpoint>) -> Self {
        Self { endpoints }
    }
}

#[async_trait]
impl EndpointResolver for StaticResolver {
    async fn resolve(&self) -> Result<Vec<ControlEndpoint>, Error> {
        Ok(self.endpoints.clone())
    }
}

/// Entry of an endpoints file.
#[derive(Debug, Deserialize)]
struct EndpointEntry {
    control_uri: String,
    control_iss: Option<String>,
    key: Option<SecretString>,
}

/// Reads a JSON array of endpoint entries from disk on every call, so the
/// proxy fleet can change without restarting the relay.
///
/// ```json
/// [
///   {"control_uri": "http://localhost:5561"},
///   {"control_uri": "http://pushpin-2:5561", "control_iss": "relay", "key": "changeme"}
/// ]
/// ```
pub struct FileResolver {
    path: PathBuf,
}

impl FileResolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EndpointResolver for FileResolver {
    async fn resolve(&self) -> Result<Vec<ControlEndpoint>, Error> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|err| {
            warn!("Failed to read endpoints file {}: {err}", self.path.display());
            Error::from(err)
        })?;

        let entries: Vec<EndpointEntry> = serde_json::from_str(&raw).map_err(|err| {
            warn!("Malformed endpoints file {}: {err}", self.path.display());
            Error {
                source: Some(Box::new(err)),
                error_kind: crate::ErrorKind::Endpoint(EndpointErrorKind::Invalid),
            }
        })?;

        entries
            .into_iter()
            .map(|entry| {
                let endpoint = ControlEndpoint::parse(&entry.control_uri)?;
                Ok(match (entry.control_iss, entry.key) {
                    (Some(iss), Some(key)) => endpoint.with_auth(ControlAuth::new(iss, key)),
                    _ => endpoint,
                })
            })
            .collect()
    }
}
