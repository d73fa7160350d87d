use config::Config;
use grip::endpoint::{ControlEndpoint, EndpointResolver, FileResolver, StaticResolver};
use grip::publisher::{GripPublisher, PublisherConfig};
use grip::Publisher;
use log::info;
use std::sync::Arc;

pub mod config;
pub mod logging;

/// Builds the endpoint resolver described by the config: the endpoints file
/// when one is given, otherwise the static control URI list.
pub fn init_resolver(config: &Config) -> Result<Arc<dyn EndpointResolver>, grip::Error> {
    if let Some(path) = config.grip_endpoints_file() {
        info!("Resolving GRIP control endpoints from {}", path.display());
        return Ok(Arc::new(FileResolver::new(path)));
    }

    let auth = config.grip_control_auth();
    let endpoints = config
        .grip_control_uris
        .iter()
        .map(|uri| {
            let endpoint = ControlEndpoint::parse(uri)?;
            Ok(match &auth {
                Some(auth) => endpoint.with_auth(auth.clone()),
                None => endpoint,
            })
        })
        .collect::<Result<Vec<_>, grip::Error>>()?;

    info!(
        "GRIP control endpoints: [{}] (control auth {})",
        config.grip_control_uris.join(", "),
        if auth.is_some() { "enabled" } else { "disabled" }
    );

    Ok(Arc::new(StaticResolver::new(endpoints)))
}

/// Builds the process-wide publisher. Its HTTP connection pool is shared by
/// every publish request.
pub fn init_publisher(config: &Config) -> Result<Arc<dyn Publisher>, grip::Error> {
    let resolver = init_resolver(config)?;
    let publisher = GripPublisher::new(
        resolver,
        PublisherConfig {
            timeout: config.publish_timeout(),
            ..Default::default()
        },
    )?;

    Ok(Arc::new(publisher))
}

// Service-level state shared by every handler.
// Needs to implement Clone to be able to be passed into Router as State
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub publisher: Arc<dyn Publisher>,
}

impl AppState {
    pub fn new(app_config: Config, publisher: &Arc<dyn Publisher>) -> Self {
        Self {
            config: app_config,
            publisher: Arc::clone(publisher),
        }
    }

    pub fn publisher_ref(&self) -> &dyn Publisher {
        self.publisher.as_ref()
    }
}
