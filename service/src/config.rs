use clap::builder::TypedValueParser as _;
use clap::Parser;
use dotenvy::dotenv;
use grip::auth::ControlAuth;
use log::LevelFilter;
use secrecy::SecretString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Channel used whenever a request does not name one.
pub const DEFAULT_CHANNEL: &str = "default-channel";

/// Proxy control endpoints of the reference local deployment.
const DEFAULT_GRIP_CONTROL_URIS: &str = "http://localhost:5561,http://localhost:5560";

#[derive(Clone, Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// The host interface to listen for incoming connections
    #[arg(short, long, env, default_value = "0.0.0.0")]
    pub interface: String,

    /// The host TCP port to listen for incoming connections
    #[arg(short, long, env, default_value_t = 8000)]
    pub port: u16,

    /// Set the log level verbosity threshold (level) to control what gets displayed on console output
    #[arg(
        short,
        long,
        env,
        default_value_t = LevelFilter::Info,
        value_parser = clap::builder::PossibleValuesParser::new(["OFF", "ERROR", "WARN", "INFO", "DEBUG", "TRACE"])
            .map(|s| s.parse::<LevelFilter>().unwrap()),
        )]
    pub log_level_filter: LevelFilter,

    /// The bearer credential clients must present as `Authorization: Bearer <token>`.
    #[arg(long, env, default_value = "1234")]
    auth_token: String,

    /// Channel name applied when a request does not specify one.
    #[arg(long, env, default_value = DEFAULT_CHANNEL)]
    default_channel: String,

    /// Require the bearer credential on WebSocket subscribe requests as well.
    #[arg(long, env, default_value_t = false)]
    pub websocket_requires_auth: bool,

    /// A list of GRIP proxy control URIs that every publish fans out to.
    #[arg(
        long,
        env,
        value_delimiter = ',',
        use_value_delimiter = true,
        default_value = DEFAULT_GRIP_CONTROL_URIS
    )]
    pub grip_control_uris: Vec<String>,

    /// JWT issuer used to authorize against the proxy control API.
    #[arg(long, env)]
    grip_control_iss: Option<String>,

    /// Shared HS256 key used to sign control API tokens.
    #[arg(long, env)]
    grip_control_key: Option<String>,

    /// A JSON file listing control endpoints. When set it replaces
    /// `grip_control_uris` and is re-read on every publish.
    #[arg(long, env)]
    grip_endpoints_file: Option<PathBuf>,

    /// Timeout in seconds for each request to a proxy control endpoint
    #[arg(long, env, default_value_t = 10)]
    pub publish_timeout_secs: u64,

    /// Largest accepted `/publish` request body, in bytes
    #[arg(long, env, default_value_t = 2 * 1024 * 1024)]
    pub max_publish_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        // Load .env file first
        dotenv().ok();
        // Then parse the command line parameters and flags
        Config::parse()
    }

    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// The exact `Authorization` header value that authorizes a request.
    pub fn expected_authorization(&self) -> String {
        format!("Bearer {}", self.auth_token)
    }

    pub fn default_channel(&self) -> &str {
        &self.default_channel
    }

    /// Control API credentials, present only when both issuer and key are set.
    pub fn grip_control_auth(&self) -> Option<ControlAuth> {
        match (&self.grip_control_iss, &self.grip_control_key) {
            (Some(iss), Some(key)) => Some(ControlAuth::new(
                iss.clone(),
                SecretString::from(key.clone()),
            )),
            _ => None,
        }
    }

    pub fn grip_endpoints_file(&self) -> Option<&Path> {
        self.grip_endpoints_file.as_deref()
    }

    pub fn publish_timeout(&self) -> Duration {
        Duration::from_secs(self.publish_timeout_secs)
    }
}
