use crate::config::Config;
use log::{LevelFilter, SetLoggerError};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Dependencies that log on every request or connection. Silenced unless the
/// configured level is Trace.
const FILTERED_MODULES: &[&str] = &["hyper", "reqwest", "tower", "axum", "tungstenite", "rustls"];

pub struct Logger {}

impl Logger {
    /// Installs the global terminal logger at the configured level.
    pub fn init_logger(config: &Config) -> Result<(), SetLoggerError> {
        TermLogger::init(
            config.log_level_filter,
            Self::build_log_config(config.log_level_filter),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        )
    }

    fn build_log_config(level: LevelFilter) -> simplelog::Config {
        let mut builder = ConfigBuilder::new();
        builder.set_time_format_rfc3339();
        // Module path tells which layer (web, grip) a line came from
        builder.set_target_level(LevelFilter::Error);

        if level != LevelFilter::Trace {
            for module in FILTERED_MODULES {
                builder.add_filter_ignore_str(module);
            }
        }

        builder.build()
    }
}
