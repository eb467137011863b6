use serde::{Deserialize, Serialize};
use tracing_subscriber::{
    fmt, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

pub const DEFAULT_LOG_LEVEL: &str = "INFO";

#[derive(Debug, Deserialize, PartialEq, Clone, Serialize)]
pub struct LoggingConfig {
    pub log_level: String,
}

impl LoggingConfig {
    pub fn get_log_env(&self) -> EnvFilter {
        socialgraph::core::utils::logging::get_log_env(self.log_level.clone())
    }

    /// Installs the global subscriber. Logs go to stderr, stdout is reserved for command output.
    pub fn init(&self) {
        Registry::default()
            .with(self.get_log_env())
            .with(
                fmt::layer()
                    .pretty()
                    .with_span_events(FmtSpan::NONE)
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .ok();
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
