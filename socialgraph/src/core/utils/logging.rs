use tracing_subscriber::{
    fmt, fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Builds the log filter for `log_level`, letting `RUST_LOG` override it when set.
pub fn get_log_env(log_level: String) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

/// Installs a global subscriber at `log_level`. Does nothing if one is already installed.
pub fn init_logger(log_level: &str) {
    Registry::default()
        .with(get_log_env(log_level.to_string()))
        .with(fmt::layer().pretty().with_span_events(FmtSpan::NONE))
        .try_init()
        .ok();
}

pub fn global_info_logger() {
    init_logger("INFO")
}

pub fn global_debug_logger() {
    init_logger("DEBUG")
}
