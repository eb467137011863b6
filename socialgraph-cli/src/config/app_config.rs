use crate::config::log_config::LoggingConfig;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use socialgraph::config::AnalyticsConfig;
use std::path::PathBuf;

#[derive(Debug, Default, Deserialize, PartialEq, Clone, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

pub struct AppConfigBuilder {
    logging: LoggingConfig,
    analytics: AnalyticsConfig,
}

impl From<AppConfig> for AppConfigBuilder {
    fn from(config: AppConfig) -> Self {
        Self {
            logging: config.logging,
            analytics: config.analytics,
        }
    }
}

impl Default for AppConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfig::default().into()
    }

    pub fn with_log_level(mut self, log_level: String) -> Self {
        self.logging.log_level = log_level;
        self
    }

    pub fn with_clustering_sample_cap(mut self, clustering_sample_cap: usize) -> Self {
        self.analytics.clustering_sample_cap = clustering_sample_cap;
        self
    }

    pub fn with_default_sample_size(mut self, default_sample_size: usize) -> Self {
        self.analytics.default_sample_size = default_sample_size;
        self
    }

    pub fn with_neighbor_list_cap(mut self, neighbor_list_cap: usize) -> Self {
        self.analytics.neighbor_list_cap = neighbor_list_cap;
        self
    }

    pub fn with_top_nodes(mut self, top_nodes: usize) -> Self {
        self.analytics.top_nodes = top_nodes;
        self
    }

    pub fn build(self) -> AppConfig {
        AppConfig {
            logging: self.logging,
            analytics: self.analytics,
        }
    }
}

// Order of precedence: config path >> app config >> defaults.
// Command line overrides are applied on top of the result by the caller.
pub fn load_config(
    app_config: Option<AppConfig>,
    config_path: Option<PathBuf>,
) -> Result<AppConfig, ConfigError> {
    let app_config = app_config.unwrap_or_default();
    let json =
        serde_json::to_string(&app_config).map_err(|err| ConfigError::Foreign(Box::new(err)))?;
    let mut builder = Config::builder().add_source(File::from_str(&json, FileFormat::Json));
    if let Some(config_path) = config_path {
        builder = builder.add_source(File::from(config_path));
    }
    builder.build()?.try_deserialize::<AppConfig>()
}
