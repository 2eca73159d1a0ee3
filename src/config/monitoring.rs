use config::ConfigError;
use serde::Deserialize;
use serde::Serialize;

use crate::constants::DEFAULT_METRICS_NAMESPACE;
use crate::Result;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct MonitoringConfig {
    #[serde(default = "default_metrics_enabled")]
    pub metrics_enabled: bool,

    /// Namespace applied to registries built for exporters.
    #[serde(default = "default_metrics_namespace")]
    pub metrics_namespace: String,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            metrics_enabled: default_metrics_enabled(),
            metrics_namespace: default_metrics_namespace(),
        }
    }
}

impl MonitoringConfig {
    /// Validates monitoring configuration
    /// # Errors
    /// Returns a configuration error when metrics are enabled with an
    /// empty namespace
    pub fn validate(&self) -> Result<()> {
        if self.metrics_enabled && self.metrics_namespace.trim().is_empty() {
            return Err(ConfigError::Message(
                "metrics_namespace cannot be empty when metrics are enabled".to_string(),
            )
            .into());
        }
        Ok(())
    }
}

fn default_metrics_enabled() -> bool {
    true
}

fn default_metrics_namespace() -> String {
    DEFAULT_METRICS_NAMESPACE.to_string()
}
