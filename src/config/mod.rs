//! Configuration management module for the synchronization engine.
//!
//! Provides hierarchical configuration loading from multiple sources with priority:
//! 1. Default values (hardcoded)
//! 2. Base config file
//! 3. Caller-supplied config file
//! 4. Local overrides
//! 5. Environment variables (highest priority)
//!

mod engine;
mod monitoring;
pub use engine::*;
pub use monitoring::*;


use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::constants::CONFIG_BASE_PATH;
use crate::constants::CONFIG_LOCAL_PATH;
use crate::constants::ENV_VAR_PREFIX;
use crate::Result;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SyncConfig {
    /// Core synchronization parameters
    #[serde(default)]
    pub engine: EngineConfig,
    /// Metrics and monitoring settings
    #[serde(default)]
    pub monitoring: MonitoringConfig,
}

impl SyncConfig {
    /// Load configuration from multiple sources with priority:
    /// 1. Base config file
    /// 2. Caller-supplied config file
    /// 3. Local overrides
    /// 4. Environment variables
    ///
    /// # Arguments
    /// * `custom_path` - Optional path to a caller-supplied configuration file
    ///
    /// # Returns
    /// Merged configuration with proper priority ordering
    pub fn load(custom_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        // 1. Base config, optional so a bare environment still works
        builder = builder.add_source(File::with_name(CONFIG_BASE_PATH).required(false));

        // 2. Caller-supplied config
        if let Some(path) = custom_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // 3. Local overrides
        builder = builder.add_source(File::with_name(CONFIG_LOCAL_PATH).required(false));

        // 4. Environment variables (highest priority)
        builder = builder.add_source(
            Environment::with_prefix(ENV_VAR_PREFIX)
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        let settings: SyncConfig = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        self.monitoring.validate()
    }
}
