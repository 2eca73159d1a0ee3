//! A builder pattern implementation for constructing a [`QueryProvider`].
//!
//! ## Key Design Points
//! - **Per-instance state**: every `build()` assembles a fresh Registry,
//!   Watcher Pool and Completion Coalescer; providers never share them.
//! - **Validation first**: settings are validated before anything is
//!   assembled, and a missing cache engine is a usage error.

use std::sync::Arc;

use tracing::debug;

use crate::alias::CEOF;
use crate::metrics;
use crate::CompletionCoalescer;
use crate::Error;
use crate::QueryProvider;
use crate::QueryRegistry;
use crate::RefetchController;
use crate::Result;
use crate::SyncConfig;
use crate::SyncEngine;
use crate::TeardownController;
use crate::TypeConfig;
use crate::WatcherPool;

pub struct ProviderBuilder<T>
where
    T: TypeConfig,
{
    settings: Option<SyncConfig>,
    cache_engine: Option<Arc<CEOF<T>>>,
}

impl<T: TypeConfig> Default for ProviderBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ProviderBuilder<T>
where
    T: TypeConfig,
{
    pub fn new() -> Self {
        Self {
            settings: None,
            cache_engine: None,
        }
    }

    pub fn settings(
        mut self,
        settings: SyncConfig,
    ) -> Self {
        self.settings = Some(settings);
        self
    }

    pub fn cache_engine(
        mut self,
        cache_engine: Arc<CEOF<T>>,
    ) -> Self {
        self.cache_engine = Some(cache_engine);
        self
    }

    pub fn build(self) -> Result<QueryProvider<T>> {
        let settings = self.settings.unwrap_or_default();
        settings.validate()?;
        let settings = Arc::new(settings);

        let cache_engine = self
            .cache_engine
            .ok_or_else(|| Error::Fatal("cache engine must be supplied before build".to_string()))?;

        if settings.monitoring.metrics_enabled {
            metrics::init_metrics();
        }

        let registry = Arc::new(QueryRegistry::new());
        let pool = Arc::new(WatcherPool::new());
        let coalescer = Arc::new(CompletionCoalescer::new());

        let sync = SyncEngine::new(
            cache_engine.clone(),
            registry.clone(),
            pool.clone(),
            coalescer,
        );
        let refetch = RefetchController::new(cache_engine.clone(), registry);
        let teardown = TeardownController::new(cache_engine, pool);

        debug!("query provider assembled");
        Ok(QueryProvider::new(sync, refetch, teardown, settings))
    }
}
