use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;
use tracing::warn;

use crate::alias::CEOF;
use crate::metrics;
use crate::CacheEngine;
use crate::QueryRegistry;
use crate::RefetchError;
use crate::Result;
use crate::SyncError;
use crate::TypeConfig;

/// Forces a refetch of every registered query while the engine's per-query
/// notifications are suppressed, then releases one consolidated update.
pub struct RefetchController<T>
where
    T: TypeConfig,
{
    pub(crate) cache_engine: Arc<CEOF<T>>,
    pub(crate) registry: Arc<QueryRegistry<T>>,
}

impl<T> RefetchController<T>
where
    T: TypeConfig,
{
    pub(crate) fn new(
        cache_engine: Arc<CEOF<T>>,
        registry: Arc<QueryRegistry<T>>,
    ) -> Self {
        Self { cache_engine, registry }
    }

    /// Refetch every identity in the registry, all in parallel, all awaited.
    ///
    /// An individual failure never aborts its siblings; the first failure is
    /// propagated once the whole round settled. Re-enabling notifications is
    /// the point at which subscribers receive exactly one consolidated
    /// update, and happens on the failure path too.
    ///
    /// Known limitation, inherited by design: a dependent query whose
    /// identity changes as a result of a sibling refetch completing may race
    /// against stale configuration. The registry's identity list is read
    /// once and refetched blindly in parallel.
    pub async fn refetch_queries(&self) -> Result<()> {
        let identities = self.registry.identities();
        let total = identities.len();
        debug!("batch refetch of {} registered queries", total);

        self.cache_engine.set_notifications_enabled(false);
        let results = join_all(identities.into_iter().map(|identity| self.cache_engine.refetch(identity))).await;
        self.cache_engine.set_notifications_enabled(true);

        metrics::REFETCH_ROUNDS_TOTAL.inc();

        let failures: Vec<String> = results
            .into_iter()
            .filter_map(|r| r.err())
            .map(|e| e.to_string())
            .collect();
        if let Some(first_cause) = failures.first() {
            warn!("batch refetch: {} of {} queries failed: {}", failures.len(), total, first_cause);
            return Err(SyncError::Refetch(RefetchError {
                total,
                failed: failures.len(),
                first_cause: first_cause.clone(),
            })
            .into());
        }
        Ok(())
    }
}
