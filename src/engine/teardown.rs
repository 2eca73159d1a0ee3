use std::sync::Arc;

use futures::future::join_all;
use tracing::debug;
use tracing::warn;

use crate::alias::CEOF;
use crate::identity::QueryIdentity;
use crate::metrics;
use crate::CacheEngine;
use crate::QueryStatus;
use crate::Result;
use crate::SyncError;
use crate::TeardownError;
use crate::TypeConfig;
use crate::WatcherPool;

/// Which underlying cache entries a teardown resets.
///
/// Watcher destruction is unconditional either way; the filter only selects
/// the cache entries to reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeardownFilter {
    /// Reset only currently-erroring queries.
    Error,
    /// Reset everything.
    All,
}

impl TeardownFilter {
    fn matches(
        &self,
        status: QueryStatus,
    ) -> bool {
        match self {
            TeardownFilter::All => true,
            TeardownFilter::Error => status.is_error(),
        }
    }

    fn as_label(&self) -> &'static str {
        match self {
            TeardownFilter::All => "all",
            TeardownFilter::Error => "error",
        }
    }
}

/// Destroys pooled watchers and selectively resets underlying cache entries.
pub struct TeardownController<T>
where
    T: TypeConfig,
{
    pub(crate) cache_engine: Arc<CEOF<T>>,
    pub(crate) pool: Arc<WatcherPool<T>>,
}

impl<T> TeardownController<T>
where
    T: TypeConfig,
{
    pub(crate) fn new(
        cache_engine: Arc<CEOF<T>>,
        pool: Arc<WatcherPool<T>>,
    ) -> Self {
        Self { cache_engine, pool }
    }

    /// Destroy every pooled watcher, then reset the cache entries matching
    /// `filter`. The registry is left untouched, so a later registration
    /// for a known identity re-creates a watcher from its inherited
    /// configuration alone.
    ///
    /// Full pool destruction even under [`TeardownFilter::Error`] is
    /// intentional: every subsequent access goes through watcher re-creation
    /// and, when requested, the suspend-on-create path, giving callers a
    /// clean resynchronization point after partial failure.
    pub async fn clear_cache(
        &self,
        filter: TeardownFilter,
    ) -> Result<()> {
        // Step 1: capture underlying state before destruction
        let snapshots = self.pool.snapshots();
        let targets: Vec<QueryIdentity> = snapshots
            .into_iter()
            .filter(|(_, snapshot)| filter.matches(snapshot.status))
            .map(|(identity, _)| identity)
            .collect();

        // Step 2: watcher destruction is unconditional
        let destroyed = self.pool.destroy_all();
        debug!(
            "teardown ({}): destroyed {} watchers, resetting {} cache entries",
            filter.as_label(),
            destroyed,
            targets.len()
        );

        // Step 3: batch-reset the filtered entries, all parallel, all awaited
        let total = targets.len();
        let results = join_all(targets.into_iter().map(|identity| self.cache_engine.reset(identity))).await;
        metrics::CACHE_RESETS_TOTAL
            .with_label_values(&[filter.as_label()])
            .inc_by(total as u64);

        let failures: Vec<String> = results
            .into_iter()
            .filter_map(|r| r.err())
            .map(|e| e.to_string())
            .collect();
        if let Some(first_cause) = failures.first() {
            warn!("teardown: {} of {} resets failed: {}", failures.len(), total, first_cause);
            return Err(SyncError::Teardown(TeardownError {
                total,
                failed: failures.len(),
                first_cause: first_cause.clone(),
            })
            .into());
        }
        Ok(())
    }
}
