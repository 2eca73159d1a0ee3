use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use autometrics::autometrics;
use tracing::debug;

use crate::Error;
use crate::QueryResult;
use crate::RefetchController;
use crate::Result;
use crate::SyncConfig;
use crate::SyncEngine;
use crate::SyncOptions;
use crate::SyncOutcome;
use crate::TeardownController;
use crate::TeardownFilter;
use crate::TypeConfig;
use crate::API_SLO;

pub struct QueryProvider<T>
where
    T: TypeConfig,
{
    pub(crate) sync: SyncEngine<T>,
    pub(crate) refetch: RefetchController<T>,
    pub(crate) teardown: TeardownController<T>,

    pub settings: Arc<SyncConfig>,
    mounted: AtomicBool,
}

impl<T> std::fmt::Debug for QueryProvider<T>
where
    T: TypeConfig,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryProvider")
            .field("settings", &self.settings)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

impl<T> QueryProvider<T>
where
    T: TypeConfig,
{
    pub(crate) fn new(
        sync: SyncEngine<T>,
        refetch: RefetchController<T>,
        teardown: TeardownController<T>,
        settings: Arc<SyncConfig>,
    ) -> Self {
        Self {
            sync,
            refetch,
            teardown,
            settings,
            mounted: AtomicBool::new(true),
        }
    }

    /// One synchronization pass with the configured default options.
    #[autometrics(objective = API_SLO)]
    pub fn get_query_result(
        &self,
        results: &[QueryResult<T>],
    ) -> Result<SyncOutcome<T>> {
        let options = SyncOptions {
            suspend_on_create: self.settings.engine.suspend_on_create,
        };
        self.get_query_result_with(results, &options)
    }

    /// One synchronization pass with explicit per-call options.
    pub fn get_query_result_with(
        &self,
        results: &[QueryResult<T>],
        options: &SyncOptions,
    ) -> Result<SyncOutcome<T>> {
        self.ensure_mounted()?;
        self.sync.get_query_result(results, options)
    }

    /// Refetch every registered query, delivering one consolidated
    /// notification. See [`RefetchController::refetch_queries`] for the
    /// dependent-query caveat.
    #[autometrics(objective = API_SLO)]
    pub async fn refetch_queries(&self) -> Result<()> {
        self.ensure_mounted()?;
        self.refetch.refetch_queries().await
    }

    /// Destroy every watcher and reset the matching cache entries.
    #[autometrics(objective = API_SLO)]
    pub async fn clear_cache(
        &self,
        filter: TeardownFilter,
    ) -> Result<()> {
        self.ensure_mounted()?;
        self.teardown.clear_cache(filter).await
    }

    /// Release everything this provider holds: destroy pooled watchers,
    /// drop in-flight completion signals, refuse further calls.
    ///
    /// In-flight refetches are not cancelled; they run to completion
    /// against the emptied, inert pool.
    pub fn unmount(&self) {
        if self.mounted.swap(false, Ordering::SeqCst) {
            debug!("unmounting query provider");
            self.sync.pool.destroy_all();
            self.sync.coalescer.clear();
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.load(Ordering::Acquire)
    }

    fn ensure_mounted(&self) -> Result<()> {
        if !self.is_mounted() {
            return Err(Error::Fatal("query provider used after unmount".to_string()));
        }
        Ok(())
    }
}

impl<T> Drop for QueryProvider<T>
where
    T: TypeConfig,
{
    fn drop(&mut self) {
        self.unmount();
    }
}
