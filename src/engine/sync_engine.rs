//! The orchestration algorithm behind `get_query_result`: register every
//! input result, decide between suspend, fault and ready over the whole
//! watcher pool, and keep repeated passes idempotent and cheap.

use std::sync::Arc;

use tracing::debug;
use tracing::trace;

use crate::alias::CEOF;
use crate::constants::UNSPECIFIED_FAULT;
use crate::identity::QuerySetKey;
use crate::metrics;
use crate::CompletionCoalescer;
use crate::QueryFault;
use crate::QueryRegistry;
use crate::QueryResult;
use crate::QueryWatcher;
use crate::Result;
use crate::SyncOptions;
use crate::SyncOutcome;
use crate::TypeConfig;
use crate::WatcherPool;

pub struct SyncEngine<T>
where
    T: TypeConfig,
{
    pub(crate) cache_engine: Arc<CEOF<T>>,
    pub(crate) registry: Arc<QueryRegistry<T>>,
    pub(crate) pool: Arc<WatcherPool<T>>,
    pub(crate) coalescer: Arc<CompletionCoalescer<T>>,
}

impl<T> SyncEngine<T>
where
    T: TypeConfig,
{
    pub(crate) fn new(
        cache_engine: Arc<CEOF<T>>,
        registry: Arc<QueryRegistry<T>>,
        pool: Arc<WatcherPool<T>>,
        coalescer: Arc<CompletionCoalescer<T>>,
    ) -> Self {
        Self {
            cache_engine,
            registry,
            pool,
            coalescer,
        }
    }

    /// One synchronization pass over the caller's query results.
    ///
    /// The host re-invokes the entire pass after a `Pending` outcome
    /// settles, so registration is idempotent: watchers and descriptors are
    /// reused, never duplicated.
    pub fn get_query_result(
        &self,
        results: &[QueryResult<T>],
        options: &SyncOptions,
    ) -> Result<SyncOutcome<T>> {
        // Step 1: register every input in order, pooling watchers lazily
        let mut input_watchers = Vec::with_capacity(results.len());
        let mut created_any = false;
        for result in results {
            let descriptor = self
                .registry
                .upsert(&self.cache_engine, &result.identity, result.fetch_config.clone());
            let (watcher, created) = self.pool.get_or_create(&self.cache_engine, &descriptor)?;
            created_any |= created;
            input_watchers.push(watcher);
        }

        // Step 2 + 3: readiness is decided over every pooled watcher, not
        // just this call's input set
        let suspend_for_create = options.suspend_on_create && created_any;
        if suspend_for_create || self.pool.any_pending() {
            let key = QuerySetKey::from_identities(results.iter().map(|r| &r.identity));
            let reason = if suspend_for_create { "created" } else { "pending" };
            debug!("suspending ({}) on query set {}", reason, key);
            metrics::SUSPENSIONS_TOTAL.with_label_values(&[reason]).inc();
            let signal = self.coalescer.acquire(key, &input_watchers);
            return Ok(SyncOutcome::Pending(signal));
        }

        // Step 4a: watcher-derived errors take precedence, first match wins
        for (result, watcher) in results.iter().zip(&input_watchers) {
            let snapshot = watcher.snapshot();
            if snapshot.status.is_error() {
                let fault = snapshot
                    .error
                    .unwrap_or_else(|| QueryFault::new(result.identity.clone(), UNSPECIFIED_FAULT));
                debug!("surfacing watcher fault for {}", result.identity);
                metrics::QUERY_FAULTS_TOTAL.with_label_values(&["watcher"]).inc();
                return Ok(SyncOutcome::Faulted(fault));
            }
        }

        // Step 4b: then the caller's own result views
        for result in results {
            if result.status.is_error() || result.error.is_some() {
                let fault = result
                    .error
                    .clone()
                    .unwrap_or_else(|| QueryFault::new(result.identity.clone(), UNSPECIFIED_FAULT));
                debug!("surfacing result fault for {}", result.identity);
                metrics::QUERY_FAULTS_TOTAL.with_label_values(&["result"]).inc();
                return Ok(SyncOutcome::Faulted(fault));
            }
        }

        // Step 5: all settled successfully; data in input order
        trace!("query set ready with {} results", results.len());
        Ok(SyncOutcome::Ready(results.iter().map(|r| r.data.clone()).collect()))
    }
}
