use std::fmt::Debug;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;
use tracing::trace;

use crate::alias::CEOF;
use crate::alias::WOF;
use crate::identity::QueryIdentity;
use crate::metrics;
use crate::CacheEngine;
use crate::QueryDescriptor;
use crate::QuerySnapshot;
use crate::QueryWatcher;
use crate::Result;
use crate::TypeConfig;

/// Mapping from query identity to its live watcher.
///
/// At most one watcher exists per identity for the provider's lifetime.
/// Readiness decisions scan every pooled watcher, not just the identities of
/// the current call.
pub struct WatcherPool<T>
where
    T: TypeConfig,
{
    watchers: DashMap<QueryIdentity, Arc<WOF<T>>>,
}

impl<T: TypeConfig> Debug for WatcherPool<T> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("WatcherPool").field("len", &self.watchers.len()).finish()
    }
}

impl<T: TypeConfig> Default for WatcherPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TypeConfig> WatcherPool<T> {
    pub fn new() -> Self {
        Self {
            watchers: DashMap::new(),
        }
    }

    pub fn get(
        &self,
        identity: &QueryIdentity,
    ) -> Option<Arc<WOF<T>>> {
        self.watchers.get(identity).map(|w| w.clone())
    }

    /// Look up the watcher for `descriptor.identity`, constructing it through
    /// the engine on first sight. Returns the watcher and whether it was
    /// newly created by this call.
    pub fn get_or_create(
        &self,
        engine: &CEOF<T>,
        descriptor: &QueryDescriptor<T>,
    ) -> Result<(Arc<WOF<T>>, bool)> {
        if let Some(existing) = self.watchers.get(&descriptor.identity) {
            trace!("watcher reused for {}", descriptor.identity);
            return Ok((existing.clone(), false));
        }

        let watcher = Arc::new(engine.build_watcher(descriptor)?);
        match self.watchers.entry(descriptor.identity.clone()) {
            Entry::Occupied(entry) => {
                // Lost a creation race; release ours and reuse the pooled one
                watcher.destroy();
                Ok((entry.get().clone(), false))
            }
            Entry::Vacant(entry) => {
                debug!("watcher created for {}", descriptor.identity);
                entry.insert(watcher.clone());
                metrics::WATCHERS_CREATED_TOTAL.inc();
                metrics::POOLED_WATCHERS.inc();
                Ok((watcher, true))
            }
        }
    }

    /// True if any pooled watcher still reports pending status.
    pub fn any_pending(&self) -> bool {
        self.watchers.iter().any(|entry| entry.value().snapshot().status.is_pending())
    }

    /// Current snapshot of every pooled watcher.
    pub fn snapshots(&self) -> Vec<(QueryIdentity, QuerySnapshot<T>)> {
        self.watchers
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().snapshot()))
            .collect()
    }

    /// Destroy every pooled watcher and empty the pool. Returns how many
    /// watchers were destroyed. Safe to call repeatedly.
    pub fn destroy_all(&self) -> usize {
        let drained: Vec<Arc<WOF<T>>> = self.watchers.iter().map(|entry| entry.value().clone()).collect();
        self.watchers.clear();
        for watcher in &drained {
            watcher.destroy();
        }
        if !drained.is_empty() {
            debug!("destroyed {} pooled watchers", drained.len());
        }
        metrics::POOLED_WATCHERS.set(0);
        drained.len()
    }

    pub fn len(&self) -> usize {
        self.watchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.watchers.is_empty()
    }
}
