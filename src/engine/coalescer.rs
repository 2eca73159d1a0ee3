use std::collections::HashMap;
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;

use futures::future::join_all;
use futures::future::BoxFuture;
use futures::future::Shared;
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::debug;
use tracing::trace;

use crate::alias::WOF;
use crate::identity::QuerySetKey;
use crate::QueryStatus;
use crate::QueryWatcher;
use crate::TypeConfig;

/// Shared future representing "every watcher in a query set has settled".
///
/// Cloneable and awaitable from any number of callers; referential sharing
/// is what lets the host runtime recognize repeated suspensions of the same
/// set as waiting on the same thing.
pub type CompletionSignal = Shared<BoxFuture<'static, ()>>;

/// Shares one in-flight completion signal per distinct query-set key.
///
/// A signal removes its own entry on resolution, so a later suspend cycle
/// for the same set gets a fresh signal.
pub struct CompletionCoalescer<T>
where
    T: TypeConfig,
{
    signals: Arc<Mutex<HashMap<QuerySetKey, CompletionSignal>>>,
    _phantom: PhantomData<T>,
}

impl<T: TypeConfig> Debug for CompletionCoalescer<T> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("CompletionCoalescer").field("len", &self.len()).finish()
    }
}

impl<T: TypeConfig> Default for CompletionCoalescer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TypeConfig> CompletionCoalescer<T> {
    pub fn new() -> Self {
        Self {
            signals: Arc::new(Mutex::new(HashMap::new())),
            _phantom: PhantomData,
        }
    }

    /// Return the in-flight signal for `key`, or build one that resolves
    /// once every given watcher reports a settled status.
    ///
    /// Repeated acquisitions before resolution receive the referentially
    /// identical signal instance.
    pub fn acquire(
        &self,
        key: QuerySetKey,
        watchers: &[Arc<WOF<T>>],
    ) -> CompletionSignal {
        let mut signals = self.signals.lock();
        if let Some(existing) = signals.get(&key) {
            trace!("completion signal reused for {}", key);
            return existing.clone();
        }

        let subscriptions: Vec<watch::Receiver<QueryStatus>> =
            watchers.iter().map(|watcher| watcher.subscribe()).collect();
        let registry = Arc::clone(&self.signals);
        let owned_key = key.clone();
        let signal: CompletionSignal = async move {
            join_all(subscriptions.into_iter().map(wait_settled)).await;
            registry.lock().remove(&owned_key);
        }
        .boxed()
        .shared();

        debug!("completion signal created for {}", key);
        signals.insert(key, signal.clone());
        signal
    }

    /// Release every in-flight entry. Held signal clones keep working; only
    /// the sharing table is emptied.
    pub fn clear(&self) {
        let mut signals = self.signals.lock();
        if !signals.is_empty() {
            debug!("releasing {} in-flight completion signals", signals.len());
        }
        signals.clear();
    }

    pub fn len(&self) -> usize {
        self.signals.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.lock().is_empty()
    }
}

/// Wait until one watcher's status channel reports success or error. A
/// closed channel means the watcher was destroyed; that also counts as
/// settled so teardown can never strand a suspended render pass.
async fn wait_settled(mut rx: watch::Receiver<QueryStatus>) {
    loop {
        if rx.borrow().is_settled() {
            return;
        }
        if rx.changed().await.is_err() {
            return;
        }
    }
}
