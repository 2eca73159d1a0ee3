//! In-memory cache engine for tests.
//!
//! Unlike the mockall mocks, the stub behaves like a tiny real engine:
//! entries hold data and a live status channel, tests settle queries by
//! identity and watchers observe the transition, and every refetch/reset/
//! notification call is counted so batch semantics can be asserted.

use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::watch;

use crate::identity::QueryIdentity;
use crate::CacheEngine;
use crate::QueryDescriptor;
use crate::QueryFault;
use crate::QuerySnapshot;
use crate::QueryStatus;
use crate::QueryWatcher;
use crate::Result;
use crate::SystemError;
use crate::TypeConfig;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd)]
pub struct StubTypeConfig;

impl TypeConfig for StubTypeConfig {
    type V = String;

    type FC = String;

    type CE = StubCacheEngine;

    type W = StubWatcher;
}

struct StubEntry {
    config: Option<String>,
    snapshot: QuerySnapshot<StubTypeConfig>,
    status_tx: watch::Sender<QueryStatus>,
}

impl StubEntry {
    fn pending() -> Self {
        let (status_tx, _) = watch::channel(QueryStatus::Pending);
        Self {
            config: None,
            snapshot: QuerySnapshot::pending(),
            status_tx,
        }
    }
}

#[derive(Default)]
struct StubState {
    refetch_failures: DashMap<QueryIdentity, String>,
    reset_failures: DashMap<QueryIdentity, String>,
    refetch_calls: DashMap<QueryIdentity, usize>,
    reset_calls: DashMap<QueryIdentity, usize>,
    notification_flushes: AtomicUsize,
}

struct StubInner {
    entries: DashMap<QueryIdentity, StubEntry>,
    state: StubState,
    notifications_enabled: AtomicBool,
}

#[derive(Clone)]
pub struct StubCacheEngine {
    inner: Arc<StubInner>,
}

impl Default for StubCacheEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl StubCacheEngine {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(StubInner {
                entries: DashMap::new(),
                state: StubState::default(),
                notifications_enabled: AtomicBool::new(true),
            }),
        }
    }

    fn with_entry<R>(
        &self,
        identity: &QueryIdentity,
        f: impl FnOnce(&mut StubEntry) -> R,
    ) -> R {
        let mut entry = self.inner.entries.entry(identity.clone()).or_insert_with(StubEntry::pending);
        f(&mut entry)
    }

    /// Seed a pending entry with a cached fetch configuration.
    pub fn prime(
        &self,
        identity: &QueryIdentity,
        config: &str,
    ) {
        self.with_entry(identity, |entry| entry.config = Some(config.to_string()));
    }

    /// Settle one query to success. Watchers observe the transition.
    pub fn settle_success(
        &self,
        identity: &QueryIdentity,
        data: &str,
    ) {
        self.with_entry(identity, |entry| {
            entry.snapshot = QuerySnapshot {
                status: QueryStatus::Success,
                data: Some(data.to_string()),
                error: None,
            };
            let _ = entry.status_tx.send(QueryStatus::Success);
        });
    }

    /// Settle one query to error. Watchers observe the transition.
    pub fn settle_error(
        &self,
        identity: &QueryIdentity,
        message: &str,
    ) {
        self.with_entry(identity, |entry| {
            entry.snapshot = QuerySnapshot {
                status: QueryStatus::Error,
                data: None,
                error: Some(QueryFault::new(identity.clone(), message)),
            };
            let _ = entry.status_tx.send(QueryStatus::Error);
        });
    }

    pub fn data_of(
        &self,
        identity: &QueryIdentity,
    ) -> Option<String> {
        self.inner.entries.get(identity).and_then(|entry| entry.snapshot.data.clone())
    }

    pub fn fail_refetch(
        &self,
        identity: &QueryIdentity,
        message: &str,
    ) {
        self.inner.state.refetch_failures.insert(identity.clone(), message.to_string());
    }

    pub fn fail_reset(
        &self,
        identity: &QueryIdentity,
        message: &str,
    ) {
        self.inner.state.reset_failures.insert(identity.clone(), message.to_string());
    }

    pub fn refetch_count(
        &self,
        identity: &QueryIdentity,
    ) -> usize {
        self.inner.state.refetch_calls.get(identity).map(|c| *c).unwrap_or(0)
    }

    pub fn reset_count(
        &self,
        identity: &QueryIdentity,
    ) -> usize {
        self.inner.state.reset_calls.get(identity).map(|c| *c).unwrap_or(0)
    }

    /// How many disabled-to-enabled notification transitions happened.
    pub fn flush_count(&self) -> usize {
        self.inner.state.notification_flushes.load(Ordering::SeqCst)
    }

    pub fn notifications_enabled(&self) -> bool {
        self.inner.notifications_enabled.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheEngine<StubTypeConfig> for StubCacheEngine {
    fn lookup_config(
        &self,
        identity: &QueryIdentity,
    ) -> Option<String> {
        self.inner.entries.get(identity).and_then(|entry| entry.config.clone())
    }

    fn build_watcher(
        &self,
        descriptor: &QueryDescriptor<StubTypeConfig>,
    ) -> Result<StubWatcher> {
        let rx = self.with_entry(&descriptor.identity, |entry| entry.status_tx.subscribe());
        Ok(StubWatcher {
            identity: descriptor.identity.clone(),
            inner: Arc::clone(&self.inner),
            rx,
            destroyed: AtomicBool::new(false),
        })
    }

    async fn refetch(
        &self,
        identity: QueryIdentity,
    ) -> Result<()> {
        *self.inner.state.refetch_calls.entry(identity.clone()).or_insert(0) += 1;
        if let Some(message) = self.inner.state.refetch_failures.get(&identity) {
            return Err(SystemError::Engine(message.value().clone()).into());
        }
        Ok(())
    }

    async fn reset(
        &self,
        identity: QueryIdentity,
    ) -> Result<()> {
        *self.inner.state.reset_calls.entry(identity.clone()).or_insert(0) += 1;
        if let Some(message) = self.inner.state.reset_failures.get(&identity) {
            return Err(SystemError::Engine(message.value().clone()).into());
        }
        if let Some(mut entry) = self.inner.entries.get_mut(&identity) {
            entry.snapshot = QuerySnapshot::pending();
            let _ = entry.status_tx.send(QueryStatus::Pending);
        }
        Ok(())
    }

    fn set_notifications_enabled(
        &self,
        enabled: bool,
    ) {
        let was_enabled = self.inner.notifications_enabled.swap(enabled, Ordering::SeqCst);
        if enabled && !was_enabled {
            self.inner.state.notification_flushes.fetch_add(1, Ordering::SeqCst);
        }
    }
}

pub struct StubWatcher {
    identity: QueryIdentity,
    inner: Arc<StubInner>,
    rx: watch::Receiver<QueryStatus>,
    destroyed: AtomicBool,
}

impl StubWatcher {
    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }
}

impl QueryWatcher<StubTypeConfig> for StubWatcher {
    fn snapshot(&self) -> QuerySnapshot<StubTypeConfig> {
        self.inner
            .entries
            .get(&self.identity)
            .map(|entry| entry.snapshot.clone())
            .unwrap_or_else(QuerySnapshot::pending)
    }

    fn subscribe(&self) -> watch::Receiver<QueryStatus> {
        self.rx.clone()
    }

    fn destroy(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
    }
}
