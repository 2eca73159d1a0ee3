use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use tokio::sync::watch;

use crate::alias::FCOF;
use crate::alias::VOF;
use crate::alias::WOF;
use crate::identity::QueryIdentity;
use crate::registry::QueryDescriptor;
use crate::QueryFault;
use crate::Result;
use crate::TypeConfig;

/// Live status of one query in the external cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Pending,
    Success,
    Error,
}

impl QueryStatus {
    /// A query has settled once it is no longer pending.
    pub fn is_settled(&self) -> bool {
        !matches!(self, QueryStatus::Pending)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, QueryStatus::Pending)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, QueryStatus::Error)
    }
}

/// A watcher's current view of its query.
#[derive(Debug, Clone)]
pub struct QuerySnapshot<T>
where
    T: TypeConfig,
{
    pub status: QueryStatus,
    pub data: Option<VOF<T>>,
    pub error: Option<QueryFault>,
}

impl<T: TypeConfig> QuerySnapshot<T> {
    pub fn pending() -> Self {
        Self {
            status: QueryStatus::Pending,
            data: None,
            error: None,
        }
    }
}

/// The external query cache/fetch engine.
///
/// Required capabilities only; retry policy, storage layout and actual fetch
/// execution all live on the other side of this trait.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CacheEngine<T>: Send + Sync + 'static
where
    T: TypeConfig,
{
    /// Cached fetch configuration for an identity, `None` if unseen.
    fn lookup_config(
        &self,
        identity: &QueryIdentity,
    ) -> Option<FCOF<T>>;

    /// Construct a watcher for an identity and its inherited configuration.
    fn build_watcher(
        &self,
        descriptor: &QueryDescriptor<T>,
    ) -> Result<WOF<T>>;

    /// Force one refetch of a single identity. Parallel-safe.
    async fn refetch(
        &self,
        identity: QueryIdentity,
    ) -> Result<()>;

    /// Reset/invalidate the cache entry of a single identity.
    async fn reset(
        &self,
        identity: QueryIdentity,
    ) -> Result<()>;

    /// Global notification suppression toggle. While disabled, subscribers
    /// of the cache receive no per-query updates; re-enabling delivers one
    /// consolidated update.
    fn set_notifications_enabled(
        &self,
        enabled: bool,
    );
}

/// Live subscription to one query's status in the external cache.
///
/// At most one watcher exists per identity while a provider is mounted.
#[cfg_attr(test, automock)]
pub trait QueryWatcher<T>: Send + Sync + 'static
where
    T: TypeConfig,
{
    /// Current status/data/error view of the underlying query.
    fn snapshot(&self) -> QuerySnapshot<T>;

    /// Status-change subscription. A closed channel means the watcher was
    /// destroyed.
    fn subscribe(&self) -> watch::Receiver<QueryStatus>;

    /// Release the underlying subscription. Idempotent.
    fn destroy(&self);
}
