//! The synchronization core: query registration, aggregate-readiness
//! detection, suspension-signal coalescing, batched refetch and selective
//! cache teardown.

mod coalescer;
mod refetch;
mod sync_engine;
mod teardown;
pub use coalescer::*;
pub use refetch::*;
pub use sync_engine::*;
pub use teardown::*;


use std::fmt;

use crate::alias::FCOF;
use crate::alias::VOF;
use crate::identity::QueryIdentity;
use crate::QueryFault;
use crate::QueryStatus;
use crate::TypeConfig;

/// Per-call options for [`SyncEngine::get_query_result`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// Suspend whenever this call created a watcher, even if the caller's
    /// own view of the query already settled.
    pub suspend_on_create: bool,
}

/// The caller's view of one query at render time.
#[derive(Debug, Clone)]
pub struct QueryResult<T>
where
    T: TypeConfig,
{
    pub identity: QueryIdentity,
    pub status: QueryStatus,
    pub data: Option<VOF<T>>,
    pub error: Option<QueryFault>,
    pub fetch_config: Option<FCOF<T>>,
}

/// Outcome of one synchronization pass over a list of query results.
///
/// The host integration layer interprets the variants as its runtime's
/// suspend and recovery contracts: await `Pending` and re-invoke the whole
/// render pass, hand `Faulted` to the nearest fault boundary, consume
/// `Ready` data positionally.
pub enum SyncOutcome<T>
where
    T: TypeConfig,
{
    /// Every referenced query settled successfully; data in input order.
    Ready(Vec<Option<VOF<T>>>),
    /// At least one query is unsettled; await the shared signal, then retry.
    Pending(CompletionSignal),
    /// At least one query failed; first fault per the precedence rule.
    Faulted(QueryFault),
}

impl<T: TypeConfig> SyncOutcome<T> {
    pub fn is_ready(&self) -> bool {
        matches!(self, SyncOutcome::Ready(_))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SyncOutcome::Pending(_))
    }

    pub fn is_faulted(&self) -> bool {
        matches!(self, SyncOutcome::Faulted(_))
    }

    pub fn into_ready(self) -> Option<Vec<Option<VOF<T>>>> {
        match self {
            SyncOutcome::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_pending(self) -> Option<CompletionSignal> {
        match self {
            SyncOutcome::Pending(signal) => Some(signal),
            _ => None,
        }
    }

    pub fn into_faulted(self) -> Option<QueryFault> {
        match self {
            SyncOutcome::Faulted(fault) => Some(fault),
            _ => None,
        }
    }
}

impl<T: TypeConfig> fmt::Debug for SyncOutcome<T> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            SyncOutcome::Ready(data) => f.debug_tuple("Ready").field(&data.len()).finish(),
            SyncOutcome::Pending(_) => f.write_str("Pending(..)"),
            SyncOutcome::Faulted(fault) => f.debug_tuple("Faulted").field(fault).finish(),
        }
    }
}
