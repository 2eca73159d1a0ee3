//! Identity bookkeeping for the synchronization engine.
//!
//! This module:
//! - Tracks the latest descriptor seen for every query identity
//! - Enforces at-most-one live watcher per identity
//! - Supplies the identity list that batched refetch operates on
//! - Survives cache teardown so re-registration needs no fresh configuration
//!
//! Descriptor state and watcher state are deliberately separate maps with
//! different lifetimes: teardown empties the pool but never the registry.

mod query_registry;
mod watcher_pool;
pub use query_registry::*;
pub use watcher_pool::*;


use crate::alias::FCOF;
use crate::identity::QueryIdentity;
use crate::TypeConfig;

/// The latest registration seen for one query identity.
///
/// Never independently destroyed; teardown clears watchers, not descriptors.
#[derive(Debug, Clone)]
pub struct QueryDescriptor<T>
where
    T: TypeConfig,
{
    pub identity: QueryIdentity,
    /// Inherited from the engine's cache when present, else caller-supplied.
    pub fetch_config: Option<FCOF<T>>,
}
