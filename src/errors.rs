//! Query Synchronization Error Hierarchy
//!
//! Defines error types for the multi-query synchronization engine,
//! categorized by orchestration layer and operational concerns.

use config::ConfigError;

use crate::identity::QueryIdentity;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Infrastructure-level failures (engine I/O, watcher construction)
    #[error(transparent)]
    System(#[from] SystemError),

    /// Configuration loading and validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Orchestration-level failures across watchers and batch operations
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Unrecoverable usage failures, surfaced synchronously and never retried
    #[error("Fatal error: {0}")]
    Fatal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Underlying fetch failure for a single query identity
    #[error(transparent)]
    Query(#[from] QueryFault),

    /// Batch refetch aggregate failure
    #[error(transparent)]
    Refetch(#[from] RefetchError),

    /// Cache teardown aggregate failure
    #[error(transparent)]
    Teardown(#[from] TeardownError),
}

/// The error value a failing query carries through the recovery contract.
///
/// Cloneable so the same fault can live in a watcher snapshot, a caller's
/// result view and the surfaced outcome at once.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("query {identity} failed: {message}")]
pub struct QueryFault {
    pub identity: QueryIdentity,
    pub message: String,
}

impl QueryFault {
    pub fn new(
        identity: QueryIdentity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            identity,
            message: message.into(),
        }
    }
}

/// Aggregate failure of a batch refetch round.
///
/// Individual refetches are never aborted by a sibling failure; the first
/// failure observed after every call settled becomes the cause.
#[derive(Debug, thiserror::Error)]
#[error("refetch failed for {failed} of {total} queries: {first_cause}")]
pub struct RefetchError {
    pub total: usize,
    pub failed: usize,
    pub first_cause: String,
}

/// Aggregate failure of a cache teardown round.
#[derive(Debug, thiserror::Error)]
#[error("cache reset failed for {failed} of {total} entries: {first_cause}")]
pub struct TeardownError {
    pub total: usize,
    pub failed: usize,
    pub first_cause: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SystemError {
    /// Cache engine rejected an operation
    #[error("Cache engine failure: {0}")]
    Engine(String),

    /// Watcher construction failed for an identity
    #[error("Watcher construction failed for {identity}: {reason}")]
    WatcherBuild {
        identity: QueryIdentity,
        reason: String,
    },

    #[error("General engine error: {0}")]
    General(String),
}
