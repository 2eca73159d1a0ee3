//! The provider: the explicitly owned, per-instance orchestration context.
//!
//! ## Key Responsibilities
//! - Owns the Registry, Watcher Pool and Completion Coalescer for one
//!   provider instance; two providers never share state
//! - Exposes the render-pass boundary: `get_query_result`,
//!   `refetch_queries`, `clear_cache`
//! - Manages the mounted lifecycle: init-on-build, full release on
//!   `unmount` or drop
//!
//! ## Example Usage
//! ```ignore
//! let provider = ProviderBuilder::new()
//!     .cache_engine(engine)
//!     .build()?;
//! match provider.get_query_result(&results)? {
//!     SyncOutcome::Ready(data) => render(data),
//!     SyncOutcome::Pending(signal) => { signal.await; /* re-invoke pass */ }
//!     SyncOutcome::Faulted(fault) => recover(fault),
//! }
//! ```

mod builder;
mod query_provider;
pub use builder::*;
pub use query_provider::*;
