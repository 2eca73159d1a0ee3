//! Boundary with the external query cache/fetch engine.
//!
//! The synchronization engine never fetches or stores query data itself. It
//! orchestrates watchers over an engine that already does, through the two
//! traits defined here. Everything behind these traits is an external
//! collaborator; everything in front of them is this crate.

mod engine_api;
pub use engine_api::*;
