//! Shared components between unit tests and integration-style tests:
//! logger bootstrap, the mockall type config and an in-memory stub cache
//! engine that settles queries deterministically.

mod result_builder;
mod stub_engine;
pub mod mock_type_config;

pub use mock_type_config::*;
pub use result_builder::*;
pub use stub_engine::*;

use once_cell::sync::OnceCell;

/// This will ensure the test logger is only initialized once.
pub fn enable_logger() {
    static LOGGER: OnceCell<()> = OnceCell::new();
    LOGGER.get_or_init(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}
