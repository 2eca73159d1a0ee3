mod cache;
mod config;
mod constants;
mod engine;
mod errors;
mod identity;
mod metrics;
mod provider;
mod registry;
mod type_config;

pub use cache::*;
pub use config::*;
pub use engine::*;
pub use errors::*;
pub use identity::*;
pub use metrics::*;
pub use provider::*;
pub use registry::*;
pub use type_config::*;

//-----------------------------------------------------------
// Test utils

#[cfg(test)]
pub mod test_utils;
//-----------------------------------------------------------
// Autometrics
/// autometrics: https://docs.autometrics.dev/rust/adding-alerts-and-slos
use autometrics::objectives::Objective;
use autometrics::objectives::ObjectiveLatency;
use autometrics::objectives::ObjectivePercentile;
const API_SLO: Objective = Objective::new("api")
    .success_rate(ObjectivePercentile::P99_9)
    .latency(ObjectiveLatency::Ms10, ObjectivePercentile::P99);
