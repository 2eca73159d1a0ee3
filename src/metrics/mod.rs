use std::sync::Once;

use lazy_static::lazy_static;
use prometheus::IntCounter;
use prometheus::IntCounterVec;
use prometheus::IntGauge;
use prometheus::Opts;
use prometheus::Registry;


lazy_static! {
    pub static ref WATCHERS_CREATED_TOTAL: IntCounter = IntCounter::new(
        "watchers_created_total",
        "Total watchers constructed through the pool"
    )
    .expect("metric can not be created");

    pub static ref SUSPENSIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("suspensions_total", "Render passes suspended, by reason"),
        &["reason"]
    )
    .expect("metric can not be created");

    pub static ref QUERY_FAULTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("query_faults_total", "Query faults surfaced, by source"),
        &["source"]
    )
    .expect("metric can not be created");

    pub static ref REFETCH_ROUNDS_TOTAL: IntCounter = IntCounter::new(
        "refetch_rounds_total",
        "Completed batch refetch rounds"
    )
    .expect("metric can not be created");

    pub static ref CACHE_RESETS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("cache_resets_total", "Cache entries reset by teardown, by filter"),
        &["filter"]
    )
    .expect("metric can not be created");

    pub static ref POOLED_WATCHERS: IntGauge = IntGauge::new(
        "pooled_watchers",
        "Watchers currently pooled"
    )
    .expect("metric can not be created");

    pub static ref REGISTRY: Registry = Registry::new();
}

pub fn register_custom_metrics(registry: &Registry) {
    registry
        .register(Box::new(WATCHERS_CREATED_TOTAL.clone()))
        .expect("collector can be registered");
    registry
        .register(Box::new(SUSPENSIONS_TOTAL.clone()))
        .expect("collector can be registered");
    registry
        .register(Box::new(QUERY_FAULTS_TOTAL.clone()))
        .expect("collector can be registered");
    registry
        .register(Box::new(REFETCH_ROUNDS_TOTAL.clone()))
        .expect("collector can be registered");
    registry
        .register(Box::new(CACHE_RESETS_TOTAL.clone()))
        .expect("collector can be registered");
    registry
        .register(Box::new(POOLED_WATCHERS.clone()))
        .expect("collector can be registered");
}

/// Register the custom collectors into the crate registry exactly once.
pub fn init_metrics() {
    static START: Once = Once::new();
    START.call_once(|| register_custom_metrics(&REGISTRY));
}

/// Namespaced registry for hosts embedding their own exporter.
pub fn build_registry(namespace: &str) -> Registry {
    let registry =
        Registry::new_custom(Some(namespace.to_string()), None).expect("registry can be created");
    register_custom_metrics(&registry);
    registry
}
