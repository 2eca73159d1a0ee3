// -
// Canonical serialization

/// Separator between identity serializations inside a query-set key
pub(crate) const QUERY_SET_KEY_DELIMITER: &str = "|";

/// Fault message used when an erroring source carries no error value
pub(crate) const UNSPECIFIED_FAULT: &str = "query reported error status without an error value";

// -
// Configuration sources

/// Base configuration file (extension resolved by the loader)
pub(crate) const CONFIG_BASE_PATH: &str = "config/qsync";

/// Local override file, never committed
pub(crate) const CONFIG_LOCAL_PATH: &str = "config/local";

/// Environment variable prefix, e.g. `QSYNC__ENGINE__SUSPEND_ON_CREATE`
pub(crate) const ENV_VAR_PREFIX: &str = "QSYNC";

// -
// Monitoring

/// Default prometheus namespace for custom registries
pub(crate) const DEFAULT_METRICS_NAMESPACE: &str = "qsync";
