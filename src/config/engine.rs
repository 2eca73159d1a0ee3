use serde::Deserialize;
use serde::Serialize;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct EngineConfig {
    /// Default for the per-call suspend-on-create flag: suspend whenever a
    /// call creates a watcher, even if the caller's view already settled.
    #[serde(default = "default_suspend_on_create")]
    pub suspend_on_create: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            suspend_on_create: default_suspend_on_create(),
        }
    }
}

fn default_suspend_on_create() -> bool {
    false
}
