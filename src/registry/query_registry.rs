use std::fmt::Debug;

use dashmap::DashMap;
use tracing::trace;

use crate::alias::CEOF;
use crate::alias::FCOF;
use crate::identity::QueryIdentity;
use crate::CacheEngine;
use crate::QueryDescriptor;
use crate::TypeConfig;

/// Mapping from query identity to the latest descriptor seen for it.
///
/// Entries are upserted on every registration and never removed by
/// teardown, so a previously-known identity can always be re-registered
/// from its identity alone.
pub struct QueryRegistry<T>
where
    T: TypeConfig,
{
    descriptors: DashMap<QueryIdentity, QueryDescriptor<T>>,
}

impl<T: TypeConfig> Debug for QueryRegistry<T> {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.debug_struct("QueryRegistry").field("len", &self.descriptors.len()).finish()
    }
}

impl<T: TypeConfig> Default for QueryRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TypeConfig> QueryRegistry<T> {
    pub fn new() -> Self {
        Self {
            descriptors: DashMap::new(),
        }
    }

    /// Create or refresh the descriptor for `identity`.
    ///
    /// Configuration precedence: whatever the engine already has cached for
    /// this identity, then the caller-supplied configuration, then the
    /// configuration remembered from an earlier registration.
    pub fn upsert(
        &self,
        engine: &CEOF<T>,
        identity: &QueryIdentity,
        caller_config: Option<FCOF<T>>,
    ) -> QueryDescriptor<T> {
        let inherited = engine
            .lookup_config(identity)
            .or(caller_config)
            .or_else(|| self.descriptors.get(identity).and_then(|d| d.fetch_config.clone()));

        let descriptor = QueryDescriptor {
            identity: identity.clone(),
            fetch_config: inherited,
        };
        trace!("registry upsert for {}", identity);
        self.descriptors.insert(identity.clone(), descriptor.clone());
        descriptor
    }

    pub fn get(
        &self,
        identity: &QueryIdentity,
    ) -> Option<QueryDescriptor<T>> {
        self.descriptors.get(identity).map(|d| d.clone())
    }

    pub fn contains(
        &self,
        identity: &QueryIdentity,
    ) -> bool {
        self.descriptors.contains_key(identity)
    }

    /// Every identity ever registered with this provider instance.
    pub fn identities(&self) -> Vec<QueryIdentity> {
        self.descriptors.iter().map(|entry| entry.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
