use std::fmt::Debug;

use crate::CacheEngine;
use crate::QueryWatcher;

/// **This coding style learned from OpenRaft project type config.**
pub trait TypeConfig:
    Sync + Send + Sized + Debug + Clone + Copy + Default + Eq + PartialEq + Ord + PartialOrd + 'static
{
    /// Query data value carried by results and snapshots
    type V: Clone + Debug + Send + Sync + 'static;

    /// Opaque fetch configuration understood by the cache engine
    type FC: Clone + Debug + Send + Sync + 'static;

    /// The external query cache/fetch engine
    type CE: CacheEngine<Self>;

    /// Watcher handle constructed by the cache engine
    type W: QueryWatcher<Self>;
}

pub mod alias {
    use super::TypeConfig;

    pub type VOF<T> = <T as TypeConfig>::V;

    pub type FCOF<T> = <T as TypeConfig>::FC;

    pub type CEOF<T> = <T as TypeConfig>::CE;

    pub type WOF<T> = <T as TypeConfig>::W;
}
