//! Shared, swappable handle to the current dictionaries.

use crate::dictionary::Dictionaries;
use arc_swap::ArcSwap;
use std::sync::Arc;

/// A cheaply cloneable handle to the dictionaries in use.
///
/// Every resolution works on one [`snapshot`](Self::snapshot), so a host
/// swapping in late-arriving dictionaries never exposes a half-updated table.
#[derive(Clone, Debug)]
pub struct DictionaryStore {
    inner: Arc<ArcSwap<Dictionaries>>,
}

impl Default for DictionaryStore {
    fn default() -> Self {
        Self::new(Dictionaries::default())
    }
}

impl DictionaryStore {
    pub fn new(dictionaries: Dictionaries) -> Self {
        Self {
            inner: Arc::new(ArcSwap::from_pointee(dictionaries)),
        }
    }

    /// The dictionaries as of now.
    pub fn snapshot(&self) -> Arc<Dictionaries> {
        self.inner.load_full()
    }

    /// Replaces the dictionaries wholesale.
    pub fn replace(&self, dictionaries: Dictionaries) {
        self.inner.store(Arc::new(dictionaries));
        tracing::debug!("Dictionaries replaced");
    }

    /// Publishes a modified copy of the current dictionaries.
    ///
    /// `f` may run more than once if another handle publishes concurrently.
    pub fn update<F>(&self, mut f: F)
    where
        F: FnMut(&mut Dictionaries),
    {
        self.inner.rcu(|current| {
            let mut next = Dictionaries::clone(current);
            f(&mut next);
            next
        });
    }
}
