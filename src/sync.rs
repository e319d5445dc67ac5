//! Thread-safe facade over [`RadixTree`].
//!
//! A single `RwLock` guards the whole tree: inserts take it exclusively,
//! lookups and traversal share it. Lookups return cloned values so no guard
//! escapes the call.

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::RadixTree;

/// A [`RadixTree`] that can be shared between threads.
pub struct SharedRadixTree<V> {
    inner: RwLock<RadixTree<V>>,
}

impl<V> SharedRadixTree<V> {
    pub fn new() -> Self {
        Self::from_tree(RadixTree::new())
    }

    /// Wrap an already-built tree, e.g. one filled before being shared.
    pub fn from_tree(tree: RadixTree<V>) -> Self {
        debug!(entries = tree.len(), "sharing radix tree");
        Self {
            inner: RwLock::new(tree),
        }
    }

    /// Insert under the write lock. See [`RadixTree::insert`].
    pub fn insert(&self, key: impl AsRef<[u8]>, value: impl Into<Option<V>>) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.inner.read().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Run `f` over every entry while holding the read lock.
    pub fn visit<F>(&self, f: F)
    where
        F: FnMut(&[u8], &V),
    {
        self.inner.read().visit(f)
    }

    /// Hold the read lock for several queries at once.
    pub fn read(&self) -> RwLockReadGuard<'_, RadixTree<V>> {
        self.inner.read()
    }

    /// Hold the write lock for a batch of inserts.
    pub fn write(&self) -> RwLockWriteGuard<'_, RadixTree<V>> {
        self.inner.write()
    }

    pub fn into_inner(self) -> RadixTree<V> {
        self.inner.into_inner()
    }
}

impl<V: Clone> SharedRadixTree<V> {
    /// Exact-match lookup. See [`RadixTree::match_value`].
    pub fn match_value(&self, key: impl AsRef<[u8]>) -> Option<V> {
        self.inner.read().match_value(key).cloned()
    }

    /// Longest-prefix lookup. See [`RadixTree::prefix_match_value`].
    pub fn prefix_match_value(&self, key: impl AsRef<[u8]>) -> Option<V> {
        self.inner.read().prefix_match_value(key).cloned()
    }
}

impl<V> Default for SharedRadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> From<RadixTree<V>> for SharedRadixTree<V> {
    fn from(tree: RadixTree<V>) -> Self {
        Self::from_tree(tree)
    }
}
