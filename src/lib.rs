//! # radix-rs
//!
//! A compressed prefix tree (radix trie) mapping byte-string keys to values.
//!
//! Each node carries a multi-byte label, so chains of single-child nodes
//! collapse into one. Insertion splits labels in place when a new key
//! diverges partway through one. Two query kinds are supported:
//!
//! - **exact match**: the key must end exactly on a node boundary
//!   ([`RadixTree::match_key`], [`RadixTree::match_value`]);
//! - **longest prefix match**: the deepest node whose key is a prefix of the
//!   query ([`RadixTree::prefix_match`], [`RadixTree::prefix_match_value`]).
//!
//! ## Example
//!
//! ```rust
//! use radix_rs::RadixTree;
//!
//! let mut tree: RadixTree<u32> = RadixTree::new();
//! tree.insert(b"/api", 1);
//! tree.insert(b"/api/users", 2);
//!
//! assert_eq!(tree.match_value(b"/api/users"), Some(&2));
//! assert_eq!(tree.match_value(b"/api/use"), None);
//! assert_eq!(tree.prefix_match_value(b"/api/users/42"), Some(&2));
//! assert_eq!(tree.prefix_match_value(b"/api/v2"), Some(&1));
//! ```
//!
//! `RadixTree` has no internal locking. Wrap it in [`SharedRadixTree`] to
//! share it between threads.

mod debug;
mod node;
mod stats;
mod sync;
mod traverse;

use std::fmt;

use tracing::trace;

pub use node::Node;
pub use stats::TreeStats;
pub use sync::SharedRadixTree;
pub use traverse::{Iter, PrintOptions};

use node::{common_prefix_len, Label};

/// Outcome of an exact-match lookup.
#[derive(Debug)]
pub enum Match<'a, V> {
    /// A byte diverged, or no child continues the path.
    Miss,
    /// The path ended strictly inside `node`'s label after `offset` bytes.
    Partial { node: &'a Node<V>, offset: usize },
    /// The path was consumed exactly at the end of this node's label.
    Full(&'a Node<V>),
}

impl<'a, V> Match<'a, V> {
    /// The node reached by a full match.
    pub fn full(&self) -> Option<&'a Node<V>> {
        match *self {
            Match::Full(node) => Some(node),
            _ => None,
        }
    }

    pub fn is_miss(&self) -> bool {
        matches!(self, Match::Miss)
    }
}

/// A compressed prefix tree over byte-string keys.
///
/// Not synchronized: mutation takes `&mut self`.
pub struct RadixTree<V> {
    root: Node<V>,
    /// Number of nodes holding a value.
    count: usize,
}

impl<V> RadixTree<V> {
    pub fn new() -> Self {
        Self {
            root: Node::with_label(&[]),
            count: 0,
        }
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The root node. Its label is the longest prefix shared by every key
    /// inserted so far (or the first key, while only one exists).
    pub fn root(&self) -> &Node<V> {
        &self.root
    }

    /// Ensure a node exists for `key`, storing `value` there if present.
    ///
    /// Passing `None` creates the path without setting or clearing a stored
    /// value. Returns the value that was replaced, if any.
    pub fn insert(&mut self, key: impl AsRef<[u8]>, value: impl Into<Option<V>>) -> Option<V> {
        let key = key.as_ref();
        let value = value.into();
        let storing = value.is_some();

        let old = if self.root.is_untouched() {
            trace!(len = key.len(), "adopting key as root label");
            self.root.label = Label::from_slice(key);
            self.root.assign(value)
        } else {
            Self::insert_at(&mut self.root, key, value)
        };

        if storing && old.is_none() {
            self.count += 1;
        }
        old
    }

    fn insert_at(node: &mut Node<V>, rest: &[u8], value: Option<V>) -> Option<V> {
        let d = common_prefix_len(&node.label, rest);

        if d < node.label.len() {
            // The path ends inside this label or diverges from it.
            trace!(at = d, label_len = node.label.len(), "splitting node label");
            node.split_at(d);
            if d == rest.len() {
                return node.assign(value);
            }
            trace!(label_len = rest.len() - d, "adding branch after split");
            return node.add_child(Node::with_label(&rest[d..])).assign(value);
        }

        if d == rest.len() {
            return node.assign(value);
        }

        match node.child_index(rest[d]) {
            Ok(idx) => Self::insert_at(&mut node.children[idx], &rest[d..], value),
            Err(_) => {
                trace!(label_len = rest.len() - d, "adding branch");
                node.add_child(Node::with_label(&rest[d..])).assign(value)
            }
        }
    }

    /// Walk `key` against the tree and report where it ends.
    pub fn match_key(&self, key: impl AsRef<[u8]>) -> Match<'_, V> {
        let mut node = &self.root;
        let mut rest = key.as_ref();
        loop {
            let d = common_prefix_len(&node.label, rest);
            if d == rest.len() {
                if d == node.label.len() {
                    return Match::Full(node);
                }
                return Match::Partial { node, offset: d };
            }
            if d < node.label.len() {
                return Match::Miss;
            }
            match node.child(rest[d]) {
                Some(child) => {
                    node = child;
                    rest = &rest[d..];
                }
                None => return Match::Miss,
            }
        }
    }

    /// The value stored under exactly `key`.
    pub fn match_value(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        self.match_key(key).full()?.value()
    }

    pub fn match_value_mut(&mut self, key: impl AsRef<[u8]>) -> Option<&mut V> {
        let mut node = &mut self.root;
        let mut rest = key.as_ref();
        loop {
            let d = common_prefix_len(&node.label, rest);
            if d < node.label.len() {
                return None;
            }
            if d == rest.len() {
                return node.value.as_mut();
            }
            let idx = node.child_index(rest[d]).ok()?;
            rest = &rest[d..];
            node = &mut node.children[idx];
        }
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.match_value(key).is_some()
    }

    /// The deepest node whose full key is a prefix of `key`.
    ///
    /// Only node boundaries count: a query ending inside a label falls back
    /// to the nearest ancestor. An empty query matches nothing.
    pub fn prefix_match(&self, key: impl AsRef<[u8]>) -> Option<&Node<V>> {
        let mut rest = key.as_ref();
        if rest.is_empty() {
            return None;
        }

        let mut parent = None;
        let mut node = &self.root;
        loop {
            let d = common_prefix_len(&node.label, rest);
            if d < node.label.len() {
                return parent;
            }
            if d == rest.len() {
                return Some(node);
            }
            match node.child(rest[d]) {
                Some(child) => {
                    parent = Some(node);
                    node = child;
                    rest = &rest[d..];
                }
                None => return Some(node),
            }
        }
    }

    /// The value at the node found by [`prefix_match`](Self::prefix_match).
    ///
    /// A matched node without a value yields `None`; shallower valued
    /// ancestors are not consulted.
    pub fn prefix_match_value(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        self.prefix_match(key)?.value()
    }
}

impl<V> Default for RadixTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for RadixTree<V> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            count: self.count,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for RadixTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: AsRef<[u8]>, V> Extend<(K, V)> for RadixTree<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for RadixTree<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}


#[cfg(test)]
mod proptests;
