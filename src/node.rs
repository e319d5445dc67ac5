//! Trie node: a compressed label, sorted child edges and an optional value.
//!
//! Children are kept as two parallel arrays: `keys` holds the first byte of
//! every child label in ascending order and `children` holds the nodes at the
//! same positions. Dispatch on the next path byte is a binary search over
//! `keys`, and ordered insertion keeps both arrays sorted without re-sorting.

use std::fmt;

use smallvec::SmallVec;

/// Labels up to this many bytes are stored inline.
pub(crate) const INLINE_LABEL: usize = 16;

/// Child fan-out that fits inline before `keys` spills to the heap.
pub(crate) const INLINE_FANOUT: usize = 4;

pub(crate) type Label = SmallVec<[u8; INLINE_LABEL]>;

/// A node in the radix tree.
///
/// Only the root may carry an empty label. Every other node's label is
/// non-empty and starts with the byte its parent dispatches on.
#[derive(Clone)]
pub struct Node<V> {
    /// Bytes this node contributes to every key passing through it.
    pub(crate) label: Label,
    /// First byte of each child's label, sorted ascending.
    pub(crate) keys: SmallVec<[u8; INLINE_FANOUT]>,
    /// Child nodes, parallel to `keys`.
    pub(crate) children: Vec<Node<V>>,
    /// Set iff an inserted key ends exactly at this node.
    pub(crate) value: Option<V>,
}

impl<V> Node<V> {
    pub(crate) fn with_label(label: &[u8]) -> Self {
        Self {
            label: Label::from_slice(label),
            keys: SmallVec::new(),
            children: Vec::new(),
            value: None,
        }
    }

    /// The bytes this node adds to the key of every descendant.
    #[inline]
    pub fn label(&self) -> &[u8] {
        &self.label
    }

    /// The value stored at this node, if a key ends here.
    #[inline]
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    #[inline]
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    /// Children in ascending order of their first label byte.
    pub fn children(&self) -> std::slice::Iter<'_, Node<V>> {
        self.children.iter()
    }

    /// The child whose label starts with `byte`.
    pub fn child(&self, byte: u8) -> Option<&Node<V>> {
        let idx = self.child_index(byte).ok()?;
        Some(&self.children[idx])
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// `Ok(position)` of the child starting with `byte`, or `Err(position)` it
    /// would be inserted at.
    #[inline]
    pub(crate) fn child_index(&self, byte: u8) -> Result<usize, usize> {
        self.keys.binary_search(&byte)
    }

    /// A root that has never received a key. Such a root adopts the next
    /// inserted path as its label instead of branching.
    #[inline]
    pub(crate) fn is_untouched(&self) -> bool {
        self.label.is_empty() && self.children.is_empty() && self.value.is_none()
    }

    /// Insert `child` at its sorted position and return it.
    ///
    /// The caller guarantees no existing child starts with the same byte.
    pub(crate) fn add_child(&mut self, child: Node<V>) -> &mut Node<V> {
        let byte = child.label[0];
        let idx = match self.child_index(byte) {
            Ok(_) => unreachable!("duplicate child edge {byte:#04x}"),
            Err(idx) => idx,
        };
        self.keys.insert(idx, byte);
        self.children.insert(idx, child);
        &mut self.children[idx]
    }

    /// Shorten the label to `label[..at]`, moving the suffix together with
    /// the current children and value into a single new child.
    pub(crate) fn split_at(&mut self, at: usize) {
        debug_assert!(at < self.label.len());
        let suffix = Node {
            label: Label::from_slice(&self.label[at..]),
            keys: std::mem::take(&mut self.keys),
            children: std::mem::take(&mut self.children),
            value: self.value.take(),
        };
        self.label.truncate(at);
        self.keys.push(suffix.label[0]);
        self.children.push(suffix);
    }

    /// Store `value` if present and return what it replaced. `None` leaves
    /// the stored value untouched.
    #[inline]
    pub(crate) fn assign(&mut self, value: Option<V>) -> Option<V> {
        match value {
            Some(v) => self.value.replace(v),
            None => None,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Node<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match std::str::from_utf8(&self.label) {
            Ok(s) => format!("`{}`", s),
            Err(_) => format!("{:?}", self.label.as_slice()),
        };
        f.debug_struct("Node")
            .field("label", &label)
            .field("value", &self.value)
            .field("children", &self.children)
            .finish()
    }
}

/// Length of the longest common prefix of `a` and `b`.
#[inline]
pub(crate) fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
