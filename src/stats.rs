//! Structural statistics.

use crate::{Node, RadixTree};

/// Shape of a [`RadixTree`] at a point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeStats {
    /// Total number of nodes, root included
    pub nodes: usize,
    /// Nodes holding a value
    pub valued_nodes: usize,
    /// Sum of all label lengths
    pub label_bytes: usize,
    /// Number of node boundaries on the longest root-to-leaf path
    pub max_depth: usize,
    /// Largest child count of any node
    pub max_fanout: usize,
}

impl<V> RadixTree<V> {
    /// Walk the whole tree and collect its [`TreeStats`].
    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        if self.root.is_untouched() {
            return stats;
        }
        collect(&self.root, 1, &mut stats);
        stats
    }
}

fn collect<V>(node: &Node<V>, depth: usize, stats: &mut TreeStats) {
    stats.nodes += 1;
    stats.label_bytes += node.label.len();
    stats.max_depth = stats.max_depth.max(depth);
    stats.max_fanout = stats.max_fanout.max(node.children.len());
    if node.value.is_some() {
        stats.valued_nodes += 1;
    }
    for child in &node.children {
        collect(child, depth + 1, stats);
    }
}
