//! Debug utilities for troubleshooting tree structure.

use std::fmt::Debug;
use std::io::{self, Write};

use crate::{Node, RadixTree};

impl<V: Debug> RadixTree<V> {
    /// Write the node structure, one node per line, indented by depth.
    pub fn dump<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "=== RadixTree ===")?;
        writeln!(out, "Size: {}", self.count)?;
        if self.root.is_untouched() {
            writeln!(out, "(empty)")?;
        } else {
            dump_node(&mut out, &self.root, 0)?;
        }
        writeln!(out, "=================")
    }
}

fn dump_node<V: Debug, W: Write>(out: &mut W, node: &Node<V>, depth: usize) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    match &node.value {
        Some(value) => writeln!(
            out,
            "{}{:?} = {:?}",
            indent,
            String::from_utf8_lossy(&node.label),
            value
        )?,
        None => writeln!(
            out,
            "{}{:?} (children={})",
            indent,
            String::from_utf8_lossy(&node.label),
            node.children.len()
        )?,
    }
    for child in &node.children {
        dump_node(out, child, depth + 1)?;
    }
    Ok(())
}

impl<V> RadixTree<V> {
    /// Verify tree integrity - returns list of issues found.
    pub fn verify_integrity(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let mut path = Vec::new();
        let valued = verify_node(&self.root, true, &mut path, &mut issues);
        if valued != self.count {
            issues.push(format!(
                "{} valued nodes reachable but len()={}",
                valued, self.count
            ));
        }
        issues
    }
}

fn verify_node<V>(
    node: &Node<V>,
    is_root: bool,
    path: &mut Vec<u8>,
    issues: &mut Vec<String>,
) -> usize {
    if !is_root && node.label.is_empty() {
        issues.push(format!("Non-root node under {:?} has empty label", path));
    }
    if node.keys.len() != node.children.len() {
        issues.push(format!(
            "Node {:?} has {} keys but {} children",
            path,
            node.keys.len(),
            node.children.len()
        ));
    }
    if node.keys.windows(2).any(|w| w[0] >= w[1]) {
        issues.push(format!(
            "Node {:?} child keys not strictly ascending: {:?}",
            path,
            node.keys.as_slice()
        ));
    }

    let mark = path.len();
    path.extend_from_slice(&node.label);

    let mut valued = usize::from(node.value.is_some());
    for (key, child) in node.keys.iter().zip(&node.children) {
        if child.label.first() != Some(key) {
            issues.push(format!(
                "Child of {:?} keyed {:#04x} has label {:?}",
                path,
                key,
                child.label.as_slice()
            ));
        }
        valued += verify_node(child, false, path, issues);
    }

    path.truncate(mark);
    valued
}
