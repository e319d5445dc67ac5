//! Depth-first traversal: callback visiting, rendering and iteration.
//!
//! All three walk the tree pre-order with siblings in first-byte order. A
//! node's key is a prefix of its descendants' keys, so the output is in
//! ascending lexicographic key order.

use std::io::{self, Write};

use crate::{Node, RadixTree};

/// Rendering options for [`RadixTree::print`].
#[derive(Debug, Clone)]
pub struct PrintOptions {
    /// Include the root's label as the first key segment.
    pub with_root_label: bool,
    /// Written between key segments and before the rendered value.
    pub separator: String,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            with_root_label: true,
            separator: " ".to_string(),
        }
    }
}

impl<V> RadixTree<V> {
    /// Call `f` with the full key and value of every stored entry.
    pub fn visit<F>(&self, mut f: F)
    where
        F: FnMut(&[u8], &V),
    {
        let mut key = Vec::new();
        visit_node(&self.root, &mut key, &mut f);
    }

    /// Write one line per stored entry: the node labels along its path,
    /// each followed by the separator, then `render(value)`.
    ///
    /// Labels are decoded as lossy UTF-8. The root segment is dropped when
    /// `with_root_label` is off or the root label is empty.
    pub fn print<W, R>(&self, mut out: W, options: &PrintOptions, render: R) -> io::Result<()>
    where
        W: Write,
        R: Fn(&V) -> String,
    {
        let mut printer = Printer {
            out: &mut out,
            separator: &options.separator,
            render: &render,
            segments: Vec::new(),
        };
        printer.node(&self.root, options.with_root_label)?;
        out.flush()
    }

    /// Iterate over `(key, value)` pairs in the same order as [`visit`](Self::visit).
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            stack: vec![(&self.root, 0)],
            key: Vec::new(),
        }
    }
}

fn visit_node<V, F>(node: &Node<V>, key: &mut Vec<u8>, f: &mut F)
where
    F: FnMut(&[u8], &V),
{
    let mark = key.len();
    key.extend_from_slice(&node.label);
    if let Some(value) = &node.value {
        f(key, value);
    }
    for child in &node.children {
        visit_node(child, key, f);
    }
    key.truncate(mark);
}

struct Printer<'a, 't, W, R> {
    out: &'a mut W,
    separator: &'a str,
    render: &'a R,
    segments: Vec<&'t [u8]>,
}

impl<'a, 't, W: Write, R> Printer<'a, 't, W, R> {
    fn node<V>(&mut self, node: &'t Node<V>, with_label: bool) -> io::Result<()>
    where
        R: Fn(&V) -> String,
    {
        let pushed = with_label && !node.label.is_empty();
        if pushed {
            self.segments.push(&node.label);
        }

        if let Some(value) = &node.value {
            let mut line = String::new();
            for segment in &self.segments {
                line.push_str(&String::from_utf8_lossy(segment));
                line.push_str(self.separator);
            }
            line.push_str(&(self.render)(value));
            writeln!(self.out, "{}", line)?;
        }

        for child in &node.children {
            self.node(child, true)?;
        }

        if pushed {
            self.segments.pop();
        }
        Ok(())
    }
}

/// Iterator over the entries of a [`RadixTree`], yielding owned keys.
pub struct Iter<'a, V> {
    /// Pending nodes with the key length of their parent.
    stack: Vec<(&'a Node<V>, usize)>,
    key: Vec<u8>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Vec<u8>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, depth)) = self.stack.pop() {
            self.key.truncate(depth);
            self.key.extend_from_slice(&node.label);

            let depth = self.key.len();
            for child in node.children.iter().rev() {
                self.stack.push((child, depth));
            }

            if let Some(value) = &node.value {
                return Some((self.key.clone(), value));
            }
        }
        None
    }
}

impl<'a, V> IntoIterator for &'a RadixTree<V> {
    type Item = (Vec<u8>, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
