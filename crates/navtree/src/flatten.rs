//! Lazy pre-order flattening

use std::iter::{Enumerate, FusedIterator};
use std::slice;

use crate::node::NavNode;
use crate::path::{NavPath, Segment};

/// One node of a flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry<'a> {
    /// Path from the root, ending with this node's own segment
    pub path: NavPath,

    /// Child indices from the root down to this node. Unlike `path`, this
    /// tells apart siblings sharing a label or identifier, and feeds
    /// straight into [`NavigationTree::node_at`](crate::NavigationTree::node_at).
    pub position: Vec<usize>,

    /// The node itself
    pub node: &'a NavNode,
}

impl FlatEntry<'_> {
    /// Nesting depth; top-level nodes are at depth 1.
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}

/// Pre-order iterator over a node forest.
///
/// Every node is yielded exactly once, before any of its children,
/// siblings in declared order. Holds an explicit stack so depth costs no
/// recursion. Create a fresh one to restart.
#[derive(Debug, Clone)]
pub struct Flatten<'a> {
    stack: Vec<Enumerate<slice::Iter<'a, NavNode>>>,
    /// Segments of the categories currently being descended; always one
    /// shorter than `stack`
    ancestors: Vec<Segment>,
    /// Child indices of those same categories
    ancestor_pos: Vec<usize>,
}

impl<'a> Flatten<'a> {
    /// Flatten a forest of top-level nodes.
    pub fn new(roots: &'a [NavNode]) -> Self {
        Self {
            stack: vec![roots.iter().enumerate()],
            ancestors: Vec::new(),
            ancestor_pos: Vec::new(),
        }
    }
}

impl<'a> Iterator for Flatten<'a> {
    type Item = FlatEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some((i, node)) => {
                    let segment = node.segment();
                    let mut segments = self.ancestors.clone();
                    segments.push(segment.clone());
                    let mut position = self.ancestor_pos.clone();
                    position.push(i);

                    if let NavNode::Category(category) = node {
                        self.stack.push(category.items.iter().enumerate());
                        self.ancestors.push(segment);
                        self.ancestor_pos.push(i);
                    }

                    return Some(FlatEntry {
                        path: NavPath::from(segments),
                        position,
                        node,
                    });
                }
                None => {
                    self.stack.pop();
                    self.ancestors.pop();
                    self.ancestor_pos.pop();
                }
            }
        }
    }
}

impl FusedIterator for Flatten<'_> {}
