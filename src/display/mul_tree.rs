//! Multi-labeled trees obtained by unzipping a host network.
//!
//! A [MulTree] stores its nodes in preorder, so that a node index doubles as
//! its order number: ancestors come first, and a subtree occupies the
//! contiguous index range `v..subtree_end(v)`.

use crate::model::{LabelIndex, Network, NodeIndex};
use log::warn;

/// Index of a node in a [MulTree], equal to its preorder number.
pub type MulIndex = usize;

/// A node of a [MulTree].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MulNode {
    /// Parent, `None` for the root
    pub parent: Option<MulIndex>,
    /// Children in host order
    pub children: Vec<MulIndex>,
    /// Label, only set for leaves
    pub label: Option<LabelIndex>,
    /// Host node this copy was made from
    pub origin: NodeIndex,
}

// =#========================================================================#=
// MUL TREE
// =#========================================================================#=
/// A rooted tree in which a label may occur on several leaves.
///
/// Built by [`MulTree::unzip`], which copies the part of a host network
/// below a start node and duplicates everything below a reticulation once
/// per path reaching it. Nodes with a single child are skipped, so every
/// internal node has at least two children.
#[derive(Debug, Clone)]
pub struct MulTree {
    nodes: Vec<MulNode>,
    subtree_end: Vec<MulIndex>,
    depth: Vec<usize>,
    /// Binary lifting table, `ancestors[k][v]` is the `2^k`-th ancestor of `v`
    /// (or the root)
    ancestors: Vec<Vec<MulIndex>>,
}

impl MulTree {
    /// Unzips the part of `host` below `start` into a MUL-tree.
    ///
    /// The walk keeps no seen-set: a node reachable
    /// along `k` paths is copied `k` times.
    ///
    /// # Arguments
    /// * `host` - The network to unzip
    /// * `start` - Node whose descendants are unzipped
    /// * `max_nodes` - Cap on the size of the MUL-tree
    ///
    /// # Returns
    /// The MUL-tree, or `None` if it would exceed `max_nodes` nodes.
    pub fn unzip(host: &Network, start: NodeIndex, max_nodes: usize) -> Option<MulTree> {
        let mut nodes: Vec<MulNode> = Vec::new();
        let mut stack: Vec<(NodeIndex, Option<MulIndex>)> = vec![(start, None)];

        while let Some((mut v, parent)) = stack.pop() {
            while let [only_child] = host.children(v) {
                v = *only_child;
            }

            if nodes.len() >= max_nodes {
                warn!(
                    "Unzipping below host node {} exceeds {} nodes, giving up",
                    start, max_nodes
                );
                return None;
            }

            let index = nodes.len();
            nodes.push(MulNode {
                parent,
                children: Vec::new(),
                label: if host.is_leaf(v) { host.label(v) } else { None },
                origin: v,
            });
            if let Some(p) = parent {
                nodes[p].children.push(index);
            }
            // Reversed, so the first child gets the next preorder number
            for &c in host.children(v).iter().rev() {
                stack.push((c, Some(index)));
            }
        }

        Some(Self::from_preorder(nodes))
    }

    /// Copies a tree into a MUL-tree.
    ///
    /// Equivalent to unzipping from the root without a size cap.
    pub fn from_tree(tree: &Network) -> Option<MulTree> {
        tree.root().and_then(|root| Self::unzip(tree, root, usize::MAX))
    }

    /// Builds the index structures of a tree whose nodes are in preorder.
    fn from_preorder(nodes: Vec<MulNode>) -> MulTree {
        let n = nodes.len();

        let mut subtree_end = vec![0; n];
        for v in (0..n).rev() {
            subtree_end[v] = nodes[v].children.last().map_or(v + 1, |&c| subtree_end[c]);
        }

        let mut depth: Vec<usize> = vec![0; n];
        let mut first_row = vec![0; n];
        for v in 0..n {
            if let Some(p) = nodes[v].parent {
                depth[v] = depth[p] + 1;
                first_row[v] = p;
            }
        }

        let max_depth = depth.iter().copied().max().unwrap_or(0);
        let levels = (usize::BITS - max_depth.leading_zeros()).max(1) as usize;
        let mut ancestors = Vec::with_capacity(levels);
        ancestors.push(first_row);
        for k in 1..levels {
            let prev = &ancestors[k - 1];
            let row: Vec<MulIndex> = (0..n).map(|v| prev[prev[v]]).collect();
            ancestors.push(row);
        }

        MulTree {
            nodes,
            subtree_end,
            depth,
            ancestors,
        }
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node at index `v`.
    pub fn node(&self, v: MulIndex) -> &MulNode {
        &self.nodes[v]
    }

    /// Returns the nodes in preorder.
    pub fn nodes(&self) -> &[MulNode] {
        &self.nodes
    }

    /// Returns one past the last index in the subtree of `v`.
    pub fn subtree_end(&self, v: MulIndex) -> MulIndex {
        self.subtree_end[v]
    }

    /// Returns the depth of `v`, the root having depth 0.
    pub fn depth(&self, v: MulIndex) -> usize {
        self.depth[v]
    }

    /// Returns `true` if `a` is an ancestor of `b` (or `b` itself).
    pub fn is_ancestor(&self, a: MulIndex, b: MulIndex) -> bool {
        a <= b && b < self.subtree_end[a]
    }

    /// Returns the lowest common ancestor of `a` and `b`.
    pub fn lca(&self, a: MulIndex, b: MulIndex) -> MulIndex {
        if self.is_ancestor(a, b) {
            return a;
        }
        if self.is_ancestor(b, a) {
            return b;
        }
        let mut a = a;
        for row in self.ancestors.iter().rev() {
            if !self.is_ancestor(row[a], b) {
                a = row[a];
            }
        }
        self.ancestors[0][a]
    }

    /// Returns the leaves in preorder with their labels.
    pub fn labeled_leaves(&self) -> impl Iterator<Item = (MulIndex, LabelIndex)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.children.is_empty())
            .filter_map(|(i, n)| n.label.map(|l| (i, l)))
    }
}
