//! Minimal induced subtrees of a [MulTree].

use crate::display::mul_tree::{MulIndex, MulTree};

/// The smallest subtree of a [MulTree] spanning a set of nodes, with
/// unary nodes suppressed.
///
/// Contains the given nodes and all pairwise lowest common ancestors,
/// stored in preorder of the MUL-tree.
#[derive(Debug, Clone)]
pub struct InducedTree {
    /// MUL-tree nodes, sorted by preorder
    nodes: Vec<MulIndex>,
    /// Parent position per node, `None` for the top node
    parents: Vec<Option<usize>>,
    /// Children positions per node
    children: Vec<Vec<usize>>,
}

impl InducedTree {
    /// Builds the induced subtree spanning `sorted` in `mul`.
    ///
    /// # Arguments
    /// * `mul` - The surrounding MUL-tree
    /// * `sorted` - Distinct nodes of `mul` in increasing preorder
    pub fn build(mul: &MulTree, sorted: &[MulIndex]) -> InducedTree {
        // LCAs of preorder-consecutive nodes suffice for all pairwise LCAs
        let mut nodes: Vec<MulIndex> = Vec::with_capacity(2 * sorted.len());
        nodes.extend_from_slice(sorted);
        nodes.extend(sorted.windows(2).map(|w| mul.lca(w[0], w[1])));
        nodes.sort_unstable();
        nodes.dedup();

        let mut parents = vec![None; nodes.len()];
        let mut children = vec![Vec::new(); nodes.len()];
        let mut stack: Vec<usize> = Vec::new();
        for (pos, &v) in nodes.iter().enumerate() {
            while let Some(&top) = stack.last() {
                if mul.is_ancestor(nodes[top], v) {
                    break;
                }
                stack.pop();
            }
            if let Some(&top) = stack.last() {
                parents[pos] = Some(top);
                children[top].push(pos);
            }
            stack.push(pos);
        }

        InducedTree {
            nodes,
            parents,
            children,
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

    /// Returns the MUL-tree node at position `pos`.
    pub fn node(&self, pos: usize) -> MulIndex {
        self.nodes[pos]
    }

    /// Returns the position of the parent of `pos`.
    pub fn parent(&self, pos: usize) -> Option<usize> {
        self.parents[pos]
    }

    /// Returns the positions of the children of `pos`.
    pub fn children(&self, pos: usize) -> &[usize] {
        &self.children[pos]
    }

    /// Returns the position of MUL-tree node `v`, if it is part of the tree.
    pub fn position(&self, v: MulIndex) -> Option<usize> {
        self.nodes.binary_search(&v).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LeafLabelMap;
    use crate::newick::parse_network;

    #[test]
    fn test_induced_tree_adds_lcas() {
        let mut labels = LeafLabelMap::new();
        let tree = parse_network("(((A,B),C),(D,E));", &mut labels).unwrap();
        let mul = MulTree::from_tree(&tree).unwrap();
        // A = 3, C = 5, D = 7
        let induced = InducedTree::build(&mul, &[3, 5, 7]);
        assert_eq!(induced.len(), 5);
        let top = induced.position(0).unwrap();
        assert_eq!(induced.parent(top), None);
        let left = induced.position(1).unwrap();
        assert_eq!(induced.parent(left), Some(top));
        assert_eq!(induced.children(left).len(), 2);
        assert_eq!(induced.parent(induced.position(7).unwrap()), Some(top));
    }
}
