//! Traversals of a [Network].
//!
//! Both iterators are stack-based and visit every node reachable from the
//! start node exactly once, even when it is reachable along several paths.

use crate::model::network::{Network, NodeIndex};

impl Network {
    /// Returns an iterator over the nodes below the root in post-order
    /// (children before parents).
    ///
    /// On a DAG this yields a reverse topological order.
    ///
    /// # Example
    /// ```
    /// use treedisplay::model::{LeafLabelMap, Network};
    ///
    /// let mut labels = LeafLabelMap::new();
    /// let mut net = Network::new();
    /// let root = net.add_internal();
    /// let a = net.add_leaf(labels.get_or_insert("A"));
    /// let b = net.add_leaf(labels.get_or_insert("B"));
    /// net.add_edge(root, a);
    /// net.add_edge(root, b);
    /// net.set_root(root);
    ///
    /// let order: Vec<_> = net.post_order_iter().collect();
    /// assert_eq!(order, vec![a, b, root]);
    /// ```
    pub fn post_order_iter(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self, self.root())
    }

    /// Returns an iterator over the nodes below `start` in post-order.
    pub fn post_order_from(&self, start: NodeIndex) -> PostOrderIter<'_> {
        PostOrderIter::new(self, Some(start))
    }

    /// Returns an iterator over the nodes below the root in pre-order
    /// (parents before children).
    pub fn pre_order_iter(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self, self.root())
    }

    /// Returns an iterator over the nodes below `start` in pre-order.
    pub fn pre_order_from(&self, start: NodeIndex) -> PreOrderIter<'_> {
        PreOrderIter::new(self, Some(start))
    }

    /// Returns the nodes of the network in topological order (parents
    /// before children), for the part reachable from the root.
    pub fn topological_order(&self) -> Vec<NodeIndex> {
        let mut order: Vec<NodeIndex> = self.post_order_iter().collect();
        order.reverse();
        order
    }

    /// Returns a flag per arena slot telling whether it lies below `start`
    /// (including `start` itself).
    pub fn descendant_flags(&self, start: NodeIndex) -> Vec<bool> {
        let mut flags = vec![false; self.capacity()];
        for v in self.pre_order_from(start) {
            flags[v] = true;
        }
        flags
    }

    /// Returns a flag per arena slot telling whether it lies below `start`
    /// and every path from the root to it passes through `start`.
    pub fn dominated_flags(&self, start: NodeIndex) -> Vec<bool> {
        let mut avoiding = vec![false; self.capacity()];
        let mut stack: Vec<NodeIndex> = self.root().filter(|&r| r != start).into_iter().collect();
        while let Some(v) = stack.pop() {
            if avoiding[v] {
                continue;
            }
            avoiding[v] = true;
            stack.extend(
                self.children(v)
                    .iter()
                    .copied()
                    .filter(|&c| c != start && !avoiding[c]),
            );
        }

        let mut flags = self.descendant_flags(start);
        for (flag, reached) in flags.iter_mut().zip(&avoiding) {
            if *reached {
                *flag = false;
            }
        }
        flags
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator for post-order traversal (children before parents).
///
/// Each node is returned after all of its descendants.
pub struct PostOrderIter<'a> {
    network: &'a Network,
    stack: Vec<(NodeIndex, bool)>, // (index, children_visited)
    visited: Vec<bool>,
}

impl<'a> PostOrderIter<'a> {
    fn new(network: &'a Network, start: Option<NodeIndex>) -> Self {
        PostOrderIter {
            network,
            stack: start.map(|s| (s, false)).into_iter().collect(),
            visited: vec![false; network.capacity()],
        }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            if children_visited {
                return Some(index);
            }
            if self.visited[index] {
                continue;
            }
            self.visited[index] = true;
            self.stack.push((index, true));
            // Reversed, so the first child is processed first
            for &c in self.network.children(index).iter().rev() {
                if !self.visited[c] {
                    self.stack.push((c, false));
                }
            }
        }
        None
    }
}

/// Iterator for pre-order traversal (parents before children).
///
/// Each node is returned before any of its descendants it is the first
/// visited ancestor of.
pub struct PreOrderIter<'a> {
    network: &'a Network,
    stack: Vec<NodeIndex>,
    visited: Vec<bool>,
}

impl<'a> PreOrderIter<'a> {
    fn new(network: &'a Network, start: Option<NodeIndex>) -> Self {
        PreOrderIter {
            network,
            stack: start.into_iter().collect(),
            visited: vec![false; network.capacity()],
        }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(index) = self.stack.pop() {
            if self.visited[index] {
                continue;
            }
            self.visited[index] = true;
            for &c in self.network.children(index).iter().rev() {
                if !self.visited[c] {
                    self.stack.push(c);
                }
            }
            return Some(index);
        }
        None
    }
}
