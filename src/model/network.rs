//! Provides the mutable network representation shared by host and guest.
//!
//! * [Network] - Rooted DAG using the arena pattern, with ordered parent and
//!   child adjacency per [Node]; a tree is a network without reticulations.
//! * [NodeIndex] as type used to index nodes in a network
//!
//! Besides construction, [Network] offers the local surgery the reduction
//! rules are built from: arc removal, contraction of a single-child node
//! up or down, node removal and suppression.

use crate::error::ContainmentError;
use crate::model::leaf_label_map::LabelIndex;
use crate::model::node::Node;

/// Index of a node in a network (arena).
pub type NodeIndex = usize;

// =$========================================================================$=
// NETWORK
// =$========================================================================$=
/// A rooted phylogenetic network represented using the arena pattern on [Node].
///
/// Nodes are stored in a contiguous vector and referenced by [NodeIndex].
/// Indices are stable: removing a node only flags its slot, so indices held
/// by bookkeeping structures stay valid for the whole lifetime of the network.
///
/// # Structure
/// - Exactly one root once construction is finished (see [`Network::validate`]).
/// - Parallel arcs are allowed and stored as repeated adjacency entries.
/// - Leaves reference labels via [LabelIndex] into a shared
///   [LeafLabelMap](crate::model::LeafLabelMap).
#[derive(Debug, Clone, Default)]
pub struct Network {
    /// Nodes of this network (arena pattern)
    nodes: Vec<Node>,
    /// Index of the root, if set
    root: Option<NodeIndex>,
    /// Number of nodes not removed
    num_alive: usize,
    /// Number of arcs, counting parallel arcs individually
    num_edges: usize,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl Network {
    /// Creates a new, empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty network with capacity for `num_nodes` nodes.
    pub fn with_capacity(num_nodes: usize) -> Self {
        Network {
            nodes: Vec::with_capacity(num_nodes),
            ..Self::default()
        }
    }

    /// Adds an isolated node, returning its index.
    pub fn add_node(&mut self, label: Option<LabelIndex>) -> NodeIndex {
        let index = self.nodes.len();
        self.nodes.push(Node::new(label));
        self.num_alive += 1;
        index
    }

    /// Adds an isolated labeled node, which becomes a leaf once it has a parent.
    pub fn add_leaf(&mut self, label: LabelIndex) -> NodeIndex {
        self.add_node(Some(label))
    }

    /// Adds an isolated unlabeled node.
    pub fn add_internal(&mut self) -> NodeIndex {
        self.add_node(None)
    }

    /// Adds the arc `parent -> child`.
    ///
    /// # Panics
    /// Panics if either index is out of bounds.
    pub fn add_edge(&mut self, parent: NodeIndex, child: NodeIndex) {
        debug_assert!(self.nodes[parent].alive && self.nodes[child].alive);
        self.nodes[parent].children.push(child);
        self.nodes[child].parents.push(parent);
        self.num_edges += 1;
    }

    /// Removes one arc `parent -> child`.
    ///
    /// # Returns
    /// `true` if such an arc existed.
    pub fn remove_edge(&mut self, parent: NodeIndex, child: NodeIndex) -> bool {
        let Some(pos) = self.nodes[parent].children.iter().position(|&c| c == child) else {
            return false;
        };
        self.nodes[parent].children.remove(pos);
        if let Some(pos) = self.nodes[child].parents.iter().position(|&p| p == parent) {
            self.nodes[child].parents.remove(pos);
        }
        self.num_edges -= 1;
        true
    }

    /// Removes all (parallel) arcs `parent -> child`, returning how many there were.
    pub fn remove_all_edges(&mut self, parent: NodeIndex, child: NodeIndex) -> usize {
        let mut removed = 0;
        while self.remove_edge(parent, child) {
            removed += 1;
        }
        removed
    }

    /// Removes a node together with all its incident arcs.
    ///
    /// The slot stays in the arena, so other indices remain valid.
    pub fn remove_node(&mut self, v: NodeIndex) {
        if !self.nodes[v].alive {
            return;
        }
        while let Some(&c) = self.nodes[v].children.last() {
            self.remove_edge(v, c);
        }
        while let Some(&p) = self.nodes[v].parents.last() {
            self.remove_edge(p, v);
        }
        if self.root == Some(v) {
            self.root = None;
        }
        self.nodes[v].alive = false;
        self.num_alive -= 1;
    }

    /// Sets the root of this network.
    pub fn set_root(&mut self, root: NodeIndex) {
        self.root = Some(root);
    }

    /// Returns the index of the root, or `None` for an empty network.
    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Returns the node at the given index.
    ///
    /// # Panics
    /// Panics if `v` is out of bounds.
    pub fn node(&self, v: NodeIndex) -> &Node {
        &self.nodes[v]
    }

    /// Returns the parents of `v`.
    pub fn parents(&self, v: NodeIndex) -> &[NodeIndex] {
        &self.nodes[v].parents
    }

    /// Returns the children of `v`.
    pub fn children(&self, v: NodeIndex) -> &[NodeIndex] {
        &self.nodes[v].children
    }

    /// Returns the first parent of `v`, which is its only one in a tree.
    pub fn parent(&self, v: NodeIndex) -> Option<NodeIndex> {
        self.nodes[v].parents.first().copied()
    }

    /// Returns some child of `v`, e.g. the unique child of a reticulation.
    pub fn any_child(&self, v: NodeIndex) -> Option<NodeIndex> {
        self.nodes[v].children.first().copied()
    }

    /// Returns the in-degree of `v`.
    pub fn in_degree(&self, v: NodeIndex) -> usize {
        self.nodes[v].in_degree()
    }

    /// Returns the out-degree of `v`.
    pub fn out_degree(&self, v: NodeIndex) -> usize {
        self.nodes[v].out_degree()
    }

    /// Returns the label of `v`, if any.
    pub fn label(&self, v: NodeIndex) -> Option<LabelIndex> {
        self.nodes[v].label
    }

    /// Sets (or clears) the label of `v`.
    pub fn set_label(&mut self, v: NodeIndex, label: Option<LabelIndex>) {
        self.nodes[v].label = label;
    }

    /// Returns `true` if `v` has no children.
    pub fn is_leaf(&self, v: NodeIndex) -> bool {
        self.nodes[v].is_leaf()
    }

    /// Returns `true` if `v` has more than one parent.
    pub fn is_reticulation(&self, v: NodeIndex) -> bool {
        self.nodes[v].is_reticulation()
    }

    /// Returns `true` if `v` has not been removed.
    pub fn is_alive(&self, v: NodeIndex) -> bool {
        self.nodes.get(v).is_some_and(|n| n.alive)
    }

    /// Returns whether the arc `parent -> child` exists.
    pub fn has_edge(&self, parent: NodeIndex, child: NodeIndex) -> bool {
        self.nodes[parent].children.contains(&child)
    }

    /// Returns the size of the arena, i.e. one more than the largest index ever used.
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of nodes that have not been removed.
    pub fn num_nodes(&self) -> usize {
        self.num_alive
    }

    /// Returns the number of arcs.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    /// Returns an iterator over the indices of all nodes not removed.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.alive)
            .map(|(i, _)| i)
    }

    /// Returns an iterator over all leaves.
    pub fn leaves(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.node_indices().filter(|&v| self.nodes[v].is_leaf())
    }

    /// Returns the number of leaves.
    pub fn num_leaves(&self) -> usize {
        self.leaves().count()
    }

    /// Returns the number of reticulations.
    pub fn num_reticulations(&self) -> usize {
        self.node_indices()
            .filter(|&v| self.nodes[v].is_reticulation())
            .count()
    }

    /// Returns `true` if no node has more than one parent.
    pub fn is_tree(&self) -> bool {
        self.node_indices().all(|v| self.nodes[v].in_degree() <= 1)
    }

    /// Checks that no node has more than one parent.
    ///
    /// # Errors
    /// [ContainmentError::NotATree] naming the first reticulation found.
    pub fn check_tree(&self) -> Result<(), ContainmentError> {
        match self.node_indices().find(|&v| self.nodes[v].in_degree() > 1) {
            Some(node) => Err(ContainmentError::NotATree {
                node,
                in_degree: self.nodes[node].in_degree(),
            }),
            None => Ok(()),
        }
    }

    /// Finds the root of this network, checking that it is a rooted DAG.
    ///
    /// Checks:
    /// - At least one node
    /// - Exactly one node without parents
    /// - No directed cycle
    ///
    /// # Returns
    /// The index of the root, or the violated condition.
    pub fn find_root(&self) -> Result<NodeIndex, ContainmentError> {
        let alive: Vec<NodeIndex> = self.node_indices().collect();
        if alive.is_empty() {
            return Err(ContainmentError::EmptyNetwork);
        }

        let roots: Vec<NodeIndex> = alive
            .iter()
            .copied()
            .filter(|&v| self.nodes[v].parents.is_empty())
            .collect();
        if roots.len() != 1 {
            return Err(ContainmentError::MultipleRoots { count: roots.len() });
        }

        // Kahn's algorithm: a cycle leaves some nodes unprocessed
        let mut remaining: Vec<usize> = self.nodes.iter().map(|n| n.parents.len()).collect();
        let mut stack = roots.clone();
        let mut processed = 0;
        while let Some(v) = stack.pop() {
            processed += 1;
            for &c in &self.nodes[v].children {
                remaining[c] -= 1;
                if remaining[c] == 0 {
                    stack.push(c);
                }
            }
        }
        if processed != alive.len() {
            return Err(ContainmentError::Cyclic);
        }

        Ok(roots[0])
    }

    /// Validates that this network is a rooted DAG (see [`Network::find_root`])
    /// and sets its root.
    pub fn validate(&mut self) -> Result<NodeIndex, ContainmentError> {
        let root = self.find_root()?;
        self.root = Some(root);
        Ok(root)
    }
}

// ============================================================================
// Surgery (pub)
// ============================================================================
impl Network {
    /// Contracts the arc from `y` to its single child `z`, keeping `z`.
    ///
    /// Every parent of `y` becomes a parent of `z` (at the position `y` had
    /// among its children), and `y` is removed. If `y` was the root, `z`
    /// becomes the root. Arcs already present between a parent of `y` and
    /// `z` are kept, resulting in parallel arcs.
    ///
    /// # Returns
    /// The surviving node `z`.
    ///
    /// # Panics
    /// Panics if `y` does not have exactly one child.
    pub fn contract_down(&mut self, y: NodeIndex) -> NodeIndex {
        assert_eq!(self.out_degree(y), 1, "contract_down requires a single child");
        let z = self.nodes[y].children[0];
        self.remove_edge(y, z);
        let parents = self.nodes[y].parents.clone();
        for p in parents {
            self.replace_child(p, y, z);
        }
        if self.root == Some(y) {
            self.root = Some(z);
        }
        self.remove_node(y);
        z
    }

    /// Contracts the arc from `y` to its single child `z`, keeping `y`.
    ///
    /// `y` takes over the children and the label of `z`, and `z` is removed.
    ///
    /// # Returns
    /// The surviving node `y`.
    ///
    /// # Panics
    /// Panics if `y` does not have exactly one child or that child has
    /// other parents.
    pub fn contract_up(&mut self, y: NodeIndex) -> NodeIndex {
        assert_eq!(self.out_degree(y), 1, "contract_up requires a single child");
        let z = self.nodes[y].children[0];
        assert_eq!(self.in_degree(z), 1, "contract_up requires a child with a single parent");
        self.remove_edge(y, z);
        let grandchildren = self.nodes[z].children.clone();
        for w in grandchildren {
            self.replace_parent(w, z, y);
        }
        self.nodes[y].label = self.nodes[z].label;
        self.remove_node(z);
        y
    }

    /// Suppresses `v` if it has at most one parent and exactly one child.
    ///
    /// # Returns
    /// The node now taking the place of `v`, or `None` if `v` is not suppressible.
    pub fn suppress_node(&mut self, v: NodeIndex) -> Option<NodeIndex> {
        if self.in_degree(v) <= 1 && self.out_degree(v) == 1 {
            Some(self.contract_down(v))
        } else {
            None
        }
    }

    /// Inserts a new node `r` above `v`, such that all parents of `v` become
    /// parents of `r` and `r -> v` is the only arc entering `v`.
    ///
    /// # Returns
    /// The new node `r`.
    pub fn split_above(&mut self, v: NodeIndex) -> NodeIndex {
        let r = self.add_internal();
        let parents = self.nodes[v].parents.clone();
        for p in parents {
            self.replace_child(p, v, r);
        }
        self.add_edge(r, v);
        r
    }

    /// Replaces one arc `parent -> old` by `parent -> new`, keeping the
    /// position among the children of `parent`.
    fn replace_child(&mut self, parent: NodeIndex, old: NodeIndex, new: NodeIndex) {
        if let Some(pos) = self.nodes[parent].children.iter().position(|&c| c == old) {
            self.nodes[parent].children[pos] = new;
            if let Some(pos) = self.nodes[old].parents.iter().position(|&p| p == parent) {
                self.nodes[old].parents.remove(pos);
            }
            self.nodes[new].parents.push(parent);
        }
    }

    /// Replaces one arc `old -> child` by `new -> child`, keeping the
    /// position among the parents of `child`.
    fn replace_parent(&mut self, child: NodeIndex, old: NodeIndex, new: NodeIndex) {
        if let Some(pos) = self.nodes[child].parents.iter().position(|&p| p == old) {
            self.nodes[child].parents[pos] = new;
            if let Some(pos) = self.nodes[old].children.iter().position(|&c| c == child) {
                self.nodes[old].children.remove(pos);
            }
            self.nodes[new].children.push(child);
        }
    }
}

impl std::ops::Index<NodeIndex> for Network {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        &self.nodes[index]
    }
}
