//! Node module for phylogenetic network representation.

use crate::model::leaf_label_map::LabelIndex;
use crate::model::network::NodeIndex;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// Represents a node of a rooted phylogenetic network (or tree).
///
/// Depending on its degrees, a node is the
/// - **root**: in-degree 0,
/// - **reticulation**: in-degree at least 2,
/// - **tree node**: in-degree at most 1 and out-degree at least 1,
/// - **leaf**: out-degree 0, usually labeled.
///
/// # Invariants
/// - Adjacency is kept symmetric by [Network](crate::model::Network):
///   `v` appears in `children` of `u` exactly as often as `u` appears in
///   `parents` of `v`. Repeated entries model parallel arcs.
/// - Removed nodes keep their slot in the arena, flagged as not alive and
///   without any adjacency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    /// Ordered parent adjacency
    pub(crate) parents: Vec<NodeIndex>,
    /// Ordered child adjacency
    pub(crate) children: Vec<NodeIndex>,
    /// Leaf label, if any
    pub(crate) label: Option<LabelIndex>,
    /// Whether the node is still part of the network
    pub(crate) alive: bool,
}

impl Node {
    /// Creates a new, isolated node with the given optional label.
    pub fn new(label: Option<LabelIndex>) -> Self {
        Node {
            parents: Vec::new(),
            children: Vec::new(),
            label,
            alive: true,
        }
    }

    /// Returns the parents of this node (with repetition for parallel arcs).
    pub fn parents(&self) -> &[NodeIndex] {
        &self.parents
    }

    /// Returns the children of this node (with repetition for parallel arcs).
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Returns the label index, if any.
    pub fn label(&self) -> Option<LabelIndex> {
        self.label
    }

    /// Returns the number of incoming arcs.
    pub fn in_degree(&self) -> usize {
        self.parents.len()
    }

    /// Returns the number of outgoing arcs.
    pub fn out_degree(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns `true` if this node has more than one incoming arc.
    pub fn is_reticulation(&self) -> bool {
        self.parents.len() > 1
    }

    /// Returns `true` if this node has at most one incoming arc and at least one child.
    pub fn is_tree_node(&self) -> bool {
        self.parents.len() <= 1 && !self.children.is_empty()
    }

    /// Returns `true` if this node has not been removed.
    pub fn is_alive(&self) -> bool {
        self.alive
    }
}
