//! Network model shared by host networks and guest trees.
//!
//! - [Network]: Rooted DAG in arena layout; a tree is a network without
//!   reticulations.
//! - [Node]: Ordered parent and child adjacency plus an optional leaf label.
//! - [LeafLabelMap]: Label storage shared by both sides of a query, so that
//!   leaves only store a [LabelIndex].

/// Leaf label mapping to compact indices
pub mod leaf_label_map;
/// Network arena and local surgery
pub mod network;
/// Network node
pub mod node;
/// Pre- and post-order traversals
pub mod traversal;

pub use leaf_label_map::{LabelIndex, LeafLabelMap};
pub use network::{Network, NodeIndex};
pub use node::Node;
pub use traversal::{PostOrderIter, PreOrderIter};
