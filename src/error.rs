//! Error types for containment queries.
//!
//! Only malformed input is an error: "not displayed" is a regular `false`
//! answer of [Containment::displayed](crate::containment::Containment::displayed).

use crate::model::{LabelIndex, NodeIndex};
use crate::parser::ParsingError;
use std::fmt;
use thiserror::Error;

/// Side of a containment query an input problem was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The host network
    Host,
    /// The guest tree
    Guest,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Side::Host => write!(f, "host network"),
            Side::Guest => write!(f, "guest tree"),
        }
    }
}

// =#========================================================================#=
// CONTAINMENT ERROR
// =#========================================================================#=
/// Malformed-input errors, detected when a query is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContainmentError {
    /// The network has no nodes at all.
    #[error("network has no nodes")]
    EmptyNetwork,
    /// The network does not have exactly one node of in-degree 0.
    #[error("network has {count} roots, expected exactly one")]
    MultipleRoots {
        /// Number of nodes without parents
        count: usize,
    },
    /// The network contains a directed cycle.
    #[error("network contains a directed cycle")]
    Cyclic,
    /// A network required to be a tree has a node with more than one parent.
    #[error("network is not a tree: node {node} has {in_degree} parents")]
    NotATree {
        /// Offending node
        node: NodeIndex,
        /// Its in-degree
        in_degree: usize,
    },
    /// A leaf label occurs more than once on one side.
    #[error("label {label} occurs more than once in the {side}")]
    DuplicateLabel {
        /// Repeated label
        label: LabelIndex,
        /// Where it was repeated
        side: Side,
    },
    /// A leaf of the guest tree carries no label.
    #[error("guest leaf {node} carries no label")]
    UnlabeledGuestLeaf {
        /// Offending leaf
        node: NodeIndex,
    },
}

// =#========================================================================#=
// CRATE ERROR
// =#========================================================================#=
/// Error of the convenience API, which parses and checks in one go.
#[derive(Debug, Error)]
pub enum Error {
    /// The input could not be parsed.
    #[error(transparent)]
    Parsing(#[from] ParsingError),
    /// The parsed input is not a valid containment query.
    #[error(transparent)]
    Containment(#[from] ContainmentError),
}
