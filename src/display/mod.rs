//! Display tests on trees and multi-labeled trees.
//!
//! - [TreeInTreeContainment]: Dynamic program listing, for each guest node,
//!   the lowest host nodes displaying its subtree.
//! - [TreeInComponent]: The same program on the MUL-tree unzipped below a
//!   host network node, used by the reduction rules.
//! - [MulTree]: Multi-labeled tree in preorder layout with LCA queries.

pub mod induced;
pub mod matching;
pub mod merge;
pub mod mul_tree;
pub mod tree_in_component;
pub mod tree_in_tree;

pub use mul_tree::{MulIndex, MulNode, MulTree};
pub use tree_in_component::TreeInComponent;
pub use tree_in_tree::TreeInTreeContainment;
