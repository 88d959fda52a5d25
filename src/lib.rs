//! Treedisplay decides whether a phylogenetic tree is displayed by a rooted
//! phylogenetic network (the tree containment problem).
//!
//! A network displays a tree if one can choose one parent for every
//! reticulation such that the resulting tree, restricted to the tree's
//! labels and with degree-2 nodes suppressed, is the tree.
//! Core functionality provided:
//! - Model: [Network](crate::model::Network) is an arena-based rooted DAG
//!   used for both hosts and guests; leaf labels are interned in a shared
//!   [LeafLabelMap](crate::model::LeafLabelMap).
//! - Newick: Extended Newick parsing and writing, with reticulations marked
//!   as `#H1` tags (see [crate::newick]).
//! - Tree DP: Tree-in-tree containment on (MUL-)trees (see [crate::display]).
//! - Containment: Reduction rules plus branching for general networks
//!   (see [crate::containment]).
//! - Configurability: Rules can be switched off and the tree DP tuned via
//!   [ContainmentConfig].
//!
//! Limitations:
//! - Only leaf labels are considered, branch lengths and other annotations
//!   are skipped.
//! - Worst-case running time is exponential in the number of reticulations.
//!
//! # Usage patterns
//! 1. [is_displayed] answers the question for two Newick strings.
//! 2. Parse both sides with [newick::parse_pair] (or build them by hand) and
//!    prepare a [Containment] for full control and statistics.
//!
//! ## Example
//! ```
//! use treedisplay::is_displayed;
//!
//! let host = "((a,(c)#H1),(b,#H1));";
//! assert!(is_displayed(host, "((a,c),b);").unwrap());
//! assert!(is_displayed(host, "((b,c),a);").unwrap());
//! assert!(!is_displayed(host, "((a,b),c);").unwrap());
//! ```
//!
//! ## Example Configuration
//! ```
//! use treedisplay::{Containment, ContainmentConfig};
//! use treedisplay::newick::parse_pair;
//!
//! let (host, guest, _labels) = parse_pair("((a,(c)#H1),(b,#H1));", "((b,c),a);")?;
//! let config = ContainmentConfig::default().with_visible_component_rule(false);
//! let (displayed, stats) = Containment::with_config(&host, &guest, config)?.displayed_with_stats();
//! assert!(displayed);
//! println!("{} branches, {} reductions", stats.branches, stats.reductions);
//! # Ok::<(), treedisplay::Error>(())
//! ```

pub mod config;
pub mod containment;
pub mod display;
pub mod error;
pub mod label_matching;
pub mod model;
pub mod newick;
pub mod parser;

pub use config::ContainmentConfig;
pub use containment::{Containment, SearchStats};
pub use error::{ContainmentError, Error, Side};

/// Returns whether the tree given as Newick string `guest` is displayed by
/// the network given as extended Newick string `host`.
///
/// # Errors
/// - [Error::Parsing] if either string is malformed
/// - [Error::Containment] if the inputs are not a valid host and guest
pub fn is_displayed(host: &str, guest: &str) -> Result<bool, Error> {
    let (host, guest, _labels) = newick::parse_pair(host, guest)?;
    Ok(Containment::new(&host, &guest)?.displayed())
}
