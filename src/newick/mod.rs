//! Extended Newick parser and writer for phylogenetic networks.
//!
//! This module provides [`NewickParser`] to parse extended Newick strings
//! into [`Network`]s and [`to_newick`] to write them back.
//!
//! # Quick API
//! * [`parse_network`] - parses a single string against a shared [`LeafLabelMap`]
//! * [`parse_pair`] - parses a host network and a guest tree with a fresh [`LeafLabelMap`]
//! * [`to_newick`] - writes a network in the same dialect
//!
//! # Format
//! The extended Newick format marks reticulations with hybrid tags:
//! `((A,(C)#H1),(B,#H1));` has a reticulation with parents `(A,...)` and
//! `(B,...)` and the single child `C`. See [`NewickParser`] for the grammar.

mod defs;
mod parser;
pub mod writer;

pub use self::parser::NewickParser;
pub use self::writer::to_newick;

use crate::model::{LeafLabelMap, Network};
use crate::parser::byte_parser::ByteParser;
use crate::parser::ParsingError;

// ============================================================================
// QUICK PARSING API (pub)
// ============================================================================
/// Parses a single extended Newick string into a [`Network`].
///
/// Labels are inserted into (or looked up in) `labels`. Trailing whitespace
/// and comments after the `;` are allowed, any other trailing input is an error.
///
/// # Example
/// ```
/// use treedisplay::model::LeafLabelMap;
/// use treedisplay::newick::parse_network;
///
/// let mut labels = LeafLabelMap::new();
/// let tree = parse_network("((A:0.1,B:0.2):0.3,C:0.4);", &mut labels).unwrap();
/// assert!(tree.is_tree());
/// assert_eq!(tree.num_leaves(), 3);
/// ```
pub fn parse_network(newick: &str, labels: &mut LeafLabelMap) -> Result<Network, ParsingError> {
    let mut byte_parser = ByteParser::for_str(newick);
    let network = NewickParser::new().parse(&mut byte_parser, labels)?;

    byte_parser.skip_comment_and_whitespace()?;
    if !byte_parser.is_eof() {
        return Err(ParsingError::invalid_newick_string(
            &byte_parser,
            "Unexpected input after ';'".to_string(),
        ));
    }
    Ok(network)
}

/// Parses a host network and a guest tree against one fresh [`LeafLabelMap`].
///
/// # Returns
/// `(host, guest, labels)` on success
pub fn parse_pair(
    host_newick: &str,
    guest_newick: &str,
) -> Result<(Network, Network, LeafLabelMap), ParsingError> {
    let mut labels = LeafLabelMap::new();
    let host = parse_network(host_newick, &mut labels)?;
    let guest = parse_network(guest_newick, &mut labels)?;
    Ok((host, guest, labels))
}
