//! Constants for the extended Newick parser and writer.

/// Newick label delimiters: parentheses, comma, colon, semicolon, whitespace, comment start
pub(crate) const NEWICK_LABEL_DELIMITERS: &[u8] = b"([,:; \n\t\r)]";

/// Separator between a node name and its hybrid tag, as in `A#H1`
pub(crate) const HYBRID_MARKER: char = '#';

/// Prefix of hybrid tags written by [to_newick](super::to_newick)
pub(crate) const HYBRID_TAG_PREFIX: &str = "H";

/// Default guess for number of nodes, when unknown
pub(crate) const DEFAULT_NUM_NODES_GUESS: usize = 16;
