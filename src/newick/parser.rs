//! Recursive descent parser for extended Newick strings.

use crate::model::{LeafLabelMap, Network, NodeIndex};
use crate::newick::defs::{DEFAULT_NUM_NODES_GUESS, HYBRID_MARKER, NEWICK_LABEL_DELIMITERS};
use crate::parser::byte_parser::ByteParser;
use crate::parser::parsing_error::ParsingError;
use rustc_hash::FxHashMap;

/// Parser for extended Newick strings describing rooted phylogenetic
/// [Network]s (and, as special case, trees).
///
/// Leaf labels are resolved against a shared [LeafLabelMap], so that a host
/// network and a guest tree parsed with the same map agree on label indices.
///
/// # Format
/// * `network ::= node ';'`
/// * `node ::= ['(' node (',' node)* ')'] [label] [branch_data]`
/// * `label ::= name | name '#' tag | '#' tag`
/// * `branch_data ::= ':' [number] [':' [number] [':' [number]]]`
///
/// Furthermore:
/// * All occurrences of the same hybrid tag (e.g. `#H1`) denote one
///   reticulation; at most one occurrence may list children.
/// * Names of internal nodes are ignored; only leaves keep their label.
/// * Quoted labels are taken verbatim and never split at `#`.
/// * Whitespace and `[...]` comments may occur between all elements.
///
/// # Example
/// ```
/// use treedisplay::model::LeafLabelMap;
/// use treedisplay::newick::NewickParser;
/// use treedisplay::parser::byte_parser::ByteParser;
///
/// let mut labels = LeafLabelMap::new();
/// let mut byte_parser = ByteParser::for_str("((A,(C)#H1),(B,#H1));");
/// let network = NewickParser::new().parse(&mut byte_parser, &mut labels).unwrap();
/// assert_eq!(network.num_reticulations(), 1);
/// assert_eq!(network.num_leaves(), 3);
/// ```
#[derive(Debug, Default)]
pub struct NewickParser {
    /// Nodes created for hybrid tags, and whether their subtree was given
    hybrids: FxHashMap<String, (NodeIndex, bool)>,
    /// Names seen per node, assigned to leaves once the network is complete
    names: Vec<(NodeIndex, String)>,
}

impl NewickParser {
    /// Creates a new `NewickParser`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a single network from the given [ByteParser], consuming the
    /// terminating `;`.
    ///
    /// # Arguments
    /// * `parser` - The byte parser positioned at the start of a Newick string
    /// * `labels` - Label map to resolve leaf labels against
    ///
    /// # Returns
    /// * `Ok(Network)` - The parsed network, with its root set
    /// * `Err(ParsingError)` - If the string is not valid extended Newick
    pub fn parse(
        &mut self,
        parser: &mut ByteParser<'_>,
        labels: &mut LeafLabelMap,
    ) -> Result<Network, ParsingError> {
        self.hybrids.clear();
        self.names.clear();

        let mut network = Network::with_capacity(DEFAULT_NUM_NODES_GUESS);
        let root = self.parse_node(parser, &mut network)?;

        parser.skip_comment_and_whitespace()?;
        if !parser.consume_if(b';') {
            return Err(match parser.peek() {
                None => ParsingError::unexpected_eof(parser),
                Some(b) => ParsingError::invalid_newick_string(
                    parser,
                    format!("Expected ';' at end of network but found {:?}", b as char),
                ),
            });
        }
        network.set_root(root);

        // Only leaves carry labels
        for (node, name) in self.names.drain(..) {
            if network.is_leaf(node) && !name.is_empty() {
                network.set_label(node, Some(labels.get_or_insert(&name)));
            }
        }

        Ok(network)
    }

    /// Parses a node with its optional children, label and branch data,
    /// returning its index.
    fn parse_node(
        &mut self,
        parser: &mut ByteParser<'_>,
        network: &mut Network,
    ) -> Result<NodeIndex, ParsingError> {
        parser.skip_comment_and_whitespace()?;

        let children = if parser.peek_is(b'(') {
            Some(self.parse_children(parser, network)?)
        } else {
            None
        };

        parser.skip_comment_and_whitespace()?;
        let quoted = parser.peek() == Some(b'\'');
        let label = parser.parse_label(NEWICK_LABEL_DELIMITERS)?;
        let (name, tag) = match label.split_once(HYBRID_MARKER) {
            Some((name, tag)) if !quoted => (name.to_string(), Some(tag.to_string())),
            _ => (label, None),
        };

        let node = match tag {
            Some(tag) => self.hybrid_node(parser, network, tag, children.is_some())?,
            None => network.add_internal(),
        };
        if let Some(children) = children {
            for child in children {
                network.add_edge(node, child);
            }
        }
        if !name.is_empty() {
            self.names.push((node, name));
        }

        self.skip_branch_data(parser)?;
        Ok(node)
    }

    /// Parses `(node, node, ...)` and returns the indices of the children.
    fn parse_children(
        &mut self,
        parser: &mut ByteParser<'_>,
        network: &mut Network,
    ) -> Result<Vec<NodeIndex>, ParsingError> {
        // Caller checked for '('
        parser.consume_if(b'(');

        let mut children = Vec::new();
        loop {
            children.push(self.parse_node(parser, network)?);
            parser.skip_comment_and_whitespace()?;
            match parser.next_byte() {
                Some(b',') => continue,
                Some(b')') => return Ok(children),
                Some(b) => {
                    return Err(ParsingError::invalid_newick_string(
                        parser,
                        format!("Expected ',' or ')' after child but found {:?}", b as char),
                    ));
                }
                None => return Err(ParsingError::unexpected_eof(parser)),
            }
        }
    }

    /// Returns the node of a hybrid tag, creating it on first occurrence.
    fn hybrid_node(
        &mut self,
        parser: &ByteParser<'_>,
        network: &mut Network,
        tag: String,
        defines_subtree: bool,
    ) -> Result<NodeIndex, ParsingError> {
        if tag.is_empty() {
            return Err(ParsingError::invalid_newick_string(
                parser,
                "Empty hybrid tag".to_string(),
            ));
        }

        match self.hybrids.get_mut(&tag) {
            Some((node, defined)) => {
                if defines_subtree {
                    if *defined {
                        return Err(ParsingError::duplicate_hybrid(parser, tag));
                    }
                    *defined = true;
                }
                Ok(*node)
            }
            None => {
                let node = network.add_internal();
                self.hybrids.insert(tag, (node, defines_subtree));
                Ok(node)
            }
        }
    }

    /// Skips optional branch data `:length[:support[:probability]]`.
    fn skip_branch_data(&mut self, parser: &mut ByteParser<'_>) -> Result<(), ParsingError> {
        for _ in 0..3 {
            parser.skip_comment_and_whitespace()?;
            if !parser.consume_if(b':') {
                break;
            }
            parser.skip_comment_and_whitespace()?;
            let value = parser.parse_unquoted_label(NEWICK_LABEL_DELIMITERS)?;
            if !value.is_empty() && value.parse::<f64>().is_err() {
                return Err(ParsingError::invalid_newick_string(
                    parser,
                    format!("Invalid branch value: {}", value),
                ));
            }
        }
        Ok(())
    }
}
