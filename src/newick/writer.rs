//! Extended Newick writing for networks.

use crate::model::{LeafLabelMap, Network, NodeIndex};
use crate::newick::defs::{HYBRID_MARKER, HYBRID_TAG_PREFIX};
use crate::parser::utils::escape_label;
use rustc_hash::FxHashMap;

/// Returns the extended Newick representation of a network with closing semicolon.
///
/// Reticulations are tagged `#H1`, `#H2`, ... in the order they are first
/// reached by a depth-first traversal from the root. The subtree below a
/// reticulation is written at its first occurrence only; later occurrences
/// are just the tag. Internal labels and branch lengths are not written.
///
/// # Arguments
/// * `network` - The network to write, with its root set
/// * `leaf_label_map` - Map resolving the leaf labels of `network`
///
/// # Returns
/// A Newick string terminated with `;`, or just `;` for a network without root.
///
/// # Example
/// ```
/// use treedisplay::model::LeafLabelMap;
/// use treedisplay::newick::{parse_network, to_newick};
///
/// let mut labels = LeafLabelMap::new();
/// let network = parse_network("((A,(C)#H1),(B,#H1));", &mut labels).unwrap();
/// assert_eq!(to_newick(&network, &labels), "((A,(C)#H1),(B,#H1));");
/// ```
pub fn to_newick(network: &Network, leaf_label_map: &LeafLabelMap) -> String {
    let mut newick = String::with_capacity(estimate_newick_len(network, leaf_label_map));
    if let Some(root) = network.root() {
        let mut tags = FxHashMap::default();
        build_newick(network, leaf_label_map, root, &mut tags, &mut newick);
    }
    newick.push(';');
    newick
}

// Recursive helper for building the Newick string
fn build_newick(
    network: &Network,
    leaf_label_map: &LeafLabelMap,
    v: NodeIndex,
    tags: &mut FxHashMap<NodeIndex, usize>,
    newick: &mut String,
) {
    let mut first_visit = true;
    if network.is_reticulation(v) {
        let next_tag = tags.len() + 1;
        let tag = *tags.entry(v).or_insert(next_tag);
        first_visit = tag == next_tag;
    }

    if first_visit && !network.is_leaf(v) {
        newick.push('(');
        for (i, &c) in network.children(v).iter().enumerate() {
            if i > 0 {
                newick.push(',');
            }
            build_newick(network, leaf_label_map, c, tags, newick);
        }
        newick.push(')');
    }

    if first_visit {
        if let Some(label) = network.label(v).and_then(|l| leaf_label_map.get_label(l)) {
            newick.push_str(&escape_label(label));
        }
    }

    if let Some(tag) = tags.get(&v) {
        newick.push(HYBRID_MARKER);
        newick.push_str(HYBRID_TAG_PREFIX);
        newick.push_str(&tag.to_string());
    }
}

/// Estimates the length of the Newick string of a network.
fn estimate_newick_len(network: &Network, leaf_label_map: &LeafLabelMap) -> usize {
    let label_len: usize = network
        .leaves()
        .filter_map(|v| network.label(v))
        .filter_map(|l| leaf_label_map.get_label(l))
        .map(|s| s.len())
        .sum();
    label_len + 4 * network.num_edges() + 2
}
