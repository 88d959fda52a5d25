//! Committing a match between a host node and a guest node.

use crate::containment::state::ReductionState;
use crate::containment::suppression;
use crate::model::{LabelIndex, NodeIndex};
use log::trace;

/// Collapses the parts below `host_u` and `guest_g` onto the single label
/// `keep`.
///
/// All labels below `guest_g` other than `keep` are deleted on both sides.
/// Arcs leaving the host nodes that can only be reached through `host_u`
/// are cut, so whatever else hangs below `host_u` stays reachable only from
/// its other parents. The node suppresser then contracts the remains into
/// the leaf labeled `keep`.
///
/// The caller guarantees that every label only reachable through `host_u`
/// lies below `guest_g`.
pub(crate) fn match_nodes(
    state: &mut ReductionState,
    host_u: NodeIndex,
    guest_g: NodeIndex,
    keep: LabelIndex,
) {
    let guest = &state.guest;
    let to_delete: Vec<LabelIndex> = guest
        .pre_order_from(guest_g)
        .filter(|&v| guest.is_leaf(v))
        .filter_map(|v| guest.label(v))
        .filter(|&l| l != keep)
        .collect();
    trace!(
        "Matching host {} with guest {}, keeping label {} and deleting {} labels",
        host_u,
        guest_g,
        keep,
        to_delete.len()
    );

    let dominated = state.host.dominated_flags(host_u);
    let mut leaving: Vec<(NodeIndex, NodeIndex)> = Vec::new();
    for a in state.host.node_indices().filter(|&a| dominated[a]) {
        for &b in state.host.children(a) {
            if !dominated[b] {
                leaving.push((a, b));
            }
        }
    }
    for (a, b) in leaving {
        state.cut(a, b);
    }

    for label in to_delete {
        state.delete_label(label);
    }
    suppression::drain(state);
}
