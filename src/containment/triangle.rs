//! Removal of redundant triangle arcs above a reticulation.

use crate::containment::state::ReductionState;
use crate::model::{Network, NodeIndex};
use log::trace;

/// Removes redundant arcs `x -> z` into reticulation `z` until none is left.
///
/// An arc `x -> z` is redundant if `x` has exactly the two children `y` and
/// `z`, and `y` is a tree node with exactly the two children `z` and some
/// `w`. Both switchings of the arc into `z` then restrict to the same trees.
///
/// # Returns
/// `true` if at least one arc was removed
pub(crate) fn reduce(state: &mut ReductionState, z: NodeIndex) -> bool {
    let mut reduced = false;
    while let Some(x) = redundant_parent(&state.host, z) {
        trace!("Removing triangle arc {} -> {}", x, z);
        state.host.remove_edge(x, z);
        state.enqueue(x);
        state.enqueue(z);
        state.touch();
        reduced = true;
    }
    reduced
}

fn redundant_parent(host: &Network, z: NodeIndex) -> Option<NodeIndex> {
    if !host.is_alive(z) || !host.is_reticulation(z) {
        return None;
    }
    host.parents(z).iter().copied().find(|&x| {
        let y = match host.children(x) {
            [a, b] if *a == z && *b != z => *b,
            [a, b] if *b == z && *a != z => *a,
            _ => return false,
        };
        host.in_degree(y) == 1 && host.out_degree(y) == 2 && host.children(y).contains(&z)
    })
}
