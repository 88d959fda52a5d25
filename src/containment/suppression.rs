//! Node suppresser: keeps the host in normal form after every mutation.
//!
//! In normal form the host has no unlabeled leaves, no parallel arcs, no
//! nodes with one parent and one child, and every reticulation has a single
//! child. Cleanup never decides the instance, it only shrinks the host.

use crate::containment::reticulation_merger::contract_reti;
use crate::containment::state::ReductionState;
use crate::containment::triangle;
use crate::model::NodeIndex;
use log::trace;

/// Cleans up queued host nodes until the queue is empty.
pub(crate) fn drain(state: &mut ReductionState) {
    while let Some(v) = state.pop_queued() {
        clean_up_node(state, v);
    }
}

/// Re-examines host node `y`, dispatching on its out- and in-degree.
pub(crate) fn clean_up_node(state: &mut ReductionState, y: NodeIndex) {
    if !state.host.is_alive(y) {
        return;
    }
    remove_parallel_parents(state, y);

    match (state.host.out_degree(y), state.host.in_degree(y)) {
        (0, _) => {
            if state.host.label(y).is_none() {
                trace!("Removing unlabeled leaf {}", y);
                state.delete_host_node(y);
            }
        }
        (1, 0) => {
            let z = state.host.contract_down(y);
            trace!("Root {} had a single child, {} is the new root", y, z);
            state.enqueue(z);
            state.touch();
        }
        (1, 1) => suppress_tree_node(state, y),
        (1, _) => {
            if state.config.triangle_rule && triangle::reduce(state, y) {
                return;
            }
            let child_is_reticulation = state
                .host
                .any_child(y)
                .is_some_and(|z| state.host.is_reticulation(z));
            if child_is_reticulation && state.config.reticulation_merging {
                contract_reti(state, y);
            }
        }
        _ => {
            if state.config.triangle_rule {
                let mut reticulations: Vec<NodeIndex> = state
                    .host
                    .children(y)
                    .iter()
                    .copied()
                    .filter(|&z| state.host.is_reticulation(z))
                    .collect();
                reticulations.dedup();
                for z in reticulations {
                    triangle::reduce(state, z);
                }
            }
        }
    }
}

/// Suppresses `y`, which has one parent and one child `z`.
///
/// Leaves and reticulations keep their identity, so `y` is contracted down
/// onto them; otherwise `y` absorbs `z`.
fn suppress_tree_node(state: &mut ReductionState, y: NodeIndex) {
    let (Some(p), Some(z)) = (state.host.parent(y), state.host.any_child(y)) else {
        return;
    };
    let survivor = if state.host.is_leaf(z) || state.host.is_reticulation(z) {
        state.host.contract_down(y)
    } else {
        state.host.contract_up(y)
    };
    trace!("Suppressed {} below {}, {} remains", y, p, survivor);
    state.enqueue(survivor);
    state.enqueue(p);
    state.touch();
}

/// Removes repeated arcs into `y`; any one of them is as good as the others.
fn remove_parallel_parents(state: &mut ReductionState, y: NodeIndex) {
    let parents = state.host.parents(y).to_vec();
    let mut seen: Vec<NodeIndex> = Vec::with_capacity(parents.len());
    for p in parents {
        if seen.contains(&p) {
            trace!("Removing parallel arc {} -> {}", p, y);
            state.host.remove_edge(p, y);
            state.enqueue(p);
            state.touch();
        } else {
            seen.push(p);
        }
    }
}
