//! Merging of chained reticulations.

use crate::containment::state::ReductionState;
use crate::model::{Network, NodeIndex};
use log::trace;

/// Merges reticulation `x` into its child `z` if that is a reticulation too.
///
/// The parents of `x` become parents of `z`. Parents shared by both turn
/// into parallel arcs, removed once `z` is cleaned up.
///
/// # Returns
/// `true` if `x` was merged
pub(crate) fn contract_reti(state: &mut ReductionState, x: NodeIndex) -> bool {
    if !is_chain(&state.host, x) {
        return false;
    }
    let parents = state.host.parents(x).to_vec();
    let z = state.host.contract_down(x);
    trace!("Merged reticulation {} into {}", x, z);
    state.enqueue(z);
    state.enqueue_all(&parents);
    state.touch();
    true
}

/// Returns `true` if `x` is a reticulation whose single child is a reticulation.
fn is_chain(host: &Network, x: NodeIndex) -> bool {
    host.is_alive(x)
        && host.is_reticulation(x)
        && host.out_degree(x) == 1
        && host.any_child(x).is_some_and(|z| host.is_reticulation(z))
}

/// Queue of reticulation chains waiting to be merged.
#[derive(Debug, Clone, Default)]
pub(crate) struct ReticulationMerger {
    pending: Vec<NodeIndex>,
}

impl ReticulationMerger {
    /// Seeds the queue with all current two-reticulation chains.
    pub(crate) fn init_queue(&mut self, host: &Network) {
        self.pending = host.node_indices().filter(|&x| is_chain(host, x)).collect();
    }

    /// Merges the next chain still present.
    ///
    /// # Returns
    /// `true` if a merge happened
    pub(crate) fn apply(&mut self, state: &mut ReductionState) -> bool {
        while let Some(x) = self.pending.pop() {
            if contract_reti(state, x) {
                return true;
            }
        }
        false
    }
}
