//! Cherry reduction: resolving guest cherries against host leaf siblings.
//!
//! Let `pv` be a guest node all of whose children are leaves, with label set
//! `L`, and let `u` be the host leaf of one of these labels, hanging below a
//! tree node `pu`. In any displaying switching, the parent of `u` in the
//! displayed tree has cluster exactly `L`. This fixes a lot:
//! - a sibling leaf of `u` outside `L` refutes the instance,
//! - a reticulation below `pu` leading only to a leaf outside `L` must take
//!   another parent,
//! - if all of `L` hangs directly below `pu`, the two cherries are matched,
//! - if `pu` has fewer children than `L` has labels, `pu` cannot be the
//!   parent of `u` in the displayed tree, and `pu` is matched with `u` alone.
//!
//! A match cuts every other branch of `pu`. A label only reachable through
//! `pu` that the match would lose refutes the instance.

use crate::containment::host_guest_match::match_nodes;
use crate::containment::state::ReductionState;
use crate::model::{LabelIndex, Network, NodeIndex};
use log::trace;

/// Applies the cherry reduction to host leaves until one succeeds.
#[derive(Debug, Clone, Default)]
pub(crate) struct CherryPicker {
    pending: Vec<NodeIndex>,
    seeded_generation: Option<u64>,
}

impl CherryPicker {
    /// Tries the cherry reduction on the pending host leaves.
    ///
    /// All labeled host leaves are pending again after the host changed.
    ///
    /// # Returns
    /// `true` if the host was changed or the instance refuted
    pub(crate) fn apply(&mut self, state: &mut ReductionState) -> bool {
        if self.seeded_generation != Some(state.generation()) {
            self.pending = state
                .host
                .leaves()
                .filter(|&u| state.host.label(u).is_some())
                .collect();
            self.seeded_generation = Some(state.generation());
        }
        while let Some(u) = self.pending.pop() {
            if try_leaf(state, u) {
                return true;
            }
        }
        false
    }
}

/// Tries the cherry reduction at host leaf `u`.
fn try_leaf(state: &mut ReductionState, u: NodeIndex) -> bool {
    let host = &state.host;
    if !host.is_alive(u) || !host.is_leaf(u) {
        return false;
    }
    let Some(label) = host.label(u) else {
        return false;
    };
    let &[pu] = host.parents(u) else {
        return false;
    };
    if host.in_degree(pu) > 1 {
        return false;
    }
    let Some(pv) = state
        .labels
        .guest_node(label)
        .and_then(|v| state.guest.parent(v))
    else {
        return false;
    };
    let Some(cherry) = cherry_labels(&state.guest, pv) else {
        return false;
    };

    let mut direct = 0;
    let mut children = host.children(pu).to_vec();
    children.sort_unstable();
    children.dedup();
    for c in children {
        if host.is_leaf(c) {
            match host.label(c) {
                Some(l) if cherry.contains(&l) => direct += 1,
                Some(l) => {
                    state.fail(&format!(
                        "labels {} and {} are siblings in the host but not in the guest",
                        label, l
                    ));
                    return true;
                }
                None => return false,
            }
        } else if host.is_reticulation(c) && host.parents(c).iter().any(|&p| p != pu) {
            let end = chain_end(host, c);
            let leads_outside = host.is_leaf(end) && host.label(end).is_some_and(|l| !cherry.contains(&l));
            if leads_outside {
                trace!("Cutting {} -> {}, it leads to a leaf outside the cherry of {}", pu, c, label);
                state.cut(pu, c);
                return true;
            }
        }
    }

    if direct == cherry.len() {
        trace!("Matching host cherry at {} with guest cherry at {}", pu, pv);
        return commit(state, pu, pv, label, &cherry);
    }
    if state.host.out_degree(pu) < cherry.len() {
        let Some(v) = state.labels.guest_node(label) else {
            return false;
        };
        trace!("Host node {} has too few children for the cherry of {}, keeping only {}", pu, label, u);
        return commit(state, pu, v, label, &[label]);
    }
    false
}

/// Matches host node `pu` with guest node `g`, keeping label `keep`.
///
/// Fails the instance instead if a label only reachable through `pu` is
/// not in `allowed`.
///
/// # Returns
/// `true` if the host was changed or the instance refuted
fn commit(
    state: &mut ReductionState,
    pu: NodeIndex,
    g: NodeIndex,
    keep: LabelIndex,
    allowed: &[LabelIndex],
) -> bool {
    let dominated = state.host.dominated_flags(pu);
    let stranded = state
        .host
        .leaves()
        .filter(|&v| dominated[v])
        .filter_map(|v| state.host.label(v))
        .find(|l| !allowed.contains(l));
    if let Some(l) = stranded {
        state.fail(&format!(
            "label {} hangs below host node {} together with the cherry of label {}",
            l, pu, keep
        ));
        return true;
    }

    let before = state.generation();
    match_nodes(state, pu, g, keep);
    state.generation() != before
}

/// Returns the labels of the children of `pv` if all of them are leaves.
fn cherry_labels(guest: &Network, pv: NodeIndex) -> Option<Vec<LabelIndex>> {
    guest
        .children(pv)
        .iter()
        .map(|&c| guest.label(c).filter(|_| guest.is_leaf(c)))
        .collect()
}

/// Follows single-child nodes downwards from `v`, stopping above a child
/// with several parents.
fn chain_end(host: &Network, v: NodeIndex) -> NodeIndex {
    let mut current = v;
    while let &[child] = host.children(current) {
        if host.in_degree(child) > 1 {
            break;
        }
        current = child;
    }
    current
}
