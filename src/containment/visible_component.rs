//! Visible component rule: resolving host parts below component roots with
//! the tree DP.
//!
//! The rule works bottom-up over the component DAG. A component root `u` is
//! - *half-eligible* if every DAG child is half-eligible and reached from
//!   `u` along a single path. The part below such a root unzips without
//!   copies, so the highest guest ancestor `g` of a leaf visible from `u`
//!   that is displayed below `u` can be matched with `u`, provided no
//!   half-eligible internal root lies below `u`. Labels only reachable
//!   through `u` that are not below `g` refute the instance.
//! - *closed* if every DAG child is closed and the reticulation chains
//!   above them start below `u`. Every switching then maps the labels below
//!   `u` to a cluster of the displayed tree, which must be the cluster of a
//!   guest node displayed by the MUL-tree unzipped below `u`.

use crate::containment::components::ComponentDag;
use crate::containment::host_guest_match::match_nodes;
use crate::containment::state::ReductionState;
use crate::display::TreeInComponent;
use crate::model::{LabelIndex, Network, NodeIndex};
use log::{debug, trace};

/// Candidate of the rule: an internal component root with a visible leaf.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    root: NodeIndex,
    visible_leaf: NodeIndex,
    lowest: bool,
    closed: bool,
}

/// Outcome of checking one candidate.
enum Verdict {
    Refuted,
    Match { guest_node: NodeIndex, keep: LabelIndex },
    Consistent,
}

/// Applies the visible component rule to the eligible component roots.
#[derive(Debug, Clone, Default)]
pub(crate) struct VisibleComponentRule {
    /// Generation of the last pass that changed nothing
    idle_generation: Option<u64>,
}

impl VisibleComponentRule {
    /// Matches a lowest half-eligible root, or refutes the instance at a
    /// closed one.
    ///
    /// # Returns
    /// `true` if subtrees were matched or the instance refuted
    pub(crate) fn apply(&mut self, state: &mut ReductionState) -> bool {
        if self.idle_generation == Some(state.generation()) {
            return false;
        }
        let candidates = candidates(state);

        for candidate in candidates.iter().filter(|c| c.lowest) {
            match check_lowest(state, candidate) {
                Some(Verdict::Refuted) => {
                    state.fail(&format!(
                        "labels only reachable through host node {} are split in the guest",
                        candidate.root
                    ));
                    return true;
                }
                Some(Verdict::Match { guest_node, keep }) => {
                    trace!(
                        "Matching component at host {} with guest {}",
                        candidate.root,
                        guest_node
                    );
                    let before = state.generation();
                    match_nodes(state, candidate.root, guest_node, keep);
                    if state.generation() != before {
                        return true;
                    }
                }
                Some(Verdict::Consistent) | None => {}
            }
        }

        for candidate in candidates.iter().filter(|c| c.closed) {
            if let Some(Verdict::Refuted) = check_closed(state, candidate) {
                state.fail(&format!(
                    "labels below host node {} form no displayed guest cluster",
                    candidate.root
                ));
                return true;
            }
        }

        self.idle_generation = Some(state.generation());
        false
    }
}

/// Returns the internal component roots with a visible leaf that are
/// lowest half-eligible or closed, children before parents.
fn candidates(state: &mut ReductionState) -> Vec<Candidate> {
    let (host, components) = state.host_and_components();
    let dag = components.dag();
    let flags = DagFlags::compute(host, dag);

    let mut found = Vec::new();
    for i in dag.postorder() {
        if !flags.lowest[i] && !flags.closed[i] {
            continue;
        }
        let root = dag.data(i);
        if host.is_leaf(root) {
            continue;
        }
        if let Some(visible_leaf) = components.visible_leaf(root) {
            found.push(Candidate {
                root,
                visible_leaf,
                lowest: flags.lowest[i],
                closed: flags.closed[i],
            });
        }
    }
    found
}

// =#========================================================================#=
// DAG FLAGS
// =#========================================================================#=
/// Eligibility flags per DAG node, computed bottom-up in one pass.
struct DagFlags {
    /// Half-eligible internal root without such a root below
    lowest: Vec<bool>,
    closed: Vec<bool>,
}

impl DagFlags {
    fn compute(host: &Network, dag: &ComponentDag) -> Self {
        let n = dag.len();
        let mut below: Vec<Vec<bool>> = vec![Vec::new(); n];
        let mut half = vec![false; n];
        let mut closed = vec![false; n];
        let mut blocked = vec![false; n];
        let mut lowest = vec![false; n];

        for i in dag.postorder() {
            let children: Vec<usize> = dag.children(i).collect();
            let mut reach = vec![false; n];
            reach[i] = true;
            for &c in &children {
                for (j, _) in below[c].iter().enumerate().filter(|(_, b)| **b) {
                    reach[j] = true;
                }
            }

            half[i] = children.iter().all(|&c| {
                half[c] && dag.entries(c).iter().filter(|&&e| reach[e]).count() == 1
            });
            closed[i] = children
                .iter()
                .all(|&c| closed[c] && dag.entries(c).iter().all(|&e| reach[e]));

            let eligible = half[i] && !host.is_leaf(dag.data(i));
            let blocked_below = children.iter().any(|&c| blocked[c]);
            lowest[i] = eligible && !blocked_below;
            blocked[i] = eligible || blocked_below;
            below[i] = reach;
        }

        DagFlags { lowest, closed }
    }
}

// =#========================================================================#=
// CHECKS
// =#========================================================================#=
/// Finds the guest node to match a lowest half-eligible root with.
///
/// # Returns
/// `None` if the check could not be done, e.g. because the unzipped tree
/// would be too large.
fn check_lowest(state: &ReductionState, candidate: &Candidate) -> Option<Verdict> {
    let keep = state.host.label(candidate.visible_leaf)?;
    let guest_leaf = state.labels.guest_node(keep)?;
    let mut component = TreeInComponent::new(&state.host, candidate.root, &state.guest, state.config)?;

    let Some(g) = component.highest_displayed_ancestor(guest_leaf) else {
        return Some(Verdict::Refuted);
    };
    let cluster = guest_labels_below(&state.guest, g);
    let dominated = state.host.dominated_flags(candidate.root);
    let stranded = state
        .host
        .leaves()
        .filter(|&v| dominated[v])
        .filter_map(|v| state.host.label(v))
        .any(|l| cluster.binary_search(&l).is_err());
    debug!(
        "Lowest component at {}: guest node {} covers {} labels, stranded labels: {}",
        candidate.root,
        g,
        cluster.len(),
        stranded
    );

    if stranded {
        Some(Verdict::Refuted)
    } else {
        Some(Verdict::Match { guest_node: g, keep })
    }
}

/// Runs the tree DP below a closed root.
fn check_closed(state: &ReductionState, candidate: &Candidate) -> Option<Verdict> {
    let keep = state.host.label(candidate.visible_leaf)?;
    let guest_leaf = state.labels.guest_node(keep)?;
    let mut component = TreeInComponent::new(&state.host, candidate.root, &state.guest, state.config)?;

    let Some(g) = component.highest_displayed_ancestor(guest_leaf) else {
        return Some(Verdict::Refuted);
    };
    let below_host = component.labels();
    let below_guest = guest_labels_below(&state.guest, g);
    trace!(
        "Closed component at {}: {} host labels, guest node {} has {}",
        candidate.root,
        below_host.len(),
        g,
        below_guest.len()
    );

    if below_host == below_guest {
        Some(Verdict::Consistent)
    } else {
        Some(Verdict::Refuted)
    }
}

/// Returns the sorted labels of the guest leaves below `g`.
fn guest_labels_below(guest: &Network, g: NodeIndex) -> Vec<LabelIndex> {
    let mut labels: Vec<LabelIndex> = guest
        .pre_order_from(g)
        .filter(|&v| guest.is_leaf(v))
        .filter_map(|v| guest.label(v))
        .collect();
    labels.sort_unstable();
    labels
}
