//! Reduction loop and branching over reticulation parents.

use crate::containment::suppression;
use crate::containment::{Containment, SearchStats};
use crate::display::{MulTree, TreeInTreeContainment};
use crate::model::NodeIndex;
use log::{debug, trace};

impl Containment {
    /// Applies reduction rules until none applies, the instance is refuted,
    /// or at most two labels are left.
    fn reduce(&mut self) {
        loop {
            suppression::drain(&mut self.state);
            if self.state.has_failed() || self.state.num_labels() <= 2 {
                break;
            }
            let config = self.state.config;
            let reduced = (config.cherry_rule && self.cherry.apply(&mut self.state))
                || (config.visible_component_rule && self.visible.apply(&mut self.state))
                || (config.reticulation_merging && self.merger.apply(&mut self.state));
            if !reduced {
                break;
            }
            self.stats.reductions += 1;
        }
    }

    /// Decides the current state, branching on a reticulation if the rules
    /// get stuck.
    pub(super) fn search(&mut self, depth: usize) -> bool {
        self.stats.max_depth = self.stats.max_depth.max(depth);
        self.reduce();

        if self.state.has_failed() {
            return false;
        }
        if self.state.num_labels() <= 2 {
            return true;
        }
        if self.state.host.num_reticulations() == 0 {
            return self.decide_tree();
        }

        let Some(r) = self.choose_reticulation() else {
            return self.decide_tree();
        };
        let mut parents = self.state.host.parents(r).to_vec();
        parents.sort_unstable();
        parents.dedup();
        debug!("Branching on reticulation {} with {} parents at depth {}", r, parents.len(), depth);

        for p in parents {
            let mut branch = self.clone();
            branch.stats = SearchStats::default();
            branch.force_parent(r, p);
            branch.stats.branches += 1;
            let displayed = branch.search(depth + 1);
            trace!("Branch {} -> {} at depth {}: displayed = {}", p, r, depth, displayed);
            self.stats.absorb(branch.stats);
            if displayed {
                return true;
            }
        }
        false
    }

    /// Decides a host without reticulations with the tree DP.
    fn decide_tree(&self) -> bool {
        let (Some(mul), Some(guest_root)) = (MulTree::from_tree(&self.state.host), self.state.guest.root()) else {
            return false;
        };
        let mut dp = TreeInTreeContainment::from_parts(mul, &self.state.guest, guest_root, self.state.config);
        let displayed = dp.displayed();
        debug!("Tree DP on {} host nodes: displayed = {}", self.state.host.num_nodes(), displayed);
        displayed
    }

    /// Picks the reticulation to branch on.
    ///
    /// Reticulations right above a leaf come first. Ties are broken by the
    /// number of parents without a component, then with a component without
    /// visible leaf, then with a component with visible leaf.
    fn choose_reticulation(&mut self) -> Option<NodeIndex> {
        let (host, components) = self.state.host_and_components();
        let score = |r: NodeIndex| {
            let mut unresolved = 0usize;
            let mut invisible = 0usize;
            let mut visible = 0usize;
            for &p in host.parents(r) {
                match components.comp_root(p) {
                    None => unresolved += 1,
                    Some(c) if components.visible_leaf(c).is_none() => invisible += 1,
                    Some(_) => visible += 1,
                }
            }
            let above_leaf = host.any_child(r).is_some_and(|c| host.is_leaf(c));
            (!above_leaf, unresolved, invisible, visible, r)
        };
        host.node_indices()
            .filter(|&r| host.is_reticulation(r))
            .min_by_key(|&r| score(r))
    }

    /// Keeps only the arc `p -> r` among the arcs entering reticulation `r`.
    fn force_parent(&mut self, r: NodeIndex, p: NodeIndex) {
        let others: Vec<NodeIndex> = self
            .state
            .host
            .parents(r)
            .iter()
            .copied()
            .filter(|&q| q != p)
            .collect();
        for q in others {
            self.state.cut(q, r);
        }
        // Parallel arcs from p
        while self.state.host.in_degree(r) > 1 {
            self.state.host.remove_edge(p, r);
        }
        self.state.enqueue(r);
        self.state.enqueue(p);
        self.state.touch();
    }
}
