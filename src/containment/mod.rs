//! Tree containment in phylogenetic networks.
//!
//! [Containment] decides whether a guest tree is displayed by a host
//! network, i.e. whether some switching of the host (one parent chosen per
//! reticulation), restricted to the guest's labels and with degree-2 nodes
//! suppressed, is isomorphic to the guest.
//!
//! The search alternates two phases:
//! 1. Reduction: the node suppresser keeps the host in normal form while the
//!    cherry rule, the visible component rule and reticulation merging shrink
//!    host and guest. Every rule preserves the answer; some refute it early.
//! 2. Branching: once no rule applies, one reticulation is resolved to each
//!    of its parents in turn, each branch on its own copy of the state.
//!
//! Hosts without reticulations are decided by the tree DP of
//! [crate::display].
//!
//! # Example
//! ```
//! use treedisplay::containment::Containment;
//! use treedisplay::newick::parse_pair;
//!
//! let (host, guest, _labels) = parse_pair("((a,(c)#H1),(b,#H1));", "((a,c),b);").unwrap();
//! let containment = Containment::new(&host, &guest).unwrap();
//! assert!(containment.displayed());
//! ```

mod branching;
mod cherry;
mod components;
mod host_guest_match;
mod reticulation_merger;
mod state;
mod suppression;
mod triangle;
mod visible_component;

use crate::config::ContainmentConfig;
use crate::containment::cherry::CherryPicker;
use crate::containment::reticulation_merger::ReticulationMerger;
use crate::containment::state::ReductionState;
use crate::containment::visible_component::VisibleComponentRule;
use crate::error::ContainmentError;
use crate::label_matching::{LabelMatching, SingleHost};
use crate::model::{Network, NodeIndex};
use log::debug;

/// Counters collected during one containment search.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of branches explored, i.e. parent choices forced on a reticulation
    pub branches: usize,
    /// Number of successful applications of the cherry, visible component and
    /// merging rules
    pub reductions: usize,
    /// Deepest nesting of branches
    pub max_depth: usize,
}

impl SearchStats {
    fn absorb(&mut self, other: SearchStats) {
        self.branches += other.branches;
        self.reductions += other.reductions;
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

/// A prepared tree containment query.
///
/// Construction copies and normalizes both inputs, so the caller's networks
/// are never modified. Queries run on a further copy, so a [Containment]
/// can be asked repeatedly.
#[derive(Debug, Clone)]
pub struct Containment {
    state: ReductionState,
    cherry: CherryPicker,
    merger: ReticulationMerger,
    visible: VisibleComponentRule,
    stats: SearchStats,
}

impl Containment {
    /// Prepares a query with the default configuration.
    ///
    /// # Errors
    /// See [`Containment::with_config`].
    pub fn new(host: &Network, guest: &Network) -> Result<Self, ContainmentError> {
        Self::with_config(host, guest, ContainmentConfig::default())
    }

    /// Prepares a query.
    ///
    /// # Arguments
    /// * `host` - Rooted network, labels on leaves only are considered
    /// * `guest` - Rooted tree whose leaves are all labeled
    /// * `config` - Rule selection and tuning
    ///
    /// # Errors
    /// - Either side is empty, has several roots or contains a cycle
    /// - The guest has a node with several parents
    /// - The guest has an unlabeled leaf
    /// - A label occurs on two leaves of the same side
    pub fn with_config(
        host: &Network,
        guest: &Network,
        config: ContainmentConfig,
    ) -> Result<Self, ContainmentError> {
        let host = normalize_host(host)?;
        let guest = normalize_guest(guest)?;

        let mut labels: LabelMatching<SingleHost> = LabelMatching::new();
        for leaf in host.leaves() {
            if let Some(label) = host.label(leaf) {
                labels.insert_host(label, leaf)?;
            }
        }
        for leaf in guest.leaves() {
            if let Some(label) = guest.label(leaf) {
                labels.insert_guest(label, leaf)?;
            }
        }
        debug!(
            "Prepared containment: host with {} nodes and {} reticulations, guest with {} leaves",
            host.num_nodes(),
            host.num_reticulations(),
            guest.num_leaves()
        );

        let mut merger = ReticulationMerger::default();
        merger.init_queue(&host);
        let all_nodes: Vec<NodeIndex> = host.node_indices().collect();
        let mut state = ReductionState::new(host, guest, labels, config);
        state.clean_up_labels();
        state.enqueue_all(&all_nodes);

        Ok(Containment {
            state,
            cherry: CherryPicker::default(),
            merger,
            visible: VisibleComponentRule::default(),
            stats: SearchStats::default(),
        })
    }

    /// Returns the configuration of this query.
    pub fn config(&self) -> &ContainmentConfig {
        &self.state.config
    }

    /// Returns `true` if the guest tree is displayed by the host network.
    pub fn displayed(&self) -> bool {
        self.displayed_with_stats().0
    }

    /// Decides the query and reports what the search did.
    pub fn displayed_with_stats(&self) -> (bool, SearchStats) {
        let mut search = self.clone();
        let displayed = search.search(0);
        debug!(
            "Containment decided: displayed = {}, {} branches, {} reductions",
            displayed, search.stats.branches, search.stats.reductions
        );
        (displayed, search.stats)
    }
}

/// Copies the host and brings it into the shape the reduction rules expect:
/// labels on leaves only, and every reticulation with a single child.
fn normalize_host(host: &Network) -> Result<Network, ContainmentError> {
    let mut host = host.clone();
    host.validate()?;
    let nodes: Vec<NodeIndex> = host.node_indices().collect();
    for v in nodes {
        if !host.is_leaf(v) {
            host.set_label(v, None);
        }
        if host.in_degree(v) > 1 && host.out_degree(v) != 1 {
            host.split_above(v);
        }
    }
    Ok(host)
}

/// Copies the guest, checks that it is a fully leaf-labeled tree, and
/// suppresses nodes with a single child.
fn normalize_guest(guest: &Network) -> Result<Network, ContainmentError> {
    let mut guest = guest.clone();
    guest.validate()?;
    guest.check_tree()?;
    let nodes: Vec<NodeIndex> = guest.node_indices().collect();
    for &v in &nodes {
        if guest.is_leaf(v) {
            if guest.label(v).is_none() {
                return Err(ContainmentError::UnlabeledGuestLeaf { node: v });
            }
        } else {
            guest.set_label(v, None);
        }
    }
    for v in nodes {
        if guest.is_alive(v) {
            guest.suppress_node(v);
        }
    }
    Ok(guest)
}
