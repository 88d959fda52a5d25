//! Mutable state shared by all reduction rules of one search branch.

use crate::config::ContainmentConfig;
use crate::containment::components::TreeComponentInfo;
use crate::label_matching::{LabelMatching, SingleHost};
use crate::model::{LabelIndex, Network, NodeIndex};
use log::debug;
use std::collections::VecDeque;

/// Host, guest and bookkeeping of one branch of the search.
///
/// Every mutation of the host goes through methods that enqueue the touched
/// nodes for cleanup and bump the generation counter, so that derived data
/// ([TreeComponentInfo]) knows when it is stale.
#[derive(Debug, Clone)]
pub(crate) struct ReductionState {
    pub(crate) host: Network,
    pub(crate) guest: Network,
    pub(crate) labels: LabelMatching<SingleHost>,
    pub(crate) config: ContainmentConfig,
    components: TreeComponentInfo,
    queue: VecDeque<NodeIndex>,
    in_queue: Vec<bool>,
    failed: bool,
    generation: u64,
}

impl ReductionState {
    pub(crate) fn new(
        host: Network,
        guest: Network,
        labels: LabelMatching<SingleHost>,
        config: ContainmentConfig,
    ) -> Self {
        let capacity = host.capacity();
        ReductionState {
            host,
            guest,
            labels,
            config,
            components: TreeComponentInfo::default(),
            queue: VecDeque::with_capacity(capacity),
            in_queue: vec![false; capacity],
            failed: false,
            generation: 1,
        }
    }

    // ------------------------------------------------------------------------
    // Cleanup queue
    // ------------------------------------------------------------------------
    /// Queues a host node for re-examination by the node suppresser.
    pub(crate) fn enqueue(&mut self, v: NodeIndex) {
        if !self.host.is_alive(v) {
            return;
        }
        if v >= self.in_queue.len() {
            self.in_queue.resize(self.host.capacity(), false);
        }
        if !self.in_queue[v] {
            self.in_queue[v] = true;
            self.queue.push_back(v);
        }
    }

    /// Queues several host nodes.
    pub(crate) fn enqueue_all(&mut self, nodes: &[NodeIndex]) {
        for &v in nodes {
            self.enqueue(v);
        }
    }

    /// Takes the next queued host node.
    pub(crate) fn pop_queued(&mut self) -> Option<NodeIndex> {
        let v = self.queue.pop_front()?;
        self.in_queue[v] = false;
        Some(v)
    }

    // ------------------------------------------------------------------------
    // Status
    // ------------------------------------------------------------------------
    /// Marks the instance as not displayable.
    pub(crate) fn fail(&mut self, reason: &str) {
        debug!("Guest not displayed: {}", reason);
        self.failed = true;
    }

    pub(crate) fn has_failed(&self) -> bool {
        self.failed
    }

    /// Returns the number of labels still present.
    pub(crate) fn num_labels(&self) -> usize {
        self.labels.len()
    }

    /// Records that the host changed.
    pub(crate) fn touch(&mut self) {
        self.generation += 1;
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the component info, recomputing it if the host changed since.
    pub(crate) fn components(&mut self) -> &TreeComponentInfo {
        if self.components.generation() != self.generation {
            self.components = TreeComponentInfo::compute(&self.host, self.generation);
        }
        &self.components
    }

    /// Returns the host together with its up-to-date component info.
    pub(crate) fn host_and_components(&mut self) -> (&Network, &TreeComponentInfo) {
        self.components();
        (&self.host, &self.components)
    }

    // ------------------------------------------------------------------------
    // Host mutation
    // ------------------------------------------------------------------------
    /// Removes all arcs `parent -> child` and queues both endpoints.
    pub(crate) fn cut(&mut self, parent: NodeIndex, child: NodeIndex) {
        if self.host.remove_all_edges(parent, child) > 0 {
            self.enqueue(parent);
            self.enqueue(child);
            self.touch();
        }
    }

    /// Removes a host node and queues its former parents.
    pub(crate) fn delete_host_node(&mut self, v: NodeIndex) {
        let parents = self.host.parents(v).to_vec();
        self.host.remove_node(v);
        self.enqueue_all(&parents);
        self.touch();
    }

    /// Removes a guest leaf and suppresses its parent if that is left with one child.
    pub(crate) fn delete_guest_leaf(&mut self, leaf: NodeIndex) {
        let parent = self.guest.parent(leaf);
        self.guest.remove_node(leaf);
        if let Some(p) = parent.filter(|&p| self.guest.out_degree(p) == 1) {
            self.guest.suppress_node(p);
        }
    }

    /// Deletes a label from both sides.
    pub(crate) fn delete_label(&mut self, label: LabelIndex) {
        if let Some(v) = self.labels.host_node(label) {
            self.delete_host_node(v);
        }
        if let Some(v) = self.labels.guest_node(label) {
            self.delete_guest_leaf(v);
        }
        self.labels.remove(label);
    }

    /// Removes labels present on one side only.
    ///
    /// Host-only labels can never be needed and are deleted; a guest-only
    /// label can never be matched and fails the instance.
    pub(crate) fn clean_up_labels(&mut self) {
        for label in self.labels.labels() {
            match (self.labels.host_node(label), self.labels.guest_node(label)) {
                (Some(_), None) => self.delete_label(label),
                (None, Some(_)) => {
                    self.fail(&format!("label {} missing from the host", label));
                    return;
                }
                _ => {}
            }
        }
    }
}
