//! Correspondence between labels and the host and guest nodes carrying them.
//!
//! - [LabelMatching]: Per label, the host node(s) and the guest leaf.
//! - [HostSlot]: Storage for the host side, either [SingleHost] for a
//!   network (each label once) or [MultiHost] for a MUL-tree (a label may
//!   occur many times after unzipping).

use crate::error::{ContainmentError, Side};
use crate::model::{LabelIndex, NodeIndex};
use rustc_hash::FxHashMap;

// =#========================================================================#=
// HOST SLOTS
// =#========================================================================#=
/// Storage for the host nodes of a label.
pub trait HostSlot: Default + Clone {
    /// Adds a host node.
    ///
    /// # Returns
    /// `false` if the slot cannot hold another node
    fn insert(&mut self, node: NodeIndex) -> bool;

    /// Removes a host node, if present.
    fn remove(&mut self, node: NodeIndex);

    /// Returns the stored host nodes.
    fn nodes(&self) -> &[NodeIndex];
}

/// Slot holding at most one host node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SingleHost(Option<NodeIndex>);

impl HostSlot for SingleHost {
    fn insert(&mut self, node: NodeIndex) -> bool {
        if self.0.is_some() {
            return false;
        }
        self.0 = Some(node);
        true
    }

    fn remove(&mut self, node: NodeIndex) {
        if self.0 == Some(node) {
            self.0 = None;
        }
    }

    fn nodes(&self) -> &[NodeIndex] {
        self.0.as_slice()
    }
}

/// Slot holding any number of host nodes, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultiHost(Vec<NodeIndex>);

impl HostSlot for MultiHost {
    fn insert(&mut self, node: NodeIndex) -> bool {
        self.0.push(node);
        true
    }

    fn remove(&mut self, node: NodeIndex) {
        self.0.retain(|&n| n != node);
    }

    fn nodes(&self) -> &[NodeIndex] {
        &self.0
    }
}

// =#========================================================================#=
// LABEL MATCHING
// =#========================================================================#=
#[derive(Debug, Clone, Default)]
struct LabelEntry<S> {
    host: S,
    guest: Option<NodeIndex>,
}

/// Maps each label to its host node(s) and guest leaf.
#[derive(Debug, Clone, Default)]
pub struct LabelMatching<S: HostSlot> {
    entries: FxHashMap<LabelIndex, LabelEntry<S>>,
}

impl<S: HostSlot> LabelMatching<S> {
    /// Creates an empty matching.
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Registers a host node carrying `label`.
    ///
    /// # Errors
    /// [ContainmentError::DuplicateLabel] if the slot is already full.
    pub fn insert_host(&mut self, label: LabelIndex, node: NodeIndex) -> Result<(), ContainmentError> {
        if self.entries.entry(label).or_default().host.insert(node) {
            Ok(())
        } else {
            Err(ContainmentError::DuplicateLabel { label, side: Side::Host })
        }
    }

    /// Registers the guest leaf carrying `label`.
    ///
    /// # Errors
    /// [ContainmentError::DuplicateLabel] if the label already has a guest leaf.
    pub fn insert_guest(&mut self, label: LabelIndex, node: NodeIndex) -> Result<(), ContainmentError> {
        let entry = self.entries.entry(label).or_default();
        if entry.guest.is_some() {
            return Err(ContainmentError::DuplicateLabel { label, side: Side::Guest });
        }
        entry.guest = Some(node);
        Ok(())
    }

    /// Returns the host nodes carrying `label`.
    pub fn host_nodes(&self, label: LabelIndex) -> &[NodeIndex] {
        self.entries
            .get(&label)
            .map(|e| e.host.nodes())
            .unwrap_or(&[])
    }

    /// Returns the single host node carrying `label`, if any.
    pub fn host_node(&self, label: LabelIndex) -> Option<NodeIndex> {
        self.host_nodes(label).first().copied()
    }

    /// Returns the guest leaf carrying `label`, if any.
    pub fn guest_node(&self, label: LabelIndex) -> Option<NodeIndex> {
        self.entries.get(&label).and_then(|e| e.guest)
    }

    /// Removes one host node from the entry of `label`.
    pub fn remove_host(&mut self, label: LabelIndex, node: NodeIndex) {
        if let Some(entry) = self.entries.get_mut(&label) {
            entry.host.remove(node);
        }
    }

    /// Removes `label` altogether.
    pub fn remove(&mut self, label: LabelIndex) {
        self.entries.remove(&label);
    }

    /// Returns whether `label` is known.
    pub fn contains(&self, label: LabelIndex) -> bool {
        self.entries.contains_key(&label)
    }

    /// Returns the number of labels.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no label is left.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the labels in ascending order.
    pub fn labels(&self) -> Vec<LabelIndex> {
        let mut labels: Vec<LabelIndex> = self.entries.keys().copied().collect();
        labels.sort_unstable();
        labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_host_rejects_second_node() {
        let mut matching: LabelMatching<SingleHost> = LabelMatching::new();
        assert!(matching.insert_host(3, 10).is_ok());
        assert_eq!(
            matching.insert_host(3, 11),
            Err(ContainmentError::DuplicateLabel { label: 3, side: Side::Host })
        );
        assert_eq!(matching.host_nodes(3), &[10]);
    }

    #[test]
    fn test_multi_host_keeps_all_nodes() {
        let mut matching: LabelMatching<MultiHost> = LabelMatching::new();
        matching.insert_host(0, 4).unwrap();
        matching.insert_host(0, 9).unwrap();
        matching.insert_guest(0, 1).unwrap();
        assert_eq!(matching.host_nodes(0), &[4, 9]);
        matching.remove_host(0, 4);
        assert_eq!(matching.host_nodes(0), &[9]);
        assert_eq!(matching.guest_node(0), Some(1));
        assert!(matching.insert_guest(0, 2).is_err());
    }
}
