//! Tree containment restricted to the part of a host network below one node.

use crate::config::ContainmentConfig;
use crate::display::mul_tree::{MulIndex, MulTree};
use crate::display::tree_in_tree::TreeInTreeContainment;
use crate::model::{LabelIndex, Network, NodeIndex};

/// Runs the tree DP on the MUL-tree unzipped below a host node.
///
/// Every switching of the host restricted to the nodes below the start node
/// embeds into the MUL-tree, so a guest subtree that is not displayed here
/// is not displayed below the start node by any switching either.
#[derive(Debug, Clone)]
pub struct TreeInComponent<'a> {
    dp: TreeInTreeContainment<'a>,
}

impl<'a> TreeInComponent<'a> {
    /// Unzips `host` below `start` and prepares the DP against `guest`.
    ///
    /// # Returns
    /// `None` if the guest has no root or the unzipped tree would exceed
    /// [`ContainmentConfig::max_unzip_nodes`].
    pub fn new(
        host: &Network,
        start: NodeIndex,
        guest: &'a Network,
        config: ContainmentConfig,
    ) -> Option<Self> {
        let guest_root = guest.root()?;
        let mul = MulTree::unzip(host, start, config.max_unzip_nodes)?;
        Some(TreeInComponent {
            dp: TreeInTreeContainment::from_parts(mul, guest, guest_root, config),
        })
    }

    /// Returns the lowest MUL-tree nodes displaying the guest subtree below `v`.
    pub fn who_displays(&mut self, v: NodeIndex) -> &[MulIndex] {
        self.dp.who_displays(v)
    }

    /// Returns the distinct labels below the start node, sorted.
    pub fn labels(&self) -> Vec<LabelIndex> {
        self.dp.host_labels()
    }

    /// Returns the highest guest ancestor of `v` (possibly `v` itself) whose
    /// subtree is displayed by the MUL-tree.
    ///
    /// The walk stops early once the only displaying node is the MUL root,
    /// since no proper ancestor can then be displayed.
    ///
    /// # Returns
    /// `None` if not even `v` is displayed.
    pub fn highest_displayed_ancestor(&mut self, v: NodeIndex) -> Option<NodeIndex> {
        if self.dp.who_displays(v).is_empty() {
            return None;
        }
        let guest = self.dp.guest();
        let mut current = v;
        while self.dp.who_displays(current) != [0] {
            let Some(parent) = guest.parent(current) else {
                break;
            };
            if self.dp.who_displays(parent).is_empty() {
                break;
            }
            current = parent;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LeafLabelMap;
    use crate::newick::parse_network;

    #[test]
    fn test_highest_displayed_ancestor_in_pendant_subtree() {
        let mut labels = LeafLabelMap::new();
        let host = parse_network("((A,B),(C,D));", &mut labels).unwrap();
        let guest = parse_network("(((A,B),C),D);", &mut labels).unwrap();
        let left = host.children(host.root().unwrap())[0];
        let a = guest
            .leaves()
            .find(|&l| guest.label(l) == labels.get_index("A"))
            .unwrap();

        let mut component = TreeInComponent::new(&host, left, &guest, ContainmentConfig::default()).unwrap();
        let highest = component.highest_displayed_ancestor(a).unwrap();
        assert_eq!(guest.children(highest).len(), 2);
        assert!(guest.children(highest).iter().all(|&c| guest.is_leaf(c)));
        assert_eq!(component.labels().len(), 2);
    }
}
