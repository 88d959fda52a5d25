//! Dynamic program deciding whether a tree is displayed by a (MUL-)tree.

use crate::config::ContainmentConfig;
use crate::display::induced::InducedTree;
use crate::display::matching::saturates_left;
use crate::display::merge::merge_sorted;
use crate::display::mul_tree::{MulIndex, MulTree};
use crate::error::ContainmentError;
use crate::label_matching::{LabelMatching, MultiHost, SingleHost};
use crate::model::{LabelIndex, Network, NodeIndex};
use log::trace;
use rustc_hash::FxHashMap;

// =#========================================================================#=
// TREE IN TREE CONTAINMENT
// =#========================================================================#=
/// Decides whether a guest tree is displayed by a host tree (or MUL-tree).
///
/// For a guest node `u`, [`who_displays`](Self::who_displays) lists the
/// lowest host nodes whose subtree displays the subtree of `u`, in preorder.
/// Results are memoized per guest node; the guest is borrowed and must not
/// change while this instance is alive.
///
/// # Example
/// ```
/// use treedisplay::display::TreeInTreeContainment;
/// use treedisplay::model::LeafLabelMap;
/// use treedisplay::newick::parse_network;
/// use treedisplay::ContainmentConfig;
///
/// let mut labels = LeafLabelMap::new();
/// let host = parse_network("(((A,B),C),(D,E));", &mut labels).unwrap();
/// let guest = parse_network("((A,C),E);", &mut labels).unwrap();
///
/// let mut dp = TreeInTreeContainment::new(&host, &guest, ContainmentConfig::default()).unwrap();
/// assert!(dp.displayed());
/// ```
#[derive(Debug, Clone)]
pub struct TreeInTreeContainment<'a> {
    host: MulTree,
    guest: &'a Network,
    guest_root: NodeIndex,
    leaf_poss: LabelMatching<MultiHost>,
    memo: FxHashMap<NodeIndex, Vec<MulIndex>>,
    config: ContainmentConfig,
}

impl<'a> TreeInTreeContainment<'a> {
    /// Creates a query for a host tree and a guest tree.
    ///
    /// # Errors
    /// - Either side is empty, has several roots or contains a cycle
    /// - Either side has a node with several parents ([ContainmentError::NotATree])
    /// - A guest leaf is unlabeled or a label occurs twice on one side
    pub fn new(
        host: &Network,
        guest: &'a Network,
        config: ContainmentConfig,
    ) -> Result<Self, ContainmentError> {
        let host_root = host.find_root()?;
        host.check_tree()?;
        let guest_root = guest.find_root()?;
        guest.check_tree()?;

        let mut host_labels: LabelMatching<SingleHost> = LabelMatching::new();
        for leaf in host.leaves() {
            if let Some(label) = host.label(leaf) {
                host_labels.insert_host(label, leaf)?;
            }
        }
        let mut guest_labels: LabelMatching<MultiHost> = LabelMatching::new();
        for leaf in guest.leaves() {
            let label = guest
                .label(leaf)
                .ok_or(ContainmentError::UnlabeledGuestLeaf { node: leaf })?;
            guest_labels.insert_guest(label, leaf)?;
        }

        let mul = MulTree::unzip(host, host_root, usize::MAX).ok_or(ContainmentError::EmptyNetwork)?;
        Ok(Self::from_parts(mul, guest, guest_root, config))
    }

    /// Creates a query for an already unzipped host and a validated guest.
    pub(crate) fn from_parts(
        host: MulTree,
        guest: &'a Network,
        guest_root: NodeIndex,
        config: ContainmentConfig,
    ) -> Self {
        let mut leaf_poss = LabelMatching::new();
        for (v, label) in host.labeled_leaves() {
            // Multi-host slots accept every node
            let _ = leaf_poss.insert_host(label, v);
        }
        for leaf in guest.pre_order_from(guest_root).filter(|&v| guest.is_leaf(v)) {
            if let Some(label) = guest.label(leaf) {
                let inserted = leaf_poss.insert_guest(label, leaf);
                debug_assert!(inserted.is_ok(), "guest label {} occurs twice", label);
            }
        }

        TreeInTreeContainment {
            host,
            guest,
            guest_root,
            leaf_poss,
            memo: FxHashMap::default(),
            config,
        }
    }

    /// Returns the host (MUL-)tree.
    pub fn host(&self) -> &MulTree {
        &self.host
    }

    /// Returns the guest tree.
    pub fn guest(&self) -> &'a Network {
        self.guest
    }

    /// Returns the root of the guest tree.
    pub fn guest_root(&self) -> NodeIndex {
        self.guest_root
    }

    /// Returns the distinct labels of the host, sorted.
    pub fn host_labels(&self) -> Vec<LabelIndex> {
        self.leaf_poss
            .labels()
            .into_iter()
            .filter(|&l| !self.leaf_poss.host_nodes(l).is_empty())
            .collect()
    }

    /// Returns `true` if the guest tree is displayed by the host.
    pub fn displayed(&mut self) -> bool {
        !self.who_displays(self.guest_root).is_empty()
    }

    /// Returns the lowest host nodes displaying the guest subtree below `u`,
    /// sorted by preorder number; empty if the subtree is not displayed.
    ///
    /// Every ancestor of a returned node displays the subtree as well.
    pub fn who_displays(&mut self, u: NodeIndex) -> &[MulIndex] {
        if !self.memo.contains_key(&u) {
            let pending: Vec<NodeIndex> = self
                .guest
                .post_order_from(u)
                .filter(|v| !self.memo.contains_key(v))
                .collect();
            for v in pending {
                let poss = self.compute(v);
                trace!("Guest node {} displayed at {} host nodes", v, poss.len());
                self.memo.insert(v, poss);
            }
        }
        self.memo.get(&u).map_or(&[][..], |poss| poss.as_slice())
    }

    /// Returns the host network nodes the copies returned by
    /// [`who_displays`](Self::who_displays) were made from.
    pub fn displaying_host_nodes(&mut self, u: NodeIndex) -> Vec<NodeIndex> {
        let poss = self.who_displays(u).to_vec();
        poss.into_iter().map(|x| self.host.node(x).origin).collect()
    }

    /// Computes the displaying nodes of `u`, all children of `u` being memoized.
    fn compute(&self, u: NodeIndex) -> Vec<MulIndex> {
        let children = self.guest.children(u);
        if children.is_empty() {
            return match self.guest.label(u) {
                Some(label) => self.leaf_poss.host_nodes(label).to_vec(),
                None => Vec::new(),
            };
        }

        let lists: Vec<&[MulIndex]> = children
            .iter()
            .map(|c| self.memo.get(c).map_or(&[][..], |poss| poss.as_slice()))
            .collect();
        if lists.iter().any(|poss| poss.is_empty()) {
            return Vec::new();
        }
        if let [only] = lists.as_slice() {
            return only.to_vec();
        }

        let merged = merge_sorted(&lists, self.config.merge_heap_threshold);
        let induced = InducedTree::build(&self.host, &merged);
        let k = lists.len();
        let m = induced.len();

        // has[p * k + i]: induced subtree at p contains a displaying node of child i
        let mut has = vec![false; m * k];
        for (i, poss) in lists.iter().enumerate() {
            for &x in poss.iter() {
                let mut pos = induced.position(x);
                while let Some(p) = pos {
                    if has[p * k + i] {
                        break;
                    }
                    has[p * k + i] = true;
                    pos = induced.parent(p);
                }
            }
        }

        // Reverse preorder visits descendants first
        let mut done = vec![false; m];
        let mut result = Vec::new();
        for p in (0..m).rev() {
            let below = induced.children(p);
            if below.iter().any(|&q| done[q]) {
                done[p] = true;
                continue;
            }
            if below.len() >= k
                && (0..k).all(|i| has[p * k + i])
                && saturates_left(k, below.len(), |i, j| has[below[j] * k + i])
            {
                done[p] = true;
                result.push(induced.node(p));
            }
        }
        result.reverse();
        result
    }
}
