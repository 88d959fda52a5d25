//! Tree components of a host network and the DAG connecting them.
//!
//! A tree component is a maximal part of the host without reticulations
//! inside; it is rooted at the network root or at a node whose parent is a
//! reticulation. The [ComponentDag] has an arc from one component root to
//! another if the latter is reached from the former's component through a
//! chain of reticulations.

use crate::model::{Network, NodeIndex};
use rustc_hash::FxHashMap;

// =#========================================================================#=
// COMPONENT DAG
// =#========================================================================#=
/// DAG over the tree component roots of a host network.
///
/// Besides its children, every DAG node records its entries: the component
/// roots of the tree nodes at the top of the reticulation chain above it,
/// once per path through the chain.
#[derive(Debug, Clone, Default)]
pub(crate) struct ComponentDag {
    /// Host node of each DAG node
    data: Vec<NodeIndex>,
    children: Vec<Vec<usize>>,
    entries: Vec<Vec<usize>>,
    index_of: FxHashMap<NodeIndex, usize>,
}

impl ComponentDag {
    fn add_node(&mut self, host_node: NodeIndex) -> usize {
        let index = self.data.len();
        self.data.push(host_node);
        self.children.push(Vec::new());
        self.entries.push(Vec::new());
        self.index_of.insert(host_node, index);
        index
    }

    fn add_edge(&mut self, from: usize, to: usize) {
        if !self.children[from].contains(&to) {
            self.children[from].push(to);
        }
    }

    /// Returns the number of DAG nodes.
    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns the host node of DAG node `i`.
    pub(crate) fn data(&self, i: usize) -> NodeIndex {
        self.data[i]
    }

    /// Returns the DAG node of a component root.
    pub(crate) fn index_of(&self, host_node: NodeIndex) -> Option<usize> {
        self.index_of.get(&host_node).copied()
    }

    /// Returns the DAG children of DAG node `i`.
    pub(crate) fn children(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.children[i].iter().copied()
    }

    /// Returns the entries of DAG node `i`, one per path through its
    /// reticulation chain; empty for the network root.
    pub(crate) fn entries(&self, i: usize) -> &[usize] {
        &self.entries[i]
    }

    /// Returns all DAG nodes, children before parents.
    pub(crate) fn postorder(&self) -> Vec<usize> {
        let n = self.data.len();
        let mut order = Vec::with_capacity(n);
        let mut visited = vec![false; n];
        for start in 0..n {
            if visited[start] {
                continue;
            }
            let mut stack = vec![(start, false)];
            while let Some((i, children_visited)) = stack.pop() {
                if children_visited {
                    order.push(i);
                    continue;
                }
                if visited[i] {
                    continue;
                }
                visited[i] = true;
                stack.push((i, true));
                for c in self.children(i) {
                    if !visited[c] {
                        stack.push((c, false));
                    }
                }
            }
        }
        order
    }
}

// =#========================================================================#=
// TREE COMPONENT INFO
// =#========================================================================#=
/// Component membership, component DAG and visible leaves of a host network.
///
/// Computed from scratch for one generation of the host.
#[derive(Debug, Clone, Default)]
pub(crate) struct TreeComponentInfo {
    /// Component root per arena slot; for a reticulation only if all its
    /// parents agree on one
    comp_root: Vec<Option<NodeIndex>>,
    /// A leaf visible from the component root, per arena slot
    visible_leaf: Vec<Option<NodeIndex>>,
    dag: ComponentDag,
    generation: u64,
}

impl TreeComponentInfo {
    /// Computes the component info of `host`.
    pub(crate) fn compute(host: &Network, generation: u64) -> Self {
        let n = host.capacity();
        let mut info = TreeComponentInfo {
            comp_root: vec![None; n],
            visible_leaf: vec![None; n],
            dag: ComponentDag::default(),
            generation,
        };

        for v in host.topological_order() {
            info.comp_root[v] = info.inherit_root(host, v);
        }

        let roots: Vec<NodeIndex> = host
            .node_indices()
            .filter(|&v| info.comp_root[v] == Some(v))
            .collect();
        for &r in &roots {
            info.dag.add_node(r);
        }
        for (to, &r) in roots.iter().enumerate() {
            for above in info.roots_above(host, r) {
                if let Some(from) = info.dag.index_of(above) {
                    info.dag.entries[to].push(from);
                    info.dag.add_edge(from, to);
                }
            }
        }

        info.compute_visible_leaves(host);
        info
    }

    /// Returns the component root `v` belongs to:
    /// - the root is its own component root,
    /// - a reticulation gets the component root all its parents agree on,
    /// - a child of a reticulation is its own component root,
    /// - every other node inherits from its parent.
    ///
    /// Parents must have been resolved before.
    fn inherit_root(&self, host: &Network, v: NodeIndex) -> Option<NodeIndex> {
        match host.parents(v) {
            [] => Some(v),
            [p] if host.is_reticulation(*p) => Some(v),
            [p] => self.comp_root[*p],
            [first, rest @ ..] => {
                let root = self.comp_root[*first]?;
                rest.iter()
                    .all(|&p| self.comp_root[p] == Some(root))
                    .then_some(root)
            }
        }
    }

    /// Returns the component roots reached upwards from component root `r`
    /// through its chain of reticulations, once per path.
    ///
    /// Every chain node has a single child, so no node is met twice.
    fn roots_above(&self, host: &Network, r: NodeIndex) -> Vec<NodeIndex> {
        let mut found = Vec::new();
        let mut stack: Vec<NodeIndex> = host
            .parents(r)
            .iter()
            .copied()
            .filter(|&p| host.is_reticulation(p))
            .collect();
        while let Some(ret) = stack.pop() {
            for &p in host.parents(ret) {
                if host.is_reticulation(p) {
                    stack.push(p);
                } else if let Some(c) = self.comp_root[p] {
                    found.push(c);
                }
            }
        }
        found
    }

    /// Assigns visible leaves, climbing from every leaf through the
    /// components all of whose entering reticulations agree on one
    /// component above.
    fn compute_visible_leaves(&mut self, host: &Network) {
        for leaf in host.leaves() {
            let Some(mut comp) = self.comp_root[leaf] else {
                continue;
            };
            loop {
                if self.visible_leaf[comp].is_some() {
                    break;
                }
                self.visible_leaf[comp] = Some(leaf);
                let above = match host.parents(comp) {
                    [ret] if host.is_reticulation(*ret) => self.comp_root[*ret],
                    _ => None,
                };
                match above {
                    Some(c) if c != comp => comp = c,
                    _ => break,
                }
            }
        }
    }

    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the component root of `v`, if determined.
    pub(crate) fn comp_root(&self, v: NodeIndex) -> Option<NodeIndex> {
        self.comp_root.get(v).copied().flatten()
    }

    /// Returns a leaf visible from component root `r`, if known.
    pub(crate) fn visible_leaf(&self, r: NodeIndex) -> Option<NodeIndex> {
        self.visible_leaf.get(r).copied().flatten()
    }

    pub(crate) fn dag(&self) -> &ComponentDag {
        &self.dag
    }
}
