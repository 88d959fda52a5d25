//! Shared helpers for integration tests: brute-force containment and random
//! instance generation.
#![allow(dead_code)]

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rustc_hash::FxHashSet;
use treedisplay::model::{LabelIndex, LeafLabelMap, Network, NodeIndex};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Returns the leaf of `network` labeled `label` (as named in `labels`).
pub fn leaf_by_name(network: &Network, labels: &LeafLabelMap, name: &str) -> NodeIndex {
    let label = labels.get_index(name).unwrap();
    network.leaves().find(|&l| network.label(l) == Some(label)).unwrap()
}

// --- CANONICAL FORMS ---

/// Canonical string of the tree below `v`, keeping only leaves whose label
/// is in `keep` and suppressing single-child nodes. For a reticulation,
/// only the arc from `choice[r]` is followed.
fn canonical_below(
    network: &Network,
    v: NodeIndex,
    keep: &FxHashSet<LabelIndex>,
    choice: &[Option<NodeIndex>],
) -> Option<String> {
    if network.is_leaf(v) {
        return network
            .label(v)
            .filter(|l| keep.contains(l))
            .map(|l| l.to_string());
    }
    let mut parts: Vec<String> = Vec::new();
    let mut children = network.children(v).to_vec();
    children.sort_unstable();
    children.dedup();
    for c in children {
        if network.is_reticulation(c) && choice[c] != Some(v) {
            continue;
        }
        if let Some(part) = canonical_below(network, c, keep, choice) {
            parts.push(part);
        }
    }
    match parts.len() {
        0 => None,
        1 => parts.pop(),
        _ => {
            parts.sort();
            Some(format!("({})", parts.join(",")))
        }
    }
}

/// Canonical string of a tree restricted to its own leaf labels.
pub fn canonical_tree(tree: &Network) -> Option<String> {
    let keep: FxHashSet<LabelIndex> = tree.leaves().filter_map(|l| tree.label(l)).collect();
    let choice = vec![None; tree.capacity()];
    canonical_below(tree, tree.root()?, &keep, &choice)
}

/// Decides containment by enumerating all switchings of `host`.
pub fn brute_force_displayed(host: &Network, guest: &Network) -> bool {
    let Some(target) = canonical_tree(guest) else {
        return false;
    };
    let keep: FxHashSet<LabelIndex> = guest.leaves().filter_map(|l| guest.label(l)).collect();
    let Some(root) = host.root() else {
        return false;
    };
    let reticulations: Vec<(NodeIndex, Vec<NodeIndex>)> = host
        .node_indices()
        .filter(|&r| host.is_reticulation(r))
        .map(|r| {
            let mut parents = host.parents(r).to_vec();
            parents.sort_unstable();
            parents.dedup();
            (r, parents)
        })
        .collect();

    let mut counters = vec![0usize; reticulations.len()];
    let mut choice = vec![None; host.capacity()];
    loop {
        for (i, (r, parents)) in reticulations.iter().enumerate() {
            choice[*r] = Some(parents[counters[i]]);
        }
        if canonical_below(host, root, &keep, &choice).as_deref() == Some(target.as_str()) {
            return true;
        }
        // Advance the mixed-radix counter
        let mut i = 0;
        loop {
            if i == counters.len() {
                return false;
            }
            counters[i] += 1;
            if counters[i] < reticulations[i].1.len() {
                break;
            }
            counters[i] = 0;
            i += 1;
        }
    }
}

// --- RANDOM INSTANCES ---

/// Random binary tree with one leaf per label in `names`.
pub fn random_tree(rng: &mut SmallRng, names: &[LabelIndex]) -> Network {
    let mut tree = Network::new();
    let mut subtrees: Vec<NodeIndex> = names.iter().map(|&l| tree.add_leaf(l)).collect();
    while subtrees.len() > 1 {
        let a = subtrees.swap_remove(rng.random_range(0..subtrees.len()));
        let b = subtrees.swap_remove(rng.random_range(0..subtrees.len()));
        let parent = tree.add_internal();
        tree.add_edge(parent, a);
        tree.add_edge(parent, b);
        subtrees.push(parent);
    }
    tree.set_root(subtrees[0]);
    tree
}

/// Interns `n` taxon names and returns their label indices.
pub fn taxa(labels: &mut LeafLabelMap, n: usize) -> Vec<LabelIndex> {
    (0..n).map(|i| labels.get_or_insert(&format!("t{}", i))).collect()
}

/// Random binary network: a random tree with `k` reticulations added by
/// connecting subdivisions of two random arcs.
pub fn random_network(rng: &mut SmallRng, labels: &mut LeafLabelMap, n: usize, k: usize) -> Network {
    let names = taxa(labels, n);
    let mut network = random_tree(rng, &names);
    let mut added = 0;
    let mut attempts = 0;
    while added < k && attempts < 50 * (k + 1) {
        attempts += 1;
        let arcs: Vec<(NodeIndex, NodeIndex)> = network
            .node_indices()
            .flat_map(|p| network.children(p).iter().map(move |&c| (p, c)))
            .collect();
        if arcs.len() < 2 {
            break;
        }
        let (a, b) = arcs[rng.random_range(0..arcs.len())];
        let (c, d) = arcs[rng.random_range(0..arcs.len())];
        if (a, b) == (c, d) || network.descendant_flags(d)[a] {
            continue;
        }
        let x = subdivide(&mut network, a, b);
        let y = subdivide(&mut network, c, d);
        network.add_edge(x, y);
        added += 1;
    }
    network
}

/// Random tree joining two or three subtrees at a time.
pub fn random_multifurcating_tree(rng: &mut SmallRng, names: &[LabelIndex]) -> Network {
    let mut tree = Network::new();
    let mut subtrees: Vec<NodeIndex> = names.iter().map(|&l| tree.add_leaf(l)).collect();
    while subtrees.len() > 1 {
        let arity = if subtrees.len() >= 3 && rng.random_bool(0.3) { 3 } else { 2 };
        let parent = tree.add_internal();
        for _ in 0..arity {
            let child = subtrees.swap_remove(rng.random_range(0..subtrees.len()));
            tree.add_edge(parent, child);
        }
        subtrees.push(parent);
    }
    tree.set_root(subtrees[0]);
    tree
}

/// Random network built from a multifurcating tree by `k` times
/// subdividing a random arc and adding an arc from the new node to any
/// node that is not its ancestor.
///
/// Targets that already have a parent besides the subdivision become
/// reticulations with three or more parents, and targets without a single
/// child end up with several parents and several (or no) children.
pub fn random_general_network(rng: &mut SmallRng, labels: &mut LeafLabelMap, n: usize, k: usize) -> Network {
    let names = taxa(labels, n);
    let mut network = random_multifurcating_tree(rng, &names);
    let root = network.root().unwrap();
    let mut added = 0;
    let mut attempts = 0;
    while added < k && attempts < 50 * (k + 1) {
        attempts += 1;
        let arcs: Vec<(NodeIndex, NodeIndex)> = network
            .node_indices()
            .flat_map(|p| network.children(p).iter().map(move |&c| (p, c)))
            .collect();
        let (a, b) = arcs[rng.random_range(0..arcs.len())];
        let targets: Vec<NodeIndex> = network
            .node_indices()
            .filter(|&t| t != root && t != b && !network.descendant_flags(t)[a])
            .collect();
        if targets.is_empty() {
            continue;
        }
        let target = targets[rng.random_range(0..targets.len())];
        let x = subdivide(&mut network, a, b);
        network.add_edge(x, target);
        added += 1;
    }
    network
}

/// Contracts each internal non-root arc of `tree` with probability `p`,
/// producing multifurcations.
pub fn contract_random_edges(rng: &mut SmallRng, tree: &mut Network, p: f64) {
    let internal: Vec<NodeIndex> = tree
        .node_indices()
        .filter(|&v| !tree.is_leaf(v) && tree.parent(v).is_some())
        .collect();
    for v in internal {
        if !rng.random_bool(p) {
            continue;
        }
        let Some(parent) = tree.parent(v) else {
            continue;
        };
        for w in tree.children(v).to_vec() {
            tree.remove_edge(v, w);
            tree.add_edge(parent, w);
        }
        tree.remove_edge(parent, v);
        tree.remove_node(v);
    }
}

fn subdivide(network: &mut Network, parent: NodeIndex, child: NodeIndex) -> NodeIndex {
    let mid = network.add_internal();
    network.remove_edge(parent, child);
    network.add_edge(parent, mid);
    network.add_edge(mid, child);
    mid
}

/// A tree displayed by `host`: a random switching restricted to a random
/// subset of at least `min_labels` labels.
pub fn random_displayed_tree(rng: &mut SmallRng, host: &Network, min_labels: usize) -> Network {
    let mut choice = vec![None; host.capacity()];
    for r in host.node_indices().filter(|&r| host.is_reticulation(r)) {
        let parents = host.parents(r);
        choice[r] = Some(parents[rng.random_range(0..parents.len())]);
    }
    let mut all: Vec<LabelIndex> = host.leaves().filter_map(|l| host.label(l)).collect();
    all.shuffle(rng);
    let size = rng.random_range(min_labels.min(all.len())..=all.len());
    let keep: FxHashSet<LabelIndex> = all.into_iter().take(size).collect();

    let mut tree = Network::new();
    if let Some(root) = host.root() {
        if let Some(r) = copy_switching(host, root, &keep, &choice, &mut tree) {
            tree.set_root(r);
        }
    }
    tree
}

fn copy_switching(
    host: &Network,
    v: NodeIndex,
    keep: &FxHashSet<LabelIndex>,
    choice: &[Option<NodeIndex>],
    tree: &mut Network,
) -> Option<NodeIndex> {
    if host.is_leaf(v) {
        return host.label(v).filter(|l| keep.contains(l)).map(|l| tree.add_leaf(l));
    }
    let mut kept = Vec::new();
    for &c in host.children(v) {
        if host.is_reticulation(c) && choice[c] != Some(v) {
            continue;
        }
        if let Some(copy) = copy_switching(host, c, keep, choice, tree) {
            kept.push(copy);
        }
    }
    match kept.len() {
        0 => None,
        1 => kept.pop(),
        _ => {
            let parent = tree.add_internal();
            for c in kept {
                tree.add_edge(parent, c);
            }
            Some(parent)
        }
    }
}

/// Swaps the labels of two random leaves of `tree`.
pub fn swap_two_labels(rng: &mut SmallRng, tree: &mut Network) {
    let leaves: Vec<NodeIndex> = tree.leaves().collect();
    if leaves.len() < 2 {
        return;
    }
    let i = rng.random_range(0..leaves.len());
    let j = (i + 1 + rng.random_range(0..leaves.len() - 1)) % leaves.len();
    let (a, b) = (tree.label(leaves[i]), tree.label(leaves[j]));
    tree.set_label(leaves[i], b);
    tree.set_label(leaves[j], a);
}

pub fn seeded_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}
