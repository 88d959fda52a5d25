mod common;

use treedisplay::error::ContainmentError;
use treedisplay::model::{LeafLabelMap, Network};
use treedisplay::newick::parse_network;

// --- CONSTRUCTION ---
#[test]
fn test_building_network() {
    let mut labels = LeafLabelMap::new();
    let mut net = Network::new();
    let root = net.add_internal();
    let x = net.add_internal();
    let y = net.add_internal();
    let r = net.add_internal();
    let a = net.add_leaf(labels.get_or_insert("A"));
    let b = net.add_leaf(labels.get_or_insert("B"));
    let c = net.add_leaf(labels.get_or_insert("C"));
    net.add_edge(root, x);
    net.add_edge(root, y);
    net.add_edge(x, a);
    net.add_edge(x, r);
    net.add_edge(y, b);
    net.add_edge(y, r);
    net.add_edge(r, c);

    // Counts
    assert_eq!(net.num_nodes(), 7);
    assert_eq!(net.num_edges(), 7);
    assert_eq!(net.num_leaves(), 3);
    assert_eq!(net.num_reticulations(), 1);
    assert!(!net.is_tree());

    // Root is found and set
    assert_eq!(net.validate(), Ok(root));
    assert_eq!(net.root(), Some(root));

    // Relationships
    assert!(net.is_reticulation(r));
    assert_eq!(net.parents(r), &[x, y]);
    assert_eq!(net.children(x), &[a, r]);
    assert_eq!(net.parent(c), Some(r));
    assert_eq!(net.label(a), labels.get_index("A"));
    assert_eq!(net.label(x), None);
    assert!(net.has_edge(y, r));
    assert!(!net.has_edge(r, y));
}

#[test]
fn test_parallel_arcs() {
    let mut net = Network::new();
    let root = net.add_internal();
    let r = net.add_internal();
    let a = net.add_leaf(0);
    net.add_edge(root, r);
    net.add_edge(root, r);
    net.add_edge(r, a);

    assert_eq!(net.in_degree(r), 2);
    assert!(net.is_reticulation(r));
    assert!(net.remove_edge(root, r));
    assert_eq!(net.in_degree(r), 1);
    assert_eq!(net.remove_all_edges(root, r), 1);
    assert_eq!(net.remove_all_edges(root, r), 0);
    assert_eq!(net.num_edges(), 1);
}

// --- VALIDATION ---
#[test]
fn test_validation_errors() {
    let mut empty = Network::new();
    assert_eq!(empty.validate(), Err(ContainmentError::EmptyNetwork));

    let mut two_roots = Network::new();
    two_roots.add_leaf(0);
    two_roots.add_leaf(1);
    assert_eq!(two_roots.validate(), Err(ContainmentError::MultipleRoots { count: 2 }));

    let mut cyclic = Network::new();
    let root = cyclic.add_internal();
    let u = cyclic.add_internal();
    let v = cyclic.add_internal();
    cyclic.add_edge(root, u);
    cyclic.add_edge(u, v);
    cyclic.add_edge(v, u);
    assert_eq!(cyclic.validate(), Err(ContainmentError::Cyclic));
}

#[test]
fn test_check_tree() {
    let mut labels = LeafLabelMap::new();
    let tree = parse_network("((A,B),C);", &mut labels).unwrap();
    assert!(tree.check_tree().is_ok());

    let network = parse_network("((A,(C)#H1),(B,#H1));", &mut labels).unwrap();
    match network.check_tree() {
        Err(ContainmentError::NotATree { in_degree, .. }) => assert_eq!(in_degree, 2),
        other => panic!("expected NotATree, got {:?}", other),
    }
}

// --- SURGERY ---
#[test]
fn test_contract_down_keeps_child() {
    let mut labels = LeafLabelMap::new();
    let mut net = parse_network("(((A,B)),C);", &mut labels).unwrap();
    let root = net.root().unwrap();
    let single = net
        .children(root)
        .iter()
        .copied()
        .find(|&v| net.out_degree(v) == 1)
        .unwrap();
    let below = net.children(single)[0];

    let survivor = net.contract_down(single);
    assert_eq!(survivor, below);
    assert!(!net.is_alive(single));
    assert_eq!(net.parent(below), Some(root));
    // Position among the root's children is kept
    assert_eq!(net.children(root)[0], below);
}

#[test]
fn test_contract_down_of_root_moves_root() {
    let mut labels = LeafLabelMap::new();
    let mut net = parse_network("((A,B));", &mut labels).unwrap();
    let root = net.root().unwrap();
    let child = net.children(root)[0];

    assert_eq!(net.suppress_node(root), Some(child));
    assert_eq!(net.root(), Some(child));
    assert_eq!(net.in_degree(child), 0);
    assert_eq!(net.num_nodes(), 3);
}

#[test]
fn test_contract_up_absorbs_child() {
    let mut labels = LeafLabelMap::new();
    let mut net = parse_network("(((A,B)),C);", &mut labels).unwrap();
    let root = net.root().unwrap();
    let single = net.children(root)[0];
    let below = net.children(single)[0];

    assert_eq!(net.contract_up(single), single);
    assert!(!net.is_alive(below));
    assert_eq!(net.out_degree(single), 2);
    for &leaf in net.children(single) {
        assert_eq!(net.parent(leaf), Some(single));
    }
}

#[test]
fn test_split_above_reticulation_leaf() {
    let mut labels = LeafLabelMap::new();
    let mut net = parse_network("((A,C#H1),(B,#H1));", &mut labels).unwrap();
    let c = common::leaf_by_name(&net, &labels, "C");
    assert_eq!(net.in_degree(c), 2);

    let r = net.split_above(c);
    assert_eq!(net.in_degree(r), 2);
    assert_eq!(net.children(r), &[c]);
    assert_eq!(net.parents(c), &[r]);
    assert!(net.is_leaf(c));
}

#[test]
fn test_remove_node_detaches() {
    let mut labels = LeafLabelMap::new();
    let mut net = parse_network("((A,B),C);", &mut labels).unwrap();
    let a = common::leaf_by_name(&net, &labels, "A");
    let parent = net.parent(a).unwrap();

    net.remove_node(a);
    assert!(!net.is_alive(a));
    assert_eq!(net.out_degree(parent), 1);
    assert_eq!(net.num_leaves(), 2);
    assert_eq!(net.num_edges(), 3);
    assert!(net.node_indices().all(|v| v != a));
}

// --- TRAVERSAL ---
#[test]
fn test_traversals_visit_shared_nodes_once() {
    let mut labels = LeafLabelMap::new();
    let net = parse_network("((A,(C)#H1),(B,#H1));", &mut labels).unwrap();
    let root = net.root().unwrap();

    let post: Vec<_> = net.post_order_iter().collect();
    let pre: Vec<_> = net.pre_order_iter().collect();
    assert_eq!(post.len(), net.num_nodes());
    assert_eq!(pre.len(), net.num_nodes());
    assert_eq!(post.last(), Some(&root));
    assert_eq!(pre.first(), Some(&root));

    // Topological order: every arc points forward
    let order = net.topological_order();
    let mut position = vec![0; net.capacity()];
    for (i, &v) in order.iter().enumerate() {
        position[v] = i;
    }
    for v in net.node_indices() {
        for &c in net.children(v) {
            assert!(position[v] < position[c]);
        }
    }

    let c = common::leaf_by_name(&net, &labels, "C");
    let reticulation = net.parent(c).unwrap();
    let below = net.descendant_flags(reticulation);
    assert!(below[reticulation] && below[c]);
    assert!(!below[root]);
}

#[test]
fn test_dominated_flags_exclude_nodes_with_other_parents() {
    let mut labels = LeafLabelMap::new();
    let net = parse_network("((A,(C)#H1),(B,#H1));", &mut labels).unwrap();
    let a = common::leaf_by_name(&net, &labels, "A");
    let b = common::leaf_by_name(&net, &labels, "B");
    let c = common::leaf_by_name(&net, &labels, "C");
    let x = net.parent(a).unwrap();
    let reticulation = net.parent(c).unwrap();

    let dominated = net.dominated_flags(x);
    assert!(dominated[x] && dominated[a]);
    // H1 and C are also reachable through the parent of B
    assert!(!dominated[reticulation] && !dominated[c]);
    assert!(!dominated[b]);

    let below_reticulation = net.dominated_flags(reticulation);
    assert!(below_reticulation[reticulation] && below_reticulation[c]);
    assert!(!below_reticulation[a]);
}
