mod common;

use treedisplay::model::LeafLabelMap;
use treedisplay::newick::{NewickParser, parse_network, parse_pair, to_newick};
use treedisplay::parser::ParsingErrorType;
use treedisplay::parser::byte_parser::ByteParser;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let newick = "((A:1.0,B:2.0):3.0,C:4.0):0.5;";
    let mut labels = LeafLabelMap::new();
    let tree = parse_network(newick, &mut labels).unwrap();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_nodes(), 5);
    assert_eq!(tree.num_edges(), 4);
    assert_eq!(labels.num_labels(), 3);
    assert!(tree.is_tree());

    // Test relationships
    // - Root has children (internal, C)
    let root = tree.root().unwrap();
    let (left, right) = (tree.children(root)[0], tree.children(root)[1]);
    assert_eq!(tree.out_degree(left), 2);
    assert_eq!(tree.label(right), labels.get_index("C"));

    // - Internal node has children (A, B)
    let a = common::leaf_by_name(&tree, &labels, "A");
    let b = common::leaf_by_name(&tree, &labels, "B");
    assert_eq!(tree.parent(a), Some(left));
    assert_eq!(tree.parent(b), Some(left));
}

#[test]
fn test_multifurcation_and_internal_names() {
    let mut labels = LeafLabelMap::new();
    let tree = parse_network("((A,B,C)inner,D)root;", &mut labels).unwrap();

    let root = tree.root().unwrap();
    assert_eq!(tree.out_degree(tree.children(root)[0]), 3);
    // Internal names are dropped
    assert!(!labels.contains_label("inner"));
    assert!(!labels.contains_label("root"));
    assert_eq!(tree.label(root), None);
    assert_eq!(labels.num_labels(), 4);
}

#[test]
fn test_hybrid_tags() {
    let mut labels = LeafLabelMap::new();
    let network = parse_network("((A,(C)#H1),(B,#H1));", &mut labels).unwrap();
    assert_eq!(network.num_nodes(), 7);
    assert_eq!(network.num_reticulations(), 1);

    let c = common::leaf_by_name(&network, &labels, "C");
    let reticulation = network.parent(c).unwrap();
    assert_eq!(network.in_degree(reticulation), 2);
    assert_eq!(network.label(reticulation), None);

    // Labeled hybrid leaf: the leaf itself is the reticulation
    let network = parse_network("((A,C#H1),(B,#H1));", &mut labels).unwrap();
    let c = common::leaf_by_name(&network, &labels, "C");
    assert_eq!(network.in_degree(c), 2);
    assert!(network.is_leaf(c));
}

#[test]
fn test_hybrid_subtree_given_at_second_occurrence() {
    let mut labels = LeafLabelMap::new();
    let network = parse_network("((A,#H1),(B,(C,D)#H1));", &mut labels).unwrap();
    let c = common::leaf_by_name(&network, &labels, "C");
    let reticulation = network.parent(c).unwrap();
    assert_eq!(network.in_degree(reticulation), 2);
    assert_eq!(network.out_degree(reticulation), 2);
}

#[test]
fn test_quoted_labels_and_comments() {
    let mut labels = LeafLabelMap::new();
    let tree = parse_network(
        "[&R] (('Night parrot':0.1,'A#B')[comment],Kakapo[&length=2]);",
        &mut labels,
    )
    .unwrap();
    assert!(labels.contains_label("Night parrot"));
    // Quoted labels are never split at '#'
    assert!(labels.contains_label("A#B"));
    assert!(labels.contains_label("Kakapo"));
    assert!(tree.is_tree());
}

#[test]
fn test_shared_label_map() {
    let (host, guest, labels) = parse_pair("((A,(C)#H1),(B,#H1));", "((C,A),B);").unwrap();
    assert_eq!(labels.num_labels(), 3);
    let host_c = common::leaf_by_name(&host, &labels, "C");
    let guest_c = common::leaf_by_name(&guest, &labels, "C");
    assert_eq!(host.label(host_c), guest.label(guest_c));
}

#[test]
fn test_parser_reuse() {
    let mut labels = LeafLabelMap::new();
    let mut newick_parser = NewickParser::new();
    let mut byte_parser = ByteParser::for_str("((A,#H1),(B,(C)#H1)); ((A,B),C);");
    let first = newick_parser.parse(&mut byte_parser, &mut labels).unwrap();
    let second = newick_parser.parse(&mut byte_parser, &mut labels).unwrap();
    assert_eq!(first.num_reticulations(), 1);
    assert_eq!(second.num_reticulations(), 0);
    assert_eq!(labels.num_labels(), 3);
}

// --- TESTS ERRORS ---
#[test]
fn test_parsing_errors() {
    let mut labels = LeafLabelMap::new();

    let err = parse_network("((A,B),C)", &mut labels).unwrap_err();
    assert_eq!(*err.kind(), ParsingErrorType::UnexpectedEof);

    let err = parse_network("((A,B),C;", &mut labels).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidNewickString(_)));

    let err = parse_network("((A,B),C); D", &mut labels).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidNewickString(_)));

    let err = parse_network("((A:x,B),C);", &mut labels).unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorType::InvalidNewickString(_)));

    let err = parse_network("((A,(C)#H1),(B,(D)#H1));", &mut labels).unwrap_err();
    assert_eq!(*err.kind(), ParsingErrorType::DuplicateHybrid("H1".to_string()));

    let err = parse_network("((A,B)[unclosed,C);", &mut labels).unwrap_err();
    assert_eq!(*err.kind(), ParsingErrorType::UnclosedComment);
}

// --- TESTS WRITING ---
#[test]
fn test_write_round_trip() {
    for newick in [
        "((A,B),C);",
        "((A,B,C),(D,E));",
        "((A,(C)#H1),(B,#H1));",
        "(((A,#H2),(C,#H1)),((B)#H1,(D)#H2));",
        "('Night parrot',Kakapo);",
    ] {
        let mut labels = LeafLabelMap::new();
        let network = parse_network(newick, &mut labels).unwrap();
        let written = to_newick(&network, &labels);

        let mut reparsed_labels = LeafLabelMap::new();
        let reparsed = parse_network(&written, &mut reparsed_labels).unwrap();
        assert_eq!(reparsed.num_nodes(), network.num_nodes(), "{}", newick);
        assert_eq!(reparsed.num_reticulations(), network.num_reticulations(), "{}", newick);
        assert_eq!(to_newick(&reparsed, &reparsed_labels), written);
    }
}

#[test]
fn test_write_drops_branch_lengths() {
    let mut labels = LeafLabelMap::new();
    let tree = parse_network("((A:1.0,B:2.0):3.0,C:4.0):0.5;", &mut labels).unwrap();
    assert_eq!(to_newick(&tree, &labels), "((A,B),C);");
}
