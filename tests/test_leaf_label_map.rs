use treedisplay::model::LeafLabelMap;

#[test]
fn test_get_or_insert_is_stable() {
    let mut labels = LeafLabelMap::with_capacity(3);
    assert!(labels.is_empty());

    let kakapo = labels.get_or_insert("Kakapo");
    let kea = labels.get_or_insert("Kea");
    assert_eq!(labels.get_or_insert("Kakapo"), kakapo);
    assert_ne!(kakapo, kea);
    assert_eq!(labels.num_labels(), 2);

    assert_eq!(labels.get_index("Kea"), Some(kea));
    assert_eq!(labels.get_index("Kaka"), None);
    assert_eq!(labels.get_label(kakapo), Some("Kakapo"));
    assert_eq!(labels.get_label(42), None);
    assert_eq!(&labels[kea], "Kea");
    assert_eq!(labels.labels(), &["Kakapo".to_string(), "Kea".to_string()]);
}

#[test]
fn test_display_lists_labels() {
    let mut labels = LeafLabelMap::new();
    labels.get_or_insert("A");
    labels.get_or_insert("B");
    let shown = labels.to_string();
    assert!(shown.starts_with("LeafLabelMap (2 labels):"));
    assert!(shown.contains("[0] A"));
    assert!(shown.contains("[1] B"));
}
