//! Leaf label module for phylogenetic network representation.
//!
//! - [LeafLabelMap]: Joined storage and lookup for leaf labels shared by a
//!   host network and a guest tree.

use rustc_hash::FxHashMap;
use std::fmt;

/// Index of a leaf label in a [LeafLabelMap].
pub type LabelIndex = usize;

// =#========================================================================#=
// LEAF LABEL MAP
// =#========================================================================#=
/// Maps leaf labels (strings) to compact indices.
///
/// Host network and guest tree of a containment query must be built against
/// the same map, so that equal taxa get equal [LabelIndex] values.
/// Labels are deduplicated automatically - inserting the same label twice
/// returns the same index.
///
/// # Example
/// ```
/// use treedisplay::model::LeafLabelMap;
///
/// let mut labels = LeafLabelMap::new();
///
/// let idx_a = labels.get_or_insert("A");  // idx_a = 0
/// let idx_b = labels.get_or_insert("B");  // idx_b = 1
/// let idx_a2 = labels.get_or_insert("A"); // idx_a2 = 0 (deduplicated)
///
/// assert_eq!(idx_a, idx_a2);
/// assert_ne!(idx_a, idx_b);
/// assert_eq!(labels.get_label(idx_a), Some("A"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LeafLabelMap {
    /// List of unique labels
    labels: Vec<String>,
    /// Map from label to its index
    map: FxHashMap<String, LabelIndex>,
}

impl LeafLabelMap {
    /// Creates a new, empty [LeafLabelMap].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [LeafLabelMap] with pre-allocated capacity.
    ///
    /// # Arguments
    /// * `capacity` - Expected number of unique leaf labels
    pub fn with_capacity(capacity: usize) -> Self {
        LeafLabelMap {
            labels: Vec::with_capacity(capacity),
            map: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Gets the index for a label, inserting it if it doesn't exist.
    ///
    /// # Arguments
    /// * `label` - The label string to look up or insert
    ///
    /// # Returns
    /// The index associated with this label
    pub fn get_or_insert(&mut self, label: &str) -> LabelIndex {
        if let Some(&index) = self.map.get(label) {
            return index;
        }
        let index = self.labels.len();
        self.labels.push(label.to_string());
        self.map.insert(label.to_string(), index);
        index
    }

    /// Retrieves the index for a given label, or `None` if unknown.
    pub fn get_index(&self, label: &str) -> Option<LabelIndex> {
        self.map.get(label).copied()
    }

    /// Retrieves the leaf label for a given index, or `None` if out of range.
    pub fn get_label(&self, index: LabelIndex) -> Option<&str> {
        self.labels.get(index).map(|s| s.as_str())
    }

    /// Checks if a label exists in the map.
    pub fn contains_label(&self, label: &str) -> bool {
        self.map.contains_key(label)
    }

    /// Returns the number of labels currently stored.
    pub fn num_labels(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether no label has been stored yet.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns the labels in index order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl fmt::Display for LeafLabelMap {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "LeafLabelMap ({} labels):", self.labels.len())?;
        for (idx, label) in self.labels.iter().enumerate() {
            writeln!(f, "  [{}] {}", idx, label)?;
        }
        Ok(())
    }
}

impl std::ops::Index<LabelIndex> for LeafLabelMap {
    type Output = str;

    fn index(&self, index: LabelIndex) -> &Self::Output {
        &self.labels[index]
    }
}
