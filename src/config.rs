//! Configuration of containment queries.

/// Default number of child lists up to which sorted merges are done pairwise
pub const DEFAULT_MERGE_HEAP_THRESHOLD: usize = 8;

/// Default cap on the number of nodes of an unzipped MUL-tree
pub const DEFAULT_MAX_UNZIP_NODES: usize = 1 << 20;

/// Configuration of a [Containment](crate::containment::Containment) query.
///
/// None of the settings changes the answer; they trade speed for memory or
/// switch reduction rules off for comparison.
///
/// # Example
/// ```
/// use treedisplay::ContainmentConfig;
///
/// let config = ContainmentConfig::default()
///     .with_cherry_rule(false)
///     .with_merge_heap_threshold(4);
/// assert!(!config.cherry_rule);
/// assert!(config.triangle_rule);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainmentConfig {
    /// Number of child lists above which the tree DP uses a heap merge
    pub merge_heap_threshold: usize,
    /// Maximum MUL-tree size; larger unzips are abandoned and the rule skipped
    pub max_unzip_nodes: usize,
    /// Whether the cherry rule runs
    pub cherry_rule: bool,
    /// Whether the visible component rule runs
    pub visible_component_rule: bool,
    /// Whether redundant triangle arcs are removed
    pub triangle_rule: bool,
    /// Whether chained reticulations are merged
    pub reticulation_merging: bool,
}

impl Default for ContainmentConfig {
    fn default() -> Self {
        Self {
            merge_heap_threshold: DEFAULT_MERGE_HEAP_THRESHOLD,
            max_unzip_nodes: DEFAULT_MAX_UNZIP_NODES,
            cherry_rule: true,
            visible_component_rule: true,
            triangle_rule: true,
            reticulation_merging: true,
        }
    }
}

impl ContainmentConfig {
    /// Sets the child-list count above which sorted merges use a heap.
    pub fn with_merge_heap_threshold(mut self, threshold: usize) -> Self {
        self.merge_heap_threshold = threshold;
        self
    }

    /// Sets the maximum number of MUL-tree nodes an unzip may produce.
    pub fn with_max_unzip_nodes(mut self, max_nodes: usize) -> Self {
        self.max_unzip_nodes = max_nodes;
        self
    }

    /// Enables or disables the cherry rule.
    pub fn with_cherry_rule(mut self, enabled: bool) -> Self {
        self.cherry_rule = enabled;
        self
    }

    /// Enables or disables the visible component rule.
    pub fn with_visible_component_rule(mut self, enabled: bool) -> Self {
        self.visible_component_rule = enabled;
        self
    }

    /// Enables or disables triangle reduction.
    pub fn with_triangle_rule(mut self, enabled: bool) -> Self {
        self.triangle_rule = enabled;
        self
    }

    /// Enables or disables merging of chained reticulations.
    pub fn with_reticulation_merging(mut self, enabled: bool) -> Self {
        self.reticulation_merging = enabled;
        self
    }

    /// Returns a configuration with all reduction rules switched off, so
    /// that every decision is made by branching and the tree DP.
    pub fn without_rules() -> Self {
        Self::default()
            .with_cherry_rule(false)
            .with_visible_component_rule(false)
            .with_triangle_rule(false)
            .with_reticulation_merging(false)
    }
}
