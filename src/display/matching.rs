//! Bipartite matching between guest children and host subtrees.

/// Decides whether every left vertex can be matched to a distinct right vertex.
///
/// Uses augmenting paths (Kuhn's algorithm), which is fast for the small,
/// dense instances arising from node degrees.
///
/// # Arguments
/// * `left` - Number of left vertices
/// * `right` - Number of right vertices
/// * `adjacent` - Whether left vertex `i` may be matched to right vertex `j`
///
/// # Returns
/// `true` if a matching covering all left vertices exists
pub fn saturates_left(left: usize, right: usize, adjacent: impl Fn(usize, usize) -> bool) -> bool {
    if left > right {
        return false;
    }
    let adjacency: Vec<Vec<usize>> = (0..left)
        .map(|i| (0..right).filter(|&j| adjacent(i, j)).collect())
        .collect();
    if adjacency.iter().any(|a| a.is_empty()) {
        return false;
    }

    let mut matched_to: Vec<Option<usize>> = vec![None; right];
    let mut seen = vec![false; right];
    for i in 0..left {
        seen.fill(false);
        if !augment(i, &adjacency, &mut matched_to, &mut seen) {
            return false;
        }
    }
    true
}

fn augment(
    i: usize,
    adjacency: &[Vec<usize>],
    matched_to: &mut [Option<usize>],
    seen: &mut [bool],
) -> bool {
    for &j in &adjacency[i] {
        if seen[j] {
            continue;
        }
        seen[j] = true;
        let free = match matched_to[j] {
            None => true,
            Some(other) => augment(other, adjacency, matched_to, seen),
        };
        if free {
            matched_to[j] = Some(i);
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_needs_augmenting_path() {
        // 0 - {0, 1}, 1 - {0}: greedy 0->0 must be undone
        let edges = [[true, true], [true, false]];
        assert!(saturates_left(2, 2, |i, j| edges[i][j]));
    }

    #[test]
    fn test_hall_violation() {
        // Two left vertices compete for one right vertex
        let edges = [[true, false, false], [true, false, false], [true, true, true]];
        assert!(!saturates_left(3, 3, |i, j| edges[i][j]));
    }

    #[test]
    fn test_more_left_than_right() {
        assert!(!saturates_left(3, 2, |_, _| true));
        assert!(saturates_left(2, 3, |_, _| true));
    }
}
