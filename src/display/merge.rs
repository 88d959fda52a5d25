//! Merging of sorted possibility lists.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Merges sorted lists into one sorted list without duplicates.
///
/// Up to `heap_threshold` lists are merged pairwise in linear passes; more
/// lists are merged with a heap in `O(n log k)`.
///
/// # Arguments
/// * `lists` - Lists, each sorted increasingly
/// * `heap_threshold` - Number of lists above which the heap merge is used
pub fn merge_sorted(lists: &[&[usize]], heap_threshold: usize) -> Vec<usize> {
    if lists.len() > heap_threshold {
        heap_merge(lists)
    } else {
        let mut merged: Vec<usize> = Vec::new();
        for list in lists {
            merged = merge_two(&merged, list);
        }
        merged
    }
}

fn merge_two(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut merged = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() || j < b.len() {
        let next = match (a.get(i), b.get(j)) {
            (Some(&x), Some(&y)) if x <= y => {
                i += 1;
                if x == y {
                    j += 1;
                }
                x
            }
            (_, Some(&y)) => {
                j += 1;
                y
            }
            (Some(&x), None) => {
                i += 1;
                x
            }
            (None, None) => break,
        };
        if merged.last() != Some(&next) {
            merged.push(next);
        }
    }
    merged
}

fn heap_merge(lists: &[&[usize]]) -> Vec<usize> {
    let total: usize = lists.iter().map(|l| l.len()).sum();
    let mut merged = Vec::with_capacity(total);
    let mut heap: BinaryHeap<Reverse<(usize, usize, usize)>> = lists
        .iter()
        .enumerate()
        .filter_map(|(k, l)| l.first().map(|&x| Reverse((x, k, 0))))
        .collect();

    while let Some(Reverse((x, k, i))) = heap.pop() {
        if merged.last() != Some(&x) {
            merged.push(x);
        }
        if let Some(&next) = lists[k].get(i + 1) {
            heap.push(Reverse((next, k, i + 1)));
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairwise_and_heap_agree() {
        let a: &[usize] = &[1, 4, 9];
        let b: &[usize] = &[2, 4, 10];
        let c: &[usize] = &[0, 9, 11, 12];
        let expected = vec![0, 1, 2, 4, 9, 10, 11, 12];
        assert_eq!(merge_sorted(&[a, b, c], 8), expected);
        assert_eq!(merge_sorted(&[a, b, c], 1), expected);
    }

    #[test]
    fn test_empty_lists() {
        let empty: &[usize] = &[];
        assert!(merge_sorted(&[empty, empty], 8).is_empty());
        assert_eq!(merge_sorted(&[empty, &[3, 5]], 0), vec![3, 5]);
    }
}
