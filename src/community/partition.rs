//! Partition utilities.

use std::collections::HashMap;

/// Relabel communities to `0..k` in first-seen order.
///
/// The structure of the partition is unchanged: two nodes share a label in
/// the output iff they share one in the input.
pub fn renumber(partition: &[usize]) -> Vec<usize> {
    let mut map: HashMap<usize, usize> = HashMap::new();
    partition
        .iter()
        .map(|&label| {
            let next = map.len();
            *map.entry(label).or_insert(next)
        })
        .collect()
}

/// Number of distinct communities in `partition`.
pub fn community_count(partition: &[usize]) -> usize {
    let mut seen: Vec<usize> = partition.to_vec();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}
