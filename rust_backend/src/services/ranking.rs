//! Deterministic top-N ranking shared by the count metrics.

use std::collections::BTreeMap;

/// Count occurrences of each key.
pub fn count_by<K, I>(keys: I) -> BTreeMap<K, usize>
where
    K: Ord,
    I: IntoIterator<Item = K>,
{
    let mut counts = BTreeMap::new();
    for key in keys {
        *counts.entry(key).or_insert(0) += 1;
    }
    counts
}

/// Order `(key, count)` pairs by descending count, ties by ascending key.
pub fn rank_desc<K: Ord>(mut entries: Vec<(K, usize)>) -> Vec<(K, usize)> {
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries
}

/// Ranked and truncated to `n`.
///
/// ```
/// use tour_insights::services::ranking::top_n;
///
/// let ranked = top_n(vec![(3, 2), (1, 2), (2, 5)], 2);
/// assert_eq!(ranked, vec![(2, 5), (1, 2)]);
/// ```
pub fn top_n<K: Ord>(entries: Vec<(K, usize)>, n: usize) -> Vec<(K, usize)> {
    let mut ranked = rank_desc(entries);
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_count_by() {
        let counts = count_by(vec!["b", "a", "b"]);
        assert_eq!(counts.get("a"), Some(&1));
        assert_eq!(counts.get("b"), Some(&2));
    }

    #[test]
    fn test_ties_break_on_ascending_key() {
        let ranked = rank_desc(vec![(7, 3), (2, 3), (5, 1), (4, 3)]);
        assert_eq!(ranked, vec![(2, 3), (4, 3), (7, 3), (5, 1)]);
    }

    #[test]
    fn test_top_n_larger_than_input() {
        assert_eq!(top_n(vec![(1, 1)], 10), vec![(1, 1)]);
        assert!(top_n(Vec::<(i64, usize)>::new(), 3).is_empty());
    }

    proptest! {
        #[test]
        fn prop_ranking_ignores_input_order(
            entries in proptest::collection::btree_map(0i64..50, 0usize..20, 0..30)
        ) {
            let forward: Vec<(i64, usize)> = entries.clone().into_iter().collect();
            let mut backward = forward.clone();
            backward.reverse();

            prop_assert_eq!(top_n(forward, 10), top_n(backward, 10));
        }
    }
}
