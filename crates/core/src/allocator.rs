//! Sequential identifier allocation for stores that do not generate keys.
//!
//! The scan starts at `count + 1` and probes upward until it finds an id that
//! is not taken. That is O(n) per insert in the worst case, which is fine for
//! the Northwind reference dataset and nothing larger. The SQL store leaves
//! key generation to the database and never calls this.

use std::collections::BTreeMap;

/// Find a free id by probing upward from `count + 1`.
///
/// `is_taken` answers whether an id is already used. The probe is bounded by
/// `i32::MAX`; `None` means the range is exhausted (or `count` itself does
/// not fit in an `i32`).
///
/// # Example
///
/// ```
/// use std::collections::BTreeSet;
/// use northwind_core::allocator::next_sequential_id;
///
/// let taken = BTreeSet::from([1, 2, 3, 5]);
/// let id = next_sequential_id(taken.len(), |id| taken.contains(&id));
/// assert_eq!(id, Some(6));
/// ```
pub fn next_sequential_id<F>(count: usize, mut is_taken: F) -> Option<i32>
where
    F: FnMut(i32) -> bool,
{
    let start = i32::try_from(count).ok()?.checked_add(1)?;
    (start..=i32::MAX).find(|&id| !is_taken(id))
}

/// Allocate the next id for a table keyed by an integer id newtype.
pub fn allocate<K, V>(table: &BTreeMap<K, V>) -> Option<K>
where
    K: Ord + From<i32>,
{
    next_sequential_id(table.len(), |id| table.contains_key(&K::from(id))).map(K::from)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::ProductId;

    fn allocate_from(ids: &[i32]) -> Option<i32> {
        let taken: BTreeSet<i32> = ids.iter().copied().collect();
        next_sequential_id(taken.len(), |id| taken.contains(&id))
    }

    #[test]
    fn test_empty_table_starts_at_one() {
        assert_eq!(allocate_from(&[]), Some(1));
    }

    #[test]
    fn test_dense_table_appends() {
        assert_eq!(allocate_from(&[1, 2, 3]), Some(4));
    }

    #[test]
    fn test_probe_skips_taken_floor() {
        // floor is 5, which is taken, so the scan moves on to 6
        assert_eq!(allocate_from(&[1, 2, 3, 5]), Some(6));
    }

    #[test]
    fn test_gap_below_floor_is_not_reused() {
        // 1 is free but below the floor of count + 1
        assert_eq!(allocate_from(&[2, 3, 4]), Some(5));
    }

    #[test]
    fn test_sparse_high_ids() {
        assert_eq!(allocate_from(&[10, 20]), Some(3));
        assert_eq!(allocate_from(&[3, 4, 100]), Some(5));
    }

    #[test]
    fn test_result_is_never_in_use() {
        let sets: [&[i32]; 4] = [&[1], &[2, 3], &[1, 2, 4, 5, 6], &[3, 4, 5, 6, 7]];
        for ids in sets {
            let id = allocate_from(ids).unwrap_or(0);
            assert!(id > 0);
            assert!(!ids.contains(&id), "allocated {id} from {ids:?}");
        }
    }

    #[test]
    fn test_exhausted_range_returns_none() {
        let floor = (i32::MAX - 3) as usize;
        assert_eq!(next_sequential_id(floor, |_| true), None);
    }

    #[test]
    fn test_count_beyond_i32_returns_none() {
        assert_eq!(next_sequential_id(usize::MAX, |_| false), None);
        assert_eq!(next_sequential_id(i32::MAX as usize, |_| false), None);
    }

    #[test]
    fn test_last_id_is_reachable() {
        let floor = (i32::MAX - 1) as usize;
        assert_eq!(next_sequential_id(floor, |_| false), Some(i32::MAX));
    }

    #[test]
    fn test_allocate_over_typed_table() {
        let mut table = BTreeMap::new();
        table.insert(ProductId::new(1), "Chai");
        table.insert(ProductId::new(2), "Chang");
        table.insert(ProductId::new(4), "Chef Anton's Cajun Seasoning");

        assert_eq!(allocate(&table), Some(ProductId::new(5)));
    }
}
