//! Diffing of identity-keyed collections.
//!
//! This is a single forward walk over both collections and does not try to find a minimal edit
//! script: reorderings that can’t be expressed by pairing elements up in order will produce extra
//! inserts and deletes.

use crate::patch::{CollectionDiffIndex, DataDiffOperation};
use core::hash::Hash;
use std::collections::HashSet;

/// Diffs two keyed collections.
///
/// - `identity`: projects an element to the key used to correlate elements across collections.
///   Keys must be unique within each collection; what happens with duplicates is unspecified.
/// - `base_index`: the index of the first element in the target list.
/// - `use_dynamic_index`: if false, inserts do not advance the index, for targets that insert at a
///   fixed anchor.
///
/// Calls `emit(index, position, operation)` for every operation, in order.
///
/// Applying the operations in order to a copy of `old` produces `new`, if deleted elements keep
/// their position until all operations have been applied (and dynamic indexing is used).
pub fn diff_keyed<'a, T, K, I, F>(
    old: &'a [T],
    new: &'a [T],
    identity: I,
    base_index: usize,
    use_dynamic_index: bool,
    mut emit: F,
) where
    K: Hash + Eq,
    I: Fn(&T) -> K,
    F: FnMut(usize, CollectionDiffIndex, DataDiffOperation<'a, T>),
{
    if old.is_empty() && new.is_empty() {
        return;
    }

    let old_ids: HashSet<K> = old.iter().map(&identity).collect();
    let new_ids: HashSet<K> = new.iter().map(&identity).collect();
    debug_assert_eq!(old_ids.len(), old.len(), "duplicate identity in old collection");
    debug_assert_eq!(new_ids.len(), new.len(), "duplicate identity in new collection");

    let mut old_index = 0;
    let mut new_index = 0;
    let mut index = base_index;

    loop {
        match (old.get(old_index), new.get(new_index)) {
            (Some(old_element), Some(new_element)) => {
                let old_id = identity(old_element);
                let new_id = identity(new_element);

                let is_reordering = new_ids.contains(&old_id) && old_ids.contains(&new_id);
                if old_id == new_id || is_reordering {
                    emit(
                        index,
                        CollectionDiffIndex::Matched {
                            old: old_index,
                            current: new_index,
                        },
                        DataDiffOperation::Update(new_element),
                    );
                    old_index += 1;
                    new_index += 1;
                    index += 1;
                } else if new_ids.contains(&old_id) && !old_ids.contains(&new_id) {
                    emit(
                        index,
                        CollectionDiffIndex::FromOldCollection(old_index),
                        DataDiffOperation::Delete(old_element),
                    );
                    old_index += 1;
                    index += 1;
                } else {
                    emit(
                        index,
                        CollectionDiffIndex::FromCurrentCollection(new_index),
                        DataDiffOperation::Insert(new_element),
                    );
                    new_index += 1;
                    if use_dynamic_index {
                        index += 1;
                    }
                }
            }
            (None, Some(new_element)) => {
                emit(
                    index,
                    CollectionDiffIndex::FromCurrentCollection(new_index),
                    DataDiffOperation::Insert(new_element),
                );
                new_index += 1;
                if use_dynamic_index {
                    index += 1;
                }
            }
            (Some(old_element), None) => {
                emit(
                    index,
                    CollectionDiffIndex::FromOldCollection(old_index),
                    DataDiffOperation::Delete(old_element),
                );
                old_index += 1;
                index += 1;
            }
            (None, None) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Row = (u32, &'static str);

    fn collect(
        old: &[Row],
        new: &[Row],
        dynamic: bool,
    ) -> Vec<(usize, CollectionDiffIndex, char, Row)> {
        let mut ops = Vec::new();
        diff_keyed(old, new, |(id, _)| *id, 0, dynamic, |index, position, op| {
            let tag = match op {
                DataDiffOperation::Insert(_) => 'i',
                DataDiffOperation::Update(_) => 'u',
                DataDiffOperation::Delete(_) => 'd',
            };
            ops.push((index, position, tag, *op.element()));
        });
        ops
    }

    #[test]
    fn empty_collections_emit_nothing() {
        assert!(collect(&[], &[], true).is_empty());
    }

    #[test]
    fn insert_then_delete_round_trip() {
        let a = [(1, "a")];
        let ops = collect(&[], &a, true);
        assert_eq!(ops, vec![(0, CollectionDiffIndex::FromCurrentCollection(0), 'i', (1, "a"))]);
        let ops = collect(&a, &[], true);
        assert_eq!(ops, vec![(0, CollectionDiffIndex::FromOldCollection(0), 'd', (1, "a"))]);
    }

    #[test]
    fn reordering_updates_in_place() {
        let old = [(1, "a"), (2, "b")];
        let new = [(2, "b'"), (1, "a")];
        let ops = collect(&old, &new, true);
        assert_eq!(
            ops,
            vec![
                (0, CollectionDiffIndex::Matched { old: 0, current: 0 }, 'u', (2, "b'")),
                (1, CollectionDiffIndex::Matched { old: 1, current: 1 }, 'u', (1, "a")),
            ]
        );
    }

    #[test]
    fn removed_element_with_new_successor() {
        // 1 is gone and 2 is already known, so 2 is inserted before 1 and 2 are dropped
        let old = [(1, "a"), (2, "b")];
        let new = [(2, "b")];
        let ops = collect(&old, &new, true);
        assert_eq!(
            ops,
            vec![
                (0, CollectionDiffIndex::FromCurrentCollection(0), 'i', (2, "b")),
                (1, CollectionDiffIndex::FromOldCollection(0), 'd', (1, "a")),
                (2, CollectionDiffIndex::FromOldCollection(1), 'd', (2, "b")),
            ]
        );
    }

    #[test]
    fn known_element_before_new_one_is_deleted() {
        let old = [(1, "a")];
        let new = [(2, "b"), (1, "a")];
        let ops = collect(&old, &new, true);
        assert_eq!(
            ops,
            vec![
                (0, CollectionDiffIndex::FromOldCollection(0), 'd', (1, "a")),
                (1, CollectionDiffIndex::FromCurrentCollection(0), 'i', (2, "b")),
                (2, CollectionDiffIndex::FromCurrentCollection(1), 'i', (1, "a")),
            ]
        );
    }

    #[test]
    fn static_index_does_not_advance_on_insert() {
        let old = [(1, "a")];
        let new = [(1, "a"), (2, "b"), (3, "c")];
        let indices: Vec<_> = collect(&old, &new, false).into_iter().map(|op| op.0).collect();
        assert_eq!(indices, vec![0, 1, 1]);
        let indices: Vec<_> = collect(&old, &new, true).into_iter().map(|op| op.0).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[test]
    fn base_index_offsets_all_operations() {
        let mut indices = Vec::new();
        diff_keyed(&[1, 2], &[2, 3], |x| *x, 10, true, |index, _, _| indices.push(index));
        // 1 vs 2: 2 is known, 1 is not in new -> insert 2; then 1 vs 3 -> insert 3; then deletes
        assert_eq!(indices, vec![10, 11, 12, 13]);
    }
}
