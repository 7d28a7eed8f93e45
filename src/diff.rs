//! The tree diff engine.
//!
//! Compares the flat list from the previous render with the one from the current render and
//! emits indexed operations that turn the live native view list into the new one.
//!
//! This is not a general sequence diff. Both lists are walked in lockstep and each position is
//! resolved on its own, which relies on both renders having the same shape at each position.
//! Conditional content and keyed groups are what make shapes change, so they are kept as
//! structure in the flat lists (see [`flatten_preserving_optional_info`]) and handled here.
//!
//! The index passed along with an operation is a position in the live list at the time the
//! operation is applied, assuming that deleted views keep their position until the whole pass
//! has been applied. It advances by one with every operation, except for inserts into keyed
//! groups if dynamic indexing is turned off.
//!
//! [`flatten_preserving_optional_info`]: crate::flatten::flatten_preserving_optional_info

use crate::flatten::{FlatItem, FlatNode, KeyedItem};
use crate::patch::{CollectionDiffIndex, DiffOperation};
use core::mem;

/// Diffing options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    /// Whether inserts into keyed groups advance the index.
    ///
    /// Turn this off for targets that insert keyed content at a fixed anchor.
    pub dynamic_index: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            dynamic_index: true,
        }
    }
}

impl DiffOptions {
    pub fn with_dynamic_index(mut self, dynamic_index: bool) -> Self {
        self.dynamic_index = dynamic_index;
        self
    }
}

/// Diffs two flat lists, calling `emit(index, operation)` for each operation, in order.
///
/// Returns the index after the last operation.
pub fn diff(
    old: &[FlatItem],
    new: &[FlatItem],
    options: DiffOptions,
    emit: &mut dyn FnMut(usize, DiffOperation),
) -> usize {
    diff_from(old, new, 0, options, emit)
}

/// Like [`diff`], but starts counting at `start_index`.
pub fn diff_from(
    old: &[FlatItem],
    new: &[FlatItem],
    start_index: usize,
    options: DiffOptions,
    emit: &mut dyn FnMut(usize, DiffOperation),
) -> usize {
    let mut differ = TreeDiffer {
        index: start_index,
        options,
        in_keyed: false,
        emit,
    };
    differ.diff_lists(old, new);
    differ.index
}

struct TreeDiffer<'e> {
    index: usize,
    options: DiffOptions,
    /// Whether we’re inside a keyed group.
    in_keyed: bool,
    emit: &'e mut dyn FnMut(usize, DiffOperation),
}

impl<'e> TreeDiffer<'e> {
    fn diff_lists(&mut self, old: &[FlatItem], new: &[FlatItem]) {
        for i in 0..old.len().max(new.len()) {
            self.diff_item(old.get(i), new.get(i));
        }
    }

    fn diff_item(&mut self, old: Option<&FlatItem>, new: Option<&FlatItem>) {
        match (old, new) {
            (None, None) => (),

            (Some(FlatItem::Optional(old)), Some(FlatItem::Optional(new))) => {
                if old.branch == new.branch {
                    self.diff_lists(old.content(), new.content());
                } else {
                    // a different branch is different content; don’t try to match it up
                    self.diff_lists(old.content(), &[]);
                    self.diff_lists(&[], new.content());
                }
            }
            (Some(FlatItem::Optional(old)), new) => {
                self.diff_lists(old.content(), &[]);
                self.diff_item(None, new);
            }
            (old, Some(FlatItem::Optional(new))) => {
                self.diff_item(old, None);
                self.diff_lists(&[], new.content());
            }

            (Some(FlatItem::Keyed(old)), Some(FlatItem::Keyed(new))) => self.diff_keyed(old, new),
            (Some(FlatItem::Keyed(old)), new) => {
                self.keyed_scope(|this| {
                    for element in &old.elements {
                        this.diff_lists(element, &[]);
                    }
                });
                self.diff_item(None, new);
            }
            (old, Some(FlatItem::Keyed(new))) => {
                self.keyed_scope(|this| {
                    for element in &new.elements {
                        this.diff_lists(&[], element);
                    }
                });
                self.diff_item(old, None);
            }

            (Some(FlatItem::Leaf(old)), Some(FlatItem::Leaf(new))) => {
                if old.is_same_kind(new) {
                    self.update(new);
                } else {
                    self.delete(old);
                    self.insert(new);
                }
            }
            (Some(FlatItem::Leaf(old)), None) => self.delete(old),
            (None, Some(FlatItem::Leaf(new))) => self.insert(new),
        }
    }

    fn diff_keyed(&mut self, old: &KeyedItem, new: &KeyedItem) {
        let start_index = self.index;
        let dynamic_index = self.options.dynamic_index;

        self.keyed_scope(|this| {
            new.group.diff(
                &*old.group,
                start_index,
                dynamic_index,
                &mut |_index, position, _op| match position {
                    CollectionDiffIndex::Matched { old: o, current: c } => {
                        this.diff_lists(&old.elements[o], &new.elements[c])
                    }
                    CollectionDiffIndex::FromOldCollection(o) => {
                        this.diff_lists(&old.elements[o], &[])
                    }
                    CollectionDiffIndex::FromCurrentCollection(c) => {
                        this.diff_lists(&[], &new.elements[c])
                    }
                },
            );
        });
    }

    fn keyed_scope<F: FnOnce(&mut Self)>(&mut self, f: F) {
        let was_in_keyed = mem::replace(&mut self.in_keyed, true);
        f(self);
        self.in_keyed = was_in_keyed;
    }

    fn emit(&mut self, op: DiffOperation, advance: bool) {
        rtrace!(index = self.index, ?op, "diff operation");
        (self.emit)(self.index, op);
        if advance {
            self.index += 1;
        }
    }

    fn insert(&mut self, node: &FlatNode) {
        let advance = !self.in_keyed || self.options.dynamic_index;
        self.emit(DiffOperation::Insert(node.clone()), advance);
    }

    fn update(&mut self, node: &FlatNode) {
        self.emit(DiffOperation::Update(node.clone()), true);
    }

    fn delete(&mut self, node: &FlatNode) {
        self.emit(DiffOperation::Delete(node.clone()), true);
    }
}
