//! Operations emitted by the diff engines.

use crate::flatten::FlatNode;

/// An operation on the live native view list.
///
/// Operations are always emitted together with the index they apply to, and must be applied in
/// emission order.
#[derive(Debug, Clone)]
pub enum DiffOperation {
    /// Creates a native view for the node and inserts it at the index.
    Insert(FlatNode),
    /// Updates the native view at the index from the node.
    Update(FlatNode),
    /// Removes the native view at the index, which was created from the node.
    Delete(FlatNode),
}

impl DiffOperation {
    pub fn node(&self) -> &FlatNode {
        match self {
            DiffOperation::Insert(node)
            | DiffOperation::Update(node)
            | DiffOperation::Delete(node) => node,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, DiffOperation::Insert(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, DiffOperation::Update(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, DiffOperation::Delete(_))
    }
}

/// An operation on a keyed data collection.
///
/// Inserts and updates carry the element from the new collection, deletes the one from the old
/// collection.
#[derive(Debug, PartialEq)]
pub enum DataDiffOperation<'a, T> {
    Insert(&'a T),
    Update(&'a T),
    Delete(&'a T),
}

// derive would require T: Clone
impl<'a, T> Clone for DataDiffOperation<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for DataDiffOperation<'a, T> {}

impl<'a, T> DataDiffOperation<'a, T> {
    pub fn element(&self) -> &'a T {
        match *self {
            DataDiffOperation::Insert(e)
            | DataDiffOperation::Update(e)
            | DataDiffOperation::Delete(e) => e,
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, DataDiffOperation::Insert(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, DataDiffOperation::Update(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, DataDiffOperation::Delete(_))
    }
}

/// Which collection the element of a [`DataDiffOperation`] was taken from, and where.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionDiffIndex {
    /// Position in the new collection; used for inserts.
    FromCurrentCollection(usize),
    /// Position in the old collection; used for deletes.
    FromOldCollection(usize),
    /// An old element updated to a new one; used for updates.
    Matched { old: usize, current: usize },
}

impl CollectionDiffIndex {
    /// Position in the old collection, if any.
    pub fn old(self) -> Option<usize> {
        match self {
            CollectionDiffIndex::FromOldCollection(i) => Some(i),
            CollectionDiffIndex::Matched { old, .. } => Some(old),
            CollectionDiffIndex::FromCurrentCollection(_) => None,
        }
    }

    /// Position in the new collection, if any.
    pub fn current(self) -> Option<usize> {
        match self {
            CollectionDiffIndex::FromCurrentCollection(i) => Some(i),
            CollectionDiffIndex::Matched { current, .. } => Some(current),
            CollectionDiffIndex::FromOldCollection(_) => None,
        }
    }
}
