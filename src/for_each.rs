//! Identity-keyed groups of views.

use crate::keyed::diff_keyed;
use crate::patch::{CollectionDiffIndex, DataDiffOperation};
use crate::view::Node;
use core::any::Any;
use core::fmt;
use core::hash::Hash;
use std::sync::Arc;

/// A dynamically sized group of views, one per element of a keyed data collection.
pub trait Comparable: Any + fmt::Debug + Send + Sync {
    /// For downcasting.
    fn as_any(&self) -> &dyn Any;

    /// The materialized views, one per element, in order.
    fn views(&self) -> &[Node];

    /// Diffs `old` against this group.
    ///
    /// Emits `(index, position, operation)` where `position` refers to indices in
    /// [`Comparable::views`] of `old` and `self`, and each operation carries the element’s view.
    fn diff(
        &self,
        old: &dyn Comparable,
        start_index: usize,
        dynamic_index: bool,
        emit: &mut dyn FnMut(usize, CollectionDiffIndex, DataDiffOperation<'_, Node>),
    );
}

/// Views generated from a data collection.
///
/// Elements are identified across renders by the key returned from the identity function. Keys
/// should be unique within one collection.
pub struct ForEach<T, K> {
    data: Vec<T>,
    identity: Arc<dyn Fn(&T) -> K + Send + Sync>,
    views: Vec<Node>,
}

impl<T, K> ForEach<T, K>
where
    T: Send + Sync + 'static,
    K: Hash + Eq + Send + Sync + 'static,
{
    /// Creates a new group; `content` is called once per element, immediately.
    pub fn new<I, F>(data: Vec<T>, identity: I, content: F) -> ForEach<T, K>
    where
        I: Fn(&T) -> K + Send + Sync + 'static,
        F: Fn(&T) -> Node,
    {
        let views = data.iter().map(content).collect();
        ForEach {
            data,
            identity: Arc::new(identity),
            views,
        }
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }
}

impl<T, K> fmt::Debug for ForEach<T, K> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ForEach")
            .field("len", &self.data.len())
            .field("views", &self.views)
            .finish()
    }
}

impl<T, K> Comparable for ForEach<T, K>
where
    T: Send + Sync + 'static,
    K: Hash + Eq + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn views(&self) -> &[Node] {
        &self.views
    }

    fn diff(
        &self,
        old: &dyn Comparable,
        start_index: usize,
        dynamic_index: bool,
        emit: &mut dyn FnMut(usize, CollectionDiffIndex, DataDiffOperation<'_, Node>),
    ) {
        let old_views = old.views();

        if let Some(old) = old.as_any().downcast_ref::<Self>() {
            let identity = &*self.identity;
            diff_keyed(
                &old.data,
                &self.data,
                |element| identity(element),
                start_index,
                dynamic_index,
                |index, position, _| {
                    // the position says which view goes with the element
                    let op = match position {
                        CollectionDiffIndex::FromCurrentCollection(i) => {
                            DataDiffOperation::Insert(&self.views[i])
                        }
                        CollectionDiffIndex::FromOldCollection(i) => {
                            DataDiffOperation::Delete(&old_views[i])
                        }
                        CollectionDiffIndex::Matched { current, .. } => {
                            DataDiffOperation::Update(&self.views[current])
                        }
                    };
                    emit(index, position, op);
                },
            );
            return;
        }

        // element types differ, so identities can’t be compared
        rwarn!(
            old = old.views().len(),
            new = self.views.len(),
            "replacing keyed group of a different element type"
        );
        let mut index = start_index;
        for (i, view) in old_views.iter().enumerate() {
            emit(
                index,
                CollectionDiffIndex::FromOldCollection(i),
                DataDiffOperation::Delete(view),
            );
            index += 1;
        }
        for (i, view) in self.views.iter().enumerate() {
            emit(
                index,
                CollectionDiffIndex::FromCurrentCollection(i),
                DataDiffOperation::Insert(view),
            );
            if dynamic_index {
                index += 1;
            }
        }
    }
}
