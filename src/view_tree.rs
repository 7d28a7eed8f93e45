use crate::backend::Backend;
use crate::color::Color;
use crate::diff::{diff, DiffOptions};
use crate::flatten::{flatten_preserving_optional_info, FlatItem};
use crate::nv_tree::{NativeList, NativeView, PatchError};
use crate::patch::DiffOperation;
use crate::rect::Rect;
use crate::store::ViewStore;
use crate::view::Node;

/// What a render pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
    pub inserted: usize,
    pub updated: usize,
    pub deleted: usize,
}

impl RenderSummary {
    fn count(&mut self, op: &DiffOperation) {
        match op {
            DiffOperation::Insert(_) => self.inserted += 1,
            DiffOperation::Update(_) => self.updated += 1,
            DiffOperation::Delete(_) => self.deleted += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.inserted + self.updated + self.deleted
    }
}

/// A container view; renders declarative content into a live native subview list.
///
/// Keeps the flat list from the last render so the next render can be diffed against it.
///
/// Always diffs with dynamic indexing, since a [`NativeList`] inserts at the given position.
pub struct ViewTree<B: Backend> {
    list: NativeList<B>,
    previous: Vec<FlatItem>,
}

impl<B: Backend> ViewTree<B> {
    /// Creates an empty tree; the container itself is a plain layer.
    pub fn new(backend: B) -> Result<ViewTree<B>, PatchError<B>> {
        let container = NativeView::Layer {
            bounds: Rect::zero(),
            background: Color::CLEAR,
            corner_radius: 0.,
            opacity: 1.,
        };
        Ok(ViewTree {
            list: NativeList::new(backend, &container)?,
            previous: Vec::new(),
        })
    }

    /// Renders new content.
    ///
    /// - `content`: the freshly built declarative nodes
    /// - `store`: the store inherited by the content
    ///
    /// # Errors
    /// If the backend fails, all native views are removed and the previous flat list is
    /// forgotten, so the next render starts over from an empty container.
    pub fn render(
        &mut self,
        content: &[Node],
        store: &ViewStore,
    ) -> Result<RenderSummary, PatchError<B>> {
        let next = flatten_preserving_optional_info(content, store);

        let mut operations = Vec::new();
        diff(&self.previous, &next, DiffOptions::default(), &mut |index, op| {
            operations.push((index, op))
        });

        let summary = match self.patch(&operations) {
            Ok(summary) => summary,
            Err(err) => {
                rwarn!(operations = operations.len(), "backend failed during render pass");
                self.previous.clear();
                if self.list.clear().is_err() {
                    rwarn!("backend failed while removing native views");
                }
                return Err(err);
            }
        };

        rdebug!(
            inserted = summary.inserted,
            updated = summary.updated,
            deleted = summary.deleted,
            views = self.list.len(),
            "render pass"
        );

        self.previous = next;
        Ok(summary)
    }

    fn patch(
        &mut self,
        operations: &[(usize, DiffOperation)],
    ) -> Result<RenderSummary, PatchError<B>> {
        let mut summary = RenderSummary::default();
        for (index, op) in operations {
            self.list.apply(*index, op)?;
            summary.count(op);
        }
        self.list.commit()?;
        Ok(summary)
    }

    /// The flat list from the last render.
    pub fn previous(&self) -> &[FlatItem] {
        &self.previous
    }

    pub fn native(&self) -> &NativeList<B> {
        &self.list
    }
}
