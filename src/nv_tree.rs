use crate::backend::Backend;
use crate::color::Color;
use crate::patch::DiffOperation;
use crate::rect::{EdgeInsets, Rect};
use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// A unique identifier for a native view.
///
/// (this is just a UUID)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(u32, u16, u16, [u8; 8]);

impl ViewId {
    pub(crate) fn new() -> ViewId {
        let uuid = Uuid::new_v4();
        let (a, b, c, d) = uuid.as_fields();
        ViewId(a, b, c, *d)
    }
}

/// Description of a native view, handed to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeView {
    Layer {
        bounds: Rect,
        background: Color,
        corner_radius: f64,
        opacity: f64,
    },
    Text {
        text: Arc<str>,
        color: Color,
        font_size: f64,
    },
    Toggle {
        is_on: bool,
        tint: Color,
        enabled: bool,
    },
    Padded {
        insets: EdgeInsets,
        content: Box<NativeView>,
    },
}

/// Errors that may occur when applying an operation.
pub enum PatchError<B: Backend> {
    /// There is no view at this index.
    NoSuchSlot(usize),
    /// The view at this index was deleted earlier in the same pass.
    SlotRemoved(usize),
    Backend(B::Error),
}

impl<B: Backend> fmt::Debug for PatchError<B>
where
    B::Error: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PatchError::NoSuchSlot(i) => f.debug_tuple("NoSuchSlot").field(i).finish(),
            PatchError::SlotRemoved(i) => f.debug_tuple("SlotRemoved").field(i).finish(),
            PatchError::Backend(err) => f.debug_tuple("Backend").field(err).finish(),
        }
    }
}

impl<B: Backend> fmt::Display for PatchError<B>
where
    B::Error: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PatchError::NoSuchSlot(i) => write!(f, "no native view at index {}", i),
            PatchError::SlotRemoved(i) => {
                write!(f, "native view at index {} was already removed", i)
            }
            PatchError::Backend(err) => write!(f, "backend error: {}", err),
        }
    }
}

impl<B: Backend> std::error::Error for PatchError<B> where B::Error: fmt::Debug + fmt::Display {}

struct NVTNode<R> {
    view: NativeView,
    backing_ref: R,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    id: ViewId,
    /// Deleted in the current pass; dropped on commit.
    removed: bool,
}

/// The live subview list of one native superview.
///
/// Operations are applied in order with the index they were emitted with. Deleted views keep
/// their slot until [`NativeList::commit`], which is what keeps the emitted indices valid
/// throughout a pass.
pub struct NativeList<B: Backend> {
    backend: B,
    superview: B::ViewRef,
    nodes: HashMap<ViewId, NVTNode<B::ViewRef>>,
    slots: Vec<Slot>,
    /// Number of subviews the backend currently has.
    committed_len: usize,
}

impl<B: Backend> NativeList<B> {
    /// Creates an empty list with a new superview.
    pub fn new(mut backend: B, superview: &NativeView) -> Result<NativeList<B>, PatchError<B>> {
        let superview = backend.new_view(superview).map_err(PatchError::Backend)?;
        Ok(NativeList {
            backend,
            superview,
            nodes: HashMap::new(),
            slots: Vec::new(),
            committed_len: 0,
        })
    }

    /// Applies one operation.
    pub fn apply(&mut self, index: usize, op: &DiffOperation) -> Result<(), PatchError<B>> {
        match op {
            DiffOperation::Insert(node) => {
                if index > self.slots.len() {
                    return Err(PatchError::NoSuchSlot(index));
                }
                let view = node.create_view();
                let backing_ref = self.backend.new_view(&view).map_err(PatchError::Backend)?;
                let id = ViewId::new();
                self.nodes.insert(id, NVTNode { view, backing_ref });
                self.slots.insert(index, Slot { id, removed: false });
            }
            DiffOperation::Update(node) => {
                let id = self.live_slot(index)?.id;
                let nv_node = match self.nodes.get_mut(&id) {
                    Some(nv_node) => nv_node,
                    None => return Err(PatchError::NoSuchSlot(index)),
                };
                node.update_view(&mut nv_node.view);
                self.backend
                    .update(&mut nv_node.backing_ref, &nv_node.view)
                    .map_err(PatchError::Backend)?;
            }
            DiffOperation::Delete(_) => {
                self.live_slot(index)?;
                self.slots[index].removed = true;
            }
        }
        Ok(())
    }

    fn live_slot(&self, index: usize) -> Result<Slot, PatchError<B>> {
        match self.slots.get(index) {
            Some(slot) if slot.removed => Err(PatchError::SlotRemoved(index)),
            Some(slot) => Ok(*slot),
            None => Err(PatchError::NoSuchSlot(index)),
        }
    }

    /// Drops removed views and sends the new subview order to the backend.
    pub fn commit(&mut self) -> Result<(), PatchError<B>> {
        let removed: Vec<ViewId> = self
            .slots
            .iter()
            .filter(|slot| slot.removed)
            .map(|slot| slot.id)
            .collect();
        self.slots.retain(|slot| !slot.removed);

        for id in removed {
            if let Some(node) = self.nodes.remove(&id) {
                self.backend
                    .remove_view(node.backing_ref)
                    .map_err(PatchError::Backend)?;
            }
        }

        let mut subviews = Vec::with_capacity(self.slots.len());
        for slot in &self.slots {
            match self.nodes.get(&slot.id) {
                Some(node) => subviews.push(&node.backing_ref),
                None => return Err(PatchError::NoSuchSlot(subviews.len())),
            }
        }
        self.backend
            .set_subviews(&mut self.superview, 0, self.committed_len, subviews)
            .map_err(PatchError::Backend)?;
        self.committed_len = self.slots.len();
        Ok(())
    }

    /// Removes and destroys every view, including ones inserted or removed in an unfinished pass.
    ///
    /// The list is empty afterwards even if the backend fails; the first error is returned.
    pub fn clear(&mut self) -> Result<(), PatchError<B>> {
        let committed_len = self.committed_len;
        self.slots.clear();
        self.committed_len = 0;

        let mut result = self
            .backend
            .set_subviews(&mut self.superview, 0, committed_len, Vec::new())
            .map_err(PatchError::Backend);
        for (_, node) in self.nodes.drain() {
            if let Err(err) = self.backend.remove_view(node.backing_ref) {
                if result.is_ok() {
                    result = Err(PatchError::Backend(err));
                }
            }
        }
        result
    }

    /// Number of slots, including ones removed in the current pass.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Native views in display order, skipping removed ones.
    pub fn views(&self) -> impl Iterator<Item = &NativeView> + '_ {
        self.slots
            .iter()
            .filter(|slot| !slot.removed)
            .filter_map(move |slot| self.nodes.get(&slot.id).map(|node| &node.view))
    }

    /// View ids in display order, skipping removed ones.
    pub fn ids(&self) -> impl Iterator<Item = ViewId> + '_ {
        self.slots.iter().filter(|slot| !slot.removed).map(|slot| slot.id)
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn superview(&self) -> &B::ViewRef {
        &self.superview
    }
}
