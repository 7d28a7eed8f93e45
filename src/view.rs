use crate::for_each::{Comparable, ForEach};
use crate::nv_tree::NativeView;
use crate::store::{StoreKey, StoreValue, ViewStore};
use core::any::Any;
use core::fmt;
use core::hash::Hash;
use std::sync::Arc;

/// Implements the `Render` trait for a given struct.
///
/// Syntax:
///
/// ```text
/// impl_render! {
///     StructName;
///     fn create_view(&self, context) {
///         ... -> NativeView
///     }
///     (put extra items like update_view() here, using normal rust syntax)
/// }
/// ```
#[macro_export]
macro_rules! impl_render {
    (
        $(#[$attr:meta])*
        $struct:ty;
        fn create_view(&$self:ident, $ctx:ident) $create:block
        $($extra:tt)*
    ) => {
        $(#[$attr])*
        impl $crate::Render for $struct {
            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn create_view(&$self, $ctx: &$crate::RenderContext<'_>) -> $crate::NativeView {
                $create
            }

            $($extra)*
        }
    };
}

/// Leaf views: declarative descriptions that can create and update a native view.
///
/// Implementors should be cheap to create, since a fresh set of them is built on every render.
/// Neither method may do any structural diffing; which views get created, updated or removed is
/// decided by the diff engine.
///
/// This trait should probably be implemented using the [`impl_render`] macro.
pub trait Render: Any + fmt::Debug + Send + Sync {
    /// Creates a native view description.
    fn create_view(&self, context: &RenderContext<'_>) -> NativeView;

    /// Updates an existing native view in place.
    ///
    /// Will recreate the description by default.
    fn update_view(&self, view: &mut NativeView, context: &RenderContext<'_>) {
        *view = self.create_view(context);
    }

    /// For downcasting.
    fn as_any(&self) -> &dyn Any;

    /// If this is a padding wrapper, the wrapped view.
    ///
    /// Two padding wrappers are considered the same kind of view if their contents are, no matter
    /// the padding.
    fn padded_content(&self) -> Option<&dyn Render> {
        None
    }

    /// Type name, for debugging.
    fn type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

/// The context passed to [`Render`] methods.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    store: &'a ViewStore,
}

impl<'a> RenderContext<'a> {
    pub fn new(store: &'a ViewStore) -> RenderContext<'a> {
        RenderContext { store }
    }

    /// The fully merged store of the view being rendered.
    pub fn store(&self) -> &'a ViewStore {
        self.store
    }
}

/// Which branch of a conditional produced an optional group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    If,
    Else,
    /// An `if` branch after flattening; the number identifies the conditional block.
    FlattenedIf(usize),
    /// An `else` branch after flattening; the number identifies the conditional block.
    FlattenedElse(usize),
}

impl Branch {
    /// Tags this branch with a conditional block id.
    pub fn flattened(self, id: usize) -> Branch {
        match self {
            Branch::If | Branch::FlattenedIf(_) => Branch::FlattenedIf(id),
            Branch::Else | Branch::FlattenedElse(_) => Branch::FlattenedElse(id),
        }
    }

    pub fn is_if(self) -> bool {
        match self {
            Branch::If | Branch::FlattenedIf(_) => true,
            Branch::Else | Branch::FlattenedElse(_) => false,
        }
    }
}

/// A declarative node.
///
/// Nodes are rebuilt from scratch on every render and only live until they have been diffed.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) store: ViewStore,
    pub(crate) kind: NodeKind,
}

/// The different kinds of nodes.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A renderable leaf.
    Leaf(Arc<dyn Render>),
    /// A transparent group whose children are spliced into the parent.
    Group(Vec<Node>),
    /// Conditional content; `None` if the condition was false.
    Optional(Branch, Option<Vec<Node>>),
    /// Identity-keyed content generated from a data collection.
    Keyed(Arc<dyn Comparable>),
}

impl Node {
    fn new(kind: NodeKind) -> Node {
        Node {
            store: ViewStore::new(),
            kind,
        }
    }

    pub fn leaf<R: Render>(view: R) -> Node {
        Node::new(NodeKind::Leaf(Arc::new(view)))
    }

    pub fn group(children: Vec<Node>) -> Node {
        Node::new(NodeKind::Group(children))
    }

    /// An optional group with explicit branch and content.
    pub fn optional(branch: Branch, content: Option<Vec<Node>>) -> Node {
        Node::new(NodeKind::Optional(branch, content))
    }

    /// `if condition { content }`.
    ///
    /// The content is only built if the condition holds.
    pub fn when<F>(condition: bool, content: F) -> Node
    where
        F: FnOnce() -> Vec<Node>,
    {
        Node::optional(Branch::If, if condition { Some(content()) } else { None })
    }

    /// `if condition { then } else { otherwise }`.
    pub fn either<F, G>(condition: bool, then: F, otherwise: G) -> Node
    where
        F: FnOnce() -> Vec<Node>,
        G: FnOnce() -> Vec<Node>,
    {
        if condition {
            Node::optional(Branch::If, Some(then()))
        } else {
            Node::optional(Branch::Else, Some(otherwise()))
        }
    }

    /// One view per element of `data`, identified by `identity`.
    pub fn for_each<T, K, I, F>(data: Vec<T>, identity: I, content: F) -> Node
    where
        T: Send + Sync + 'static,
        K: Hash + Eq + Send + Sync + 'static,
        I: Fn(&T) -> K + Send + Sync + 'static,
        F: Fn(&T) -> Node,
    {
        Node::keyed(ForEach::new(data, identity, content))
    }

    pub fn keyed<C: Comparable>(group: C) -> Node {
        Node::new(NodeKind::Keyed(Arc::new(group)))
    }

    /// Sets a value in this node’s own store.
    pub fn with(mut self, key: StoreKey, value: impl Into<StoreValue>) -> Node {
        self.store.set(key, value);
        self
    }

    pub fn store(&self) -> &ViewStore {
        &self.store
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }
}

/// Returns true if both views are of the same kind and can hence be updated in place.
///
/// Padding wrappers are compared by the type of their content.
pub fn is_same_kind(a: &dyn Render, b: &dyn Render) -> bool {
    match (a.padded_content(), b.padded_content()) {
        (Some(a), Some(b)) => a.as_any().type_id() == b.as_any().type_id(),
        _ => a.as_any().type_id() == b.as_any().type_id(),
    }
}
