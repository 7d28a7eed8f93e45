//! Declarative view reconciliation.
//!
//! # Conceptual overview
//! Roost keeps a list of native views in sync with a declarative description of what should be on
//! screen. The description is rebuilt from scratch every time something changes, and each render
//! pass turns the difference between the last description and the new one into a sequence of
//! indexed insert, update and delete operations on the live native view list.
//!
//! ## Nodes
//! A declarative description is a tree of [`Node`]s. Leaves are renderable views (see [`Render`])
//! that know how to create and update one native view. Groups are transparent and simply splice
//! their children into their parent. Conditional content (`if` and `if`/`else`) is kept as an
//! optional group that remembers which branch produced it, and collections are kept as keyed
//! groups that know how to identify their elements across renders.
//!
//! Nodes are very cheap to create and are thrown away after they have been diffed: all state that
//! survives between renders lives in the native views.
//!
//! ## Stores
//! Style and configuration values are propagated down the tree in [`ViewStore`]s. Each node can set
//! values in its own store, and a value set closer to a leaf wins over one set further up.
//! Leaves only ever see their fully merged store.
//!
//! ## Flattening and diffing
//! Before diffing, a tree is flattened into a list in which only conditional and keyed structure
//! remains (see [`flatten_preserving_optional_info`]). The tree diff engine walks the old and new
//! flat lists in lockstep and resolves every position on its own: matching branches are diffed
//! recursively, switched branches are replaced, keyed groups are diffed by element identity (see
//! [`diff_keyed`]) and leaves are updated if they are of the same kind and replaced otherwise.
//!
//! ## Native lists and backends
//! Operations are applied to a [`NativeList`], which keeps the backend in sync. Backends are
//! platform-specific UI frameworks that own the actual native views; they only need to be able to
//! create, update and destroy views and to set a view’s subviews (see [`Backend`]).
//!
//! Deleted views keep their position in the list until the whole pass has been applied, and the
//! operation indices emitted by the diff engine rely on this.
//!
//! ## Hosts
//! A [`Host`] connects root content to a backend and re-renders it whenever a render is requested,
//! either through a [`RenderHandle`] (which may be used from any thread) or by changing the
//! [`Environment`].

#[macro_use]
mod macros;

pub mod backend;
pub mod color;
mod controls;
mod diff;
pub mod flatten;
mod for_each;
mod host;
mod keyed;
mod layer;
mod nv_tree;
mod patch;
mod rect;
pub mod store;
#[macro_use]
mod view;
mod view_tree;


pub use backend::Backend;
pub use color::Color;
pub use controls::{Text, Toggle, DEFAULT_FONT_SIZE};
pub use diff::{diff, diff_from, DiffOptions};
pub use flatten::{
    flatten_preserving_optional_info, flatten_shallow, flatten_total, leaves, FlatItem, FlatNode,
    KeyedItem, OptionalItem, Structural,
};
pub use for_each::{Comparable, ForEach};
pub use host::{Environment, Host, RenderHandle};
pub use keyed::diff_keyed;
pub use layer::{Layer, Padding};
pub use nv_tree::{NativeList, NativeView, PatchError, ViewId};
pub use patch::{CollectionDiffIndex, DataDiffOperation, DiffOperation};
pub use rect::{EdgeInsets, Rect};
pub use store::{keys, StoreKey, StoreValue, ViewStore};
pub use view::{is_same_kind, Branch, Node, NodeKind, Render, RenderContext};
pub use view_tree::{RenderSummary, ViewTree};
