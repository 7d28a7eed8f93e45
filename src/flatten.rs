//! Flattening of declarative node trees.
//!
//! Groups are transparent and get spliced into their parent’s position. Each node’s own store is
//! layered over the store inherited from its ancestors before its children are visited or the
//! node itself is emitted, so every flattened leaf carries its fully merged store.

use crate::for_each::Comparable;
use crate::nv_tree::NativeView;
use crate::store::ViewStore;
use crate::view::{self, Branch, Node, NodeKind, Render, RenderContext};
use std::sync::Arc;

/// A renderable leaf with its fully merged store.
#[derive(Debug, Clone)]
pub struct FlatNode {
    pub view: Arc<dyn Render>,
    pub store: ViewStore,
}

impl FlatNode {
    pub fn new(view: Arc<dyn Render>, store: ViewStore) -> FlatNode {
        FlatNode { view, store }
    }

    pub fn create_view(&self) -> NativeView {
        self.view.create_view(&RenderContext::new(&self.store))
    }

    pub fn update_view(&self, view: &mut NativeView) {
        self.view.update_view(view, &RenderContext::new(&self.store))
    }

    /// Returns true if `other` can be updated into this node without replacing the native view.
    pub fn is_same_kind(&self, other: &FlatNode) -> bool {
        view::is_same_kind(&*self.view, &*other.view)
    }
}

/// An immediate structural child: the result of expanding groups only.
#[derive(Debug)]
pub enum Structural<'a> {
    Leaf(FlatNode),
    Optional {
        branch: Branch,
        content: Option<&'a [Node]>,
        store: ViewStore,
    },
    Keyed {
        group: &'a Arc<dyn Comparable>,
        store: ViewStore,
    },
}

/// An item in a diffable flat list.
///
/// Unlike [`FlatNode`]s, these keep track of which conditional branches and keyed groups their
/// leaves came from.
#[derive(Debug, Clone)]
pub enum FlatItem {
    Leaf(FlatNode),
    Optional(OptionalItem),
    Keyed(KeyedItem),
}

/// Flattened conditional content.
///
/// The branch is always one of the `Flattened` variants. Absent content is kept as a placeholder
/// so that positions line up across renders.
#[derive(Debug, Clone)]
pub struct OptionalItem {
    pub branch: Branch,
    pub content: Option<Vec<FlatItem>>,
}

impl OptionalItem {
    /// The content, or nothing.
    pub fn content(&self) -> &[FlatItem] {
        self.content.as_deref().unwrap_or(&[])
    }
}

/// A flattened keyed group.
#[derive(Debug, Clone)]
pub struct KeyedItem {
    pub group: Arc<dyn Comparable>,
    /// Flattened content of each element, in order.
    pub elements: Vec<Vec<FlatItem>>,
}

impl FlatItem {
    /// Number of native views this item currently stands for.
    pub fn leaf_count(&self) -> usize {
        match self {
            FlatItem::Leaf(_) => 1,
            FlatItem::Optional(item) => item.content().iter().map(FlatItem::leaf_count).sum(),
            FlatItem::Keyed(item) => item
                .elements
                .iter()
                .flat_map(|element| element.iter())
                .map(FlatItem::leaf_count)
                .sum(),
        }
    }
}

/// Expands groups in `nodes` and emits the immediate structural children.
///
/// Stops at optional and keyed groups.
pub fn flatten_shallow<'a>(
    nodes: &'a [Node],
    inherited: &ViewStore,
    emit: &mut dyn FnMut(Structural<'a>),
) {
    for node in nodes {
        let store = inherited.merged(&node.store);
        match &node.kind {
            NodeKind::Leaf(view) => emit(Structural::Leaf(FlatNode::new(Arc::clone(view), store))),
            NodeKind::Group(children) => flatten_shallow(children, &store, emit),
            NodeKind::Optional(branch, content) => emit(Structural::Optional {
                branch: *branch,
                content: content.as_deref(),
                store,
            }),
            NodeKind::Keyed(group) => emit(Structural::Keyed { group, store }),
        }
    }
}

/// Emits every renderable leaf in `nodes`, in order.
///
/// Expands groups, present optional content, and keyed groups.
pub fn flatten_total(nodes: &[Node], inherited: &ViewStore, emit: &mut dyn FnMut(FlatNode)) {
    flatten_shallow(nodes, inherited, &mut |item| match item {
        Structural::Leaf(node) => emit(node),
        Structural::Optional {
            content: Some(content),
            store,
            ..
        } => flatten_total(content, &store, emit),
        Structural::Optional { content: None, .. } => (),
        Structural::Keyed { group, store } => flatten_total(group.views(), &store, emit),
    });
}

/// Collects [`flatten_total`] into a vec.
pub fn leaves(nodes: &[Node], inherited: &ViewStore) -> Vec<FlatNode> {
    let mut leaves = Vec::new();
    flatten_total(nodes, inherited, &mut |node| leaves.push(node));
    leaves
}

/// Flattens `nodes` into a diffable list, keeping conditional and keyed structure.
///
/// Every optional group is tagged with the id of its conditional block: blocks are numbered
/// from 0 in traversal order within each list level, shared between `if` and `else` branches.
/// Groups share the numbering of the level they are spliced into; optional content starts a new
/// level.
///
/// `if` and `else` blocks use one counter, not one each, so `[when(..), either(false, ..)]` is
/// tagged `FlattenedIf(0), FlattenedElse(1)`. An id thus names a block, and a block that
/// switches branches keeps its id.
pub fn flatten_preserving_optional_info(nodes: &[Node], inherited: &ViewStore) -> Vec<FlatItem> {
    let mut items = Vec::new();
    let mut next_block = 0;

    flatten_shallow(nodes, inherited, &mut |item| {
        let item = match item {
            Structural::Leaf(node) => FlatItem::Leaf(node),
            Structural::Optional {
                branch,
                content,
                store,
            } => {
                let block = next_block;
                next_block += 1;
                FlatItem::Optional(OptionalItem {
                    branch: branch.flattened(block),
                    content: content
                        .map(|content| flatten_preserving_optional_info(content, &store)),
                })
            }
            Structural::Keyed { group, store } => FlatItem::Keyed(KeyedItem {
                group: Arc::clone(group),
                elements: group
                    .views()
                    .iter()
                    .map(|view| {
                        flatten_preserving_optional_info(core::slice::from_ref(view), &store)
                    })
                    .collect(),
            }),
        };
        items.push(item);
    });

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::controls::{Text, Toggle};
    use crate::store::keys;

    fn text(s: &'static str) -> Node {
        Node::leaf(Text::new(s))
    }

    fn sample_tree(flag: bool, items: Vec<u32>) -> Vec<Node> {
        vec![
            text("title"),
            Node::group(vec![
                text("a"),
                Node::group(vec![]),
                Node::when(flag, || vec![text("b"), Node::leaf(Toggle::new(true))]),
            ]),
            Node::for_each(items, |i| *i, |_| Node::group(vec![text("row"), text("detail")])),
            Node::either(flag, || vec![text("yes")], || vec![]),
        ]
    }

    #[test]
    fn leaf_count_matches_reachable_leaves() {
        let store = ViewStore::new();
        assert_eq!(leaves(&sample_tree(true, vec![1, 2, 3]), &store).len(), 1 + 1 + 2 + 6 + 1);
        assert_eq!(leaves(&sample_tree(false, vec![]), &store).len(), 2);

        let items = flatten_preserving_optional_info(&sample_tree(true, vec![1, 2]), &store);
        let count: usize = items.iter().map(FlatItem::leaf_count).sum();
        assert_eq!(count, leaves(&sample_tree(true, vec![1, 2]), &store).len());
    }

    #[test]
    fn shallow_stops_at_optional_and_keyed() {
        let nodes = sample_tree(false, vec![1]);
        let mut kinds = Vec::new();
        flatten_shallow(&nodes, &ViewStore::new(), &mut |item| {
            kinds.push(match item {
                Structural::Leaf(_) => "leaf",
                Structural::Optional { content: None, .. } => "absent",
                Structural::Optional { .. } => "optional",
                Structural::Keyed { .. } => "keyed",
            })
        });
        assert_eq!(kinds, vec!["leaf", "leaf", "absent", "keyed", "optional"]);
    }

    #[test]
    fn stores_are_merged_down() {
        let nodes = vec![Node::group(vec![
            text("inherits"),
            text("overrides").with(keys::FOREGROUND_COLOR, Color::WHITE),
            Node::when(true, || vec![text("nested")]).with(keys::FONT_SIZE, 20.),
        ])
        .with(keys::FOREGROUND_COLOR, Color::rgb(1., 0., 0.))];

        let root = ViewStore::new()
            .with(keys::FONT_SIZE, 10.)
            .with(keys::FOREGROUND_COLOR, Color::BLACK);
        let leaves = leaves(&nodes, &root);

        assert_eq!(leaves[0].store.color(keys::FOREGROUND_COLOR), Some(Color::rgb(1., 0., 0.)));
        assert_eq!(leaves[0].store.float(keys::FONT_SIZE), Some(10.));
        assert_eq!(leaves[1].store.color(keys::FOREGROUND_COLOR), Some(Color::WHITE));
        assert_eq!(leaves[2].store.color(keys::FOREGROUND_COLOR), Some(Color::rgb(1., 0., 0.)));
        assert_eq!(leaves[2].store.float(keys::FONT_SIZE), Some(20.));
    }

    #[test]
    fn conditional_blocks_are_numbered_per_level() {
        let nodes = vec![
            Node::when(false, || vec![text("x")]),
            Node::group(vec![Node::either(false, || vec![text("y")], || {
                vec![Node::when(true, || vec![text("z")]), Node::when(true, || vec![])]
            })]),
            Node::when(true, || vec![text("w")]),
        ];
        let items = flatten_preserving_optional_info(&nodes, &ViewStore::new());
        let branches: Vec<_> = items
            .iter()
            .map(|item| match item {
                FlatItem::Optional(item) => item.branch,
                item => panic!("expected optional, got {:?}", item),
            })
            .collect();
        assert_eq!(
            branches,
            vec![Branch::FlattenedIf(0), Branch::FlattenedElse(1), Branch::FlattenedIf(2)]
        );

        // the absent block still takes up a position
        match &items[0] {
            FlatItem::Optional(item) => assert!(item.content.is_none()),
            _ => unreachable!(),
        }

        // nested blocks start again at 0
        match &items[1] {
            FlatItem::Optional(item) => {
                let nested: Vec<_> = item
                    .content()
                    .iter()
                    .map(|item| match item {
                        FlatItem::Optional(item) => item.branch,
                        _ => panic!("expected optional"),
                    })
                    .collect();
                assert_eq!(nested, vec![Branch::FlattenedIf(0), Branch::FlattenedIf(1)]);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn keyed_elements_inherit_group_store() {
        let nodes = vec![Node::for_each(vec![1_u8, 2], |i| *i, |_| text("row"))
            .with(keys::FONT_SIZE, 30.)];
        let items = flatten_preserving_optional_info(&nodes, &ViewStore::new());
        match &items[0] {
            FlatItem::Keyed(item) => {
                assert_eq!(item.elements.len(), 2);
                for element in &item.elements {
                    match &element[..] {
                        [FlatItem::Leaf(leaf)] => {
                            assert_eq!(leaf.store.float(keys::FONT_SIZE), Some(30.))
                        }
                        other => panic!("unexpected element content {:?}", other),
                    }
                }
            }
            item => panic!("expected keyed group, got {:?}", item),
        }
    }
}
