use crate::color::Color;
use crate::impl_render;
use crate::nv_tree::NativeView;
use crate::rect::{EdgeInsets, Rect};
use crate::store::keys;
use crate::view::{Render, RenderContext};
use std::sync::Arc;

/// A native view that contains graphical content.
///
/// Background, corner radius and opacity all come from the store. The bounds are the frame
/// shrunk by the store’s insets.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Layer;

impl_render! {
    Layer;
    fn create_view(&self, context) {
        let store = context.store();
        NativeView::Layer {
            bounds: store
                .frame(keys::FRAME)
                .unwrap_or_else(Rect::zero)
                .inset(store.insets(keys::INSETS).unwrap_or_default()),
            background: store.color(keys::BACKGROUND_COLOR).unwrap_or(Color::CLEAR),
            corner_radius: store.float(keys::CORNER_RADIUS).unwrap_or(0.),
            opacity: store.float(keys::OPACITY).unwrap_or(1.),
        }
    }
}

/// Wraps a view with padding.
///
/// For diffing, a padding wrapper is the same kind of view as another if the wrapped views are
/// (the insets don’t matter).
#[derive(Debug, Clone)]
pub struct Padding {
    pub insets: EdgeInsets,
    pub content: Arc<dyn Render>,
}

impl Padding {
    pub fn new<R: Render>(insets: EdgeInsets, content: R) -> Padding {
        Padding {
            insets,
            content: Arc::new(content),
        }
    }
}

impl_render! {
    Padding;
    fn create_view(&self, context) {
        NativeView::Padded {
            insets: self.insets,
            content: Box::new(self.content.create_view(context)),
        }
    }

    fn update_view(&self, view: &mut NativeView, context: &RenderContext<'_>) {
        match view {
            NativeView::Padded { insets, content } => {
                *insets = self.insets;
                self.content.update_view(content, context);
            }
            view => *view = self.create_view(context),
        }
    }

    fn padded_content(&self) -> Option<&dyn Render> {
        Some(&*self.content)
    }
}
