//! Simple native controls.

use crate::color::Color;
use crate::impl_render;
use crate::nv_tree::NativeView;
use crate::store::keys;
use std::sync::Arc;

/// Font size used when none is set in the store.
pub const DEFAULT_FONT_SIZE: f64 = 13.;

/// A text label.
///
/// Reads its color and font size from the store. The store’s opacity is applied to the color.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub text: Arc<str>,
}

impl Text {
    pub fn new(text: impl Into<Arc<str>>) -> Text {
        Text { text: text.into() }
    }
}

impl_render! {
    Text;
    fn create_view(&self, context) {
        let store = context.store();
        NativeView::Text {
            text: Arc::clone(&self.text),
            color: store
                .color(keys::FOREGROUND_COLOR)
                .unwrap_or(Color::BLACK)
                .with_opacity(store.float(keys::OPACITY).unwrap_or(1.)),
            font_size: store.float(keys::FONT_SIZE).unwrap_or(DEFAULT_FONT_SIZE),
        }
    }
}

/// An on/off switch.
#[derive(Debug, Clone, PartialEq)]
pub struct Toggle {
    pub is_on: bool,
}

impl Toggle {
    pub fn new(is_on: bool) -> Toggle {
        Toggle { is_on }
    }
}

impl_render! {
    Toggle;
    fn create_view(&self, context) {
        let store = context.store();
        NativeView::Toggle {
            is_on: self.is_on,
            tint: store.color(keys::TINT_COLOR).unwrap_or(Color::rgb(0., 0.48, 1.)),
            enabled: !store.bool(keys::DISABLED).unwrap_or(false),
        }
    }
}
