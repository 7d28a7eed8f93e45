//! View stores: inherited style and configuration values.
//!
//! Every node carries a store with the values it sets itself. During flattening, a node’s store
//! is layered over the store inherited from its ancestors, so that a value set closer to a leaf
//! wins and anything left unset falls through to the defaults above it.

use crate::color::Color;
use crate::rect::{EdgeInsets, Rect};
use std::collections::BTreeMap;
use std::sync::Arc;

/// A key in a view store.
pub type StoreKey = &'static str;

/// Well-known keys used by the built-in views.
pub mod keys {
    use super::StoreKey;

    pub const FOREGROUND_COLOR: StoreKey = "foreground_color";
    pub const BACKGROUND_COLOR: StoreKey = "background_color";
    pub const TINT_COLOR: StoreKey = "tint_color";
    pub const FONT_SIZE: StoreKey = "font_size";
    pub const OPACITY: StoreKey = "opacity";
    pub const CORNER_RADIUS: StoreKey = "corner_radius";
    pub const FRAME: StoreKey = "frame";
    pub const INSETS: StoreKey = "insets";
    pub const DISABLED: StoreKey = "disabled";
}

/// A value in a view store.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(Arc<str>),
    Color(Color),
    Insets(EdgeInsets),
    Frame(Rect),
}

impl From<bool> for StoreValue {
    fn from(v: bool) -> Self {
        StoreValue::Bool(v)
    }
}

impl From<i64> for StoreValue {
    fn from(v: i64) -> Self {
        StoreValue::Int(v)
    }
}

impl From<f64> for StoreValue {
    fn from(v: f64) -> Self {
        StoreValue::Float(v)
    }
}

impl From<&str> for StoreValue {
    fn from(v: &str) -> Self {
        StoreValue::Text(v.into())
    }
}

impl From<Color> for StoreValue {
    fn from(v: Color) -> Self {
        StoreValue::Color(v)
    }
}

impl From<EdgeInsets> for StoreValue {
    fn from(v: EdgeInsets) -> Self {
        StoreValue::Insets(v)
    }
}

impl From<Rect> for StoreValue {
    fn from(v: Rect) -> Self {
        StoreValue::Frame(v)
    }
}

/// An immutable, cheaply cloneable map of store values.
///
/// Mutation is copy-on-write: clones share storage until one of them is changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewStore {
    values: Arc<BTreeMap<StoreKey, StoreValue>>,
}

impl ViewStore {
    pub fn new() -> ViewStore {
        ViewStore::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, key: StoreKey) -> Option<&StoreValue> {
        self.values.get(key)
    }

    /// Sets a value, returning the previous one.
    pub fn set(&mut self, key: StoreKey, value: impl Into<StoreValue>) -> Option<StoreValue> {
        Arc::make_mut(&mut self.values).insert(key, value.into())
    }

    pub fn remove(&mut self, key: StoreKey) -> Option<StoreValue> {
        if !self.values.contains_key(key) {
            return None;
        }
        Arc::make_mut(&mut self.values).remove(key)
    }

    /// Builder-style [`ViewStore::set`].
    pub fn with(mut self, key: StoreKey, value: impl Into<StoreValue>) -> ViewStore {
        self.set(key, value);
        self
    }

    /// Layers `own` over this (inherited) store.
    ///
    /// Values in `own` win; keys `own` does not set are inherited. Either side is returned
    /// without copying if the other one is empty.
    pub fn merged(&self, own: &ViewStore) -> ViewStore {
        if own.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return own.clone();
        }
        let mut values = BTreeMap::clone(&self.values);
        for (key, value) in own.values.iter() {
            values.insert(*key, value.clone());
        }
        ViewStore {
            values: Arc::new(values),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (StoreKey, &StoreValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    pub fn bool(&self, key: StoreKey) -> Option<bool> {
        match self.get(key) {
            Some(StoreValue::Bool(v)) => Some(*v),
            _ => None,
        }
    }

    /// Reads a float; integer values are widened.
    pub fn float(&self, key: StoreKey) -> Option<f64> {
        match self.get(key) {
            Some(StoreValue::Float(v)) => Some(*v),
            Some(StoreValue::Int(v)) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn text(&self, key: StoreKey) -> Option<&Arc<str>> {
        match self.get(key) {
            Some(StoreValue::Text(v)) => Some(v),
            _ => None,
        }
    }

    pub fn color(&self, key: StoreKey) -> Option<Color> {
        match self.get(key) {
            Some(StoreValue::Color(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn insets(&self, key: StoreKey) -> Option<EdgeInsets> {
        match self.get(key) {
            Some(StoreValue::Insets(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn frame(&self, key: StoreKey) -> Option<Rect> {
        match self.get(key) {
            Some(StoreValue::Frame(v)) => Some(*v),
            _ => None,
        }
    }
}
