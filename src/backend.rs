//! Traits for backends.

use crate::nv_tree::NativeView;

/// A backend implementation.
///
/// Backends are platform-specific UI frameworks (like Cocoa) that own the actual native views.
pub trait Backend {
    /// A reference to a view in the backend.
    type ViewRef;

    /// Error type.
    type Error;

    /// Creates a new view.
    fn new_view(&mut self, view: &NativeView) -> Result<Self::ViewRef, Self::Error>;

    /// Updates the view.
    fn update(&mut self, view: &mut Self::ViewRef, native: &NativeView) -> Result<(), Self::Error>;

    /// Destroys a view that is no longer displayed.
    fn remove_view(&mut self, view: Self::ViewRef) -> Result<(), Self::Error>;

    /// Sets a region of the view’s subviews.
    fn set_subviews<'a>(
        &mut self,
        view: &mut Self::ViewRef,
        region_start: usize,
        region_len: usize,
        subviews: Vec<&'a Self::ViewRef>,
    ) -> Result<(), Self::Error>;
}
