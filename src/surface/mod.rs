//! The rendering-surface collaborator.
//!
//! Vignettes and the scheduler only ever touch a [`Surface`]: element lookup, creation and
//! removal, and attribute reads and writes. Timing primitives (delays, next-frame callbacks,
//! cancellation) live in [`crate::timeline`] and are driven by the host's frame clock.

pub(crate) mod memory;
pub(crate) mod snapshot;

use crate::foundation::core::{AttrValue, ElementId};
use crate::foundation::error::StrataResult;

/// Minimal retained-mode element tree with typed attributes.
pub trait Surface {
    /// Resolve a `#id` selector.
    fn select(&self, selector: &str) -> Option<ElementId>;

    /// Append a new `tag` element under `parent`.
    fn create(&mut self, parent: ElementId, tag: &str) -> StrataResult<ElementId>;

    /// Remove `id` and its whole subtree; unknown ids are ignored.
    fn remove(&mut self, id: ElementId);

    /// `true` while `id` is attached.
    fn contains(&self, id: ElementId) -> bool;

    /// Direct children of `id`, in insertion order.
    fn children(&self, id: ElementId) -> Vec<ElementId>;

    /// Current value of one attribute.
    fn attr(&self, id: ElementId, name: &str) -> Option<AttrValue>;

    /// All attributes of `id`, sorted by name.
    fn attrs(&self, id: ElementId) -> Vec<(String, AttrValue)>;

    /// Write one attribute; writes to unknown ids are ignored.
    fn set_attr(&mut self, id: ElementId, name: &str, value: AttrValue);

    /// Drop one attribute.
    fn remove_attr(&mut self, id: ElementId, name: &str);
}

/// Convenience writes shared by every vignette.
pub trait SurfaceExt: Surface {
    /// Create `tag` under `parent` and apply `attrs` in order.
    fn create_with(
        &mut self,
        parent: ElementId,
        tag: &str,
        attrs: &[(&str, AttrValue)],
    ) -> StrataResult<ElementId> {
        let id = self.create(parent, tag)?;
        for (name, value) in attrs {
            self.set_attr(id, name, value.clone());
        }
        Ok(id)
    }

    /// Set the `text` pseudo-attribute.
    fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        self.set_attr(id, "text", AttrValue::Text(text.into()));
    }

    /// Read the `text` pseudo-attribute.
    fn text(&self, id: ElementId) -> Option<String> {
        self.attr(id, "text")
            .and_then(|v| v.as_text().map(str::to_owned))
    }

    /// Read a numeric attribute.
    fn number(&self, id: ElementId, name: &str) -> Option<f64> {
        self.attr(id, name).and_then(|v| v.as_number())
    }
}

impl<S: Surface + ?Sized> SurfaceExt for S {}
