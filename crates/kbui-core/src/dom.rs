#![forbid(unsafe_code)]

//! The document seam.
//!
//! [`Document`] is deliberately small: lookups by id, class and attribute,
//! class-list and inline-style mutation, element creation and removal, and
//! layout reads. Every operation on a handle that no longer resolves is a
//! silent no-op, which is what lets deferred tasks run against elements that
//! have since left the tree.

use core::fmt;

use crate::geometry::{Rect, Size};

/// Opaque handle to an element owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Wrap a raw handle value.
    #[inline]
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Raw handle value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Element-tree operations required by the presentation controllers.
pub trait Document {
    /// Find a connected element by its `id`.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;

    /// Connected elements carrying `class`, in document order.
    ///
    /// With `scope`, only descendants of that element are returned.
    fn elements_by_class(&self, scope: Option<NodeId>, class: &str) -> Vec<NodeId>;

    /// Connected elements that carry the attribute `name`, in document order.
    fn elements_with_attribute(&self, name: &str) -> Vec<NodeId>;

    /// Read an attribute value.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Whether the element is still part of the document.
    fn is_connected(&self, node: NodeId) -> bool;

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> NodeId;

    /// Set the element `id`.
    fn set_id(&mut self, node: NodeId, id: &str);

    /// Replace the whole class list with a space-separated `class_name`.
    fn set_class_name(&mut self, node: NodeId, class_name: &str);

    /// Replace the element's text content.
    fn set_text(&mut self, node: NodeId, text: &str);

    /// Append the element as the last child of `<body>`.
    fn append_to_body(&mut self, node: NodeId);

    /// Detach the element (and its subtree) from the document.
    fn remove(&mut self, node: NodeId);

    /// Whether the element's class list contains `class`.
    fn has_class(&self, node: NodeId, class: &str) -> bool;

    /// Add `class` to the class list.
    fn add_class(&mut self, node: NodeId, class: &str);

    /// Remove `class` from the class list.
    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Flip `class`; returns whether it is present afterwards.
    fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    /// Set one inline style property.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);

    /// Read one inline style property.
    fn style(&self, node: NodeId, property: &str) -> Option<String>;

    /// Border box relative to the viewport.
    fn bounding_rect(&self, node: NodeId) -> Rect;

    /// Laid-out size. Zero for detached elements.
    fn offset_size(&self, node: NodeId) -> Size;

    /// Current viewport width in logical pixels.
    fn viewport_width(&self) -> f64;
}
