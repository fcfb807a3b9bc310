#![forbid(unsafe_code)]

//! In-memory [`Document`] with explicit layout.
//!
//! Nothing is laid out automatically: tests and native hosts assign bounding
//! boxes with [`MemoryDocument::set_layout`]. Elements created at runtime can
//! be measured from their text through [`MemoryDocument::with_text_metrics`],
//! and, like a real engine, report a zero size until they are attached.

use std::collections::BTreeMap;

use crate::dom::{Document, NodeId};
use crate::geometry::{Rect, Size};

const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;

#[derive(Debug, Clone, Default)]
struct MemoryNode {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    styles: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    rect: Rect,
    size: Option<Size>,
}

/// Monospace text measurement used for elements without an explicit size.
#[derive(Debug, Clone, Copy, PartialEq)]
struct TextMetrics {
    char_width: f64,
    line_height: f64,
    padding: f64,
}

/// Deterministic element tree rooted at `<body>`.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<MemoryNode>,
    viewport_width: f64,
    metrics: Option<TextMetrics>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Empty document with a 1280px wide viewport.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![MemoryNode {
                tag: "body".to_owned(),
                ..MemoryNode::default()
            }],
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            metrics: None,
        }
    }

    /// Measure unsized elements as `chars * char_width + 2 * padding` by
    /// `line_height + 2 * padding`.
    #[must_use]
    pub fn with_text_metrics(mut self, char_width: f64, line_height: f64, padding: f64) -> Self {
        self.metrics = Some(TextMetrics {
            char_width,
            line_height,
            padding,
        });
        self
    }

    /// The `<body>` element.
    #[must_use]
    pub const fn body(&self) -> NodeId {
        NodeId::new(0)
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    /// Create an element and append it to `parent`.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let node = self.create_element(tag);
        self.attach(parent, node);
        node
    }

    /// Set an attribute (`id` and `class` are routed to their dedicated slots).
    pub fn set_attribute(&mut self, node: NodeId, name: &str, value: &str) {
        match name {
            "id" => self.set_id(node, value),
            "class" => self.set_class_name(node, value),
            _ => {
                if let Some(n) = self.node_mut(node) {
                    n.attributes.insert(name.to_owned(), value.to_owned());
                }
            }
        }
    }

    /// Assign a bounding box; the offset size follows the box.
    pub fn set_layout(&mut self, node: NodeId, rect: Rect) {
        if let Some(n) = self.node_mut(node) {
            n.rect = rect;
            n.size = Some(rect.size());
        }
    }

    /// Assign an offset size without touching the bounding box.
    pub fn set_offset_size(&mut self, node: NodeId, size: Size) {
        if let Some(n) = self.node_mut(node) {
            n.size = Some(size);
        }
    }

    #[must_use]
    pub fn tag(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.tag.as_str())
    }

    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.node(node).map(|n| n.text.as_str())
    }

    #[must_use]
    pub fn id(&self, node: NodeId) -> Option<&str> {
        self.node(node).and_then(|n| n.id.as_deref())
    }

    /// Space-joined class list.
    #[must_use]
    pub fn class_name(&self, node: NodeId) -> String {
        self.node(node)
            .map(|n| n.classes.join(" "))
            .unwrap_or_default()
    }

    /// Direct children in order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.node(node).map_or(&[], |n| n.children.as_slice())
    }

    /// Number of connected elements whose `id` equals `id`.
    #[must_use]
    pub fn count_with_id(&self, id: &str) -> usize {
        self.connected_in_order(self.body())
            .into_iter()
            .filter(|&n| self.id(n) == Some(id))
            .count()
    }

    fn node(&self, node: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(node.get() as usize)
    }

    fn node_mut(&mut self, node: NodeId) -> Option<&mut MemoryNode> {
        self.nodes.get_mut(node.get() as usize)
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.node_mut(node).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.node_mut(parent) {
            p.children.retain(|&c| c != node);
        }
    }

    fn attach(&mut self, parent: NodeId, node: NodeId) {
        if node == self.body() || self.node(parent).is_none() || self.node(node).is_none() {
            tracing::debug!(%parent, %node, "memory document: ignoring invalid attach");
            return;
        }
        self.detach(node);
        if let Some(n) = self.node_mut(node) {
            n.parent = Some(parent);
        }
        if let Some(p) = self.node_mut(parent) {
            p.children.push(node);
        }
    }

    /// Descendants of `root` (excluding `root`) in document order.
    fn connected_in_order(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(root).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    fn measured_size(&self, node: &MemoryNode) -> Size {
        if let Some(size) = node.size {
            return size;
        }
        match self.metrics {
            Some(m) => Size::new(
                node.text.chars().count() as f64 * m.char_width + 2.0 * m.padding,
                m.line_height + 2.0 * m.padding,
            ),
            None => Size::ZERO,
        }
    }
}

impl Document for MemoryDocument {
    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.connected_in_order(self.body())
            .into_iter()
            .find(|&n| self.id(n) == Some(id))
    }

    fn elements_by_class(&self, scope: Option<NodeId>, class: &str) -> Vec<NodeId> {
        let root = match scope {
            Some(scope) if self.is_connected(scope) => scope,
            Some(_) => return Vec::new(),
            None => self.body(),
        };
        self.connected_in_order(root)
            .into_iter()
            .filter(|&n| self.has_class(n, class))
            .collect()
    }

    fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        self.connected_in_order(self.body())
            .into_iter()
            .filter(|&n| self.attribute(n, name).is_some())
            .collect()
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        let n = self.node(node)?;
        match name {
            "id" => n.id.clone(),
            "class" => Some(n.classes.join(" ")),
            _ => n.attributes.get(name).cloned(),
        }
    }

    fn is_connected(&self, node: NodeId) -> bool {
        let mut current = node;
        loop {
            if current == self.body() {
                return true;
            }
            match self.node(current).and_then(|n| n.parent) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        let raw = u32::try_from(self.nodes.len()).unwrap_or(u32::MAX);
        self.nodes.push(MemoryNode {
            tag: tag.to_owned(),
            ..MemoryNode::default()
        });
        NodeId::new(raw)
    }

    fn set_id(&mut self, node: NodeId, id: &str) {
        if let Some(n) = self.node_mut(node) {
            n.id = Some(id.to_owned());
        }
    }

    fn set_class_name(&mut self, node: NodeId, class_name: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes = class_name.split_whitespace().map(str::to_owned).collect();
        }
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        let Some(n) = self.node_mut(node) else {
            return;
        };
        n.text = text.to_owned();
        let orphans = std::mem::take(&mut n.children);
        for child in orphans {
            if let Some(c) = self.node_mut(child) {
                c.parent = None;
            }
        }
    }

    fn append_to_body(&mut self, node: NodeId) {
        self.attach(self.body(), node);
    }

    fn remove(&mut self, node: NodeId) {
        if node != self.body() {
            self.detach(node);
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_owned());
            }
        }
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(n) = self.node_mut(node) {
            n.classes.retain(|c| c != class);
        }
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(n) = self.node_mut(node) {
            n.styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.node(node)?.styles.get(property).cloned()
    }

    fn bounding_rect(&self, node: NodeId) -> Rect {
        match self.node(node) {
            Some(n) if self.is_connected(node) => n.rect,
            _ => Rect::default(),
        }
    }

    fn offset_size(&self, node: NodeId) -> Size {
        match self.node(node) {
            Some(n) if self.is_connected(node) => self.measured_size(n),
            _ => Size::ZERO,
        }
    }

    fn viewport_width(&self) -> f64 {
        self.viewport_width
    }
}
