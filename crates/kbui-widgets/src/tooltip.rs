#![forbid(unsafe_code)]

//! Hover tooltips.
//!
//! One floating element at a time, owned by an explicit slot in
//! [`TooltipController`]. Showing while a tooltip is live hides the old one
//! first, and any hover-leave on a tooltip-enabled element hides whatever is
//! live, regardless of which anchor it belongs to.
//!
//! # Placement
//!
//! ```text
//!          +---------+
//!          | tooltip |
//!          +---------+
//!              gap
//!     +--------------------+
//!     |       anchor       |
//!     +--------------------+
//! ```
//!
//! The tooltip is horizontally centered on the anchor and sits `gap` pixels
//! above its top edge. It is measured after insertion, since detached
//! elements have no layout.

use kbui_core::{Binding, Document, DomEventKind, NodeId, Position, Rect, Size, css_px};
use kbui_runtime::AdapterConfig;

/// Compute the tooltip's `top` / `left` for an anchor box and the tooltip's
/// measured size.
#[must_use]
pub fn tooltip_position(anchor: Rect, tooltip: Size, gap: f64) -> Position {
    Position {
        top: anchor.top() - tooltip.height - gap,
        left: anchor.left() + anchor.width / 2.0 - tooltip.width / 2.0,
    }
}

/// Contents of the active-tooltip slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooltipState {
    #[default]
    Hidden,
    Shown {
        /// Element the tooltip describes.
        anchor: NodeId,
        /// The floating tooltip element.
        node: NodeId,
    },
}

impl TooltipState {
    #[must_use]
    pub const fn is_shown(self) -> bool {
        matches!(self, Self::Shown { .. })
    }
}

/// Single-slot tooltip manager.
#[derive(Debug, Clone)]
pub struct TooltipController {
    attribute: String,
    tooltip_id: String,
    tooltip_class: String,
    gap: f64,
    anchors: Vec<NodeId>,
    state: TooltipState,
}

impl TooltipController {
    #[must_use]
    pub fn new(config: &AdapterConfig) -> Self {
        Self {
            attribute: config.tooltip_attribute.clone(),
            tooltip_id: config.tooltip_id.clone(),
            tooltip_class: config.tooltip_class.clone(),
            gap: config.tooltip_gap_px,
            anchors: Vec::new(),
            state: TooltipState::Hidden,
        }
    }

    /// Bind hover-enter and hover-leave on every tooltip-enabled element.
    pub fn initialize<D: Document + ?Sized>(&mut self, doc: &D) -> Vec<Binding> {
        self.anchors = doc.elements_with_attribute(&self.attribute);
        self.anchors
            .iter()
            .flat_map(|&node| {
                [
                    Binding::new(node, DomEventKind::MouseEnter),
                    Binding::new(node, DomEventKind::MouseLeave),
                ]
            })
            .collect()
    }

    #[must_use]
    pub const fn state(&self) -> TooltipState {
        self.state
    }

    /// Hover-enter on `anchor`: show its tooltip text.
    pub fn handle_enter<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        anchor: NodeId,
    ) -> Option<NodeId> {
        if !self.anchors.contains(&anchor) {
            return None;
        }
        let Some(text) = doc.attribute(anchor, &self.attribute) else {
            tracing::debug!(node = %anchor, "tooltip text removed after binding");
            return None;
        };
        Some(self.show(doc, anchor, &text))
    }

    /// Hover-leave on `anchor`: hide whatever tooltip is live.
    pub fn handle_leave<D: Document + ?Sized>(&mut self, doc: &mut D, anchor: NodeId) -> bool {
        self.anchors.contains(&anchor) && self.hide(doc)
    }

    /// Create, insert, measure and place a tooltip above `anchor`.
    pub fn show<D: Document + ?Sized>(&mut self, doc: &mut D, anchor: NodeId, text: &str) -> NodeId {
        self.hide(doc);

        let node = doc.create_element("div");
        doc.set_class_name(node, &self.tooltip_class);
        doc.set_id(node, &self.tooltip_id);
        doc.set_text(node, text);
        doc.append_to_body(node);

        let pos = tooltip_position(doc.bounding_rect(anchor), doc.offset_size(node), self.gap);
        doc.set_style(node, "top", &css_px(pos.top));
        doc.set_style(node, "left", &css_px(pos.left));

        self.state = TooltipState::Shown { anchor, node };
        node
    }

    /// Remove the live tooltip. Returns whether one was removed.
    pub fn hide<D: Document + ?Sized>(&mut self, doc: &mut D) -> bool {
        match std::mem::take(&mut self.state) {
            TooltipState::Shown { node, .. } if doc.is_connected(node) => {
                doc.remove(node);
                true
            }
            TooltipState::Shown { node, .. } => {
                tracing::debug!(node = %node, "tooltip already detached");
                false
            }
            TooltipState::Hidden => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbui_core::MemoryDocument;
    use pretty_assertions::assert_eq;

    struct Page {
        doc: MemoryDocument,
        edit: NodeId,
        delete: NodeId,
        plain: NodeId,
    }

    fn page() -> Page {
        let mut doc = MemoryDocument::new().with_text_metrics(7.0, 16.0, 4.0);
        let body = doc.body();
        let edit = doc.append_element(body, "button");
        doc.set_attribute(edit, "data-tooltip", "Editar");
        doc.set_layout(edit, Rect::new(100.0, 200.0, 80.0, 30.0));
        let delete = doc.append_element(body, "button");
        doc.set_attribute(delete, "data-tooltip", "Eliminar registro");
        doc.set_layout(delete, Rect::new(300.0, 200.0, 40.0, 30.0));
        let plain = doc.append_element(body, "button");
        Page {
            doc,
            edit,
            delete,
            plain,
        }
    }

    fn controller(p: &Page) -> TooltipController {
        let mut tooltips = TooltipController::new(&AdapterConfig::default());
        tooltips.initialize(&p.doc);
        tooltips
    }

    #[test]
    fn position_is_centered_above_the_anchor() {
        let pos = tooltip_position(
            Rect::new(100.0, 200.0, 80.0, 30.0),
            Size::new(50.0, 24.0),
            8.0,
        );
        assert_eq!(pos, Position { top: 168.0, left: 115.0 });
    }

    #[test]
    fn binds_enter_and_leave_on_annotated_elements() {
        let p = page();
        let mut tooltips = TooltipController::new(&AdapterConfig::default());
        let bindings = tooltips.initialize(&p.doc);
        assert_eq!(
            bindings,
            vec![
                Binding::new(p.edit, DomEventKind::MouseEnter),
                Binding::new(p.edit, DomEventKind::MouseLeave),
                Binding::new(p.delete, DomEventKind::MouseEnter),
                Binding::new(p.delete, DomEventKind::MouseLeave),
            ]
        );
    }

    #[test]
    fn show_builds_and_places_the_tooltip() {
        let mut p = page();
        let mut tooltips = controller(&p);
        let tip = tooltips.handle_enter(&mut p.doc, p.edit).unwrap();

        assert_eq!(p.doc.tag(tip), Some("div"));
        assert_eq!(p.doc.id(tip), Some("activeTooltip"));
        assert_eq!(p.doc.class_name(tip), "tooltip");
        assert_eq!(p.doc.text(tip), Some("Editar"));
        // "Editar" measures 6 * 7 + 8 = 50 by 16 + 8 = 24.
        assert_eq!(p.doc.style(tip, "top").as_deref(), Some("168px"));
        assert_eq!(p.doc.style(tip, "left").as_deref(), Some("115px"));
        assert_eq!(
            tooltips.state(),
            TooltipState::Shown {
                anchor: p.edit,
                node: tip
            }
        );
    }

    #[test]
    fn show_then_hide_leaves_nothing() {
        let mut p = page();
        let mut tooltips = controller(&p);
        tooltips.show(&mut p.doc, p.edit, "Editar");
        assert!(tooltips.hide(&mut p.doc));
        assert_eq!(p.doc.count_with_id("activeTooltip"), 0);
        assert_eq!(tooltips.state(), TooltipState::Hidden);
        assert!(!tooltips.hide(&mut p.doc));
    }

    #[test]
    fn entering_twice_keeps_a_single_tooltip() {
        let mut p = page();
        let mut tooltips = controller(&p);
        let first = tooltips.handle_enter(&mut p.doc, p.edit).unwrap();
        let second = tooltips.handle_enter(&mut p.doc, p.delete).unwrap();
        assert!(!p.doc.is_connected(first));
        assert!(p.doc.is_connected(second));
        assert_eq!(p.doc.count_with_id("activeTooltip"), 1);
    }

    #[test]
    fn any_leave_hides_the_live_tooltip() {
        let mut p = page();
        let mut tooltips = controller(&p);
        tooltips.handle_enter(&mut p.doc, p.delete);
        assert!(tooltips.handle_leave(&mut p.doc, p.edit));
        assert_eq!(p.doc.count_with_id("activeTooltip"), 0);
    }

    #[test]
    fn unbound_elements_are_ignored() {
        let mut p = page();
        let mut tooltips = controller(&p);
        assert_eq!(tooltips.handle_enter(&mut p.doc, p.plain), None);
        tooltips.handle_enter(&mut p.doc, p.edit);
        assert!(!tooltips.handle_leave(&mut p.doc, p.plain));
        assert!(tooltips.state().is_shown());
    }

    #[test]
    fn externally_removed_tooltip_clears_the_slot() {
        let mut p = page();
        let mut tooltips = controller(&p);
        let tip = tooltips.show(&mut p.doc, p.edit, "Editar");
        p.doc.remove(tip);
        assert!(!tooltips.hide(&mut p.doc));
        assert_eq!(tooltips.state(), TooltipState::Hidden);
    }
}
