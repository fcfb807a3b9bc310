#![forbid(unsafe_code)]

//! Collapsible navigation panel.
//!
//! The open state lives in the document as two markers, one on the panel
//! and one on its overlay. [`SidebarController::toggle`] always flips both
//! together, so repeated toggles behave as XOR rather than "open".

use kbui_core::{Binding, Document, DomEventKind, NodeId};
use kbui_runtime::AdapterConfig;

/// Navigation panel controller.
#[derive(Debug, Clone)]
pub struct SidebarController {
    sidebar_id: String,
    overlay_id: String,
    nav_item_class: String,
    open_class: String,
    overlay_active_class: String,
    breakpoint_px: f64,
    nav_items: Vec<NodeId>,
}

impl SidebarController {
    #[must_use]
    pub fn new(config: &AdapterConfig) -> Self {
        Self {
            sidebar_id: config.sidebar_id.clone(),
            overlay_id: config.overlay_id.clone(),
            nav_item_class: config.nav_item_class.clone(),
            open_class: config.sidebar_open_class.clone(),
            overlay_active_class: config.overlay_active_class.clone(),
            breakpoint_px: config.mobile_breakpoint_px,
            nav_items: Vec::new(),
        }
    }

    /// Bind every navigation item inside the panel.
    ///
    /// Pages without the panel or its overlay get no bindings.
    pub fn initialize<D: Document + ?Sized>(&mut self, doc: &D) -> Vec<Binding> {
        let Some((panel, _)) = self.locate(doc) else {
            tracing::debug!(
                sidebar_id = %self.sidebar_id,
                overlay_id = %self.overlay_id,
                "navigation panel not present; sidebar controller idle"
            );
            self.nav_items.clear();
            return Vec::new();
        };
        self.nav_items = doc.elements_by_class(Some(panel), &self.nav_item_class);
        self.nav_items
            .iter()
            .map(|&node| Binding::new(node, DomEventKind::Click))
            .collect()
    }

    /// Navigation items bound by the last [`Self::initialize`].
    #[must_use]
    pub fn nav_items(&self) -> &[NodeId] {
        &self.nav_items
    }

    /// Flip both markers. Returns the panel's new open state, or `None` when
    /// the panel or overlay is missing.
    pub fn toggle<D: Document + ?Sized>(&self, doc: &mut D) -> Option<bool> {
        let (panel, overlay) = self.locate(doc)?;
        let open = doc.toggle_class(panel, &self.open_class);
        doc.toggle_class(overlay, &self.overlay_active_class);
        tracing::debug!(open, "sidebar toggled");
        Some(open)
    }

    /// Whether the panel currently carries the open marker.
    #[must_use]
    pub fn is_open<D: Document + ?Sized>(&self, doc: &D) -> bool {
        self.locate(doc)
            .is_some_and(|(panel, _)| doc.has_class(panel, &self.open_class))
    }

    /// Whether a viewport this wide collapses the panel after navigation.
    #[must_use]
    pub fn is_narrow(&self, viewport_width: f64) -> bool {
        viewport_width <= self.breakpoint_px
    }

    /// React to a click on a bound navigation item. Returns whether the
    /// panel was toggled.
    pub fn handle_click<D: Document + ?Sized>(&self, doc: &mut D, target: NodeId) -> bool {
        if !self.nav_items.contains(&target) || !self.is_narrow(doc.viewport_width()) {
            return false;
        }
        self.toggle(doc).is_some()
    }

    fn locate<D: Document + ?Sized>(&self, doc: &D) -> Option<(NodeId, NodeId)> {
        Some((
            doc.element_by_id(&self.sidebar_id)?,
            doc.element_by_id(&self.overlay_id)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kbui_core::MemoryDocument;
    use pretty_assertions::assert_eq;

    struct Page {
        doc: MemoryDocument,
        panel: NodeId,
        overlay: NodeId,
        links: Vec<NodeId>,
        outside_link: NodeId,
    }

    fn page() -> Page {
        let mut doc = MemoryDocument::new();
        let body = doc.body();
        let panel = doc.append_element(body, "aside");
        doc.set_id(panel, "appSidebar");
        let links = (0..2)
            .map(|_| {
                let link = doc.append_element(panel, "a");
                doc.set_class_name(link, "sidebar__nav-item");
                link
            })
            .collect();
        let overlay = doc.append_element(body, "div");
        doc.set_id(overlay, "sidebarOverlay");
        let outside_link = doc.append_element(body, "a");
        doc.set_class_name(outside_link, "sidebar__nav-item");
        Page {
            doc,
            panel,
            overlay,
            links,
            outside_link,
        }
    }

    fn markers(p: &Page) -> (bool, bool) {
        (
            p.doc.has_class(p.panel, "sidebar--open"),
            p.doc.has_class(p.overlay, "sidebar-overlay--active"),
        )
    }

    #[test]
    fn binds_only_items_inside_the_panel() {
        let mut p = page();
        let mut sidebar = SidebarController::new(&AdapterConfig::default());
        let bindings = sidebar.initialize(&p.doc);
        assert_eq!(
            bindings,
            p.links
                .iter()
                .map(|&n| Binding::new(n, DomEventKind::Click))
                .collect::<Vec<_>>()
        );
        assert!(!sidebar.nav_items().contains(&p.outside_link));

        p.doc.set_viewport_width(400.0);
        assert!(!sidebar.handle_click(&mut p.doc, p.outside_link));
        assert_eq!(markers(&p), (false, false));
    }

    #[test]
    fn toggle_flips_both_markers_together() {
        let mut p = page();
        let sidebar = SidebarController::new(&AdapterConfig::default());
        assert_eq!(sidebar.toggle(&mut p.doc), Some(true));
        assert_eq!(markers(&p), (true, true));
        assert!(sidebar.is_open(&p.doc));
        assert_eq!(sidebar.toggle(&mut p.doc), Some(false));
        assert_eq!(markers(&p), (false, false));
    }

    #[test]
    fn missing_overlay_makes_everything_a_no_op() {
        let mut p = page();
        p.doc.remove(p.overlay);
        let mut sidebar = SidebarController::new(&AdapterConfig::default());
        assert!(sidebar.initialize(&p.doc).is_empty());
        assert_eq!(sidebar.toggle(&mut p.doc), None);
        assert!(!p.doc.has_class(p.panel, "sidebar--open"));
    }

    #[test]
    fn nav_click_collapses_only_on_narrow_viewports() {
        let mut p = page();
        let mut sidebar = SidebarController::new(&AdapterConfig::default());
        sidebar.initialize(&p.doc);
        let link = p.links[0];

        p.doc.set_viewport_width(1280.0);
        assert!(!sidebar.handle_click(&mut p.doc, link));
        assert_eq!(markers(&p), (false, false));

        p.doc.set_viewport_width(1024.0);
        assert!(sidebar.handle_click(&mut p.doc, link));
        assert_eq!(markers(&p), (true, true));

        p.doc.set_viewport_width(375.0);
        assert!(sidebar.handle_click(&mut p.doc, link));
        assert_eq!(markers(&p), (false, false));
    }

    #[test]
    fn breakpoint_comes_from_config() {
        let config = AdapterConfig {
            mobile_breakpoint_px: 768.0,
            ..AdapterConfig::default()
        };
        let sidebar = SidebarController::new(&config);
        assert!(sidebar.is_narrow(768.0));
        assert!(!sidebar.is_narrow(1024.0));
    }
}
