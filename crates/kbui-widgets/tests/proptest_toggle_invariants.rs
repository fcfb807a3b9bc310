//! Property-based invariant tests for the navigation panel and tooltips.
//!
//! 1. Panel and overlay markers always move together
//! 2. An even number of toggles restores the starting state
//! 3. Nav clicks toggle exactly when the viewport is at or below the breakpoint
//! 4. Any hover sequence leaves at most one tooltip in the document

use kbui_core::{Document, DomEvent, MemoryDocument, NodeId, Rect};
use kbui_runtime::TimerQueue;
use kbui_widgets::{DeferredTask, PresentationAdapter};
use proptest::prelude::*;

fn sidebar_page() -> (MemoryDocument, NodeId, NodeId, NodeId) {
    let mut doc = MemoryDocument::new();
    let body = doc.body();
    let panel = doc.append_element(body, "aside");
    doc.set_id(panel, "appSidebar");
    let item = doc.append_element(panel, "a");
    doc.set_class_name(item, "sidebar__nav-item");
    let overlay = doc.append_element(body, "div");
    doc.set_id(overlay, "sidebarOverlay");
    (doc, panel, overlay, item)
}

#[derive(Debug, Clone, Copy)]
enum Hover {
    Enter(usize),
    Leave(usize),
}

fn hover() -> impl Strategy<Value = Hover> {
    prop_oneof![
        (0usize..3).prop_map(Hover::Enter),
        (0usize..3).prop_map(Hover::Leave),
    ]
}

proptest! {
    #[test]
    fn toggles_are_lock_step_and_parity_preserving(
        start_open in any::<bool>(),
        toggles in 0usize..50,
    ) {
        let (mut doc, panel, overlay, _) = sidebar_page();
        if start_open {
            doc.add_class(panel, "sidebar--open");
            doc.add_class(overlay, "sidebar-overlay--active");
        }
        let adapter = PresentationAdapter::with_defaults();
        for _ in 0..toggles {
            adapter.toggle_sidebar(&mut doc);
            prop_assert_eq!(
                doc.has_class(panel, "sidebar--open"),
                doc.has_class(overlay, "sidebar-overlay--active")
            );
        }
        let expected = start_open ^ (toggles % 2 == 1);
        prop_assert_eq!(doc.has_class(panel, "sidebar--open"), expected);
    }

    #[test]
    fn nav_click_toggles_iff_narrow(width in 200.0f64..2000.0) {
        let (mut doc, panel, _, item) = sidebar_page();
        doc.set_viewport_width(width);
        let mut timers = TimerQueue::<DeferredTask>::new();
        let mut adapter = PresentationAdapter::with_defaults();
        adapter.initialize(&doc, &mut timers);

        let toggled = adapter.handle_event(&mut doc, DomEvent::click(item));
        prop_assert_eq!(toggled, width <= 1024.0);
        prop_assert_eq!(doc.has_class(panel, "sidebar--open"), width <= 1024.0);
    }

    #[test]
    fn at_most_one_tooltip(sequence in prop::collection::vec(hover(), 0..40)) {
        let mut doc = MemoryDocument::new().with_text_metrics(7.0, 16.0, 4.0);
        let body = doc.body();
        let anchors: Vec<NodeId> = (0..3)
            .map(|i| {
                let el = doc.append_element(body, "span");
                doc.set_attribute(el, "data-tooltip", &format!("Ayuda {i}"));
                doc.set_layout(el, Rect::new(50.0 * i as f64, 100.0, 40.0, 20.0));
                el
            })
            .collect();
        let mut timers = TimerQueue::<DeferredTask>::new();
        let mut adapter = PresentationAdapter::with_defaults();
        adapter.initialize(&doc, &mut timers);

        for step in sequence {
            let event = match step {
                Hover::Enter(i) => DomEvent::mouse_enter(anchors[i]),
                Hover::Leave(i) => DomEvent::mouse_leave(anchors[i]),
            };
            adapter.handle_event(&mut doc, event);
            prop_assert!(doc.count_with_id("activeTooltip") <= 1);
            if matches!(step, Hover::Leave(_)) {
                prop_assert_eq!(doc.count_with_id("activeTooltip"), 0);
            }
        }
    }
}
