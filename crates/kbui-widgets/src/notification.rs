#![forbid(unsafe_code)]

//! Transient toast notifications.
//!
//! Every call creates an independent toast with its own three timers:
//!
//! ```text
//! t = 0            inserted, no show marker
//! t = enter        show marker added (fade in)
//! t = visible      show marker removed (fade out)
//! t = visible+exit removed from the document
//! ```
//!
//! Toasts are not tracked after creation. Stacking is left to the
//! stylesheet and there is no cap on how many are visible.

use core::time::Duration;

use kbui_core::{Document, NodeId};
use kbui_runtime::{AdapterConfig, Scheduler};

use crate::task::DeferredTask;

/// Toast notification controller.
#[derive(Debug, Clone)]
pub struct NotificationController {
    base_class: String,
    show_class: String,
    default_kind: String,
    enter_delay: Duration,
    visible: Duration,
    exit: Duration,
}

impl NotificationController {
    #[must_use]
    pub fn new(config: &AdapterConfig) -> Self {
        Self {
            base_class: config.notification_class.clone(),
            show_class: config.notification_show_class.clone(),
            default_kind: config.default_notification_kind.clone(),
            enter_delay: config.notification_enter_delay(),
            visible: config.notification_visible(),
            exit: config.notification_exit(),
        }
    }

    /// Class list for a toast of `kind`. The kind is an open tag and is
    /// never validated.
    #[must_use]
    pub fn class_name(&self, kind: &str) -> String {
        format!("{base} {base}--{kind}", base = self.base_class)
    }

    /// Insert a toast and schedule its lifecycle. `None` uses the
    /// configured default kind.
    pub fn show<D, S>(
        &self,
        doc: &mut D,
        scheduler: &mut S,
        message: &str,
        kind: Option<&str>,
    ) -> NodeId
    where
        D: Document + ?Sized,
        S: Scheduler<DeferredTask> + ?Sized,
    {
        let kind = kind.unwrap_or(&self.default_kind);
        let toast = doc.create_element("div");
        doc.set_class_name(toast, &self.class_name(kind));
        doc.set_text(toast, message);
        doc.append_to_body(toast);

        scheduler.schedule(self.enter_delay, DeferredTask::NotificationEnter(toast));
        scheduler.schedule(self.visible, DeferredTask::NotificationExit(toast));
        tracing::debug!(node = %toast, kind, "notification shown");
        toast
    }

    /// Add the show marker.
    pub fn enter<D: Document + ?Sized>(&self, doc: &mut D, toast: NodeId) -> bool {
        if !doc.is_connected(toast) {
            return false;
        }
        doc.add_class(toast, &self.show_class);
        true
    }

    /// Remove the show marker and schedule removal.
    pub fn exit<D, S>(&self, doc: &mut D, scheduler: &mut S, toast: NodeId) -> bool
    where
        D: Document + ?Sized,
        S: Scheduler<DeferredTask> + ?Sized,
    {
        if !doc.is_connected(toast) {
            return false;
        }
        doc.remove_class(toast, &self.show_class);
        scheduler.schedule(self.exit, DeferredTask::NotificationRemove(toast));
        true
    }

    /// Take the toast out of the document.
    pub fn remove<D: Document + ?Sized>(&self, doc: &mut D, toast: NodeId) -> bool {
        if !doc.is_connected(toast) {
            return false;
        }
        doc.remove(toast);
        true
    }
}
