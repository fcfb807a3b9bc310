#![forbid(unsafe_code)]

//! Self-dismissing alert banners.
//!
//! Each alert found at start-up gets its own two-stage timer: fade to
//! transparent, then leave the layout once the CSS transition has run.

use core::time::Duration;

use kbui_core::{Document, NodeId};
use kbui_runtime::{AdapterConfig, Scheduler};

use crate::task::DeferredTask;

/// Alert auto-dismiss controller.
#[derive(Debug, Clone)]
pub struct AlertController {
    alert_class: String,
    dismiss_delay: Duration,
    fade: Duration,
}

impl AlertController {
    #[must_use]
    pub fn new(config: &AdapterConfig) -> Self {
        Self {
            alert_class: config.alert_class.clone(),
            dismiss_delay: config.alert_dismiss_delay(),
            fade: config.alert_fade(),
        }
    }

    /// Schedule the fade of every dismissible alert currently in the
    /// document. Returns the alerts scheduled.
    pub fn initialize<D, S>(&self, doc: &D, scheduler: &mut S) -> Vec<NodeId>
    where
        D: Document + ?Sized,
        S: Scheduler<DeferredTask> + ?Sized,
    {
        let alerts = doc.elements_by_class(None, &self.alert_class);
        for &alert in &alerts {
            scheduler.schedule(self.dismiss_delay, DeferredTask::AlertFade(alert));
        }
        alerts
    }

    /// First stage: make the alert transparent and schedule the hide.
    pub fn fade<D, S>(&self, doc: &mut D, scheduler: &mut S, alert: NodeId) -> bool
    where
        D: Document + ?Sized,
        S: Scheduler<DeferredTask> + ?Sized,
    {
        if !doc.is_connected(alert) {
            return false;
        }
        doc.set_style(alert, "opacity", "0");
        scheduler.schedule(self.fade, DeferredTask::AlertHide(alert));
        true
    }

    /// Second stage: take the alert out of the layout.
    pub fn hide<D: Document + ?Sized>(&self, doc: &mut D, alert: NodeId) -> bool {
        if !doc.is_connected(alert) {
            return false;
        }
        doc.set_style(alert, "display", "none");
        true
    }
}
