#![forbid(unsafe_code)]

//! The page-level presentation adapter.
//!
//! [`PresentationAdapter`] owns one of each controller and routes three
//! kinds of input to them:
//!
//! - **Events** bound during [`PresentationAdapter::initialize`], delivered
//!   by the host through [`PresentationAdapter::handle_event`].
//! - **Deferred tasks** coming back from the host's scheduler, delivered
//!   through [`PresentationAdapter::run_task`].
//! - **Direct calls** from the page's global functions (`toggleSidebar`,
//!   `showNotification`, `formatCurrency`, `formatDate`).
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use kbui_core::{Document, MemoryDocument};
//! use kbui_runtime::TimerQueue;
//! use kbui_widgets::PresentationAdapter;
//!
//! let mut doc = MemoryDocument::new();
//! let mut timers = TimerQueue::new();
//! let mut adapter = PresentationAdapter::with_defaults();
//! adapter.initialize(&doc, &mut timers);
//!
//! let toast = adapter.show_notification(&mut doc, &mut timers, "Guardado", None);
//! adapter.advance(&mut doc, &mut timers, Duration::from_millis(3300));
//! assert!(!doc.is_connected(toast));
//! ```

use core::time::Duration;

use kbui_core::{Binding, Document, DomEvent, DomEventKind, NodeId};
use kbui_i18n::{DateFormatter, DateInput, FormatError, format_currency};
use kbui_runtime::{AdapterConfig, Scheduler, TimerQueue, trace_deferred_task};

use crate::alert::AlertController;
use crate::notification::NotificationController;
use crate::sidebar::SidebarController;
use crate::task::DeferredTask;
use crate::tooltip::{TooltipController, TooltipState};

/// All presentation behavior of one page.
#[derive(Debug, Clone)]
pub struct PresentationAdapter {
    config: AdapterConfig,
    sidebar: SidebarController,
    alerts: AlertController,
    tooltips: TooltipController,
    notifications: NotificationController,
    dates: DateFormatter,
}

impl Default for PresentationAdapter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl PresentationAdapter {
    /// Build the controllers from `config`.
    ///
    /// An out-of-range `utc_offset_minutes` falls back to UTC with a
    /// warning; call [`AdapterConfig::validate`] first to reject it instead.
    #[must_use]
    pub fn new(config: AdapterConfig) -> Self {
        let dates = DateFormatter::from_utc_offset_minutes(config.utc_offset_minutes)
            .unwrap_or_else(|| {
                tracing::warn!(
                    utc_offset_minutes = config.utc_offset_minutes,
                    "invalid UTC offset, formatting dates in UTC"
                );
                DateFormatter::utc()
            });
        Self {
            sidebar: SidebarController::new(&config),
            alerts: AlertController::new(&config),
            tooltips: TooltipController::new(&config),
            notifications: NotificationController::new(&config),
            dates,
            config,
        }
    }

    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(AdapterConfig::default())
    }

    #[must_use]
    pub const fn config(&self) -> &AdapterConfig {
        &self.config
    }

    #[must_use]
    pub const fn sidebar(&self) -> &SidebarController {
        &self.sidebar
    }

    #[must_use]
    pub const fn tooltip_state(&self) -> TooltipState {
        self.tooltips.state()
    }

    /// Scan the document once: bind navigation items and tooltip anchors,
    /// and schedule every dismissible alert. Returns the listeners the host
    /// must attach.
    pub fn initialize<D, S>(&mut self, doc: &D, scheduler: &mut S) -> Vec<Binding>
    where
        D: Document + ?Sized,
        S: Scheduler<DeferredTask> + ?Sized,
    {
        let mut bindings = self.sidebar.initialize(doc);
        let nav_items = bindings.len();
        let alerts = self.alerts.initialize(doc, scheduler).len();
        let tooltip_bindings = self.tooltips.initialize(doc);
        let tooltips = tooltip_bindings.len() / 2;
        bindings.extend(tooltip_bindings);

        tracing::info!(nav_items, alerts, tooltips, "KoreBase ERP - sistema inicializado");
        bindings
    }

    /// Deliver a bound DOM event. Returns whether it changed the document.
    pub fn handle_event<D: Document + ?Sized>(&mut self, doc: &mut D, event: DomEvent) -> bool {
        match event.kind {
            DomEventKind::Click => self.sidebar.handle_click(doc, event.target),
            DomEventKind::MouseEnter => self.tooltips.handle_enter(doc, event.target).is_some(),
            DomEventKind::MouseLeave => self.tooltips.handle_leave(doc, event.target),
        }
    }

    /// Run a deferred task that came due. Returns whether its element was
    /// still attached.
    pub fn run_task<D, S>(&self, doc: &mut D, scheduler: &mut S, task: DeferredTask) -> bool
    where
        D: Document + ?Sized,
        S: Scheduler<DeferredTask> + ?Sized,
    {
        let node = task.node().to_string();
        trace_deferred_task(task.name(), &node, || match task {
            DeferredTask::AlertFade(n) => self.alerts.fade(doc, scheduler, n),
            DeferredTask::AlertHide(n) => self.alerts.hide(doc, n),
            DeferredTask::NotificationEnter(n) => self.notifications.enter(doc, n),
            DeferredTask::NotificationExit(n) => self.notifications.exit(doc, scheduler, n),
            DeferredTask::NotificationRemove(n) => self.notifications.remove(doc, n),
        })
    }

    /// Advance a [`TimerQueue`] by `dt`, running every task that comes due,
    /// follow-ups included. Returns the number of tasks run.
    pub fn advance<D: Document + ?Sized>(
        &self,
        doc: &mut D,
        timers: &mut TimerQueue<DeferredTask>,
        dt: Duration,
    ) -> usize {
        timers.advance_with(dt, |timers, task| {
            self.run_task(doc, timers, task);
        })
    }

    /// `toggleSidebar()`.
    pub fn toggle_sidebar<D: Document + ?Sized>(&self, doc: &mut D) -> Option<bool> {
        self.sidebar.toggle(doc)
    }

    /// Show a tooltip for `anchor` directly.
    pub fn show_tooltip<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        anchor: NodeId,
        text: &str,
    ) -> NodeId {
        self.tooltips.show(doc, anchor, text)
    }

    pub fn hide_tooltip<D: Document + ?Sized>(&mut self, doc: &mut D) -> bool {
        self.tooltips.hide(doc)
    }

    /// `showNotification(message, kind)`.
    pub fn show_notification<D, S>(
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
        self.notifications.show(doc, scheduler, message, kind)
    }

    /// `formatCurrency(amount, currency)`; `None` uses the configured
    /// default currency.
    pub fn format_currency(&self, amount: f64, currency: Option<&str>) -> Result<String, FormatError> {
        format_currency(amount, Some(currency.unwrap_or(&self.config.default_currency)))
    }

    /// `formatDate(date, format)`; `None` means `"short"`.
    pub fn format_date(
        &self,
        input: impl Into<DateInput>,
        format: Option<&str>,
    ) -> Result<String, FormatError> {
        self.dates.format_named(&input.into(), format)
    }
}
