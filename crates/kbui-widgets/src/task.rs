#![forbid(unsafe_code)]

use kbui_core::NodeId;

/// Timed follow-ups scheduled by the controllers.
///
/// Every task targets one element and re-checks that it is still attached
/// before touching it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Make a dismissible alert transparent.
    AlertFade(NodeId),
    /// Take a faded alert out of the layout.
    AlertHide(NodeId),
    /// Add the show marker to a fresh toast.
    NotificationEnter(NodeId),
    /// Remove the show marker so the toast fades out.
    NotificationExit(NodeId),
    /// Remove the toast from the document.
    NotificationRemove(NodeId),
}

impl DeferredTask {
    /// Stable name used in tracing spans.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AlertFade(_) => "alert.fade",
            Self::AlertHide(_) => "alert.hide",
            Self::NotificationEnter(_) => "notification.enter",
            Self::NotificationExit(_) => "notification.exit",
            Self::NotificationRemove(_) => "notification.remove",
        }
    }

    /// Element the task acts on.
    #[must_use]
    pub const fn node(self) -> NodeId {
        match self {
            Self::AlertFade(node)
            | Self::AlertHide(node)
            | Self::NotificationEnter(node)
            | Self::NotificationExit(node)
            | Self::NotificationRemove(node) => node,
        }
    }
}
