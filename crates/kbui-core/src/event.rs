#![forbid(unsafe_code)]

//! Synthetic DOM events.
//!
//! Hosts translate their native listeners into [`DomEvent`] values and feed
//! them to the adapter. Controllers report what they want to listen to as
//! [`Binding`]s during initialization.

use crate::dom::NodeId;

/// Event kinds the adapter reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomEventKind {
    Click,
    MouseEnter,
    MouseLeave,
}

impl DomEventKind {
    /// DOM event type name used with `addEventListener`.
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
        }
    }

    /// Inverse of [`Self::dom_name`].
    #[must_use]
    pub fn from_dom_name(name: &str) -> Option<Self> {
        match name {
            "click" => Some(Self::Click),
            "mouseenter" => Some(Self::MouseEnter),
            "mouseleave" => Some(Self::MouseLeave),
            _ => None,
        }
    }
}

/// An event delivered to the element it was bound on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DomEvent {
    pub kind: DomEventKind,
    pub target: NodeId,
}

impl DomEvent {
    #[must_use]
    pub const fn click(target: NodeId) -> Self {
        Self {
            kind: DomEventKind::Click,
            target,
        }
    }

    #[must_use]
    pub const fn mouse_enter(target: NodeId) -> Self {
        Self {
            kind: DomEventKind::MouseEnter,
            target,
        }
    }

    #[must_use]
    pub const fn mouse_leave(target: NodeId) -> Self {
        Self {
            kind: DomEventKind::MouseLeave,
            target,
        }
    }
}

/// A listener request: deliver `kind` events that fire on `node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    pub node: NodeId,
    pub kind: DomEventKind,
}

impl Binding {
    #[must_use]
    pub const fn new(node: NodeId, kind: DomEventKind) -> Self {
        Self { node, kind }
    }

    /// The event this binding would deliver.
    #[must_use]
    pub const fn event(self) -> DomEvent {
        DomEvent {
            kind: self.kind,
            target: self.node,
        }
    }
}
