#![forbid(unsafe_code)]

//! Presentation controllers for server-rendered KoreBase pages.
//!
//! # Role in KoreBase UI
//! Each controller is a small state machine over a [`kbui_core::Document`]:
//! it binds to elements once, reacts to synthetic events, and hands timed
//! follow-ups to a [`kbui_runtime::Scheduler`] as [`DeferredTask`]s.
//! [`PresentationAdapter`] composes them behind the page's global call
//! surface.
//!
//! | Controller                 | Page behavior                                   |
//! |----------------------------|-------------------------------------------------|
//! | [`SidebarController`]      | open/close the side panel and its overlay       |
//! | [`AlertController`]        | fade and hide dismissible alerts                |
//! | [`TooltipController`]      | one floating tooltip above the hovered element  |
//! | [`NotificationController`] | transient toasts with enter/exit transitions    |
//! | [`confirm`]                | run a callback only after the user agrees       |

pub mod adapter;
pub mod alert;
pub mod confirm;
pub mod notification;
pub mod sidebar;
pub mod task;
pub mod tooltip;

pub use adapter::PresentationAdapter;
pub use alert::AlertController;
pub use confirm::{ConfirmPrompt, ConfirmTicket, PendingConfirmations, confirm_action};
pub use notification::NotificationController;
pub use sidebar::SidebarController;
pub use task::DeferredTask;
pub use tooltip::{TooltipController, TooltipState, tooltip_position};
