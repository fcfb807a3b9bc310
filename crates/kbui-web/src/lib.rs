#![forbid(unsafe_code)]

//! Browser host for the KoreBase UI adapter.
//!
//! # Role in KoreBase UI
//! The controllers in `kbui-widgets` only see a [`kbui_core::Document`] and a
//! [`kbui_runtime::Scheduler`]. This crate provides both for a real page:
//! `WebDocument` wraps `web_sys::Document`, and `WindowScheduler` backs
//! deferred tasks with `setTimeout`. `start` wires the adapter to the page
//! and installs the global functions server-rendered templates call:
//!
//! ```text
//! toggleSidebar()
//! showNotification(message, kind = "info")
//! confirmAction(message, callback)
//! formatCurrency(amount, currency = "MXN")
//! formatDate(date, format = "short")
//! ```
//!
//! # Building
//!
//! ```bash
//! wasm-pack build crates/kbui-web --target web
//! ```
//!
//! ```javascript
//! import init, { start } from './kbui_web.js';
//! await init();
//! start('{"mobile_breakpoint_px": 1024}');
//! ```
//!
//! [`bridge`] holds the host-independent pieces (handle table, argument
//! coercion, log-line rendering) so they can be tested natively.

pub mod bridge;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{
    WebDocument, WindowScheduler, confirm_action, format_currency, format_date, show_notification,
    start, toggle_sidebar,
};
