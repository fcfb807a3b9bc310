#![forbid(unsafe_code)]

//! Core: document abstraction, DOM events, and geometry for the KoreBase UI
//! adapter.
//!
//! # Role in KoreBase UI
//! `kbui-core` is the seam between the controllers and whatever actually
//! owns the element tree. Controllers only talk to the [`Document`] trait,
//! so the same logic runs against the browser (`kbui-web`) and against the
//! in-memory [`MemoryDocument`] used by native hosts and tests.
//!
//! # Primary responsibilities
//! - **Document**: the narrow set of tree operations the adapter needs.
//! - **DomEvent**: synthetic `click` / `mouseenter` / `mouseleave` events.
//! - **Geometry**: logical-pixel rectangles and CSS pixel rendering.
//! - **MemoryDocument**: a deterministic element tree with explicit layout.

pub mod dom;
pub mod event;
pub mod geometry;
pub mod memory;

pub use dom::{Document, NodeId};
pub use event::{Binding, DomEvent, DomEventKind};
pub use geometry::{Position, Rect, Size, css_px};
pub use memory::MemoryDocument;
