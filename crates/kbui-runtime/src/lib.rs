#![forbid(unsafe_code)]

//! Runtime pieces shared by every host of the KoreBase UI adapter.
//!
//! # Role in KoreBase UI
//! The controllers never touch real timers. They hand deferred tasks to a
//! [`Scheduler`]; the browser host backs it with `setTimeout`, while native
//! hosts and tests use [`TimerQueue`] driven by a [`DeterministicClock`], so
//! every millisecond boundary can be stepped through explicitly.
//!
//! # Primary responsibilities
//! - **DeterministicClock**: host-advanced monotonic time.
//! - **TimerQueue**: ordered one-shot timers with no cancellation.
//! - **AdapterConfig**: reserved identifiers, marker classes and timings.
//! - **Deferred tracing**: spans and counters around every deferred task.

pub mod clock;
pub mod config;
pub mod deferred;
pub mod timer;

pub use clock::DeterministicClock;
pub use config::{AdapterConfig, ConfigError};
pub use deferred::{deferred_executed_total, deferred_scheduled_total, trace_deferred_task};
pub use timer::{Scheduler, TimerQueue};
