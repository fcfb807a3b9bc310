#![forbid(unsafe_code)]

//! Host-independent glue between page values and the adapter.

use std::collections::HashMap;
use std::fmt;

use kbui_core::NodeId;
use kbui_i18n::{DateInput, FormatError};
use kbui_runtime::{AdapterConfig, ConfigError};

/// Largest time value a script `Date` can hold, in milliseconds.
pub const MAX_TIME_MS: f64 = 8.64e15;

/// Maps [`NodeId`]s to host element handles.
///
/// Ids come from a monotonic counter and are never reused: once an element
/// is released its id stays dead, so a deferred task holding it can never
/// reach a newer element. Released entries are dropped, so the table only
/// holds elements the adapter still refers to.
#[derive(Debug, Clone)]
pub struct HandleTable<T> {
    next: u32,
    live: HashMap<u32, T>,
}

impl<T> Default for HandleTable<T> {
    fn default() -> Self {
        Self {
            next: 0,
            live: HashMap::new(),
        }
    }
}

impl<T: PartialEq> HandleTable<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of `item`, allocating one the first time it is seen.
    pub fn intern(&mut self, item: T) -> NodeId {
        if let Some((&raw, _)) = self.live.iter().find(|(_, live)| **live == item) {
            return NodeId::new(raw);
        }
        self.insert(item)
    }

    /// Allocate an id for an element known to be new.
    pub fn insert(&mut self, item: T) -> NodeId {
        let id = self.allocate();
        self.live.insert(id.get(), item);
        id
    }

    /// An id that resolves to nothing, for elements the host failed to
    /// create.
    pub fn dangling(&mut self) -> NodeId {
        self.allocate()
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.live.get(&id.get())
    }

    /// Forget the element behind `id`.
    pub fn release(&mut self, id: NodeId) -> Option<T> {
        self.live.remove(&id.get())
    }

    /// Live handles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    fn allocate(&mut self) -> NodeId {
        let id = NodeId::new(self.next);
        self.next = self.next.saturating_add(1);
        id
    }
}

/// Parse the optional JSON handed to `start`. Missing or blank input means
/// defaults; anything else must load and validate.
pub fn parse_config(json: Option<&str>) -> Result<AdapterConfig, ConfigError> {
    match json.map(str::trim) {
        None | Some("") => Ok(AdapterConfig::default()),
        Some(json) => AdapterConfig::load_json(json),
    }
}

/// Interpret a script number as a millisecond timestamp, the way `new
/// Date(n)` does: fractions are truncated, non-finite or out-of-range
/// values are invalid.
pub fn date_input_from_millis(ms: f64) -> Result<DateInput, FormatError> {
    if !ms.is_finite() || ms.abs() > MAX_TIME_MS {
        return Err(FormatError::InvalidDate(ms.to_string()));
    }
    Ok(DateInput::TimestampMillis(ms.trunc() as i64))
}

/// Collects one tracing event for a single console line.
#[derive(Debug, Default)]
pub struct LogLine {
    message: String,
    fields: Vec<(&'static str, String)>,
}

impl LogLine {
    /// `LEVEL target: message key=value ...`
    #[must_use]
    pub fn render(&self, level: &tracing::Level, target: &str) -> String {
        let mut line = format!("{level} {target}: {}", self.message);
        for (name, value) in &self.fields {
            line.push(' ');
            line.push_str(name);
            line.push('=');
            line.push_str(value);
        }
        line
    }
}

impl tracing::field::Visit for LogLine {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            self.fields.push((field.name(), value.to_owned()));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push((field.name(), format!("{value:?}")));
        }
    }
}
