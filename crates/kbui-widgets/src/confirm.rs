#![forbid(unsafe_code)]

//! Confirmation-gated callbacks.
//!
//! [`confirm_action`] covers hosts with a blocking yes/no prompt (the
//! browser's `window.confirm`). [`PendingConfirmations`] is the
//! asynchronous form for hosts whose prompt answers later: the callback is
//! parked under a [`ConfirmTicket`] and runs when the ticket is resolved
//! as affirmed. Both run the callback at most once.

use std::collections::BTreeMap;
use std::fmt;

/// A blocking yes/no prompt.
pub trait ConfirmPrompt {
    /// Ask `message`; `true` means the user agreed.
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Ask `message` and run `callback` only if the user agrees. Returns the
/// answer.
pub fn confirm_action<P, F>(prompt: &mut P, message: &str, callback: F) -> bool
where
    P: ConfirmPrompt + ?Sized,
    F: FnOnce(),
{
    let affirmed = prompt.confirm(message);
    tracing::debug!(affirmed, "confirmation answered");
    if affirmed {
        callback();
    }
    affirmed
}

/// Handle for one outstanding confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfirmTicket(u64);

impl fmt::Display for ConfirmTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "confirm#{}", self.0)
    }
}

/// Confirmations waiting for an asynchronous answer.
///
/// The browser host answers through the blocking `window.confirm` and does
/// not use this type. It is the API for embedders whose prompt resolves
/// later, such as an in-page modal: park the callback with
/// [`Self::request`], show [`Self::message`] however the host likes, then
/// call [`Self::resolve`] with the answer.
pub struct PendingConfirmations<F = Box<dyn FnOnce()>> {
    next: u64,
    pending: BTreeMap<ConfirmTicket, (String, F)>,
}

impl<F> fmt::Debug for PendingConfirmations<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingConfirmations")
            .field("next", &self.next)
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl<F: FnOnce()> Default for PendingConfirmations<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FnOnce()> PendingConfirmations<F> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Park `callback` until the question `message` is answered.
    pub fn request(&mut self, message: impl Into<String>, callback: F) -> ConfirmTicket {
        let ticket = ConfirmTicket(self.next);
        self.next += 1;
        self.pending.insert(ticket, (message.into(), callback));
        ticket
    }

    /// Question text of an outstanding ticket.
    #[must_use]
    pub fn message(&self, ticket: ConfirmTicket) -> Option<&str> {
        self.pending.get(&ticket).map(|(message, _)| message.as_str())
    }

    /// Outstanding tickets, oldest first.
    pub fn tickets(&self) -> impl Iterator<Item = ConfirmTicket> + '_ {
        self.pending.keys().copied()
    }

    /// Answer a ticket. The callback runs if `affirmed`; either way the
    /// ticket is consumed. Returns whether the callback ran.
    pub fn resolve(&mut self, ticket: ConfirmTicket, affirmed: bool) -> bool {
        let Some((_, callback)) = self.pending.remove(&ticket) else {
            tracing::debug!(%ticket, "confirmation already resolved");
            return false;
        };
        if affirmed {
            callback();
        }
        affirmed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn callback_runs_only_when_affirmed() {
        let runs = Cell::new(0);
        let mut yes = |_: &str| true;
        let mut no = |_: &str| false;

        assert!(confirm_action(&mut yes, "¿Eliminar?", || runs.set(runs.get() + 1)));
        assert_eq!(runs.get(), 1);
        assert!(!confirm_action(&mut no, "¿Eliminar?", || runs.set(runs.get() + 1)));
        assert_eq!(runs.get(), 1);
    }

    #[test]
    fn prompt_sees_the_message() {
        let mut asked = Vec::new();
        let mut prompt = |m: &str| {
            asked.push(m.to_owned());
            false
        };
        confirm_action(&mut prompt, "¿Cerrar sesión?", || {});
        assert_eq!(asked, vec!["¿Cerrar sesión?".to_owned()]);
    }

    #[test]
    fn pending_confirmation_runs_once() {
        let runs = Rc::new(Cell::new(0));
        let mut pending: PendingConfirmations = PendingConfirmations::new();
        let counter = Rc::clone(&runs);
        let ticket = pending.request("¿Guardar?", Box::new(move || counter.set(counter.get() + 1)));

        assert_eq!(pending.message(ticket), Some("¿Guardar?"));
        assert!(pending.resolve(ticket, true));
        assert!(!pending.resolve(ticket, true));
        assert_eq!(runs.get(), 1);
        assert!(pending.is_empty());
    }

    #[test]
    fn declined_confirmation_drops_the_callback() {
        let runs = Rc::new(Cell::new(0));
        let mut pending: PendingConfirmations = PendingConfirmations::new();
        let first = {
            let runs = Rc::clone(&runs);
            pending.request("a", Box::new(move || runs.set(runs.get() + 1)))
        };
        let second = {
            let runs = Rc::clone(&runs);
            pending.request("b", Box::new(move || runs.set(runs.get() + 10)))
        };
        assert_eq!(pending.tickets().collect::<Vec<_>>(), vec![first, second]);

        assert!(!pending.resolve(first, false));
        assert_eq!(pending.len(), 1);
        assert!(pending.resolve(second, true));
        assert_eq!(runs.get(), 10);
    }
}
