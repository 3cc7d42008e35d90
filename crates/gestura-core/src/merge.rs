//! Handler merger: one handler per raw event kind, built from an ordered list.

use crate::element::Handler;
use crate::event::{RawEvent, RawEventKind};
use std::fmt;
use std::rc::Rc;

/// Combine `handlers` into one that calls each of them, in order, with the
/// same event. A single handler is returned unchanged.
pub fn merge_handlers(handlers: impl IntoIterator<Item = Handler>) -> Handler {
    let mut handlers: Vec<Handler> = handlers.into_iter().collect();
    if handlers.len() == 1 {
        if let Some(handler) = handlers.pop() {
            return handler;
        }
    }
    Rc::new(move |event: &RawEvent| {
        for handler in &handlers {
            handler(event);
        }
    })
}

/// Handlers grouped by raw event kind.
///
/// Kinds keep the order in which they were first inserted and handlers keep
/// their insertion order within a kind.
#[derive(Clone, Default)]
pub struct HandlerMap {
    entries: Vec<(RawEventKind, Vec<Handler>)>,
}

impl HandlerMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler` to the list for `kind`.
    pub fn insert(&mut self, kind: RawEventKind, handler: Handler) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == kind) {
            Some((_, handlers)) => handlers.push(handler),
            None => self.entries.push((kind, vec![handler])),
        }
    }

    /// Append every handler of `other` after the ones already present.
    pub fn merge(&mut self, other: Self) {
        for (kind, handlers) in other.entries {
            for handler in handlers {
                self.insert(kind, handler);
            }
        }
    }

    /// Merged handler for `kind`.
    pub fn get(&self, kind: RawEventKind) -> Option<Handler> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == kind)
            .map(|(_, handlers)| merge_handlers(handlers.iter().cloned()))
    }

    /// Number of handlers registered for `kind` before merging.
    pub fn handler_count(&self, kind: RawEventKind) -> usize {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == kind)
            .map_or(0, |(_, handlers)| handlers.len())
    }

    /// Raw event kinds with at least one handler, in insertion order.
    pub fn kinds(&self) -> impl Iterator<Item = RawEventKind> + '_ {
        self.entries.iter().map(|(kind, _)| *kind)
    }

    /// One merged handler per raw event kind, in insertion order.
    pub fn into_merged(self) -> Vec<(RawEventKind, Handler)> {
        self.entries
            .into_iter()
            .map(|(kind, handlers)| (kind, merge_handlers(handlers)))
            .collect()
    }

    /// Number of raw event kinds.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no handler is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for HandlerMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(kind, handlers)| (kind, handlers.len())),
            )
            .finish()
    }
}
