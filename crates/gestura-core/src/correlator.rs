//! Event correlator: remembers which raw events already fired a gesture.

use crate::event::{EventId, RawEvent, WeakRawEvent};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Set of raw event identities consumed during one attachment cycle.
///
/// Shared by every bound handler of the cycle. Identity is the event
/// instance, not its contents. Entries hold the event weakly: once every
/// clone of an event is dropped it can never be dispatched again, and its
/// entry is pruned on the next consume.
#[derive(Clone, Default)]
pub struct ConsumedEventSet {
    inner: Rc<RefCell<HashMap<EventId, WeakRawEvent>>>,
}

impl ConsumedEventSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `event` consumed. Returns `false` if it already was.
    pub fn try_consume(&self, event: &RawEvent) -> bool {
        let mut consumed = self.inner.borrow_mut();
        if consumed.contains_key(&event.id()) {
            return false;
        }
        consumed.retain(|_, seen| seen.is_live());
        consumed.insert(event.id(), event.downgrade());
        true
    }

    /// Check whether `event` has been consumed.
    pub fn contains(&self, event: &RawEvent) -> bool {
        self.inner.borrow().contains_key(&event.id())
    }

    /// Number of consumed events still alive.
    pub fn len(&self) -> usize {
        self.inner
            .borrow()
            .values()
            .filter(|seen| seen.is_live())
            .count()
    }

    /// Check if no live event is consumed.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ConsumedEventSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsumedEventSet")
            .field("len", &self.len())
            .finish()
    }
}
