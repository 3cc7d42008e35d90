//! DOM-like event target: a listener registry with ordered dispatch.

use crate::event::{RawEvent, RawEventKind};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// A raw-event handler.
pub type Handler = Rc<dyn Fn(&RawEvent)>;

/// Handle of a registered listener, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Registration {
    id: ListenerId,
    kind: RawEventKind,
    handler: Handler,
}

#[derive(Default)]
struct ElementInner {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<Registration>>,
}

/// An element raw events are dispatched to.
///
/// Listeners for the same kind run in registration order. Listeners added
/// while an event is being dispatched do not see that event; listeners
/// removed while an event is being dispatched are skipped.
#[derive(Clone, Default)]
pub struct Element {
    inner: Rc<ElementInner>,
}

/// Non-owning reference to an [`Element`].
#[derive(Clone, Default)]
pub struct WeakElement {
    inner: Weak<ElementInner>,
}

impl WeakElement {
    /// Upgrade to a strong handle if the element is still alive.
    pub fn upgrade(&self) -> Option<Element> {
        self.inner.upgrade().map(|inner| Element { inner })
    }
}

impl Element {
    /// Create an element with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for events of `kind`.
    pub fn add_listener(&self, kind: RawEventKind, handler: Handler) -> ListenerId {
        let id = ListenerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push(Registration { id, kind, handler });
        tracing::trace!(%kind, listener = id.0, "listener added");
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|registration| registration.id != id);
        let removed = listeners.len() != before;
        if removed {
            tracing::trace!(listener = id.0, "listener removed");
        }
        removed
    }

    /// Check whether a listener is still registered.
    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.inner
            .listeners
            .borrow()
            .iter()
            .any(|registration| registration.id == id)
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: RawEventKind) -> usize {
        self.inner
            .listeners
            .borrow()
            .iter()
            .filter(|registration| registration.kind == kind)
            .count()
    }

    /// Number of listeners registered for any kind.
    pub fn total_listeners(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Dispatch `event` to the listeners registered for its kind.
    ///
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &RawEvent) -> usize {
        event.set_target(self);
        let kind = event.kind();
        let snapshot: Vec<(ListenerId, Handler)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .filter(|registration| registration.kind == kind)
            .map(|registration| (registration.id, Rc::clone(&registration.handler)))
            .collect();

        tracing::trace!(%kind, event = %event.id(), listeners = snapshot.len(), "dispatching raw event");

        let mut invoked = 0;
        for (id, handler) in snapshot {
            if self.has_listener(id) {
                handler(event);
                invoked += 1;
            }
        }
        invoked
    }

    /// Create a non-owning reference.
    pub fn downgrade(&self) -> WeakElement {
        WeakElement {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Check whether both handles refer to the same element.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("listeners", &self.total_listeners())
            .finish()
    }
}

impl fmt::Debug for WeakElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakElement")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}
