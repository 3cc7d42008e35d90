//! Active gesture sessions and the resources they own.
//!
//! A session is created by a gesture-starting raw event and lives until it
//! resolves or its attachment is torn down. Everything it registers (event
//! listeners on the target, a pending timer) is recorded in
//! [`SessionResources`] so that [`SessionResources::teardown`] can release
//! all of it on every exit path.
//!
//! A session's label names its slot, one per gesture kind and input path.
//! At most one session per slot is live: opening a session evicts and tears
//! down the one it replaces.

use crate::element::{Element, Handler, ListenerId, WeakElement};
use crate::event::RawEventKind;
use crate::timer::{TimerId, TimerQueue};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::time::Duration;

/// Identifier of a live session within its attachment cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session#{}", self.0)
    }
}

/// A transient recognizer state machine.
pub trait Session {
    /// Slot label, e.g. `"menu/touch"`.
    fn label(&self) -> &'static str;

    /// Listeners and timer owned by the session.
    fn resources(&mut self) -> &mut SessionResources;

    /// Release every listener and timer the session holds.
    fn teardown(&mut self) {
        self.resources().teardown();
    }
}

type SharedSession = Rc<RefCell<dyn Session>>;

#[derive(Default)]
struct SessionTableInner {
    next_id: u64,
    live: Vec<(SessionId, &'static str, SharedSession)>,
}

/// Live sessions of one attachment cycle.
///
/// The table holds the only strong reference to each session; listener and
/// timer closures reach their session through a `Weak`.
#[derive(Clone, Default)]
pub struct SessionTable {
    inner: Rc<RefCell<SessionTableInner>>,
}

/// Non-owning reference to a [`SessionTable`].
#[derive(Clone, Default)]
pub struct WeakSessionTable {
    inner: Weak<RefCell<SessionTableInner>>,
}

impl SessionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `session` and hand back a shared handle to it.
    pub fn open<S: Session + 'static>(&self, session: S) -> Rc<RefCell<S>> {
        let session = Rc::new(RefCell::new(session));
        let id = self.insert(session.clone());
        let mut state = session.borrow_mut();
        state.resources().set_id(id);
        tracing::debug!(session = %id, label = state.label(), "session opened");
        drop(state);
        session
    }

    /// Start tracking `session`, tearing down the live session in its slot.
    pub fn insert(&self, session: SharedSession) -> SessionId {
        let label = session.borrow().label();
        if let Some((evicted, previous)) = self.take_slot(label) {
            tracing::debug!(session = %evicted, label, "session replaced");
            previous.borrow_mut().teardown();
        }
        let mut inner = self.inner.borrow_mut();
        let id = SessionId(inner.next_id);
        inner.next_id += 1;
        inner.live.push((id, label, session));
        id
    }

    fn take_slot(&self, label: &str) -> Option<(SessionId, SharedSession)> {
        let mut inner = self.inner.borrow_mut();
        let index = inner.live.iter().position(|(_, slot, _)| *slot == label)?;
        let (id, _, session) = inner.live.remove(index);
        Some((id, session))
    }

    /// Id of the live session in slot `label`.
    pub fn live_in(&self, label: &str) -> Option<SessionId> {
        self.inner
            .borrow()
            .live
            .iter()
            .find(|(_, slot, _)| *slot == label)
            .map(|(id, _, _)| *id)
    }

    /// Stop tracking a session. Returns `false` if it was not live.
    pub fn remove(&self, id: SessionId) -> bool {
        // Drop the removed session after the borrow ends.
        let removed = {
            let mut inner = self.inner.borrow_mut();
            inner
                .live
                .iter()
                .position(|(live_id, _, _)| *live_id == id)
                .map(|index| inner.live.remove(index))
        };
        removed.is_some()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.inner.borrow().live.len()
    }

    /// Check if no session is live.
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().live.is_empty()
    }

    /// Tear down every live session.
    pub fn teardown_all(&self) -> usize {
        let live = std::mem::take(&mut self.inner.borrow_mut().live);
        let count = live.len();
        for (id, _, session) in live {
            let mut session = session.borrow_mut();
            tracing::debug!(session = %id, label = session.label(), "session torn down with attachment");
            session.teardown();
        }
        count
    }

    /// Create a non-owning reference.
    pub fn downgrade(&self) -> WeakSessionTable {
        WeakSessionTable {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl WeakSessionTable {
    fn remove(&self, id: SessionId) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| SessionTable { inner }.remove(id))
    }
}

impl fmt::Debug for SessionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTable")
            .field("live", &self.len())
            .finish()
    }
}

/// Listeners and timer owned by one session.
pub struct SessionResources {
    target: WeakElement,
    timers: TimerQueue,
    table: WeakSessionTable,
    id: Option<SessionId>,
    listeners: Vec<ListenerId>,
    timer: Option<TimerId>,
    torn_down: bool,
}

impl SessionResources {
    /// Resources for a session listening on `target`.
    pub fn new(target: &Element, timers: TimerQueue, table: &SessionTable) -> Self {
        Self {
            target: target.downgrade(),
            timers,
            table: table.downgrade(),
            id: None,
            listeners: Vec::new(),
            timer: None,
            torn_down: false,
        }
    }

    /// Record the id the session was registered under.
    pub fn set_id(&mut self, id: SessionId) {
        self.id = Some(id);
    }

    /// Session id, once registered.
    pub fn id(&self) -> Option<SessionId> {
        self.id
    }

    /// Add a listener on the target and remember it for teardown.
    pub fn listen(&mut self, kind: RawEventKind, handler: Handler) {
        if let Some(target) = self.target.upgrade() {
            self.listeners.push(target.add_listener(kind, handler));
        }
    }

    /// Start the session's timer, replacing any pending one.
    pub fn start_timer(&mut self, delay: Duration, callback: impl FnOnce() + 'static) {
        self.clear_timer();
        self.timer = Some(self.timers.set_timeout(delay, callback));
    }

    /// Forget the timer handle once its callback has run.
    pub fn timer_fired(&mut self) {
        self.timer = None;
    }

    /// Check whether the timer is still pending.
    pub fn timer_pending(&self) -> bool {
        self.timer.is_some()
    }

    fn clear_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            self.timers.clear_timeout(timer);
        }
    }

    /// Number of listeners currently held.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Check whether teardown already ran.
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Remove every listener, clear the timer and leave the session table.
    /// Idempotent.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.clear_timer();
        if let Some(target) = self.target.upgrade() {
            for listener in self.listeners.drain(..) {
                target.remove_listener(listener);
            }
        } else {
            self.listeners.clear();
        }
        if let Some(id) = self.id {
            self.table.remove(id);
        }
    }
}

impl fmt::Debug for SessionResources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionResources")
            .field("id", &self.id)
            .field("listeners", &self.listeners.len())
            .field("timer", &self.timer)
            .field("torn_down", &self.torn_down)
            .finish()
    }
}
