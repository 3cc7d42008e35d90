//! Host-driven timer queue.
//!
//! Stands in for `setTimeout`/`clearTimeout`: the host owns the clock and
//! moves it forward with [`TimerQueue::advance`]. A timer fires once the
//! clock has moved strictly past its deadline, so an input arriving at
//! exactly the deadline is still handled before the timer.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

/// Handle of a scheduled timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

type TimerCallback = Box<dyn FnOnce()>;

#[derive(Default)]
struct TimerState {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, TimerId), TimerCallback>,
}

/// Single-threaded timer queue with a virtual monotonic clock.
#[derive(Clone, Default)]
pub struct TimerQueue {
    inner: Rc<RefCell<TimerState>>,
}

impl TimerQueue {
    /// Create a queue with the clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Number of timers waiting to fire.
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Deadline of the earliest pending timer.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.inner
            .borrow()
            .pending
            .keys()
            .next()
            .map(|(deadline, _)| *deadline)
    }

    /// Schedule `callback` to run after `delay`.
    pub fn set_timeout(&self, delay: Duration, callback: impl FnOnce() + 'static) -> TimerId {
        let mut state = self.inner.borrow_mut();
        let id = TimerId(state.next_id);
        state.next_id += 1;
        let deadline = state.now + delay;
        state.pending.insert((deadline, id), Box::new(callback));
        tracing::trace!(timer = %id, ?deadline, "timer scheduled");
        id
    }

    /// Cancel a pending timer. Returns `false` if it already fired or was
    /// cleared before.
    pub fn clear_timeout(&self, id: TimerId) -> bool {
        let mut state = self.inner.borrow_mut();
        let before = state.pending.len();
        state.pending.retain(|(_, pending_id), _| *pending_id != id);
        let cleared = state.pending.len() != before;
        if cleared {
            tracing::trace!(timer = %id, "timer cleared");
        }
        cleared
    }

    /// Move the clock forward by `by`, firing every timer that becomes due.
    ///
    /// Returns the number of timers fired.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        self.advance_to(target)
    }

    /// Move the clock forward to `target`, firing every timer that becomes
    /// due in deadline order. Timers scheduled by a firing callback also run
    /// if they fall due before `target`.
    pub fn advance_to(&self, target: Duration) -> usize {
        let mut fired = 0;
        loop {
            let next = {
                let mut state = self.inner.borrow_mut();
                let due = state
                    .pending
                    .keys()
                    .next()
                    .copied()
                    .filter(|(deadline, _)| *deadline < target);
                due.and_then(|key| {
                    state.now = state.now.max(key.0);
                    state.pending.remove(&key).map(|callback| (key.1, callback))
                })
            };
            let Some((id, callback)) = next else {
                break;
            };
            tracing::trace!(timer = %id, "timer fired");
            callback();
            fired += 1;
        }

        let mut state = self.inner.borrow_mut();
        if target > state.now {
            state.now = target;
        }
        fired
    }
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.borrow();
        f.debug_struct("TimerQueue")
            .field("now", &state.now)
            .field("pending", &state.pending.len())
            .finish()
    }
}
