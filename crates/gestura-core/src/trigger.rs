//! Trigger binder: ties a recognizer to a consumer's phase callbacks.

use crate::callbacks::PhaseCallbacks;
use crate::config::GestureConfig;
use crate::correlator::ConsumedEventSet;
use crate::element::Handler;
use crate::event::RawEvent;
use crate::gesture::{GestureKind, Phase};
use crate::session::SessionTable;
use crate::timer::TimerQueue;
use std::fmt;
use std::rc::Rc;

/// Fire primitive of one bound gesture kind.
///
/// Cheap to clone; sessions keep a clone to fire phases from listeners and
/// timers registered after the triggering event.
#[derive(Clone)]
pub struct Fire {
    kind: GestureKind,
    callbacks: PhaseCallbacks,
    consumed: ConsumedEventSet,
}

impl Fire {
    /// Bind `callbacks` of `kind` to the cycle's consumed set.
    pub fn new(kind: GestureKind, callbacks: PhaseCallbacks, consumed: ConsumedEventSet) -> Self {
        Self {
            kind,
            callbacks,
            consumed,
        }
    }

    /// Gesture kind this primitive fires for.
    pub fn kind(&self) -> GestureKind {
        self.kind
    }

    /// Fire `phase` with `event`.
    ///
    /// The event is consumed whether or not a callback is registered for the
    /// phase. Returns `false` if the event had already been consumed.
    pub fn fire(&self, event: &RawEvent, phase: Phase) -> bool {
        if !self.consumed.try_consume(event) {
            tracing::trace!(gesture = %self.kind, %phase, event = %event.id(), "event already consumed");
            return false;
        }
        tracing::debug!(gesture = %self.kind, %phase, event = %event.id(), "gesture recognized");
        if let Some(callback) = self.callbacks.get(phase) {
            callback(event);
        }
        true
    }

    /// Fire the `default` phase.
    pub fn fire_default(&self, event: &RawEvent) -> bool {
        self.fire(event, Phase::Default)
    }
}

impl fmt::Debug for Fire {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fire")
            .field("kind", &self.kind)
            .field("callbacks", &self.callbacks)
            .finish()
    }
}

/// Everything a recognizer needs while handling a raw event.
#[derive(Debug, Clone)]
pub struct TriggerContext {
    /// Fire primitive for the bound gesture kind
    pub fire: Fire,
    /// Engine configuration
    pub config: GestureConfig,
    /// Clock used for hold and delay timers
    pub timers: TimerQueue,
    /// Sessions of the current attachment cycle
    pub sessions: SessionTable,
}

/// A recognizer entry point for one raw event kind.
pub type Recognizer = fn(&TriggerContext, &RawEvent);

/// Bind `recognizer` to `context`, producing a handler ready to attach.
pub fn bind_trigger(recognizer: Recognizer, context: Rc<TriggerContext>) -> Handler {
    Rc::new(move |event: &RawEvent| recognizer(&context, event))
}
