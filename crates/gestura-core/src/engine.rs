//! Gesture engine: binds a callback registry to raw event handlers and
//! attaches them to an element for one attachment cycle.

use crate::callbacks::CallbackRegistry;
use crate::config::GestureConfig;
use crate::correlator::ConsumedEventSet;
use crate::element::{Element, Handler, ListenerId, WeakElement};
use crate::event::RawEventKind;
use crate::merge::HandlerMap;
use crate::recognizer::definition;
use crate::session::SessionTable;
use crate::timer::TimerQueue;
use crate::trigger::{bind_trigger, Fire, TriggerContext};
use std::fmt;
use std::rc::Rc;

/// Gesture recognition engine.
///
/// Holds the configuration and the clock shared by every attachment cycle.
/// Each call to [`GestureEngine::bind`] or [`GestureEngine::attach`] starts a
/// fresh cycle with its own consumed-event set and session table.
#[derive(Debug, Clone, Default)]
pub struct GestureEngine {
    config: GestureConfig,
    timers: TimerQueue,
}

impl GestureEngine {
    /// Create an engine with its own clock.
    pub fn new(config: GestureConfig) -> Self {
        Self::with_timers(config, TimerQueue::new())
    }

    /// Create an engine driven by an existing clock.
    pub fn with_timers(config: GestureConfig, timers: TimerQueue) -> Self {
        Self { config, timers }
    }

    /// Engine configuration.
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Clock used for hold and delay timers.
    pub fn timers(&self) -> &TimerQueue {
        &self.timers
    }

    /// Bind every gesture kind in `registry` to its recognizers.
    ///
    /// Returns one merged handler per raw event kind. Handlers of different
    /// gesture kinds on the same raw kind run in registration order.
    pub fn bind(&self, registry: &CallbackRegistry) -> GestureHandlers {
        let consumed = ConsumedEventSet::new();
        let sessions = SessionTable::new();
        let mut handlers = HandlerMap::new();

        for (kind, callbacks) in registry.iter() {
            let context = Rc::new(TriggerContext {
                fire: Fire::new(kind, callbacks.clone(), consumed.clone()),
                config: self.config.clone(),
                timers: self.timers.clone(),
                sessions: sessions.clone(),
            });
            let mut bound = HandlerMap::new();
            for (raw_kind, recognizer) in definition(kind).triggers {
                bound.insert(*raw_kind, bind_trigger(*recognizer, Rc::clone(&context)));
            }
            handlers.merge(bound);
        }

        tracing::debug!(
            gestures = registry.len(),
            raw_kinds = handlers.len(),
            "gesture handlers bound"
        );
        GestureHandlers {
            handlers,
            consumed,
            sessions,
        }
    }

    /// Bind `registry` and attach the merged handlers to `element`.
    pub fn attach(&self, element: &Element, registry: &CallbackRegistry) -> Attachment {
        self.bind(registry).attach(element)
    }
}

/// Handlers bound for one attachment cycle, not yet attached.
pub struct GestureHandlers {
    handlers: HandlerMap,
    consumed: ConsumedEventSet,
    sessions: SessionTable,
}

impl GestureHandlers {
    /// Merged handler for `kind`.
    pub fn get(&self, kind: RawEventKind) -> Option<Handler> {
        self.handlers.get(kind)
    }

    /// Raw event kinds with a handler.
    pub fn kinds(&self) -> impl Iterator<Item = RawEventKind> + '_ {
        self.handlers.kinds()
    }

    /// Unmerged handlers grouped by raw event kind.
    pub fn handler_map(&self) -> &HandlerMap {
        &self.handlers
    }

    /// Consumed-event set of this cycle.
    pub fn consumed(&self) -> &ConsumedEventSet {
        &self.consumed
    }

    /// Register the merged handlers on `element`.
    pub fn attach(self, element: &Element) -> Attachment {
        let listeners = self
            .handlers
            .into_merged()
            .into_iter()
            .map(|(kind, handler)| element.add_listener(kind, handler))
            .collect::<Vec<_>>();
        tracing::debug!(listeners = listeners.len(), "gesture handlers attached");
        Attachment {
            element: element.downgrade(),
            listeners,
            consumed: self.consumed,
            sessions: self.sessions,
        }
    }
}

impl fmt::Debug for GestureHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureHandlers")
            .field("handlers", &self.handlers)
            .field("consumed", &self.consumed)
            .field("sessions", &self.sessions)
            .finish()
    }
}

/// One attachment cycle on an element.
///
/// Dropping the attachment detaches it: its listeners are removed and every
/// live session is torn down, clearing their listeners and timers.
#[must_use = "dropping an Attachment detaches its handlers"]
pub struct Attachment {
    element: WeakElement,
    listeners: Vec<ListenerId>,
    consumed: ConsumedEventSet,
    sessions: SessionTable,
}

impl Attachment {
    /// Remove the handlers and tear down live sessions. Idempotent.
    pub fn detach(&mut self) {
        if let Some(element) = self.element.upgrade() {
            for listener in self.listeners.drain(..) {
                element.remove_listener(listener);
            }
        } else {
            self.listeners.clear();
        }
        let torn_down = self.sessions.teardown_all();
        if torn_down > 0 {
            tracing::debug!(sessions = torn_down, "attachment detached with live sessions");
        }
    }

    /// Check whether the handlers are still registered.
    pub fn is_attached(&self) -> bool {
        !self.listeners.is_empty()
    }

    /// Number of sessions awaiting further input.
    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Consumed-event set of this cycle.
    pub fn consumed(&self) -> &ConsumedEventSet {
        &self.consumed
    }
}

impl Drop for Attachment {
    fn drop(&mut self) {
        self.detach();
    }
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("listeners", &self.listeners.len())
            .field("sessions", &self.sessions.len())
            .field("consumed", &self.consumed.len())
            .finish()
    }
}
