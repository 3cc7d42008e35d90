//! Consumer callback registry: gesture kind → phase → callback.

use crate::error::GestureError;
use crate::event::RawEvent;
use crate::gesture::{GestureKind, Phase};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

/// A consumer callback, invoked with the raw event that completed a phase.
pub type Callback = Rc<dyn Fn(&RawEvent)>;

/// Callbacks of one gesture kind, keyed by phase.
#[derive(Clone, Default)]
pub struct PhaseCallbacks {
    callbacks: BTreeMap<Phase, Callback>,
}

impl PhaseCallbacks {
    /// Callback registered for `phase`.
    pub fn get(&self, phase: Phase) -> Option<&Callback> {
        self.callbacks.get(&phase)
    }

    /// Phases with a registered callback.
    pub fn phases(&self) -> impl Iterator<Item = Phase> + '_ {
        self.callbacks.keys().copied()
    }

    /// Number of registered callbacks.
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Check if no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl fmt::Debug for PhaseCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.callbacks.keys()).finish()
    }
}

/// Per-attachment registry of consumer callbacks.
///
/// Gesture kinds keep the order in which they were first registered; their
/// handlers are merged onto shared raw events in that order.
#[derive(Clone, Default)]
pub struct CallbackRegistry {
    gestures: Vec<(GestureKind, PhaseCallbacks)>,
}

impl CallbackRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for `phase` of `kind`, replacing any previous one.
    pub fn on(
        &mut self,
        kind: GestureKind,
        phase: Phase,
        callback: impl Fn(&RawEvent) + 'static,
    ) -> Result<(), GestureError> {
        self.insert(kind, phase, Rc::new(callback))
    }

    /// Register an already shared callback.
    pub fn insert(
        &mut self,
        kind: GestureKind,
        phase: Phase,
        callback: Callback,
    ) -> Result<(), GestureError> {
        if !kind.emits(phase) {
            return Err(GestureError::PhaseNotSupported { kind, phase });
        }
        let index = match self.gestures.iter().position(|(existing, _)| *existing == kind) {
            Some(index) => index,
            None => {
                self.gestures.push((kind, PhaseCallbacks::default()));
                self.gestures.len() - 1
            }
        };
        self.gestures[index].1.callbacks.insert(phase, callback);
        Ok(())
    }

    /// Register by gesture and phase name, e.g. `("drag", "Start")`.
    pub fn on_named(
        &mut self,
        gesture: &str,
        phase: &str,
        callback: impl Fn(&RawEvent) + 'static,
    ) -> Result<(), GestureError> {
        let kind: GestureKind = gesture.parse()?;
        let phase: Phase = phase.parse()?;
        self.on(kind, phase, callback)
    }

    /// Builder: click callback.
    pub fn on_click(self, callback: impl Fn(&RawEvent) + 'static) -> Self {
        self.with(GestureKind::Click, Phase::Default, callback)
    }

    /// Builder: double-click callback.
    pub fn on_dblclick(self, callback: impl Fn(&RawEvent) + 'static) -> Self {
        self.with(GestureKind::Dblclick, Phase::Default, callback)
    }

    /// Builder: context menu callback.
    pub fn on_menu(self, callback: impl Fn(&RawEvent) + 'static) -> Self {
        self.with(GestureKind::Menu, Phase::Default, callback)
    }

    /// Builder: drag start callback.
    pub fn on_drag_start(self, callback: impl Fn(&RawEvent) + 'static) -> Self {
        self.with(GestureKind::Drag, Phase::Start, callback)
    }

    /// Builder: drag move callback.
    pub fn on_drag_move(self, callback: impl Fn(&RawEvent) + 'static) -> Self {
        self.with(GestureKind::Drag, Phase::Move, callback)
    }

    /// Builder: drag end callback.
    pub fn on_drag_end(self, callback: impl Fn(&RawEvent) + 'static) -> Self {
        self.with(GestureKind::Drag, Phase::End, callback)
    }

    // Only called with phases the kind emits.
    fn with(mut self, kind: GestureKind, phase: Phase, callback: impl Fn(&RawEvent) + 'static) -> Self {
        if let Err(err) = self.on(kind, phase, callback) {
            tracing::warn!(%err, "callback rejected");
        }
        self
    }

    /// Callbacks registered for `kind`.
    pub fn get(&self, kind: GestureKind) -> Option<&PhaseCallbacks> {
        self.gestures
            .iter()
            .find(|(existing, _)| *existing == kind)
            .map(|(_, callbacks)| callbacks)
    }

    /// Registered gesture kinds with their callbacks, in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (GestureKind, &PhaseCallbacks)> + '_ {
        self.gestures.iter().map(|(kind, callbacks)| (*kind, callbacks))
    }

    /// Number of gesture kinds with at least one callback.
    pub fn len(&self) -> usize {
        self.gestures.len()
    }

    /// Check if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.gestures.is_empty()
    }
}

impl fmt::Debug for CallbackRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.gestures.iter().map(|(kind, callbacks)| (kind, callbacks)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use std::cell::Cell;

    #[test]
    fn test_registration_order_preserved() {
        let registry = CallbackRegistry::new()
            .on_drag_start(|_| {})
            .on_menu(|_| {})
            .on_drag_end(|_| {});

        let kinds: Vec<GestureKind> = registry.iter().map(|(kind, _)| kind).collect();
        assert_eq!(kinds, vec![GestureKind::Drag, GestureKind::Menu]);
        let drag = registry.get(GestureKind::Drag).unwrap();
        assert_eq!(drag.phases().collect::<Vec<_>>(), vec![Phase::Start, Phase::End]);
    }

    #[test]
    fn test_rejects_foreign_phase() {
        let mut registry = CallbackRegistry::new();
        let result = registry.on(GestureKind::Click, Phase::Start, |_| {});
        assert_eq!(
            result,
            Err(GestureError::PhaseNotSupported {
                kind: GestureKind::Click,
                phase: Phase::Start,
            })
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_on_named_is_case_insensitive() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let mut registry = CallbackRegistry::new();
        registry
            .on_named("Drag", "MOVE", move |_| counter.set(counter.get() + 1))
            .unwrap();

        let callback = registry.get(GestureKind::Drag).unwrap().get(Phase::Move).unwrap();
        callback(&RawEvent::mouse_move(Point::ORIGIN));
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_replaces_existing_phase() {
        let which = Rc::new(Cell::new(0));
        let first = Rc::clone(&which);
        let second = Rc::clone(&which);
        let registry = CallbackRegistry::new()
            .on_click(move |_| first.set(1))
            .on_click(move |_| second.set(2));

        let callbacks = registry.get(GestureKind::Click).unwrap();
        assert_eq!(callbacks.len(), 1);
        callbacks.get(Phase::Default).unwrap()(&RawEvent::click(Point::ORIGIN));
        assert_eq!(which.get(), 2);
    }
}
