//! Browser event handling - converts web events to gestura raw events.
//!
//! Supports mouse and touch events.

use gestura_core::{
    Element, MouseButton, Point, RawEvent, RawEventInit, RawEventKind, TimerQueue, Touch,
    TouchId,
};
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, MouseEvent, TouchEvent};

/// Convert a web_sys MouseEvent to a raw event of `kind`.
pub fn mouse_event_to_raw(event: &MouseEvent, kind: RawEventKind) -> RawEvent {
    let position = Point::new(event.offset_x() as f32, event.offset_y() as f32);
    RawEvent::with_init(
        kind,
        RawEventInit {
            position,
            button: Some(MouseButton::from_index(event.button())),
            changed_touches: Vec::new(),
        },
    )
}

/// Convert a web_sys TouchEvent to a raw event of `kind`.
///
/// Positions are client coordinates minus `offset`.
pub fn touch_event_to_raw(event: &TouchEvent, kind: RawEventKind, offset: Point) -> RawEvent {
    let touches = event.changed_touches();
    let mut changed = Vec::with_capacity(touches.length() as usize);

    for i in 0..touches.length() {
        if let Some(touch) = touches.get(i) {
            let position = Point::new(touch.client_x() as f32, touch.client_y() as f32) - offset;
            changed.push(Touch::new(TouchId::new(touch.identifier()), position));
        }
    }

    RawEvent::touch(kind, changed)
}

/// Convert any DOM event the engine understands.
pub fn web_event_to_raw(event: &web_sys::Event) -> Option<RawEvent> {
    let kind = RawEventKind::from_name(&event.type_())?;
    if kind.is_mouse() {
        event
            .dyn_ref::<MouseEvent>()
            .map(|mouse| mouse_event_to_raw(mouse, kind))
    } else {
        event
            .dyn_ref::<TouchEvent>()
            .map(|touch| touch_event_to_raw(touch, kind, Point::ORIGIN))
    }
}

/// Forwards DOM events from an event target to an [`Element`].
///
/// Before each dispatch the clock is moved to the DOM event's timestamp, so
/// hold and delay timers resolve in the order the browser saw the input.
/// Dropping the bridge removes its DOM listeners.
pub struct DomBridge {
    target: EventTarget,
    listeners: Vec<(RawEventKind, Closure<dyn FnMut(web_sys::Event)>)>,
}

impl DomBridge {
    /// Listen for every raw event kind on `target`.
    pub fn new(target: &EventTarget, element: &Element, timers: &TimerQueue) -> Result<Self, JsValue> {
        let mut listeners = Vec::with_capacity(RawEventKind::ALL.len());
        for kind in RawEventKind::ALL {
            let element = element.clone();
            let timers = timers.clone();
            let closure: Closure<dyn FnMut(web_sys::Event)> = Closure::new(move |e: web_sys::Event| {
                let Some(raw) = web_event_to_raw(&e) else {
                    return;
                };
                let at = Duration::from_secs_f64(e.time_stamp().max(0.0) / 1000.0);
                if at > timers.now() {
                    timers.advance_to(at);
                }
                element.dispatch(&raw);
            });
            target.add_event_listener_with_callback(kind.name(), closure.as_ref().unchecked_ref())?;
            listeners.push((kind, closure));
        }
        tracing::debug!(listeners = listeners.len(), "dom bridge attached");
        Ok(Self {
            target: target.clone(),
            listeners,
        })
    }
}

impl Drop for DomBridge {
    fn drop(&mut self) {
        for (kind, closure) in &self.listeners {
            let _ = self
                .target
                .remove_event_listener_with_callback(kind.name(), closure.as_ref().unchecked_ref());
        }
    }
}
