//! Core gesture recognition engine for Gestura.
//!
//! This crate turns raw pointer and touch events into semantic gestures:
//! - Raw input: [`RawEvent`], [`Element`] listener registry, [`TimerQueue`] clock
//! - Gestures: [`GestureKind`] with its [`Phase`]s, consumer [`CallbackRegistry`]
//! - Recognition: per-kind recognizers bound through [`Fire`] and merged per
//!   raw event kind by [`HandlerMap`]
//! - Lifecycle: [`GestureEngine::attach`] returns an [`Attachment`] that owns
//!   one cycle's consumed-event set and live sessions
//!
//! ```
//! use gestura_core::{CallbackRegistry, Element, GestureEngine, Point, RawEvent};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let engine = GestureEngine::default();
//! let element = Element::new();
//! let clicks = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&clicks);
//! let registry = CallbackRegistry::new().on_click(move |_| counter.set(counter.get() + 1));
//! let _attachment = engine.attach(&element, &registry);
//!
//! element.dispatch(&RawEvent::click(Point::ORIGIN));
//! assert_eq!(clicks.get(), 1);
//! ```

mod callbacks;
mod config;
mod correlator;
mod element;
mod engine;
mod error;
mod event;
mod geometry;
mod gesture;
mod merge;
pub mod recognizer;
pub mod session;
mod timer;
mod trigger;

pub use callbacks::{Callback, CallbackRegistry, PhaseCallbacks};
pub use config::{GestureConfig, DEFAULT_TOUCH_DRAG_DELAY_MS, DEFAULT_TOUCH_MENU_HOLD_TIME_MS};
pub use correlator::ConsumedEventSet;
pub use element::{Element, Handler, ListenerId, WeakElement};
pub use engine::{Attachment, GestureEngine, GestureHandlers};
pub use error::{ConfigError, GestureError};
pub use event::{
    EventId, MouseButton, RawEvent, RawEventInit, RawEventKind, Touch, TouchId,
};
pub use geometry::Point;
pub use gesture::{GestureKind, Phase};
pub use merge::{merge_handlers, HandlerMap};
pub use recognizer::{definition, GestureDefinition};
pub use timer::{TimerId, TimerQueue};
pub use trigger::{bind_trigger, Fire, Recognizer, TriggerContext};
