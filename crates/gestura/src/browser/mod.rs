//! Browser bridge for wasm32 builds.
//!
//! Converts DOM mouse and touch events into [`RawEvent`](gestura_core::RawEvent)s
//! and forwards them to an [`Element`](gestura_core::Element).

#[cfg(target_arch = "wasm32")]
pub mod events;

#[cfg(target_arch = "wasm32")]
pub use events::{mouse_event_to_raw, touch_event_to_raw, web_event_to_raw, DomBridge};
