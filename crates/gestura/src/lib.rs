//! Gestura: click, double-click, menu and drag gestures for UI elements.
//!
//! Re-exports the [`gestura_core`] engine and adds the composition layer:
//! - [`GestureProps`]: named props split into gesture callbacks and
//!   passthrough props (`onClick`, `onMenu`, `onDragStart`, ...)
//! - [`GestureHost`]: re-attaches handlers on every render cycle
//! - `browser` (wasm32): forwards DOM mouse and touch events to an element
//!
//! ```
//! use gestura::{GestureConfig, GestureHost, GestureProps, Point, RawEvent};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let mut host = GestureHost::with_config(GestureConfig::default());
//! let clicks = Rc::new(Cell::new(0));
//! let counter = Rc::clone(&clicks);
//! let props = GestureProps::new()
//!     .value("testProp", "hello")
//!     .callback("onClick", move |_| counter.set(counter.get() + 1));
//!
//! let passthrough = host.render(props);
//! assert_eq!(passthrough.get_value("testProp"), Some(&"hello"));
//!
//! host.element().dispatch(&RawEvent::click(Point::ORIGIN));
//! assert_eq!(clicks.get(), 1);
//! ```

pub use gestura_core::*;

pub mod browser;
mod host;
mod props;

pub use host::GestureHost;
pub use props::{parse_handler_name, split_handler_name, GestureProps, Prop};
