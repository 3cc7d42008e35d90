//! Raw input events fed into the recognizers.
//!
//! A [`RawEvent`] is a cheap handle: clones share one underlying event and
//! therefore one [`EventId`]. Consumption tracking relies on that identity,
//! never on field equality, so two separately created events with identical
//! contents are still two different events.

use crate::element::{Element, WeakElement};
use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_EVENT_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a raw event instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventId(pub u64);

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Raw input event names a recognizer can listen to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawEventKind {
    /// Primary button click
    Click,
    /// Double click
    DblClick,
    /// Mouse button pressed
    MouseDown,
    /// Mouse moved
    MouseMove,
    /// Mouse button released
    MouseUp,
    /// Touch started
    TouchStart,
    /// Touch moved
    TouchMove,
    /// Touch ended
    TouchEnd,
    /// Touch cancelled (e.g., palm rejection)
    TouchCancel,
}

impl RawEventKind {
    /// Every raw event kind.
    pub const ALL: [Self; 9] = [
        Self::Click,
        Self::DblClick,
        Self::MouseDown,
        Self::MouseMove,
        Self::MouseUp,
        Self::TouchStart,
        Self::TouchMove,
        Self::TouchEnd,
        Self::TouchCancel,
    ];

    /// DOM-style event name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::DblClick => "dblclick",
            Self::MouseDown => "mousedown",
            Self::MouseMove => "mousemove",
            Self::MouseUp => "mouseup",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
            Self::TouchCancel => "touchcancel",
        }
    }

    /// Look up a kind by its DOM-style name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }

    /// Check if this is a mouse event kind.
    #[must_use]
    pub const fn is_mouse(self) -> bool {
        matches!(
            self,
            Self::Click | Self::DblClick | Self::MouseDown | Self::MouseMove | Self::MouseUp
        )
    }

    /// Check if this is a touch event kind.
    #[must_use]
    pub const fn is_touch(self) -> bool {
        matches!(
            self,
            Self::TouchStart | Self::TouchMove | Self::TouchEnd | Self::TouchCancel
        )
    }
}

impl fmt::Display for RawEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button (index 0)
    Left,
    /// Middle mouse button (index 1)
    Middle,
    /// Right mouse button (index 2)
    Right,
    /// Additional button 1 (index 3)
    Button4,
    /// Additional button 2 (index 4 and above)
    Button5,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` index.
    #[must_use]
    pub const fn from_index(index: i16) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            3 => Self::Button4,
            _ => Self::Button5,
        }
    }

    /// DOM `MouseEvent.button` index.
    #[must_use]
    pub const fn index(self) -> i16 {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
            Self::Button4 => 3,
            Self::Button5 => 4,
        }
    }
}

/// Touch identifier for multi-touch tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct TouchId(pub i32);

impl TouchId {
    /// Create a new touch ID.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }
}

/// One entry of a touch event's changed-touches list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Touch {
    /// Touch identifier
    pub identifier: TouchId,
    /// Touch position
    pub position: Point,
}

impl Touch {
    /// Create a new touch.
    pub const fn new(identifier: TouchId, position: Point) -> Self {
        Self {
            identifier,
            position,
        }
    }
}

/// Optional payload of a raw event, mirroring a DOM event init dictionary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawEventInit {
    /// Pointer position
    pub position: Point,
    /// Button, for mouse events
    pub button: Option<MouseButton>,
    /// Touches that changed with this event, for touch events
    pub changed_touches: Vec<Touch>,
}

struct RawEventInner {
    id: EventId,
    kind: RawEventKind,
    init: RawEventInit,
    target: RefCell<Option<WeakElement>>,
}

/// A raw pointer or touch input event.
#[derive(Clone)]
pub struct RawEvent {
    inner: Rc<RawEventInner>,
}

/// Non-owning handle to a [`RawEvent`]; dead once every clone is dropped.
#[derive(Clone)]
pub(crate) struct WeakRawEvent {
    inner: Weak<RawEventInner>,
}

impl WeakRawEvent {
    /// Check whether the event can still be dispatched.
    pub(crate) fn is_live(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

impl RawEvent {
    /// Create an event of `kind` with the given payload.
    pub fn with_init(kind: RawEventKind, init: RawEventInit) -> Self {
        let id = EventId(NEXT_EVENT_ID.fetch_add(1, Ordering::Relaxed));
        Self {
            inner: Rc::new(RawEventInner {
                id,
                kind,
                init,
                target: RefCell::new(None),
            }),
        }
    }

    /// Create an event of `kind` with an empty payload.
    pub fn new(kind: RawEventKind) -> Self {
        Self::with_init(kind, RawEventInit::default())
    }

    /// Click at `position`.
    pub fn click(position: Point) -> Self {
        Self::mouse(RawEventKind::Click, MouseButton::Left, position)
    }

    /// Double click at `position`.
    pub fn dblclick(position: Point) -> Self {
        Self::mouse(RawEventKind::DblClick, MouseButton::Left, position)
    }

    /// Mouse button pressed at `position`.
    pub fn mouse_down(button: MouseButton, position: Point) -> Self {
        Self::mouse(RawEventKind::MouseDown, button, position)
    }

    /// Mouse moved to `position`.
    pub fn mouse_move(position: Point) -> Self {
        Self::with_init(
            RawEventKind::MouseMove,
            RawEventInit {
                position,
                ..RawEventInit::default()
            },
        )
    }

    /// Mouse button released at `position`.
    pub fn mouse_up(button: MouseButton, position: Point) -> Self {
        Self::mouse(RawEventKind::MouseUp, button, position)
    }

    /// Touch event of `kind` carrying `changed_touches`.
    ///
    /// The event position is the position of the first changed touch.
    pub fn touch(kind: RawEventKind, changed_touches: Vec<Touch>) -> Self {
        let position = changed_touches
            .first()
            .map_or(Point::ORIGIN, |touch| touch.position);
        Self::with_init(
            kind,
            RawEventInit {
                position,
                button: None,
                changed_touches,
            },
        )
    }

    /// Single-finger touch started.
    pub fn touch_start(id: TouchId, position: Point) -> Self {
        Self::touch(RawEventKind::TouchStart, vec![Touch::new(id, position)])
    }

    /// Single-finger touch moved.
    pub fn touch_move(id: TouchId, position: Point) -> Self {
        Self::touch(RawEventKind::TouchMove, vec![Touch::new(id, position)])
    }

    /// Single-finger touch ended.
    pub fn touch_end(id: TouchId, position: Point) -> Self {
        Self::touch(RawEventKind::TouchEnd, vec![Touch::new(id, position)])
    }

    /// Single-finger touch cancelled.
    pub fn touch_cancel(id: TouchId) -> Self {
        Self::touch(RawEventKind::TouchCancel, vec![Touch::new(id, Point::ORIGIN)])
    }

    fn mouse(kind: RawEventKind, button: MouseButton, position: Point) -> Self {
        Self::with_init(
            kind,
            RawEventInit {
                position,
                button: Some(button),
                changed_touches: Vec::new(),
            },
        )
    }

    /// Identity of this event instance.
    pub fn id(&self) -> EventId {
        self.inner.id
    }

    pub(crate) fn downgrade(&self) -> WeakRawEvent {
        WeakRawEvent {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Raw event kind.
    pub fn kind(&self) -> RawEventKind {
        self.inner.kind
    }

    /// Pointer position.
    pub fn position(&self) -> Point {
        self.inner.init.position
    }

    /// Offset of this event's position from `origin`'s.
    pub fn offset_from(&self, origin: &Self) -> Point {
        self.position() - origin.position()
    }

    /// Button, if this is a mouse event.
    pub fn button(&self) -> Option<MouseButton> {
        self.inner.init.button
    }

    /// Button index as a DOM `MouseEvent` reports it: left when unset.
    pub fn button_or_primary(&self) -> MouseButton {
        self.inner.init.button.unwrap_or(MouseButton::Left)
    }

    /// Touches that changed with this event.
    pub fn changed_touches(&self) -> &[Touch] {
        &self.inner.init.changed_touches
    }

    /// First changed touch, if any.
    pub fn first_touch(&self) -> Option<&Touch> {
        self.inner.init.changed_touches.first()
    }

    /// Check whether `id` is among the changed touches.
    pub fn has_changed_touch(&self, id: TouchId) -> bool {
        self.changed_touches()
            .iter()
            .any(|touch| touch.identifier == id)
    }

    /// Check whether both handles refer to the same event instance.
    pub fn is_same(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Element the event was last dispatched to.
    pub fn target(&self) -> Option<Element> {
        self.inner
            .target
            .borrow()
            .as_ref()
            .and_then(WeakElement::upgrade)
    }

    pub(crate) fn set_target(&self, target: &Element) {
        *self.inner.target.borrow_mut() = Some(target.downgrade());
    }
}

impl fmt::Debug for RawEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawEvent")
            .field("id", &self.inner.id)
            .field("kind", &self.inner.kind)
            .field("position", &self.inner.init.position)
            .field("button", &self.inner.init.button)
            .field("changed_touches", &self.inner.init.changed_touches)
            .finish()
    }
}
