//! Gesture recognizers and the static table mapping raw events to them.
//!
//! Each gesture kind has a [`GestureDefinition`]: the raw event kinds it
//! listens to on the attached element, each paired with the recognizer that
//! handles it. Recognizers that need more than one raw event open a session
//! (see [`crate::session`]) that registers further listeners on the event's
//! target and releases them when the gesture resolves.

mod click;
mod drag;
mod menu;

use crate::event::RawEventKind;
use crate::gesture::GestureKind;
use crate::trigger::Recognizer;
use std::fmt;

/// Raw event triggers of one gesture kind.
#[derive(Clone, Copy)]
pub struct GestureDefinition {
    /// Gesture kind
    pub kind: GestureKind,
    /// Raw event kind to recognizer, in attachment order
    pub triggers: &'static [(RawEventKind, Recognizer)],
}

static CLICK: GestureDefinition = GestureDefinition {
    kind: GestureKind::Click,
    triggers: &[(RawEventKind::Click, click::on_click as Recognizer)],
};

static DBLCLICK: GestureDefinition = GestureDefinition {
    kind: GestureKind::Dblclick,
    triggers: &[(RawEventKind::DblClick, click::on_dblclick as Recognizer)],
};

static MENU: GestureDefinition = GestureDefinition {
    kind: GestureKind::Menu,
    triggers: &[
        (RawEventKind::MouseDown, menu::on_mouse_down),
        (RawEventKind::TouchStart, menu::on_touch_start),
    ],
};

static DRAG: GestureDefinition = GestureDefinition {
    kind: GestureKind::Drag,
    triggers: &[
        (RawEventKind::MouseDown, drag::on_mouse_down),
        (RawEventKind::TouchStart, drag::on_touch_start),
    ],
};

/// Definition of `kind`.
pub fn definition(kind: GestureKind) -> &'static GestureDefinition {
    match kind {
        GestureKind::Click => &CLICK,
        GestureKind::Dblclick => &DBLCLICK,
        GestureKind::Menu => &MENU,
        GestureKind::Drag => &DRAG,
    }
}

impl GestureDefinition {
    /// Raw event kinds this gesture listens to on the attached element.
    pub fn raw_kinds(&self) -> impl Iterator<Item = RawEventKind> + '_ {
        self.triggers.iter().map(|(kind, _)| *kind)
    }
}

impl fmt::Debug for GestureDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GestureDefinition")
            .field("kind", &self.kind)
            .field("triggers", &self.raw_kinds().collect::<Vec<_>>())
            .finish()
    }
}
