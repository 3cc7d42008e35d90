//! Drag: mouse and touch paths, both opening a session on press.

use crate::event::{MouseButton, RawEvent, RawEventKind, TouchId};
use crate::gesture::Phase;
use crate::session::{Session, SessionResources};
use crate::trigger::{Fire, TriggerContext};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Mouse drag: `idle → pressed → dragging → ended`.
struct MouseDrag {
    resources: SessionResources,
    fire: Fire,
    start: RawEvent,
    started: bool,
}

impl Session for MouseDrag {
    fn label(&self) -> &'static str {
        "drag/mouse"
    }

    fn resources(&mut self) -> &mut SessionResources {
        &mut self.resources
    }
}

pub(super) fn on_mouse_down(context: &TriggerContext, event: &RawEvent) {
    if event.button_or_primary() != MouseButton::Left {
        return;
    }
    let Some(target) = event.target() else {
        tracing::trace!(event = %event.id(), "mousedown without target, no drag session");
        return;
    };

    let session = context.sessions.open(MouseDrag {
        resources: SessionResources::new(&target, context.timers.clone(), &context.sessions),
        fire: context.fire.clone(),
        start: event.clone(),
        started: false,
    });
    let weak = Rc::downgrade(&session);
    let mut state = session.borrow_mut();

    let on_move = weak.clone();
    state.resources.listen(
        RawEventKind::MouseMove,
        Rc::new(move |event: &RawEvent| mouse_move(&on_move, event)),
    );
    state.resources.listen(
        RawEventKind::MouseUp,
        Rc::new(move |event: &RawEvent| mouse_up(&weak, event)),
    );
}

fn mouse_move(session: &Weak<RefCell<MouseDrag>>, event: &RawEvent) {
    let Some(session) = session.upgrade() else {
        return;
    };
    let mut state = session.borrow_mut();
    let first = !state.started;
    state.started = true;
    let fire = state.fire.clone();
    let start = first.then(|| state.start.clone());
    drop(state);

    if let Some(start) = start {
        fire.fire(&start, Phase::Start);
    }
    fire.fire(event, Phase::Move);
}

fn mouse_up(session: &Weak<RefCell<MouseDrag>>, event: &RawEvent) {
    let Some(session) = session.upgrade() else {
        return;
    };
    let mut state = session.borrow_mut();
    state.resources.teardown();
    let fire = state.fire.clone();
    drop(state);

    fire.fire(event, Phase::End);
}

/// Touch drag: `idle → waiting → dragging → ended`.
struct TouchDrag {
    resources: SessionResources,
    fire: Fire,
    start: RawEvent,
    /// Identifier of the first changed touch of the start event.
    touch: Option<TouchId>,
    eligible: bool,
    started: bool,
}

impl Session for TouchDrag {
    fn label(&self) -> &'static str {
        "drag/touch"
    }

    fn resources(&mut self) -> &mut SessionResources {
        &mut self.resources
    }
}

impl TouchDrag {
    fn follows(&self, event: &RawEvent) -> bool {
        self.touch.map_or(true, |id| event.has_changed_touch(id))
    }
}

pub(super) fn on_touch_start(context: &TriggerContext, event: &RawEvent) {
    let Some(target) = event.target() else {
        tracing::trace!(event = %event.id(), "touchstart without target, no drag session");
        return;
    };

    let session = context.sessions.open(TouchDrag {
        resources: SessionResources::new(&target, context.timers.clone(), &context.sessions),
        fire: context.fire.clone(),
        start: event.clone(),
        touch: event.first_touch().map(|touch| touch.identifier),
        eligible: false,
        started: false,
    });
    let weak = Rc::downgrade(&session);
    let mut state = session.borrow_mut();

    let on_delay = weak.clone();
    state
        .resources
        .start_timer(context.config.touch_drag_delay(), move || {
            delay_elapsed(&on_delay);
        });

    let on_end = weak.clone();
    state.resources.listen(
        RawEventKind::TouchEnd,
        Rc::new(move |event: &RawEvent| touch_end(&on_end, event)),
    );
    state.resources.listen(
        RawEventKind::TouchCancel,
        Rc::new(move |event: &RawEvent| touch_end(&weak, event)),
    );
}

fn delay_elapsed(session: &Weak<RefCell<TouchDrag>>) {
    let Some(strong) = session.upgrade() else {
        return;
    };
    let mut state = strong.borrow_mut();
    state.resources.timer_fired();
    state.eligible = true;
    let on_move = session.clone();
    state.resources.listen(
        RawEventKind::TouchMove,
        Rc::new(move |event: &RawEvent| touch_move(&on_move, event)),
    );
    tracing::trace!(session = ?state.resources.id(), "touch drag eligible");
}

fn touch_move(session: &Weak<RefCell<TouchDrag>>, event: &RawEvent) {
    let Some(session) = session.upgrade() else {
        return;
    };
    let mut state = session.borrow_mut();
    if !state.eligible || !state.follows(event) {
        return;
    }
    let first = !state.started;
    state.started = true;
    let fire = state.fire.clone();
    let start = first.then(|| state.start.clone());
    drop(state);

    if let Some(start) = start {
        fire.fire(&start, Phase::Start);
    }
    fire.fire(event, Phase::Move);
}

fn touch_end(session: &Weak<RefCell<TouchDrag>>, event: &RawEvent) {
    let Some(session) = session.upgrade() else {
        return;
    };
    let mut state = session.borrow_mut();
    let started = state.started;
    state.resources.teardown();
    let fire = state.fire.clone();
    drop(state);

    if started {
        fire.fire(event, Phase::End);
    } else {
        tracing::debug!(event = %event.id(), "touch released before drag started");
    }
}
