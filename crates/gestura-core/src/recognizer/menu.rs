//! Context menu: right click, or a touch held past the hold time and released.

use crate::event::{MouseButton, RawEvent, RawEventKind};
use crate::session::{Session, SessionResources};
use crate::trigger::{Fire, TriggerContext};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub(super) fn on_mouse_down(context: &TriggerContext, event: &RawEvent) {
    if event.button_or_primary() == MouseButton::Right {
        context.fire.fire_default(event);
    }
}

/// Touch long-press: `idle → armed → resolved`.
struct HoldSession {
    resources: SessionResources,
    fire: Fire,
    start: RawEvent,
    can_fire: bool,
}

impl Session for HoldSession {
    fn label(&self) -> &'static str {
        "menu/touch"
    }

    fn resources(&mut self) -> &mut SessionResources {
        &mut self.resources
    }
}

pub(super) fn on_touch_start(context: &TriggerContext, event: &RawEvent) {
    let Some(target) = event.target() else {
        tracing::trace!(event = %event.id(), "touchstart without target, no menu session");
        return;
    };

    let session = context.sessions.open(HoldSession {
        resources: SessionResources::new(&target, context.timers.clone(), &context.sessions),
        fire: context.fire.clone(),
        start: event.clone(),
        can_fire: false,
    });
    let weak = Rc::downgrade(&session);
    let mut state = session.borrow_mut();

    let on_hold = weak.clone();
    state
        .resources
        .start_timer(context.config.touch_menu_hold_time(), move || {
            if let Some(session) = on_hold.upgrade() {
                let mut state = session.borrow_mut();
                state.can_fire = true;
                state.resources.timer_fired();
                tracing::trace!(session = ?state.resources.id(), "menu hold elapsed");
            }
        });

    let on_end = weak.clone();
    state.resources.listen(
        RawEventKind::TouchEnd,
        Rc::new(move |_: &RawEvent| release(&on_end)),
    );
    state.resources.listen(
        RawEventKind::TouchCancel,
        Rc::new(move |_: &RawEvent| cancel(&weak)),
    );
}

fn release(session: &Weak<RefCell<HoldSession>>) {
    let Some(session) = session.upgrade() else {
        return;
    };
    let mut state = session.borrow_mut();
    state.resources.teardown();
    let resolved = state
        .can_fire
        .then(|| (state.fire.clone(), state.start.clone()));
    drop(state);
    match resolved {
        Some((fire, start)) => {
            fire.fire_default(&start);
        }
        None => tracing::debug!("touch released before menu hold time"),
    }
}

fn cancel(session: &Weak<RefCell<HoldSession>>) {
    if let Some(session) = session.upgrade() {
        session.borrow_mut().resources.teardown();
        tracing::debug!("menu touch cancelled");
    }
}
