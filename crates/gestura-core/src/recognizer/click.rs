//! Click and double-click: stateless, fire on the raw event itself.

use crate::event::RawEvent;
use crate::trigger::TriggerContext;

pub(super) fn on_click(context: &TriggerContext, event: &RawEvent) {
    context.fire.fire_default(event);
}

pub(super) fn on_dblclick(context: &TriggerContext, event: &RawEvent) {
    context.fire.fire_default(event);
}
