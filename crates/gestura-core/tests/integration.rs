//! Integration tests for gestura-core.
//!
//! These tests drive an attached engine through raw event sequences and the
//! virtual clock, end-to-end.

use gestura_core::{
    Attachment, CallbackRegistry, Element, GestureConfig, GestureEngine, MouseButton, Point,
    RawEvent, RawEventKind, TouchId,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

const HOLD: Duration = Duration::from_millis(600);
const DELAY: Duration = Duration::from_millis(500);
const EPSILON: Duration = Duration::from_millis(1);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Records callback invocations as `(label, event)` pairs.
#[derive(Clone, Default)]
struct Calls {
    log: Rc<RefCell<Vec<(&'static str, RawEvent)>>>,
}

impl Calls {
    fn record(&self, label: &'static str) -> impl Fn(&RawEvent) + 'static {
        let log = Rc::clone(&self.log);
        move |event: &RawEvent| log.borrow_mut().push((label, event.clone()))
    }

    fn count(&self, label: &str) -> usize {
        self.log.borrow().iter().filter(|(l, _)| *l == label).count()
    }

    fn total(&self) -> usize {
        self.log.borrow().len()
    }

    fn labels(&self) -> Vec<&'static str> {
        self.log.borrow().iter().map(|(label, _)| *label).collect()
    }

    fn event(&self, index: usize) -> RawEvent {
        self.log.borrow()[index].1.clone()
    }
}

struct Fixture {
    engine: GestureEngine,
    element: Element,
    attachment: Attachment,
}

impl Fixture {
    fn new(registry: &CallbackRegistry) -> Self {
        init_tracing();
        let engine = GestureEngine::default();
        let element = Element::new();
        let attachment = engine.attach(&element, registry);
        Self {
            engine,
            element,
            attachment,
        }
    }

    fn send(&self, event: &RawEvent) {
        self.element.dispatch(event);
    }

    fn wait(&self, by: Duration) {
        self.engine.timers().advance(by);
    }

    fn touch_start(&self) -> RawEvent {
        let event = RawEvent::touch_start(TouchId::new(1), Point::ORIGIN);
        self.send(&event);
        event
    }

    fn touch_move(&self) -> RawEvent {
        let event = RawEvent::touch_move(TouchId::new(1), Point::new(5.0, 5.0));
        self.send(&event);
        event
    }

    fn touch_end(&self) -> RawEvent {
        let event = RawEvent::touch_end(TouchId::new(1), Point::new(5.0, 5.0));
        self.send(&event);
        event
    }

    fn touch_cancel(&self) {
        self.send(&RawEvent::touch_cancel(TouchId::new(1)));
    }

    fn assert_released(&self) {
        assert_eq!(self.attachment.active_sessions(), 0, "sessions left open");
        assert_eq!(self.engine.timers().pending(), 0, "timers left pending");
    }
}

// =============================================================================
// Click / Double-click
// =============================================================================

#[test]
fn test_click_fires_once_with_event() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_click(calls.record("click")));

    let click = RawEvent::click(Point::new(10.0, 20.0));
    fixture.send(&click);

    assert_eq!(calls.total(), 1);
    assert!(calls.event(0).is_same(&click));
}

#[test]
fn test_dblclick_fires_once() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_dblclick(calls.record("dblclick")));

    fixture.send(&RawEvent::dblclick(Point::ORIGIN));
    fixture.send(&RawEvent::click(Point::ORIGIN));

    assert_eq!(calls.count("dblclick"), 1);
    assert_eq!(calls.total(), 1);
}

#[test]
fn test_same_event_dispatched_twice_fires_once() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_click(calls.record("click")));

    let click = RawEvent::click(Point::ORIGIN);
    fixture.send(&click);
    fixture.send(&click);
    fixture.send(&RawEvent::click(Point::ORIGIN));

    assert_eq!(calls.total(), 2);
}

// =============================================================================
// Menu
// =============================================================================

#[test]
fn test_menu_right_click() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_menu(calls.record("menu")));

    fixture.send(&RawEvent::mouse_down(MouseButton::Right, Point::ORIGIN));
    fixture.send(&RawEvent::mouse_down(MouseButton::Left, Point::ORIGIN));
    fixture.send(&RawEvent::mouse_down(MouseButton::Middle, Point::ORIGIN));

    assert_eq!(calls.count("menu"), 1);
    fixture.assert_released();
}

#[test]
fn test_menu_hold_and_release_fires_with_start_event() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_menu(calls.record("menu")));

    let start = fixture.touch_start();
    fixture.wait(HOLD + EPSILON);
    fixture.touch_end();

    assert_eq!(calls.count("menu"), 1);
    assert!(calls.event(0).is_same(&start));
    fixture.assert_released();
    assert_eq!(fixture.element.listener_count(RawEventKind::TouchEnd), 0);
}

#[test]
fn test_menu_short_tap_does_not_fire() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_menu(calls.record("menu")));

    fixture.touch_start();
    fixture.wait(Duration::from_millis(100));
    fixture.touch_end();

    assert_eq!(calls.total(), 0);
    fixture.assert_released();
}

#[test]
fn test_menu_release_exactly_at_hold_time_does_not_fire() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_menu(calls.record("menu")));

    fixture.touch_start();
    fixture.wait(HOLD);
    fixture.touch_end();

    assert_eq!(calls.total(), 0);
    fixture.assert_released();
}

#[test]
fn test_menu_hold_without_release_does_not_fire() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_menu(calls.record("menu")));

    fixture.touch_start();
    fixture.wait(HOLD * 10);

    assert_eq!(calls.total(), 0);
    assert_eq!(fixture.attachment.active_sessions(), 1);
}

#[test]
fn test_menu_cancel_never_fires() {
    for wait in [Duration::ZERO, Duration::from_millis(100), HOLD + EPSILON] {
        let calls = Calls::default();
        let fixture = Fixture::new(&CallbackRegistry::new().on_menu(calls.record("menu")));

        fixture.touch_start();
        fixture.wait(wait);
        fixture.touch_cancel();
        fixture.touch_end();

        assert_eq!(calls.total(), 0, "fired after cancel at {wait:?}");
        fixture.assert_released();
    }
}

#[test]
fn test_menu_touch_end_without_start_is_noop() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_menu(calls.record("menu")));

    fixture.touch_end();
    fixture.touch_cancel();

    assert_eq!(calls.total(), 0);
    fixture.assert_released();
}

#[test]
fn test_menu_second_touch_start_replaces_session() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_menu(calls.record("menu")));

    fixture.touch_start();
    let second = RawEvent::touch_start(TouchId::new(2), Point::ORIGIN);
    fixture.send(&second);
    assert_eq!(fixture.attachment.active_sessions(), 1);
    assert_eq!(fixture.engine.timers().pending(), 1);

    fixture.wait(HOLD + EPSILON);
    fixture.touch_end();

    assert_eq!(calls.count("menu"), 1);
    assert!(calls.event(0).is_same(&second));
    fixture.assert_released();
}

// =============================================================================
// Drag (mouse)
// =============================================================================

#[test]
fn test_mouse_drag_start_and_move_on_first_move() {
    let calls = Calls::default();
    let registry = CallbackRegistry::new()
        .on_drag_start(calls.record("start"))
        .on_drag_move(calls.record("move"));
    let fixture = Fixture::new(&registry);

    let down = RawEvent::mouse_down(MouseButton::Left, Point::ORIGIN);
    fixture.send(&down);
    let first_move = RawEvent::mouse_move(Point::new(1.0, 0.0));
    fixture.send(&first_move);

    assert_eq!(calls.labels(), vec!["start", "move"]);
    assert!(calls.event(0).is_same(&down));
    assert!(calls.event(1).is_same(&first_move));
}

#[test]
fn test_mouse_drag_full_sequence() {
    let calls = Calls::default();
    let registry = CallbackRegistry::new()
        .on_drag_start(calls.record("start"))
        .on_drag_move(calls.record("move"))
        .on_drag_end(calls.record("end"));
    let fixture = Fixture::new(&registry);

    fixture.send(&RawEvent::mouse_down(MouseButton::Left, Point::ORIGIN));
    for step in 1..=3 {
        fixture.send(&RawEvent::mouse_move(Point::new(step as f32, 0.0)));
    }
    fixture.send(&RawEvent::mouse_up(MouseButton::Left, Point::new(3.0, 0.0)));
    fixture.send(&RawEvent::mouse_move(Point::new(9.0, 0.0)));

    assert_eq!(calls.labels(), vec!["start", "move", "move", "move", "end"]);
    fixture.assert_released();
    assert_eq!(fixture.element.listener_count(RawEventKind::MouseMove), 0);
    assert_eq!(fixture.element.listener_count(RawEventKind::MouseUp), 0);
}

#[test]
fn test_mouse_drag_ignores_other_buttons() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_drag_start(calls.record("start")));

    for button in [MouseButton::Middle, MouseButton::Right, MouseButton::Button4] {
        fixture.send(&RawEvent::mouse_down(button, Point::ORIGIN));
        fixture.send(&RawEvent::mouse_move(Point::new(1.0, 1.0)));
    }

    assert_eq!(calls.total(), 0);
    assert_eq!(fixture.element.listener_count(RawEventKind::MouseMove), 0);
    fixture.assert_released();
}

#[test]
fn test_mouse_down_without_button_is_primary() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_drag_start(calls.record("start")));

    fixture.send(&RawEvent::new(RawEventKind::MouseDown));
    fixture.send(&RawEvent::new(RawEventKind::MouseMove));

    assert_eq!(calls.count("start"), 1);
}

#[test]
fn test_mouse_down_again_restarts_drag_session() {
    let calls = Calls::default();
    let registry = CallbackRegistry::new()
        .on_drag_start(calls.record("start"))
        .on_drag_move(calls.record("move"))
        .on_drag_end(calls.record("end"));
    let fixture = Fixture::new(&registry);

    // The first press's mouseup was delivered elsewhere.
    fixture.send(&RawEvent::mouse_down(MouseButton::Left, Point::ORIGIN));
    let second = RawEvent::mouse_down(MouseButton::Left, Point::new(2.0, 2.0));
    fixture.send(&second);
    assert_eq!(fixture.element.listener_count(RawEventKind::MouseMove), 1);

    fixture.send(&RawEvent::mouse_move(Point::new(3.0, 3.0)));
    fixture.send(&RawEvent::mouse_up(MouseButton::Left, Point::new(3.0, 3.0)));

    assert_eq!(calls.labels(), vec!["start", "move", "end"]);
    assert!(calls.event(0).is_same(&second));
    fixture.assert_released();
}

// =============================================================================
// Drag (touch)
// =============================================================================

#[test]
fn test_touch_drag_full_sequence() {
    let calls = Calls::default();
    let registry = CallbackRegistry::new()
        .on_drag_start(calls.record("start"))
        .on_drag_move(calls.record("move"))
        .on_drag_end(calls.record("end"));
    let fixture = Fixture::new(&registry);

    let start = fixture.touch_start();
    fixture.wait(DELAY + EPSILON);
    let moves = 10;
    for _ in 0..moves {
        fixture.touch_move();
    }
    fixture.touch_end();

    assert_eq!(calls.count("start"), 1);
    assert_eq!(calls.count("move"), moves);
    assert_eq!(calls.count("end"), 1);
    assert_eq!(calls.labels().first(), Some(&"start"));
    assert_eq!(calls.labels().last(), Some(&"end"));
    assert!(calls.event(0).is_same(&start));
    fixture.assert_released();
    assert_eq!(fixture.element.listener_count(RawEventKind::TouchMove), 0);
}

#[test]
fn test_touch_drag_move_before_delay_does_not_fire() {
    let calls = Calls::default();
    let registry = CallbackRegistry::new()
        .on_drag_start(calls.record("start"))
        .on_drag_end(calls.record("end"));
    let fixture = Fixture::new(&registry);

    fixture.touch_start();
    fixture.wait(Duration::from_millis(100));
    fixture.touch_move();
    fixture.touch_end();

    assert_eq!(calls.total(), 0);
    fixture.assert_released();
}

#[test]
fn test_touch_drag_move_exactly_at_delay_does_not_fire() {
    let calls = Calls::default();
    let registry = CallbackRegistry::new()
        .on_drag_start(calls.record("start"))
        .on_drag_move(calls.record("move"))
        .on_drag_end(calls.record("end"));
    let fixture = Fixture::new(&registry);

    fixture.touch_start();
    fixture.wait(DELAY);
    fixture.touch_move();
    fixture.touch_end();

    assert_eq!(calls.total(), 0);
    fixture.assert_released();
}

#[test]
fn test_touch_drag_second_touch_start_replaces_session() {
    let calls = Calls::default();
    let registry = CallbackRegistry::new()
        .on_drag_start(calls.record("start"))
        .on_drag_move(calls.record("move"));
    let fixture = Fixture::new(&registry);
    let half = DELAY / 2 + EPSILON;

    fixture.touch_start();
    fixture.wait(half);
    let second = RawEvent::touch_start(TouchId::new(2), Point::ORIGIN);
    fixture.send(&second);
    fixture.wait(half);

    // Past the first press's delay, not the second's.
    fixture.send(&RawEvent::touch_move(TouchId::new(2), Point::ORIGIN));
    assert_eq!(calls.total(), 0);

    fixture.wait(DELAY);
    fixture.send(&RawEvent::touch_move(TouchId::new(1), Point::ORIGIN));
    assert_eq!(calls.total(), 0);
    fixture.send(&RawEvent::touch_move(TouchId::new(2), Point::ORIGIN));

    assert_eq!(calls.labels(), vec!["start", "move"]);
    assert!(calls.event(0).is_same(&second));
    assert_eq!(fixture.attachment.active_sessions(), 1);
}

#[test]
fn test_touch_drag_cancel_ends_drag() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_drag_end(calls.record("end")));

    fixture.touch_start();
    fixture.wait(DELAY + EPSILON);
    fixture.touch_move();
    fixture.touch_cancel();

    assert_eq!(calls.count("end"), 1);
    fixture.assert_released();
}

#[test]
fn test_touch_drag_end_requires_start() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_drag_end(calls.record("end")));

    fixture.touch_start();
    fixture.wait(DELAY + EPSILON);
    fixture.touch_end();

    assert_eq!(calls.total(), 0);
    fixture.assert_released();
}

#[test]
fn test_touch_drag_ignores_other_touches() {
    let calls = Calls::default();
    let registry = CallbackRegistry::new()
        .on_drag_start(calls.record("start"))
        .on_drag_move(calls.record("move"));
    let fixture = Fixture::new(&registry);

    fixture.touch_start();
    fixture.wait(DELAY + EPSILON);
    fixture.send(&RawEvent::touch_move(TouchId::new(2), Point::ORIGIN));
    assert_eq!(calls.total(), 0);

    fixture.touch_move();
    assert_eq!(calls.labels(), vec!["start", "move"]);
}

#[test]
fn test_touch_drag_without_touch_data_follows_any_move() {
    let calls = Calls::default();
    let fixture = Fixture::new(&CallbackRegistry::new().on_drag_start(calls.record("start")));

    fixture.send(&RawEvent::new(RawEventKind::TouchStart));
    fixture.wait(DELAY + EPSILON);
    fixture.send(&RawEvent::new(RawEventKind::TouchMove));

    assert_eq!(calls.count("start"), 1);
}

#[test]
fn test_drag_start_precedes_first_move() {
    let calls = Calls::default();
    let registry = CallbackRegistry::new()
        .on_drag_move(calls.record("move"))
        .on_drag_start(calls.record("start"));
    let fixture = Fixture::new(&registry);

    fixture.touch_start();
    fixture.wait(HOLD + EPSILON);
    fixture.touch_move();

    assert_eq!(calls.labels(), vec!["start", "move"]);
}

// =============================================================================
// Menu + Drag on one element
// =============================================================================

#[test]
fn test_drag_does_not_collide_with_menu() {
    let calls = Calls::default();
    let shared = calls.record("shared");
    let shared = Rc::new(shared);
    let for_drag = Rc::clone(&shared);
    let registry = CallbackRegistry::new()
        .on_drag_start(move |event| for_drag(event))
        .on_menu(move |event| shared(event));
    let fixture = Fixture::new(&registry);

    fixture.touch_start();
    fixture.wait(HOLD + EPSILON);
    fixture.touch_move();
    fixture.touch_end();

    assert_eq!(calls.total(), 1);
    fixture.assert_released();
}

#[test]
fn test_menu_and_drag_both_recognize_independently() {
    let calls = Calls::default();
    let registry = CallbackRegistry::new()
        .on_menu(calls.record("menu"))
        .on_drag_move(calls.record("move"))
        .on_drag_end(calls.record("end"));
    let fixture = Fixture::new(&registry);

    // Long press released without moving: menu fires, drag ends unstarted.
    fixture.touch_start();
    fixture.wait(HOLD + EPSILON);
    fixture.touch_end();
    assert_eq!(calls.labels(), vec!["menu"]);

    // Right click never starts a drag.
    fixture.send(&RawEvent::mouse_down(MouseButton::Right, Point::ORIGIN));
    fixture.send(&RawEvent::mouse_move(Point::ORIGIN));
    assert_eq!(calls.labels(), vec!["menu", "menu"]);
    fixture.assert_released();
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_detach_mid_gesture_releases_everything() {
    let calls = Calls::default();
    let registry = CallbackRegistry::new()
        .on_menu(calls.record("menu"))
        .on_drag_start(calls.record("start"))
        .on_drag_end(calls.record("end"));
    let mut fixture = Fixture::new(&registry);

    fixture.touch_start();
    fixture.wait(DELAY + EPSILON);
    fixture.touch_move();
    fixture.send(&RawEvent::mouse_down(MouseButton::Left, Point::ORIGIN));
    assert!(fixture.attachment.active_sessions() > 0);

    fixture.attachment.detach();
    assert_eq!(fixture.element.total_listeners(), 0);
    fixture.assert_released();

    fixture.wait(HOLD * 2);
    fixture.touch_end();
    fixture.send(&RawEvent::mouse_up(MouseButton::Left, Point::ORIGIN));
    assert_eq!(calls.labels(), vec!["start"]);
}

#[test]
fn test_callback_may_detach_reentrantly() {
    init_tracing();
    let engine = GestureEngine::default();
    let element = Element::new();
    let slot: Rc<RefCell<Option<Attachment>>> = Rc::new(RefCell::new(None));
    let hits = Rc::new(RefCell::new(0));

    let slot_in = Rc::clone(&slot);
    let hits_in = Rc::clone(&hits);
    let registry = CallbackRegistry::new().on_drag_move(move |_| {
        *hits_in.borrow_mut() += 1;
        if let Some(mut attachment) = slot_in.borrow_mut().take() {
            attachment.detach();
        }
    });
    *slot.borrow_mut() = Some(engine.attach(&element, &registry));

    element.dispatch(&RawEvent::mouse_down(MouseButton::Left, Point::ORIGIN));
    element.dispatch(&RawEvent::mouse_move(Point::new(1.0, 0.0)));
    element.dispatch(&RawEvent::mouse_move(Point::new(2.0, 0.0)));

    assert_eq!(*hits.borrow(), 1);
    assert_eq!(element.total_listeners(), 0);
}

#[test]
fn test_config_from_yaml_drives_timing() {
    init_tracing();
    let config = GestureConfig::from_yaml_str("touch_menu_hold_time_ms: 200\n").expect("valid yaml");
    let engine = GestureEngine::new(config);
    let element = Element::new();
    let calls = Calls::default();
    let _attachment = engine.attach(&element, &CallbackRegistry::new().on_menu(calls.record("menu")));

    element.dispatch(&RawEvent::touch_start(TouchId::new(1), Point::ORIGIN));
    engine.timers().advance(Duration::from_millis(201));
    element.dispatch(&RawEvent::touch_end(TouchId::new(1), Point::ORIGIN));

    assert_eq!(calls.count("menu"), 1);
    assert_eq!(engine.config().touch_drag_delay(), DELAY);
}
