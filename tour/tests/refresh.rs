use std::cell::Cell;
use std::rc::Rc;

use tour::{request_refresh, Config, EventWiring, HighlightRefresher, StateKey, TourContext};
use tourdom::{EventTarget, EventType, Key, KeyboardData, Window};

/// Counts refreshes and records the viewport size each one saw.
#[derive(Default)]
struct CountingHighlight {
    refreshes: Rc<Cell<usize>>,
    last_size: Rc<Cell<(u16, u16)>>,
}

impl HighlightRefresher for CountingHighlight {
    fn refresh_active_highlight(&self, window: &mut Window, _cx: &TourContext) {
        self.refreshes.set(self.refreshes.get() + 1);
        self.last_size.set(window.size());
    }
}

fn setup() -> (Window, Rc<TourContext>, Rc<Cell<usize>>, Rc<Cell<(u16, u16)>>) {
    let highlight = CountingHighlight::default();
    let refreshes = Rc::clone(&highlight.refreshes);
    let last_size = Rc::clone(&highlight.last_size);
    let cx = Rc::new(TourContext::new(Config::default(), highlight));
    (Window::new(80, 24), cx, refreshes, last_size)
}

// ============================================================================
// Debounced Refresh
// ============================================================================

#[test]
fn test_many_requests_in_one_frame_refresh_once() {
    let (mut window, cx, refreshes, _) = setup();

    for _ in 0..10 {
        request_refresh(&mut window, &cx);
    }

    assert_eq!(window.pending_frames(), 1);
    assert_eq!(refreshes.get(), 0);
    window.run_animation_frame();
    assert_eq!(refreshes.get(), 1);
    window.run_animation_frame();
    assert_eq!(refreshes.get(), 1);
}

#[test]
fn test_pending_handle_is_stored_and_replaced() {
    let (mut window, cx, _, _) = setup();

    request_refresh(&mut window, &cx);
    let first = cx.state().resize_timeout().unwrap();
    request_refresh(&mut window, &cx);
    let second = cx.state().resize_timeout().unwrap();

    assert_ne!(first, second);
    assert!(!window.is_frame_pending(first));
    assert!(window.is_frame_pending(second));
}

#[test]
fn test_requests_in_separate_frames_each_refresh() {
    let (mut window, cx, refreshes, _) = setup();

    request_refresh(&mut window, &cx);
    window.run_animation_frame();
    // The stored handle has already fired; cancelling it is harmless
    request_refresh(&mut window, &cx);
    window.run_animation_frame();

    assert_eq!(refreshes.get(), 2);
}

#[test]
fn test_unrelated_frames_survive_refresh_debounce() {
    let (mut window, cx, _, _) = setup();
    let other = Rc::new(Cell::new(false));
    let o = Rc::clone(&other);
    window.request_animation_frame(move |_| o.set(true));

    request_refresh(&mut window, &cx);
    request_refresh(&mut window, &cx);
    window.run_animation_frame();

    assert!(other.get());
}

// ============================================================================
// Resize / Scroll Wiring
// ============================================================================

#[test]
fn test_resize_burst_refreshes_once_with_final_size() {
    let (mut window, cx, refreshes, last_size) = setup();
    let wiring = EventWiring::new(&cx);
    wiring.init_events(&mut window);

    window.resize(100, 30);
    window.resize(110, 32);
    window.scroll_to(0, 50);
    window.resize(120, 40);

    window.run_animation_frame();
    assert_eq!(refreshes.get(), 1);
    assert_eq!(last_size.get(), (120, 40));
}

#[test]
fn test_destroy_detaches_resize_and_scroll() {
    let (mut window, cx, refreshes, _) = setup();
    let wiring = EventWiring::new(&cx);
    wiring.init_events(&mut window);
    wiring.destroy_events(&mut window);

    window.resize(100, 30);
    window.scroll_to(0, 10);
    window.run_animation_frame();

    assert_eq!(refreshes.get(), 0);
    assert_eq!(window.listener_count(EventTarget::Window, EventType::Resize, false), 0);
    assert_eq!(window.listener_count(EventTarget::Window, EventType::Scroll, false), 0);
    assert_eq!(window.listener_count(EventTarget::Window, EventType::KeyUp, false), 0);
}

#[test]
fn test_destroy_keeps_focus_trap_attached() {
    let (mut window, cx, _, _) = setup();
    let wiring = EventWiring::new(&cx);
    wiring.init_events(&mut window);
    wiring.destroy_events(&mut window);

    assert_eq!(window.listener_count(EventTarget::Window, EventType::KeyDown, false), 1);

    // Uninitialized tour: trap is inert and native Tab proceeds
    let ev = window.key_down(KeyboardData::new(Key::Tab));
    assert!(!ev.default_prevented());
}

#[test]
fn test_reinit_does_not_double_register() {
    let (mut window, cx, refreshes, _) = setup();
    let wiring = EventWiring::new(&cx);

    wiring.init_events(&mut window);
    wiring.destroy_events(&mut window);
    wiring.init_events(&mut window);
    wiring.init_events(&mut window);

    for kind in [EventType::KeyUp, EventType::KeyDown, EventType::Resize, EventType::Scroll] {
        assert_eq!(window.listener_count(EventTarget::Window, kind, false), 1);
    }

    cx.state_mut().set(StateKey::IsInitialized, true);
    window.resize(90, 30);
    window.run_animation_frame();
    assert_eq!(refreshes.get(), 1);
}
