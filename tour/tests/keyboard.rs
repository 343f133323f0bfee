use std::cell::RefCell;
use std::rc::Rc;

use tour::{Config, EventWiring, Popover, StateKey, TourContext, TourEvent};
use tourdom::{
    Document, DocumentFocusScanner, FocusScanner, Key, KeyboardData, Node, NodeId, Window,
};

struct Tour {
    window: Window,
    cx: Rc<TourContext>,
    wiring: EventWiring,
    /// Focusable elements of popover + highlighted element, in trap order.
    trap: [NodeId; 3],
    page_button: NodeId,
}

fn tour(config: Config) -> Tour {
    tour_with(TourContext::new(config, |_: &mut Window, _: &TourContext| {}))
}

/// body > [page button, popover > (prev, next), highlighted > input]
fn tour_with(cx: TourContext) -> Tour {
    let mut window = Window::new(80, 24);
    let doc = window.document_mut();
    let body = doc.body();
    let page_button = doc.append_child(body, Node::button().id("page")).unwrap();
    let popover = doc.append_child(body, Node::div().id("popover")).unwrap();
    let prev = doc.append_child(popover, Node::button().id("prev")).unwrap();
    let next = doc.append_child(popover, Node::button().id("next")).unwrap();
    let highlighted = doc.append_child(body, Node::div().id("target")).unwrap();
    let input = doc.append_child(highlighted, Node::input().id("field")).unwrap();

    let cx = Rc::new(cx);
    {
        let mut state = cx.state_mut();
        state.set(StateKey::IsInitialized, true);
        state.set(StateKey::ActiveElement, highlighted);
        state.set(StateKey::Popover, Popover::new(popover));
    }
    let wiring = EventWiring::new(&cx);
    wiring.init_events(&mut window);

    Tour {
        window,
        cx,
        wiring,
        trap: [prev, next, input],
        page_button,
    }
}

fn record_commands(cx: &TourContext) -> Rc<RefCell<Vec<TourEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    for event in [
        TourEvent::EscapePress,
        TourEvent::ArrowRightPress,
        TourEvent::ArrowLeftPress,
        TourEvent::OverlayClick,
        TourEvent::NextClick,
        TourEvent::PrevClick,
        TourEvent::CloseClick,
    ] {
        let seen = Rc::clone(&seen);
        cx.emitter().listen(event, move |e| seen.borrow_mut().push(e));
    }
    seen
}

fn focused(t: &Tour) -> Option<NodeId> {
    t.window.document().active_element()
}

// ============================================================================
// Focus Trap
// ============================================================================

#[test]
fn test_tab_from_last_wraps_to_first() {
    let mut t = tour(Config::default());
    let [a, _b, c] = t.trap;
    t.window.focus(c);

    let ev = t.window.key_down(KeyboardData::new(Key::Tab));

    assert!(ev.default_prevented());
    assert_eq!(focused(&t), Some(a));
}

#[test]
fn test_shift_tab_from_last_moves_back() {
    let mut t = tour(Config::default());
    let [_a, b, c] = t.trap;
    t.window.focus(c);

    t.window.key_down(KeyboardData::new(Key::Tab).with_shift());

    assert_eq!(focused(&t), Some(b));
}

#[test]
fn test_shift_tab_from_first_wraps_to_last() {
    let mut t = tour(Config::default());
    let [a, _b, c] = t.trap;
    t.window.focus(a);

    t.window.key_down(KeyboardData::new(Key::Tab).with_shift());

    assert_eq!(focused(&t), Some(c));
}

#[test]
fn test_tab_walks_popover_then_highlighted_element() {
    let mut t = tour(Config::default());
    let [a, b, c] = t.trap;
    t.window.focus(a);

    t.window.key_down(KeyboardData::new(Key::Tab));
    assert_eq!(focused(&t), Some(b));
    t.window.key_down(KeyboardData::new(Key::Tab));
    assert_eq!(focused(&t), Some(c));
}

#[test]
fn test_focus_outside_trap_enters_at_either_end() {
    let mut t = tour(Config::default());
    let [a, _b, c] = t.trap;

    t.window.focus(t.page_button);
    t.window.key_down(KeyboardData::new(Key::Tab));
    assert_eq!(focused(&t), Some(a));

    t.window.focus(t.page_button);
    t.window.key_down(KeyboardData::new(Key::Tab).with_shift());
    assert_eq!(focused(&t), Some(c));
}

#[test]
fn test_legacy_key_code_is_recognised() {
    let mut t = tour(Config::default());
    let [a, _b, c] = t.trap;
    t.window.focus(c);

    let ev = t.window.key_down(KeyboardData::legacy(9));

    assert!(ev.default_prevented());
    assert_eq!(focused(&t), Some(a));
}

#[test]
fn test_empty_focusable_sequence_leaves_focus_alone() {
    let mut t = tour(Config::default());
    {
        let mut state = t.cx.state_mut();
        state.remove(&StateKey::ActiveElement);
        state.remove(&StateKey::Popover);
    }
    t.window.focus(t.page_button);

    let ev = t.window.key_down(KeyboardData::new(Key::Tab));

    // Still cancelled, so the host does not move focus either
    assert!(ev.default_prevented());
    assert_eq!(focused(&t), Some(t.page_button));
}

#[test]
fn test_trap_inactive_until_initialized() {
    let mut t = tour(Config::default());
    t.cx.state_mut().set(StateKey::IsInitialized, false);
    let [a, _b, _c] = t.trap;
    t.window.focus(t.page_button);

    let ev = t.window.key_down(KeyboardData::new(Key::Tab));

    // Native navigation: page button -> first popover button
    assert!(!ev.default_prevented());
    assert_eq!(focused(&t), Some(a));
}

#[test]
fn test_other_keys_pass_through_trap() {
    let mut t = tour(Config::default());
    t.window.focus(t.trap[0]);

    let ev = t.window.key_down(KeyboardData::new(Key::Enter));

    assert!(!ev.default_prevented());
    assert_eq!(focused(&t), Some(t.trap[0]));
}

#[test]
fn test_popover_only_trap() {
    let mut t = tour(Config::default());
    t.cx.state_mut().remove(&StateKey::ActiveElement);
    let [a, b, _c] = t.trap;
    t.window.focus(b);

    t.window.key_down(KeyboardData::new(Key::Tab));

    assert_eq!(focused(&t), Some(a));
}

/// Walks the default sequence back to front.
struct ReversedScanner;

impl FocusScanner for ReversedScanner {
    fn focusable_elements(&self, document: &Document, roots: &[NodeId]) -> Vec<NodeId> {
        let mut found = DocumentFocusScanner.focusable_elements(document, roots);
        found.reverse();
        found
    }
}

#[test]
fn test_custom_scanner_decides_trap_order() {
    let cx = TourContext::new(Config::default(), |_: &mut Window, _: &TourContext| {})
        .with_scanner(ReversedScanner);
    let mut t = tour_with(cx);
    let [a, b, c] = t.trap;
    t.window.focus(c);

    let ev = t.window.key_down(KeyboardData::new(Key::Tab));
    assert!(ev.default_prevented());
    assert_eq!(focused(&t), Some(b));

    t.window.key_down(KeyboardData::new(Key::Tab));
    assert_eq!(focused(&t), Some(a));
    t.window.key_down(KeyboardData::new(Key::Tab));
    assert_eq!(focused(&t), Some(c));
}

// ============================================================================
// Keyboard Commands
// ============================================================================

#[test]
fn test_escape_emits_only_escape_press_by_default() {
    let mut t = tour(Config::default());
    let seen = record_commands(&t.cx);

    t.window.key_up(KeyboardData::new(Key::Escape));

    assert_eq!(*seen.borrow(), vec![TourEvent::EscapePress]);
}

#[test]
fn test_arrows_emit_navigation_commands() {
    let mut t = tour(Config::default());
    let seen = record_commands(&t.cx);

    t.window.key_up(KeyboardData::new(Key::Right));
    t.window.key_up(KeyboardData::new(Key::Left));
    t.window.key_up(KeyboardData::new(Key::Char('x')));
    t.window.key_up(KeyboardData::new(Key::Up));

    assert_eq!(
        *seen.borrow(),
        vec![TourEvent::ArrowRightPress, TourEvent::ArrowLeftPress]
    );
}

#[test]
fn test_keyboard_control_disabled_emits_nothing() {
    let mut t = tour(Config::default().allow_keyboard(false));
    let seen = record_commands(&t.cx);

    for key in [Key::Escape, Key::Left, Key::Right] {
        t.window.press_key(KeyboardData::new(key));
    }

    assert!(seen.borrow().is_empty());
}

#[test]
fn test_keyboard_control_follows_reconfiguration() {
    let mut t = tour(Config::default());
    let seen = record_commands(&t.cx);

    t.cx.configure(Config::default().allow_keyboard(false));
    t.window.key_up(KeyboardData::new(Key::Escape));
    t.cx.configure(Config::default().allow_keyboard(true));
    t.window.key_up(KeyboardData::new(Key::Escape));

    assert_eq!(*seen.borrow(), vec![TourEvent::EscapePress]);
}

#[test]
fn test_commands_only_fire_on_keyup() {
    let mut t = tour(Config::default());
    let seen = record_commands(&t.cx);

    t.window.key_down(KeyboardData::new(Key::Escape));
    assert!(seen.borrow().is_empty());

    t.window.key_up(KeyboardData::new(Key::Escape));
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn test_destroyed_wiring_stops_commands() {
    let mut t = tour(Config::default());
    let seen = record_commands(&t.cx);

    t.wiring.destroy_events(&mut t.window);
    t.window.key_up(KeyboardData::new(Key::Escape));

    assert!(seen.borrow().is_empty());
}
