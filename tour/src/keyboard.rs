//! Keyboard handling: the Tab focus trap and key-to-command dispatch.

use log::{debug, trace};
use tourdom::{sequential_target, Event, Key, NodeId, Window};

use crate::context::TourContext;
use crate::emitter::TourEvent;

/// Legacy `keyCode` for Tab, for hosts that do not fill in the key name.
const TAB_KEY_CODE: u32 = 9;

/// Keep Tab / Shift+Tab inside the popover and the highlighted element.
///
/// Does nothing until the tour is initialized. Once active, every Tab has
/// its default action cancelled, even when there is nothing to focus.
pub fn trap_focus(window: &mut Window, event: &mut Event, cx: &TourContext) {
    if !cx.state().is_initialized() {
        return;
    }

    let Some(key) = event.keyboard().copied() else {
        return;
    };
    if !(key.is(Key::Tab) || key.key_code == TAB_KEY_CODE) {
        return;
    }

    let roots: Vec<NodeId> = {
        let state = cx.state();
        let wrapper = state.popover().map(|p| p.wrapper);
        wrapper.into_iter().chain(state.active_element()).collect()
    };
    let focusable = cx.scanner().focusable_elements(window.document(), &roots);

    event.prevent_default();

    let current = window.document().active_element();
    let backwards = key.modifiers.shift;
    match sequential_target(&focusable, current, backwards) {
        Some(next) => {
            debug!("[trap_focus] {:?} -> {} (backwards={})", current, next, backwards);
            window.focus(next);
        }
        None => trace!("[trap_focus] nothing focusable"),
    }
}

/// Translate Escape / ArrowRight / ArrowLeft into tour commands, unless
/// keyboard control is turned off.
pub fn on_keyup(event: &Event, cx: &TourContext) {
    if !cx.config().allow_keyboard_control() {
        return;
    }

    let command = match event.keyboard().and_then(|k| k.key) {
        Some(Key::Escape) => TourEvent::EscapePress,
        Some(Key::Right) => TourEvent::ArrowRightPress,
        Some(Key::Left) => TourEvent::ArrowLeftPress,
        _ => return,
    };
    cx.emitter().emit(command);
}
