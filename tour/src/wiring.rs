//! Attaching and detaching the tour's window listeners.

use std::rc::Rc;

use log::debug;
use tourdom::{listener, Event, EventTarget, EventType, Listener, ListenerOptions, Window};

use crate::context::TourContext;
use crate::keyboard::{on_keyup, trap_focus};
use crate::refresh::request_refresh;

/// The window listeners of one tour.
///
/// Each listener is built once and kept, so `destroy_events` removes
/// exactly what `init_events` added.
pub struct EventWiring {
    keyup: Listener,
    keydown: Listener,
    resize: Listener,
    scroll: Listener,
}

impl EventWiring {
    pub fn new(cx: &Rc<TourContext>) -> Self {
        let keyup = {
            let cx = Rc::clone(cx);
            listener(move |_: &mut Window, event: &mut Event| on_keyup(event, &cx))
        };
        let keydown = {
            let cx = Rc::clone(cx);
            listener(move |window: &mut Window, event: &mut Event| {
                trap_focus(window, event, &cx)
            })
        };
        let resize = {
            let cx = Rc::clone(cx);
            listener(move |window: &mut Window, _: &mut Event| request_refresh(window, &cx))
        };
        let scroll = {
            let cx = Rc::clone(cx);
            listener(move |window: &mut Window, _: &mut Event| request_refresh(window, &cx))
        };

        Self {
            keyup,
            keydown,
            resize,
            scroll,
        }
    }

    fn bindings(&self) -> [(EventType, &Listener); 4] {
        [
            (EventType::KeyUp, &self.keyup),
            (EventType::KeyDown, &self.keydown),
            (EventType::Resize, &self.resize),
            (EventType::Scroll, &self.scroll),
        ]
    }

    /// Attach keyup commands, the keydown focus trap, and resize/scroll
    /// refresh to the window, all in the bubble phase.
    ///
    /// Calling this again while attached changes nothing.
    pub fn init_events(&self, window: &mut Window) {
        for (kind, handler) in self.bindings() {
            window.add_event_listener(
                EventTarget::Window,
                kind,
                handler,
                ListenerOptions::bubble(),
            );
        }
        debug!("[wiring] events attached");
    }

    /// Detach keyup and resize/scroll.
    ///
    /// The keydown focus trap stays attached. It is inert while the tour is
    /// not initialized, and a later `init_events` does not add it twice.
    pub fn destroy_events(&self, window: &mut Window) {
        for (kind, handler) in self.bindings() {
            if kind == EventType::KeyDown {
                continue;
            }
            window.remove_event_listener(EventTarget::Window, kind, handler, false);
        }
        debug!("[wiring] events detached");
    }
}
