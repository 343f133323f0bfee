//! Named tour commands, published to any number of subscribers.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TourEvent {
    OverlayClick,
    EscapePress,
    NextClick,
    PrevClick,
    CloseClick,
    ArrowRightPress,
    ArrowLeftPress,
}

impl TourEvent {
    pub fn name(self) -> &'static str {
        match self {
            TourEvent::OverlayClick => "overlayClick",
            TourEvent::EscapePress => "escapePress",
            TourEvent::NextClick => "nextClick",
            TourEvent::PrevClick => "prevClick",
            TourEvent::CloseClick => "closeClick",
            TourEvent::ArrowRightPress => "arrowRightPress",
            TourEvent::ArrowLeftPress => "arrowLeftPress",
        }
    }
}

type Callback = Rc<dyn Fn(TourEvent)>;

#[derive(Default)]
pub struct Emitter {
    listeners: RefCell<HashMap<TourEvent, Vec<Callback>>>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listen(&self, event: TourEvent, callback: impl Fn(TourEvent) + 'static) {
        self.listeners
            .borrow_mut()
            .entry(event)
            .or_default()
            .push(Rc::new(callback));
    }

    /// Notify every subscriber of `event`. Returns how many were notified.
    ///
    /// Subscribers may listen or clear while being notified; those changes
    /// apply from the next emit.
    pub fn emit(&self, event: TourEvent) -> usize {
        let callbacks = self
            .listeners
            .borrow()
            .get(&event)
            .cloned()
            .unwrap_or_default();

        debug!("[emitter] {} -> {} subscribers", event.name(), callbacks.len());
        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }

    pub fn listener_count(&self, event: TourEvent) -> usize {
        self.listeners.borrow().get(&event).map_or(0, Vec::len)
    }

    /// Drop every subscriber.
    pub fn clear(&self) {
        self.listeners.borrow_mut().clear();
    }
}
