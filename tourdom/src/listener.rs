use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::event::{Event, EventTarget, EventType};
use crate::window::Window;

/// An event listener.
///
/// Listeners are compared by pointer identity: removing one requires the
/// same `Rc` that was added, not an equivalent closure.
pub type Listener = Rc<dyn Fn(&mut Window, &mut Event)>;

/// Wrap a closure as a [`Listener`].
pub fn listener(f: impl Fn(&mut Window, &mut Event) + 'static) -> Listener {
    Rc::new(f)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerOptions {
    /// Fire during the capture phase instead of the bubble phase.
    pub capture: bool,
    /// Remove the listener after its first invocation.
    pub once: bool,
}

impl ListenerOptions {
    pub fn capture() -> Self {
        Self {
            capture: true,
            once: false,
        }
    }

    pub fn bubble() -> Self {
        Self::default()
    }

    pub fn once(mut self) -> Self {
        self.once = true;
        self
    }
}

#[derive(Clone)]
pub(crate) struct Registration {
    pub(crate) listener: Listener,
    pub(crate) once: bool,
    /// Set on removal so an in-flight dispatch skips the listener.
    pub(crate) removed: Rc<Cell<bool>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct Slot {
    target: EventTarget,
    kind: EventType,
    capture: bool,
}

/// Registered listeners keyed by target, event name and phase, each list
/// kept in registration order.
#[derive(Default)]
pub(crate) struct ListenerTable {
    slots: HashMap<Slot, Vec<Registration>>,
}

impl ListenerTable {
    /// Returns false when the identical registration already exists.
    pub(crate) fn add(
        &mut self,
        target: EventTarget,
        kind: EventType,
        listener: &Listener,
        options: ListenerOptions,
    ) -> bool {
        let regs = self
            .slots
            .entry(Slot {
                target,
                kind,
                capture: options.capture,
            })
            .or_default();

        if regs.iter().any(|r| Rc::ptr_eq(&r.listener, listener)) {
            return false;
        }

        regs.push(Registration {
            listener: Rc::clone(listener),
            once: options.once,
            removed: Rc::new(Cell::new(false)),
        });
        true
    }

    pub(crate) fn remove(
        &mut self,
        target: EventTarget,
        kind: EventType,
        listener: &Listener,
        capture: bool,
    ) -> bool {
        let Some(regs) = self.slots.get_mut(&Slot {
            target,
            kind,
            capture,
        }) else {
            return false;
        };

        let Some(idx) = regs.iter().position(|r| Rc::ptr_eq(&r.listener, listener)) else {
            return false;
        };
        let reg = regs.remove(idx);
        reg.removed.set(true);
        true
    }

    /// Copy of the listener list, so listeners can mutate the table while
    /// the dispatcher iterates.
    pub(crate) fn snapshot(
        &self,
        target: EventTarget,
        kind: EventType,
        capture: bool,
    ) -> Vec<Registration> {
        self.slots
            .get(&Slot {
                target,
                kind,
                capture,
            })
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn count(&self, target: EventTarget, kind: EventType, capture: bool) -> usize {
        self.slots
            .get(&Slot {
                target,
                kind,
                capture,
            })
            .map_or(0, Vec::len)
    }

    /// Drop every listener attached to `target`.
    pub(crate) fn clear_target(&mut self, target: EventTarget) {
        self.slots.retain(|slot, regs| {
            if slot.target != target {
                return true;
            }
            for reg in regs.iter() {
                reg.removed.set(true);
            }
            false
        });
    }
}
