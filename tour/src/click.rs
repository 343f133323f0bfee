//! Capture-phase click interception for tour-owned elements.
//!
//! The tour's popover and overlay live on pages that often install their
//! own document-level click handlers. To act as an isolated layer, the
//! tour listens on the document in the capture phase, so it sees the
//! gesture before any bubble-phase handler and before capture handlers
//! registered after it. When it suppresses an event, no other listener
//! (including ones on the document registered later in the same phase)
//! ever learns the gesture happened.
//!
//! Capture listeners registered on the window, or on the document before
//! this one, still run first. Wire interception as early as possible.

use std::rc::Rc;

use log::{debug, trace};
use tourdom::{listener, Event, EventTarget, EventType, Listener, ListenerOptions, NodeId, Window};

/// Decides, per target, whether an intercepted event is suppressed.
/// Returning false lets e.g. a link inside the popover navigate.
pub type PreventPredicate = Rc<dyn Fn(&Window, NodeId) -> bool>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterceptRole {
    /// Suppress only. Neutralises the down/up halves of a gesture that
    /// other code uses for drag or outside-click detection.
    Suppress,
    /// Suppress, then hand the event to the primary listener.
    SuppressAndNotify,
}

/// Events intercepted on the document, in registration order. All are
/// registered for the capture phase.
pub const INTERCEPTED_EVENTS: [(EventType, InterceptRole); 5] = [
    (EventType::PointerDown, InterceptRole::Suppress),
    (EventType::MouseDown, InterceptRole::Suppress),
    (EventType::PointerUp, InterceptRole::Suppress),
    (EventType::MouseUp, InterceptRole::Suppress),
    (EventType::Click, InterceptRole::SuppressAndNotify),
];

/// The listeners installed by [`on_driver_click`].
pub struct ClickInterception {
    root: NodeId,
    handlers: Vec<(EventType, Listener)>,
}

impl ClickInterception {
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Event types intercepted, in registration order.
    pub fn event_types(&self) -> impl Iterator<Item = EventType> + '_ {
        self.handlers.iter().map(|(kind, _)| *kind)
    }

    /// Detach every interception listener. Returns how many were removed.
    pub fn remove(&self, window: &mut Window) -> usize {
        let mut removed = 0;
        for (kind, handler) in &self.handlers {
            if window.remove_event_listener(EventTarget::Document, *kind, handler, true) {
                removed += 1;
            }
        }
        removed
    }
}

/// Give `listener` first claim on clicks inside `root`.
///
/// Registers document capture-phase handlers for every entry of
/// [`INTERCEPTED_EVENTS`]. For an event whose target is `root` or inside it:
/// - when `should_prevent_default` is absent or returns true, the default
///   action is cancelled and propagation is stopped immediately;
/// - for `click`, `listener` is then called.
///
/// Events targeting anything outside `root` pass through untouched. A
/// `root` that is no longer in the document intercepts nothing.
pub fn on_driver_click(
    window: &mut Window,
    root: NodeId,
    listener: Option<Listener>,
    should_prevent_default: Option<PreventPredicate>,
) -> ClickInterception {
    let handlers = INTERCEPTED_EVENTS
        .iter()
        .map(|&(kind, role)| {
            let notify = match role {
                InterceptRole::SuppressAndNotify => listener.clone(),
                InterceptRole::Suppress => None,
            };
            let predicate = should_prevent_default.clone();

            let handler = listener_for(root, predicate, notify);
            window.add_event_listener(
                EventTarget::Document,
                kind,
                &handler,
                ListenerOptions::capture(),
            );
            (kind, handler)
        })
        .collect();

    debug!(
        "[click] intercepting {:?} for root {}",
        INTERCEPTED_EVENTS.map(|(kind, _)| kind.name()),
        root
    );
    ClickInterception { root, handlers }
}

fn listener_for(
    root: NodeId,
    predicate: Option<PreventPredicate>,
    notify: Option<Listener>,
) -> Listener {
    listener(move |window: &mut Window, event: &mut Event| {
        intercept(window, event, root, predicate.as_deref(), notify.as_ref());
    })
}

fn intercept(
    window: &mut Window,
    event: &mut Event,
    root: NodeId,
    predicate: Option<&dyn Fn(&Window, NodeId) -> bool>,
    notify: Option<&Listener>,
) {
    let Some(target) = event.target_node() else {
        return;
    };
    if !window.document().contains(root, target) {
        return;
    }

    let suppress = match predicate {
        None => true,
        Some(should_prevent) => should_prevent(&*window, target),
    };
    if suppress {
        event.prevent_default();
        event.stop_propagation();
        event.stop_immediate_propagation();
    }
    trace!(
        "[click] {} on {} inside {} suppressed={}",
        event.kind().name(),
        target,
        root,
        suppress
    );

    if let Some(notify) = notify {
        notify(window, event);
    }
}
