//! The host window: owns the document, the listener table and the
//! animation-frame queue, and dispatches events through them.
//!
//! Dispatch follows the DOM order:
//! 1. Capture: window, document, then body down to the target's parent
//! 2. At target: capture listeners, then bubble listeners
//! 3. Bubble: back up to the window (bubbling events only)
//!
//! The window is host-driven. Nothing happens until the host feeds input
//! (`key_down`, `click`, `resize`, ...) or ticks frames with
//! [`Window::run_animation_frame`].

use log::{debug, trace};

use crate::event::{
    Event, EventData, EventTarget, EventType, Key, KeyboardData, MouseButton, Phase, PointerData,
};
use crate::focus::{collect_focusable, is_focusable, sequential_target};
use crate::frame::{FrameHandle, FrameQueue};
use crate::listener::{Listener, ListenerOptions, ListenerTable};
use crate::node::{Document, NodeId};

pub struct Window {
    document: Document,
    listeners: ListenerTable,
    frames: FrameQueue,
    width: u16,
    height: u16,
}

impl Default for Window {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl Window {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            document: Document::new(),
            listeners: ListenerTable::default(),
            frames: FrameQueue::default(),
            width,
            height,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// Remove a node subtree along with every listener attached inside it.
    pub fn remove_node(&mut self, node: NodeId) -> Result<(), crate::DomError> {
        for id in self.document.remove(node)? {
            self.listeners.clear_target(EventTarget::Node(id));
        }
        Ok(())
    }

    // =========================================================================
    // Listeners
    // =========================================================================

    /// Register a listener. Returns false (and changes nothing) when the
    /// same listener is already registered for this target, event and phase.
    pub fn add_event_listener(
        &mut self,
        target: EventTarget,
        kind: EventType,
        listener: &Listener,
        options: ListenerOptions,
    ) -> bool {
        let added = self.listeners.add(target, kind, listener, options);
        trace!(
            "[listener] add {:?} {} capture={} added={}",
            target,
            kind.name(),
            options.capture,
            added
        );
        added
    }

    /// Unregister a listener by identity. Returns false if it was not found.
    pub fn remove_event_listener(
        &mut self,
        target: EventTarget,
        kind: EventType,
        listener: &Listener,
        capture: bool,
    ) -> bool {
        let removed = self.listeners.remove(target, kind, listener, capture);
        trace!(
            "[listener] remove {:?} {} capture={} removed={}",
            target,
            kind.name(),
            capture,
            removed
        );
        removed
    }

    /// Number of listeners registered for a target, event and phase.
    pub fn listener_count(&self, target: EventTarget, kind: EventType, capture: bool) -> usize {
        self.listeners.count(target, kind, capture)
    }

    // =========================================================================
    // Animation frames
    // =========================================================================

    pub fn request_animation_frame(
        &mut self,
        callback: impl FnOnce(&mut Window) + 'static,
    ) -> FrameHandle {
        let handle = self.frames.request(Box::new(callback));
        trace!("[frame] requested {handle}");
        handle
    }

    /// Cancel a pending frame callback. Returns false if it already ran or
    /// was never scheduled.
    pub fn cancel_animation_frame(&mut self, handle: FrameHandle) -> bool {
        let cancelled = self.frames.cancel(handle);
        trace!("[frame] cancel {handle} cancelled={cancelled}");
        cancelled
    }

    pub fn is_frame_pending(&self, handle: FrameHandle) -> bool {
        self.frames.is_pending(handle)
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Number of frames ticked so far.
    pub fn frame_count(&self) -> u64 {
        self.frames.ticks()
    }

    /// Tick one animation frame. Returns how many callbacks ran.
    pub fn run_animation_frame(&mut self) -> usize {
        let due = self.frames.begin_tick();
        let mut ran = 0;
        for handle in due {
            // A callback earlier in this tick may have cancelled this one
            if let Some(callback) = self.frames.take(handle) {
                callback(self);
                ran += 1;
            }
        }
        debug!("[frame] tick {} ran {} callbacks", self.frames.ticks(), ran);
        ran
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Focus a node, firing blur/focus. Returns true if focus changed.
    ///
    /// Nodes that cannot take focus are ignored, like `HTMLElement.focus()`.
    pub fn focus(&mut self, node: NodeId) -> bool {
        if !is_focusable(&self.document, node) {
            return false;
        }
        let old = self.document.active_element();
        if old == Some(node) {
            return false;
        }

        self.document.set_active(Some(node));
        debug!("[focus] {:?} -> {}", old, node);

        if let Some(old) = old {
            self.dispatch_event(Event::new(
                EventType::Blur,
                EventTarget::Node(old),
                EventData::None,
            ));
        }
        self.dispatch_event(Event::new(
            EventType::Focus,
            EventTarget::Node(node),
            EventData::None,
        ));
        true
    }

    /// Clear focus. Returns true if something was focused.
    pub fn blur(&mut self) -> bool {
        let Some(old) = self.document.active_element() else {
            return false;
        };
        self.document.set_active(None);
        self.dispatch_event(Event::new(
            EventType::Blur,
            EventTarget::Node(old),
            EventData::None,
        ));
        true
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Dispatch an event and return it with its final flags.
    ///
    /// Listeners receive `&mut Window` and may add or remove listeners
    /// freely. Listeners added during a dispatch do not see it, removed
    /// ones that have not run yet are skipped.
    pub fn dispatch_event(&mut self, mut event: Event) -> Event {
        let path = self.propagation_path(event.target());
        let Some((&target, ancestors)) = path.split_last() else {
            return event;
        };

        trace!(
            "[dispatch] {} -> {:?} path_len={}",
            event.kind().name(),
            target,
            path.len()
        );

        for &current in ancestors {
            if event.propagation_stopped() {
                break;
            }
            self.invoke(current, true, Phase::Capturing, &mut event);
        }

        if !event.propagation_stopped() {
            self.invoke(target, true, Phase::AtTarget, &mut event);
        }
        if !event.propagation_stopped() {
            self.invoke(target, false, Phase::AtTarget, &mut event);
        }

        if event.kind().bubbles() {
            for &current in ancestors.iter().rev() {
                if event.propagation_stopped() {
                    break;
                }
                self.invoke(current, false, Phase::Bubbling, &mut event);
            }
        }

        event.finish();
        event
    }

    fn invoke(&mut self, current: EventTarget, capture: bool, phase: Phase, event: &mut Event) {
        let regs = self.listeners.snapshot(current, event.kind(), capture);
        for reg in regs {
            if reg.removed.get() {
                continue;
            }
            if reg.once {
                self.listeners
                    .remove(current, event.kind(), &reg.listener, capture);
            }

            event.enter(current, phase);
            (reg.listener)(self, event);

            if event.immediate_propagation_stopped() {
                break;
            }
        }
    }

    /// Window, document, then body down to the target.
    fn propagation_path(&self, target: EventTarget) -> Vec<EventTarget> {
        match target {
            EventTarget::Window => vec![EventTarget::Window],
            EventTarget::Document => vec![EventTarget::Window, EventTarget::Document],
            EventTarget::Node(node) => {
                let nodes = self.document.path_from_body(node);
                if nodes.is_empty() {
                    return Vec::new();
                }
                [EventTarget::Window, EventTarget::Document]
                    .into_iter()
                    .chain(nodes.into_iter().map(EventTarget::Node))
                    .collect()
            }
        }
    }

    // =========================================================================
    // Host input
    // =========================================================================

    /// Key events go to the focused element, or the body when nothing has focus.
    fn key_target(&self) -> EventTarget {
        EventTarget::Node(
            self.document
                .active_element()
                .unwrap_or_else(|| self.document.body()),
        )
    }

    /// Deliver a keydown. An uncancelled Tab moves focus through the whole
    /// document, the way a browser would.
    pub fn key_down(&mut self, data: KeyboardData) -> Event {
        let event = self.dispatch_event(Event::new(
            EventType::KeyDown,
            self.key_target(),
            EventData::Keyboard(data),
        ));

        let is_tab = data.is(Key::Tab) || data.key_code == 9;
        if is_tab && !event.default_prevented() {
            let body = self.document.body();
            let sequence = collect_focusable(&self.document, body);
            let current = self.document.active_element();
            if let Some(next) = sequential_target(&sequence, current, data.modifiers.shift) {
                debug!("[default] tab navigation to {next}");
                self.focus(next);
            }
        }
        event
    }

    pub fn key_up(&mut self, data: KeyboardData) -> Event {
        self.dispatch_event(Event::new(
            EventType::KeyUp,
            self.key_target(),
            EventData::Keyboard(data),
        ))
    }

    /// Keydown followed by keyup.
    pub fn press_key(&mut self, data: KeyboardData) -> (Event, Event) {
        let down = self.key_down(data);
        let up = self.key_up(data);
        (down, up)
    }

    /// Resize the viewport and fire `resize` on the window.
    pub fn resize(&mut self, width: u16, height: u16) -> Event {
        self.width = width;
        self.height = height;
        self.dispatch_event(Event::new(
            EventType::Resize,
            EventTarget::Window,
            EventData::Resize { width, height },
        ))
    }

    /// Fire `scroll` on the window for a new viewport offset.
    pub fn scroll_to(&mut self, x: i32, y: i32) -> Event {
        self.dispatch_event(Event::new(
            EventType::Scroll,
            EventTarget::Window,
            EventData::Scroll { x, y },
        ))
    }

    /// Fire a single pointer/mouse event at a node.
    pub fn pointer_event(&mut self, kind: EventType, node: NodeId, button: MouseButton) -> Event {
        self.dispatch_event(Event::new(
            kind,
            EventTarget::Node(node),
            EventData::Pointer(PointerData {
                pointer_id: 1,
                button,
                ..Default::default()
            }),
        ))
    }

    /// A full click gesture on a node: pointerdown, mousedown, pointerup,
    /// mouseup, click. Returns the five dispatched events in that order.
    ///
    /// An uncancelled mousedown focuses the target when it can take focus.
    pub fn click(&mut self, node: NodeId) -> Vec<Event> {
        const GESTURE: [EventType; 5] = [
            EventType::PointerDown,
            EventType::MouseDown,
            EventType::PointerUp,
            EventType::MouseUp,
            EventType::Click,
        ];

        let mut events = Vec::with_capacity(GESTURE.len());
        for kind in GESTURE {
            let event = self.pointer_event(kind, node, MouseButton::Left);
            if kind == EventType::MouseDown && !event.default_prevented() {
                self.focus(node);
            }
            events.push(event);
        }
        events
    }
}
