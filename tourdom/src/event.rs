use crate::node::NodeId;

/// Event names understood by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventType {
    KeyDown,
    KeyUp,
    Resize,
    Scroll,
    PointerDown,
    MouseDown,
    PointerUp,
    MouseUp,
    Click,
    Focus,
    Blur,
}

impl EventType {
    /// The DOM event name, e.g. `"pointerdown"`.
    pub fn name(self) -> &'static str {
        match self {
            EventType::KeyDown => "keydown",
            EventType::KeyUp => "keyup",
            EventType::Resize => "resize",
            EventType::Scroll => "scroll",
            EventType::PointerDown => "pointerdown",
            EventType::MouseDown => "mousedown",
            EventType::PointerUp => "pointerup",
            EventType::MouseUp => "mouseup",
            EventType::Click => "click",
            EventType::Focus => "focus",
            EventType::Blur => "blur",
        }
    }

    pub fn bubbles(self) -> bool {
        !matches!(self, EventType::Resize | EventType::Focus | EventType::Blur)
    }

    pub fn cancelable(self) -> bool {
        matches!(
            self,
            EventType::KeyDown
                | EventType::KeyUp
                | EventType::PointerDown
                | EventType::MouseDown
                | EventType::PointerUp
                | EventType::MouseUp
                | EventType::Click
        )
    }
}

/// Where a listener is attached, and where an event is aimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Document,
    Node(NodeId),
}

/// Dispatch phase of an event while a listener runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    None,
    Capturing,
    AtTarget,
    Bubbling,
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Insert,
    F(u8),
}

impl Key {
    /// The legacy `KeyboardEvent.keyCode` value, 0 when there is none.
    pub fn legacy_code(self) -> u32 {
        match self {
            Key::Backspace => 8,
            Key::Tab => 9,
            Key::Enter => 13,
            Key::Escape => 27,
            Key::PageUp => 33,
            Key::PageDown => 34,
            Key::End => 35,
            Key::Home => 36,
            Key::Left => 37,
            Key::Up => 38,
            Key::Right => 39,
            Key::Down => 40,
            Key::Insert => 45,
            Key::Delete => 46,
            Key::F(n) if (1..=12).contains(&n) => 111 + n as u32,
            Key::Char(c) if c.is_ascii_alphanumeric() => c.to_ascii_uppercase() as u32,
            Key::Char(' ') => 32,
            _ => 0,
        }
    }
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

/// Keyboard payload.
///
/// `key` is the modern key-name field; older hosts only fill in the
/// numeric `key_code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyboardData {
    pub key: Option<Key>,
    pub key_code: u32,
    pub modifiers: Modifiers,
    pub repeat: bool,
}

impl KeyboardData {
    pub fn new(key: Key) -> Self {
        Self {
            key: Some(key),
            key_code: key.legacy_code(),
            modifiers: Modifiers::default(),
            repeat: false,
        }
    }

    /// A key event that only carries the legacy numeric code.
    pub fn legacy(key_code: u32) -> Self {
        Self {
            key: None,
            key_code,
            modifiers: Modifiers::default(),
            repeat: false,
        }
    }

    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn is(&self, key: Key) -> bool {
        self.key == Some(key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerData {
    pub pointer_id: u32,
    pub button: MouseButton,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventData {
    #[default]
    None,
    Keyboard(KeyboardData),
    Pointer(PointerData),
    Resize { width: u16, height: u16 },
    Scroll { x: i32, y: i32 },
}

/// A dispatched event and its propagation flags.
#[derive(Debug, Clone)]
pub struct Event {
    kind: EventType,
    target: EventTarget,
    current_target: EventTarget,
    phase: Phase,
    data: EventData,
    default_prevented: bool,
    propagation_stopped: bool,
    immediate_propagation_stopped: bool,
}

impl Event {
    pub fn new(kind: EventType, target: EventTarget, data: EventData) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            phase: Phase::None,
            data,
            default_prevented: false,
            propagation_stopped: false,
            immediate_propagation_stopped: false,
        }
    }

    pub fn kind(&self) -> EventType {
        self.kind
    }

    pub fn target(&self) -> EventTarget {
        self.target
    }

    /// The target as a node, if the event was aimed at one.
    pub fn target_node(&self) -> Option<NodeId> {
        match self.target {
            EventTarget::Node(id) => Some(id),
            _ => None,
        }
    }

    pub fn current_target(&self) -> EventTarget {
        self.current_target
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn keyboard(&self) -> Option<&KeyboardData> {
        match &self.data {
            EventData::Keyboard(k) => Some(k),
            _ => None,
        }
    }

    /// Cancel the host's default action. Ignored for non-cancelable events.
    pub fn prevent_default(&mut self) {
        if self.kind.cancelable() {
            self.default_prevented = true;
        }
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Stop the event from reaching further targets. Remaining listeners on
    /// the current target still run.
    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    /// Stop the event outright, including the remaining listeners on the
    /// current target.
    pub fn stop_immediate_propagation(&mut self) {
        self.propagation_stopped = true;
        self.immediate_propagation_stopped = true;
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }

    pub fn immediate_propagation_stopped(&self) -> bool {
        self.immediate_propagation_stopped
    }

    pub(crate) fn enter(&mut self, current: EventTarget, phase: Phase) {
        self.current_target = current;
        self.phase = phase;
    }

    pub(crate) fn finish(&mut self) {
        self.current_target = self.target;
        self.phase = Phase::None;
    }
}

// Conversion from crossterm types

/// The key a terminal key code stands for, if the window models it.
fn key_from_code(code: crossterm::event::KeyCode) -> Option<Key> {
    use crossterm::event::KeyCode;
    let key = match code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab | KeyCode::BackTab => Key::Tab,
        KeyCode::Esc => Key::Escape,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Insert => Key::Insert,
        KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(key)
}

impl From<crossterm::event::KeyModifiers> for Modifiers {
    fn from(mods: crossterm::event::KeyModifiers) -> Self {
        use crossterm::event::KeyModifiers;
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

impl From<crossterm::event::KeyEvent> for KeyboardData {
    fn from(ev: crossterm::event::KeyEvent) -> Self {
        use crossterm::event::{KeyCode, KeyEventKind};
        // Keys the window does not model arrive as "Unidentified"
        let mut data = match key_from_code(ev.code) {
            Some(key) => KeyboardData::new(key),
            None => KeyboardData::legacy(0),
        }
        .modifiers(ev.modifiers.into());
        // Terminals report Shift+Tab as its own key code
        if ev.code == KeyCode::BackTab {
            data.modifiers.shift = true;
        }
        data.repeat = ev.kind == KeyEventKind::Repeat;
        data
    }
}

/// Which DOM event a terminal key event becomes.
pub fn keyboard_event_type(kind: crossterm::event::KeyEventKind) -> EventType {
    match kind {
        crossterm::event::KeyEventKind::Release => EventType::KeyUp,
        _ => EventType::KeyDown,
    }
}
