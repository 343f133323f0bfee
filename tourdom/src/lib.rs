pub mod error;
pub mod event;
pub mod focus;
pub mod frame;
pub mod listener;
pub mod node;
pub mod window;

pub use error::DomError;
pub use event::{
    keyboard_event_type, Event, EventData, EventTarget, EventType, Key, KeyboardData, Modifiers,
    MouseButton, Phase, PointerData,
};
pub use focus::{
    collect_focusable, is_focusable, sequential_target, DocumentFocusScanner, FocusScanner,
};
pub use frame::FrameHandle;
pub use listener::{listener, Listener, ListenerOptions};
pub use node::{Document, Node, NodeId};
pub use window::Window;
