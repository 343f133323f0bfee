//! Key-value tour state.

use std::collections::HashMap;

use tourdom::{FrameHandle, NodeId};

/// State keys. The reserved keys are the ones the tour itself reads and
/// writes; `Custom` is free for callers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StateKey {
    IsInitialized,
    ActiveElement,
    ActiveStep,
    PreviousElement,
    PreviousStep,
    Popover,
    /// Pending highlight-refresh frame.
    ResizeTimeout,
    Custom(String),
}

impl StateKey {
    pub fn name(&self) -> &str {
        match self {
            StateKey::IsInitialized => "isInitialized",
            StateKey::ActiveElement => "__activeElement",
            StateKey::ActiveStep => "__activeStep",
            StateKey::PreviousElement => "__previousElement",
            StateKey::PreviousStep => "__previousStep",
            StateKey::Popover => "popover",
            StateKey::ResizeTimeout => "__resizeTimeout",
            StateKey::Custom(name) => name,
        }
    }
}

impl From<&str> for StateKey {
    fn from(name: &str) -> Self {
        match name {
            "isInitialized" => StateKey::IsInitialized,
            "__activeElement" => StateKey::ActiveElement,
            "__activeStep" => StateKey::ActiveStep,
            "__previousElement" => StateKey::PreviousElement,
            "__previousStep" => StateKey::PreviousStep,
            "popover" => StateKey::Popover,
            "__resizeTimeout" => StateKey::ResizeTimeout,
            other => StateKey::Custom(other.to_string()),
        }
    }
}

/// The rendered popover. Only `wrapper` is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Popover {
    pub wrapper: NodeId,
    pub arrow: Option<NodeId>,
    pub title: Option<NodeId>,
    pub description: Option<NodeId>,
    pub footer: Option<NodeId>,
    pub next_button: Option<NodeId>,
    pub previous_button: Option<NodeId>,
    pub close_button: Option<NodeId>,
}

impl Popover {
    pub fn new(wrapper: NodeId) -> Self {
        Self {
            wrapper,
            arrow: None,
            title: None,
            description: None,
            footer: None,
            next_button: None,
            previous_button: None,
            close_button: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateValue {
    Bool(bool),
    Index(usize),
    Node(NodeId),
    Frame(FrameHandle),
    Popover(Popover),
    Text(String),
}

impl From<bool> for StateValue {
    fn from(v: bool) -> Self {
        StateValue::Bool(v)
    }
}

impl From<usize> for StateValue {
    fn from(v: usize) -> Self {
        StateValue::Index(v)
    }
}

impl From<NodeId> for StateValue {
    fn from(v: NodeId) -> Self {
        StateValue::Node(v)
    }
}

impl From<FrameHandle> for StateValue {
    fn from(v: FrameHandle) -> Self {
        StateValue::Frame(v)
    }
}

impl From<Popover> for StateValue {
    fn from(v: Popover) -> Self {
        StateValue::Popover(v)
    }
}

impl From<String> for StateValue {
    fn from(v: String) -> Self {
        StateValue::Text(v)
    }
}

/// Tour state, read and written by key.
///
/// Typed getters return `None` both for missing keys and for a value of
/// the wrong kind, so callers only ever branch on presence.
#[derive(Debug, Default, Clone)]
pub struct StateStore {
    values: HashMap<StateKey, StateValue>,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &StateKey) -> Option<&StateValue> {
        self.values.get(key)
    }

    /// Store a value, returning the previous one.
    pub fn set(&mut self, key: StateKey, value: impl Into<StateValue>) -> Option<StateValue> {
        self.values.insert(key, value.into())
    }

    pub fn remove(&mut self, key: &StateKey) -> Option<StateValue> {
        self.values.remove(key)
    }

    /// Drop all state.
    pub fn reset(&mut self) {
        self.values.clear();
    }

    pub fn get_bool(&self, key: &StateKey) -> Option<bool> {
        match self.get(key)? {
            StateValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_node(&self, key: &StateKey) -> Option<NodeId> {
        match self.get(key)? {
            StateValue::Node(v) => Some(*v),
            _ => None,
        }
    }

    pub fn get_frame(&self, key: &StateKey) -> Option<FrameHandle> {
        match self.get(key)? {
            StateValue::Frame(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.get_bool(&StateKey::IsInitialized).unwrap_or(false)
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.get_node(&StateKey::ActiveElement)
    }

    pub fn popover(&self) -> Option<&Popover> {
        match self.get(&StateKey::Popover)? {
            StateValue::Popover(p) => Some(p),
            _ => None,
        }
    }

    pub fn resize_timeout(&self) -> Option<FrameHandle> {
        self.get_frame(&StateKey::ResizeTimeout)
    }
}
