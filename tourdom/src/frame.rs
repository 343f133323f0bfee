use std::collections::BTreeMap;
use std::fmt;

use crate::window::Window;

/// Token returned by [`Window::request_animation_frame`]. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame:{}", self.0)
    }
}

pub(crate) type FrameCallback = Box<dyn FnOnce(&mut Window)>;

/// Pending animation-frame callbacks, ordered by request.
pub(crate) struct FrameQueue {
    next: u64,
    pending: BTreeMap<u64, FrameCallback>,
    ticks: u64,
}

impl Default for FrameQueue {
    fn default() -> Self {
        Self {
            next: 1,
            pending: BTreeMap::new(),
            ticks: 0,
        }
    }
}

impl FrameQueue {
    pub(crate) fn request(&mut self, callback: FrameCallback) -> FrameHandle {
        let id = self.next;
        self.next += 1;
        self.pending.insert(id, callback);
        FrameHandle(id)
    }

    pub(crate) fn cancel(&mut self, handle: FrameHandle) -> bool {
        self.pending.remove(&handle.0).is_some()
    }

    pub(crate) fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains_key(&handle.0)
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    /// Start a tick: the handles due now. Callbacks requested while the
    /// tick runs wait for the next one.
    pub(crate) fn begin_tick(&mut self) -> Vec<FrameHandle> {
        self.ticks += 1;
        self.pending.keys().map(|id| FrameHandle(*id)).collect()
    }

    /// Take a due callback, unless it was cancelled earlier in the tick.
    pub(crate) fn take(&mut self, handle: FrameHandle) -> Option<FrameCallback> {
        self.pending.remove(&handle.0)
    }

    pub(crate) fn ticks(&self) -> u64 {
        self.ticks
    }
}
