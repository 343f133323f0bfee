use crate::node::{Document, NodeId};

/// Finds the keyboard-focusable elements under a set of roots.
pub trait FocusScanner {
    /// Focusable elements across `roots`, in root order then document order.
    fn focusable_elements(&self, document: &Document, roots: &[NodeId]) -> Vec<NodeId>;
}

/// Scans the document tree: each root itself when focusable, followed by
/// its focusable descendants.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentFocusScanner;

impl FocusScanner for DocumentFocusScanner {
    fn focusable_elements(&self, document: &Document, roots: &[NodeId]) -> Vec<NodeId> {
        roots
            .iter()
            .flat_map(|root| collect_focusable(document, *root))
            .collect()
    }
}

/// Collect focusable nodes under `root` (inclusive) in document order.
pub fn collect_focusable(document: &Document, root: NodeId) -> Vec<NodeId> {
    if !document.exists(root) {
        return Vec::new();
    }
    std::iter::once(root)
        .chain(document.descendants(root))
        .filter(|id| is_focusable(document, *id))
        .collect()
}

/// A node can take focus when it is marked focusable, is not disabled,
/// and neither it nor an ancestor is hidden.
pub fn is_focusable(document: &Document, id: NodeId) -> bool {
    let Some(node) = document.get(id) else {
        return false;
    };
    if !node.focusable || node.disabled {
        return false;
    }
    document
        .path_from_body(id)
        .iter()
        .all(|n| document.get(*n).is_some_and(|node| !node.hidden))
}

/// The element Tab (or Shift+Tab when `backwards`) moves to from `current`.
///
/// Wraps at either end, and starts from the first (last) element when
/// `current` is not part of the sequence. None only for an empty sequence.
pub fn sequential_target(
    sequence: &[NodeId],
    current: Option<NodeId>,
    backwards: bool,
) -> Option<NodeId> {
    let idx = current.and_then(|c| sequence.iter().position(|id| *id == c));

    let target = if backwards {
        match idx {
            Some(i) if i > 0 => sequence.get(i - 1),
            _ => sequence.last(),
        }
    } else {
        match idx {
            Some(i) => sequence.get(i + 1).or_else(|| sequence.first()),
            None => sequence.first(),
        }
    };
    target.copied()
}
