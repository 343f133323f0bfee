use std::fmt;

use crate::error::DomError;

/// Handle to a node in a [`Document`].
///
/// Handles stay valid until the node is removed; a stale handle simply
/// stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    /// Tag name, e.g. `button` or `div`.
    pub tag: String,
    /// The `id` attribute, if any.
    pub id: Option<String>,

    // Interaction
    pub focusable: bool,
    pub disabled: bool,
    /// Hidden nodes (and their subtrees) are never focusable.
    pub hidden: bool,

    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            id: None,
            focusable: false,
            disabled: false,
            hidden: false,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn button() -> Self {
        Self::new("button").focusable(true)
    }

    pub fn link() -> Self {
        Self::new("a").focusable(true)
    }

    pub fn input() -> Self {
        Self::new("input").focusable(true)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn focusable(mut self, focusable: bool) -> Self {
        self.focusable = focusable;
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// An arena-backed node tree rooted at `body`.
///
/// The document also owns the focused ("active") element. Changing focus
/// goes through [`crate::Window::focus`] so focus/blur events fire.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<Option<Node>>,
    body: NodeId,
    active: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            nodes: vec![Some(Node::new("body"))],
            body: NodeId(0),
            active: None,
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0).and_then(Option::as_mut)
    }

    pub fn exists(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Append a new node as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeId, mut node: Node) -> Result<NodeId, DomError> {
        if !self.exists(parent) {
            return Err(DomError::NodeNotFound(parent));
        }

        let id = NodeId(self.nodes.len());
        node.parent = Some(parent);
        node.children.clear();
        self.nodes.push(Some(node));

        if let Some(p) = self.get_mut(parent) {
            p.children.push(id);
        }
        Ok(id)
    }

    /// Move an existing node (with its subtree) to the end of `parent`'s children.
    pub fn move_to(&mut self, node: NodeId, parent: NodeId) -> Result<(), DomError> {
        if node == self.body {
            return Err(DomError::DetachBody);
        }
        if !self.exists(node) {
            return Err(DomError::NodeNotFound(node));
        }
        if !self.exists(parent) {
            return Err(DomError::NodeNotFound(parent));
        }
        if self.contains(node, parent) {
            return Err(DomError::WouldCreateCycle { node, parent });
        }

        self.unlink(node);
        if let Some(n) = self.get_mut(node) {
            n.parent = Some(parent);
        }
        if let Some(p) = self.get_mut(parent) {
            p.children.push(node);
        }
        Ok(())
    }

    /// Remove a node and its whole subtree. Returns the removed ids.
    ///
    /// Clears focus when the focused element was inside the subtree.
    pub fn remove(&mut self, node: NodeId) -> Result<Vec<NodeId>, DomError> {
        if node == self.body {
            return Err(DomError::DetachBody);
        }
        if !self.exists(node) {
            return Err(DomError::NodeNotFound(node));
        }

        self.unlink(node);

        let mut removed = vec![node];
        removed.extend(self.descendants(node));
        if self.active.is_some_and(|a| removed.contains(&a)) {
            self.active = None;
        }
        for id in &removed {
            self.nodes[id.0] = None;
        }
        Ok(removed)
    }

    fn unlink(&mut self, node: NodeId) {
        let parent = self.get(node).and_then(Node::parent);
        if let Some(p) = parent.and_then(|p| self.get_mut(p)) {
            p.children.retain(|c| *c != node);
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Node::parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Node::children).unwrap_or(&[])
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    ///
    /// False when either node no longer exists.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if !self.exists(ancestor) || !self.exists(node) {
            return false;
        }

        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Ancestors from the body down to (and including) `node`.
    pub fn path_from_body(&self, node: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut current = self.get(node).map(|_| node);
        while let Some(id) = current {
            path.push(id);
            current = self.parent(id);
        }
        path.reverse();
        path
    }

    /// Descendants of `node` in document (pre-)order, excluding `node`.
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(node).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    /// The currently focused element.
    pub fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    pub(crate) fn set_active(&mut self, node: Option<NodeId>) {
        self.active = node;
    }
}
