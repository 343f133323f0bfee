use thiserror::Error;

use crate::node::NodeId;

/// Errors raised by document tree mutation.
///
/// Event dispatch itself never fails; only building or rearranging the
/// tree can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The node does not exist (never created, or removed).
    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    /// The body is the document root and cannot be removed or moved.
    #[error("the document body cannot be detached")]
    DetachBody,

    /// Moving a node under one of its own descendants.
    #[error("cannot move node {node} under its descendant {parent}")]
    WouldCreateCycle { node: NodeId, parent: NodeId },
}
