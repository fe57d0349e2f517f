//! Scene error types

use crate::scene::NodeId;

/// Result type for structural and lookup operations on the node tree
pub type SceneResult<T> = Result<T, SceneError>;

/// Violations of the node tree's structural rules.
///
/// These indicate a bug in the calling code rather than a transient
/// condition. An operation that rejects its arguments leaves the tree
/// untouched; see [`Scene::set_parent`](crate::scene::Scene::set_parent) for
/// the one case where hooks can fail a move halfway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The handle does not refer to a live node
    #[error("Node {0:?} does not exist")]
    NodeNotFound(NodeId),

    /// A node was offered as its own child
    #[error("Node {0:?} cannot be its own child")]
    SelfParenting(NodeId),

    /// The child is already attached somewhere
    #[error("Node {child:?} already has parent {parent:?}")]
    AlreadyParented {
        /// Node being attached
        child: NodeId,
        /// Its current parent
        parent: NodeId,
    },

    /// The child is the root of the scene tree
    #[error("Node {0:?} is the scene root and cannot be attached as a child")]
    IsRoot(NodeId),

    /// The child is an ancestor of the would-be parent
    #[error("Attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Node being attached
        child: NodeId,
        /// Requested parent, a descendant of `child`
        parent: NodeId,
    },

    /// A child or sibling index outside the valid range
    #[error("Index {index} out of range for {len} children")]
    IndexOutOfRange {
        /// Requested index, possibly negative
        index: isize,
        /// Number of children
        len: usize,
    },

    /// A sibling operation on a node without a parent
    #[error("Node {0:?} has no parent")]
    NoParent(NodeId),

    /// The scene tree already has a root
    #[error("Scene tree already has root {0:?}")]
    RootAlreadySet(NodeId),

    /// A node meant to become the root is not detached
    #[error("Node {0:?} must be detached to become the scene root")]
    RootNotDetached(NodeId),
}
