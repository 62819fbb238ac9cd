#![forbid(unsafe_code)]

//! Immutable BST node values.
//!
//! A [`TreeNode`] is a frozen value: once constructed it is never mutated.
//! Updates go through [`TreeNode::patch`], which builds a new node from the
//! old one plus a [`NodePatch`] of overrides, sharing untouched child
//! subtrees by `Arc`. Because nodes are immutable, sharing a subtree between
//! two snapshots is always safe.
//!
//! # Invariants
//!
//! 1. `left` and `right` are exclusively descendant-owned: there is no parent
//!    back-reference. Traversal position is tracked externally as a path.
//! 2. [`NodeState`] is presentation state only; it is never part of the BST
//!    ordering invariant.
//! 3. A node's [`NodeId`] is distinct from its value. Freshly normalized ids
//!    are positional; reconciliation may override them to keep renderer
//!    identities stable across steps.

use std::fmt;
use std::sync::Arc;

/// Presentation state of a node, driving rendering emphasis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum NodeState {
    /// Neutral; the terminal state of every operation sequence.
    #[default]
    Default,
    /// The traversal cursor. At most one node per intermediate snapshot.
    Active,
    /// Already passed on the root-to-cursor path.
    Visited,
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Default => "default",
            Self::Active => "active",
            Self::Visited => "visited",
        };
        f.write_str(s)
    }
}

/// Stable node identity, distinct from the node's key.
///
/// An empty id means "not yet normalized"; [`crate::snapshot::validate`]
/// reports it as an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(String);

impl NodeId {
    /// Wrap an id string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The placeholder id of a node that has not been normalized.
    #[must_use]
    pub fn unassigned() -> Self {
        Self(String::new())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this id is the unassigned placeholder.
    #[must_use]
    pub fn is_unassigned(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An immutable node in a BST snapshot.
///
/// Construct leaves with [`TreeNode::new`], attach children and state with
/// the `with_*` builders, and derive updated nodes with [`TreeNode::patch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    value: i64,
    left: Option<Arc<TreeNode>>,
    right: Option<Arc<TreeNode>>,
    state: NodeState,
    id: NodeId,
}

impl TreeNode {
    /// Create a leaf with the given key, default state, and no id.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
            state: NodeState::Default,
            id: NodeId::unassigned(),
        }
    }

    /// Set the id (builder pattern).
    #[must_use]
    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    /// Set the presentation state (builder pattern).
    #[must_use]
    pub fn with_state(mut self, state: NodeState) -> Self {
        self.state = state;
        self
    }

    /// Set the left child (builder pattern).
    #[must_use]
    pub fn with_left(mut self, left: Option<Arc<TreeNode>>) -> Self {
        self.left = left;
        self
    }

    /// Set the right child (builder pattern).
    #[must_use]
    pub fn with_right(mut self, right: Option<Arc<TreeNode>>) -> Self {
        self.right = right;
        self
    }

    /// The node's key.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.value
    }

    /// The node's presentation state.
    #[must_use]
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// The node's id.
    #[must_use]
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// The left child, if any.
    #[must_use]
    pub fn left(&self) -> Option<&Arc<TreeNode>> {
        self.left.as_ref()
    }

    /// The right child, if any.
    #[must_use]
    pub fn right(&self) -> Option<&Arc<TreeNode>> {
        self.right.as_ref()
    }

    /// Whether the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Build a new node from this one plus the overrides in `patch`.
    ///
    /// Fields not set in the patch keep this node's current values; child
    /// subtrees carried over are shared, not copied. `self` is untouched.
    #[must_use]
    pub fn patch(&self, patch: NodePatch) -> Self {
        Self {
            value: patch.value.unwrap_or(self.value),
            left: patch.left.unwrap_or_else(|| self.left.clone()),
            right: patch.right.unwrap_or_else(|| self.right.clone()),
            state: patch.state.unwrap_or(self.state),
            id: patch.id.unwrap_or_else(|| self.id.clone()),
        }
    }
}

/// Field overrides for [`TreeNode::patch`].
///
/// Child overrides are double-optional: `left(None)` explicitly detaches the
/// left subtree, while an unset field keeps the original child.
#[derive(Debug, Clone, Default)]
pub struct NodePatch {
    value: Option<i64>,
    left: Option<Option<Arc<TreeNode>>>,
    right: Option<Option<Arc<TreeNode>>>,
    state: Option<NodeState>,
    id: Option<NodeId>,
}

impl NodePatch {
    /// An empty patch; applying it clones the node unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the key.
    #[must_use]
    pub fn value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    /// Override the left child (pass `None` to detach).
    #[must_use]
    pub fn left(mut self, left: Option<Arc<TreeNode>>) -> Self {
        self.left = Some(left);
        self
    }

    /// Override the right child (pass `None` to detach).
    #[must_use]
    pub fn right(mut self, right: Option<Arc<TreeNode>>) -> Self {
        self.right = Some(right);
        self
    }

    /// Override the presentation state.
    #[must_use]
    pub fn state(mut self, state: NodeState) -> Self {
        self.state = Some(state);
        self
    }

    /// Override the id.
    #[must_use]
    pub fn id(mut self, id: NodeId) -> Self {
        self.id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_leaf_has_defaults() {
        let node = TreeNode::new(8);
        assert_eq!(node.value(), 8);
        assert_eq!(node.state(), NodeState::Default);
        assert!(node.id().is_unassigned());
        assert!(node.is_leaf());
    }

    #[test]
    fn builder_attaches_children() {
        let left = Arc::new(TreeNode::new(3));
        let right = Arc::new(TreeNode::new(10));
        let root = TreeNode::new(8)
            .with_left(Some(left.clone()))
            .with_right(Some(right));

        assert!(!root.is_leaf());
        assert_eq!(root.left().unwrap().value(), 3);
        assert_eq!(root.right().unwrap().value(), 10);
        // The child is shared, not copied.
        assert!(Arc::ptr_eq(root.left().unwrap(), &left));
    }

    #[test]
    fn patch_overrides_only_named_fields() {
        let left = Arc::new(TreeNode::new(3));
        let node = TreeNode::new(8)
            .with_id(NodeId::new("r-8"))
            .with_left(Some(left.clone()));

        let patched = node.patch(NodePatch::new().state(NodeState::Active));
        assert_eq!(patched.value(), 8);
        assert_eq!(patched.state(), NodeState::Active);
        assert_eq!(patched.id().as_str(), "r-8");
        assert!(Arc::ptr_eq(patched.left().unwrap(), &left));
        // Original is untouched.
        assert_eq!(node.state(), NodeState::Default);
    }

    #[test]
    fn patch_detaches_child_explicitly() {
        let node = TreeNode::new(8).with_left(Some(Arc::new(TreeNode::new(3))));
        let patched = node.patch(NodePatch::new().left(None));
        assert!(patched.left().is_none());
        assert!(node.left().is_some());
    }

    #[test]
    fn empty_patch_is_identity() {
        let node = TreeNode::new(5)
            .with_id(NodeId::new("r-5"))
            .with_state(NodeState::Visited);
        assert_eq!(node.patch(NodePatch::new()), node);
    }

    #[test]
    fn node_state_display_matches_wire_names() {
        assert_eq!(NodeState::Default.to_string(), "default");
        assert_eq!(NodeState::Active.to_string(), "active");
        assert_eq!(NodeState::Visited.to_string(), "visited");
    }
}
