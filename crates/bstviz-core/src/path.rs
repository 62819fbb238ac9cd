#![forbid(unsafe_code)]

//! Path-addressed traversal over immutable trees.
//!
//! Because nodes are immutable and shared, an operation cannot hold a direct
//! reference to "the current node" across a structural rebuild. Instead the
//! cursor is a [`TreePath`]: the list of left/right steps from the root. A
//! path survives any rebuild that preserves the topology above it.
//!
//! [`update_at`] performs the immutable-clone update: the addressed node is
//! replaced and every ancestor on the path is rebuilt, while untouched
//! siblings keep their `Arc` identity.
//!
//! # Failure Modes
//!
//! - A path that walks off a missing child: [`node_at`] returns `None`,
//!   [`update_at`] returns [`PathError::Missing`] with the failing depth.
//!   Callers are expected to fall back to the unmodified tree rather than
//!   crash on visualization-state drift.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::node::{NodeId, NodePatch, NodeState, TreeNode};

/// One traversal step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Descend into the left child (smaller keys).
    Left,
    /// Descend into the right child (larger keys).
    Right,
}

impl Direction {
    /// Single-character token used in positional ids.
    #[must_use]
    pub fn token(self) -> char {
        match self {
            Self::Left => 'l',
            Self::Right => 'r',
        }
    }

    /// Human-readable name for step labels.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

/// A root-relative cursor: the sequence of steps from the root.
///
/// The empty path addresses the root itself. Depth stays within the inline
/// capacity for the tree sizes this engine targets.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreePath {
    steps: SmallVec<[Direction; 8]>,
}

impl TreePath {
    /// The path addressing the root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// The steps from the root, in order.
    #[must_use]
    pub fn steps(&self) -> &[Direction] {
        &self.steps
    }

    /// Number of steps; zero addresses the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.steps.len()
    }

    /// Whether this path addresses the root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append a step in place.
    pub fn push(&mut self, dir: Direction) {
        self.steps.push(dir);
    }

    /// A copy of this path extended by one step.
    #[must_use]
    pub fn descended(&self, dir: Direction) -> Self {
        let mut next = self.clone();
        next.push(dir);
        next
    }

    /// The positional id for a node holding `value` at this path.
    ///
    /// Format: `r` plus one `l`/`r` token per step, a dash, and the value;
    /// the root holding 8 gets `r-8`. Paths are unique within a tree, so ids
    /// derived this way never collide within one normalization pass.
    #[must_use]
    pub fn id_for(&self, value: i64) -> NodeId {
        let mut s = String::with_capacity(self.steps.len() + 8);
        s.push('r');
        for step in &self.steps {
            s.push(step.token());
        }
        s.push('-');
        s.push_str(&value.to_string());
        NodeId::new(s)
    }
}

impl fmt::Display for TreePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("r")?;
        for step in &self.steps {
            write!(f, "{}", step.token())?;
        }
        Ok(())
    }
}

/// Errors from path-addressed updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// The path walked off a missing child at the given depth.
    Missing {
        /// Zero-based depth at which the child was absent.
        depth: usize,
    },
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing { depth } => {
                write!(f, "path addresses a missing node at depth {depth}")
            }
        }
    }
}

impl std::error::Error for PathError {}

/// Look up the node addressed by `path`, if it exists.
#[must_use]
pub fn node_at<'a>(
    root: Option<&'a Arc<TreeNode>>,
    path: &TreePath,
) -> Option<&'a Arc<TreeNode>> {
    let mut cur = root?;
    for step in path.steps() {
        cur = match step {
            Direction::Left => cur.left()?,
            Direction::Right => cur.right()?,
        };
    }
    Some(cur)
}

/// Replace the node addressed by `path` with `patch(node)`, rebuilding every
/// ancestor on the path and sharing all untouched subtrees.
///
/// Returns the new root. The input tree is not modified.
pub fn update_at(
    root: Option<&Arc<TreeNode>>,
    path: &TreePath,
    patch: NodePatch,
) -> Result<Option<Arc<TreeNode>>, PathError> {
    let updated = rebuild(root, path.steps(), 0, patch)?;
    Ok(Some(updated))
}

fn rebuild(
    node: Option<&Arc<TreeNode>>,
    steps: &[Direction],
    depth: usize,
    patch: NodePatch,
) -> Result<Arc<TreeNode>, PathError> {
    let node = node.ok_or(PathError::Missing { depth })?;
    match steps.split_first() {
        None => Ok(Arc::new(node.patch(patch))),
        Some((Direction::Left, rest)) => {
            let child = rebuild(node.left(), rest, depth + 1, patch)?;
            Ok(Arc::new(node.patch(NodePatch::new().left(Some(child)))))
        }
        Some((Direction::Right, rest)) => {
            let child = rebuild(node.right(), rest, depth + 1, patch)?;
            Ok(Arc::new(node.patch(NodePatch::new().right(Some(child)))))
        }
    }
}

/// Rewrite every node's state with `f`, sharing any subtree `f` leaves
/// untouched.
///
/// Used for the whole-tree passes the algorithms need: demoting the previous
/// cursor to visited and resetting all states at the end of an operation.
#[must_use]
pub fn map_states(
    root: Option<&Arc<TreeNode>>,
    f: &impl Fn(&TreeNode) -> NodeState,
) -> Option<Arc<TreeNode>> {
    let node = root?;
    let left = map_states(node.left(), f);
    let right = map_states(node.right(), f);
    let state = f(node);

    let unchanged = state == node.state()
        && same_child(left.as_ref(), node.left())
        && same_child(right.as_ref(), node.right());
    if unchanged {
        return Some(Arc::clone(node));
    }
    Some(Arc::new(node.patch(
        NodePatch::new().state(state).left(left).right(right),
    )))
}

fn same_child(a: Option<&Arc<TreeNode>>, b: Option<&Arc<TreeNode>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Arc<TreeNode> {
        // 8 with children 3 and 10; 3 has right child 6.
        let six = Arc::new(TreeNode::new(6).with_id(NodeId::new("rlr-6")));
        let three = Arc::new(
            TreeNode::new(3)
                .with_id(NodeId::new("rl-3"))
                .with_right(Some(six)),
        );
        let ten = Arc::new(TreeNode::new(10).with_id(NodeId::new("rr-10")));
        Arc::new(
            TreeNode::new(8)
                .with_id(NodeId::new("r-8"))
                .with_left(Some(three))
                .with_right(Some(ten)),
        )
    }

    #[test]
    fn node_at_root_and_deep() {
        let root = sample();
        let path = TreePath::root();
        assert_eq!(node_at(Some(&root), &path).unwrap().value(), 8);

        let deep = path.descended(Direction::Left).descended(Direction::Right);
        assert_eq!(node_at(Some(&root), &deep).unwrap().value(), 6);
    }

    #[test]
    fn node_at_missing_child_is_none() {
        let root = sample();
        let path = TreePath::root()
            .descended(Direction::Right)
            .descended(Direction::Right);
        assert!(node_at(Some(&root), &path).is_none());
    }

    #[test]
    fn node_at_empty_tree_is_none() {
        assert!(node_at(None, &TreePath::root()).is_none());
    }

    #[test]
    fn update_rebuilds_path_and_shares_siblings() {
        let root = sample();
        let right_before = Arc::clone(root.right().unwrap());

        let path = TreePath::root().descended(Direction::Left);
        let new_root = update_at(Some(&root), &path, NodePatch::new().state(NodeState::Active))
            .unwrap()
            .unwrap();

        // The addressed node changed state; the original did not.
        assert_eq!(new_root.left().unwrap().state(), NodeState::Active);
        assert_eq!(root.left().unwrap().state(), NodeState::Default);
        // The untouched right sibling is shared by reference.
        assert!(Arc::ptr_eq(new_root.right().unwrap(), &right_before));
        // The left child's own subtree is carried over.
        assert_eq!(new_root.left().unwrap().right().unwrap().value(), 6);
    }

    #[test]
    fn update_off_tree_reports_depth() {
        let root = sample();
        let path = TreePath::root()
            .descended(Direction::Right)
            .descended(Direction::Left);
        let err = update_at(Some(&root), &path, NodePatch::new()).unwrap_err();
        assert_eq!(err, PathError::Missing { depth: 2 });
    }

    #[test]
    fn update_on_empty_tree_fails_at_depth_zero() {
        let err = update_at(None, &TreePath::root(), NodePatch::new()).unwrap_err();
        assert_eq!(err, PathError::Missing { depth: 0 });
    }

    #[test]
    fn map_states_shares_untouched_subtrees() {
        let root = sample();
        let left_before = Arc::clone(root.left().unwrap());

        // Only the right child changes.
        let mapped = map_states(Some(&root), &|n| {
            if n.value() == 10 {
                NodeState::Visited
            } else {
                n.state()
            }
        })
        .unwrap();

        assert_eq!(mapped.right().unwrap().state(), NodeState::Visited);
        assert!(Arc::ptr_eq(mapped.left().unwrap(), &left_before));
    }

    #[test]
    fn map_states_identity_returns_same_root() {
        let root = sample();
        let mapped = map_states(Some(&root), &|n| n.state()).unwrap();
        assert!(Arc::ptr_eq(&mapped, &root));
    }

    #[test]
    fn positional_ids_encode_path_and_value() {
        assert_eq!(TreePath::root().id_for(8).as_str(), "r-8");
        let path = TreePath::root().descended(Direction::Left).descended(Direction::Right);
        assert_eq!(path.id_for(6).as_str(), "rlr-6");
        assert_eq!(path.to_string(), "rlr");
    }
}
