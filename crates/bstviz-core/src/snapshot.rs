#![forbid(unsafe_code)]

//! Tree snapshots: one immutable value per animation step.
//!
//! A [`Snapshot`] bundles a root (possibly empty), an optional human-readable
//! step label, and zero or more [`AnimationHint`]s describing the semantic
//! transition that produced it. Sequences of snapshots are what the engine
//! hands to the rendering side; no snapshot is ever mutated after it is
//! pushed into a sequence.
//!
//! Loosely-specified trees enter through [`TreeSpec`]/[`NodeSpec`] — ids and
//! states optional — and [`normalize`] turns them into fully-populated
//! snapshots.
//!
//! # Invariants
//!
//! 1. Normalization is idempotent: normalizing `snapshot.to_spec()` yields a
//!    structurally identical snapshot with identical ids.
//! 2. Normalization assigns an id to every reachable node; positional
//!    derivation guarantees no two positions share an id within one pass.
//! 3. [`validate`] reports drift (unassigned/duplicate ids, duplicate
//!    values); it does not re-check BST ordering.

use std::sync::Arc;

use crate::hint::AnimationHint;
use crate::node::{NodeId, NodeState, TreeNode};
use crate::path::{Direction, TreePath};

/// One immutable tree value at one animation step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Snapshot {
    root: Option<Arc<TreeNode>>,
    name: Option<String>,
    hints: Vec<AnimationHint>,
}

impl Snapshot {
    /// An empty snapshot (no tree, no label, no hints).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A snapshot around an existing root.
    #[must_use]
    pub fn new(root: Option<Arc<TreeNode>>) -> Self {
        Self {
            root,
            name: None,
            hints: Vec::new(),
        }
    }

    /// Set the step label (builder pattern).
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a hint (builder pattern).
    #[must_use]
    pub fn with_hint(mut self, hint: AnimationHint) -> Self {
        self.hints.push(hint);
        self
    }

    /// This snapshot's labels and hints around a different root.
    ///
    /// Used by reconciliation, which rewrites ids but must preserve the
    /// step's name and hints unchanged.
    #[must_use]
    pub fn with_root(&self, root: Option<Arc<TreeNode>>) -> Self {
        Self {
            root,
            name: self.name.clone(),
            hints: self.hints.clone(),
        }
    }

    /// The root node, if the tree is non-empty.
    #[must_use]
    pub fn root(&self) -> Option<&Arc<TreeNode>> {
        self.root.as_ref()
    }

    /// The step label.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Hints describing the transition into this snapshot.
    #[must_use]
    pub fn hints(&self) -> &[AnimationHint] {
        &self.hints
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of reachable nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        self.for_each_node(&mut |_| count += 1);
        count
    }

    /// Visit every reachable node in pre-order.
    pub fn for_each_node(&self, f: &mut impl FnMut(&TreeNode)) {
        fn walk(node: Option<&Arc<TreeNode>>, f: &mut impl FnMut(&TreeNode)) {
            if let Some(node) = node {
                f(node);
                walk(node.left(), f);
                walk(node.right(), f);
            }
        }
        walk(self.root(), f);
    }

    /// Keys in in-order (ascending for a valid BST).
    #[must_use]
    pub fn in_order(&self) -> Vec<i64> {
        fn walk(node: Option<&Arc<TreeNode>>, out: &mut Vec<i64>) {
            if let Some(node) = node {
                walk(node.left(), out);
                out.push(node.value());
                walk(node.right(), out);
            }
        }
        let mut out = Vec::new();
        walk(self.root(), &mut out);
        out
    }

    /// Re-describe this snapshot as a loose spec, preserving ids and states.
    #[must_use]
    pub fn to_spec(&self) -> TreeSpec {
        fn walk(node: &Arc<TreeNode>) -> NodeSpec {
            let mut spec = NodeSpec::new(node.value())
                .id(node.id().clone())
                .state(node.state());
            if let Some(left) = node.left() {
                spec = spec.left(walk(left));
            }
            if let Some(right) = node.right() {
                spec = spec.right(walk(right));
            }
            spec
        }
        TreeSpec {
            root: self.root().map(walk),
            name: self.name.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loose input specs
// ---------------------------------------------------------------------------

/// A loosely-specified node: id and state optional.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeSpec {
    /// The node's key.
    pub value: i64,
    /// Left subtree, if any.
    pub left: Option<Box<NodeSpec>>,
    /// Right subtree, if any.
    pub right: Option<Box<NodeSpec>>,
    /// Presentation state; `None` normalizes to [`NodeState::Default`].
    pub state: Option<NodeState>,
    /// Stable id; `None` normalizes to the positional id.
    pub id: Option<NodeId>,
}

impl NodeSpec {
    /// A bare node holding `value`.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self {
            value,
            left: None,
            right: None,
            state: None,
            id: None,
        }
    }

    /// Attach a left subtree (builder pattern).
    #[must_use]
    pub fn left(mut self, left: NodeSpec) -> Self {
        self.left = Some(Box::new(left));
        self
    }

    /// Attach a right subtree (builder pattern).
    #[must_use]
    pub fn right(mut self, right: NodeSpec) -> Self {
        self.right = Some(Box::new(right));
        self
    }

    /// Pin the state (builder pattern).
    #[must_use]
    pub fn state(mut self, state: NodeState) -> Self {
        self.state = Some(state);
        self
    }

    /// Pin the id (builder pattern).
    #[must_use]
    pub fn id(mut self, id: NodeId) -> Self {
        self.id = Some(id);
        self
    }
}

/// A loosely-specified tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeSpec {
    /// Root node spec, or `None` for an empty tree.
    pub root: Option<NodeSpec>,
    /// Optional step label carried into the snapshot.
    pub name: Option<String>,
}

impl TreeSpec {
    /// An empty tree spec.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// A tree spec around a root node.
    #[must_use]
    pub fn with_root(root: NodeSpec) -> Self {
        Self {
            root: Some(root),
            name: None,
        }
    }
}

/// Turn a loose spec into a fully-populated snapshot.
///
/// Every node gets an id (existing ids are preserved, missing ones become
/// positional) and a state (missing ones become [`NodeState::Default`]).
/// Idempotent over already-normalized input.
#[must_use]
pub fn normalize(spec: TreeSpec) -> Snapshot {
    fn walk(spec: NodeSpec, path: &TreePath) -> Arc<TreeNode> {
        let id = match spec.id {
            Some(id) if !id.is_unassigned() => id,
            _ => path.id_for(spec.value),
        };
        let left = spec
            .left
            .map(|l| walk(*l, &path.descended(Direction::Left)));
        let right = spec
            .right
            .map(|r| walk(*r, &path.descended(Direction::Right)));
        Arc::new(
            TreeNode::new(spec.value)
                .with_id(id)
                .with_state(spec.state.unwrap_or_default())
                .with_left(left)
                .with_right(right),
        )
    }

    let root = spec.root.map(|r| walk(r, &TreePath::root()));
    let snapshot = Snapshot::new(root);
    #[cfg(feature = "tracing")]
    tracing::trace!(nodes = snapshot.node_count(), "normalized tree spec");
    match spec.name {
        Some(name) => snapshot.named(name),
        None => snapshot,
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Outcome of [`validate`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    /// Hard problems: the snapshot should not be rendered.
    pub errors: Vec<String>,
    /// Cosmetic drift worth surfacing but safe to render.
    pub warnings: Vec<String>,
}

impl ValidationReport {
    /// Whether the snapshot has no errors (warnings allowed).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check a snapshot for identity drift.
///
/// Errors: unassigned ids, duplicate ids, duplicate values. Warning: more
/// than one active node (a cursor glitch, cosmetic only). BST ordering is a
/// test-helper concern and is not re-checked here.
#[must_use]
pub fn validate(snapshot: &Snapshot) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut seen_ids: Vec<NodeId> = Vec::new();
    let mut seen_values: Vec<i64> = Vec::new();
    let mut active = 0usize;

    snapshot.for_each_node(&mut |node| {
        if node.id().is_unassigned() {
            report
                .errors
                .push(format!("node {} has no id", node.value()));
        } else if seen_ids.contains(node.id()) {
            report
                .errors
                .push(format!("duplicate id {}", node.id()));
        } else {
            seen_ids.push(node.id().clone());
        }

        if seen_values.contains(&node.value()) {
            report
                .errors
                .push(format!("duplicate value {}", node.value()));
        } else {
            seen_values.push(node.value());
        }

        if node.state() == NodeState::Active {
            active += 1;
        }
    });

    if active > 1 {
        report
            .warnings
            .push(format!("{active} active nodes; expected at most one"));
    }

    #[cfg(feature = "tracing")]
    if !report.is_valid() {
        tracing::debug!(errors = report.errors.len(), "snapshot failed validation");
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec() -> TreeSpec {
        TreeSpec::with_root(
            NodeSpec::new(8)
                .left(NodeSpec::new(3).right(NodeSpec::new(6)))
                .right(NodeSpec::new(10)),
        )
    }

    #[test]
    fn normalize_assigns_positional_ids_and_default_states() {
        let snapshot = normalize(sample_spec());
        let root = snapshot.root().unwrap();
        assert_eq!(root.id().as_str(), "r-8");
        assert_eq!(root.left().unwrap().id().as_str(), "rl-3");
        assert_eq!(root.left().unwrap().right().unwrap().id().as_str(), "rlr-6");
        assert_eq!(root.right().unwrap().id().as_str(), "rr-10");

        let mut all_default = true;
        snapshot.for_each_node(&mut |n| all_default &= n.state() == NodeState::Default);
        assert!(all_default);
    }

    #[test]
    fn normalize_preserves_existing_ids() {
        let spec = TreeSpec::with_root(
            NodeSpec::new(8)
                .id(NodeId::new("kept"))
                .left(NodeSpec::new(3)),
        );
        let snapshot = normalize(spec);
        assert_eq!(snapshot.root().unwrap().id().as_str(), "kept");
        assert_eq!(snapshot.root().unwrap().left().unwrap().id().as_str(), "rl-3");
    }

    #[test]
    fn normalize_is_idempotent() {
        let first = normalize(sample_spec());
        let second = normalize(first.to_spec());
        assert_eq!(first, second);
    }

    #[test]
    fn normalize_empty_tree() {
        let snapshot = normalize(TreeSpec::empty());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.node_count(), 0);
    }

    #[test]
    fn in_order_is_sorted_for_valid_bst() {
        let snapshot = normalize(sample_spec());
        assert_eq!(snapshot.in_order(), vec![3, 6, 8, 10]);
    }

    #[test]
    fn validate_accepts_normalized_tree() {
        let report = validate(&normalize(sample_spec()));
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn validate_flags_unassigned_id() {
        let root = Arc::new(TreeNode::new(8));
        let report = validate(&Snapshot::new(Some(root)));
        assert!(!report.is_valid());
        assert!(report.errors[0].contains("no id"));
    }

    #[test]
    fn validate_flags_duplicate_values() {
        let spec = TreeSpec::with_root(NodeSpec::new(5).left(NodeSpec::new(5)));
        let report = validate(&normalize(spec));
        assert!(!report.is_valid());
        assert!(report.errors.iter().any(|e| e.contains("duplicate value 5")));
    }

    #[test]
    fn validate_warns_on_multiple_active_nodes() {
        let spec = TreeSpec::with_root(
            NodeSpec::new(8)
                .state(NodeState::Active)
                .left(NodeSpec::new(3).state(NodeState::Active)),
        );
        let report = validate(&normalize(spec));
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn snapshot_builder_carries_name_and_hints() {
        let snapshot = Snapshot::empty()
            .named("Tree is empty")
            .with_hint(AnimationHint::shake_tree());
        assert_eq!(snapshot.name(), Some("Tree is empty"));
        assert_eq!(snapshot.hints().len(), 1);
    }

    #[test]
    fn with_root_preserves_name_and_hints() {
        let base = Snapshot::empty()
            .named("step")
            .with_hint(AnimationHint::appear(1));
        let root = normalize(sample_spec()).root().cloned();
        let rebuilt = base.with_root(root);
        assert_eq!(rebuilt.name(), Some("step"));
        assert_eq!(rebuilt.hints(), base.hints());
        assert_eq!(rebuilt.node_count(), 4);
    }
}
