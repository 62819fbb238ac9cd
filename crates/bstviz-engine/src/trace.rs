#![forbid(unsafe_code)]

//! Trace accumulator for operation sequences.
//!
//! A [`Trace`] is the traversal state an algorithm threads through its loop:
//! the working tree (states evolve step by step), the cursor path, and the
//! snapshots emitted so far. It replaces the stateful builder object of the
//! original design with an explicit accumulator owned by the operation
//! function; nothing outside the function ever observes it.
//!
//! # Invariants
//!
//! 1. Every emitted snapshot captures the working tree *at emission time*;
//!    later mutations build new trees and never touch emitted snapshots.
//! 2. [`Trace::focus_current`] first demotes any active node to visited, so
//!    at most one node is active in any emitted snapshot.
//! 3. A cursor that no longer addresses a node leaves the tree unchanged
//!    (visualization drift degrades, it does not crash).

use std::sync::Arc;

use bstviz_core::hint::AnimationHint;
use bstviz_core::node::{NodePatch, NodeState, TreeNode};
use bstviz_core::path::{Direction, TreePath, map_states, node_at, update_at};
use bstviz_core::snapshot::Snapshot;

/// Traversal state threaded through one operation.
#[derive(Debug, Clone)]
pub(crate) struct Trace {
    root: Option<Arc<TreeNode>>,
    path: TreePath,
    steps: Vec<Snapshot>,
}

impl Trace {
    /// Start a trace from the operation's input tree; cursor at the root.
    pub(crate) fn start(tree: &Snapshot) -> Self {
        Self {
            root: tree.root().cloned(),
            path: TreePath::root(),
            steps: Vec::new(),
        }
    }

    /// The node under the cursor, if any.
    pub(crate) fn current(&self) -> Option<Arc<TreeNode>> {
        node_at(self.root.as_ref(), &self.path).cloned()
    }

    /// Move the cursor one step down.
    pub(crate) fn descend(&mut self, dir: Direction) {
        self.path.push(dir);
    }

    /// Make the cursor node the single active node.
    ///
    /// Demotes whichever node was active to visited first, so the "visited"
    /// trail along the root-to-cursor path stays visible in every later step.
    pub(crate) fn focus_current(&mut self) {
        self.root = map_states(self.root.as_ref(), &|n| {
            if n.state() == NodeState::Active {
                NodeState::Visited
            } else {
                n.state()
            }
        });
        self.apply_current(NodePatch::new().state(NodeState::Active));
    }

    /// Set the state of the cursor node.
    pub(crate) fn set_current_state(&mut self, state: NodeState) {
        self.apply_current(NodePatch::new().state(state));
    }

    /// Attach a fresh active node as the cursor node's `dir` child.
    ///
    /// The new node gets the positional id for its path, so it reads as a
    /// freshly normalized node until reconciliation decides otherwise.
    pub(crate) fn attach_child(&mut self, dir: Direction, value: i64) {
        let child_path = self.path.descended(dir);
        let child = Arc::new(
            TreeNode::new(value)
                .with_id(child_path.id_for(value))
                .with_state(NodeState::Active),
        );
        let patch = match dir {
            Direction::Left => NodePatch::new().left(Some(child)),
            Direction::Right => NodePatch::new().right(Some(child)),
        };
        self.apply_current(patch);
    }

    /// Plant a fresh active root into an empty trace.
    pub(crate) fn plant_root(&mut self, value: i64) {
        let path = TreePath::root();
        self.root = Some(Arc::new(
            TreeNode::new(value)
                .with_id(path.id_for(value))
                .with_state(NodeState::Active),
        ));
    }

    /// Emit a snapshot of the working tree with a label and hints.
    pub(crate) fn push(&mut self, name: String, hints: Vec<AnimationHint>) {
        let mut snapshot = Snapshot::new(self.root.clone()).named(name);
        for hint in hints {
            snapshot = snapshot.with_hint(hint);
        }
        self.steps.push(snapshot);
    }

    /// Reset every node to the neutral state, emit the terminal snapshot,
    /// and hand back the finished sequence.
    pub(crate) fn reset_and_finish(mut self, name: &str) -> Vec<Snapshot> {
        self.root = map_states(self.root.as_ref(), &|_| NodeState::Default);
        self.push(name.to_string(), Vec::new());
        self.steps
    }

    /// Hand back the sequence without a trailing reset.
    pub(crate) fn finish(self) -> Vec<Snapshot> {
        self.steps
    }

    fn apply_current(&mut self, patch: NodePatch) {
        // A stale cursor is a caller error with cosmetic consequences only;
        // keep the tree as-is rather than panic.
        if let Ok(root) = update_at(self.root.as_ref(), &self.path, patch) {
            self.root = root;
        }
    }
}
