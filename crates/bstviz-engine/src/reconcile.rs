#![forbid(unsafe_code)]

//! Reconciliation: stable ids across consecutive renders.
//!
//! Renderers diff nodes and links by id to decide enter/update/exit. When a
//! step replaces the tree value wholesale (immutable snapshots do this every
//! step), freshly normalized ids would make every element look new and break
//! transition animations. [`reconcile`] walks the previously rendered tree
//! and the incoming tree in parallel and grants each positionally matching
//! node (same value, same position) the previous node's id.
//!
//! This is deliberately a positional pass, not a general tree diff: BST
//! operations move one node at a time, so positional matching captures the
//! common case in O(n) over the smaller tree. A value mismatch at a position
//! keeps the incoming subtree's own ids; no cross-matching is attempted.
//!
//! The mapping is recomputed per call and discarded; only the returned
//! tree's ids carry it. Calling with a stale `previous` degrades id
//! continuity (a cosmetic glitch), never tree correctness.

use std::sync::Arc;

use bstviz_core::node::{NodePatch, TreeNode};
use bstviz_core::snapshot::Snapshot;

/// Return a snapshot structurally equal to `next` with ids chosen to
/// maximize continuity with `previous`.
///
/// Name, hints, states, values, and topology all come from `next`; only ids
/// are rewritten, and only where a positional match exists.
#[must_use]
pub fn reconcile(previous: Option<&Snapshot>, next: &Snapshot) -> Snapshot {
    let prev_root = previous.and_then(Snapshot::root);
    let root = reconcile_nodes(prev_root, next.root());

    #[cfg(feature = "tracing")]
    tracing::debug!(
        matched = previous.is_some(),
        nodes = next.node_count(),
        "reconciled snapshot"
    );

    next.with_root(root)
}

fn reconcile_nodes(
    prev: Option<&Arc<TreeNode>>,
    next: Option<&Arc<TreeNode>>,
) -> Option<Arc<TreeNode>> {
    let next = next?;
    let Some(prev) = prev else {
        // Nothing to match against: keep the incoming subtree as-is.
        return Some(Arc::clone(next));
    };
    if prev.value() != next.value() {
        // Positional mismatch: the incoming subtree keeps its own ids.
        return Some(Arc::clone(next));
    }

    let left = reconcile_nodes(prev.left(), next.left());
    let right = reconcile_nodes(prev.right(), next.right());

    let unchanged = prev.id() == next.id()
        && same_child(left.as_ref(), next.left())
        && same_child(right.as_ref(), next.right());
    if unchanged {
        return Some(Arc::clone(next));
    }

    Some(Arc::new(next.patch(
        NodePatch::new().id(prev.id().clone()).left(left).right(right),
    )))
}

fn same_child(a: Option<&Arc<TreeNode>>, b: Option<&Arc<TreeNode>>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => Arc::ptr_eq(a, b),
        _ => false,
    }
}
