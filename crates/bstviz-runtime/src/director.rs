#![forbid(unsafe_code)]

//! Director: the operation/history controller.
//!
//! The [`Director`] owns the pieces the pure engine refuses to: the current
//! *logical* tree (the last snapshot of the last applied operation), the
//! concatenated timeline of generated snapshots, and the last *rendered*
//! (reconciled) tree. It guarantees the reconciliation contract: `previous`
//! is always the immediately prior reconciled output, advancing
//! monotonically with the playhead.
//!
//! ```text
//! apply(Insert(6))
//! ┌──────────────────────────────────────────────┐
//! │ timeline: [s0, s1, s2, s3, s4, s5]           │
//! │ cursor:    2                                 │
//! │            └── steps 0..2 already presented  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. `cursor <= timeline.len()` after every operation.
//! 2. `rendered` is `Some` iff `cursor > 0`, and always equals the
//!    reconciliation of the snapshot at `cursor - 1`.
//! 3. The logical tree equals the structure of the last snapshot of the
//!    last applied operation (label and hints stripped).

use bstviz_core::snapshot::{Snapshot, TreeSpec, normalize};
use bstviz_engine::{find_max, find_min, insert, reconcile, search};
use std::fmt;
use tracing::debug;

/// One user-triggered BST operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Insert a key.
    Insert(i64),
    /// Look up a key.
    Search(i64),
    /// Walk to the leftmost node.
    FindMin,
    /// Walk to the rightmost node.
    FindMax,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insert(v) => write!(f, "insert {v}"),
            Self::Search(v) => write!(f, "search {v}"),
            Self::FindMin => f.write_str("find-min"),
            Self::FindMax => f.write_str("find-max"),
        }
    }
}

/// Sequences operations and drives reconciled playback.
#[derive(Debug, Clone, Default)]
pub struct Director {
    logical: Snapshot,
    rendered: Option<Snapshot>,
    timeline: Vec<Snapshot>,
    cursor: usize,
}

impl Director {
    /// A director over an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A director seeded with a starting tree.
    #[must_use]
    pub fn with_tree(spec: TreeSpec) -> Self {
        Self {
            logical: normalize(spec),
            ..Self::default()
        }
    }

    /// The current logical tree (the tree operations run against).
    #[must_use]
    pub fn logical_tree(&self) -> &Snapshot {
        &self.logical
    }

    /// The last rendered (reconciled) snapshot, if any step was presented.
    #[must_use]
    pub fn current(&self) -> Option<&Snapshot> {
        self.rendered.as_ref()
    }

    /// All generated snapshots, across every applied operation.
    #[must_use]
    pub fn steps(&self) -> &[Snapshot] {
        &self.timeline
    }

    /// Number of generated snapshots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.timeline.len()
    }

    /// Whether no operation has been applied yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    /// Number of snapshots already presented.
    #[must_use]
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Number of generated snapshots not yet presented.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.timeline.len() - self.cursor
    }

    /// Run an operation against the logical tree and queue its sequence.
    ///
    /// Returns the number of snapshots appended. The logical tree advances
    /// to the structure of the operation's final snapshot.
    pub fn apply(&mut self, op: Operation) -> usize {
        let steps = match op {
            Operation::Insert(value) => insert(&self.logical, value),
            Operation::Search(value) => search(&self.logical, value),
            Operation::FindMin => find_min(&self.logical),
            Operation::FindMax => find_max(&self.logical),
        };
        if let Some(last) = steps.last() {
            // Adopt the structure only; the step label and hints belong to
            // the timeline, not to the logical tree.
            self.logical = Snapshot::new(last.root().cloned());
        }
        let appended = steps.len();
        self.timeline.extend(steps);
        debug!(%op, steps = appended, queued = self.remaining(), "operation applied");
        appended
    }

    /// Present the next snapshot, reconciled against the last rendered tree.
    ///
    /// Returns `None` when the whole timeline has been presented.
    pub fn step_forward(&mut self) -> Option<Snapshot> {
        let next = self.timeline.get(self.cursor)?;
        let shown = reconcile(self.rendered.as_ref(), next);
        self.rendered = Some(shown.clone());
        self.cursor += 1;
        debug!(position = self.cursor, "stepped forward");
        Some(shown)
    }

    /// Move one snapshot backwards and re-present it.
    ///
    /// Returns `None` when there is no earlier snapshot; stepping back from
    /// the first snapshot rewinds to the blank pre-operation state.
    pub fn step_back(&mut self) -> Option<Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        if self.cursor == 0 {
            self.rendered = None;
            debug!(position = 0usize, "rewound to start");
            return None;
        }
        let target = &self.timeline[self.cursor - 1];
        let shown = reconcile(self.rendered.as_ref(), target);
        self.rendered = Some(shown.clone());
        debug!(position = self.cursor, "stepped back");
        Some(shown)
    }

    /// Step forwards or backwards until `position` snapshots are presented
    /// (clamped to the timeline length). Returns the snapshot now shown.
    pub fn seek(&mut self, position: usize) -> Option<Snapshot> {
        let target = position.min(self.timeline.len());
        while self.cursor < target {
            if self.step_forward().is_none() {
                break;
            }
        }
        while self.cursor > target {
            let _ = self.step_back();
        }
        self.rendered.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bstviz_core::node::{NodeId, NodeState};
    use bstviz_core::snapshot::NodeSpec;

    fn id_of(snapshot: &Snapshot, value: i64) -> Option<NodeId> {
        let mut found = None;
        snapshot.for_each_node(&mut |n| {
            if n.value() == value {
                found = Some(n.id().clone());
            }
        });
        found
    }

    #[test]
    fn apply_insert_on_empty_director_queues_two_steps() {
        let mut director = Director::new();
        assert_eq!(director.apply(Operation::Insert(8)), 2);
        assert_eq!(director.len(), 2);
        assert_eq!(director.logical_tree().in_order(), vec![8]);
    }

    #[test]
    fn logical_tree_advances_without_labels() {
        let mut director = Director::new();
        director.apply(Operation::Insert(8));
        assert_eq!(director.logical_tree().name(), None);
        assert!(director.logical_tree().hints().is_empty());
    }

    #[test]
    fn step_forward_presents_in_order() {
        let mut director = Director::new();
        director.apply(Operation::Insert(8));

        let first = director.step_forward().unwrap();
        assert_eq!(first.root().unwrap().state(), NodeState::Active);
        let second = director.step_forward().unwrap();
        assert_eq!(second.name(), Some("Inserted as root"));
        assert!(director.step_forward().is_none());
        assert_eq!(director.remaining(), 0);
    }

    #[test]
    fn ids_stay_stable_across_operation_boundaries() {
        let mut director = Director::new();
        director.apply(Operation::Insert(8));
        director.apply(Operation::Insert(3));
        director.apply(Operation::Insert(10));

        let mut root_id = None;
        while let Some(snap) = director.step_forward() {
            let id = id_of(&snap, 8).unwrap();
            if let Some(prev) = root_id.take() {
                assert_eq!(id, prev, "root id drifted across steps");
            }
            root_id = Some(id);
        }
    }

    #[test]
    fn step_back_re_presents_previous_snapshot() {
        let mut director = Director::new();
        director.apply(Operation::Insert(8));
        director.apply(Operation::Search(8));

        director.step_forward();
        director.step_forward();
        let third = director.step_forward().unwrap();

        let back = director.step_back().unwrap();
        assert_ne!(back.name(), third.name());
        assert_eq!(director.position(), 2);
    }

    #[test]
    fn step_back_to_start_clears_rendered() {
        let mut director = Director::new();
        director.apply(Operation::Insert(8));
        director.step_forward();

        assert!(director.step_back().is_none());
        assert_eq!(director.position(), 0);
        assert!(director.current().is_none());
    }

    #[test]
    fn seek_clamps_and_lands_on_target() {
        let mut director = Director::new();
        director.apply(Operation::Insert(8));
        director.apply(Operation::Insert(3));

        let shown = director.seek(999).unwrap();
        assert_eq!(director.position(), director.len());
        assert_eq!(shown.name(), Some("Insert complete"));

        director.seek(1);
        assert_eq!(director.position(), 1);
    }

    #[test]
    fn with_tree_seeds_the_logical_tree() {
        let director = Director::with_tree(TreeSpec::with_root(
            NodeSpec::new(8)
                .left(NodeSpec::new(3))
                .right(NodeSpec::new(10)),
        ));
        assert_eq!(director.logical_tree().in_order(), vec![3, 8, 10]);
    }

    #[test]
    fn search_does_not_advance_structure() {
        let mut director = Director::with_tree(TreeSpec::with_root(NodeSpec::new(8)));
        director.apply(Operation::Search(42));
        assert_eq!(director.logical_tree().in_order(), vec![8]);
    }

    #[test]
    fn find_min_on_empty_tree_queues_one_step() {
        let mut director = Director::new();
        assert_eq!(director.apply(Operation::FindMin), 1);
        let shown = director.step_forward().unwrap();
        assert_eq!(shown.name(), Some("Tree is empty"));
        assert!(shown.is_empty());
    }

    #[test]
    fn operation_display_names() {
        assert_eq!(Operation::Insert(42).to_string(), "insert 42");
        assert_eq!(Operation::Search(7).to_string(), "search 7");
        assert_eq!(Operation::FindMin.to_string(), "find-min");
        assert_eq!(Operation::FindMax.to_string(), "find-max");
    }
}
