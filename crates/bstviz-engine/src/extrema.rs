#![forbid(unsafe_code)]

//! Find-minimum / find-maximum traces.
//!
//! Both walk a single spine: strictly left for the minimum, strictly right
//! for the maximum, with a visit step and a traverse step per level. The
//! last node on the spine gets a `found` step, then the usual reset. An
//! empty tree produces a single informational snapshot with no structural
//! content.

use bstviz_core::hint::AnimationHint;
use bstviz_core::node::NodeState;
use bstviz_core::path::Direction;
use bstviz_core::snapshot::Snapshot;

use crate::trace::Trace;

/// Generate the find-minimum sequence (leftmost node).
#[must_use]
pub fn find_min(tree: &Snapshot) -> Vec<Snapshot> {
    extremum(tree, Direction::Left, "minimum")
}

/// Generate the find-maximum sequence (rightmost node).
#[must_use]
pub fn find_max(tree: &Snapshot) -> Vec<Snapshot> {
    extremum(tree, Direction::Right, "maximum")
}

fn extremum(tree: &Snapshot, dir: Direction, what: &str) -> Vec<Snapshot> {
    #[cfg(feature = "tracing")]
    tracing::debug!(
        direction = dir.name(),
        nodes = tree.node_count(),
        "generating extremum sequence"
    );

    let mut trace = Trace::start(tree);

    if trace.current().is_none() {
        trace.push("Tree is empty".to_string(), Vec::new());
        return trace.finish();
    }

    while let Some(cur) = trace.current() {
        let cur_value = cur.value();

        trace.focus_current();
        trace.push(format!("Visiting {cur_value}"), Vec::new());

        let child_value = match dir {
            Direction::Left => cur.left().map(|n| n.value()),
            Direction::Right => cur.right().map(|n| n.value()),
        };

        match child_value {
            Some(child_value) => {
                trace.set_current_state(NodeState::Visited);
                trace.push(
                    format!("Going {} to {child_value}", dir.name()),
                    vec![AnimationHint::traverse_down(cur_value, child_value)],
                );
                trace.descend(dir);
            }
            None => {
                trace.set_current_state(NodeState::Visited);
                trace.push(
                    format!("Found {what}: {cur_value}"),
                    vec![AnimationHint::found(cur_value)],
                );
                return trace.reset_and_finish(&format!("Find {what} complete"));
            }
        }
    }

    trace.finish()
}
