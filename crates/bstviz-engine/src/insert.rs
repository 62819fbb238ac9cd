#![forbid(unsafe_code)]

//! Insert: the step-sequence trace for adding a key.
//!
//! The generated sequence shows the full root-to-leaf descent: a compare
//! step at each node (single active cursor), a traverse step along each
//! existing link, the appearance of the new leaf, and a trailing reset to
//! the neutral terminal state.
//!
//! # Invariants
//!
//! 1. Every intermediate snapshot keeps all already-passed ancestors marked
//!    visited.
//! 2. No snapshot violates BST ordering for settled parts of the tree; the
//!    new leaf is attached in a single step.
//! 3. The final snapshot is all-default, labeled `Insert complete` (or
//!    `No changes made` for a duplicate key).
//! 4. A duplicate key never changes the structure.

use bstviz_core::hint::AnimationHint;
use bstviz_core::node::NodeState;
use bstviz_core::path::Direction;
use bstviz_core::snapshot::Snapshot;

use crate::trace::Trace;

/// Generate the insert sequence for `value` against `tree`.
///
/// Pure over its inputs: `tree` is not modified; the caller's logical tree
/// advances by adopting the last returned snapshot.
#[must_use]
pub fn insert(tree: &Snapshot, value: i64) -> Vec<Snapshot> {
    #[cfg(feature = "tracing")]
    tracing::debug!(value, nodes = tree.node_count(), "generating insert sequence");

    let mut trace = Trace::start(tree);

    if trace.current().is_none() {
        trace.plant_root(value);
        trace.push(
            format!("Inserting {value} as root"),
            vec![AnimationHint::appear(value)],
        );
        return trace.reset_and_finish("Inserted as root");
    }

    while let Some(cur) = trace.current() {
        let cur_value = cur.value();

        if value == cur_value {
            // The compare step and the duplicate outcome share one snapshot.
            trace.focus_current();
            trace.push(
                format!("Value {value} already exists"),
                vec![AnimationHint::shake_node(value)],
            );
            return trace.reset_and_finish("No changes made");
        }

        trace.focus_current();
        trace.push(format!("Comparing {value} with {cur_value}"), Vec::new());

        let (dir, relation) = if value < cur_value {
            (Direction::Left, "<")
        } else {
            (Direction::Right, ">")
        };
        let child_value = match dir {
            Direction::Left => cur.left().map(|n| n.value()),
            Direction::Right => cur.right().map(|n| n.value()),
        };

        match child_value {
            Some(child_value) => {
                trace.set_current_state(NodeState::Visited);
                trace.push(
                    format!("{value} {relation} {cur_value}, going {}", dir.name()),
                    vec![AnimationHint::traverse_down(cur_value, child_value)],
                );
                trace.descend(dir);
            }
            None => {
                trace.set_current_state(NodeState::Visited);
                trace.attach_child(dir, value);
                trace.push(
                    format!("Inserting {value} as {} child of {cur_value}", dir.name()),
                    vec![AnimationHint::appear(value)],
                );
                trace.descend(dir);
                trace.set_current_state(NodeState::Visited);
                trace.push(format!("Inserted {value}"), Vec::new());
                return trace.reset_and_finish("Insert complete");
            }
        }
    }

    // Unreachable with a consistent cursor; return whatever was emitted.
    trace.finish()
}
