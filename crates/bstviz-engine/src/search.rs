#![forbid(unsafe_code)]

//! Search: the step-sequence trace for looking up a key.
//!
//! Same descent structure as insert — compare, traverse, compare — but the
//! tree never changes. A hit ends with a `found` step on the node; a miss
//! ends with a tree-wide `shake` (there is no node to point at). Either way
//! the sequence closes with the `Search complete` reset.

use bstviz_core::hint::AnimationHint;
use bstviz_core::node::NodeState;
use bstviz_core::path::Direction;
use bstviz_core::snapshot::Snapshot;

use crate::trace::Trace;

/// Generate the search sequence for `value` against `tree`.
#[must_use]
pub fn search(tree: &Snapshot, value: i64) -> Vec<Snapshot> {
    #[cfg(feature = "tracing")]
    tracing::debug!(value, nodes = tree.node_count(), "generating search sequence");

    let mut trace = Trace::start(tree);

    if trace.current().is_none() {
        trace.push(
            format!("Value {value} not found"),
            vec![AnimationHint::shake_tree()],
        );
        return trace.reset_and_finish("Search complete");
    }

    while let Some(cur) = trace.current() {
        let cur_value = cur.value();

        trace.focus_current();
        trace.push(format!("Comparing {value} with {cur_value}"), Vec::new());

        if value == cur_value {
            trace.set_current_state(NodeState::Visited);
            trace.push(format!("Found {value}"), vec![AnimationHint::found(value)]);
            return trace.reset_and_finish("Search complete");
        }

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
                trace.push(
                    format!("Value {value} not found"),
                    vec![AnimationHint::shake_tree()],
                );
                return trace.reset_and_finish("Search complete");
            }
        }
    }

    trace.finish()
}
