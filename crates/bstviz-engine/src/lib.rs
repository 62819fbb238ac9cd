#![forbid(unsafe_code)]

//! Engine: step-sequence generation and id reconciliation.
//!
//! # Role in BSTVIZ
//! `bstviz-engine` is the algorithmic kernel. It turns one high-level BST
//! operation into an ordered sequence of immutable snapshots annotated with
//! animation hints, and reconciles consecutive snapshots so renderer
//! identities stay stable across steps.
//!
//! # Primary responsibilities
//! - **insert / search / find_min / find_max**: pure trace generators,
//!   `(tree, operand) -> Vec<Snapshot>`.
//! - **reconcile**: positional parallel-descent id reuse between the last
//!   rendered tree and the next snapshot.
//!
//! # How it fits in the system
//! The runtime (`bstviz-runtime`) owns the current logical tree, calls these
//! generators, and drives reconciliation with a monotonically advancing
//! `previous`. Everything here is synchronous, allocation-only, and pure
//! over its inputs: no snapshot is mutated after it is returned.

pub mod extrema;
pub mod insert;
pub mod reconcile;
pub mod search;

mod trace;

pub use extrema::{find_max, find_min};
pub use insert::insert;
pub use reconcile::reconcile;
pub use search::search;
