#![forbid(unsafe_code)]

//! Core: the snapshot data model for animated BST visualization.
//!
//! # Role in BSTVIZ
//! `bstviz-core` owns the immutable value types everything else is built on:
//! tree nodes with presentation state and stable ids, per-step snapshots,
//! traversal paths, and the declarative animation-hint vocabulary.
//!
//! # Primary responsibilities
//! - **TreeNode / NodePatch**: frozen node values with clone-with-overrides
//!   updates and `Arc` structural sharing.
//! - **TreePath**: root-relative cursors and path-addressed immutable
//!   rebuilds.
//! - **Snapshot / normalize / validate**: fully-populated per-step tree
//!   values from loosely-specified input.
//! - **AnimationHint / HintRegistry**: renderer-agnostic semantic events and
//!   the capability-keyed schema extension point.
//!
//! # How it fits in the system
//! The engine (`bstviz-engine`) turns operations into sequences of these
//! snapshots and reconciles their ids; the runtime (`bstviz-runtime`)
//! sequences operations and drives playback. The rendering side consumes
//! snapshots and hints and never feeds trees back in, except as the
//! `previous` argument to reconciliation.

pub mod hint;
pub mod node;
pub mod path;
pub mod snapshot;

#[cfg(feature = "serde")]
pub mod wire;

pub use hint::{AnimationHint, HintKind, HintRegistry, HintSchema, HintTarget};
pub use node::{NodeId, NodePatch, NodeState, TreeNode};
pub use path::{Direction, PathError, TreePath};
pub use snapshot::{NodeSpec, Snapshot, TreeSpec, ValidationReport, normalize, validate};
