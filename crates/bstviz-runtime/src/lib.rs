#![forbid(unsafe_code)]

//! Runtime: operation sequencing and playback for BSTVIZ.
//!
//! # Role in BSTVIZ
//! `bstviz-runtime` is the controller layer around the pure engine. It owns
//! the current logical tree and the last rendered tree, concatenates the
//! snapshot sequences of successive operations into one timeline, and keeps
//! the reconciliation contract (a monotonically advancing `previous`) that
//! the engine itself cannot enforce.
//!
//! # Primary responsibilities
//! - **Director**: apply operations, step forward/back, seek.
//! - **Playhead**: tick-driven playback at a configurable pace.
//! - **persist** (feature `persistence`): JSON export/import of snapshot
//!   sequences.
//!
//! # How it fits in the system
//! A UI feeds user actions into [`Director::apply`] and wall-clock time into
//! [`Playhead::tick`]; every snapshot coming back out is already reconciled
//! and ready to diff by id.

pub mod director;
pub mod playback;

#[cfg(feature = "persistence")]
pub mod persist;

pub use director::{Director, Operation};
pub use playback::{PlaybackState, Playhead};
