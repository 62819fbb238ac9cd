#![forbid(unsafe_code)]

//! Playhead: tick-driven stepping over a director's timeline.
//!
//! The engine generates whole sequences eagerly; playing them back is a
//! timing concern. A [`Playhead`] converts elapsed wall-clock time into
//! [`Director`] steps at a configured per-step interval, with
//! play/pause/reset over the usual playback states.
//!
//! # Invariants
//!
//! 1. `tick` advances the director only while `Playing`.
//! 2. Left-over elapsed time below one interval carries into the next tick;
//!    a single long tick may advance several steps.
//! 3. The playhead moves to `Finished` when the director runs out of steps,
//!    and stays there until `reset`.
//!
//! # Failure Modes
//!
//! - Zero interval: clamped to 1ns to avoid a spin that never consumes
//!   accumulated time.

use std::time::Duration;

use bstviz_core::snapshot::Snapshot;
use tracing::debug;

use crate::director::Director;

/// Playback state of a playhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Not yet started.
    Idle,
    /// Actively advancing on ticks.
    Playing,
    /// Paused; can be resumed.
    Paused,
    /// The director's timeline is exhausted.
    Finished,
}

/// Converts elapsed time into director steps.
#[derive(Debug, Clone)]
pub struct Playhead {
    state: PlaybackState,
    step_interval: Duration,
    carry: Duration,
}

impl Playhead {
    /// Create a playhead advancing one step per `step_interval`.
    ///
    /// A zero interval is clamped to 1ns.
    #[must_use]
    pub fn new(step_interval: Duration) -> Self {
        Self {
            state: PlaybackState::Idle,
            step_interval: if step_interval.is_zero() {
                Duration::from_nanos(1)
            } else {
                step_interval
            },
            carry: Duration::ZERO,
        }
    }

    /// Current playback state.
    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// The configured per-step interval.
    #[must_use]
    pub fn step_interval(&self) -> Duration {
        self.step_interval
    }

    /// Start or resume playback. No-op when already finished.
    pub fn play(&mut self) {
        if self.state != PlaybackState::Finished {
            self.state = PlaybackState::Playing;
        }
    }

    /// Pause playback, holding the current position.
    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Return to `Idle` and drop accumulated time.
    ///
    /// The director's position is not touched; rewind it separately with
    /// [`Director::seek`] if the playback should restart from the top.
    pub fn reset(&mut self) {
        self.state = PlaybackState::Idle;
        self.carry = Duration::ZERO;
    }

    /// Feed elapsed time and advance the director accordingly.
    ///
    /// Returns the snapshots presented during this tick, in order.
    pub fn tick(&mut self, elapsed: Duration, director: &mut Director) -> Vec<Snapshot> {
        if self.state != PlaybackState::Playing {
            return Vec::new();
        }

        self.carry += elapsed;
        let mut presented = Vec::new();
        while self.carry >= self.step_interval {
            self.carry -= self.step_interval;
            match director.step_forward() {
                Some(snapshot) => presented.push(snapshot),
                None => {
                    self.state = PlaybackState::Finished;
                    self.carry = Duration::ZERO;
                    debug!("playback finished");
                    break;
                }
            }
        }
        presented
    }
}

impl Default for Playhead {
    fn default() -> Self {
        // One step per half second reads well for an educational pace.
        Self::new(Duration::from_millis(500))
    }
}
