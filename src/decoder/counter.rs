//! Single-context pulse counter
//!
//! Holds the decoder bookkeeping without any synchronization. The shared
//! decoder wraps one of these in a critical-section mutex; on its own it is
//! the sequential reference a concurrent run can be replayed through.

use super::table::classify;
use crate::config::ResetPolicy;
use crate::error::DecoderError;
use crate::types::{Channel, EncoderState, Snapshot, Step, Transition};

/// Pulse and missed-pulse bookkeeping for one encoder
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct PulseCounter {
    /// Last observed state, None until initialized
    prior: Option<EncoderState>,
    /// Pulses relative to home
    position: i64,
    /// Missed transitions since the last reset
    missed: u64,
    /// Edge events processed since construction
    edges: u64,
}

impl PulseCounter {
    /// Create an uninitialized counter
    #[must_use]
    pub const fn new() -> Self {
        Self {
            prior: None,
            position: 0,
            missed: 0,
            edges: 0,
        }
    }

    /// Seed the prior state from the true levels of both channels
    ///
    /// Position and missed count are left untouched.
    pub fn initialize(&mut self, level_a: bool, level_b: bool) {
        self.prior = Some(EncoderState::from_levels(level_a, level_b));
    }

    /// Process one edge on `channel` that moved it to `level`
    ///
    /// Only that channel's bit changes, so this never yields a miss.
    ///
    /// # Errors
    ///
    /// [`DecoderError::NotInitialized`] before [`PulseCounter::initialize`].
    pub fn tick(&mut self, channel: Channel, level: bool) -> Result<Step, DecoderError> {
        let from = self.prior.ok_or(DecoderError::NotInitialized)?;
        self.update(from.with_level(channel, level))
    }

    /// Process a sample of both channel levels
    ///
    /// Used by polled sources; a sample where both bits changed is
    /// counted as a missed pulse.
    ///
    /// # Errors
    ///
    /// [`DecoderError::NotInitialized`] before [`PulseCounter::initialize`].
    pub fn sample(&mut self, level_a: bool, level_b: bool) -> Result<Step, DecoderError> {
        self.update(EncoderState::from_levels(level_a, level_b))
    }

    /// Move to `to` and report the classified step
    ///
    /// # Errors
    ///
    /// [`DecoderError::NotInitialized`] before [`PulseCounter::initialize`].
    pub fn update(&mut self, to: EncoderState) -> Result<Step, DecoderError> {
        let from = self.prior.ok_or(DecoderError::NotInitialized)?;
        let sequence = self.edges;
        let transition = self.apply(from, to);

        Ok(Step {
            sequence,
            from,
            to,
            transition,
        })
    }

    /// Apply a classified transition and move to `to`
    fn apply(&mut self, from: EncoderState, to: EncoderState) -> Transition {
        let transition = classify(from, to);

        if transition.is_missed() {
            self.missed = self.missed.saturating_add(1);
        } else {
            self.position = self.position.saturating_add(transition.delta());
        }

        // Resynchronize even on a miss so one dropped edge is reported once.
        self.prior = Some(to);
        self.edges = self.edges.wrapping_add(1);

        transition
    }

    /// Zero the position, and the missed count if the policy says so
    pub fn reset(&mut self, policy: ResetPolicy) {
        self.position = 0;
        if policy.clears_missed() {
            self.missed = 0;
        }
    }

    /// Read the position and reset in one step
    pub fn take(&mut self, policy: ResetPolicy) -> i64 {
        let position = self.position;
        self.reset(policy);
        position
    }

    /// Zero the missed count only
    pub fn clear_missed(&mut self) {
        self.missed = 0;
    }

    /// Pulses relative to home
    #[must_use]
    pub const fn position(&self) -> i64 {
        self.position
    }

    /// Missed transitions since the last reset
    #[must_use]
    pub const fn missed(&self) -> u64 {
        self.missed
    }

    /// Edge events processed since construction
    #[must_use]
    pub const fn edges(&self) -> u64 {
        self.edges
    }

    /// Last observed state
    #[must_use]
    pub const fn state(&self) -> Option<EncoderState> {
        self.prior
    }

    /// Whether `initialize` has been called
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.prior.is_some()
    }

    /// Copy of all counters
    #[must_use]
    pub const fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            missed: self.missed,
            edges: self.edges,
            state: self.prior,
        }
    }
}
