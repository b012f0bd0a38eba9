//! Interrupt-safe quadrature decoder
//!
//! All counters sit behind one critical-section mutex. Every operation is
//! a single short critical section, so edge contexts for A and B and a
//! reader context can call in concurrently without tearing `prior_state`.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

use super::counter::PulseCounter;
use super::EdgeSink;
use crate::config::{DecoderConfig, ResetPolicy};
use crate::error::DecoderError;
use crate::types::{Channel, CountsPerRevolution, Snapshot, Step};

/// Quadrature decoder shared between edge contexts and readers
///
/// Const-constructible so it can live in a `static` that interrupt
/// handlers or async tasks reference directly.
pub struct QuadratureDecoder {
    /// Pulses per revolution, fixed at construction
    cpr: CountsPerRevolution,
    /// What `set_home` does to the missed counter
    policy: ResetPolicy,
    /// Decoder bookkeeping
    counter: Mutex<CriticalSectionRawMutex, RefCell<PulseCounter>>,
}

impl QuadratureDecoder {
    /// Create a decoder that clears the missed count on home
    #[must_use]
    pub const fn new(cpr: CountsPerRevolution) -> Self {
        Self::with_policy(cpr, ResetPolicy::ClearMissed)
    }

    /// Create a decoder with an explicit reset policy
    #[must_use]
    pub const fn with_policy(cpr: CountsPerRevolution, policy: ResetPolicy) -> Self {
        Self {
            cpr,
            policy,
            counter: Mutex::new(RefCell::new(PulseCounter::new())),
        }
    }

    /// Create a decoder from a raw counts-per-revolution value
    ///
    /// # Errors
    ///
    /// Returns [`DecoderError::InvalidCountsPerRevolution`] for zero.
    pub const fn try_new(counts_per_revolution: u32) -> Result<Self, DecoderError> {
        match CountsPerRevolution::new(counts_per_revolution) {
            Some(cpr) => Ok(Self::new(cpr)),
            None => Err(DecoderError::InvalidCountsPerRevolution),
        }
    }

    /// Create a decoder from a validated configuration
    #[must_use]
    pub const fn from_config(config: &DecoderConfig) -> Self {
        Self::with_policy(config.counts_per_revolution, config.reset_policy)
    }

    /// Run `f` on the counter inside the critical section
    fn with_counter<R>(&self, f: impl FnOnce(&mut PulseCounter) -> R) -> R {
        self.counter.lock(|cell| f(&mut cell.borrow_mut()))
    }

    /// Counts per revolution
    #[must_use]
    pub const fn counts_per_revolution(&self) -> CountsPerRevolution {
        self.cpr
    }

    /// Reset policy
    #[must_use]
    pub const fn reset_policy(&self) -> ResetPolicy {
        self.policy
    }

    /// Make the current position the new zero
    ///
    /// Also clears the missed count under [`ResetPolicy::ClearMissed`].
    pub fn set_home(&self) {
        let discarded = self.with_counter(|counter| counter.take(self.policy));

        #[cfg(feature = "defmt")]
        defmt::debug!("home set, {} pulses discarded", discarded);
        #[cfg(not(feature = "defmt"))]
        let _ = discarded;
    }

    /// Position relative to home in radians
    ///
    /// With `reset` the value is read and the home reset applied in the
    /// same critical section, so polling callers get non-overlapping
    /// windows of travel.
    pub fn get_position(&self, reset: bool) -> f64 {
        let pulses = self.with_counter(|counter| {
            if reset {
                counter.take(self.policy)
            } else {
                counter.position()
            }
        });
        self.cpr.radians(pulses)
    }

    /// Position relative to home in pulses
    #[must_use]
    pub fn position_pulses(&self) -> i64 {
        self.with_counter(|counter| counter.position())
    }

    /// Position relative to home in revolutions
    #[must_use]
    pub fn revolutions(&self) -> f64 {
        self.cpr.revolutions(self.position_pulses())
    }

    /// Missed transitions since the last reset
    #[must_use]
    pub fn pulses_missed(&self) -> u64 {
        self.with_counter(|counter| counter.missed())
    }

    /// Zero the missed count without touching the position
    pub fn clear_missed(&self) {
        self.with_counter(PulseCounter::clear_missed);
    }

    /// Whether the prior state has been seeded
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.with_counter(|counter| counter.is_initialized())
    }

    /// All counters read in one critical section
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.with_counter(|counter| counter.snapshot())
    }
}

impl EdgeSink for QuadratureDecoder {
    fn initialize_state(&self, level_a: bool, level_b: bool) {
        self.with_counter(|counter| counter.initialize(level_a, level_b));
    }

    fn tick_a(&self, level: bool) -> Result<Step, DecoderError> {
        self.with_counter(|counter| counter.tick(Channel::A, level))
    }

    fn tick_b(&self, level: bool) -> Result<Step, DecoderError> {
        self.with_counter(|counter| counter.tick(Channel::B, level))
    }

    fn sample(&self, level_a: bool, level_b: bool) -> Result<Step, DecoderError> {
        self.with_counter(|counter| counter.sample(level_a, level_b))
    }
}

impl core::fmt::Debug for QuadratureDecoder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadratureDecoder")
            .field("cpr", &self.cpr)
            .field("policy", &self.policy)
            .field("counter", &self.snapshot())
            .finish()
    }
}
