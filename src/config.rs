//! Decoder configuration and hardware constants
//!
//! Compile-time defaults for the decoder and the pin mapping used by the
//! demo firmware, plus the runtime [`DecoderConfig`] a decoder is built from.

use crate::error::DecoderError;
use crate::types::CountsPerRevolution;

/// Default counts per revolution (600 PPR optical encoder, x4 decoding)
pub const DEFAULT_COUNTS_PER_REVOLUTION: u32 = 2_400;

/// Default reset policy
pub const DEFAULT_RESET_POLICY: ResetPolicy = ResetPolicy::ClearMissed;

/// Interval between position reports in the demo firmware
pub const REPORT_INTERVAL_MS: u64 = 500;

/// Heartbeat LED period in the demo firmware
pub const HEARTBEAT_PERIOD_MS: u64 = 1_000;

/// Pin assignments for GPIO
pub mod pins {
    //! GPIO pin assignments for the demo board

    /// Encoder channel A input (EXTI0)
    pub const ENCODER_A: &str = "PA0";

    /// Encoder channel B input (EXTI1)
    pub const ENCODER_B: &str = "PA1";

    /// Status LED
    pub const LED_STATUS: &str = "PA5";
}

/// What a home reset does to the missed-pulse counter
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    /// Home clears position and missed count together
    #[default]
    ClearMissed,
    /// Home clears position only; missed count survives until cleared explicitly
    KeepMissed,
}

impl ResetPolicy {
    /// Whether a home reset also clears the missed counter
    #[must_use]
    pub const fn clears_missed(self) -> bool {
        matches!(self, Self::ClearMissed)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ResetPolicy {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::ClearMissed => defmt::write!(f, "ClearMissed"),
            Self::KeepMissed => defmt::write!(f, "KeepMissed"),
        }
    }
}

/// Runtime decoder configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Pulses per full revolution
    pub counts_per_revolution: CountsPerRevolution,
    /// Home reset behaviour
    pub reset_policy: ResetPolicy,
}

impl DecoderConfig {
    /// Validate a raw counts-per-revolution value
    ///
    /// # Errors
    ///
    /// Returns [`DecoderError::InvalidCountsPerRevolution`] for zero.
    pub const fn new(counts_per_revolution: u32, reset_policy: ResetPolicy) -> Result<Self, DecoderError> {
        match CountsPerRevolution::new(counts_per_revolution) {
            Some(counts_per_revolution) => Ok(Self {
                counts_per_revolution,
                reset_policy,
            }),
            None => Err(DecoderError::InvalidCountsPerRevolution),
        }
    }

    /// Replace the reset policy
    #[must_use]
    pub const fn with_reset_policy(self, reset_policy: ResetPolicy) -> Self {
        Self {
            counts_per_revolution: self.counts_per_revolution,
            reset_policy,
        }
    }
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            counts_per_revolution: default_counts_per_revolution(),
            reset_policy: DEFAULT_RESET_POLICY,
        }
    }
}

/// Build the default counts per revolution
#[must_use]
pub const fn default_counts_per_revolution() -> CountsPerRevolution {
    match CountsPerRevolution::new(DEFAULT_COUNTS_PER_REVOLUTION) {
        Some(cpr) => cpr,
        None => panic!("DEFAULT_COUNTS_PER_REVOLUTION must be non-zero"),
    }
}
