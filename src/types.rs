//! Shared types used across the decoder and adapter
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time: encoder states are always two bits wide and the
//! counts-per-revolution can never be zero.

use core::f64::consts::TAU;
use core::fmt;
use core::num::NonZeroU32;

/// Encoder input channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Channel A (high bit of the encoder state)
    A,
    /// Channel B (low bit of the encoder state)
    B,
}

impl Channel {
    /// Bit of the encoder state owned by this channel
    #[must_use]
    pub const fn mask(self) -> u8 {
        match self {
            Self::A => 0b10,
            Self::B => 0b01,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Channel {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::A => defmt::write!(f, "A"),
            Self::B => defmt::write!(f, "B"),
        }
    }
}

/// Combined logic level of both channels
///
/// Channel A is bit 1 and channel B is bit 0, so the value is always
/// one corner of the Gray-code cycle `00 -> 01 -> 11 -> 10`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct EncoderState(u8);

impl EncoderState {
    /// Both channels low
    pub const LOW_LOW: Self = Self(0b00);
    /// A low, B high
    pub const LOW_HIGH: Self = Self(0b01);
    /// A high, B low
    pub const HIGH_LOW: Self = Self(0b10);
    /// Both channels high
    pub const HIGH_HIGH: Self = Self(0b11);

    /// All four states in numeric order
    pub const ALL: [Self; 4] = [Self::LOW_LOW, Self::LOW_HIGH, Self::HIGH_LOW, Self::HIGH_HIGH];

    /// Build a state from the two channel levels
    #[must_use]
    pub const fn from_levels(level_a: bool, level_b: bool) -> Self {
        Self(((level_a as u8) << 1) | level_b as u8)
    }

    /// Build a state from raw bits (only the low two bits are kept)
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b11)
    }

    /// Raw two-bit value
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Table index for this state
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Level of a single channel
    #[must_use]
    pub const fn level(self, channel: Channel) -> bool {
        self.0 & channel.mask() != 0
    }

    /// Replace one channel's level, keeping the other
    #[must_use]
    pub const fn with_level(self, channel: Channel, level: bool) -> Self {
        let mask = channel.mask();
        if level {
            Self(self.0 | mask)
        } else {
            Self(self.0 & !mask)
        }
    }

    /// Number of channels that differ between two states (0, 1 or 2)
    #[must_use]
    pub const fn distance(self, other: Self) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}

impl fmt::Debug for EncoderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EncoderState({:02b})", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for EncoderState {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=u8:b}", self.0);
    }
}

/// Classification of a (prior state, new state) pair
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// One step along the Gray-code cycle (+1 pulse)
    Forward,
    /// One step against the Gray-code cycle (-1 pulse)
    Backward,
    /// Both channels changed at once, at least one edge was not observed
    Missed,
    /// Same state reported twice
    NoChange,
}

impl Transition {
    /// Signed pulse delta applied to the position
    #[must_use]
    pub const fn delta(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
            Self::Missed | Self::NoChange => 0,
        }
    }

    /// Whether this transition counts as a missed pulse
    #[must_use]
    pub const fn is_missed(self) -> bool {
        matches!(self, Self::Missed)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Transition {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Forward => defmt::write!(f, "+1"),
            Self::Backward => defmt::write!(f, "-1"),
            Self::Missed => defmt::write!(f, "MISSED"),
            Self::NoChange => defmt::write!(f, "0"),
        }
    }
}

/// Raw pulses per full mechanical revolution
///
/// Used only to convert a pulse count to an angle.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CountsPerRevolution(NonZeroU32);

impl CountsPerRevolution {
    /// Create from a raw count, returns None for zero
    #[must_use]
    pub const fn new(counts: u32) -> Option<Self> {
        match NonZeroU32::new(counts) {
            Some(counts) => Some(Self(counts)),
            None => None,
        }
    }

    /// Raw count
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0.get()
    }

    /// Convert a pulse count to revolutions
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn revolutions(self, pulses: i64) -> f64 {
        pulses as f64 / f64::from(self.get())
    }

    /// Convert a pulse count to radians
    #[must_use]
    pub fn radians(self, pulses: i64) -> f64 {
        self.revolutions(pulses) * TAU
    }
}

impl fmt::Debug for CountsPerRevolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountsPerRevolution({})", self.0)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CountsPerRevolution {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{} CPR", self.0.get());
    }
}

/// Outcome of one processed edge event or sample
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    /// Position of this edge in the decoder's serialized edge order
    pub sequence: u64,
    /// State before the edge
    pub from: EncoderState,
    /// State after the edge
    pub to: EncoderState,
    /// How the pair was classified
    pub transition: Transition,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Step {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "#{} {} -> {} ({})",
            self.sequence,
            self.from,
            self.to,
            self.transition
        );
    }
}

/// Consistent copy of the decoder counters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Snapshot {
    /// Pulses relative to home
    pub position: i64,
    /// Missed transitions since the last reset
    pub missed: u64,
    /// Edge events processed since construction
    pub edges: u64,
    /// Last observed state, None before initialization
    pub state: Option<EncoderState>,
}

#[cfg(feature = "defmt")]
impl defmt::Format for Snapshot {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "pos={} missed={} edges={} state={}",
            self.position,
            self.missed,
            self.edges,
            self.state
        );
    }
}
