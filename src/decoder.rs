//! Quadrature Decoder
//!
//! Hardware-agnostic Gray-code state machine. Turns single-channel edge
//! events into a signed pulse count and a missed-pulse count.
//!
//! The decoder is driven through [`EdgeSink`], the narrow capability an
//! edge source needs; applications read it through the inherent methods
//! on [`QuadratureDecoder`].

pub mod counter;
pub mod table;

mod shared;

pub use counter::PulseCounter;
pub use shared::QuadratureDecoder;
pub use table::{classify, TRANSITION_TABLE};

use crate::error::DecoderError;
use crate::types::{Channel, Step};

/// Receiver of encoder edge events
///
/// Implementors must treat each call as one atomic read-modify-write of
/// their state; calls may arrive concurrently from the A and B contexts.
pub trait EdgeSink {
    /// Seed the prior state from the true current levels of both channels.
    ///
    /// Must be called before the first edge event.
    fn initialize_state(&self, level_a: bool, level_b: bool);

    /// Channel A moved to `level`.
    ///
    /// # Errors
    ///
    /// [`DecoderError::NotInitialized`] if no state has been seeded yet.
    fn tick_a(&self, level: bool) -> Result<Step, DecoderError>;

    /// Channel B moved to `level`.
    ///
    /// # Errors
    ///
    /// [`DecoderError::NotInitialized`] if no state has been seeded yet.
    fn tick_b(&self, level: bool) -> Result<Step, DecoderError>;

    /// Both channel levels were sampled at once.
    ///
    /// For polled sources. A sample where both bits changed since the last
    /// one is counted as missed.
    ///
    /// # Errors
    ///
    /// [`DecoderError::NotInitialized`] if no state has been seeded yet.
    fn sample(&self, level_a: bool, level_b: bool) -> Result<Step, DecoderError>;

    /// Dispatch an edge on either channel.
    ///
    /// # Errors
    ///
    /// [`DecoderError::NotInitialized`] if no state has been seeded yet.
    fn tick(&self, channel: Channel, level: bool) -> Result<Step, DecoderError> {
        match channel {
            Channel::A => self.tick_a(level),
            Channel::B => self.tick_b(level),
        }
    }
}

impl<T: EdgeSink + ?Sized> EdgeSink for &T {
    fn initialize_state(&self, level_a: bool, level_b: bool) {
        (**self).initialize_state(level_a, level_b);
    }

    fn tick_a(&self, level: bool) -> Result<Step, DecoderError> {
        (**self).tick_a(level)
    }

    fn tick_b(&self, level: bool) -> Result<Step, DecoderError> {
        (**self).tick_b(level)
    }

    fn sample(&self, level_a: bool, level_b: bool) -> Result<Step, DecoderError> {
        (**self).sample(level_a, level_b)
    }
}
