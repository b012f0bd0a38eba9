//! Error types for the decoder and the signal source adapter.

use core::fmt;

/// Programming errors reported by the decoder.
///
/// Neither is transient: both mean the caller used the decoder wrongly,
/// and retrying the same call will fail the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecoderError {
    /// Counts per revolution was zero.
    InvalidCountsPerRevolution,

    /// An edge arrived before `initialize_state` seeded the prior state.
    NotInitialized,
}

impl fmt::Display for DecoderError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DecoderError::InvalidCountsPerRevolution => {
                write!(f, "Counts per revolution must be greater than zero")
            }
            DecoderError::NotInitialized => {
                write!(f, "Edge event received before the decoder was initialized")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecoderError {}

#[cfg(feature = "defmt")]
impl defmt::Format for DecoderError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            DecoderError::InvalidCountsPerRevolution => defmt::write!(f, "Invalid CPR"),
            DecoderError::NotInitialized => defmt::write!(f, "Decoder not initialized"),
        }
    }
}

/// Errors raised while driving a decoder from GPIO inputs.
#[derive(Debug, PartialEq, Eq)]
pub enum AdapterError<E> {
    /// Underlying pin read or wait failed.
    Pin(E),

    /// Decoder rejected the event.
    Decoder(DecoderError),
}

impl<E> From<DecoderError> for AdapterError<E> {
    fn from(error: DecoderError) -> Self {
        AdapterError::Decoder(error)
    }
}

impl<E: fmt::Debug> fmt::Display for AdapterError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AdapterError::Pin(e) => write!(f, "Pin error: {:?}", e),
            AdapterError::Decoder(e) => write!(f, "Decoder error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<E: fmt::Debug> std::error::Error for AdapterError<E> {}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for AdapterError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            AdapterError::Pin(e) => defmt::write!(f, "Pin error: {}", e),
            AdapterError::Decoder(e) => defmt::write!(f, "Decoder error: {}", e),
        }
    }
}
