//! Quadrature Encoder Decoder Library
//!
//! This library decodes the two-phase signal of a rotary encoder into a
//! signed pulse count and an angular position, while counting transitions
//! that were missed because an edge was sampled too late.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    APPLICATION LAYER                         │
//! │   set_home  │  get_position  │  pulses_missed  │  snapshot   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                    QUADRATURE DECODER                        │
//! │  Transition table  │  Pulse counter  │  Critical section     │
//! ├─────────────────────────────────────────────────────────────┤
//! │                 SIGNAL SOURCE ADAPTER                        │
//! │   embedded-hal InputPin + embedded-hal-async Wait            │
//! ├─────────────────────────────────────────────────────────────┤
//! │                   HAL / INTERRUPTS                           │
//! │        embassy-stm32 EXTI (demo firmware) or any HAL         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Type-driven design**: encoder states are two bits wide and the
//!   counts per revolution can never be zero
//! - **No unsafe in application code**: sharing goes through
//!   `embassy-sync`'s critical-section mutex
//! - **Functional core, imperative shell**: the decoder never touches
//!   hardware; the adapter owns the pins
//! - **Explicit error handling**: edges before initialization are
//!   rejected, not guessed at
//!
//! # Example
//!
//! ```
//! use quad_encoder::prelude::*;
//!
//! static ENCODER: QuadratureDecoder = QuadratureDecoder::new(cpr(4));
//!
//! const fn cpr(counts: u32) -> CountsPerRevolution {
//!     match CountsPerRevolution::new(counts) {
//!         Some(cpr) => cpr,
//!         None => panic!(),
//!     }
//! }
//!
//! ENCODER.initialize_state(false, false);
//! ENCODER.tick_b(true).unwrap();
//! ENCODER.tick_a(true).unwrap();
//! assert_eq!(ENCODER.position_pulses(), 2);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Quadrature Decoder
///
/// Transition table, pulse counter and the interrupt-safe decoder.
pub mod decoder;

/// Signal Source Adapter
///
/// Feeds a decoder from `embedded-hal` input pins.
pub mod adapter;

/// Error types
pub mod error;

/// Shared types used across modules
pub mod types;

/// Decoder configuration and constants
pub mod config;

/// Prelude module for common imports
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::adapter::{ChannelWatcher, EncoderInputs};
    pub use crate::config::{DecoderConfig, ResetPolicy};
    pub use crate::decoder::{EdgeSink, PulseCounter, QuadratureDecoder};
    pub use crate::error::{AdapterError, DecoderError};
    pub use crate::types::*;
}
