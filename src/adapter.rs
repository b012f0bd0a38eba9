//! Signal Source Adapter
//!
//! Drives an [`EdgeSink`] from two GPIO inputs. Works with any pin that
//! implements the `embedded-hal` input and `embedded-hal-async` wait
//! traits, e.g. `embassy_stm32::exti::ExtiInput`.
//!
//! [`EncoderInputs::start`] reads both levels once and seeds the decoder,
//! then splits into one [`ChannelWatcher`] per channel. Run each watcher on
//! its own task so A and B edges are serviced independently; dropping a
//! watcher's future stops monitoring that channel.
//!
//! Pins without edge interrupts can be polled instead with
//! [`EncoderInputs::poll`], which samples both levels at once.

use core::convert::Infallible;

use embassy_futures::select::{select, Either};
use embedded_hal::digital::{ErrorType, InputPin};
use embedded_hal_async::digital::Wait;

use crate::decoder::EdgeSink;
use crate::error::AdapterError;
use crate::types::{Channel, Step};

/// Result of an adapter operation
pub type AdapterResult<T, E> = Result<T, AdapterError<E>>;

/// The two encoder inputs before monitoring starts
pub struct EncoderInputs<A, B> {
    pin_a: A,
    pin_b: B,
}

impl<A, B> EncoderInputs<A, B>
where
    A: InputPin,
    B: InputPin + ErrorType<Error = A::Error>,
{
    /// Wrap the A and B input pins
    #[must_use]
    pub fn new(pin_a: A, pin_b: B) -> Self {
        Self { pin_a, pin_b }
    }

    /// Current levels of both pins
    fn read_levels(&mut self) -> AdapterResult<(bool, bool), A::Error> {
        let level_a = self.pin_a.is_high().map_err(AdapterError::Pin)?;
        let level_b = self.pin_b.is_high().map_err(AdapterError::Pin)?;
        Ok((level_a, level_b))
    }

    /// Seed `sink` from the current pin levels
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Pin`] if either level cannot be read; the
    /// sink is left untouched in that case.
    pub fn initialize<S>(&mut self, sink: &S) -> AdapterResult<(), A::Error>
    where
        S: EdgeSink + ?Sized,
    {
        let (level_a, level_b) = self.read_levels()?;
        sink.initialize_state(level_a, level_b);

        #[cfg(feature = "defmt")]
        defmt::info!("encoder initialized, A={} B={}", level_a, level_b);

        Ok(())
    }

    /// Sample both pins once and feed the pair to `sink`
    ///
    /// For pins without edge interrupts. Call at least as often as the
    /// fastest expected edge rate; a slower poll shows up as missed pulses.
    ///
    /// # Errors
    ///
    /// [`AdapterError::Pin`] on a read failure,
    /// [`AdapterError::Decoder`] if the sink was never initialized.
    pub fn poll<S>(&mut self, sink: &S) -> AdapterResult<Step, A::Error>
    where
        S: EdgeSink + ?Sized,
    {
        let (level_a, level_b) = self.read_levels()?;
        Ok(sink.sample(level_a, level_b)?)
    }

    /// Give the pins back
    pub fn release(self) -> (A, B) {
        (self.pin_a, self.pin_b)
    }
}

impl<A, B> EncoderInputs<A, B>
where
    A: InputPin + Wait,
    B: InputPin + Wait + ErrorType<Error = A::Error>,
{
    /// Seed `sink` from the current pin levels and split into watchers
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::Pin`] if either level cannot be read; the
    /// sink is left uninitialized in that case.
    pub fn start<S>(
        mut self,
        sink: &S,
    ) -> AdapterResult<(ChannelWatcher<'_, A, S>, ChannelWatcher<'_, B, S>), A::Error>
    where
        S: EdgeSink + ?Sized,
    {
        self.initialize(sink)?;

        Ok((
            ChannelWatcher::new(Channel::A, self.pin_a, sink),
            ChannelWatcher::new(Channel::B, self.pin_b, sink),
        ))
    }
}

/// Forwards edges of one input pin to a sink
pub struct ChannelWatcher<'s, P, S: ?Sized> {
    channel: Channel,
    pin: P,
    sink: &'s S,
    /// Edges the sink refused
    rejected: u32,
}

impl<'s, P, S> ChannelWatcher<'s, P, S>
where
    P: InputPin + Wait,
    S: EdgeSink + ?Sized,
{
    /// Watch `pin` as `channel` of `sink`
    ///
    /// The sink must already be initialized; [`EncoderInputs::start`] does
    /// that before handing out watchers.
    #[must_use]
    pub fn new(channel: Channel, pin: P, sink: &'s S) -> Self {
        Self {
            channel,
            pin,
            sink,
            rejected: 0,
        }
    }

    /// Channel this watcher feeds
    #[must_use]
    pub const fn channel(&self) -> Channel {
        self.channel
    }

    /// Number of edges the sink rejected
    #[must_use]
    pub const fn rejected(&self) -> u32 {
        self.rejected
    }

    /// Wait for the next edge and deliver the new level
    ///
    /// # Errors
    ///
    /// [`AdapterError::Pin`] on a wait or read failure,
    /// [`AdapterError::Decoder`] if the sink refused the edge.
    pub async fn next_edge(&mut self) -> AdapterResult<Step, P::Error> {
        self.pin.wait_for_any_edge().await.map_err(AdapterError::Pin)?;
        let level = self.pin.is_high().map_err(AdapterError::Pin)?;
        Ok(self.sink.tick(self.channel, level)?)
    }

    /// Forward edges until the pin fails
    ///
    /// Rejected edges are counted and skipped.
    ///
    /// # Errors
    ///
    /// Only returns on [`AdapterError::Pin`].
    pub async fn run(&mut self) -> AdapterResult<Infallible, P::Error> {
        loop {
            match self.next_edge().await {
                Ok(_step) => {
                    #[cfg(feature = "defmt")]
                    defmt::trace!("{}", _step);
                }
                Err(AdapterError::Decoder(_e)) => {
                    self.rejected = self.rejected.saturating_add(1);
                    #[cfg(feature = "defmt")]
                    defmt::warn!("channel {} edge rejected: {}", self.channel, _e);
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Stop watching and give the pin back
    pub fn release(self) -> P {
        self.pin
    }
}

/// Run both watchers on one task until either pin fails
///
/// Prefer one task per channel where the executor allows it; this is for
/// targets that can only spare a single task.
///
/// # Errors
///
/// The first pin failure from either channel.
pub async fn run_pair<A, B, S>(
    watcher_a: &mut ChannelWatcher<'_, A, S>,
    watcher_b: &mut ChannelWatcher<'_, B, S>,
) -> AdapterResult<Infallible, A::Error>
where
    A: InputPin + Wait,
    B: InputPin + Wait + ErrorType<Error = A::Error>,
    S: EdgeSink + ?Sized,
{
    match select(watcher_a.run(), watcher_b.run()).await {
        Either::First(result) | Either::Second(result) => result,
    }
}
