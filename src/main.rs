//! Quadrature Encoder Demo Firmware
//!
//! Entry point for the STM32G474 demo board. Watches an encoder on two
//! EXTI lines, one task per channel, and reports the position periodically.

#![no_std]
#![no_main]

use defmt::{error, info};
use embassy_executor::Spawner;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_time::{Duration, Timer};
use {defmt_rtt as _, panic_probe as _};

use quad_encoder::config::{
    default_counts_per_revolution, pins, HEARTBEAT_PERIOD_MS, REPORT_INTERVAL_MS,
};
use quad_encoder::prelude::*;

/// Decoder shared by both EXTI tasks and the report task
static ENCODER: QuadratureDecoder = QuadratureDecoder::new(default_counts_per_revolution());

type Watcher = ChannelWatcher<'static, ExtiInput<'static>, QuadratureDecoder>;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Quadrature encoder demo v{}", env!("CARGO_PKG_VERSION"));

    let p = embassy_stm32::init(embassy_stm32::Config::default());

    info!("Peripherals initialized");

    // Keep in step with config::pins
    info!(
        "encoder A={} B={} status LED={}",
        pins::ENCODER_A,
        pins::ENCODER_B,
        pins::LED_STATUS
    );
    let pin_a = ExtiInput::new(p.PA0, p.EXTI0, Pull::Up);
    let pin_b = ExtiInput::new(p.PA1, p.EXTI1, Pull::Up);
    let led = Output::new(p.PA5, Level::Low, Speed::Low);

    let (watcher_a, watcher_b) = match EncoderInputs::new(pin_a, pin_b).start(&ENCODER) {
        Ok(watchers) => watchers,
        Err(_) => {
            error!("failed to read initial encoder levels");
            return;
        }
    };

    info!("Encoder initialized: {}", ENCODER.snapshot());

    spawner.spawn(channel_task(watcher_a)).unwrap();
    spawner.spawn(channel_task(watcher_b)).unwrap();
    spawner.spawn(heartbeat_task(led)).unwrap();

    info!("Tasks spawned, entering report loop");

    loop {
        Timer::after(Duration::from_millis(REPORT_INTERVAL_MS)).await;
        let snapshot = ENCODER.snapshot();
        info!(
            "position {} rad ({} pulses), missed {}",
            ENCODER.get_position(false),
            snapshot.position,
            snapshot.missed
        );
    }
}

/// Forwards edges of one channel to the shared decoder
#[embassy_executor::task(pool_size = 2)]
async fn channel_task(mut watcher: Watcher) {
    let channel = watcher.channel();
    info!("channel {} watcher running", channel);

    match watcher.run().await {
        Ok(never) => match never {},
        Err(_) => error!("channel {} watcher stopped", channel),
    }
}

/// Heartbeat task - blinks LED to show system is running
#[embassy_executor::task]
async fn heartbeat_task(mut led: Output<'static>) {
    let half = Duration::from_millis(HEARTBEAT_PERIOD_MS / 2);
    loop {
        led.set_high();
        Timer::after(half).await;
        led.set_low();
        Timer::after(half).await;
    }
}
