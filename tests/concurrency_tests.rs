//! Concurrency Tests
//!
//! Drives one decoder from separate A and B threads plus a reader, then
//! replays the serialized edge order through a sequential `PulseCounter`
//! and checks that nothing was lost, duplicated or torn.
//! Run with: cargo test --test concurrency_tests

use std::thread;
use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use quad_encoder::decoder::{EdgeSink, PulseCounter, QuadratureDecoder};
use quad_encoder::types::{Channel, CountsPerRevolution, Step, Transition};

const EDGES_PER_CHANNEL: usize = 2_000;

/// Bounded random pause between edges
fn pause(rng: &mut SmallRng) {
    match rng.gen_range(0..8) {
        0 => thread::sleep(Duration::from_micros(rng.gen_range(0..50))),
        1 | 2 => thread::yield_now(),
        _ => {}
    }
}

/// One input event as delivered, with what the decoder reported
#[derive(Clone, Copy, Debug)]
enum Event {
    Edge(Channel, bool, Step),
    Sample(bool, bool, Step),
}

impl Event {
    fn step(&self) -> Step {
        match *self {
            Event::Edge(_, _, step) | Event::Sample(_, _, step) => step,
        }
    }
}

fn cpr() -> CountsPerRevolution {
    CountsPerRevolution::new(64).unwrap()
}

/// Toggle one channel `count` times, recording every reported step
fn toggle_channel(dec: &QuadratureDecoder, channel: Channel, count: usize, seed: u64) -> Vec<Event> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut level = false;
    let mut events = Vec::with_capacity(count);
    for _ in 0..count {
        level = !level;
        let step = dec.tick(channel, level).unwrap();
        events.push(Event::Edge(channel, level, step));
        pause(&mut rng);
    }
    events
}

/// Feed `count` random level pairs, recording every reported step
fn sample_randomly(dec: &QuadratureDecoder, count: usize, seed: u64) -> Vec<Event> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut events = Vec::with_capacity(count);
    for _ in 0..count {
        let (a, b) = (rng.gen::<bool>(), rng.gen::<bool>());
        let step = dec.sample(a, b).unwrap();
        events.push(Event::Sample(a, b, step));
        pause(&mut rng);
    }
    events
}

/// Replay `events` in sequence order and compare against the decoder
fn replay(mut events: Vec<Event>, dec: &QuadratureDecoder) {
    events.sort_by_key(|event| event.step().sequence);

    // Every edge got a distinct, gap-free slot in the serialized order
    for (expected, event) in events.iter().enumerate() {
        assert_eq!(event.step().sequence, expected as u64);
    }

    let mut oracle = PulseCounter::new();
    oracle.initialize(false, false);
    for event in &events {
        let replayed = match *event {
            Event::Edge(channel, level, _) => oracle.tick(channel, level).unwrap(),
            Event::Sample(a, b, _) => oracle.sample(a, b).unwrap(),
        };
        assert_eq!(replayed, event.step());
    }

    assert_eq!(oracle.snapshot(), dec.snapshot());

    let expected_position: i64 = events.iter().map(|e| e.step().transition.delta()).sum();
    let expected_missed = events.iter().filter(|e| e.step().transition.is_missed()).count();
    assert_eq!(dec.position_pulses(), expected_position);
    assert_eq!(dec.pulses_missed(), expected_missed as u64);
}

#[test]
fn concurrent_ticks_match_sequential_replay() {
    let dec = QuadratureDecoder::new(cpr());
    dec.initialize_state(false, false);

    let events = thread::scope(|s| {
        let a = s.spawn(|| toggle_channel(&dec, Channel::A, EDGES_PER_CHANNEL, 0x1234_5678));
        let b = s.spawn(|| toggle_channel(&dec, Channel::B, EDGES_PER_CHANNEL, 0x9abc_def1));
        let reader = s.spawn(|| {
            let mut rng = SmallRng::seed_from_u64(0x0bad_cafe);
            for _ in 0..500 {
                let snapshot = dec.snapshot();
                assert!(snapshot.state.is_some());
                let _ = dec.get_position(false);
                let _ = dec.pulses_missed();
                pause(&mut rng);
            }
        });

        reader.join().unwrap();
        let mut events = a.join().unwrap();
        events.extend(b.join().unwrap());
        events
    });

    assert_eq!(events.len(), 2 * EDGES_PER_CHANNEL);
    // Single-channel ticks can never skip a corner
    assert!(events.iter().all(|e| e.step().transition != Transition::Missed));
    replay(events, &dec);
}

#[test]
fn concurrent_samples_match_sequential_replay() {
    let dec = QuadratureDecoder::new(cpr());
    dec.initialize_state(false, false);

    let events = thread::scope(|s| {
        let first = s.spawn(|| sample_randomly(&dec, EDGES_PER_CHANNEL, 0x2468_ace0));
        let second = s.spawn(|| sample_randomly(&dec, EDGES_PER_CHANNEL, 0x1357_9bdf));
        let mut events = first.join().unwrap();
        events.extend(second.join().unwrap());
        events
    });

    replay(events, &dec);
}

#[test]
fn home_reset_is_atomic_with_edges() {
    // Every edge lands either before or after each reset; the windows
    // taken by the reader plus what remains add up to the full travel.
    let dec = QuadratureDecoder::new(cpr());
    dec.initialize_state(false, false);

    let (events, taken) = thread::scope(|s| {
        let a = s.spawn(|| toggle_channel(&dec, Channel::A, EDGES_PER_CHANNEL, 0x5555_aaaa));
        let b = s.spawn(|| toggle_channel(&dec, Channel::B, EDGES_PER_CHANNEL, 0xaaaa_5555));
        let reader = s.spawn(|| {
            let mut rng = SmallRng::seed_from_u64(0x7777_1111);
            let mut taken = 0.0;
            for _ in 0..200 {
                taken += dec.get_position(true);
                pause(&mut rng);
            }
            taken
        });

        let taken: f64 = reader.join().unwrap();
        let mut events = a.join().unwrap();
        events.extend(b.join().unwrap());
        (events, taken)
    });

    let total: i64 = events.iter().map(|e| e.step().transition.delta()).sum();
    let accounted = taken + dec.get_position(false);
    assert!((accounted - cpr().radians(total)).abs() < 1e-6);
}

#[test]
fn decoder_is_shareable_as_static() {
    static ENCODER: QuadratureDecoder = QuadratureDecoder::new(match CountsPerRevolution::new(4) {
        Some(cpr) => cpr,
        None => panic!(),
    });

    ENCODER.initialize_state(false, false);
    let handle = thread::spawn(|| {
        ENCODER.tick_b(true).unwrap();
        ENCODER.tick_a(true).unwrap();
    });
    handle.join().unwrap();
    assert_eq!(ENCODER.position_pulses(), 2);
}

#[test]
fn seeded_jitter_is_reproducible() {
    let run = |seed| {
        let dec = QuadratureDecoder::new(cpr());
        dec.initialize_state(false, false);
        let events = sample_randomly(&dec, 200, seed);
        (events.iter().map(|e| e.step()).collect::<Vec<_>>(), dec.snapshot())
    };

    assert_eq!(run(0x2468_ace0), run(0x2468_ace0));
}
