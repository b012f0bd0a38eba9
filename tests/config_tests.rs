//! Configuration and Constants Tests
//!
//! Tests to verify configuration values are valid and consistent.
//! Run with: cargo test --test config_tests

use quad_encoder::config::*;
use quad_encoder::error::DecoderError;

// =============================================================================
// Constant Tests
// =============================================================================

#[test]
fn default_cpr_is_quadrature_multiple() {
    // x4 decoding counts every edge of both channels
    assert!(DEFAULT_COUNTS_PER_REVOLUTION > 0);
    assert_eq!(DEFAULT_COUNTS_PER_REVOLUTION % 4, 0);
    assert_eq!(default_counts_per_revolution().get(), DEFAULT_COUNTS_PER_REVOLUTION);
}

#[test]
fn report_interval_reasonable() {
    assert!(REPORT_INTERVAL_MS >= 10);
    assert!(REPORT_INTERVAL_MS <= 10_000);
}

#[test]
fn encoder_pins_distinct() {
    assert_ne!(pins::ENCODER_A, pins::ENCODER_B);
    assert_ne!(pins::ENCODER_A, pins::LED_STATUS);
    assert_ne!(pins::ENCODER_B, pins::LED_STATUS);
}

#[test]
fn encoder_pins_match_demo_exti_lines() {
    // The demo firmware wires A to EXTI0 and B to EXTI1
    assert_eq!(pins::ENCODER_A, "PA0");
    assert_eq!(pins::ENCODER_B, "PA1");
    assert_eq!(pins::LED_STATUS, "PA5");
}

// =============================================================================
// Reset Policy Tests
// =============================================================================

#[test]
fn default_policy_clears_missed() {
    assert_eq!(ResetPolicy::default(), ResetPolicy::ClearMissed);
    assert_eq!(DEFAULT_RESET_POLICY, ResetPolicy::ClearMissed);
    assert!(ResetPolicy::ClearMissed.clears_missed());
    assert!(!ResetPolicy::KeepMissed.clears_missed());
}

// =============================================================================
// DecoderConfig Tests
// =============================================================================

#[test]
fn config_rejects_zero_cpr() {
    assert_eq!(
        DecoderConfig::new(0, ResetPolicy::ClearMissed),
        Err(DecoderError::InvalidCountsPerRevolution)
    );
}

#[test]
fn config_accepts_positive_cpr() {
    let config = DecoderConfig::new(1, ResetPolicy::KeepMissed).unwrap();
    assert_eq!(config.counts_per_revolution.get(), 1);
    assert_eq!(config.reset_policy, ResetPolicy::KeepMissed);
}

#[test]
fn config_default_uses_constants() {
    let config = DecoderConfig::default();
    assert_eq!(config.counts_per_revolution.get(), DEFAULT_COUNTS_PER_REVOLUTION);
    assert_eq!(config.reset_policy, DEFAULT_RESET_POLICY);
}

#[test]
fn config_with_reset_policy() {
    let config = DecoderConfig::default().with_reset_policy(ResetPolicy::KeepMissed);
    assert_eq!(config.reset_policy, ResetPolicy::KeepMissed);
    assert_eq!(config.counts_per_revolution.get(), DEFAULT_COUNTS_PER_REVOLUTION);
}
