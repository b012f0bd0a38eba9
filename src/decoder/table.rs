//! Gray-code transition table
//!
//! Row is the prior state, column the new state. Forward rotation walks
//! `00 -> 01 -> 11 -> 10 -> 00`; the table is antisymmetric so walking the
//! same edge back undoes the step.
//!
//! ```text
//!             new=00  new=01  new=10  new=11
//! prior=00      0      +1      -1    MISSED
//! prior=01     -1       0     MISSED  +1
//! prior=10     +1    MISSED     0     -1
//! prior=11   MISSED    -1      +1     0
//! ```

use crate::types::{EncoderState, Transition};

use Transition::{Backward as B, Forward as F, Missed as M, NoChange as N};

/// Classification of every (prior, new) state pair
pub const TRANSITION_TABLE: [[Transition; 4]; 4] = [
    [N, F, B, M],
    [B, N, M, F],
    [F, M, N, B],
    [M, B, F, N],
];

/// Look up the transition between two states
#[must_use]
pub const fn classify(prior: EncoderState, new: EncoderState) -> Transition {
    TRANSITION_TABLE[prior.index()][new.index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_is_no_change() {
        for state in EncoderState::ALL {
            assert_eq!(classify(state, state), Transition::NoChange);
        }
    }

    #[test]
    fn double_bit_changes_are_missed() {
        for prior in EncoderState::ALL {
            for new in EncoderState::ALL {
                let missed = classify(prior, new) == Transition::Missed;
                assert_eq!(missed, prior.distance(new) == 2, "{prior:?} -> {new:?}");
            }
        }
    }

    #[test]
    fn table_is_antisymmetric() {
        for prior in EncoderState::ALL {
            for new in EncoderState::ALL {
                let there = classify(prior, new);
                let back = classify(new, prior);
                assert_eq!(there.delta(), -back.delta(), "{prior:?} <-> {new:?}");
            }
        }
    }

    #[test]
    fn forward_cycle_steps_up() {
        let cycle = [0b00, 0b01, 0b11, 0b10, 0b00].map(EncoderState::from_bits);
        for pair in cycle.windows(2) {
            assert_eq!(classify(pair[0], pair[1]), Transition::Forward);
        }
    }
}
