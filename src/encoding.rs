//! Dense indexing of corner configurations.
//!
//! An index is a mixed-radix number: seven factorial-base permutation digits
//! (the Lehmer code of the corner permutation, last digit implicit) followed
//! by seven ternary orientation digits (the eighth twist is implied by the
//! others). The solved configuration maps to 0.

use crate::cube::{CornerConfiguration, CornerCube, NUM_CORNERS};

/// Number of orientation configurations, 3^7.
pub const ORIENTATION_STATES: usize = 2187;

/// Number of corner permutations, 8!.
pub const PERMUTATION_STATES: usize = 40320;

/// Size of the index space, 8! * 3^7.
pub const NUM_STATES: usize = PERMUTATION_STATES * ORIENTATION_STATES;

/// Place value of each permutation digit: `3^7 * 7!`, `3^7 * 6!`, ..., `3^7 * 1!`.
const PERMUTATION_PLACE: [usize; NUM_CORNERS - 1] = [
    ORIENTATION_STATES * 5040,
    ORIENTATION_STATES * 720,
    ORIENTATION_STATES * 120,
    ORIENTATION_STATES * 24,
    ORIENTATION_STATES * 6,
    ORIENTATION_STATES * 2,
    ORIENTATION_STATES,
];

/// Place value of each orientation digit: `3^6`, ..., `3^0`.
const ORIENTATION_PLACE: [usize; NUM_CORNERS - 1] = [729, 243, 81, 27, 9, 3, 1];

/// Maps a corner configuration to its index in `0..NUM_STATES`.
///
/// # Panics
///
/// Panics if the configuration is outside the reachable domain and the
/// arithmetic leaves the index space.
#[inline]
pub fn encode<C: CornerConfiguration>(configuration: &C) -> usize {
    // slot_value[label] counts the labels below `label` that are still unplaced
    let mut slot_value: [usize; NUM_CORNERS] = [0, 1, 2, 3, 4, 5, 6, 7];
    let mut index = 0;

    for slot in 0..NUM_CORNERS - 1 {
        let (label, twist) = configuration.corner(slot);
        let label = label as usize;

        index += slot_value[label] * PERMUTATION_PLACE[slot];
        for value in &mut slot_value[label + 1..] {
            *value = value.wrapping_sub(1);
        }

        index += twist as usize * ORIENTATION_PLACE[slot];
    }

    assert!(
        index < NUM_STATES,
        "corner index {index} out of range 0..{NUM_STATES}: configuration outside the reachable domain"
    );
    index
}

/// Rebuilds the corner configuration with the given index.
///
/// # Panics
///
/// Panics if `index >= NUM_STATES`.
pub fn decode(index: usize) -> CornerCube {
    assert!(index < NUM_STATES, "corner index {index} out of range 0..{NUM_STATES}");

    let mut cube = CornerCube::SOLVED;
    let mut permutation_rank = index / ORIENTATION_STATES;
    let mut orientation_rank = index % ORIENTATION_STATES;

    let mut twist_sum = 0;
    for slot in 0..NUM_CORNERS - 1 {
        let place = ORIENTATION_PLACE[slot];
        let twist = orientation_rank / place;
        orientation_rank %= place;
        cube.orientation[slot] = twist as u8;
        twist_sum += twist;
    }
    cube.orientation[NUM_CORNERS - 1] = ((3 - twist_sum % 3) % 3) as u8;

    let mut unplaced: Vec<u8> = (0..NUM_CORNERS as u8).collect();
    for slot in 0..NUM_CORNERS - 1 {
        let place = PERMUTATION_PLACE[slot] / ORIENTATION_STATES;
        let digit = permutation_rank / place;
        permutation_rank %= place;
        cube.permutation[slot] = unplaced.remove(digit);
    }
    cube.permutation[NUM_CORNERS - 1] = unplaced[0];

    cube
}
