//! Corner-only cube configurations.
//!
//! Corner slots and cubies share the numbering URF, UFL, ULB, UBR, DFR, DLF,
//! DBL, DRB. A configuration stores, per slot, which cubie sits there and its
//! twist (0, 1 or 2, clockwise).

use crate::moves::{Face, Move};

/// Number of corner slots.
pub const NUM_CORNERS: usize = 8;

/// Read access to the corner layer of a puzzle configuration, plus the move
/// primitive the generator drives it with.
pub trait CornerConfiguration: Clone {
    /// Returns `(permutation_label, orientation)` of the cubie in `slot`.
    fn corner(&self, slot: usize) -> (u8, u8);

    /// Returns the configuration reached by applying `mv`.
    fn apply_move(&self, mv: Move) -> Self;
}

/// Permutation and orientation of the 8 corners.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CornerCube {
    /// `permutation[slot]` is the cubie occupying `slot`.
    pub permutation: [u8; NUM_CORNERS],
    /// `orientation[slot]` is the twist of that cubie.
    pub orientation: [u8; NUM_CORNERS],
}

const URF: u8 = 0;
const UFL: u8 = 1;
const ULB: u8 = 2;
const UBR: u8 = 3;
const DFR: u8 = 4;
const DLF: u8 = 5;
const DBL: u8 = 6;
const DRB: u8 = 7;

/// Clockwise quarter turn of each face, indexed by `Face as usize`.
const BASIC_TURNS: [CornerCube; 6] = [
    // U
    CornerCube {
        permutation: [UBR, URF, UFL, ULB, DFR, DLF, DBL, DRB],
        orientation: [0, 0, 0, 0, 0, 0, 0, 0],
    },
    // R
    CornerCube {
        permutation: [DFR, UFL, ULB, URF, DRB, DLF, DBL, UBR],
        orientation: [2, 0, 0, 1, 1, 0, 0, 2],
    },
    // F
    CornerCube {
        permutation: [UFL, DLF, ULB, UBR, URF, DFR, DBL, DRB],
        orientation: [1, 2, 0, 0, 2, 1, 0, 0],
    },
    // D
    CornerCube {
        permutation: [URF, UFL, ULB, UBR, DLF, DBL, DRB, DFR],
        orientation: [0, 0, 0, 0, 0, 0, 0, 0],
    },
    // L
    CornerCube {
        permutation: [URF, ULB, DBL, UBR, DFR, UFL, DLF, DRB],
        orientation: [0, 1, 2, 0, 0, 2, 1, 0],
    },
    // B
    CornerCube {
        permutation: [URF, UFL, UBR, DRB, DFR, DLF, ULB, DBL],
        orientation: [0, 0, 1, 2, 0, 0, 2, 1],
    },
];

impl CornerCube {
    /// The solved configuration.
    pub const SOLVED: CornerCube = CornerCube {
        permutation: [URF, UFL, ULB, UBR, DFR, DLF, DBL, DRB],
        orientation: [0; NUM_CORNERS],
    };

    /// Composes `self` with `other`: the result is `self` followed by `other`.
    #[inline]
    pub fn multiply(&self, other: &CornerCube) -> CornerCube {
        let mut result = CornerCube::SOLVED;
        for slot in 0..NUM_CORNERS {
            let source = other.permutation[slot] as usize;
            result.permutation[slot] = self.permutation[source];
            result.orientation[slot] = (self.orientation[source] + other.orientation[slot]) % 3;
        }
        result
    }

    /// Applies a sequence of moves starting from `self`.
    pub fn apply_sequence<'a>(&self, moves: impl IntoIterator<Item = &'a Move>) -> CornerCube {
        moves
            .into_iter()
            .fold(*self, |cube, &mv| cube.apply_move(mv))
    }

    /// Checks that the permutation is a permutation of `0..8` and the twists sum to 0 mod 3.
    pub fn is_valid(&self) -> bool {
        let mut seen = [false; NUM_CORNERS];
        for &label in &self.permutation {
            let label = label as usize;
            if label >= NUM_CORNERS || seen[label] {
                return false;
            }
            seen[label] = true;
        }
        self.orientation.iter().all(|&twist| twist < 3)
            && self.orientation.iter().map(|&twist| twist as u32).sum::<u32>() % 3 == 0
    }
}

impl Default for CornerCube {
    fn default() -> Self {
        CornerCube::SOLVED
    }
}

impl CornerConfiguration for CornerCube {
    #[inline]
    fn corner(&self, slot: usize) -> (u8, u8) {
        (self.permutation[slot], self.orientation[slot])
    }

    #[inline]
    fn apply_move(&self, mv: Move) -> Self {
        let turn = &BASIC_TURNS[mv.face() as usize];
        let mut cube = *self;
        for _ in 0..mv.quarter_turns() {
            cube = cube.multiply(turn);
        }
        cube
    }
}

/// Returns the clockwise quarter turn of `face` as a configuration.
pub fn basic_turn(face: Face) -> CornerCube {
    BASIC_TURNS[face as usize]
}
