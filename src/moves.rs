//! Face turns and the move-pruning predicate.
//!
//! The 18 moves are numbered `face * 3 + variant`, with faces in the order
//! U, R, F, D, L, B and variants quarter clockwise, half, quarter
//! counter-clockwise.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Number of distinct face turns.
pub const NUM_MOVES: usize = 18;

/// One of the six faces of the cube.
///
/// Discriminants are chosen so that `face` and `face + 3` are opposite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    U = 0,
    R = 1,
    F = 2,
    D = 3,
    L = 4,
    B = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [Face::U, Face::R, Face::F, Face::D, Face::L, Face::B];

    /// Returns the face on the other side of the cube.
    #[inline]
    pub const fn opposite(self) -> Face {
        Face::ALL[(self as usize + 3) % 6]
    }

    fn letter(self) -> char {
        match self {
            Face::U => 'U',
            Face::R => 'R',
            Face::F => 'F',
            Face::D => 'D',
            Face::L => 'L',
            Face::B => 'B',
        }
    }
}

/// A single face turn, `0..18`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(u8);

impl Move {
    /// All moves in id order.
    pub const ALL: [Move; NUM_MOVES] = {
        let mut moves = [Move(0); NUM_MOVES];
        let mut i = 0;
        while i < NUM_MOVES {
            moves[i] = Move(i as u8);
            i += 1;
        }
        moves
    };

    /// Builds a move from its face and number of clockwise quarter turns (1..=3).
    pub const fn new(face: Face, quarter_turns: u8) -> Move {
        assert!(quarter_turns >= 1 && quarter_turns <= 3, "quarter turns must be 1..=3");
        Move(face as u8 * 3 + quarter_turns - 1)
    }

    /// Returns the move with the given id, or `None` if `id >= 18`.
    pub const fn from_id(id: u8) -> Option<Move> {
        if (id as usize) < NUM_MOVES {
            Some(Move(id))
        } else {
            None
        }
    }

    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn face(self) -> Face {
        Face::ALL[(self.0 / 3) as usize]
    }

    /// Number of clockwise quarter turns this move performs (1, 2 or 3).
    #[inline]
    pub const fn quarter_turns(self) -> u8 {
        self.0 % 3 + 1
    }

    /// Returns the move that undoes this one.
    pub const fn inverse(self) -> Move {
        Move::new(self.face(), 4 - self.quarter_turns())
    }
}

/// Decides whether `candidate` is redundant right after `previous`.
///
/// Two turns of the same face always collapse into one (or none). Turns of
/// opposite faces commute, so only one order is explored: U before D, R
/// before L, F before B.
#[inline]
pub fn should_skip(candidate: Move, previous: Option<Move>) -> bool {
    let Some(previous) = previous else {
        return false;
    };
    let candidate_face = candidate.face();
    let previous_face = previous.face();

    candidate_face == previous_face
        || (candidate_face.opposite() == previous_face && candidate_face < previous_face)
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.quarter_turns() {
            1 => "",
            2 => "2",
            _ => "'",
        };
        write!(f, "{}{}", self.face().letter(), suffix)
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseMoveError {
    #[error("empty move")]
    Empty,
    #[error("unknown face {0:?}, expected one of U R F D L B")]
    UnknownFace(char),
    #[error("unknown turn suffix {0:?}, expected nothing, \"2\" or \"'\"")]
    UnknownSuffix(String),
}

impl FromStr for Move {
    type Err = ParseMoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let letter = chars.next().ok_or(ParseMoveError::Empty)?;
        let face = Face::ALL
            .into_iter()
            .find(|face| face.letter() == letter.to_ascii_uppercase())
            .ok_or(ParseMoveError::UnknownFace(letter))?;

        let quarter_turns = match chars.as_str() {
            "" => 1,
            "2" => 2,
            "'" | "3" => 3,
            other => return Err(ParseMoveError::UnknownSuffix(other.to_owned())),
        };

        Ok(Move::new(face, quarter_turns))
    }
}

/// Parses a whitespace-separated move sequence such as `"R U R' U'"`.
pub fn parse_sequence(sequence: &str) -> Result<Vec<Move>, ParseMoveError> {
    sequence.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_ids_cover_faces_in_order() {
        for mv in Move::ALL {
            assert_eq!(mv.face() as u8, mv.id() / 3);
            assert_eq!(Move::new(mv.face(), mv.quarter_turns()), mv);
        }
    }

    #[test]
    fn test_inverse_is_involution() {
        for mv in Move::ALL {
            assert_eq!(mv.inverse().inverse(), mv);
            assert_eq!(mv.inverse().face(), mv.face());
        }
        assert_eq!("R2".parse::<Move>().unwrap().inverse().to_string(), "R2");
        assert_eq!("U".parse::<Move>().unwrap().inverse().to_string(), "U'");
    }

    #[test]
    fn test_display_and_parse_agree() {
        for mv in Move::ALL {
            assert_eq!(mv.to_string().parse::<Move>(), Ok(mv));
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Move>(), Err(ParseMoveError::Empty));
        assert_eq!("X".parse::<Move>(), Err(ParseMoveError::UnknownFace('X')));
        assert_eq!(
            "R4".parse::<Move>(),
            Err(ParseMoveError::UnknownSuffix("4".to_owned()))
        );
        assert_eq!(parse_sequence("R U R' U'").unwrap().len(), 4);
    }

    #[test]
    fn test_first_move_is_never_skipped() {
        for mv in Move::ALL {
            assert!(!should_skip(mv, None));
        }
    }

    #[test]
    fn test_same_face_is_skipped() {
        let r = Move::new(Face::R, 1);
        for quarter_turns in 1..=3 {
            assert!(should_skip(Move::new(Face::R, quarter_turns), Some(r)));
        }
    }

    #[test]
    fn test_opposite_faces_explored_in_one_order() {
        let u = Move::new(Face::U, 1);
        let d = Move::new(Face::D, 2);
        assert!(!should_skip(d, Some(u)), "D after U is canonical");
        assert!(should_skip(u, Some(d)), "U after D duplicates D after U");

        let l = Move::new(Face::L, 3);
        let r = Move::new(Face::R, 1);
        assert!(!should_skip(l, Some(r)));
        assert!(should_skip(r, Some(l)));
    }

    #[test]
    fn test_adjacent_faces_are_kept() {
        let u = Move::new(Face::U, 1);
        for face in [Face::R, Face::F, Face::L, Face::B] {
            assert!(!should_skip(Move::new(face, 1), Some(u)));
            assert!(!should_skip(u, Some(Move::new(face, 1))));
        }
    }

    #[test]
    fn test_skip_counts_match_canonical_branching() {
        // 15 successors after U/R/F, 12 after D/L/B
        for previous in Move::ALL {
            let kept = Move::ALL
                .iter()
                .filter(|&&mv| !should_skip(mv, Some(previous)))
                .count();
            let expected = if (previous.face() as u8) < 3 { 15 } else { 12 };
            assert_eq!(kept, expected, "after {previous}");
        }
    }
}
