//! Corner Pattern Database
//!
//! Builds and serves the table of exact distances from every corner
//! configuration of the 3x3x3 cube to the solved state, for use as an
//! admissible heuristic by a full-cube search.

pub mod cube;
pub mod encoding;
pub mod generator;
pub mod moves;
pub mod table;

pub use cube::{CornerConfiguration, CornerCube};
pub use encoding::{decode, encode, NUM_STATES};
pub use generator::{generate, GenerateError, GenerateOutcome, GeneratorConfig};
pub use moves::{should_skip, Face, Move};
pub use table::{CornerTable, TableError, TABLE_BYTES};

/// Largest distance any corner configuration has from solved, in face turns.
pub const MAX_CORNER_DISTANCE: u8 = 11;
