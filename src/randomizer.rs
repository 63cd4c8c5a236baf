//! Piece randomizer
//!
//! Every draw picks uniformly among the seven catalog kinds, independently of
//! previous draws. A scripted sequence can stand in for the RNG when a session
//! has to be reproducible piece by piece.

use crate::tetromino::TetrominoType;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Clone)]
enum Source {
    Random(ChaCha8Rng),
    Scripted { sequence: Vec<TetrominoType>, next: usize },
}

/// Source of the next piece kind
#[derive(Debug, Clone)]
pub struct Randomizer {
    source: Source,
}

impl Default for Randomizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Randomizer {
    /// Seed from OS entropy
    pub fn new() -> Self {
        Self {
            source: Source::Random(ChaCha8Rng::from_entropy()),
        }
    }

    /// Deterministic randomizer for replays and tests
    pub fn with_seed(seed: u64) -> Self {
        Self {
            source: Source::Random(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Cycle through a fixed sequence; falls back to random draws if it is empty
    pub fn scripted(sequence: Vec<TetrominoType>) -> Self {
        if sequence.is_empty() {
            return Self::new();
        }
        Self {
            source: Source::Scripted { sequence, next: 0 },
        }
    }

    /// Get the next piece kind
    pub fn next_kind(&mut self) -> TetrominoType {
        match &mut self.source {
            Source::Random(rng) => {
                let kinds = TetrominoType::all();
                kinds[rng.gen_range(0..kinds.len())]
            }
            Source::Scripted { sequence, next } => {
                let kind = sequence[*next % sequence.len()];
                *next = (*next + 1) % sequence.len();
                kind
            }
        }
    }
}
