//! Tetromino catalog
//!
//! The seven shape templates, each stored as the square matrix of its spawn
//! orientation. Every non-zero cell holds the kind's identifier, which is the
//! value written into the board when the piece locks.

use ratatui::style::Color;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

const I_SHAPE: [[u8; 4]; 4] = [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]];
const J_SHAPE: [[u8; 3]; 3] = [[2, 0, 0], [2, 2, 2], [0, 0, 0]];
const L_SHAPE: [[u8; 3]; 3] = [[0, 0, 3], [3, 3, 3], [0, 0, 0]];
const O_SHAPE: [[u8; 2]; 2] = [[4, 4], [4, 4]];
const S_SHAPE: [[u8; 3]; 3] = [[0, 5, 5], [5, 5, 0], [0, 0, 0]];
const T_SHAPE: [[u8; 3]; 3] = [[0, 6, 0], [6, 6, 6], [0, 0, 0]];
const Z_SHAPE: [[u8; 3]; 3] = [[7, 7, 0], [0, 7, 7], [0, 0, 0]];

impl TetrominoType {
    /// Get all tetromino types, in catalog order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::J,
            TetrominoType::L,
            TetrominoType::O,
            TetrominoType::S,
            TetrominoType::T,
            TetrominoType::Z,
        ]
    }

    /// Catalog name of the shape
    pub fn name(&self) -> &'static str {
        match self {
            TetrominoType::I => "I",
            TetrominoType::J => "J",
            TetrominoType::L => "L",
            TetrominoType::O => "O",
            TetrominoType::S => "S",
            TetrominoType::T => "T",
            TetrominoType::Z => "Z",
        }
    }

    /// Cell value this kind writes into the board (1..=7)
    pub fn cell_value(&self) -> u8 {
        match self {
            TetrominoType::I => 1,
            TetrominoType::J => 2,
            TetrominoType::L => 3,
            TetrominoType::O => 4,
            TetrominoType::S => 5,
            TetrominoType::T => 6,
            TetrominoType::Z => 7,
        }
    }

    /// Reverse of [`cell_value`](Self::cell_value); `None` for 0 and unknown values
    pub fn from_cell(value: u8) -> Option<TetrominoType> {
        Self::all().into_iter().find(|kind| kind.cell_value() == value)
    }

    /// A fresh, owned copy of the spawn-orientation matrix
    pub fn template(&self) -> Vec<Vec<u8>> {
        fn rows<const N: usize>(shape: &[[u8; N]; N]) -> Vec<Vec<u8>> {
            shape.iter().map(|row| row.to_vec()).collect()
        }

        match self {
            TetrominoType::I => rows(&I_SHAPE),
            TetrominoType::J => rows(&J_SHAPE),
            TetrominoType::L => rows(&L_SHAPE),
            TetrominoType::O => rows(&O_SHAPE),
            TetrominoType::S => rows(&S_SHAPE),
            TetrominoType::T => rows(&T_SHAPE),
            TetrominoType::Z => rows(&Z_SHAPE),
        }
    }

    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::J => Color::Blue,
            TetrominoType::L => Color::Rgb(255, 165, 0), // Orange
            TetrominoType::O => Color::Yellow,
            TetrominoType::S => Color::Green,
            TetrominoType::T => Color::Magenta,
            TetrominoType::Z => Color::Red,
        }
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl RotationDirection {
    pub fn reverse(&self) -> RotationDirection {
        match self {
            RotationDirection::Clockwise => RotationDirection::CounterClockwise,
            RotationDirection::CounterClockwise => RotationDirection::Clockwise,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_are_square() {
        for kind in TetrominoType::all() {
            let template = kind.template();
            assert!(template.iter().all(|row| row.len() == template.len()));
        }
    }

    #[test]
    fn test_templates_hold_only_their_own_value() {
        for kind in TetrominoType::all() {
            let filled: Vec<u8> = kind
                .template()
                .into_iter()
                .flatten()
                .filter(|&v| v != 0)
                .collect();
            assert_eq!(filled.len(), 4, "{} should have 4 blocks", kind.name());
            assert!(filled.iter().all(|&v| v == kind.cell_value()));
        }
    }

    #[test]
    fn test_cell_value_round_trip() {
        for kind in TetrominoType::all() {
            assert_eq!(TetrominoType::from_cell(kind.cell_value()), Some(kind));
        }
        assert_eq!(TetrominoType::from_cell(0), None);
        assert_eq!(TetrominoType::from_cell(8), None);
    }

    #[test]
    fn test_template_is_a_copy() {
        let mut first = TetrominoType::T.template();
        first[0][0] = 9;
        assert_eq!(TetrominoType::T.template()[0][0], 0);
    }
}
