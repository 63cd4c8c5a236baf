//! Active falling piece

use crate::tetromino::{RotationDirection, TetrominoType};

/// Offset of a piece matrix's top-left corner in board coordinates
/// x grows rightward, y grows downward; y may be negative above the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An active falling piece
///
/// Owns a private copy of its catalog template, so rotating it never touches
/// the shared shape data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub kind: TetrominoType,
    /// Current orientation, square, `0` = no block
    matrix: Vec<Vec<u8>>,
}

impl Piece {
    /// Create a new piece in its spawn orientation
    pub fn new(kind: TetrominoType) -> Self {
        Self {
            kind,
            matrix: kind.template(),
        }
    }

    pub fn matrix(&self) -> &[Vec<u8>] {
        &self.matrix
    }

    /// Number of columns in the matrix, including empty ones
    pub fn width(&self) -> usize {
        self.matrix.first().map_or(0, Vec::len)
    }

    /// Number of rows in the matrix, including empty ones
    pub fn height(&self) -> usize {
        self.matrix.len()
    }

    /// Iterate the occupied cells as (x, y, value) relative to the matrix origin
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        self.matrix.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, value)| **value != 0)
                .map(move |(x, &value)| (x as i32, y as i32, value))
        })
    }

    /// Rotate the matrix 90 degrees in place
    pub fn rotate(&mut self, direction: RotationDirection) {
        rotate_matrix(&mut self.matrix, direction);
    }
}

/// Rotate a square matrix 90 degrees in place: transpose, then mirror
///
/// Clockwise reverses each row; counter-clockwise reverses the row order.
pub fn rotate_matrix(matrix: &mut [Vec<u8>], direction: RotationDirection) {
    let size = matrix.len();
    for y in 0..size {
        for x in 0..y {
            let upper = matrix[x][y];
            matrix[x][y] = matrix[y][x];
            matrix[y][x] = upper;
        }
    }

    match direction {
        RotationDirection::Clockwise => matrix.iter_mut().for_each(|row| row.reverse()),
        RotationDirection::CounterClockwise => matrix.reverse(),
    }
}
