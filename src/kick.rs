//! Rotation with horizontal kick correction
//!
//! After rotating, a colliding piece is nudged sideways in a zig-zag: steps of
//! +1, -2, +3, -4, ... giving net shifts of +1, -1, +2, -2, ... from the
//! starting column. The search gives up as soon as the next step is positive
//! and larger than the piece width, and the rotation is undone. There are no
//! per-shape kick tables.

use crate::board::Board;
use crate::piece::{Piece, Position};
use crate::tetromino::RotationDirection;

/// Rotate `piece` in place and kick it clear of collisions
///
/// Returns false (with `piece` and `pos` unchanged) if no offset in the search
/// range fits.
pub fn rotate_with_kick(
    board: &Board,
    piece: &mut Piece,
    pos: &mut Position,
    direction: RotationDirection,
) -> bool {
    let original_x = pos.x;
    let width = piece.width() as i32;
    let mut offset: i32 = 1;

    piece.rotate(direction);
    while board.collides(piece, *pos) {
        pos.x += offset;
        offset = -(offset + offset.signum());
        if offset > width {
            piece.rotate(direction.reverse());
            pos.x = original_x;
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::TetrominoType;

    #[test]
    fn test_rotation_in_open_space_does_not_kick() {
        let board = Board::default();
        let mut piece = Piece::new(TetrominoType::T);
        let mut pos = Position::new(4, 5);

        assert!(rotate_with_kick(&board, &mut piece, &mut pos, RotationDirection::Clockwise));
        assert_eq!(pos, Position::new(4, 5));

        let mut expected = Piece::new(TetrominoType::T);
        expected.rotate(RotationDirection::Clockwise);
        assert_eq!(piece, expected);
    }

    #[test]
    fn test_kick_off_left_wall() {
        let board = Board::default();
        // Vertical I in matrix column 1, hugging the left wall
        let mut piece = Piece::new(TetrominoType::I);
        piece.rotate(RotationDirection::CounterClockwise);
        let mut pos = Position::new(-1, 5);
        assert!(!board.collides(&piece, pos));

        assert!(rotate_with_kick(&board, &mut piece, &mut pos, RotationDirection::Clockwise));
        assert_eq!(pos.x, 0);
        assert!(!board.collides(&piece, pos));
    }

    #[test]
    fn test_kick_off_right_wall_uses_negative_offset() {
        let board = Board::default();
        // Vertical T with its stem in matrix column 1 against the right wall
        let mut piece = Piece::new(TetrominoType::T);
        piece.rotate(RotationDirection::CounterClockwise);
        let mut pos = Position::new(8, 5);
        assert!(!board.collides(&piece, pos));

        assert!(rotate_with_kick(&board, &mut piece, &mut pos, RotationDirection::CounterClockwise));
        assert_eq!(pos.x, 7);
        assert!(!board.collides(&piece, pos));
    }

    #[test]
    fn test_failed_kick_restores_piece_and_position() {
        let mut board = Board::new(10, 20);
        // Box a vertical I into a one-column well
        for y in 0..20 {
            for x in 0..10 {
                if x != 4 {
                    board.set(x, y, 1);
                }
            }
        }
        let mut piece = Piece::new(TetrominoType::I);
        piece.rotate(RotationDirection::Clockwise);
        // Clockwise puts the blocks in matrix column 2
        let mut pos = Position::new(2, 4);
        assert!(!board.collides(&piece, pos));
        let before = piece.clone();

        assert!(!rotate_with_kick(&board, &mut piece, &mut pos, RotationDirection::Clockwise));
        assert_eq!(piece, before);
        assert_eq!(pos, Position::new(2, 4));
    }

    fn block_columns(board: &mut Board, cols: &[i32], rows: std::ops::Range<i32>) {
        for y in rows {
            for &x in cols {
                board.set(x, y, 1);
            }
        }
    }

    #[test]
    fn test_third_step_shifts_two_right() {
        let mut board = Board::default();
        block_columns(&mut board, &[5, 6], 10..13);
        let mut piece = Piece::new(TetrominoType::T);
        let mut pos = Position::new(4, 10);

        // Clockwise T fills columns x+1 and x+2: 0, +1 and -1 all collide
        assert!(rotate_with_kick(&board, &mut piece, &mut pos, RotationDirection::Clockwise));
        assert_eq!(pos.x, 6);
    }

    #[test]
    fn test_search_stops_at_piece_width() {
        let mut board = Board::default();
        block_columns(&mut board, &[5, 6, 7, 8], 10..13);
        let mut piece = Piece::new(TetrominoType::T);
        let mut pos = Position::new(4, 10);
        let before = piece.clone();

        // A -2 shift would fit, but a 3-wide piece only tries +1, -1 and +2
        assert!(!rotate_with_kick(&board, &mut piece, &mut pos, RotationDirection::Clockwise));
        assert_eq!(piece, before);
        assert_eq!(pos.x, 4);

        let mut rotated = before.clone();
        rotated.rotate(RotationDirection::Clockwise);
        assert!(!board.collides(&rotated, Position::new(2, 10)));
    }
}
