//! Game board representation and collision detection

use crate::piece::{Piece, Position};

/// Standard board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

/// Empty cell value; anything else is a locked piece identifier
pub const EMPTY: u8 = 0;

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: usize,
    rows: usize,
    /// Grid stored as [row][col], row 0 is the top, row increases downward
    cells: Vec<Vec<u8>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

impl Board {
    /// Create a new empty board
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![vec![EMPTY; cols]; rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// All rows, top to bottom
    pub fn cells(&self) -> &[Vec<u8>] {
        &self.cells
    }

    /// Get the cell at (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 {
            return None;
        }
        self.cells.get(y as usize)?.get(x as usize).copied()
    }

    /// Set the cell at (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, value: u8) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self.cells.get_mut(y as usize).and_then(|row| row.get_mut(x as usize)) {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Check whether `piece` placed at `pos` hits a wall, the floor or a locked cell
    ///
    /// Cells above the top row only collide with the side walls.
    pub fn collides(&self, piece: &Piece, pos: Position) -> bool {
        piece.cells().any(|(x, y, _)| {
            let col = pos.x + x;
            let row = pos.y + y;
            if col < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
                return true;
            }
            row >= 0 && self.cells[row as usize][col as usize] != EMPTY
        })
    }

    /// Write the piece's cells into the board
    ///
    /// Only valid at a position that passed [`collides`](Self::collides);
    /// cells that would land outside the board are dropped.
    pub fn merge(&mut self, piece: &Piece, pos: Position) {
        for (x, y, value) in piece.cells() {
            self.set(pos.x + x, pos.y + y, value);
        }
    }

    /// Remove every full row and return how many were removed
    ///
    /// Scans bottom-up; after a removal the same index is examined again
    /// because the rows above have shifted down into it.
    pub fn sweep(&mut self) -> u32 {
        let mut lines_cleared = 0;
        let mut row = self.rows;

        while row > 0 {
            let y = row - 1;
            if self.is_line_full(y) {
                self.cells.remove(y);
                self.cells.insert(0, vec![EMPTY; self.cols]);
                lines_cleared += 1;
            } else {
                row -= 1;
            }
        }

        lines_cleared
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|&cell| cell != EMPTY)
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|&cell| cell == EMPTY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tetromino::TetrominoType;

    fn fill_row(board: &mut Board, y: i32, value: u8) {
        for x in 0..board.cols() as i32 {
            board.set(x, y, value);
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::default();
        assert!(board.is_empty());
        assert_eq!(board.cols(), 10);
        assert_eq!(board.rows(), 20);
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::default();
        assert!(board.set(5, 5, 3));
        assert_eq!(board.get(5, 5), Some(3));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::default();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(10, 0), None);
        assert_eq!(board.get(0, 20), None);
        assert!(!board.set(10, 0, 1));
    }

    #[test]
    fn test_collides_with_walls_and_floor() {
        let board = Board::default();
        let piece = Piece::new(TetrominoType::O);
        assert!(!board.collides(&piece, Position::new(0, 0)));
        assert!(!board.collides(&piece, Position::new(8, 18)));
        assert!(board.collides(&piece, Position::new(-1, 0)));
        assert!(board.collides(&piece, Position::new(9, 0)));
        assert!(board.collides(&piece, Position::new(0, 19)));
    }

    #[test]
    fn test_empty_matrix_cells_never_collide() {
        let board = Board::default();
        // I piece occupies only matrix row 1, so columns 0..4 and rows 0, 2, 3 are free
        let piece = Piece::new(TetrominoType::I);
        assert!(!board.collides(&piece, Position::new(6, 18)));
        assert!(board.collides(&piece, Position::new(7, 0)));
    }

    #[test]
    fn test_cells_above_board_only_hit_walls() {
        let mut board = Board::default();
        fill_row(&mut board, 0, 1);
        let piece = Piece::new(TetrominoType::O);
        assert!(!board.collides(&piece, Position::new(4, -2)));
        assert!(board.collides(&piece, Position::new(4, -1)));
        assert!(board.collides(&piece, Position::new(-1, -2)));
    }

    #[test]
    fn test_collides_with_locked_cells() {
        let mut board = Board::default();
        board.set(5, 10, 2);
        let piece = Piece::new(TetrominoType::O);
        assert!(board.collides(&piece, Position::new(4, 9)));
        assert!(!board.collides(&piece, Position::new(6, 9)));
    }

    #[test]
    fn test_merge_then_collides() {
        for kind in TetrominoType::all() {
            let mut board = Board::default();
            let piece = Piece::new(kind);
            let pos = Position::new(3, 5);
            assert!(!board.collides(&piece, pos));
            board.merge(&piece, pos);
            assert!(board.collides(&piece, pos), "{} after merge", kind.name());
        }
    }

    #[test]
    fn test_merge_writes_cell_values() {
        let mut board = Board::default();
        board.merge(&Piece::new(TetrominoType::T), Position::new(0, 0));
        assert_eq!(board.get(1, 0), Some(6));
        assert_eq!(board.get(0, 1), Some(6));
        assert_eq!(board.get(1, 1), Some(6));
        assert_eq!(board.get(2, 1), Some(6));
        assert_eq!(board.get(0, 0), Some(EMPTY));
    }

    #[test]
    fn test_sweep_single_line() {
        let mut board = Board::default();
        fill_row(&mut board, 19, 1);
        board.set(0, 18, 7);

        assert_eq!(board.sweep(), 1);
        // The block from row 18 should now be on row 19
        assert_eq!(board.get(0, 19), Some(7));
        assert_eq!(board.get(1, 19), Some(EMPTY));
        assert_eq!(board.get(0, 18), Some(EMPTY));
    }

    #[test]
    fn test_sweep_adjacent_lines_rechecks_same_row() {
        let mut board = Board::default();
        for y in 16..20 {
            fill_row(&mut board, y, 1);
        }
        board.set(3, 15, 5);

        assert_eq!(board.sweep(), 4);
        assert_eq!(board.get(3, 19), Some(5));
        assert_eq!(board.cells().iter().flatten().filter(|&&c| c != EMPTY).count(), 1);
    }

    #[test]
    fn test_sweep_non_adjacent_lines() {
        let mut board = Board::default();
        fill_row(&mut board, 19, 1);
        board.set(0, 18, 2);
        fill_row(&mut board, 17, 3);
        board.set(4, 16, 4);

        assert_eq!(board.sweep(), 2);
        assert_eq!(board.get(0, 19), Some(2));
        assert_eq!(board.get(4, 18), Some(4));
    }

    #[test]
    fn test_sweep_without_full_rows_is_noop() {
        let mut board = Board::default();
        fill_row(&mut board, 19, 1);
        board.set(9, 19, EMPTY);
        board.set(2, 12, 6);
        let before = board.clone();

        assert_eq!(board.sweep(), 0);
        assert_eq!(board, before);
        assert_eq!(board.sweep(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_custom_dimensions() {
        let mut board = Board::new(4, 6);
        fill_row(&mut board, 5, 1);
        assert_eq!(board.sweep(), 1);
        assert!(board.is_empty());
        assert_eq!(board.cells().len(), 6);
    }
}
