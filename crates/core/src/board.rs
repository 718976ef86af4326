//! Board module - manages the game grid
//!
//! The board is a `width x height` grid where each cell is either empty or
//! tagged with the piece kind that was locked into it. Storage is a flat,
//! row-major `Vec<Cell>` (index = `row * width + col`) sized once at
//! construction; nothing reallocates afterwards.
//!
//! Only two operations mutate occupancy during play: locking (via
//! [`Board::occupy`]) and row clearing (via [`Board::clear_row`] and
//! [`Board::shift_rows_down`]).

use std::fmt;

use crate::types::{Cell, PieceKind};

/// Precondition violations reported by [`Board`] accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Flat index outside `[0, width * height)`.
    OutOfRange { index: i64, len: usize },
    /// Row index outside `[0, height)`.
    RowOutOfRange { row: usize, height: u16 },
    /// Attempted to occupy a cell that already holds a piece.
    CellOccupied { index: usize },
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfRange { index, len } => {
                write!(f, "cell index {index} out of range (board has {len} cells)")
            }
            BoardError::RowOutOfRange { row, height } => {
                write!(f, "row {row} out of range (board has {height} rows)")
            }
            BoardError::CellOccupied { index } => write!(f, "cell {index} is already occupied"),
        }
    }
}

impl std::error::Error for BoardError {}

/// The game board using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width > 0 && height > 0, "board dimensions must be positive");
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    /// Build a board from text rows, top row first.
    ///
    /// `'.'` (or space) is empty; a piece letter is a cell occupied by that kind.
    /// Any other character is treated as an `I` block. Rows shorter than the
    /// widest one are padded with empty cells; returns `None` for no rows.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let height = u16::try_from(rows.len()).ok()?;
        let width = rows.iter().map(|r| r.chars().count()).max()?;
        let width = u16::try_from(width).ok()?;
        if width == 0 || height == 0 {
            return None;
        }

        let mut board = Self::new(width, height);
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                if ch == '.' || ch == ' ' {
                    continue;
                }
                let kind = PieceKind::from_char(ch).unwrap_or(PieceKind::I);
                board.cells[row * width as usize + col] = Cell::Occupied(kind);
            }
        }
        Some(board)
    }

    /// Number of columns
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> u16 {
        self.height
    }

    /// Total number of cells (`width * height`)
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    #[inline(always)]
    fn checked_index(&self, index: i64) -> Result<usize, BoardError> {
        if index < 0 || index >= self.cells.len() as i64 {
            return Err(BoardError::OutOfRange {
                index,
                len: self.cells.len(),
            });
        }
        Ok(index as usize)
    }

    #[inline(always)]
    fn row_range(&self, row: usize) -> std::ops::Range<usize> {
        let width = self.width as usize;
        row * width..(row + 1) * width
    }

    /// Get the cell at a flat index, `None` when out of bounds.
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Whether the cell at `index` holds a piece.
    pub fn is_occupied(&self, index: i64) -> Result<bool, BoardError> {
        let idx = self.checked_index(index)?;
        Ok(self.cells[idx].is_occupied())
    }

    /// Tag an empty cell with a piece kind.
    pub fn occupy(&mut self, index: i64, kind: PieceKind) -> Result<(), BoardError> {
        let idx = self.checked_index(index)?;
        if self.cells[idx].is_occupied() {
            return Err(BoardError::CellOccupied { index: idx });
        }
        self.cells[idx] = Cell::Occupied(kind);
        Ok(())
    }

    /// Check if a row is completely filled. Out-of-range rows are never full.
    pub fn row_is_full(&self, row: usize) -> bool {
        if row >= self.height as usize {
            return false;
        }
        self.cells[self.row_range(row)]
            .iter()
            .all(Cell::is_occupied)
    }

    /// Set every cell of `row` to empty.
    pub fn clear_row(&mut self, row: usize) -> Result<(), BoardError> {
        if row >= self.height as usize {
            return Err(BoardError::RowOutOfRange {
                row,
                height: self.height,
            });
        }
        let range = self.row_range(row);
        self.cells[range].fill(Cell::Empty);
        Ok(())
    }

    /// Move every row above `below_row` down by one, overwriting `below_row`.
    /// The top row becomes empty.
    pub fn shift_rows_down(&mut self, below_row: usize) -> Result<(), BoardError> {
        if below_row >= self.height as usize {
            return Err(BoardError::RowOutOfRange {
                row: below_row,
                height: self.height,
            });
        }

        let width = self.width as usize;
        // copy_within handles the overlap; go bottom-up so sources are read before overwrite
        for row in (1..=below_row).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }
        self.cells[..width].fill(Cell::Empty);
        Ok(())
    }

    /// Clear the entire board
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Count of non-empty cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Iterate `(index, kind)` for every occupied cell.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (usize, PieceKind)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.kind().map(|k| (i, k)))
    }

    /// Render rows back into the `from_rows` text form (handy in assertions).
    pub fn to_rows(&self) -> Vec<String> {
        (0..self.height as usize)
            .map(|row| {
                self.cells[self.row_range(row)]
                    .iter()
                    .map(|c| c.kind().map_or('.', |k| k.as_char()))
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::BOARD_WIDTH, crate::types::BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(10, 20);
        assert_eq!(board.len(), 200);
        assert!(board.is_empty());
        for i in 0..200 {
            assert_eq!(board.is_occupied(i), Ok(false));
        }
    }

    #[test]
    fn test_is_occupied_out_of_range() {
        let board = Board::new(10, 20);
        assert_eq!(
            board.is_occupied(-1),
            Err(BoardError::OutOfRange { index: -1, len: 200 })
        );
        assert_eq!(
            board.is_occupied(200),
            Err(BoardError::OutOfRange { index: 200, len: 200 })
        );
    }

    #[test]
    fn test_occupy_rejects_filled_cell() {
        let mut board = Board::new(10, 20);
        board.occupy(42, PieceKind::T).unwrap();
        assert_eq!(board.get(42), Some(Cell::Occupied(PieceKind::T)));
        assert_eq!(
            board.occupy(42, PieceKind::S),
            Err(BoardError::CellOccupied { index: 42 })
        );
        // first tag is kept
        assert_eq!(board.get(42), Some(Cell::Occupied(PieceKind::T)));
    }

    #[test]
    fn test_row_is_full_out_of_range_is_false() {
        let board = Board::from_rows(&["LLL", "LLL"]).unwrap();
        assert!(board.row_is_full(0));
        assert!(board.row_is_full(1));
        assert!(!board.row_is_full(2));
    }

    #[test]
    fn test_shift_rows_down_moves_rows_and_empties_top() {
        let mut board = Board::from_rows(&["J..", ".T.", "..S", "OOO"]).unwrap();
        board.clear_row(2).unwrap();
        board.shift_rows_down(2).unwrap();
        assert_eq!(board.to_rows(), vec!["...", "J..", ".T.", "OOO"]);
    }

    #[test]
    fn test_shift_rows_down_row_zero_only_clears_top() {
        let mut board = Board::from_rows(&["ZZ.", "I.I"]).unwrap();
        board.shift_rows_down(0).unwrap();
        assert_eq!(board.to_rows(), vec!["...", "I.I"]);
    }

    #[test]
    fn test_row_ops_out_of_range() {
        let mut board = Board::new(4, 4);
        assert_eq!(
            board.clear_row(4),
            Err(BoardError::RowOutOfRange { row: 4, height: 4 })
        );
        assert_eq!(
            board.shift_rows_down(9),
            Err(BoardError::RowOutOfRange { row: 9, height: 4 })
        );
    }

    #[test]
    fn test_from_rows_roundtrip() {
        let rows = ["L.J.", "....", "TSZO"];
        let board = Board::from_rows(&rows).unwrap();
        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        assert_eq!(board.to_rows(), rows);
        assert_eq!(board.occupied_count(), 6);
    }

    #[test]
    fn test_error_display() {
        let err = BoardError::OutOfRange { index: 250, len: 200 };
        assert_eq!(
            err.to_string(),
            "cell index 250 out of range (board has 200 cells)"
        );
    }
}
