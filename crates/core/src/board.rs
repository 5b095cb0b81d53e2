//! Board module - manages the game grid
//!
//! The board is a 10-column grid with a configurable number of rows. Each cell is
//! empty or holds a settled [`Block`].
//! Uses a flat vector in row-major order for cache locality.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..height (top to bottom)

use arrayvec::ArrayVec;

use crate::error::ConfigError;
use crate::types::{
    cell_code, Block, Cell, CellColor, BOARD_WIDTH, MAX_BOARD_HEIGHT, MIN_BOARD_HEIGHT,
};

/// Row indices, at most one per board row
pub type RowList = ArrayVec<usize, { MAX_BOARD_HEIGHT as usize }>;

/// What happened to existing cells when the height changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// Every occupied cell fit; contents kept, anchored to the floor
    Preserved,
    /// Some occupied cell would have been clipped; the board was cleared
    Cleared,
}

/// The game board
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    height: u8,
    /// Flat vector of cells, row-major order (y * WIDTH + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board.
    ///
    /// Panics if `height` is outside `MIN_BOARD_HEIGHT..=MAX_BOARD_HEIGHT`; use
    /// [`Board::validate_height`] at configuration boundaries.
    pub fn new(height: u8) -> Self {
        assert!(
            Self::validate_height(height).is_ok(),
            "board height {} outside {}..={}",
            height,
            MIN_BOARD_HEIGHT,
            MAX_BOARD_HEIGHT
        );
        Self {
            height,
            cells: vec![None; BOARD_WIDTH as usize * height as usize],
        }
    }

    pub fn validate_height(height: u8) -> Result<(), ConfigError> {
        if (MIN_BOARD_HEIGHT..=MAX_BOARD_HEIGHT).contains(&height) {
            Ok(())
        } else {
            Err(ConfigError::InvalidBoardHeight {
                height,
                min: MIN_BOARD_HEIGHT,
                max: MAX_BOARD_HEIGHT,
            })
        }
    }

    #[inline(always)]
    fn index(&self, x: i8, y: i8) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Cell at an in-range position.
    ///
    /// Out-of-range coordinates are a caller bug and panic.
    pub fn cell_at(&self, x: usize, y: usize) -> Cell {
        assert!(
            x < BOARD_WIDTH as usize && y < self.height as usize,
            "cell ({}, {}) outside {}x{} board",
            x,
            y,
            BOARD_WIDTH,
            self.height
        );
        self.cells[y * BOARD_WIDTH as usize + x]
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Place an obstacle cell
    pub fn set_solid(&mut self, x: i8, y: i8, color: CellColor) -> bool {
        self.set(x, y, Some(Block::solid(color)))
    }

    /// Check if position is valid (within bounds and empty)
    pub fn is_valid(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    pub fn is_out_of_bounds(&self, x: i8, y: i8) -> bool {
        x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= self.height as i8
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height as usize {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * BOARD_WIDTH as usize;
        &self.cells[start..start + BOARD_WIDTH as usize]
    }

    /// Indices of all full rows, top to bottom
    pub fn full_rows(&self) -> RowList {
        (0..self.height as usize)
            .filter(|&y| self.is_row_full(y))
            .collect()
    }

    /// Stamp a locked piece into the board.
    ///
    /// Callers guarantee every target is in bounds and empty (collision checks
    /// happen before locking).
    pub fn write_cells(&mut self, coords: &[(i8, i8)], color: CellColor) {
        for &(x, y) in coords {
            debug_assert!(self.is_valid(x, y), "lock onto occupied cell ({}, {})", x, y);
            self.set(x, y, Some(Block::normal(color)));
        }
    }

    /// Remove the given rows and shift everything above them down.
    ///
    /// Two-pointer pass from the bottom; the vacated top rows are cleared.
    /// Returns the number of rows removed.
    pub fn compact(&mut self, rows: &[usize]) -> usize {
        let width = BOARD_WIDTH as usize;
        let height = self.height as usize;
        let mut write_y = height;
        let mut removed = 0;

        for read_y in (0..height).rev() {
            if rows.contains(&read_y) {
                removed += 1;
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src_start = read_y * width;
                self.cells
                    .copy_within(src_start..src_start + width, write_y * width);
            }
        }

        for cell in &mut self.cells[..write_y * width] {
            *cell = None;
        }

        removed
    }

    /// Change the playable height.
    ///
    /// Contents are kept anchored to the floor when every occupied cell fits in
    /// the new height; otherwise the board is cleared.
    pub fn set_height(&mut self, height: u8) -> Result<ResizeOutcome, ConfigError> {
        Self::validate_height(height)?;

        let width = BOARD_WIDTH as usize;
        let old = self.height as usize;
        let new = height as usize;

        let fits = new >= old || (0..old - new).all(|y| self.row(y).iter().all(Option::is_none));

        let mut cells = vec![None; width * new];
        let outcome = if fits {
            let kept = old.min(new);
            let src = &self.cells[(old - kept) * width..];
            cells[(new - kept) * width..].copy_from_slice(src);
            ResizeOutcome::Preserved
        } else {
            ResizeOutcome::Cleared
        };

        self.height = height;
        self.cells = cells;
        Ok(outcome)
    }

    /// Get a reference to the internal cells
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable access for region highlighting
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Flat row-major cell codes (see `CELL_CODE_*`)
    pub fn encode(&self) -> Vec<u8> {
        self.cells.iter().map(|&c| cell_code(c)).collect()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_BOARD_HEIGHT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellFlag, DEFAULT_BOARD_HEIGHT};

    fn fill_row(board: &mut Board, y: i8, color: CellColor) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(Block::normal(color)));
        }
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::default();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_cell_at_out_of_range_panics() {
        let board = Board::default();
        let _ = board.cell_at(10, 0);
    }

    #[test]
    fn test_full_rows_ordered() {
        let mut board = Board::default();
        fill_row(&mut board, 19, CellColor::Cyan);
        fill_row(&mut board, 17, CellColor::Yellow);
        board.set(0, 18, Some(Block::normal(CellColor::Cyan)));

        assert_eq!(board.full_rows().as_slice(), &[17, 19]);
    }

    #[test]
    fn test_compact_shifts_rows_above() {
        let mut board = Board::default();
        board.set(2, 15, Some(Block::normal(CellColor::Magenta)));
        board.set(4, 17, Some(Block::normal(CellColor::Yellow)));
        fill_row(&mut board, 18, CellColor::Cyan);
        board.set(7, 19, Some(Block::normal(CellColor::Cyan)));

        assert_eq!(board.compact(&[18]), 1);

        assert_eq!(board.get(2, 16), Some(Some(Block::normal(CellColor::Magenta))));
        assert_eq!(board.get(4, 18), Some(Some(Block::normal(CellColor::Yellow))));
        // Rows below the cleared one are untouched
        assert_eq!(board.get(7, 19), Some(Some(Block::normal(CellColor::Cyan))));
        assert!(!board.is_row_full(18));
        assert!(board.row(0).iter().all(Option::is_none));
    }

    #[test]
    fn test_compact_non_adjacent_rows() {
        let mut board = Board::default();
        fill_row(&mut board, 19, CellColor::Cyan);
        board.set(3, 18, Some(Block::normal(CellColor::Yellow)));
        fill_row(&mut board, 17, CellColor::Cyan);
        board.set(5, 16, Some(Block::normal(CellColor::Magenta)));

        assert_eq!(board.compact(&[17, 19]), 2);

        assert_eq!(board.get(3, 19), Some(Some(Block::normal(CellColor::Yellow))));
        assert_eq!(board.get(5, 18), Some(Some(Block::normal(CellColor::Magenta))));
        assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 2);
    }

    #[test]
    fn test_set_height_preserves_bottom_anchored() {
        let mut board = Board::default();
        board.set(1, 19, Some(Block::normal(CellColor::Cyan)));
        board.set(2, 10, Some(Block::normal(CellColor::Yellow)));

        assert_eq!(board.set_height(24), Ok(ResizeOutcome::Preserved));
        assert_eq!(board.height(), 24);
        assert_eq!(board.get(1, 23), Some(Some(Block::normal(CellColor::Cyan))));
        assert_eq!(board.get(2, 14), Some(Some(Block::normal(CellColor::Yellow))));

        assert_eq!(board.set_height(12), Ok(ResizeOutcome::Preserved));
        assert_eq!(board.get(1, 11), Some(Some(Block::normal(CellColor::Cyan))));
        assert_eq!(board.get(2, 2), Some(Some(Block::normal(CellColor::Yellow))));
    }

    #[test]
    fn test_set_height_clears_when_clipped() {
        let mut board = Board::default();
        board.set(0, 2, Some(Block::normal(CellColor::Cyan)));

        assert_eq!(board.set_height(10), Ok(ResizeOutcome::Cleared));
        assert_eq!(board.height(), 10);
        assert!(board.cells().iter().all(Option::is_none));
    }

    #[test]
    fn test_set_height_rejects_out_of_range() {
        let mut board = Board::default();
        assert!(board.set_height(MIN_BOARD_HEIGHT - 1).is_err());
        assert!(board.set_height(MAX_BOARD_HEIGHT + 1).is_err());
        assert_eq!(board.height(), DEFAULT_BOARD_HEIGHT);
    }

    #[test]
    fn test_encode_codes() {
        let mut board = Board::default();
        board.set(0, 0, Some(Block::normal(CellColor::Magenta)));
        board.set(1, 0, Some(Block {
            color: CellColor::Yellow,
            flag: CellFlag::Connected,
        }));
        board.set_solid(2, 0, CellColor::Cyan);

        let codes = board.encode();
        assert_eq!(&codes[..4], &[2, 12, 21, 0]);
        assert_eq!(codes.len(), 200);
    }
}
