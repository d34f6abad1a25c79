//! The 3×3 grid and its move/clear contract.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::lines::{completed_lines, LineCheck, LinePattern};

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 9;

/// A symbol placed by one of the two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// Both marks.
    pub const ALL: [Mark; 2] = [Mark::X, Mark::O];

    /// The opposing mark.
    #[must_use]
    pub const fn other(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// Raw cell contents, row-major. `None` is an empty cell.
pub type Cells = [Option<Mark>; BOARD_CELLS];

/// The game board.
///
/// A cell only ever goes empty → marked (a move) or marked → empty (a line
/// clear); a mark is never overwritten by the other mark.
///
/// ```
/// use gridlock::board::{Board, LinePattern, Mark};
///
/// let mut board = Board::new();
/// for i in [0, 1, 2] {
///     assert!(board.apply_move(i, Mark::X));
/// }
///
/// let check = board.evaluate_lines();
/// assert_eq!(check.patterns().collect::<Vec<_>>(), vec![LinePattern([0, 1, 2])]);
///
/// board.clear_lines(&[LinePattern([0, 1, 2])]);
/// assert!(board.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Cells,
    /// Lines cleared since the last reset, in clear order.
    cleared: Vec<LinePattern>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a board from raw cells.
    #[must_use]
    pub fn from_cells(cells: Cells) -> Self {
        Self {
            cells,
            cleared: Vec::new(),
        }
    }

    /// Empty every cell and forget previously cleared lines.
    pub fn reset(&mut self) {
        self.cells = [None; BOARD_CELLS];
        self.cleared.clear();
    }

    /// True iff `index` is on the board and that cell is empty.
    #[must_use]
    pub fn is_valid_move(&self, index: usize) -> bool {
        index < BOARD_CELLS && self.cells[index].is_none()
    }

    /// Place `mark` at `index`.
    ///
    /// Returns `false` and leaves the board untouched if the move is invalid.
    pub fn apply_move(&mut self, index: usize, mark: Mark) -> bool {
        if !self.is_valid_move(index) {
            return false;
        }
        self.cells[index] = Some(mark);
        true
    }

    /// Empty cells in ascending order.
    #[must_use]
    pub fn available_moves(&self) -> SmallVec<[usize; BOARD_CELLS]> {
        available_moves(&self.cells)
    }

    /// Every complete line, with the mark that completed it.
    #[must_use]
    pub fn evaluate_lines(&self) -> LineCheck {
        completed_lines(&self.cells)
    }

    /// True iff no cell is empty.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// True iff every cell is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }

    /// Empty the union of the cells of `patterns`, leaving all other cells
    /// as they are. Indices off the board are ignored. Returns the emptied
    /// indices in ascending order.
    pub fn clear_lines(&mut self, patterns: &[LinePattern]) -> SmallVec<[usize; BOARD_CELLS]> {
        let mut hit = [false; BOARD_CELLS];
        for pattern in patterns {
            for i in pattern.cells() {
                if let Some(slot) = hit.get_mut(i) {
                    *slot = true;
                }
            }
        }
        self.cleared.extend_from_slice(patterns);

        let cleared: SmallVec<[usize; BOARD_CELLS]> =
            (0..BOARD_CELLS).filter(|&i| hit[i]).collect();
        for &i in &cleared {
            self.cells[i] = None;
        }
        cleared
    }

    /// Contents of one cell. Out-of-range indices read as empty.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    /// Copy of the raw cells.
    #[must_use]
    pub fn cells(&self) -> Cells {
        self.cells
    }

    /// Lines cleared since the last reset.
    #[must_use]
    pub fn cleared_lines(&self) -> &[LinePattern] {
        &self.cleared
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.chunks(3) {
            for cell in row {
                match cell {
                    Some(mark) => write!(f, "{mark}")?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Empty cells of raw `cells` in ascending order.
#[must_use]
pub fn available_moves(cells: &Cells) -> SmallVec<[usize; BOARD_CELLS]> {
    cells
        .iter()
        .enumerate()
        .filter(|(_, c)| c.is_none())
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(!board.is_full());
        assert_eq!(board.available_moves().as_slice(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_valid_moves() {
        let mut board = Board::new();
        assert!(board.is_valid_move(0));
        assert!(board.is_valid_move(8));
        assert!(!board.is_valid_move(9));

        assert!(board.apply_move(4, Mark::O));
        assert!(!board.is_valid_move(4));
        assert_eq!(board.get(4), Some(Mark::O));
    }

    #[test]
    fn test_occupied_cell_is_never_overwritten() {
        let mut board = Board::new();
        assert!(board.apply_move(4, Mark::X));
        assert!(!board.apply_move(4, Mark::O));
        assert_eq!(board.get(4), Some(Mark::X));
    }

    #[test]
    fn test_out_of_range_move_is_noop() {
        let mut board = Board::new();
        assert!(!board.apply_move(9, Mark::X));
        assert!(!board.apply_move(usize::MAX, Mark::X));
        assert!(board.is_empty());
        assert_eq!(board.get(42), None);
    }

    #[test]
    fn test_is_full() {
        let mut board = Board::new();
        for i in 0..BOARD_CELLS {
            assert!(!board.is_full());
            board.apply_move(i, if i % 2 == 0 { Mark::X } else { Mark::O });
        }
        assert!(board.is_full());
        assert!(board.available_moves().is_empty());
    }

    #[test]
    fn test_clear_lines_keeps_other_cells() {
        // X X X
        // X O O
        // X . O
        let mut board = Board::new();
        for i in [0, 1, 2, 3, 6] {
            board.apply_move(i, Mark::X);
        }
        for i in [4, 5, 8] {
            board.apply_move(i, Mark::O);
        }

        let patterns: Vec<_> = board.evaluate_lines().patterns().collect();
        assert_eq!(patterns.len(), 2);

        let cleared = board.clear_lines(&patterns);
        assert_eq!(cleared.as_slice(), &[0, 1, 2, 3, 6]);
        assert_eq!(board.get(4), Some(Mark::O));
        assert_eq!(board.get(5), Some(Mark::O));
        assert_eq!(board.get(8), Some(Mark::O));
        assert_eq!(board.cleared_lines().len(), 2);
    }

    #[test]
    fn test_reset_forgets_cleared_lines() {
        let mut board = Board::new();
        for i in [0, 1, 2] {
            board.apply_move(i, Mark::X);
        }
        board.clear_lines(&[LinePattern([0, 1, 2])]);
        board.apply_move(4, Mark::O);

        board.reset();
        assert!(board.is_empty());
        assert!(board.cleared_lines().is_empty());
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.apply_move(0, Mark::X);
        board.apply_move(4, Mark::O);
        assert_eq!(board.to_string(), "X..\n.O.\n...\n");
    }
}
