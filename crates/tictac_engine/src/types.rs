//! Core domain types for tic-tac-toe.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of cells on the board.
pub const BOARD_CELLS: usize = 9;

/// Mark placed on the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Mark {
    /// Mark X.
    X,
    /// Mark O.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// A cell on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Empty cell.
    Empty,
    /// Cell holding a mark.
    Occupied(Mark),
}

impl Cell {
    /// Returns the mark in this cell, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(mark) => Some(mark),
        }
    }
}

/// Logical participant in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Role {
    /// The person at the keyboard.
    Human,
    /// The engine-driven opponent.
    Computer,
}

/// Lifecycle phase of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum::Display)]
pub enum RoundPhase {
    /// No mark placed since the last reset.
    #[default]
    NotStarted,
    /// At least one mark placed, no terminal state yet.
    InProgress,
    /// A win or tie was detected.
    Ended,
}

/// 3x3 tic-tac-toe board.
///
/// Cells are stored in row-major order, so index `i` is row `i / 3`,
/// column `i % 3`. A cell only ever goes from `Empty` to a mark; the
/// only way back is [`Board::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_CELLS],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; BOARD_CELLS],
        }
    }

    /// Gets the cell at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Checks if a cell is in range and empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Cell::Empty))
    }

    /// Places `mark` at `index`.
    ///
    /// Out-of-range indices and occupied cells are ignored. Returns whether
    /// the mark was placed.
    pub fn place(&mut self, index: usize, mark: Mark) -> bool {
        if !self.is_empty(index) {
            return false;
        }
        self.cells[index] = Cell::Occupied(mark);
        true
    }

    /// Counts the empty cells.
    pub fn empty_cell_count(&self) -> usize {
        self.cells.iter().filter(|c| **c == Cell::Empty).count()
    }

    /// Iterates empty cell indices in ascending order.
    pub fn empty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Cell::Empty)
            .map(|(i, _)| i)
    }

    /// Clears every cell.
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; BOARD_CELLS];
    }

    /// Returns all cells.
    pub fn cells(&self) -> &[Cell; BOARD_CELLS] {
        &self.cells
    }

    /// Places `mark` at the empty cell `index`, runs `probe`, then restores
    /// the cell to empty.
    ///
    /// This is the only path that ever clears a single cell, and it always
    /// leaves the board as it found it.
    pub(crate) fn with_trial<T>(
        &mut self,
        index: usize,
        mark: Mark,
        probe: impl FnOnce(&mut Board) -> T,
    ) -> T {
        debug_assert!(self.is_empty(index), "trial placement on occupied cell");
        self.cells[index] = Cell::Occupied(mark);
        let result = probe(self);
        self.cells[index] = Cell::Empty;
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Renders the board as a grid, numbering empty cells by index.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let index = row * 3 + col;
                match self.cells[index] {
                    Cell::Empty => write!(f, "{}", index)?,
                    Cell::Occupied(mark) => write!(f, "{}", mark)?,
                }
                if col < 2 {
                    f.write_str("|")?;
                }
            }
            if row < 2 {
                f.write_str("\n-+-+-\n")?;
            }
        }
        Ok(())
    }
}

/// Error returned when a board string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// The string did not describe exactly nine cells.
    #[display("expected 9 cells, found {}", _0)]
    WrongLength(usize),

    /// A character was neither a mark nor an empty marker.
    #[display("unexpected character {:?} at cell {}", _0, _1)]
    InvalidCell(char, usize),
}

impl std::error::Error for BoardParseError {}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine cells in row-major order. `X`/`O` (any case) are marks,
    /// `.`, `-`, `_` and space are empty. `|`, `/` and newlines are ignored
    /// so a pasted grid also parses.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let symbols: Vec<char> = s
            .chars()
            .filter(|c| !matches!(c, '|' | '/' | '\n' | '\r'))
            .collect();
        if symbols.len() != BOARD_CELLS {
            return Err(BoardParseError::WrongLength(symbols.len()));
        }

        let mut board = Board::new();
        for (index, symbol) in symbols.into_iter().enumerate() {
            match symbol {
                'x' | 'X' => {
                    board.place(index, Mark::X);
                }
                'o' | 'O' => {
                    board.place(index, Mark::O);
                }
                '.' | '-' | '_' | ' ' => {}
                other => return Err(BoardParseError::InvalidCell(other, index)),
            }
        }
        Ok(board)
    }
}
