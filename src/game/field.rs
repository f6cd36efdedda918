use super::types::{Cell, Mark, Outcome};
use crate::error::GameError;

pub const BOARD_SIZE: usize = 3;
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// The eight winning index triples: rows, columns, then both diagonals.
/// Evaluated in this order; the first full line decides the winner.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// The 3×3 game board, row-major (`index = row * 3 + col`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a row-major cell array.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn get(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Write `mark` into an empty cell.
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), GameError> {
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(GameError::CellOutOfRange { index })?;
        if !cell.is_empty() {
            return Err(GameError::invalid_state(format!(
                "cell {index} is already occupied"
            )));
        }
        *cell = Cell::Marked(mark);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
    }

    /// Indices of all empty cells, ascending.
    pub fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells
            .iter()
            .filter(|c| **c == Cell::Marked(mark))
            .count()
    }

    /// The first win line whose three cells hold the same mark.
    pub fn winning_line(&self) -> Option<[usize; 3]> {
        WIN_LINES.iter().copied().find(|&[a, b, c]| {
            let first = self.cells[a];
            !first.is_empty() && first == self.cells[b] && first == self.cells[c]
        })
    }

    /// Classify the board. Pure; the same board always yields the same outcome.
    pub fn outcome(&self) -> Outcome {
        if let Some([a, _, _]) = self.winning_line() {
            if let Some(mark) = self.cells[a].mark() {
                return Outcome::Won(mark);
            }
        }
        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse a 9-char layout like "XO.X....." into a board.
    fn board(layout: &str) -> Board {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for (i, ch) in layout.chars().enumerate() {
            cells[i] = match ch {
                'X' => Cell::Marked(Mark::X),
                'O' => Cell::Marked(Mark::O),
                _ => Cell::Empty,
            };
        }
        Board::from_cells(cells)
    }

    #[test]
    fn empty_board_is_in_progress() {
        assert_eq!(Board::new().outcome(), Outcome::InProgress);
        assert_eq!(Board::new().winning_line(), None);
    }

    #[test]
    fn every_line_wins_for_either_mark() {
        for line in WIN_LINES {
            for mark in [Mark::X, Mark::O] {
                let mut b = Board::new();
                for idx in line {
                    b.place(idx, mark).unwrap();
                }
                assert_eq!(b.outcome(), Outcome::Won(mark), "line {line:?}");
                assert_eq!(b.winning_line(), Some(line));
            }
        }
    }

    #[test]
    fn full_board_without_line_is_draw() {
        let b = board("XOXXOOOXX");
        assert_eq!(b.outcome(), Outcome::Draw);
        assert_eq!(b.winning_line(), None);
    }

    #[test]
    fn win_on_full_board_beats_draw() {
        let b = board("XXXOOXOXO");
        assert_eq!(b.outcome(), Outcome::Won(Mark::X));
    }

    #[test]
    fn partial_board_without_line_is_in_progress() {
        assert_eq!(board("XO.X.O...").outcome(), Outcome::InProgress);
        assert_eq!(board("XX.OO....").outcome(), Outcome::InProgress);
    }

    #[test]
    fn first_line_in_order_wins() {
        // Two X lines through cell 0: the row is listed before the column.
        let b = board("XXXXOOXOO");
        assert_eq!(b.winning_line(), Some([0, 1, 2]));
    }

    #[test]
    fn outcome_is_idempotent() {
        let b = board("XOXOXO...");
        assert_eq!(b.outcome(), b.outcome());
    }

    #[test]
    fn place_rejects_occupied_and_out_of_range() {
        let mut b = Board::new();
        b.place(4, Mark::X).unwrap();
        assert!(matches!(
            b.place(4, Mark::O),
            Err(GameError::InvalidState { .. })
        ));
        assert_eq!(b.place(9, Mark::O), Err(GameError::CellOutOfRange { index: 9 }));
        assert_eq!(b.get(4), Some(Cell::Marked(Mark::X)));
    }

    #[test]
    fn empty_indices_and_counts() {
        let b = board("X.O.X.O..");
        assert_eq!(b.empty_indices(), vec![1, 3, 5, 7, 8]);
        assert_eq!(b.count(Mark::X), 2);
        assert_eq!(b.count(Mark::O), 2);
        assert!(!b.is_full());
    }
}
