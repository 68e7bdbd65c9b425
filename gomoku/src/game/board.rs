//! Board state and run-based victory detection.

use std::collections::HashMap;
use thiserror::Error;

use super::{
    constants::{BOARD_SIZE, WIN_LENGTH},
    entities::{Coordinate, Symbol},
};

/// Errors from mutating the board.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum BoardError {
    #[error("{coord} is already taken by {owner}")]
    Occupied { coord: Coordinate, owner: Symbol },
}

/// The axes a run can follow, as (row step, column step) of the positive
/// direction. The negative direction is the mirrored step.
///
/// Only the top-left to bottom-right diagonal is scanned.
const AXES: [(isize, isize); 3] = [
    // Row
    (0, 1),
    // Column
    (1, 0),
    // Top-left to bottom-right
    (1, 1),
];

/// Sparse grid of placed symbols.
///
/// Cells are only ever added. Once a coordinate is occupied it keeps its
/// symbol for the rest of the match.
#[derive(Clone, Debug, Default)]
pub struct Board {
    cells: HashMap<Coordinate, Symbol>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: HashMap::with_capacity(BOARD_SIZE * BOARD_SIZE),
        }
    }

    /// Record `symbol` at `coord`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::Occupied`] if the cell already holds a symbol;
    /// the board is left untouched.
    pub fn place(&mut self, coord: Coordinate, symbol: Symbol) -> Result<(), BoardError> {
        if let Some(&owner) = self.cells.get(&coord) {
            return Err(BoardError::Occupied { coord, owner });
        }
        self.cells.insert(coord, symbol);
        Ok(())
    }

    #[must_use]
    pub fn is_free(&self, coord: Coordinate) -> bool {
        !self.cells.contains_key(&coord)
    }

    #[must_use]
    pub fn get(&self, coord: Coordinate) -> Option<Symbol> {
        self.cells.get(&coord).copied()
    }

    /// Number of occupied cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether the symbol at `coord` completes a run of at least
    /// [`WIN_LENGTH`] along any axis through `coord`.
    ///
    /// An empty `coord` never wins.
    #[must_use]
    pub fn check_victory(&self, coord: Coordinate) -> bool {
        let Some(symbol) = self.get(coord) else {
            return false;
        };

        AXES.iter().any(|&(d_row, d_col)| {
            let run = 1
                + self.count_direction(coord, symbol, d_row, d_col)
                + self.count_direction(coord, symbol, -d_row, -d_col);
            run >= WIN_LENGTH
        })
    }

    /// Consecutive cells holding `symbol` from `start` (exclusive) in one
    /// direction, stopping at an empty cell, another symbol or the edge.
    fn count_direction(&self, start: Coordinate, symbol: Symbol, d_row: isize, d_col: isize) -> usize {
        let mut count = 0;
        let mut cursor = start;
        while let Some(next) = cursor.offset(d_row, d_col) {
            if self.get(next) != Some(symbol) {
                break;
            }
            count += 1;
            cursor = next;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(text: &str) -> Coordinate {
        text.parse().unwrap()
    }

    fn board_with(moves: &[(&str, Symbol)]) -> Board {
        let mut board = Board::new();
        for (text, symbol) in moves {
            board.place(at(text), *symbol).unwrap();
        }
        board
    }

    // === Placement Tests ===

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
        assert!(Coordinate::all().all(|c| board.is_free(c)));
    }

    #[test]
    fn test_place_marks_cell_taken() {
        let mut board = Board::new();
        assert!(board.is_free(at("D4")));
        board.place(at("D4"), Symbol::X).unwrap();
        assert!(!board.is_free(at("D4")));
        assert_eq!(board.get(at("D4")), Some(Symbol::X));
        assert_eq!(board.len(), 1);
    }

    #[test]
    fn test_place_on_occupied_cell_is_refused() {
        let mut board = board_with(&[("D4", Symbol::X)]);
        assert_eq!(
            board.place(at("D4"), Symbol::O),
            Err(BoardError::Occupied {
                coord: at("D4"),
                owner: Symbol::X
            })
        );
        assert_eq!(board.get(at("D4")), Some(Symbol::X));
    }

    // === Victory Tests ===

    #[test]
    fn test_row_victory_on_third_stone() {
        let mut board = Board::new();
        board.place(at("A0"), Symbol::X).unwrap();
        assert!(!board.check_victory(at("A0")));
        board.place(at("B0"), Symbol::O).unwrap();
        board.place(at("A1"), Symbol::X).unwrap();
        assert!(!board.check_victory(at("A1")));
        board.place(at("B1"), Symbol::O).unwrap();
        board.place(at("A2"), Symbol::X).unwrap();
        assert!(board.check_victory(at("A2")));
    }

    #[test]
    fn test_gap_breaks_row() {
        let board = board_with(&[("A0", Symbol::X), ("A1", Symbol::X), ("A3", Symbol::X)]);
        for text in ["A0", "A1", "A3"] {
            assert!(!board.check_victory(at(text)));
        }
    }

    #[test]
    fn test_opponent_symbol_breaks_row() {
        let board = board_with(&[("C2", Symbol::X), ("C3", Symbol::O), ("C4", Symbol::X), ("C5", Symbol::X)]);
        assert!(!board.check_victory(at("C4")));
        assert!(!board.check_victory(at("C2")));
    }

    #[test]
    fn test_column_victory() {
        let board = board_with(&[("E7", Symbol::O), ("F7", Symbol::O), ("G7", Symbol::O)]);
        assert!(board.check_victory(at("F7")));
        assert!(board.check_victory(at("E7")));
        assert!(board.check_victory(at("G7")));
    }

    #[test]
    fn test_middle_stone_joins_both_sides() {
        let board = board_with(&[("D3", Symbol::X), ("D5", Symbol::X), ("D4", Symbol::X)]);
        assert!(board.check_victory(at("D4")));
    }

    #[test]
    fn test_main_diagonal_victory() {
        let board = board_with(&[("B2", Symbol::X), ("C3", Symbol::X), ("D4", Symbol::X)]);
        assert!(board.check_victory(at("C3")));
    }

    #[test]
    fn test_top_right_diagonal_does_not_win() {
        let board = board_with(&[("B4", Symbol::O), ("C3", Symbol::O), ("D2", Symbol::O)]);
        for text in ["B4", "C3", "D2"] {
            assert!(!board.check_victory(at(text)));
        }
    }

    #[test]
    fn test_two_in_a_row_never_wins() {
        let board = board_with(&[("H8", Symbol::X), ("H9", Symbol::X), ("I8", Symbol::X)]);
        // H8-H9 is a pair, H8-I8 is a pair, nothing reaches three.
        assert!(!board.check_victory(at("H8")));
    }

    #[test]
    fn test_edges_are_not_scanned_past() {
        let board = board_with(&[("J7", Symbol::X), ("J8", Symbol::X), ("J9", Symbol::X)]);
        assert!(board.check_victory(at("J9")));

        let board = board_with(&[("A9", Symbol::O), ("J0", Symbol::O)]);
        assert!(!board.check_victory(at("A9")));
        assert!(!board.check_victory(at("J0")));
    }

    #[test]
    fn test_empty_cell_never_wins() {
        let board = board_with(&[("A0", Symbol::X), ("A1", Symbol::X)]);
        assert!(!board.check_victory(at("A2")));
    }
}
