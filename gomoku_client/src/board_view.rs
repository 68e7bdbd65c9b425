//! Local picture of the board, rebuilt from the moves the server announces.

use gomoku::{
    Board, BoardError, Coordinate, Symbol,
    constants::{BOARD_SIZE, ROW_LABELS},
};
use std::fmt;

/// The board as one player sees it.
#[derive(Clone, Debug)]
pub struct BoardView {
    board: Board,
    me: Symbol,
    last_move: Option<Coordinate>,
}

impl BoardView {
    pub fn new(me: Symbol) -> Self {
        Self {
            board: Board::new(),
            me,
            last_move: None,
        }
    }

    pub fn me(&self) -> Symbol {
        self.me
    }

    pub fn opponent(&self) -> Symbol {
        self.me.opponent()
    }

    /// Record one of our accepted moves.
    pub fn record_own(&mut self, coord: Coordinate) -> Result<(), BoardError> {
        self.record(coord, self.me)
    }

    /// Record a move the server relayed from the opponent.
    pub fn record_opponent(&mut self, coord: Coordinate) -> Result<(), BoardError> {
        self.record(coord, self.me.opponent())
    }

    fn record(&mut self, coord: Coordinate, symbol: Symbol) -> Result<(), BoardError> {
        self.board.place(coord, symbol)?;
        self.last_move = Some(coord);
        Ok(())
    }

    pub fn is_free(&self, coord: Coordinate) -> bool {
        self.board.is_free(coord)
    }

    pub fn moves_played(&self) -> usize {
        self.board.len()
    }
}

impl fmt::Display for BoardView {
    /// Rows are lettered, columns numbered; the last move is bracketed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {col} ")?;
        }
        writeln!(f)?;

        for (row, label) in ROW_LABELS.iter().enumerate() {
            write!(f, "{label} ")?;
            for col in 0..BOARD_SIZE {
                let Some(coord) = Coordinate::new(row, col) else {
                    continue;
                };
                let mark = self
                    .board
                    .get(coord)
                    .map_or_else(|| ".".to_string(), |symbol| symbol.to_string());
                if self.last_move == Some(coord) {
                    write!(f, "[{mark}]")?;
                } else {
                    write!(f, " {mark} ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(text: &str) -> Coordinate {
        text.parse().unwrap()
    }

    #[test]
    fn test_records_both_sides() {
        let mut view = BoardView::new(Symbol::O);
        view.record_opponent(cell("A0")).unwrap();
        view.record_own(cell("B1")).unwrap();
        assert_eq!(view.moves_played(), 2);
        assert!(!view.is_free(cell("A0")));
        assert!(view.is_free(cell("C2")));
        assert_eq!(view.opponent(), Symbol::X);
    }

    #[test]
    fn test_rejects_replayed_cell() {
        let mut view = BoardView::new(Symbol::X);
        view.record_own(cell("E5")).unwrap();
        assert!(view.record_opponent(cell("E5")).is_err());
    }

    #[test]
    fn test_render_marks_last_move() {
        let mut view = BoardView::new(Symbol::X);
        view.record_own(cell("A0")).unwrap();
        view.record_opponent(cell("A1")).unwrap();
        let rendered = view.to_string();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), BOARD_SIZE + 1);
        assert!(lines[1].starts_with("A  X [O]"));
        assert!(lines[10].starts_with("J  . "));
    }
}
