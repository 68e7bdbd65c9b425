use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use super::constants::{BOARD_SIZE, ROW_LABELS};

/// Errors from parsing coordinate text such as `"C7"`.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CoordinateError {
    #[error("coordinate must be exactly a row letter and a column digit, got {0:?}")]
    InvalidLength(String),
    #[error("row {0:?} is not one of A-J")]
    InvalidRow(char),
    #[error("column {0:?} is not one of 0-9")]
    InvalidColumn(char),
}

/// A player's mark on the board.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    /// The mark held by the other player of the match.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            Self::X => "X",
            Self::O => "O",
        };
        write!(f, "{repr}")
    }
}

impl FromStr for Symbol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "X" => Ok(Self::X),
            "O" => Ok(Self::O),
            other => Err(format!("unknown symbol {other:?}")),
        }
    }
}

/// A cell on the board.
///
/// Construction through [`Coordinate::new`] or [`str::parse`] guarantees
/// both indices are below [`BOARD_SIZE`].
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Coordinate {
    row: usize,
    col: usize,
}

impl Coordinate {
    /// Returns `None` when either index falls outside the board.
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < BOARD_SIZE && col < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    #[must_use]
    pub const fn row(&self) -> usize {
        self.row
    }

    #[must_use]
    pub const fn col(&self) -> usize {
        self.col
    }

    /// Step by a signed offset, staying on the board.
    #[must_use]
    pub fn offset(&self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Self::new(row, col)
    }

    /// Every cell of the board in row-major order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_SIZE).flat_map(|row| (0..BOARD_SIZE).map(move |col| Self { row, col }))
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ROW_LABELS[self.row], self.col)
    }
}

impl FromStr for Coordinate {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(row_char), Some(col_char), None) = (chars.next(), chars.next(), chars.next())
        else {
            return Err(CoordinateError::InvalidLength(s.to_string()));
        };

        let row = ROW_LABELS
            .iter()
            .position(|&label| label == row_char)
            .ok_or(CoordinateError::InvalidRow(row_char))?;
        let col = col_char
            .to_digit(10)
            .ok_or(CoordinateError::InvalidColumn(col_char))? as usize;

        // Both indices were looked up within the board's label ranges.
        Self::new(row, col).ok_or(CoordinateError::InvalidColumn(col_char))
    }
}

impl Serialize for Coordinate {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Coordinate {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === Symbol Tests ===

    #[test]
    fn test_symbol_opponent() {
        assert_eq!(Symbol::X.opponent(), Symbol::O);
        assert_eq!(Symbol::O.opponent(), Symbol::X);
    }

    #[test]
    fn test_symbol_display_and_parse() {
        assert_eq!(Symbol::X.to_string(), "X");
        assert_eq!("O".parse::<Symbol>(), Ok(Symbol::O));
        assert!("Z".parse::<Symbol>().is_err());
    }

    // === Coordinate Tests ===

    #[test]
    fn test_parse_corners() {
        assert_eq!("A0".parse(), Ok(Coordinate::new(0, 0).unwrap()));
        assert_eq!("J9".parse(), Ok(Coordinate::new(9, 9).unwrap()));
        assert_eq!("C7".parse(), Ok(Coordinate::new(2, 7).unwrap()));
    }

    #[test]
    fn test_display_matches_wire_text() {
        let coord = Coordinate::new(4, 3).unwrap();
        assert_eq!(coord.to_string(), "E3");
    }

    #[test]
    fn test_parse_rejects_lowercase_and_out_of_range_rows() {
        assert_eq!("a0".parse::<Coordinate>(), Err(CoordinateError::InvalidRow('a')));
        assert_eq!("K0".parse::<Coordinate>(), Err(CoordinateError::InvalidRow('K')));
    }

    #[test]
    fn test_parse_rejects_bad_columns() {
        assert_eq!("AX".parse::<Coordinate>(), Err(CoordinateError::InvalidColumn('X')));
    }

    #[test]
    fn test_parse_rejects_wrong_length() {
        for text in ["", "A", "A10", " A1", "A1 "] {
            assert_eq!(
                text.parse::<Coordinate>(),
                Err(CoordinateError::InvalidLength(text.to_string())),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_new_rejects_out_of_board() {
        assert!(Coordinate::new(BOARD_SIZE, 0).is_none());
        assert!(Coordinate::new(0, BOARD_SIZE).is_none());
    }

    #[test]
    fn test_offset_stays_on_board() {
        let corner = Coordinate::new(0, 0).unwrap();
        assert!(corner.offset(-1, 0).is_none());
        assert!(corner.offset(0, -1).is_none());
        assert_eq!(corner.offset(1, 1), Coordinate::new(1, 1));

        let far = Coordinate::new(9, 9).unwrap();
        assert!(far.offset(1, 0).is_none());
        assert!(far.offset(0, 1).is_none());
    }

    #[test]
    fn test_all_covers_board_once() {
        assert_eq!(Coordinate::all().count(), BOARD_SIZE * BOARD_SIZE);
    }

    #[test]
    fn test_serde_uses_text_form() {
        let coord: Coordinate = "B4".parse().unwrap();
        let json = serde_json::to_string(&coord).unwrap();
        assert_eq!(json, "\"B4\"");
        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, coord);
    }
}
