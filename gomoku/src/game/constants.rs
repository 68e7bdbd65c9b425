/// Number of rows and columns on the board.
pub const BOARD_SIZE: usize = 10;

/// Contiguous equal symbols needed on one axis to win.
pub const WIN_LENGTH: usize = 3;

/// Row letters as they appear in coordinate text, indexed by row.
pub const ROW_LABELS: [char; BOARD_SIZE] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J'];
