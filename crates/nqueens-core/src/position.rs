use serde::{Deserialize, Serialize};

/// A square on the board. `x` is the row, `y` the column, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Check whether the square lies on a board of the given size
    pub fn is_within(&self, board_size: usize) -> bool {
        self.x < board_size && self.y < board_size
    }

    /// The square shifted by `(dx, dy)`, or `None` if it falls off the board
    pub fn offset(&self, dx: isize, dy: isize, board_size: usize) -> Option<Position> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let pos = Position::new(x, y);
        pos.is_within(board_size).then_some(pos)
    }

    /// Row-major index into an N×N grid
    pub(crate) fn index(&self, board_size: usize) -> usize {
        self.x * board_size + self.y
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
