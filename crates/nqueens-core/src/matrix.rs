use crate::Position;
use serde::{Deserialize, Serialize};

/// N×N grid of threatened squares, stored row-major.
///
/// The matrix does not know about occupancy: a square holding a figure may
/// still be marked if another figure attacks it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatMatrix {
    size: usize,
    cells: Vec<bool>,
}

impl ThreatMatrix {
    /// An all-clear matrix
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![false; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether `pos` is marked. Squares off the board are never marked.
    pub fn is_threatened(&self, pos: Position) -> bool {
        pos.is_within(self.size) && self.cells[pos.index(self.size)]
    }

    /// Mark a square. Off-board positions are ignored.
    pub fn mark(&mut self, pos: Position) {
        if pos.is_within(self.size) {
            let idx = pos.index(self.size);
            self.cells[idx] = true;
        }
    }

    /// Elementwise OR with another matrix of the same size
    pub fn merge(&mut self, other: &ThreatMatrix) {
        debug_assert_eq!(self.size, other.size, "merging matrices of different sizes");
        for (cell, &theirs) in self.cells.iter_mut().zip(other.cells.iter()) {
            *cell |= theirs;
        }
    }

    /// Number of marked squares
    pub fn threatened_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Check if no square is marked
    pub fn is_clear(&self) -> bool {
        !self.cells.contains(&true)
    }

    /// Iterate over marked squares in row-major order
    pub fn threatened(&self) -> impl Iterator<Item = Position> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c)
            .map(move |(i, _)| Position::new(i / size, i % size))
    }

    /// Rows of 0/1 markers, `rows[x][y]`
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        if self.size == 0 {
            return Vec::new();
        }
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|&c| c as u8).collect())
            .collect()
    }
}

impl std::fmt::Display for ThreatMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for x in 0..self.size {
            for y in 0..self.size {
                let c = if self.is_threatened(Position::new(x, y)) { 'x' } else { '.' };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
