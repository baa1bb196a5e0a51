//! Attack geometry of the figures.
//!
//! Everything here is a pure function of (kind, position, board size), so it
//! can be used to preview a move without touching an [`Engine`](crate::Engine).

use crate::{Position, ThreatMatrix};
use serde::{Deserialize, Serialize};

/// Ray directions of a queen (rank, file, both diagonals)
const QUEEN_DIRS: [(isize, isize); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

/// Jump offsets of a knight
const KNIGHT_DELTAS: [(isize, isize); 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];

/// Kind of figure placed on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FigureKind {
    #[default]
    Queen,
    Knight,
}

impl FigureKind {
    pub fn all() -> &'static [FigureKind] {
        &[FigureKind::Queen, FigureKind::Knight]
    }

    /// Plural name used in titles ("Place 8 Queens")
    pub fn display_name(&self) -> &'static str {
        match self {
            FigureKind::Queen => "Queens",
            FigureKind::Knight => "Knights",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            FigureKind::Queen => '♛',
            FigureKind::Knight => '♞',
        }
    }

    /// The other kind (for toggling in menus)
    pub fn next(&self) -> FigureKind {
        match self {
            FigureKind::Queen => FigureKind::Knight,
            FigureKind::Knight => FigureKind::Queen,
        }
    }
}

impl std::fmt::Display for FigureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FigureKind::Queen => write!(f, "Queen"),
            FigureKind::Knight => write!(f, "Knight"),
        }
    }
}

impl std::str::FromStr for FigureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "queen" | "queens" | "q" => Ok(FigureKind::Queen),
            "knight" | "knights" | "n" => Ok(FigureKind::Knight),
            other => Err(format!("unknown figure kind: {}", other)),
        }
    }
}

/// A figure standing on a square
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Figure {
    pub kind: FigureKind,
    pub position: Position,
}

impl Figure {
    pub fn new(kind: FigureKind, position: Position) -> Self {
        Self { kind, position }
    }

    pub fn queen(position: Position) -> Self {
        Self::new(FigureKind::Queen, position)
    }

    pub fn knight(position: Position) -> Self {
        Self::new(FigureKind::Knight, position)
    }

    /// Squares this figure attacks on a board of `board_size`
    pub fn attack_fields(&self, board_size: usize) -> ThreatMatrix {
        attack_fields(self.kind, self.position, board_size)
    }
}

/// Compute the squares attacked by a figure of `kind` standing on `position`.
///
/// The figure's own square is never marked and nothing outside
/// `[0, board_size)²` is ever referenced. A position off the board yields an
/// empty matrix.
pub fn attack_fields(kind: FigureKind, position: Position, board_size: usize) -> ThreatMatrix {
    let mut fields = ThreatMatrix::new(board_size);
    if !position.is_within(board_size) {
        return fields;
    }

    match kind {
        FigureKind::Queen => {
            for &(dx, dy) in QUEEN_DIRS.iter() {
                let mut current = position;
                while let Some(next) = current.offset(dx, dy, board_size) {
                    fields.mark(next);
                    current = next;
                }
            }
        }
        FigureKind::Knight => {
            for &(dx, dy) in KNIGHT_DELTAS.iter() {
                if let Some(target) = position.offset(dx, dy, board_size) {
                    fields.mark(target);
                }
            }
        }
    }

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Queen field by brute force over every cell
    fn queen_by_scan(pos: Position, size: usize) -> ThreatMatrix {
        let mut m = ThreatMatrix::new(size);
        for x in 0..size {
            for y in 0..size {
                if x == pos.x && y == pos.y {
                    continue;
                }
                if x == pos.x || y == pos.y || x.abs_diff(pos.x) == y.abs_diff(pos.y) {
                    m.mark(Position::new(x, y));
                }
            }
        }
        m
    }

    #[test]
    fn test_queen_rays_match_full_scan() {
        for size in 1..=9 {
            for x in 0..size {
                for y in 0..size {
                    let pos = Position::new(x, y);
                    assert_eq!(
                        attack_fields(FigureKind::Queen, pos, size),
                        queen_by_scan(pos, size),
                        "queen at {} on {}x{}",
                        pos,
                        size,
                        size
                    );
                }
            }
        }
    }

    #[test]
    fn test_queen_center_of_four() {
        let m = attack_fields(FigureKind::Queen, Position::new(1, 1), 4);
        for i in 0..4 {
            if i != 1 {
                assert!(m.is_threatened(Position::new(1, i)));
                assert!(m.is_threatened(Position::new(i, 1)));
            }
        }
        assert!(m.is_threatened(Position::new(0, 0)));
        assert!(m.is_threatened(Position::new(2, 2)));
        assert!(m.is_threatened(Position::new(3, 3)));
        assert!(m.is_threatened(Position::new(0, 2)));
        assert!(m.is_threatened(Position::new(2, 0)));
        assert!(!m.is_threatened(Position::new(3, 0)));
        assert!(!m.is_threatened(Position::new(0, 3)));
        assert!(!m.is_threatened(Position::new(1, 1)));
    }

    #[test]
    fn test_knight_center() {
        let m = attack_fields(FigureKind::Knight, Position::new(3, 3), 8);
        assert_eq!(m.threatened_count(), 8);
        assert!(m.is_threatened(Position::new(1, 2)));
        assert!(m.is_threatened(Position::new(5, 4)));
        assert!(!m.is_threatened(Position::new(3, 3)));
    }

    #[test]
    fn test_knight_corner_is_clipped() {
        let m = attack_fields(FigureKind::Knight, Position::new(0, 0), 8);
        let marked: Vec<_> = m.threatened().collect();
        assert_eq!(marked, vec![Position::new(1, 2), Position::new(2, 1)]);
    }

    #[test]
    fn test_knight_fields_stay_inside_board() {
        for size in 1..=10 {
            for x in 0..size {
                for y in 0..size {
                    let pos = Position::new(x, y);
                    let m = attack_fields(FigureKind::Knight, pos, size);
                    assert!(m.threatened_count() <= 8);
                    assert!(!m.is_threatened(pos));
                    for target in m.threatened() {
                        assert!(target.is_within(size));
                        let (dx, dy) = (target.x.abs_diff(x), target.y.abs_diff(y));
                        assert!((dx, dy) == (1, 2) || (dx, dy) == (2, 1));
                    }
                }
            }
        }
    }

    #[test]
    fn test_single_square_board_has_no_attacks() {
        for &kind in FigureKind::all() {
            assert!(attack_fields(kind, Position::new(0, 0), 1).is_clear());
        }
    }

    #[test]
    fn test_off_board_position_attacks_nothing() {
        assert!(attack_fields(FigureKind::Queen, Position::new(4, 0), 4).is_clear());
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("Queen".parse::<FigureKind>(), Ok(FigureKind::Queen));
        assert_eq!("knights".parse::<FigureKind>(), Ok(FigureKind::Knight));
        assert!("rook".parse::<FigureKind>().is_err());
        assert_eq!(FigureKind::Queen.next(), FigureKind::Knight);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&FigureKind::Knight).unwrap();
        assert_eq!(json, "\"knight\"");
    }
}
