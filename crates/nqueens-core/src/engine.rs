//! Placement engine.
//!
//! Owns the list of placed figures (in placement order) and the threat
//! matrix derived from them. The matrix is merged on placement and rebuilt
//! from scratch on removal, so it always equals the union of the attack
//! fields of the figures currently on the board.

use crate::{EngineError, Figure, FigureKind, PlacementError, Position, ThreatMatrix};
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Snapshot returned by [`Engine::place`] and [`Engine::remove`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementResult {
    /// Full threat matrix after the call
    pub threats: ThreatMatrix,
    /// Occupied squares in placement order
    pub occupied: Vec<Position>,
}

#[derive(Debug, Clone)]
pub struct Engine {
    board_size: usize,
    figures: Vec<Figure>,
    threats: ThreatMatrix,
}

impl Engine {
    /// Create an empty board. The size is fixed for the engine's lifetime.
    pub fn new(board_size: usize) -> Result<Self, EngineError> {
        if board_size == 0 {
            return Err(EngineError::InvalidBoardSize(0));
        }
        Ok(Self {
            board_size,
            figures: Vec::new(),
            threats: ThreatMatrix::new(board_size),
        })
    }

    pub fn board_size(&self) -> usize {
        self.board_size
    }

    /// Union of the attack fields of every placed figure
    pub fn threat_matrix(&self) -> &ThreatMatrix {
        &self.threats
    }

    /// Occupied squares in placement order
    pub fn occupied_positions(&self) -> Vec<Position> {
        self.figures.iter().map(|f| f.position).collect()
    }

    pub fn figures(&self) -> &[Figure] {
        &self.figures
    }

    pub fn figure_count(&self) -> usize {
        self.figures.len()
    }

    pub fn figure_at(&self, pos: Position) -> Option<&Figure> {
        self.figures.iter().find(|f| f.position == pos)
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.figure_at(pos).is_some()
    }

    /// Check if the board holds N mutually non-attacking figures
    pub fn is_solved(&self) -> bool {
        self.figures.len() == self.board_size
    }

    /// Place a figure of `kind` on `position`
    pub fn place(
        &mut self,
        kind: FigureKind,
        position: Position,
    ) -> Result<PlacementResult, PlacementError> {
        self.place_figure(Figure::new(kind, position))
    }

    /// Place a figure. On error the engine is left untouched.
    pub fn place_figure(&mut self, figure: Figure) -> Result<PlacementResult, PlacementError> {
        let pos = figure.position;

        if !pos.is_within(self.board_size) {
            trace!(
                "rejecting {} at {}: outside {}x{} board",
                figure.kind,
                pos,
                self.board_size,
                self.board_size
            );
            return Err(PlacementError::OutsideBounds(pos));
        }

        if self.is_occupied(pos) {
            trace!("rejecting {} at {}: occupied", figure.kind, pos);
            return Err(PlacementError::Occupied(pos));
        }

        let fields = figure.attack_fields(self.board_size);
        let attacks_existing = self.figures.iter().any(|f| fields.is_threatened(f.position));
        if attacks_existing || self.threats.is_threatened(pos) {
            trace!("rejecting {} at {}: under attack", figure.kind, pos);
            return Err(PlacementError::Invalid(pos));
        }

        self.figures.push(figure);
        self.threats.merge(&fields);
        debug!(
            "placed {} at {} ({}/{} figures)",
            figure.kind,
            pos,
            self.figures.len(),
            self.board_size
        );

        Ok(self.snapshot())
    }

    /// Remove the figure on `position`, if any, and rebuild the threat matrix.
    /// Removing from an empty square changes nothing.
    pub fn remove(&mut self, position: Position) -> PlacementResult {
        if let Some(idx) = self.figures.iter().position(|f| f.position == position) {
            let removed = self.figures.remove(idx);
            debug!("removed {} from {}", removed.kind, position);
        }

        self.threats = self.rebuild_threats();
        self.snapshot()
    }

    /// Clear the board, keeping its size
    pub fn reset(&mut self) {
        self.figures.clear();
        self.threats = ThreatMatrix::new(self.board_size);
        debug!("reset {}x{} board", self.board_size, self.board_size);
    }

    fn rebuild_threats(&self) -> ThreatMatrix {
        let mut threats = ThreatMatrix::new(self.board_size);
        for figure in &self.figures {
            threats.merge(&figure.attack_fields(self.board_size));
        }
        threats
    }

    fn snapshot(&self) -> PlacementResult {
        PlacementResult {
            threats: self.threats.clone(),
            occupied: self.occupied_positions(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: usize, y: usize) -> Position {
        Position::new(x, y)
    }

    /// The matrix must equal a fresh union over the placed figures, and no
    /// placed figure may stand on a square attacked by another one.
    fn assert_consistent(engine: &Engine) {
        assert_eq!(engine.threat_matrix(), &engine.rebuild_threats());
        for (i, a) in engine.figures().iter().enumerate() {
            assert!(a.position.is_within(engine.board_size()));
            for (j, b) in engine.figures().iter().enumerate() {
                if i != j {
                    assert_ne!(a.position, b.position);
                    assert!(!a.attack_fields(engine.board_size()).is_threatened(b.position));
                }
            }
        }
    }

    #[test]
    fn test_initial_board_is_empty() {
        for n in 1..=12 {
            let engine = Engine::new(n).unwrap();
            assert_eq!(engine.board_size(), n);
            assert_eq!(engine.threat_matrix().size(), n);
            assert!(engine.threat_matrix().is_clear());
            assert!(engine.occupied_positions().is_empty());
        }
    }

    #[test]
    fn test_zero_size_is_rejected() {
        assert_eq!(Engine::new(0).unwrap_err(), EngineError::InvalidBoardSize(0));
    }

    #[test]
    fn test_place_first_queen_marks_attacked_squares() {
        let mut engine = Engine::new(4).unwrap();
        let result = engine.place(FigureKind::Queen, pos(1, 1)).unwrap();

        assert_eq!(result.occupied, vec![pos(1, 1)]);

        let board = &result.threats;
        for i in 0..4 {
            if i != 1 {
                assert!(board.is_threatened(pos(1, i)));
                assert!(board.is_threatened(pos(i, 1)));
            }
        }
        assert!(board.is_threatened(pos(0, 0)));
        assert!(board.is_threatened(pos(2, 2)));
        assert!(board.is_threatened(pos(0, 2)));
        assert!(board.is_threatened(pos(2, 0)));
        assert!(!board.is_threatened(pos(1, 1)));
        assert!(!board.is_threatened(pos(3, 0)));
        assert!(!board.is_threatened(pos(0, 3)));
    }

    #[test]
    fn test_cannot_place_on_occupied_square() {
        for n in 1..=5 {
            let mut engine = Engine::new(n).unwrap();
            engine.place(FigureKind::Queen, pos(0, 0)).unwrap();

            let err = engine.place(FigureKind::Queen, pos(0, 0)).unwrap_err();
            assert_eq!(err, PlacementError::Occupied(pos(0, 0)));
            assert_eq!(engine.figure_count(), 1);
        }
    }

    #[test]
    fn test_outside_bounds() {
        let mut engine = Engine::new(4).unwrap();
        assert_eq!(
            engine.place(FigureKind::Queen, pos(4, 0)),
            Err(PlacementError::OutsideBounds(pos(4, 0)))
        );
        assert_eq!(
            engine.place(FigureKind::Knight, pos(0, 7)),
            Err(PlacementError::OutsideBounds(pos(0, 7)))
        );
        assert_eq!(engine.figure_count(), 0);
    }

    #[test]
    fn test_attacking_placement_is_rejected_atomically() {
        let mut engine = Engine::new(4).unwrap();
        engine.place(FigureKind::Queen, pos(0, 0)).unwrap();
        let board_before = engine.threat_matrix().clone();
        let occupied_before = engine.occupied_positions();

        let err = engine.place(FigureKind::Queen, pos(0, 3)).unwrap_err();
        assert_eq!(err, PlacementError::Invalid(pos(0, 3)));
        assert_eq!(engine.threat_matrix(), &board_before);
        assert_eq!(engine.occupied_positions(), occupied_before);

        // Diagonal and column are rejected too
        assert!(matches!(
            engine.place(FigureKind::Queen, pos(3, 3)),
            Err(PlacementError::Invalid(_))
        ));
        assert!(matches!(
            engine.place(FigureKind::Queen, pos(2, 0)),
            Err(PlacementError::Invalid(_))
        ));
        assert_consistent(&engine);
    }

    #[test]
    fn test_knights_reject_l_shaped_neighbours_only() {
        let mut engine = Engine::new(4).unwrap();
        engine.place(FigureKind::Knight, pos(0, 0)).unwrap();

        assert!(matches!(engine.place(FigureKind::Knight, pos(1, 2)), Err(PlacementError::Invalid(_))));
        assert!(matches!(engine.place(FigureKind::Knight, pos(2, 1)), Err(PlacementError::Invalid(_))));
        // Same row is fine for knights
        engine.place(FigureKind::Knight, pos(0, 3)).unwrap();
        engine.place(FigureKind::Knight, pos(1, 0)).unwrap();
        assert!(matches!(engine.place(FigureKind::Knight, pos(1, 1)), Err(PlacementError::Invalid(_))));
        assert_eq!(engine.figure_count(), 3);
        assert_consistent(&engine);
    }

    #[test]
    fn test_mixed_kinds_keep_mutual_non_attack() {
        let mut engine = Engine::new(5).unwrap();
        engine.place(FigureKind::Queen, pos(0, 0)).unwrap();

        // A knight on the queen's diagonal does not attack the queen, but the
        // queen attacks it
        let err = engine.place(FigureKind::Knight, pos(3, 3)).unwrap_err();
        assert_eq!(err, PlacementError::Invalid(pos(3, 3)));
        assert_consistent(&engine);
    }

    #[test]
    fn test_remove_queen_recomputes_attacks() {
        let mut engine = Engine::new(4).unwrap();
        engine.place(FigureKind::Queen, pos(0, 0)).unwrap();
        engine.place(FigureKind::Queen, pos(3, 1)).unwrap();
        assert!(engine.threat_matrix().is_threatened(pos(2, 2)));

        let result = engine.remove(pos(0, 0));
        assert_eq!(result.occupied, vec![pos(3, 1)]);

        let board = &result.threats;
        assert!(!board.is_threatened(pos(0, 2)));
        assert!(!board.is_threatened(pos(0, 3)));
        assert!(!board.is_threatened(pos(1, 0)));
        // Still attacked by the queen on (3, 1)
        assert!(board.is_threatened(pos(3, 0)));
        assert!(board.is_threatened(pos(0, 1)));
        assert!(board.is_threatened(pos(2, 0)));
        assert!(board.is_threatened(pos(1, 3)));
        assert!(board.is_threatened(pos(2, 2)));
        assert_eq!(board, &attack_fields_of(FigureKind::Queen, pos(3, 1), 4));
        assert_consistent(&engine);
    }

    fn attack_fields_of(kind: FigureKind, p: Position, n: usize) -> ThreatMatrix {
        crate::attack_fields(kind, p, n)
    }

    #[test]
    fn test_remove_empty_square_is_noop() {
        let mut engine = Engine::new(4).unwrap();
        engine.place(FigureKind::Queen, pos(1, 3)).unwrap();
        let before = engine.threat_matrix().clone();

        let result = engine.remove(pos(2, 2));
        assert_eq!(result.threats, before);
        assert_eq!(result.occupied, vec![pos(1, 3)]);

        let result = engine.remove(pos(9, 9));
        assert_eq!(result.occupied, vec![pos(1, 3)]);
    }

    #[test]
    fn test_reset_matches_fresh_engine() {
        let mut engine = Engine::new(6).unwrap();
        engine.place(FigureKind::Queen, pos(0, 1)).unwrap();
        engine.place(FigureKind::Queen, pos(1, 3)).unwrap();
        engine.place(FigureKind::Queen, pos(2, 5)).unwrap();

        engine.reset();

        let fresh = Engine::new(6).unwrap();
        assert_eq!(engine.board_size(), fresh.board_size());
        assert_eq!(engine.threat_matrix(), fresh.threat_matrix());
        assert_eq!(engine.occupied_positions(), fresh.occupied_positions());

        // Usable again afterwards
        engine.place(FigureKind::Queen, pos(0, 0)).unwrap();
    }

    #[test]
    fn test_accessors_are_idempotent() {
        let mut engine = Engine::new(5).unwrap();
        engine.place(FigureKind::Queen, pos(2, 2)).unwrap();

        let m1 = engine.threat_matrix().clone();
        let m2 = engine.threat_matrix().clone();
        assert_eq!(m1, m2);
        assert_eq!(engine.occupied_positions(), engine.occupied_positions());
    }

    #[test]
    fn test_four_queens_solution() {
        let mut engine = Engine::new(4).unwrap();
        for p in [pos(0, 1), pos(1, 3), pos(2, 0), pos(3, 2)] {
            engine.place(FigureKind::Queen, p).unwrap();
            assert_consistent(&engine);
        }
        assert_eq!(engine.figure_count(), 4);
        assert!(engine.is_solved());
        assert_eq!(
            engine.occupied_positions(),
            vec![pos(0, 1), pos(1, 3), pos(2, 0), pos(3, 2)]
        );
    }

    #[test]
    fn test_eight_queens_solution() {
        let mut engine = Engine::new(8).unwrap();
        let cols = [0, 4, 7, 5, 2, 6, 1, 3];
        for (x, &y) in cols.iter().enumerate() {
            engine.place(FigureKind::Queen, pos(x, y)).unwrap();
        }
        assert!(engine.is_solved());
        assert_consistent(&engine);
    }

    #[test]
    fn test_place_remove_sequence_stays_consistent() {
        let mut engine = Engine::new(6).unwrap();
        let taps = [
            pos(0, 1),
            pos(1, 3),
            pos(2, 5),
            pos(0, 1),
            pos(3, 0),
            pos(4, 2),
            pos(1, 3),
            pos(5, 4),
            pos(2, 2),
        ];
        for p in taps {
            if engine.is_occupied(p) {
                engine.remove(p);
            } else {
                let _ = engine.place(FigureKind::Queen, p);
            }
            assert_consistent(&engine);
        }
    }

    #[test]
    fn test_single_square_board() {
        let mut engine = Engine::new(1).unwrap();
        let result = engine.place(FigureKind::Knight, pos(0, 0)).unwrap();
        assert!(result.threats.is_clear());
        assert!(engine.is_solved());
    }
}
