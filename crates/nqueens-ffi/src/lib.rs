use nqueens_core::{
    format_time, Engine, EngineError, FigureKind, PlacementError, PlacementResult, Position,
};
use log::debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

uniffi::setup_scaffolding!();

/// Figure kinds exposed to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FigureType {
    Queen,
    Knight,
}

impl From<FigureType> for FigureKind {
    fn from(f: FigureType) -> Self {
        match f {
            FigureType::Queen => FigureKind::Queen,
            FigureType::Knight => FigureKind::Knight,
        }
    }
}

impl From<FigureKind> for FigureType {
    fn from(k: FigureKind) -> Self {
        match k {
            FigureKind::Queen => FigureType::Queen,
            FigureKind::Knight => FigureType::Knight,
        }
    }
}

/// A square on the board; x is the row, y the column
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Record)]
pub struct BoardPosition {
    pub x: i64,
    pub y: i64,
}

impl From<Position> for BoardPosition {
    fn from(p: Position) -> Self {
        BoardPosition {
            x: p.x as i64,
            y: p.y as i64,
        }
    }
}

/// Board state after a successful placement or removal
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct PlacementSnapshot {
    /// Threat matrix indexed `[x][y]`, 1 marks a threatened square
    pub board: Vec<Vec<u8>>,
    pub occupied_positions: Vec<BoardPosition>,
}

impl From<PlacementResult> for PlacementSnapshot {
    fn from(result: PlacementResult) -> Self {
        PlacementSnapshot {
            board: result.threats.to_rows(),
            occupied_positions: result.occupied.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum PlacementFailure {
    #[error("position ({x}, {y}) is outside the board")]
    OutsideBounds { x: i64, y: i64 },
    #[error("position ({x}, {y}) is already occupied")]
    Occupied { x: i64, y: i64 },
    #[error("position ({x}, {y}) is attacked or attacks a placed figure")]
    Invalid { x: i64, y: i64 },
}

impl From<PlacementError> for PlacementFailure {
    fn from(e: PlacementError) -> Self {
        let BoardPosition { x, y } = e.position().into();
        match e {
            PlacementError::OutsideBounds(_) => PlacementFailure::OutsideBounds { x, y },
            PlacementError::Occupied(_) => PlacementFailure::Occupied { x, y },
            PlacementError::Invalid(_) => PlacementFailure::Invalid { x, y },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, uniffi::Error)]
pub enum EngineFailure {
    #[error("invalid board size {size}")]
    InvalidBoardSize { size: i64 },
}

impl From<EngineError> for EngineFailure {
    fn from(e: EngineError) -> Self {
        match e {
            EngineError::InvalidBoardSize(size) => EngineFailure::InvalidBoardSize { size },
        }
    }
}

fn board_size_from(size: i64) -> Result<usize, EngineFailure> {
    usize::try_from(size).map_err(|_| EngineFailure::InvalidBoardSize { size })
}

/// Negative coordinates never name a square
fn position_from(x: i64, y: i64) -> Option<Position> {
    Some(Position::new(usize::try_from(x).ok()?, usize::try_from(y).ok()?))
}

/// Placement engine shared with the host. All calls are serialized by the
/// inner lock.
#[derive(uniffi::Object)]
pub struct NQueensEngine {
    engine: Mutex<Engine>,
}

impl NQueensEngine {
    fn engine(&self) -> MutexGuard<'_, Engine> {
        self.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[uniffi::export]
impl NQueensEngine {
    /// Create an empty board of the given size
    #[uniffi::constructor]
    pub fn new(board_size: i64) -> Result<Arc<Self>, EngineFailure> {
        let engine = Engine::new(board_size_from(board_size)?)?;
        debug!("created {}x{} engine", board_size, board_size);
        Ok(Arc::new(Self {
            engine: Mutex::new(engine),
        }))
    }

    pub fn board_size(&self) -> i64 {
        self.engine().board_size() as i64
    }

    /// Threat matrix indexed `[x][y]`
    pub fn current_board(&self) -> Vec<Vec<u8>> {
        self.engine().threat_matrix().to_rows()
    }

    /// Positions of placed figures, in placement order
    pub fn occupied_positions(&self) -> Vec<BoardPosition> {
        self.engine()
            .occupied_positions()
            .into_iter()
            .map(Into::into)
            .collect()
    }

    pub fn place(
        &self,
        figure: FigureType,
        x: i64,
        y: i64,
    ) -> Result<PlacementSnapshot, PlacementFailure> {
        let position =
            position_from(x, y).ok_or(PlacementFailure::OutsideBounds { x, y })?;
        let result = self.engine().place(figure.into(), position)?;
        Ok(result.into())
    }

    /// Remove the figure at (x, y); a no-op on empty or off-board squares
    pub fn remove(&self, x: i64, y: i64) -> PlacementSnapshot {
        let mut engine = self.engine();
        match position_from(x, y) {
            Some(position) => engine.remove(position).into(),
            None => PlacementSnapshot {
                board: engine.threat_matrix().to_rows(),
                occupied_positions: engine
                    .occupied_positions()
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            },
        }
    }

    pub fn reset(&self) {
        self.engine().reset();
    }

    /// True when N figures stand on an N×N board
    pub fn is_solved(&self) -> bool {
        self.engine().is_solved()
    }
}

/// Squares a lone figure at (x, y) would attack, indexed `[x][y]`
#[uniffi::export]
pub fn attack_fields(
    figure: FigureType,
    x: i64,
    y: i64,
    board_size: i64,
) -> Result<Vec<Vec<u8>>, EngineFailure> {
    let size = board_size_from(board_size)?;
    let rows = match position_from(x, y) {
        Some(position) => nqueens_core::attack_fields(figure.into(), position, size).to_rows(),
        None => vec![vec![0; size]; size],
    };
    Ok(rows)
}

/// Format a duration in seconds as MM:SS
#[uniffi::export]
pub fn format_best_time(secs: f64) -> String {
    format_time(secs)
}
