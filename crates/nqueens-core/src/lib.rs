//! Placement engine for the N-Queens puzzle.
//!
//! Figures (queens or knights) are placed on an N×N board so that no two of
//! them attack each other. The [`Engine`] tracks occupancy and the merged
//! threat matrix; [`figure`] holds the pure attack geometry; [`GameSession`]
//! drives an engine the way a front end does (timer, win detection, best
//! times, feedback).

pub mod best_times;
pub mod engine;
pub mod error;
pub mod figure;
pub mod matrix;
pub mod position;
pub mod session;

pub use best_times::{format_time, BestTimes, BestTimesStore, MemoryStore};
pub use engine::{Engine, PlacementResult};
pub use error::{EngineError, PlacementError, StoreError};
pub use figure::{attack_fields, Figure, FigureKind};
pub use matrix::ThreatMatrix;
pub use position::Position;
pub use session::{Feedback, GameSession, NoFeedback, SessionConfig, TapOutcome};
