//! One player's game: the engine plus timer, win detection and best times.
//!
//! Sound, haptics and persistence are collaborators handed in by the front
//! end; the session only calls them.

use crate::{
    format_time, BestTimes, BestTimesStore, Engine, EngineError, FigureKind, PlacementError,
    Position, ThreatMatrix,
};
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Receives play events (sounds, haptics, bells)
pub trait Feedback: Send + Sync {
    fn play_place(&self);
    fn play_remove(&self);
    fn play_error(&self);
    fn play_win(&self);
    fn notify_success(&self);
    fn notify_error(&self);
}

/// Feedback sink that ignores everything
pub struct NoFeedback;

impl Feedback for NoFeedback {
    fn play_place(&self) {}
    fn play_remove(&self) {}
    fn play_error(&self) {}
    fn play_win(&self) {}
    fn notify_success(&self) {}
    fn notify_error(&self) {}
}

/// Board size limits applied when a new game starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub min_board_size: usize,
    pub max_board_size: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            min_board_size: 4,
            max_board_size: 16,
        }
    }
}

impl SessionConfig {
    /// Clamp a requested size into the configured range
    pub fn clamp(&self, size: usize) -> usize {
        let min = self.min_board_size.max(1);
        size.clamp(min, self.max_board_size.max(min))
    }
}

/// What a tap on a square did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TapOutcome {
    /// No game running, or the board is already full
    Ignored,
    Placed,
    Removed,
    Rejected(PlacementError),
    /// The tap placed the last figure
    Won { elapsed_secs: f64, new_best: bool },
}

pub struct GameSession {
    config: SessionConfig,
    feedback: Arc<dyn Feedback>,
    store: Arc<dyn BestTimesStore>,
    /// Size for the next game
    board_size: usize,
    /// Kind for the next game
    figure_kind: FigureKind,
    engine: Option<Engine>,
    /// Kind in play on the current board
    active_kind: FigureKind,
    start_time: Option<Instant>,
    last_elapsed: Option<Duration>,
    best_times: BestTimes,
    /// Bumped on every rejected move (drives the shake animation)
    shake: u32,
    win_pending: bool,
}

impl GameSession {
    pub fn new(
        config: SessionConfig,
        feedback: Arc<dyn Feedback>,
        store: Arc<dyn BestTimesStore>,
    ) -> Self {
        let best_times = match store.load() {
            Ok(times) => times,
            Err(e) => {
                warn!("could not load best times: {}", e);
                BestTimes::new()
            }
        };

        Self {
            board_size: config.clamp(config.min_board_size),
            config,
            feedback,
            store,
            figure_kind: FigureKind::Queen,
            engine: None,
            active_kind: FigureKind::Queen,
            start_time: None,
            last_elapsed: None,
            best_times,
            shake: 0,
            win_pending: false,
        }
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    /// Size selected for the next game
    pub fn board_size(&self) -> usize {
        self.board_size
    }

    pub fn set_board_size(&mut self, size: usize) {
        self.board_size = self.config.clamp(size);
    }

    /// Kind selected for the next game
    pub fn figure_kind(&self) -> FigureKind {
        self.figure_kind
    }

    pub fn set_figure_kind(&mut self, kind: FigureKind) {
        self.figure_kind = kind;
    }

    /// Kind of the figures on the current board
    pub fn active_kind(&self) -> FigureKind {
        self.active_kind
    }

    pub fn engine(&self) -> Option<&Engine> {
        self.engine.as_ref()
    }

    pub fn has_game(&self) -> bool {
        self.engine.is_some()
    }

    /// Size of the board in play, or the selected size before the first game
    pub fn effective_board_size(&self) -> usize {
        self.engine
            .as_ref()
            .map(Engine::board_size)
            .unwrap_or(self.board_size)
    }

    pub fn threat_matrix(&self) -> ThreatMatrix {
        self.engine
            .as_ref()
            .map(|e| e.threat_matrix().clone())
            .unwrap_or_else(|| ThreatMatrix::new(0))
    }

    pub fn occupied_positions(&self) -> Vec<Position> {
        self.engine
            .as_ref()
            .map(Engine::occupied_positions)
            .unwrap_or_default()
    }

    pub fn placed(&self) -> usize {
        self.engine.as_ref().map(Engine::figure_count).unwrap_or(0)
    }

    pub fn remaining(&self) -> usize {
        self.effective_board_size().saturating_sub(self.placed())
    }

    pub fn shake(&self) -> u32 {
        self.shake
    }

    /// True once a game has been won, until acknowledged
    pub fn win_pending(&self) -> bool {
        self.win_pending
    }

    pub fn acknowledge_win(&mut self) {
        self.win_pending = false;
    }

    pub fn best_times(&self) -> &BestTimes {
        &self.best_times
    }

    /// Best time for the board in play
    pub fn best_time(&self) -> Option<f64> {
        self.best_times.get(self.effective_board_size())
    }

    pub fn last_elapsed(&self) -> Option<Duration> {
        self.last_elapsed
    }

    pub fn is_running(&self) -> bool {
        self.start_time.is_some()
    }

    /// Time spent on the current game; frozen once it is won
    pub fn elapsed(&self) -> Option<Duration> {
        self.last_elapsed
            .or_else(|| self.start_time.map(|start| start.elapsed()))
    }

    /// Timer text for display, `--:--` before the first game
    pub fn time_string(&self) -> String {
        match self.elapsed() {
            Some(elapsed) => format_time(elapsed.as_secs_f64()),
            None => "--:--".to_string(),
        }
    }

    /// Start a fresh board with the selected size and kind
    pub fn new_game(&mut self) -> Result<(), EngineError> {
        self.board_size = self.config.clamp(self.board_size);
        self.engine = Some(Engine::new(self.board_size)?);
        self.active_kind = self.figure_kind;
        self.start_time = Some(Instant::now());
        self.last_elapsed = None;
        self.win_pending = false;
        info!(
            "new game: {} {} on {}x{}",
            self.board_size,
            self.active_kind.display_name(),
            self.board_size,
            self.board_size
        );
        Ok(())
    }

    /// Clear the current board and restart the timer
    pub fn restart(&mut self) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        engine.reset();
        self.start_time = Some(Instant::now());
        self.last_elapsed = None;
        self.win_pending = false;
        debug!("restarted {}x{} game", engine.board_size(), engine.board_size());
    }

    /// Place a figure on an empty square or pick one up from an occupied one
    pub fn handle_tap(&mut self, position: Position) -> TapOutcome {
        let kind = self.active_kind;
        let Some(engine) = self.engine.as_mut() else {
            return TapOutcome::Ignored;
        };

        if engine.is_occupied(position) {
            engine.remove(position);
            self.feedback.play_remove();
            return TapOutcome::Removed;
        }

        if engine.is_solved() {
            return TapOutcome::Ignored;
        }

        match engine.place(kind, position) {
            Ok(_) => {
                self.feedback.play_place();
                let solved = engine.is_solved();
                match self.start_time.take() {
                    Some(start) if solved => self.finish_game(start),
                    start => {
                        // A board refilled after a win keeps its recorded time
                        self.start_time = start;
                        TapOutcome::Placed
                    }
                }
            }
            Err(e) => {
                self.shake = self.shake.wrapping_add(1);
                self.feedback.notify_error();
                self.feedback.play_error();
                TapOutcome::Rejected(e)
            }
        }
    }

    fn finish_game(&mut self, start: Instant) -> TapOutcome {
        let elapsed = start.elapsed();
        self.last_elapsed = Some(elapsed);

        let size = self.effective_board_size();
        let elapsed_secs = elapsed.as_secs_f64();
        let new_best = self.best_times.record(size, elapsed_secs);
        if new_best {
            if let Err(e) = self.store.save(&self.best_times) {
                warn!("could not save best times: {}", e);
            }
        }
        info!(
            "solved {}x{} in {}{}",
            size,
            size,
            format_time(elapsed_secs),
            if new_best { " (new best)" } else { "" }
        );

        self.feedback.notify_success();
        self.feedback.play_win();
        self.win_pending = true;

        TapOutcome::Won {
            elapsed_secs,
            new_best,
        }
    }
}
