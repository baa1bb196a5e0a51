use crate::animations::WinScreen;
use crate::config::Config;
use crate::feedback::TerminalFeedback;
use crate::storage::FileBestTimesStore;
use crate::theme::{Theme, ThemeName};
use crossterm::event::{KeyCode, KeyEvent};
use log::{info, warn};
use nqueens_core::{
    format_time, Feedback, FigureKind, GameSession, PlacementError, Position, SessionConfig,
    TapOutcome,
};
use std::sync::Arc;
use std::time::Duration;

/// Frames the board keeps shaking after a rejected move
pub const SHAKE_FRAMES: u32 = 6;

/// Result of handling a key press
pub enum AppAction {
    Continue,
    Quit,
}

/// Current screen state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenState {
    /// Normal gameplay
    Playing,
    /// Win celebration screen
    Win,
    /// Best times table
    BestTimes,
}

/// Menu state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    None,
    NewGame,
    Theme,
}

/// The main application state
pub struct App {
    pub session: GameSession,
    /// Currently selected square
    pub cursor: Position,
    pub menu: MenuState,
    /// Selected menu item
    pub menu_selection: usize,
    pub theme: Theme,
    pub theme_name: ThemeName,
    /// Message to display
    pub message: Option<String>,
    message_timer: u32,
    pub screen_state: ScreenState,
    pub win_screen: WinScreen,
    feedback: Arc<TerminalFeedback>,
    bell_enabled: bool,
    bell_pending: bool,
    /// Remaining frames of the board shake
    shake_frames: u32,
    /// Session shake counter seen on the last tick
    last_shake: u32,
}

impl App {
    /// Create the app from the resolved configuration and start the first game
    pub fn new(config: &Config) -> Self {
        let feedback = Arc::new(TerminalFeedback::new());
        let store = Arc::new(FileBestTimesStore::new(config.best_times_path()));
        info!("best times file: {}", store.path().display());
        let session_config = SessionConfig {
            max_board_size: config.max_board_size,
            ..SessionConfig::default()
        };
        let mut session = GameSession::new(
            session_config,
            feedback.clone() as Arc<dyn Feedback>,
            store,
        );
        session.set_board_size(config.board_size);
        session.set_figure_kind(config.figure);

        let mut app = Self::with_session(session, feedback, config.theme, config.bell);
        app.start_new_game();
        app
    }

    /// Build the app around an existing session without starting a game
    pub fn with_session(
        session: GameSession,
        feedback: Arc<TerminalFeedback>,
        theme_name: ThemeName,
        bell_enabled: bool,
    ) -> Self {
        let last_shake = session.shake();
        Self {
            session,
            cursor: Position::new(0, 0),
            menu: MenuState::None,
            menu_selection: 0,
            theme: theme_name.theme(),
            theme_name,
            message: None,
            message_timer: 0,
            screen_state: ScreenState::Playing,
            win_screen: WinScreen::new(),
            feedback,
            bell_enabled,
            bell_pending: false,
            shake_frames: 0,
            last_shake,
        }
    }

    /// Get the tick rate based on current screen
    pub fn get_tick_rate(&self) -> Duration {
        match self.screen_state {
            ScreenState::Win => Duration::from_millis(33), // 30 FPS for animations
            ScreenState::Playing | ScreenState::BestTimes => Duration::from_millis(100),
        }
    }

    /// Update animations, feedback and timers (called every tick)
    pub fn tick(&mut self) {
        if self.message_timer > 0 {
            self.message_timer -= 1;
            if self.message_timer == 0 {
                self.message = None;
            }
        }

        self.process_feedback();

        if self.shake_frames > 0 {
            self.shake_frames -= 1;
        }

        match self.screen_state {
            ScreenState::Win => self.win_screen.update(),
            ScreenState::Playing => {
                if self.session.win_pending() {
                    self.session.acknowledge_win();
                    self.menu = MenuState::None;
                    self.screen_state = ScreenState::Win;
                    self.win_screen.reset(self.session.active_kind());
                }
            }
            ScreenState::BestTimes => {}
        }
    }

    fn process_feedback(&mut self) {
        for event in self.feedback.drain() {
            if self.bell_enabled && event.rings_bell() {
                self.bell_pending = true;
            }
        }

        let shake = self.session.shake();
        if shake != self.last_shake {
            self.last_shake = shake;
            self.shake_frames = SHAKE_FRAMES;
        }
    }

    /// Whether the terminal bell should ring; clears the request
    pub fn take_bell(&mut self) -> bool {
        std::mem::take(&mut self.bell_pending)
    }

    /// Horizontal board offset for the shake animation
    pub fn shake_offset(&self) -> i16 {
        if self.shake_frames == 0 {
            return 0;
        }
        if self.shake_frames % 2 == 0 {
            2
        } else {
            -2
        }
    }

    /// Show a temporary message
    pub fn show_message(&mut self, msg: &str) {
        self.message = Some(msg.to_string());
        self.message_timer = 30; // ~3 seconds at 100ms poll
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match self.screen_state {
            ScreenState::Win => self.handle_win_key(key),
            ScreenState::BestTimes => self.handle_best_times_key(key),
            ScreenState::Playing => match self.menu {
                MenuState::None => self.handle_game_key(key),
                MenuState::NewGame | MenuState::Theme => self.handle_menu_key(key),
            },
        }
    }

    fn handle_win_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,
            KeyCode::Char('n') => {
                self.screen_state = ScreenState::Playing;
                self.open_new_game_menu();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.screen_state = ScreenState::Playing;
                self.start_new_game();
            }
            KeyCode::Char('b') => {
                self.screen_state = ScreenState::BestTimes;
            }
            KeyCode::Esc => {
                // Back to the solved board
                self.screen_state = ScreenState::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_best_times_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc | KeyCode::Char('b') => {
                self.screen_state = ScreenState::Playing;
            }
            _ => {}
        }
        AppAction::Continue
    }

    fn handle_game_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') => return AppAction::Quit,

            // Navigation
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, 0),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, 0),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(0, -1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(0, 1),

            KeyCode::Enter | KeyCode::Char(' ') => self.tap(),

            KeyCode::Char('n') => self.open_new_game_menu(),

            KeyCode::Char('r') => {
                if self.session.has_game() {
                    self.session.restart();
                    self.show_message("Restarted");
                }
            }

            KeyCode::Char('+') | KeyCode::Char('=') => self.step_board_size(1),
            KeyCode::Char('-') => self.step_board_size(-1),

            KeyCode::Char('f') => {
                let kind = self.session.figure_kind().next();
                self.session.set_figure_kind(kind);
                self.show_message(&format!("Next game: {}", kind.display_name()));
            }

            KeyCode::Char('b') => {
                self.screen_state = ScreenState::BestTimes;
            }

            KeyCode::Char('t') => {
                self.menu = MenuState::Theme;
                self.menu_selection = ThemeName::all()
                    .iter()
                    .position(|&name| name == self.theme_name)
                    .unwrap_or(0);
            }

            _ => {}
        }

        AppAction::Continue
    }

    fn handle_menu_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.menu = MenuState::None;
            }

            KeyCode::Up | KeyCode::Char('k') => {
                if self.menu_selection > 0 {
                    self.menu_selection -= 1;
                }
            }

            KeyCode::Down | KeyCode::Char('j') => {
                let max = match self.menu {
                    MenuState::NewGame => self.menu_sizes().len().saturating_sub(1),
                    MenuState::Theme => ThemeName::all().len() - 1,
                    MenuState::None => 0,
                };
                if self.menu_selection < max {
                    self.menu_selection += 1;
                }
            }

            // Figure kind toggle inside the new game menu
            KeyCode::Left | KeyCode::Right | KeyCode::Char('h') | KeyCode::Char('l')
            | KeyCode::Char('f')
                if self.menu == MenuState::NewGame =>
            {
                let kind = self.session.figure_kind().next();
                self.session.set_figure_kind(kind);
            }

            KeyCode::Enter | KeyCode::Char(' ') => match self.menu {
                MenuState::NewGame => {
                    if let Some(&size) = self.menu_sizes().get(self.menu_selection) {
                        self.session.set_board_size(size);
                    }
                    self.menu = MenuState::None;
                    self.start_new_game();
                }
                MenuState::Theme => {
                    let name = ThemeName::all()
                        .get(self.menu_selection)
                        .copied()
                        .unwrap_or(ThemeName::Dark);
                    self.theme_name = name;
                    self.theme = name.theme();
                    self.menu = MenuState::None;
                }
                MenuState::None => {}
            },

            _ => {}
        }

        AppAction::Continue
    }

    /// Board sizes offered by the new game menu
    pub fn menu_sizes(&self) -> Vec<usize> {
        let config = self.session.config();
        let min = config.clamp(config.min_board_size);
        let max = config.clamp(config.max_board_size);
        (min..=max).collect()
    }

    fn open_new_game_menu(&mut self) {
        self.menu = MenuState::NewGame;
        let size = self.session.board_size();
        self.menu_selection = self
            .menu_sizes()
            .iter()
            .position(|&s| s == size)
            .unwrap_or(0);
    }

    fn step_board_size(&mut self, delta: isize) {
        let current = self.session.board_size();
        let requested = current.saturating_add_signed(delta);
        self.session.set_board_size(requested);
        let size = self.session.board_size();
        if size == current {
            self.show_message(&format!("Board size stays {}x{}", size, size));
        } else {
            self.show_message(&format!("Next game: {}x{} (press n)", size, size));
        }
    }

    fn start_new_game(&mut self) {
        match self.session.new_game() {
            Ok(()) => {
                self.cursor = Position::new(0, 0);
                self.screen_state = ScreenState::Playing;
                let size = self.session.effective_board_size();
                self.show_message(&format!(
                    "Place {} {} on the {}x{} board",
                    size,
                    self.session.active_kind().display_name().to_lowercase(),
                    size,
                    size
                ));
            }
            Err(e) => {
                warn!("could not start a game: {}", e);
                self.show_message(&format!("Could not start a game: {}", e));
            }
        }
    }

    fn tap(&mut self) {
        match self.session.handle_tap(self.cursor) {
            TapOutcome::Ignored => {
                if self.session.has_game() {
                    self.show_message("All figures placed");
                } else {
                    self.show_message("Press n to start a game");
                }
            }
            TapOutcome::Placed | TapOutcome::Removed => {}
            TapOutcome::Rejected(e) => self.show_message(rejection_message(e)),
            TapOutcome::Won {
                elapsed_secs,
                new_best,
            } => {
                let time = format_time(elapsed_secs);
                if new_best {
                    self.show_message(&format!("Solved in {} - new best!", time));
                } else {
                    self.show_message(&format!("Solved in {}", time));
                }
            }
        }
    }

    /// Positions are (row, column), so vertical moves change `x`
    fn move_cursor(&mut self, row_delta: isize, col_delta: isize) {
        let size = self.session.effective_board_size();
        if let Some(pos) = self.cursor.offset(row_delta, col_delta, size) {
            self.cursor = pos;
        }
    }

    /// Kind drawn on the board
    pub fn board_kind(&self) -> FigureKind {
        self.session.active_kind()
    }
}

fn rejection_message(error: PlacementError) -> &'static str {
    match error {
        PlacementError::OutsideBounds(_) => "That square is off the board",
        PlacementError::Occupied(_) => "That square is taken",
        PlacementError::Invalid(_) => "That square is under attack",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::FeedbackEvent;
    use crossterm::event::KeyModifiers;
    use nqueens_core::MemoryStore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app(size: usize) -> App {
        let feedback = Arc::new(TerminalFeedback::new());
        let mut session = GameSession::new(
            SessionConfig::default(),
            feedback.clone() as Arc<dyn Feedback>,
            Arc::new(MemoryStore::new()),
        );
        session.set_board_size(size);
        let mut app = App::with_session(session, feedback, ThemeName::Dark, true);
        app.start_new_game();
        app
    }

    fn tap_at(app: &mut App, x: usize, y: usize) {
        app.cursor = Position::new(x, y);
        app.handle_key(key(KeyCode::Char(' ')));
    }

    #[test]
    fn test_cursor_stays_on_board() {
        let mut app = test_app(4);
        app.handle_key(key(KeyCode::Up));
        app.handle_key(key(KeyCode::Left));
        assert_eq!(app.cursor, Position::new(0, 0));

        for _ in 0..10 {
            app.handle_key(key(KeyCode::Right));
            app.handle_key(key(KeyCode::Char('j')));
        }
        assert_eq!(app.cursor, Position::new(3, 3));
    }

    #[test]
    fn test_vertical_keys_move_along_rows() {
        let mut app = test_app(4);
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.cursor, Position::new(1, 0));
        app.handle_key(key(KeyCode::Char('l')));
        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.cursor, Position::new(1, 2));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.cursor, Position::new(0, 2));
    }

    #[test]
    fn test_tap_places_and_removes() {
        let mut app = test_app(4);
        tap_at(&mut app, 1, 0);
        assert_eq!(app.session.occupied_positions(), vec![Position::new(1, 0)]);

        tap_at(&mut app, 1, 0);
        assert!(app.session.occupied_positions().is_empty());
        assert_eq!(
            app.feedback.drain(),
            vec![FeedbackEvent::Place, FeedbackEvent::Remove]
        );
    }

    #[test]
    fn test_rejected_tap_shakes_and_rings() {
        let mut app = test_app(4);
        tap_at(&mut app, 0, 0);
        tap_at(&mut app, 1, 1);

        assert_eq!(app.message.as_deref(), Some("That square is under attack"));
        app.tick();
        assert!(app.take_bell());
        assert!(!app.take_bell());
        assert_ne!(app.shake_offset(), 0);

        for _ in 0..SHAKE_FRAMES {
            app.tick();
        }
        assert_eq!(app.shake_offset(), 0);
    }

    #[test]
    fn test_solving_opens_win_screen() {
        let mut app = test_app(4);
        for (x, y) in [(1, 0), (3, 1), (0, 2), (2, 3)] {
            tap_at(&mut app, x, y);
        }
        assert!(app.session.engine().map_or(false, |e| e.is_solved()));

        app.tick();
        assert_eq!(app.screen_state, ScreenState::Win);
        assert!(app.session.best_time().is_some());

        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen_state, ScreenState::Playing);
        assert_eq!(app.session.placed(), 0);
    }

    #[test]
    fn test_size_keys_apply_to_next_game() {
        let mut app = test_app(4);
        app.handle_key(key(KeyCode::Char('+')));
        app.handle_key(key(KeyCode::Char('+')));
        assert_eq!(app.session.board_size(), 6);
        assert_eq!(app.session.effective_board_size(), 4);

        app.handle_key(key(KeyCode::Char('-')));
        for _ in 0..5 {
            app.handle_key(key(KeyCode::Char('-')));
        }
        assert_eq!(app.session.board_size(), 4);
    }

    #[test]
    fn test_new_game_menu() {
        let mut app = test_app(4);
        app.handle_key(key(KeyCode::Char('n')));
        assert_eq!(app.menu, MenuState::NewGame);
        assert_eq!(app.menu_selection, 0);

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.menu, MenuState::None);
        assert_eq!(app.session.effective_board_size(), 5);
        assert_eq!(app.board_kind(), FigureKind::Knight);
    }

    #[test]
    fn test_figure_toggle_waits_for_new_game() {
        let mut app = test_app(4);
        app.handle_key(key(KeyCode::Char('f')));
        assert_eq!(app.session.figure_kind(), FigureKind::Knight);
        assert_eq!(app.board_kind(), FigureKind::Queen);
    }

    #[test]
    fn test_theme_menu() {
        let mut app = test_app(4);
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.menu, MenuState::Theme);
        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.theme_name, ThemeName::Light);
    }

    #[test]
    fn test_quit_and_best_times_screen() {
        let mut app = test_app(4);
        app.handle_key(key(KeyCode::Char('b')));
        assert_eq!(app.screen_state, ScreenState::BestTimes);
        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen_state, ScreenState::Playing);
        assert!(matches!(
            app.handle_key(key(KeyCode::Char('q'))),
            AppAction::Quit
        ));
    }
}
