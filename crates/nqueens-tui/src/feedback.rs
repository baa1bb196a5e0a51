//! Terminal feedback: queues play events for the app to pick up each tick

use log::trace;
use nqueens_core::Feedback;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackEvent {
    Place,
    Remove,
    Error,
    Win,
}

impl FeedbackEvent {
    /// Whether the event should ring the terminal bell
    pub fn rings_bell(&self) -> bool {
        matches!(self, FeedbackEvent::Error | FeedbackEvent::Win)
    }
}

#[derive(Default)]
pub struct TerminalFeedback {
    events: Mutex<Vec<FeedbackEvent>>,
}

impl TerminalFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: FeedbackEvent) {
        trace!("feedback: {:?}", event);
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }

    /// Take all queued events
    pub fn drain(&self) -> Vec<FeedbackEvent> {
        self.events
            .lock()
            .map(|mut events| std::mem::take(&mut *events))
            .unwrap_or_default()
    }
}

// Haptic notifications have no terminal counterpart; the sounds cover them.
impl Feedback for TerminalFeedback {
    fn play_place(&self) {
        self.push(FeedbackEvent::Place);
    }

    fn play_remove(&self) {
        self.push(FeedbackEvent::Remove);
    }

    fn play_error(&self) {
        self.push(FeedbackEvent::Error);
    }

    fn play_win(&self) {
        self.push(FeedbackEvent::Win);
    }

    fn notify_success(&self) {}

    fn notify_error(&self) {}
}
