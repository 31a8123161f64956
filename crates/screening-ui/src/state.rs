//! UI-level state that drives rendering.
//! A read-only projection of the session controller, updated each frame
//! by draining the event bus.

use screening_types::analysis::ScoreBucket;
use screening_types::event::SessionEvent;

/// State visible to UI panels
pub struct UiState {
    /// Whether the chat widget card is shown (vs. the launcher button)
    pub widget_open: bool,
    /// Input field content
    pub input_text: String,
    /// Status line text in the widget header
    pub status_text: String,
    /// Set when a turn arrives so the message view follows the newest turn
    pub scroll_to_newest: bool,
    /// The channel dropped; new bot turns will not arrive
    pub connection_lost: bool,
    /// Dashboard search term
    pub search_term: String,
    /// Dashboard score-bucket selection
    pub score_filter: ScoreBucket,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            widget_open: false,
            input_text: String::new(),
            status_text: "Ready".to_string(),
            scroll_to_newest: false,
            connection_lost: false,
            search_term: String::new(),
            score_filter: ScoreBucket::All,
        }
    }

    /// Process events from the session controller and update UI state
    pub fn process_events(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::TurnAppended { .. } => {
                    self.scroll_to_newest = true;
                }
                SessionEvent::HandshakeSent => {
                    self.status_text = "Interview starting...".to_string();
                }
                SessionEvent::Finished => {
                    self.status_text = "Conversation finished".to_string();
                }
                SessionEvent::ConnectionClosed => {
                    self.connection_lost = true;
                    self.status_text = "Connection closed".to_string();
                }
                SessionEvent::Error { message } => {
                    self.status_text = format!("Error: {}", message);
                }
            }
        }
    }

    /// Reset the widget-facing state after an explicit close.
    pub fn reset_widget(&mut self) {
        self.widget_open = false;
        self.input_text.clear();
        self.status_text = "Ready".to_string();
        self.scroll_to_newest = false;
        self.connection_lost = false;
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}
