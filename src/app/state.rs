//! Application state definitions
//!
//! Everything the renderer needs for one frame: the questionnaire session
//! plus the cursor and overlay flags that only matter to the terminal UI.

use crate::questions::CHOICE_COUNT;
use crate::recommendation::DEFAULT_EMBED_BASE_URL;
use crate::session::{Session, ViewKind};

/// Row index of the submit button, directly below the five choices
pub const SUBMIT_ROW: usize = CHOICE_COUNT;

/// Status line shown on a fresh session
pub const WELCOME_MESSAGE: &str = "Answer ten questions to get today's summer track";

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Questionnaire state machine
    pub session: Session,
    /// Focused row: a choice index, or [`SUBMIT_ROW`] when ready to submit
    pub selection: usize,
    /// Whether help overlay is visible
    pub help_visible: bool,
    /// Status message for user feedback
    pub status_message: String,
    /// Host used to build the player URL on the result view
    pub embed_base_url: String,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_EMBED_BASE_URL)
    }
}

impl AppState {
    pub fn new(embed_base_url: impl Into<String>) -> Self {
        Self {
            session: Session::new(),
            selection: 0,
            help_visible: false,
            status_message: WELCOME_MESSAGE.to_string(),
            embed_base_url: embed_base_url.into(),
        }
    }

    pub fn view(&self) -> ViewKind {
        self.session.state().kind()
    }

    /// Number of focusable rows in the current view
    pub fn row_count(&self) -> usize {
        match self.view() {
            ViewKind::Asking => CHOICE_COUNT,
            ViewKind::AwaitingSubmit => CHOICE_COUNT + 1,
            ViewKind::Submitting | ViewKind::ShowingResult => 0,
        }
    }

    pub fn submit_focused(&self) -> bool {
        self.view() == ViewKind::AwaitingSubmit && self.selection == SUBMIT_ROW
    }
}
