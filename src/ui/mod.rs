//! User interface rendering module
//!
//! - `header` - Title banner, progress gauge, status line and overlays
//! - `question` - Prompt, choices and the submit button
//! - `result` - The recommended track and the restart control

mod header;
mod question;
mod result;

pub use header::{APP_TITLE, progress_label};
pub use question::{SUBMIT_LABEL, SUBMITTING_LABEL};
pub use result::{RESTART_LABEL, RESULT_HEADING, result_lines};

use crate::app::AppState;
use crate::components::keybindings::KeybindingContext;
use crate::session::ViewKind;
use header::HeaderRenderer;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

/// Renders one frame from the application state
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the complete UI for the current view
    pub fn render(&self, f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Main content area
                Constraint::Length(1), // Navigation bar
            ])
            .split(f.area());

        let content_area = main_chunks[0];
        let nav_bar_area = main_chunks[1];

        match state.view() {
            ViewKind::Asking | ViewKind::AwaitingSubmit | ViewKind::Submitting => {
                question::render_question_in_area(f, state, content_area, &self.header);
            }
            ViewKind::ShowingResult => {
                result::render_result_in_area(f, state, content_area, &self.header);
            }
        }

        header::render_nav_bar(f, state, keybinding_ctx, nav_bar_area);

        if state.help_visible {
            header::render_help_overlay(f, state, keybinding_ctx);
        }
    }
}
