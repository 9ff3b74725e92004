//! Header and common widget rendering
//!
//! Title banner, the progress gauge, the status line and the shared
//! overlays drawn on top of every view.

use crate::app::AppState;
use crate::components::help_overlay::HelpOverlay;
use crate::components::keybindings::KeybindingContext;
use crate::components::nav_bar::NavBar;
use crate::session::SessionState;
use crate::theme::{Colors, Styles};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
};

/// Application banner shown above every view
pub const APP_TITLE: &str = "Summer Track Finder";

/// Header renderer containing the title banner
pub struct HeaderRenderer {
    title_line: Line<'static>,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    pub fn new() -> Self {
        Self {
            title_line: Line::from(vec![
                Span::styled("~ ", Style::default().fg(Colors::SECONDARY)),
                Span::styled(APP_TITLE, Styles::title()),
                Span::styled(" ~", Style::default().fg(Colors::SECONDARY)),
            ]),
        }
    }

    /// Render the bordered title banner
    pub fn render_title(&self, f: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let title = Paragraph::new(self.title_line.clone())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Styles::border_active()),
            )
            .alignment(Alignment::Center);
        f.render_widget(title, area);
    }
}

/// Gauge label for the current position in the questionnaire
pub fn progress_label(state: &AppState) -> String {
    let total = state.session.question_count();
    match state.session.state() {
        SessionState::Asking { index } => format!("Question {}/{}", index + 1, total),
        SessionState::AwaitingSubmit { .. } => format!("All {} answered", total),
        SessionState::ShowingResult(_) => "Done".to_string(),
    }
}

/// Render progress bar
pub fn render_progress_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let total = state.session.question_count().max(1);
    let answered = state.session.responses().len().min(total);
    let ratio = answered as f64 / total as f64;

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Styles::progress())
        .label(progress_label(state))
        .ratio(ratio.clamp(0.0, 1.0));
    f.render_widget(gauge, area);
}

/// Render the error banner, or the status message when there is no error
pub fn render_status(f: &mut Frame, area: Rect, state: &AppState) {
    if area.height == 0 {
        return;
    }

    let line = match state.session.error() {
        Some(message) => Line::from(Span::styled(format!("Error: {}", message), Styles::error())),
        None => Line::from(Span::styled(state.status_message.clone(), Styles::info())),
    };
    let status = Paragraph::new(line)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(status, area);
}

/// Render the navigation bar
pub fn render_nav_bar(
    f: &mut Frame,
    state: &AppState,
    keybinding_ctx: &KeybindingContext,
    area: Rect,
) {
    let nav_bar = NavBar::new(keybinding_ctx.get_nav_items(state.view()));
    nav_bar.render(f, area);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame, state: &AppState, keybinding_ctx: &KeybindingContext) {
    let help_overlay = HelpOverlay::new(state.view(), keybinding_ctx);
    help_overlay.render(f, f.area());
}
