//! Question view rendering
//!
//! One prompt, the five choices, and the submit button once every question
//! has an answer.

use super::header::{self, HeaderRenderer};
use crate::app::AppState;
use crate::app::state::SUBMIT_ROW;
use crate::questions::Choice;
use crate::session::ViewKind;
use crate::theme::Styles;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

/// Label of the submit button
pub const SUBMIT_LABEL: &str = "結果を見ますか";
/// Shown in place of the submit button while a request is in flight
pub const SUBMITTING_LABEL: &str = "Submitting...";

/// Render the question view in specified area
pub fn render_question_in_area(
    f: &mut Frame,
    state: &AppState,
    area: Rect,
    header: &HeaderRenderer,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Length(3), // Progress
            Constraint::Length(4), // Prompt
            Constraint::Length(7), // Choices
            Constraint::Length(3), // Submit button
            Constraint::Length(2), // Error / status
            Constraint::Min(0),
        ])
        .split(area);

    header.render_title(f, chunks[0]);
    header::render_progress_bar(f, chunks[1], state);
    render_prompt(f, chunks[2], state);
    render_choices(f, chunks[3], state);
    render_submit_button(f, chunks[4], state);
    header::render_status(f, chunks[5], state);
}

fn render_prompt(f: &mut Frame, area: Rect, state: &AppState) {
    let question = state.session.current_question();
    let prompt = Paragraph::new(Line::from(Span::styled(question.prompt, Styles::prompt())))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active())
                .title(question.id),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(prompt, area);
}

fn render_choices(f: &mut Frame, area: Rect, state: &AppState) {
    let locked = state.view() == ViewKind::Submitting;
    let current_answer = state
        .session
        .responses()
        .get(state.session.current_question().id);

    let items: Vec<ListItem> = Choice::all()
        .into_iter()
        .enumerate()
        .map(|(index, choice)| {
            let label = choice.label();
            let focused = !locked && index == state.selection;
            let prefix = if focused { "▸ " } else { "  " };
            let marker = if current_answer == Some(label.as_str()) {
                " ✓"
            } else {
                ""
            };
            let style = if locked {
                Styles::text_muted()
            } else if focused {
                Styles::selected()
            } else {
                Styles::unselected()
            };
            ListItem::new(format!("{}{}. {}{}", prefix, index + 1, label, marker)).style(style)
        })
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title("Choices"));
    f.render_widget(list, area);
}

fn render_submit_button(f: &mut Frame, area: Rect, state: &AppState) {
    let (text, style) = match state.view() {
        ViewKind::Asking | ViewKind::ShowingResult => return,
        ViewKind::Submitting => (SUBMITTING_LABEL.to_string(), Styles::button_disabled()),
        ViewKind::AwaitingSubmit => {
            let style = if state.selection == SUBMIT_ROW {
                Styles::button_confirm()
            } else {
                Styles::button_inactive()
            };
            (format!("[ {} ]", SUBMIT_LABEL), style)
        }
    };

    let button_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(area)[1];

    let button = Paragraph::new(Line::from(Span::styled(text, style)))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
    f.render_widget(button, button_area);
}
