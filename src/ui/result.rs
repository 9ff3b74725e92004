//! Recommendation view rendering

use super::header::HeaderRenderer;
use crate::app::AppState;
use crate::recommendation::RecommendationResult;
use crate::theme::{Colors, Styles};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub const RESULT_HEADING: &str = "今日のおすすめの一曲:";
pub const RESTART_LABEL: &str = "もう一度質問する";

/// Lines describing the recommendation, player link included when a track id is known
pub fn result_lines(result: &RecommendationResult, embed_base_url: &str) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(RESULT_HEADING, Styles::text_secondary())),
        Line::from(""),
        Line::from(Span::styled(
            result.display_name().to_string(),
            Style::default()
                .fg(Colors::SECONDARY)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    if let Some(artist) = result.artist.as_deref() {
        lines.push(Line::from(vec![
            Span::styled("Artist: ", Styles::text_muted()),
            Span::styled(artist.to_string(), Styles::text()),
        ]));
    }
    if let Some(album) = result.album.as_deref() {
        lines.push(Line::from(vec![
            Span::styled("Album: ", Styles::text_muted()),
            Span::styled(album.to_string(), Styles::text()),
        ]));
    }

    if let Some(url) = result.embed_url(embed_base_url) {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Player: ", Styles::text_muted()),
            Span::styled(url, Style::default().fg(Colors::PRIMARY)),
        ]));
    }

    lines
}

/// Render the recommendation view in specified area
pub fn render_result_in_area(
    f: &mut Frame,
    state: &AppState,
    area: Rect,
    header: &HeaderRenderer,
) {
    let Some(result) = state.session.result() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(8),    // Recommendation
            Constraint::Length(3), // Restart button
        ])
        .split(area);

    header.render_title(f, chunks[0]);

    let body = Paragraph::new(result_lines(result, &state.embed_base_url))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Styles::border_active())
                .title("Recommendation"),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(body, chunks[1]);

    let button_area = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(chunks[2])[1];
    let button = Paragraph::new(Line::from(Span::styled(
        format!("[ {} ]", RESTART_LABEL),
        Styles::button_confirm(),
    )))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    f.render_widget(button, button_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendation::{DEFAULT_EMBED_BASE_URL, NO_DATA_PLACEHOLDER};

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_lines_include_player_url() {
        let result = RecommendationResult {
            name: Some("Summer Breeze".to_string()),
            track_id: Some("abc123".to_string()),
            ..Default::default()
        };
        let rendered = text(&result_lines(&result, DEFAULT_EMBED_BASE_URL));
        assert!(rendered.contains("Summer Breeze"));
        assert!(rendered.contains(
            "Player: https://open.spotify.com/embed/track/abc123?autoplay=1&theme=0"
        ));
    }

    #[test]
    fn test_empty_result_shows_placeholder_without_player() {
        let rendered = text(&result_lines(
            &RecommendationResult::default(),
            DEFAULT_EMBED_BASE_URL,
        ));
        assert!(rendered.contains(NO_DATA_PLACEHOLDER));
        assert!(!rendered.contains("Player:"));
    }
}
