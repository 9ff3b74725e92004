//! Bottom navigation bar showing the keys available in the current view

use super::keybindings::NavBarItem;
use crate::theme::Styles;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

pub struct NavBar {
    items: Vec<NavBarItem>,
}

impl NavBar {
    pub fn new(items: Vec<NavBarItem>) -> Self {
        Self { items }
    }

    /// The bar as a single line: `[Key] Label  [Key] Label ...`
    pub fn line(&self) -> Line<'static> {
        let mut spans = Vec::with_capacity(self.items.len() * 3);
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(format!("[{}]", item.key_display), Styles::nav_key()));
            spans.push(Span::styled(format!(" {}", item.action_label), Styles::nav_hint()));
        }
        Line::from(spans)
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        f.render_widget(Paragraph::new(self.line()).alignment(Alignment::Center), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_format() {
        let bar = NavBar::new(vec![
            NavBarItem {
                key_display: "Enter".to_string(),
                action_label: "Answer".to_string(),
            },
            NavBarItem {
                key_display: "Q".to_string(),
                action_label: "Quit".to_string(),
            },
        ]);
        assert_eq!(bar.line().to_string(), "[Enter] Answer  [Q] Quit");
    }
}
