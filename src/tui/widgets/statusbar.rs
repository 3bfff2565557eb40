use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::tui::theme;

/// Key hints, or a short-lived message when one is showing.
pub fn render(frame: &mut Frame, area: Rect, hints: &[(&str, &str)], status: Option<&str>) {
    let line = match status {
        Some(msg) => Line::from(Span::styled(format!("✓ {}", msg), theme::sea())),
        None => {
            let mut spans = Vec::new();
            for (key, label) in hints {
                spans.push(Span::styled(*key, theme::sky()));
                spans.push(Span::styled(*label, theme::dim()));
            }
            Line::from(spans)
        }
    };

    let paragraph = Paragraph::new(line).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}
