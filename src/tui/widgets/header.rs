use chrono::Local;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_big_text::{BigText, PixelSize};

use crate::tui::theme;

pub fn render(frame: &mut Frame, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);

    let title = BigText::builder()
        .pixel_size(PixelSize::HalfHeight)
        .style(theme::sky())
        .lines(vec![Line::from("respiro")])
        .alignment(Alignment::Center)
        .build();
    frame.render_widget(title, chunks[1]);

    let today = Local::now().format("%A, %b %d").to_string();
    let tagline = Line::from(vec![
        Span::styled("breathe, follow the arrow", theme::dim()),
        Span::styled("  ·  ", theme::dim()),
        Span::styled(today, theme::sand()),
    ]);
    frame.render_widget(Paragraph::new(tagline).alignment(Alignment::Center), chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::app::HEADER_HEIGHT;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_title_fills_the_logo_rows() {
        let mut terminal = Terminal::new(TestBackend::new(60, HEADER_HEIGHT)).unwrap();
        terminal.draw(|frame| render(frame, frame.area())).unwrap();

        let buffer = terminal.backend().buffer();
        let row = |y: u16| {
            (0..60u16)
                .map(|x| buffer[(x, y)].symbol().to_string())
                .collect::<String>()
        };
        assert!(row(0).trim().is_empty());
        assert!((1..5).any(|y| !row(y).trim().is_empty()));
        assert!(row(5).contains("follow the arrow"));
        assert!(row(6).trim().is_empty());
    }
}
