use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph},
};
use std::path::Path;

use crate::tui::theme;
use crate::utils::format::truncate_to_width;

fn file_size_label(path: &Path) -> String {
    match std::fs::metadata(path) {
        Ok(meta) if meta.len() >= 1024 * 1024 => {
            format!("{:.1} MB", meta.len() as f64 / (1024.0 * 1024.0))
        }
        Ok(meta) => format!("{} KB", meta.len().div_ceil(1024)),
        Err(_) => "unavailable".to_string(),
    }
}

/// A picture card with a bar draining over the remaining display time.
pub fn render(
    frame: &mut Frame,
    area: Rect,
    image: &Path,
    round: Option<(usize, usize)>,
    remaining: f64,
) {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(Span::styled(" A moment for you ", theme::sand()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::sand())
        .style(theme::surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(inner);

    let name = image
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let width = inner.width.saturating_sub(4) as usize;

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled("✿", theme::sand().add_modifier(Modifier::BOLD))),
        Line::from(""),
        Line::from(Span::styled(truncate_to_width(&name, width), theme::bold())),
        Line::from(Span::styled(file_size_label(image), theme::dim())),
    ];
    if let Some((shown, total)) = round {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("picture {} of {} this round", shown, total),
            theme::dim(),
        )));
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(theme::sea())
        .label("")
        .ratio(remaining.clamp(0.0, 1.0));
    frame.render_widget(gauge, chunks[1]);
}
