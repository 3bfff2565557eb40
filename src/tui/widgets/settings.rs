use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
};

use crate::models::GameSettings;
use crate::tui::app::centered;
use crate::tui::theme;
use crate::utils::format::format_seconds;

fn row<'a>(label: String, value: String, focused: bool, note: &'a str) -> ListItem<'a> {
    let marker = if focused { "▸ " } else { "  " };
    let label_style = if focused {
        theme::sky().add_modifier(Modifier::BOLD)
    } else {
        theme::bold()
    };
    let value_style = if focused { theme::sand() } else { theme::dim() };
    ListItem::new(Line::from(vec![
        Span::styled(marker, theme::sky()),
        Span::styled(format!("{:<22}", label), label_style),
        Span::styled(format!("{:<10}", value), value_style),
        Span::styled(note, theme::dim()),
    ]))
}

pub fn render(frame: &mut Frame, area: Rect, settings: &GameSettings, focus: usize) {
    let rows = if settings.advanced_sequence_enabled {
        settings.advanced_sequence.len() as u16 + 4
    } else {
        3
    };
    let panel = centered(area, 64, rows + 6);

    let block = Block::default()
        .title(Span::styled(" Settings ", theme::sky()))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let mut items = vec![
        row(
            "Arrows per picture".to_string(),
            settings.standard_arrow_count.to_string(),
            focus == 0,
            "1 – 20",
        ),
        row(
            "Picture time".to_string(),
            format_seconds(settings.image_display_time),
            focus == 1,
            "0.5 – 10s",
        ),
        row(
            "Advanced sequence".to_string(),
            if settings.advanced_sequence_enabled { "on" } else { "off" }.to_string(),
            focus == 2,
            "",
        ),
    ];

    if settings.advanced_sequence_enabled {
        let n = settings.advanced_sequence.len();
        for (i, arrows) in settings.advanced_sequence.iter().enumerate() {
            let current = i == settings.current_sequence_index % n;
            items.push(row(
                format!("  Step {}", i + 1),
                format!("{} arrows", arrows),
                focus == 3 + i,
                if current { "◂ next" } else { "" },
            ));
        }
        items.push(row("  + Add step".to_string(), String::new(), focus == 3 + n, ""));
    }

    let list_area = Rect {
        height: inner.height.saturating_sub(2),
        ..inner
    };
    frame.render_widget(List::new(items), list_area);

    let footer = Rect {
        y: inner.y + inner.height.saturating_sub(1),
        height: 1.min(inner.height),
        ..inner
    };
    let mode = Line::from(vec![
        Span::styled("  Now: ", theme::dim()),
        Span::styled(settings.mode_label(), theme::sea()),
    ]);
    frame.render_widget(Paragraph::new(mode), footer);
}
