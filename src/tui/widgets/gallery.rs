use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState},
};
use std::path::PathBuf;

use crate::tui::theme;
use crate::utils::format::{progress_bar, truncate_to_width};

pub fn render(
    frame: &mut Frame,
    area: Rect,
    images: &[PathBuf],
    selected: usize,
    delete_mode: bool,
    max_images: usize,
) {
    let title = if delete_mode {
        Span::styled(" Pictures · delete mode ", theme::coral())
    } else {
        Span::styled(
            format!(
                " Pictures {} {}/{} ",
                progress_bar(images.len() as u32, max_images as u32, 10),
                images.len(),
                max_images
            ),
            theme::sky(),
        )
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if delete_mode {
            theme::coral()
        } else {
            theme::border()
        })
        .style(theme::surface());

    if images.is_empty() {
        let empty = List::new(vec![
            ListItem::new(""),
            ListItem::new(Line::from(Span::styled(
                "  No pictures yet. Press [a] to add one.",
                theme::dim(),
            ))),
        ])
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(10) as usize;
    let items: Vec<ListItem> = images
        .iter()
        .map(|path| {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let icon = if delete_mode {
                Span::styled("  ✗ ", theme::coral())
            } else {
                Span::styled("  ◆ ", theme::sand())
            };
            ListItem::new(Line::from(vec![
                icon,
                Span::styled(truncate_to_width(&name, width), theme::bold()),
            ]))
        })
        .collect();

    let highlight = if delete_mode {
        theme::coral().add_modifier(Modifier::REVERSED)
    } else {
        theme::sky().add_modifier(Modifier::REVERSED)
    };
    let list = List::new(items).block(block).highlight_style(highlight);
    let mut state = ListState::default().with_selected(Some(selected.min(images.len() - 1)));
    frame.render_stateful_widget(list, area, &mut state);
}
