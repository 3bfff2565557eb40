//! The animated prompt arrow.
//!
//! The glyph bobs along its own direction; `amount` is how far, in rows,
//! from its resting place. Columns move twice as far to look even.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Modifier,
    text::Line,
    widgets::Paragraph,
};

use crate::models::Direction;
use crate::tui::theme;

const UP: [&str; 6] = [
    "     ██     ",
    "   ██████   ",
    "████████████",
    "     ██     ",
    "     ██     ",
    "     ██     ",
];

const DOWN: [&str; 6] = [
    "     ██     ",
    "     ██     ",
    "     ██     ",
    "████████████",
    "   ██████   ",
    "     ██     ",
];

const LEFT: [&str; 5] = [
    "    ██          ",
    "  ████          ",
    "████████████████",
    "  ████          ",
    "    ██          ",
];

const RIGHT: [&str; 5] = [
    "          ██    ",
    "          ████  ",
    "████████████████",
    "          ████  ",
    "          ██    ",
];

fn art(direction: Direction) -> &'static [&'static str] {
    match direction {
        Direction::Up => &UP,
        Direction::Down => &DOWN,
        Direction::Left => &LEFT,
        Direction::Right => &RIGHT,
    }
}

fn art_size(direction: Direction) -> (u16, u16) {
    let lines = art(direction);
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    (width as u16, lines.len() as u16)
}

/// Where the glyph lands inside `area`, clamped so it never leaves it.
pub fn arrow_rect(area: Rect, direction: Direction, amount: f64) -> Rect {
    let (w, h) = art_size(direction);
    let w = w.min(area.width);
    let h = h.min(area.height);
    let (ox, oy) = direction.offset();

    let rest_x = area.x as i32 + (area.width - w) as i32 / 2;
    let rest_y = area.y as i32 + (area.height - h) as i32 / 2;
    let x = rest_x + (ox * amount * 2.0).round() as i32;
    let y = rest_y + (oy * amount).round() as i32;

    let max_x = (area.x + area.width - w) as i32;
    let max_y = (area.y + area.height - h) as i32;
    Rect {
        x: x.clamp(area.x as i32, max_x) as u16,
        y: y.clamp(area.y as i32, max_y) as u16,
        width: w,
        height: h,
    }
}

pub fn render(frame: &mut Frame, area: Rect, direction: Direction, amount: f64) {
    if area.height < 2 {
        return;
    }
    let glyph_area = Rect {
        height: area.height - 1,
        ..area
    };
    let target = arrow_rect(glyph_area, direction, amount);
    let lines: Vec<Line> = art(direction)
        .iter()
        .map(|l| Line::styled(*l, theme::sky()))
        .collect();
    frame.render_widget(Paragraph::new(lines), target);

    let label = Rect {
        y: area.y + area.height - 1,
        height: 1,
        ..area
    };
    let caption = Line::styled(
        format!("{}  {}", direction.glyph(), direction.display_name()),
        theme::dim().add_modifier(Modifier::ITALIC),
    );
    frame.render_widget(Paragraph::new(caption).alignment(Alignment::Center), label);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rest_position_is_centred() {
        let area = Rect::new(0, 0, 40, 20);
        let r = arrow_rect(area, Direction::Right, 0.0);
        assert_eq!((r.x, r.y), ((40 - r.width) / 2, (20 - r.height) / 2));
    }

    #[test]
    fn test_moves_along_its_direction() {
        let area = Rect::new(0, 0, 60, 30);
        let rest = arrow_rect(area, Direction::Up, 0.0);
        let moved = arrow_rect(area, Direction::Up, 3.0);
        assert_eq!(moved.x, rest.x);
        assert_eq!(moved.y, rest.y - 3);

        let rest = arrow_rect(area, Direction::Left, 0.0);
        let moved = arrow_rect(area, Direction::Left, 3.0);
        assert_eq!(moved.x, rest.x - 6);
    }

    #[test]
    fn test_clamped_inside_small_area() {
        let area = Rect::new(5, 5, 18, 6);
        let r = arrow_rect(area, Direction::Down, 10.0);
        assert!(r.y + r.height <= area.y + area.height);
        assert!(r.x >= area.x);
    }
}
