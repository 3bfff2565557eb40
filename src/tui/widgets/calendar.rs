//! Month view of recorded activity.
//!
//! Weeks start on Sunday. A day counts as active when it has swipes;
//! the selected day is drawn on top of either colour.

use chrono::{Datelike, NaiveDate, Weekday};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::session::date_key;
use crate::models::StatisticsData;
use crate::tui::theme;
use crate::utils::format::{format_short_duration, format_total_time_detailed};

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month `delta` months away.
pub fn shift_month(month: NaiveDate, delta: i32) -> Option<NaiveDate> {
    let index = month.year() * 12 + month.month0() as i32 + delta;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
}

pub fn days_in_month(month: NaiveDate) -> u32 {
    let first = month_start(month);
    match shift_month(first, 1) {
        Some(next) => (next - first).num_days() as u32,
        None => 31,
    }
}

/// Rows of seven cells, `None` before the 1st and after the last day.
pub fn month_grid(month: NaiveDate) -> Vec<[Option<NaiveDate>; 7]> {
    let first = month_start(month);
    let lead = first.weekday().num_days_from_sunday() as usize;
    let mut weeks = Vec::new();
    let mut week = [None; 7];
    let mut slot = lead;
    for day in 0..days_in_month(first) {
        week[slot] = first.checked_add_days(chrono::Days::new(day as u64));
        slot += 1;
        if slot == 7 {
            weeks.push(week);
            week = [None; 7];
            slot = 0;
        }
    }
    if slot > 0 {
        weeks.push(week);
    }
    weeks
}

fn grid_lines(stats: &StatisticsData, month: NaiveDate, selected: NaiveDate) -> Vec<Line<'static>> {
    let header: Vec<Span> = [
        Weekday::Sun,
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
    ]
    .iter()
    .map(|d| Span::styled(format!(" {:<3}", &d.to_string()[..2]), theme::dim()))
    .collect();

    let mut lines = vec![Line::from(header), Line::from("")];
    for week in month_grid(month) {
        let mut spans = Vec::new();
        for cell in week {
            match cell {
                None => spans.push(Span::raw("    ")),
                Some(day) => {
                    let active = stats
                        .day(&date_key(day))
                        .map(|d| d.has_activity())
                        .unwrap_or(false);
                    let style = if day == selected {
                        theme::selected_day()
                    } else if active {
                        theme::active_day()
                    } else {
                        theme::idle_day()
                    };
                    spans.push(Span::styled(format!("{:>3}", day.day()), style));
                    spans.push(Span::raw(" "));
                }
            }
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }
    lines
}

fn detail_lines(stats: &StatisticsData, selected: NaiveDate) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            selected.format("%d %B %Y").to_string(),
            theme::sky().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let field = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<16}", label), theme::dim()),
            Span::styled(value, theme::bold()),
        ])
    };

    match stats.day(&date_key(selected)).filter(|d| d.has_activity()) {
        Some(day) => {
            lines.push(field("Swipes", day.swipe_count.to_string()));
            lines.push(field("Time", format_short_duration(day.session_time)));
            lines.push(field("Sessions", day.session_count().to_string()));
            if let Some(avg) = day.average_session() {
                lines.push(field("Average", format_short_duration(avg)));
            }
        }
        None => lines.push(Line::from(Span::styled(
            "No activity recorded for this day.",
            theme::dim(),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "All time",
        theme::sand().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(field("Swipes", stats.total_swipes.to_string()));
    lines.push(field("Time", format_total_time_detailed(stats.total_time)));
    lines.push(field("Active days", stats.total_days.to_string()));
    lines
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    stats: &StatisticsData,
    month: NaiveDate,
    selected: NaiveDate,
) {
    let active_this_month = stats
        .active_days_in_month(&month.format("%Y-%m").to_string())
        .len();
    let title = Span::styled(
        format!(
            " ◂ {} ▸  ·  {} active days ",
            month.format("%B %Y"),
            active_this_month
        ),
        theme::sky(),
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::surface());
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::horizontal([Constraint::Length(32), Constraint::Min(0)]).split(inner);
    let grid = Paragraph::new(grid_lines(stats, month, selected)).alignment(Alignment::Left);
    frame.render_widget(grid, pad(cols[0]));
    frame.render_widget(Paragraph::new(detail_lines(stats, selected)), pad(cols[1]));
}

fn pad(area: Rect) -> Rect {
    Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_shift_month_crosses_years() {
        assert_eq!(shift_month(date(2026, 1, 1), -1), Some(date(2025, 12, 1)));
        assert_eq!(shift_month(date(2026, 12, 1), 1), Some(date(2027, 1, 1)));
        assert_eq!(shift_month(date(2026, 10, 1), 0), Some(date(2026, 10, 1)));
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(date(2024, 2, 10)), 29);
        assert_eq!(days_in_month(date(2026, 2, 1)), 28);
        assert_eq!(days_in_month(date(2026, 10, 17)), 31);
    }

    #[test]
    fn test_month_grid_starts_on_sunday() {
        // 1 October 2026 is a Thursday
        let weeks = month_grid(date(2026, 10, 1));
        assert_eq!(weeks[0][..4], [None, None, None, None]);
        assert_eq!(weeks[0][4], Some(date(2026, 10, 1)));
        let days = weeks.iter().flatten().filter(|c| c.is_some()).count();
        assert_eq!(days, 31);
        assert_eq!(weeks.len(), 5);
    }
}
