use ratatui::style::{Color, Modifier, Style};

pub const BG: Color = Color::Rgb(14, 18, 24);
pub const SURFACE: Color = Color::Rgb(22, 29, 38);
pub const BORDER: Color = Color::Rgb(44, 58, 74);
pub const TEXT: Color = Color::Rgb(214, 226, 236);
pub const TEXT_DIM: Color = Color::Rgb(112, 130, 148);
pub const SKY: Color = Color::Rgb(146, 184, 241);
pub const SEA: Color = Color::Rgb(88, 170, 160);
pub const SAND: Color = Color::Rgb(214, 180, 120);
pub const CORAL: Color = Color::Rgb(206, 110, 96);
pub const IDLE_DAY: Color = Color::Rgb(60, 68, 78);

pub fn base() -> Style {
    Style::default().fg(TEXT).bg(BG)
}

pub fn dim() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub fn sky() -> Style {
    Style::default().fg(SKY)
}

pub fn sea() -> Style {
    Style::default().fg(SEA)
}

pub fn sand() -> Style {
    Style::default().fg(SAND)
}

pub fn coral() -> Style {
    Style::default().fg(CORAL)
}

pub fn bold() -> Style {
    Style::default().fg(TEXT).add_modifier(Modifier::BOLD)
}

pub fn surface() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub fn border() -> Style {
    Style::default().fg(BORDER)
}

/// Day cell with recorded swipes.
pub fn active_day() -> Style {
    Style::default().fg(BG).bg(SKY)
}

pub fn idle_day() -> Style {
    Style::default().fg(TEXT).bg(IDLE_DAY)
}

pub fn selected_day() -> Style {
    Style::default()
        .fg(BG)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD)
}
