use anyhow::Result;
use chrono::{Days, Local, NaiveDate};
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, KeyCode,
    KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Gauge, Paragraph},
};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::config::AppConfig;
use crate::gallery::ImageStore;
use crate::game::{
    GestureClassifier, GestureEvent, Haptics, Point, Progression, ScreenSize, SessionEnd,
    SessionRecorder, SwipeOutcome, TerminalBell,
};
use crate::models::{Direction, GameSettings};
use crate::store::SettingsRepo;
use crate::tui::events::{Event, EventHandler};
use crate::tui::theme;
use crate::tui::widgets::{arrow, calendar, gallery, header, reward, settings, statusbar};

/// Rows taken by the title on the home screen; holding there opens the calendar.
pub const HEADER_HEIGHT: u16 = 7;
const STATUS_SECS: f64 = 2.5;
const PREVIEW_SECS: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Home,
    Game,
    Settings,
    Gallery,
    Calendar,
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GamePhase {
    Prompt,
    Reward { image: PathBuf, until: f64 },
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    Normal,
    ImagePath,
    ConfirmReset,
}

pub struct App {
    pub view: View,
    pub config: AppConfig,
    pub should_quit: bool,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub input_error: Option<String>,

    pub settings: GameSettings,
    settings_path: PathBuf,
    pub recorder: SessionRecorder,
    pub gallery: ImageStore,
    pub progression: Progression,
    pub phase: GamePhase,
    classifier: GestureClassifier,
    haptics: Box<dyn Haptics>,
    rng: StdRng,

    /// Last clock reading, seconds since start.
    pub clock: f64,
    pub status: Option<(String, f64)>,
    logo_hold: Option<f64>,
    /// Session paused by focus loss, resumed on focus gain.
    paused: bool,

    pub settings_focus: usize,
    pub gallery_selected: usize,
    pub delete_mode: bool,
    pub preview: Option<(PathBuf, f64)>,
    pub calendar_month: NaiveDate,
    pub calendar_selected: NaiveDate,
}

impl App {
    pub fn new(config: AppConfig, haptics: Box<dyn Haptics>, mut rng: StdRng) -> Result<Self> {
        config.ensure_data_dir()?;
        let settings_path = config.settings_path()?;
        let settings = SettingsRepo::load_or_default(&settings_path);
        let recorder = SessionRecorder::load(&config.stats_path()?);
        let gallery = ImageStore::open(&config.images_dir()?, config.gallery.max_images)?;
        let progression = Progression::new(&mut rng);
        let screen = ScreenSize {
            width: 80.0,
            height: 24.0 * config.display.cell_aspect,
        };
        let classifier = GestureClassifier::new(config.gesture.clone(), screen);
        let today = Local::now().date_naive();

        Ok(App {
            view: View::Home,
            config,
            should_quit: false,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            input_error: None,
            settings,
            settings_path,
            recorder,
            gallery,
            progression,
            phase: GamePhase::Prompt,
            classifier,
            haptics,
            rng,
            clock: 0.0,
            status: None,
            logo_hold: None,
            paused: false,
            settings_focus: 0,
            gallery_selected: 0,
            delete_mode: false,
            preview: None,
            calendar_month: calendar::month_start(today),
            calendar_selected: today,
        })
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.classifier.set_screen(ScreenSize {
            width: width as f64,
            height: height as f64 * self.config.display.cell_aspect,
        });
    }

    fn to_point(&self, column: u16, row: u16) -> Point {
        Point::new(column as f64, row as f64 * self.config.display.cell_aspect)
    }

    fn show_status(&mut self, msg: impl Into<String>, now: f64) {
        self.status = Some((msg.into(), now + STATUS_SECS));
    }

    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|(msg, _)| msg.as_str())
    }

    // ─── Session flow ────────────────────────────────────────────────────────

    pub fn start_game(&mut self, now: f64) {
        info!("Starting a session");
        self.recorder.start(now, Local::now().date_naive());
        self.paused = false;
        self.progression.restart(&mut self.rng);
        self.classifier.reset();
        self.phase = GamePhase::Prompt;
        self.view = View::Game;
    }

    pub fn return_home(&mut self, now: f64) {
        info!("Returning home");
        match self.recorder.end(now) {
            SessionEnd::Saved { duration, swipes } => {
                debug!("Recorded {} swipes over {:.1}s", swipes, duration)
            }
            SessionEnd::Discarded { duration } => debug!("Session too short ({:.1}s)", duration),
            SessionEnd::NotActive => {}
        }
        self.classifier.reset();
        self.phase = GamePhase::Prompt;
        self.paused = false;
        self.view = View::Home;
    }

    pub fn quit(&mut self, now: f64) {
        self.recorder.end(now);
        self.should_quit = true;
    }

    fn apply_swipe(&mut self, direction: Direction, now: f64) {
        if self.phase != GamePhase::Prompt {
            return;
        }
        match self
            .progression
            .on_swipe(direction, &mut self.settings, &mut self.rng)
        {
            SwipeOutcome::Wrong => debug!("Wrong gesture, try again"),
            SwipeOutcome::Next(_) => {
                self.recorder.record_swipe();
                self.haptics.pulse();
            }
            SwipeOutcome::Reward { sequence_advanced } => {
                self.recorder.record_swipe();
                self.haptics.pulse();
                if sequence_advanced {
                    SettingsRepo::save_logged(&self.settings_path, &self.settings);
                }
                self.show_reward(now);
            }
        }
    }

    fn show_reward(&mut self, now: f64) {
        match self.gallery.next_random(&mut self.rng) {
            Some(image) if image.exists() => {
                let until = now + self.settings.image_display_time as f64;
                self.phase = GamePhase::Reward { image, until };
            }
            Some(image) => {
                warn!("Image {:?} could not be loaded", image);
                self.progression.next_prompt(&mut self.rng);
            }
            None => {
                info!("No images in the gallery, carrying on with arrows");
                self.progression.next_prompt(&mut self.rng);
            }
        }
    }

    fn handle_gesture(&mut self, event: GestureEvent, now: f64) {
        match event {
            GestureEvent::Swipe(direction) => self.apply_swipe(direction, now),
            GestureEvent::HapticPulse => self.haptics.pulse(),
            GestureEvent::LongPressStarted => debug!("Hold to return home"),
            GestureEvent::LongPressCancelled => debug!("Hold released"),
            GestureEvent::ReturnHome => self.return_home(now),
        }
    }

    // ─── Clock ───────────────────────────────────────────────────────────────

    pub fn tick(&mut self, now: f64) {
        self.clock = now;

        if matches!(&self.status, Some((_, until)) if now >= *until) {
            self.status = None;
        }

        match self.view {
            View::Game => {
                if let GamePhase::Reward { until, .. } = self.phase {
                    if now >= until {
                        self.phase = GamePhase::Prompt;
                        self.progression.next_prompt(&mut self.rng);
                    }
                }
                for event in self.classifier.update(now) {
                    self.handle_gesture(event, now);
                }
            }
            View::Home => {
                if let Some(started) = self.logo_hold {
                    if now - started >= self.config.display.logo_hold_secs {
                        self.logo_hold = None;
                        self.open_calendar();
                    }
                }
            }
            View::Gallery => {
                if matches!(&self.preview, Some((_, until)) if now >= *until) {
                    self.preview = None;
                }
            }
            _ => {}
        }
    }

    pub fn focus_lost(&mut self, now: f64) {
        if self.recorder.is_active() {
            self.recorder.end(now);
            self.paused = true;
        }
        self.classifier.reset();
    }

    pub fn focus_gained(&mut self, now: f64) {
        if self.paused && self.view == View::Game {
            self.recorder.start(now, Local::now().date_naive());
        }
        self.paused = false;
    }

    // ─── Mouse ───────────────────────────────────────────────────────────────

    pub fn handle_mouse(&mut self, mouse: MouseEvent, now: f64) {
        self.clock = now;
        let pos = self.to_point(mouse.column, mouse.row);
        match self.view {
            View::Game => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => self.classifier.pointer_down(pos, now),
                MouseEventKind::Drag(MouseButton::Left) => self.classifier.pointer_move(pos),
                MouseEventKind::Up(MouseButton::Left) => {
                    if let Some(event) = self.classifier.pointer_up(pos, now) {
                        self.handle_gesture(event, now);
                    }
                }
                _ => {}
            },
            View::Home => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) if mouse.row < HEADER_HEIGHT => {
                    self.logo_hold = Some(now);
                }
                MouseEventKind::Up(_) => self.logo_hold = None,
                _ => {}
            },
            _ => {}
        }
    }

    // ─── Keys ────────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent, now: f64) {
        // some terminals also report release and repeat
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.clock = now;
        match self.input_mode {
            InputMode::ImagePath => self.handle_path_input(key, now),
            InputMode::ConfirmReset => self.handle_confirm_reset(key, now),
            InputMode::Normal => match self.view {
                View::Home => self.handle_home_key(key, now),
                View::Game => self.handle_game_key(key, now),
                View::Settings => self.handle_settings_key(key, now),
                View::Gallery => self.handle_gallery_key(key, now),
                View::Calendar => self.handle_calendar_key(key),
                View::Help => self.handle_help_key(key),
            },
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent, now: f64) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.quit(now),
            KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('p') => self.start_game(now),
            KeyCode::Char('g') => {
                self.view = View::Gallery;
                self.delete_mode = false;
            }
            KeyCode::Char('s') => {
                self.view = View::Settings;
                self.settings_focus = 0;
            }
            KeyCode::Char('c') => self.open_calendar(),
            KeyCode::Char('?') => self.view = View::Help,
            _ => {}
        }
    }

    fn handle_game_key(&mut self, key: KeyEvent, now: f64) {
        let direction = match key.code {
            KeyCode::Up | KeyCode::Char('k') => Direction::Up,
            KeyCode::Down | KeyCode::Char('j') => Direction::Down,
            KeyCode::Left | KeyCode::Char('h') => Direction::Left,
            KeyCode::Right | KeyCode::Char('l') => Direction::Right,
            KeyCode::Esc | KeyCode::Char('q') => {
                self.return_home(now);
                return;
            }
            _ => return,
        };
        // a pointer gesture in progress owns the input
        if self.classifier.is_touch_active() {
            return;
        }
        self.apply_swipe(direction, now);
    }

    fn handle_help_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
            self.view = View::Home;
        }
    }

    // ─── Settings panel ──────────────────────────────────────────────────────

    /// Arrows, display time, sequence toggle, then the steps and "add step".
    pub fn settings_rows(&self) -> usize {
        if self.settings.advanced_sequence_enabled {
            3 + self.settings.advanced_sequence.len() + 1
        } else {
            3
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent, now: f64) {
        let rows = self.settings_rows();
        let step_idx = self.settings_focus.checked_sub(3);
        let steps = self.settings.advanced_sequence.len();
        match key.code {
            KeyCode::Esc | KeyCode::Char('s') => {
                SettingsRepo::save_logged(&self.settings_path, &self.settings);
                self.show_status("Settings saved", now);
                self.view = View::Home;
            }
            KeyCode::Up => self.settings_focus = self.settings_focus.saturating_sub(1),
            KeyCode::Down => {
                if self.settings_focus + 1 < rows {
                    self.settings_focus += 1;
                }
            }
            KeyCode::Left | KeyCode::Char('-') => self.adjust_setting(-1),
            KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_setting(1),
            KeyCode::Enter | KeyCode::Char(' ') => match self.settings_focus {
                2 => self.toggle_advanced(),
                _ if step_idx == Some(steps) => {
                    self.settings.add_step(crate::models::settings::DEFAULT_STEP_ARROWS)
                }
                _ => {}
            },
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(i) = step_idx.filter(|i| *i < steps) {
                    if self.settings.remove_step(i) {
                        self.settings_focus = self.settings_focus.min(self.settings_rows() - 1);
                    }
                }
            }
            _ => {}
        }
    }

    fn toggle_advanced(&mut self) {
        let enabled = !self.settings.advanced_sequence_enabled;
        self.settings.set_advanced(enabled);
        self.settings_focus = self.settings_focus.min(self.settings_rows() - 1);
    }

    fn adjust_setting(&mut self, delta: i32) {
        match self.settings_focus {
            0 => self.settings.change_standard_arrow_count(delta),
            1 => self
                .settings
                .change_display_time(delta as f32 * crate::models::settings::DISPLAY_STEP_SECS),
            2 => self.toggle_advanced(),
            n => {
                let i = n - 3;
                if let Some(current) = self.settings.advanced_sequence.get(i).copied() {
                    let next = (current as i64 + delta as i64).max(0) as u32;
                    self.settings.update_step(i, next);
                }
            }
        }
    }

    // ─── Gallery panel ───────────────────────────────────────────────────────

    fn handle_gallery_key(&mut self, key: KeyEvent, now: f64) {
        if self.preview.is_some() {
            self.preview = None;
            return;
        }
        let count = self.gallery.len();
        match key.code {
            KeyCode::Esc => {
                self.delete_mode = false;
                self.view = View::Home;
            }
            KeyCode::Up => self.gallery_selected = self.gallery_selected.saturating_sub(1),
            KeyCode::Down => {
                if self.gallery_selected + 1 < count {
                    self.gallery_selected += 1;
                }
            }
            KeyCode::Char('a') => {
                if self.gallery.is_full() {
                    self.show_status(
                        format!("Gallery is full ({} images)", self.gallery.max_images()),
                        now,
                    );
                } else {
                    self.input_mode = InputMode::ImagePath;
                    self.input_buffer.clear();
                    self.input_error = None;
                }
            }
            KeyCode::Char('e') => self.delete_mode = !self.delete_mode,
            KeyCode::Char('r') => {
                if let Err(e) = self.gallery.reload() {
                    warn!("Gallery reload failed: {}", e);
                }
                self.gallery_selected = self.gallery_selected.min(self.gallery.len().saturating_sub(1));
            }
            KeyCode::Enter | KeyCode::Char('x') | KeyCode::Delete if self.delete_mode => {
                self.delete_selected(now)
            }
            KeyCode::Enter => {
                if let Some(path) = self.gallery.images().get(self.gallery_selected) {
                    self.preview = Some((path.clone(), now + PREVIEW_SECS));
                }
            }
            _ => {}
        }
    }

    fn delete_selected(&mut self, now: f64) {
        let Some(path) = self.gallery.images().get(self.gallery_selected).cloned() else {
            return;
        };
        match self.gallery.remove(&path) {
            Ok(()) => self.show_status("Image deleted", now),
            Err(e) => {
                warn!("Could not delete image: {}", e);
                self.show_status(format!("Could not delete: {}", e), now);
            }
        }
        self.gallery_selected = self.gallery_selected.min(self.gallery.len().saturating_sub(1));
    }

    fn handle_path_input(&mut self, key: KeyEvent, now: f64) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.input_error = None;
            }
            KeyCode::Enter => {
                let trimmed = self.input_buffer.trim().trim_matches(['"', '\'']).to_string();
                if trimmed.is_empty() {
                    self.input_error = Some("Enter the path of a picture".to_string());
                    return;
                }
                match self.gallery.add(Path::new(&trimmed)) {
                    Ok(saved) => {
                        self.gallery_selected = self
                            .gallery
                            .images()
                            .iter()
                            .position(|p| *p == saved)
                            .unwrap_or(0);
                        self.input_mode = InputMode::Normal;
                        self.input_buffer.clear();
                        self.input_error = None;
                        self.show_status("Image added", now);
                    }
                    Err(e) => self.input_error = Some(e.to_string()),
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
                self.input_error = None;
            }
            KeyCode::Char(c) => {
                self.input_buffer.push(c);
                self.input_error = None;
            }
            _ => {}
        }
    }

    // ─── Calendar ────────────────────────────────────────────────────────────

    fn open_calendar(&mut self) {
        let today = Local::now().date_naive();
        self.calendar_selected = today;
        self.calendar_month = calendar::month_start(today);
        self.view = View::Calendar;
    }

    fn select_day(&mut self, day: Option<NaiveDate>) {
        if let Some(day) = day {
            self.calendar_selected = day;
            self.calendar_month = calendar::month_start(day);
        }
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) {
        let sel = self.calendar_selected;
        match key.code {
            KeyCode::Esc | KeyCode::Char('c') => self.view = View::Home,
            KeyCode::Left => self.select_day(sel.checked_sub_days(Days::new(1))),
            KeyCode::Right => self.select_day(sel.checked_add_days(Days::new(1))),
            KeyCode::Up => self.select_day(sel.checked_sub_days(Days::new(7))),
            KeyCode::Down => self.select_day(sel.checked_add_days(Days::new(7))),
            KeyCode::PageUp | KeyCode::Char('<') | KeyCode::Char('[') => {
                self.select_day(calendar::shift_month(self.calendar_month, -1))
            }
            KeyCode::PageDown | KeyCode::Char('>') | KeyCode::Char(']') => {
                self.select_day(calendar::shift_month(self.calendar_month, 1))
            }
            KeyCode::Char('r') => self.input_mode = InputMode::ConfirmReset,
            _ => {}
        }
    }

    fn handle_confirm_reset(&mut self, key: KeyEvent, now: f64) {
        if matches!(key.code, KeyCode::Char('y') | KeyCode::Char('Y')) {
            self.recorder.reset_all();
            self.show_status("Statistics reset", now);
        }
        self.input_mode = InputMode::Normal;
    }

    // ─── Drawing ─────────────────────────────────────────────────────────────

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(theme::base()), area);

        let chunks = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).split(area);
        let body = chunks[0];

        match self.view {
            View::Home => self.draw_home(frame, body),
            View::Help => {
                self.draw_home(frame, body);
                self.draw_help_overlay(frame);
            }
            View::Game => self.draw_game(frame, body),
            View::Settings => settings::render(frame, body, &self.settings, self.settings_focus),
            View::Gallery => {
                gallery::render(
                    frame,
                    body,
                    self.gallery.images(),
                    self.gallery_selected,
                    self.delete_mode,
                    self.gallery.max_images(),
                );
                if let Some((path, until)) = &self.preview {
                    let popup = centered(body, 60, 11);
                    frame.render_widget(Clear, popup);
                    reward::render(frame, popup, path, None, (until - self.clock).max(0.0) / PREVIEW_SECS);
                }
            }
            View::Calendar => calendar::render(
                frame,
                body,
                self.recorder.stats(),
                self.calendar_month,
                self.calendar_selected,
            ),
        }

        if self.input_mode == InputMode::ImagePath {
            self.draw_path_input(frame);
        }
        if self.input_mode == InputMode::ConfirmReset {
            self.draw_confirm_reset(frame);
        }

        statusbar::render(frame, chunks[1], self.hints(), self.status_text());
    }

    fn hints(&self) -> &'static [(&'static str, &'static str)] {
        match (&self.view, &self.input_mode) {
            (_, InputMode::ImagePath) => &[("[Enter]", " add  "), ("[Esc]", " cancel")],
            (_, InputMode::ConfirmReset) => &[("[y]", " reset  "), ("[any key]", " cancel")],
            (View::Home, _) => &[
                ("[Enter]", " breathe  "),
                ("[g]", " gallery  "),
                ("[s]", " settings  "),
                ("[c]", " calendar  "),
                ("[?]", " help  "),
                ("[q]", " quit"),
            ],
            (View::Help, _) => &[("[Esc]", " back")],
            (View::Game, _) => &[
                ("[drag / ← ↑ → ↓]", " follow the arrow  "),
                ("[hold centre]", " home  "),
                ("[Esc]", " home"),
            ],
            (View::Settings, _) => &[
                ("[↑ ↓]", " select  "),
                ("[← →]", " change  "),
                ("[Enter]", " toggle/add  "),
                ("[x]", " remove step  "),
                ("[Esc]", " save"),
            ],
            (View::Gallery, _) => &[
                ("[↑ ↓]", " select  "),
                ("[Enter]", " view/delete  "),
                ("[a]", " add  "),
                ("[e]", " edit  "),
                ("[Esc]", " back"),
            ],
            (View::Calendar, _) => &[
                ("[← → ↑ ↓]", " day  "),
                ("[PgUp PgDn]", " month  "),
                ("[r]", " reset  "),
                ("[Esc]", " back"),
            ],
        }
    }

    fn draw_home(&self, frame: &mut Frame, area: Rect) {
        let chunks =
            Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(0)]).split(area);
        header::render(frame, chunks[0]);

        let today = Local::now().date_naive();
        let today_swipes = self.recorder.day(today).map(|d| d.swipe_count).unwrap_or(0);
        let stats = self.recorder.stats();

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  [Enter]  ", theme::sky().add_modifier(Modifier::BOLD)),
                Span::styled("Guided breathing", theme::bold()),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Mode:      ", theme::dim()),
                Span::styled(self.settings.mode_label(), theme::sand()),
            ]),
            Line::from(vec![
                Span::styled("  Pictures:  ", theme::dim()),
                Span::styled(
                    format!("{}/{}", self.gallery.len(), self.gallery.max_images()),
                    theme::sand(),
                ),
            ]),
            Line::from(vec![
                Span::styled("  Today:     ", theme::dim()),
                Span::styled(format!("{} swipes", today_swipes), theme::sea()),
            ]),
            Line::from(vec![
                Span::styled("  Overall:   ", theme::dim()),
                Span::styled(
                    format!(
                        "{} swipes · {} · {} days",
                        stats.total_swipes,
                        crate::utils::format::format_total_time(stats.total_time),
                        stats.total_days
                    ),
                    theme::sea(),
                ),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border())
            .style(theme::surface());
        let panel = centered(chunks[1], 56, 10);
        frame.render_widget(Paragraph::new(lines).block(block), panel);
    }

    fn draw_game(&self, frame: &mut Frame, area: Rect) {
        let holding = self.classifier.is_long_press();
        let chunks = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(if holding { 3 } else { 0 }),
        ])
        .split(area);

        let required = self.settings.current_arrow_count();
        let top = Line::from(vec![
            Span::styled("  ", theme::dim()),
            Span::styled(
                crate::utils::format::progress_bar(self.progression.completed(), required, 12),
                theme::sea(),
            ),
            Span::styled(
                format!(
                    "  {}/{}  ·  {}  ·  session: {} swipes",
                    self.progression.completed(),
                    required,
                    self.settings.mode_label(),
                    self.recorder.session_swipes()
                ),
                theme::dim(),
            ),
        ]);
        frame.render_widget(Paragraph::new(vec![Line::from(""), top]), chunks[0]);

        match &self.phase {
            GamePhase::Prompt => {
                let display = &self.config.display;
                let wave = ((self.clock * display.arrow_speed).sin() + 1.0) / 2.0;
                arrow::render(
                    frame,
                    chunks[1],
                    self.progression.current(),
                    wave * display.arrow_amplitude,
                );
            }
            GamePhase::Reward { image, until } => {
                let total = self.settings.image_display_time.max(0.1) as f64;
                let popup = centered(chunks[1], 60, 11);
                reward::render(
                    frame,
                    popup,
                    image,
                    Some((self.gallery.used_count(), self.gallery.len())),
                    (until - self.clock).max(0.0) / total,
                );
            }
        }

        if let Some(ratio) = self.classifier.long_press_progress(self.clock) {
            let gauge = Gauge::default()
                .block(
                    Block::default()
                        .title(Span::styled(" Hold to go home ", theme::sand()))
                        .borders(Borders::ALL)
                        .border_type(BorderType::Rounded)
                        .border_style(theme::border()),
                )
                .gauge_style(theme::sand())
                .ratio(ratio);
            frame.render_widget(gauge, chunks[2]);
        }
    }

    fn draw_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_area = centered(area, 56, 14);
        frame.render_widget(Clear, popup_area);

        let entry = |key: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {:<16}", key), theme::sky()),
                Span::styled(what, theme::dim()),
            ])
        };
        let help_text = vec![
            Line::from(Span::styled(
                "  How it works",
                theme::sky().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            entry("drag / arrows", "Follow the arrow on screen"),
            entry("every N arrows", "One of your pictures appears"),
            entry("hold centre 3s", "Back to the home screen"),
            entry("hold title 3s", "Open the calendar"),
            Line::from(""),
            entry("[g]", "Manage pictures"),
            entry("[s]", "Arrows per picture, timing, sequence"),
            entry("[c]", "Calendar and totals"),
            entry("[Esc]", "Close"),
        ];

        let block = Block::default()
            .title(Span::styled(" Help ", theme::sky()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::sky())
            .style(theme::surface());
        frame.render_widget(Paragraph::new(help_text).block(block), popup_area);
    }

    fn draw_path_input(&self, frame: &mut Frame) {
        let area = frame.area();
        let height = if self.input_error.is_some() { 7 } else { 5 };
        let popup_area = centered(area, 70, height);
        frame.render_widget(Clear, popup_area);

        let mut text = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled("  Picture: ", theme::dim()),
                Span::styled(self.input_buffer.as_str(), theme::sky().add_modifier(Modifier::BOLD)),
                Span::styled("█", theme::sand()),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "  Path to a jpg or png, then [Enter]  ·  [Esc] cancel",
                theme::dim(),
            )),
        ];
        if let Some(err) = &self.input_error {
            text.push(Line::from(""));
            text.push(Line::from(Span::styled(format!("  ✗ {}", err), theme::coral())));
        }

        let border_style = if self.input_error.is_some() {
            theme::coral()
        } else {
            theme::sand()
        };
        let block = Block::default()
            .title(Span::styled(" Add Picture ", theme::sky()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .style(theme::surface());
        frame.render_widget(Paragraph::new(text).block(block), popup_area);
    }

    fn draw_confirm_reset(&self, frame: &mut Frame) {
        let popup_area = centered(frame.area(), 50, 6);
        frame.render_widget(Clear, popup_area);
        let text = vec![
            Line::from(""),
            Line::from(Span::styled("  Delete every recorded session?", theme::bold())),
            Line::from(""),
            Line::from(Span::styled("  [y] yes  ·  any other key cancels", theme::dim())),
        ];
        let block = Block::default()
            .title(Span::styled(" Reset Statistics ", theme::coral()))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::coral())
            .style(theme::surface());
        frame.render_widget(Paragraph::new(text).block(block), popup_area);
    }
}

/// A `width`×`height` box centred in `area`, shrunk to fit.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Run `body`, then `cleanup` whatever `body` returned.
fn restore_after<S, T>(
    state: &mut S,
    body: impl FnOnce(&mut S) -> Result<T>,
    cleanup: impl FnOnce(&mut S),
) -> Result<T> {
    let result = body(state);
    cleanup(state);
    result
}

/// Run the TUI event loop.
pub fn run(config: AppConfig, start_playing: bool) -> Result<()> {
    let bell = TerminalBell::new(config.display.bell);
    let tick_rate = config.display.tick_rate_ms;
    let mut app = App::new(config, Box::new(bell), StdRng::from_os_rng())?;

    let mut terminal = ratatui::init();
    let started = Instant::now();

    restore_after(
        &mut app,
        |app| {
            crossterm::execute!(std::io::stdout(), EnableMouseCapture, EnableFocusChange)?;
            let size = terminal.size()?;
            app.resize(size.width, size.height);

            let events = EventHandler::new(tick_rate);
            if start_playing {
                app.start_game(0.0);
            }

            loop {
                terminal.draw(|frame| app.draw(frame))?;

                let event = events.next()?;
                let now = started.elapsed().as_secs_f64();
                match event {
                    Event::Key(key) => app.handle_key(key, now),
                    Event::Mouse(mouse) => app.handle_mouse(mouse, now),
                    Event::Resize(w, h) => app.resize(w, h),
                    Event::FocusLost => app.focus_lost(now),
                    Event::FocusGained => app.focus_gained(now),
                    Event::Tick => app.tick(now),
                }
                if app.should_quit {
                    return Ok(());
                }
            }
        },
        |app| {
            // make sure an interrupted session still lands in the statistics
            app.recorder.end(started.elapsed().as_secs_f64());
            let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture, DisableFocusChange);
            ratatui::restore();
        },
    )
}
