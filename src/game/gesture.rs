//! Pointer gesture recognition.
//!
//! Turns raw press/move/release samples into swipes and a centre long press.
//! Coordinates are screen space with rows growing downward, already corrected
//! for the terminal cell aspect. Times are seconds on any monotonic clock.

use log::debug;

use crate::config::settings::GestureConfig;
use crate::models::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    pub fn shorter_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    Swipe(Direction),
    LongPressStarted,
    HapticPulse,
    LongPressCancelled,
    ReturnHome,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TouchState {
    Idle,
    /// Finger down; may still become a swipe or a long press.
    Pressed { start: Point, started_at: f64 },
    LongPress { activated_at: f64, next_pulse_at: f64 },
}

/// Dominant axis wins; a tie counts as vertical.
pub fn classify_swipe(dx: f64, dy: f64) -> Direction {
    if dx.abs() > dy.abs() {
        if dx > 0.0 { Direction::Right } else { Direction::Left }
    } else if dy < 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

pub struct GestureClassifier {
    config: GestureConfig,
    screen: ScreenSize,
    state: TouchState,
    current: Point,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig, screen: ScreenSize) -> Self {
        Self {
            config,
            screen,
            state: TouchState::Idle,
            current: Point::default(),
        }
    }

    pub fn set_screen(&mut self, screen: ScreenSize) {
        self.screen = screen;
    }

    pub fn is_touch_active(&self) -> bool {
        self.state != TouchState::Idle
    }

    pub fn is_long_press(&self) -> bool {
        matches!(self.state, TouchState::LongPress { .. })
    }

    /// Drop any touch in progress without emitting events.
    pub fn reset(&mut self) {
        self.state = TouchState::Idle;
    }

    pub fn pointer_down(&mut self, pos: Point, now: f64) {
        self.state = TouchState::Pressed {
            start: pos,
            started_at: now,
        };
        self.current = pos;
        debug!("Touch started at ({:.1}, {:.1})", pos.x, pos.y);
    }

    pub fn pointer_move(&mut self, pos: Point) {
        self.current = pos;
    }

    fn in_central_area(&self, pos: Point) -> bool {
        let radius = self.screen.shorter_side() * self.config.central_radius;
        pos.distance(self.screen.center()) <= radius
    }

    /// Per-frame poll for the time-driven parts of the state machine.
    pub fn update(&mut self, now: f64) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        match self.state {
            TouchState::Idle => {}
            TouchState::Pressed { start, started_at } => {
                let held = now - started_at;
                let moved = start.distance(self.current);
                if held >= self.config.activation_delay_secs
                    && moved < self.config.hold_tolerance
                    && self.in_central_area(start)
                {
                    debug!("Long press activated");
                    self.state = TouchState::LongPress {
                        activated_at: now,
                        next_pulse_at: now + self.config.haptic_interval_secs,
                    };
                    events.push(GestureEvent::LongPressStarted);
                    events.push(GestureEvent::HapticPulse);
                }
            }
            TouchState::LongPress {
                activated_at,
                next_pulse_at,
            } => {
                if now - activated_at >= self.config.return_home_secs {
                    debug!("Long press completed");
                    self.state = TouchState::Idle;
                    events.push(GestureEvent::ReturnHome);
                } else if now >= next_pulse_at {
                    self.state = TouchState::LongPress {
                        activated_at,
                        next_pulse_at: now + self.config.haptic_interval_secs,
                    };
                    events.push(GestureEvent::HapticPulse);
                }
            }
        }
        events
    }

    pub fn pointer_up(&mut self, pos: Point, now: f64) -> Option<GestureEvent> {
        self.current = pos;
        let state = std::mem::replace(&mut self.state, TouchState::Idle);
        match state {
            TouchState::Idle => None,
            TouchState::LongPress { .. } => {
                debug!("Long press released early");
                Some(GestureEvent::LongPressCancelled)
            }
            TouchState::Pressed { start, started_at } => {
                if now - started_at > self.config.max_swipe_secs {
                    return None;
                }
                if start.distance(pos) < self.config.min_distance {
                    return None;
                }
                let direction = classify_swipe(pos.x - start.x, pos.y - start.y);
                debug!("Swipe {}", direction);
                Some(GestureEvent::Swipe(direction))
            }
        }
    }

    /// Fraction of the hold towards returning home, while a long press runs.
    pub fn long_press_progress(&self, now: f64) -> Option<f64> {
        match self.state {
            TouchState::LongPress { activated_at, .. } => {
                let total = self.config.return_home_secs.max(f64::EPSILON);
                Some(((now - activated_at) / total).clamp(0.0, 1.0))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> GestureClassifier {
        GestureClassifier::new(
            GestureConfig::default(),
            ScreenSize {
                width: 100.0,
                height: 60.0,
            },
        )
    }

    fn swipe(c: &mut GestureClassifier, from: (f64, f64), to: (f64, f64), secs: f64) -> Option<GestureEvent> {
        c.pointer_down(Point::new(from.0, from.1), 10.0);
        c.pointer_up(Point::new(to.0, to.1), 10.0 + secs)
    }

    #[test]
    fn test_classify_swipe_axes() {
        assert_eq!(classify_swipe(10.0, 2.0), Direction::Right);
        assert_eq!(classify_swipe(-10.0, 2.0), Direction::Left);
        assert_eq!(classify_swipe(1.0, -10.0), Direction::Up);
        assert_eq!(classify_swipe(1.0, 10.0), Direction::Down);
        // tie → vertical
        assert_eq!(classify_swipe(5.0, -5.0), Direction::Up);
    }

    #[test]
    fn test_swipe_thresholds() {
        let mut c = classifier();
        assert_eq!(
            swipe(&mut c, (10.0, 10.0), (30.0, 12.0), 0.2),
            Some(GestureEvent::Swipe(Direction::Right))
        );
        // too short
        assert_eq!(swipe(&mut c, (10.0, 10.0), (13.0, 10.0), 0.2), None);
        // too slow
        assert_eq!(swipe(&mut c, (10.0, 10.0), (40.0, 10.0), 1.5), None);
        // exactly at the limits still counts
        assert_eq!(
            swipe(&mut c, (10.0, 30.0), (10.0, 24.0), 1.0),
            Some(GestureEvent::Swipe(Direction::Up))
        );
        assert!(!c.is_touch_active());
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut c = classifier();
        assert_eq!(c.pointer_up(Point::new(90.0, 10.0), 1.0), None);
    }

    #[test]
    fn test_long_press_from_centre_returns_home() {
        let mut c = classifier();
        c.pointer_down(Point::new(50.0, 30.0), 0.0);
        assert!(c.update(0.5).is_empty());

        let events = c.update(1.0);
        assert_eq!(events, vec![GestureEvent::LongPressStarted, GestureEvent::HapticPulse]);
        assert!(c.is_long_press());

        assert!(c.update(1.2).is_empty());
        assert_eq!(c.update(1.5), vec![GestureEvent::HapticPulse]);
        assert_eq!(c.long_press_progress(2.5), Some(0.5));

        assert_eq!(c.update(4.0), vec![GestureEvent::ReturnHome]);
        assert!(!c.is_touch_active());
        // the release afterwards is a plain no-op
        assert_eq!(c.pointer_up(Point::new(50.0, 30.0), 4.0), None);
    }

    #[test]
    fn test_long_press_needs_centre_and_stillness() {
        let mut c = classifier();
        c.pointer_down(Point::new(2.0, 2.0), 0.0);
        assert!(c.update(2.0).is_empty());

        c.pointer_down(Point::new(50.0, 30.0), 5.0);
        c.pointer_move(Point::new(56.0, 30.0));
        assert!(c.update(6.0).is_empty());
        assert!(!c.is_long_press());
    }

    #[test]
    fn test_release_cancels_long_press_without_swipe() {
        let mut c = classifier();
        c.pointer_down(Point::new(50.0, 30.0), 0.0);
        c.update(1.0);
        assert_eq!(
            c.pointer_up(Point::new(80.0, 30.0), 1.2),
            Some(GestureEvent::LongPressCancelled)
        );
        assert!(c.update(5.0).is_empty());
    }
}
