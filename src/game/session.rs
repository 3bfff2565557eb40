use chrono::NaiveDate;
use log::info;
use std::path::{Path, PathBuf};

use crate::models::{DayStatistics, StatisticsData};
use crate::store::StatsRepo;

/// Sessions shorter than this are not recorded.
pub const MIN_SESSION_SECS: f32 = 5.0;

#[derive(Debug, Clone)]
struct ActiveSession {
    started_at: f64,
    date: String,
    swipes: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEnd {
    NotActive,
    Discarded { duration: f32 },
    Saved { duration: f32, swipes: u32 },
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Brackets play sessions and folds them into the statistics file.
pub struct SessionRecorder {
    path: PathBuf,
    stats: StatisticsData,
    active: Option<ActiveSession>,
}

impl SessionRecorder {
    pub fn load(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            stats: StatsRepo::load_or_default(path),
            active: None,
        }
    }

    pub fn stats(&self) -> &StatisticsData {
        &self.stats
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayStatistics> {
        self.stats.day(&date_key(date))
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn session_swipes(&self) -> u32 {
        self.active.as_ref().map(|s| s.swipes).unwrap_or(0)
    }

    /// Open a session unless one is already running. The day is fixed here.
    pub fn start(&mut self, now: f64, today: NaiveDate) -> bool {
        if self.active.is_some() {
            return false;
        }
        let date = date_key(today);
        info!("Session started: {}", date);
        self.active = Some(ActiveSession {
            started_at: now,
            date,
            swipes: 0,
        });
        true
    }

    pub fn record_swipe(&mut self) {
        if let Some(session) = self.active.as_mut() {
            session.swipes += 1;
        }
    }

    pub fn end(&mut self, now: f64) -> SessionEnd {
        let Some(session) = self.active.take() else {
            return SessionEnd::NotActive;
        };
        let duration = (now - session.started_at).max(0.0) as f32;
        info!(
            "Session ended: {} swipes, {:.1} seconds",
            session.swipes, duration
        );
        if duration < MIN_SESSION_SECS {
            return SessionEnd::Discarded { duration };
        }
        self.stats.add_session(&session.date, session.swipes, duration);
        StatsRepo::save_logged(&self.path, &self.stats);
        SessionEnd::Saved {
            duration,
            swipes: session.swipes,
        }
    }

    /// Wipe every recorded day and save the empty document.
    pub fn reset_all(&mut self) {
        self.stats = StatisticsData::default();
        StatsRepo::save_logged(&self.path, &self.stats);
        info!("All statistics reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_short_sessions_are_discarded() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("statistics.json");
        let mut rec = SessionRecorder::load(&path);

        assert!(rec.start(100.0, day(17)));
        rec.record_swipe();
        assert!(matches!(rec.end(104.9), SessionEnd::Discarded { .. }));
        assert!(rec.stats().daily_stats.is_empty());
        assert!(!path.exists());
    }

    #[test]
    fn test_saved_session_updates_day_and_totals() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("statistics.json");
        let mut rec = SessionRecorder::load(&path);

        rec.start(0.0, day(16));
        for _ in 0..4 {
            rec.record_swipe();
        }
        assert_eq!(rec.session_swipes(), 4);
        assert_eq!(
            rec.end(10.0),
            SessionEnd::Saved {
                duration: 10.0,
                swipes: 4
            }
        );

        rec.start(20.0, day(17));
        rec.record_swipe();
        rec.end(26.0);

        assert_eq!(rec.stats().total_swipes, 5);
        assert_eq!(rec.stats().total_time, 16.0);
        assert_eq!(rec.stats().total_days, 2);
        assert_eq!(rec.day(day(16)).unwrap().session_durations, vec![10.0]);

        let reloaded = SessionRecorder::load(&path);
        assert_eq!(reloaded.stats(), rec.stats());
    }

    #[test]
    fn test_swipes_outside_session_are_not_counted() {
        let tmp = tempfile::tempdir().unwrap();
        let mut rec = SessionRecorder::load(&tmp.path().join("statistics.json"));
        rec.record_swipe();
        assert_eq!(rec.end(50.0), SessionEnd::NotActive);

        rec.start(0.0, day(1));
        assert!(!rec.start(3.0, day(2)));
        rec.end(6.0);
        assert!(rec.day(day(1)).is_some());
        assert!(rec.day(day(2)).is_none());
    }

    #[test]
    fn test_reset_all_saves_empty_document() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("statistics.json");
        let mut rec = SessionRecorder::load(&path);
        rec.start(0.0, day(3));
        rec.end(30.0);

        rec.reset_all();
        assert_eq!(StatsRepo::load(&path).unwrap().unwrap(), StatisticsData::default());
    }
}
