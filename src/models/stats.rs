use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Aggregated activity for one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayStatistics {
    /// `YYYY-MM-DD`
    pub date: String,
    #[serde(default)]
    pub swipe_count: u32,
    /// Seconds.
    #[serde(default)]
    pub session_time: f32,
    #[serde(default)]
    pub session_durations: Vec<f32>,
}

impl DayStatistics {
    pub fn new(date: &str) -> Self {
        Self {
            date: date.to_string(),
            ..Default::default()
        }
    }

    pub fn session_count(&self) -> usize {
        self.session_durations.len()
    }

    pub fn average_session(&self) -> Option<f32> {
        if self.session_durations.is_empty() {
            None
        } else {
            Some(self.session_durations.iter().sum::<f32>() / self.session_durations.len() as f32)
        }
    }

    pub fn has_activity(&self) -> bool {
        self.swipe_count > 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsData {
    #[serde(default)]
    pub daily_stats: Vec<DayStatistics>,
    #[serde(default)]
    pub total_swipes: u32,
    #[serde(default)]
    pub total_time: f32,
    #[serde(default)]
    pub total_days: u32,
}

impl StatisticsData {
    pub fn day(&self, date: &str) -> Option<&DayStatistics> {
        self.daily_stats.iter().find(|d| d.date == date)
    }

    /// Find the day's entry, appending a fresh one on first use.
    pub fn day_mut_or_insert(&mut self, date: &str) -> &mut DayStatistics {
        let idx = match self.daily_stats.iter().position(|d| d.date == date) {
            Some(idx) => idx,
            None => {
                self.daily_stats.push(DayStatistics::new(date));
                self.daily_stats.len() - 1
            }
        };
        &mut self.daily_stats[idx]
    }

    /// Fold one finished session into its day and refresh the totals.
    pub fn add_session(&mut self, date: &str, swipes: u32, duration_secs: f32) {
        let day = self.day_mut_or_insert(date);
        day.swipe_count += swipes;
        day.session_time += duration_secs;
        day.session_durations.push(duration_secs);
        self.recompute_totals();
    }

    pub fn recompute_totals(&mut self) {
        self.total_swipes = self.daily_stats.iter().map(|d| d.swipe_count).sum();
        self.total_time = self.daily_stats.iter().map(|d| d.session_time).sum();
        let unique: HashSet<&str> = self.daily_stats.iter().map(|d| d.date.as_str()).collect();
        self.total_days = unique.len() as u32;
    }

    /// Days of `year-month` (`YYYY-MM`) that have at least one swipe.
    pub fn active_days_in_month(&self, year_month: &str) -> Vec<&DayStatistics> {
        self.daily_stats
            .iter()
            .filter(|d| d.date.starts_with(year_month) && d.has_activity())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_session_creates_day_lazily() {
        let mut stats = StatisticsData::default();
        assert!(stats.day("2026-10-01").is_none());

        stats.add_session("2026-10-01", 12, 30.0);
        stats.add_session("2026-10-01", 3, 10.0);
        stats.add_session("2026-10-02", 5, 6.0);

        let day = stats.day("2026-10-01").unwrap();
        assert_eq!(day.swipe_count, 15);
        assert_eq!(day.session_time, 40.0);
        assert_eq!(day.session_count(), 2);
        assert_eq!(day.average_session(), Some(20.0));

        assert_eq!(stats.daily_stats.len(), 2);
        assert_eq!(stats.total_swipes, 20);
        assert_eq!(stats.total_time, 46.0);
        assert_eq!(stats.total_days, 2);
    }

    #[test]
    fn test_recompute_counts_distinct_days() {
        let mut stats = StatisticsData {
            daily_stats: vec![
                DayStatistics::new("2026-01-01"),
                DayStatistics::new("2026-01-01"),
                DayStatistics::new("2026-01-02"),
            ],
            ..Default::default()
        };
        stats.recompute_totals();
        assert_eq!(stats.total_days, 2);
    }

    #[test]
    fn test_active_days_in_month() {
        let mut stats = StatisticsData::default();
        stats.add_session("2026-09-30", 1, 5.0);
        stats.add_session("2026-10-03", 4, 8.0);
        stats.add_session("2026-10-04", 0, 8.0);
        let active = stats.active_days_in_month("2026-10");
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].date, "2026-10-03");
    }

    #[test]
    fn test_json_keys() {
        let mut stats = StatisticsData::default();
        stats.add_session("2026-10-17", 2, 7.5);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"dailyStats\""));
        assert!(json.contains("\"sessionDurations\""));
        assert!(json.contains("\"totalDays\":1"));
    }
}
