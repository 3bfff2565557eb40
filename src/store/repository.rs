use log::{error, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{GameSettings, StatisticsData};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("reading {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("writing {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parsing {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("serializing: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ─── Whole-document JSON files ──────────────────────────────────────────────

/// Read a JSON document. `Ok(None)` when the file does not exist.
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(value))
}

/// Replace the file with the pretty-printed document.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| StoreError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, content).map_err(|source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    })
}

// ─── Settings repo ───────────────────────────────────────────────────────────

pub struct SettingsRepo;

impl SettingsRepo {
    pub fn load(path: &Path) -> Result<Option<GameSettings>, StoreError> {
        let mut settings: Option<GameSettings> = read_json(path)?;
        if let Some(s) = settings.as_mut() {
            s.sanitize();
        }
        Ok(settings)
    }

    /// Load settings, falling back to defaults on a missing or unreadable file.
    pub fn load_or_default(path: &Path) -> GameSettings {
        match Self::load(path) {
            Ok(Some(settings)) => {
                info!("Settings loaded from {:?}", path);
                settings
            }
            Ok(None) => {
                info!("No settings file yet, using defaults");
                GameSettings::default()
            }
            Err(e) => {
                error!("Failed to load settings: {}", e);
                GameSettings::default()
            }
        }
    }

    pub fn save(path: &Path, settings: &GameSettings) -> Result<(), StoreError> {
        write_json(path, settings)
    }

    /// Save and log on failure; the in-memory settings stay authoritative.
    pub fn save_logged(path: &Path, settings: &GameSettings) {
        if let Err(e) = Self::save(path, settings) {
            error!("Failed to save settings: {}", e);
        }
    }
}

// ─── Statistics repo ─────────────────────────────────────────────────────────

pub struct StatsRepo;

impl StatsRepo {
    pub fn load(path: &Path) -> Result<Option<StatisticsData>, StoreError> {
        read_json(path)
    }

    pub fn load_or_default(path: &Path) -> StatisticsData {
        match Self::load(path) {
            Ok(Some(stats)) => {
                info!("Statistics loaded: {} days", stats.daily_stats.len());
                stats
            }
            Ok(None) => StatisticsData::default(),
            Err(e) => {
                warn!("Failed to load statistics, starting empty: {}", e);
                StatisticsData::default()
            }
        }
    }

    pub fn save(path: &Path, stats: &StatisticsData) -> Result<(), StoreError> {
        write_json(path, stats)
    }

    pub fn save_logged(path: &Path, stats: &StatisticsData) {
        match Self::save(path, stats) {
            Ok(()) => info!("Statistics saved"),
            Err(e) => error!("Failed to save statistics: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        assert!(SettingsRepo::load(&path).unwrap().is_none());
        assert_eq!(SettingsRepo::load_or_default(&path), GameSettings::default());

        let mut settings = GameSettings::default();
        settings.set_advanced(true);
        settings.advance_sequence();
        SettingsRepo::save(&path, &settings).unwrap();

        let loaded = SettingsRepo::load(&path).unwrap().unwrap();
        assert_eq!(loaded.current_sequence_index, 1);
        assert!(loaded.advanced_sequence_enabled);
    }

    #[test]
    fn test_corrupt_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statistics.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(StatsRepo::load(&path), Err(StoreError::Parse { .. })));
        assert_eq!(StatsRepo::load_or_default(&path), StatisticsData::default());
    }

    #[test]
    fn test_save_overwrites_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("statistics.json");

        let mut stats = StatisticsData::default();
        stats.add_session("2026-10-16", 10, 60.0);
        stats.add_session("2026-10-17", 10, 60.0);
        StatsRepo::save(&path, &stats).unwrap();

        StatsRepo::save(&path, &StatisticsData::default()).unwrap();
        let loaded = StatsRepo::load(&path).unwrap().unwrap();
        assert!(loaded.daily_stats.is_empty());
        assert_eq!(loaded.total_days, 0);
    }

    #[test]
    fn test_out_of_range_settings_are_repaired_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"standardArrowCount": 400, "currentSequenceIndex": 12}"#).unwrap();

        let loaded = SettingsRepo::load(&path).unwrap().unwrap();
        assert_eq!(loaded.standard_arrow_count, 20);
        assert_eq!(loaded.current_sequence_index, 0);
    }
}
