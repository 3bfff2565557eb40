use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_min_distance() -> f64 {
    6.0
}
fn default_max_swipe_secs() -> f64 {
    1.0
}
fn default_hold_tolerance() -> f64 {
    3.0
}
fn default_central_radius() -> f64 {
    0.3
}
fn default_activation_delay() -> f64 {
    0.8
}
fn default_return_home_secs() -> f64 {
    3.0
}
fn default_haptic_interval() -> f64 {
    0.5
}
fn default_tick_rate_ms() -> u64 {
    50
}
fn default_cell_aspect() -> f64 {
    2.0
}
fn default_amplitude() -> f64 {
    4.0
}
fn default_speed() -> f64 {
    6.0
}
fn default_true() -> bool {
    true
}
fn default_max_images() -> usize {
    20
}
fn default_logo_hold_secs() -> f64 {
    3.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Minimum drag length for a swipe, in (aspect-corrected) cells.
    #[serde(default = "default_min_distance")]
    pub min_distance: f64,
    #[serde(default = "default_max_swipe_secs")]
    pub max_swipe_secs: f64,
    /// Movement allowed while holding before a long press is ruled out.
    #[serde(default = "default_hold_tolerance")]
    pub hold_tolerance: f64,
    /// Fraction of the shorter screen side around the centre that accepts a long press.
    #[serde(default = "default_central_radius")]
    pub central_radius: f64,
    #[serde(default = "default_activation_delay")]
    pub activation_delay_secs: f64,
    #[serde(default = "default_return_home_secs")]
    pub return_home_secs: f64,
    #[serde(default = "default_haptic_interval")]
    pub haptic_interval_secs: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_distance: default_min_distance(),
            max_swipe_secs: default_max_swipe_secs(),
            hold_tolerance: default_hold_tolerance(),
            central_radius: default_central_radius(),
            activation_delay_secs: default_activation_delay(),
            return_home_secs: default_return_home_secs(),
            haptic_interval_secs: default_haptic_interval(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    /// Height/width ratio of a terminal cell; rows are scaled by this.
    #[serde(default = "default_cell_aspect")]
    pub cell_aspect: f64,
    #[serde(default = "default_amplitude")]
    pub arrow_amplitude: f64,
    #[serde(default = "default_speed")]
    pub arrow_speed: f64,
    /// Ring the terminal bell for haptic feedback.
    #[serde(default = "default_true")]
    pub bell: bool,
    /// Hold on the title for this long to open the calendar.
    #[serde(default = "default_logo_hold_secs")]
    pub logo_hold_secs: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            cell_aspect: default_cell_aspect(),
            arrow_amplitude: default_amplitude(),
            arrow_speed: default_speed(),
            bell: true,
            logo_hold_secs: default_logo_hold_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    #[serde(default = "default_max_images")]
    pub max_images: usize,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            max_images: default_max_images(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub gallery: GalleryConfig,
    /// Overrides the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

impl AppConfig {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("", "", "respiro").context("Could not determine project directories")
    }

    pub fn config_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    pub fn settings_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("settings.json"))
    }

    pub fn stats_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("statistics.json"))
    }

    pub fn images_dir(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("images"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Reading {:?}", path))?;
        let config: AppConfig = toml::from_str(&content).context("Parsing config.toml")?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).context("Serializing config")?;
        std::fs::write(&path, content).with_context(|| format!("Writing {:?}", path))?;
        Ok(())
    }

    pub fn ensure_data_dir(&self) -> Result<PathBuf> {
        let dir = self.data_dir()?;
        std::fs::create_dir_all(&dir)?;
        std::fs::create_dir_all(self.images_dir()?)?;
        Ok(dir)
    }
}
