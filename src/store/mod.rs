pub mod repository;

pub use repository::{SettingsRepo, StatsRepo};
