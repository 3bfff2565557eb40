pub mod direction;
pub mod settings;
pub mod stats;

pub use direction::Direction;
pub use settings::GameSettings;
pub use stats::{DayStatistics, StatisticsData};
