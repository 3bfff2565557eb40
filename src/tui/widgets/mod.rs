pub mod arrow;
pub mod calendar;
pub mod gallery;
pub mod header;
pub mod reward;
pub mod settings;
pub mod statusbar;
