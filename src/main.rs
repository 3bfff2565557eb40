mod cli;
mod config;
mod gallery;
mod game;
mod models;
mod store;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands, StatsCommands};
use cli::handlers;
use config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // config.toml is written from the file's own values, not the CLI override
    if let Some(Commands::Config { action }) = &cli.command {
        return handlers::handle_config(&config, action);
    }

    if let Some(dir) = cli.data_dir {
        config.data_dir = Some(dir);
    }
    let data_dir = config.ensure_data_dir()?;
    log::debug!("Data directory: {:?}", data_dir);

    match cli.command {
        None => tui::app::run(config, false)?,
        Some(Commands::Play) => tui::app::run(config, true)?,
        Some(Commands::Stats { day, action }) => match action {
            Some(StatsCommands::Reset { yes }) => handlers::handle_stats_reset(&config, yes)?,
            None => handlers::handle_stats(&config, day.as_deref())?,
        },
        Some(Commands::Settings { action }) => {
            handlers::handle_settings(&config, action.as_ref())?;
        }
        Some(Commands::Images { action }) => handlers::handle_images(&config, &action)?,
        Some(Commands::Config { .. }) => unreachable!(),
    }

    Ok(())
}
