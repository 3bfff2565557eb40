use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "respiro", version, author, about = "Swipe along with the arrows, breathe, and get rewarded with your own pictures")]
pub struct Cli {
    /// Keep settings, statistics and pictures here instead of the platform data dir
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the TUI straight into a session
    Play,
    /// Show recorded statistics
    Stats {
        /// Details for one day (YYYY-MM-DD)
        #[arg(long)]
        day: Option<String>,
        #[command(subcommand)]
        action: Option<StatsCommands>,
    },
    /// Show or change game settings
    Settings {
        #[command(subcommand)]
        action: Option<SettingsCommands>,
    },
    /// Manage reward pictures
    Images {
        #[command(subcommand)]
        action: ImagesCommands,
    },
    /// Manage config.toml
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum StatsCommands {
    /// Delete every recorded session
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommands {
    /// Print the current settings
    Show,
    /// Arrows needed per picture in standard mode (1-20)
    Arrows { count: u32 },
    /// Seconds a picture stays on screen (0.5-10, in 0.5 steps)
    DisplayTime { seconds: f32 },
    /// Advanced sequence of arrow counts
    Sequence {
        #[command(subcommand)]
        action: SequenceCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum SequenceCommands {
    /// Use the sequence instead of the standard count
    Enable,
    /// Go back to the standard count
    Disable,
    /// Append a step
    Add {
        /// Arrows for the new step (1-50)
        arrows: u32,
    },
    /// Remove a step (numbered from 1)
    Remove { step: usize },
    /// Change the arrows of a step (numbered from 1)
    Set { step: usize, arrows: u32 },
}

#[derive(Subcommand, Debug)]
pub enum ImagesCommands {
    /// List saved pictures
    List,
    /// Copy a jpg or png into the gallery
    Add { path: PathBuf },
    /// Delete a saved picture by file name
    Remove { name: String },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a config.toml with every default filled in
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print where config.toml lives
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_nested_sequence_command() {
        let cli = Cli::try_parse_from(["respiro", "settings", "sequence", "set", "2", "9"]).unwrap();
        match cli.command {
            Some(Commands::Settings {
                action:
                    Some(SettingsCommands::Sequence {
                        action: SequenceCommands::Set { step, arrows },
                    }),
            }) => assert_eq!((step, arrows), (2, 9)),
            other => panic!("unexpected parse: {:?}", other),
        }
    }

    #[test]
    fn test_global_data_dir_after_subcommand() {
        let cli = Cli::try_parse_from(["respiro", "stats", "--data-dir", "/tmp/r"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/r")));
    }
}
