use anyhow::{Context, Result, anyhow};
use chrono::NaiveDate;
use std::io::{self, BufRead, Write};

use crate::cli::args::{ConfigCommands, ImagesCommands, SequenceCommands, SettingsCommands};
use crate::config::AppConfig;
use crate::gallery::ImageStore;
use crate::game::SessionRecorder;
use crate::models::GameSettings;
use crate::store::SettingsRepo;
use crate::utils::format::{
    format_seconds, format_short_duration, format_total_time, format_total_time_detailed,
};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const SKY: &str = "\x1b[38;2;146;184;241m";

/// How many recent active days `stats` lists.
const RECENT_DAYS: usize = 7;

// ─── Stats ───────────────────────────────────────────────────────────────────

pub fn handle_stats(config: &AppConfig, day: Option<&str>) -> Result<()> {
    let recorder = SessionRecorder::load(&config.stats_path()?);
    let stats = recorder.stats();

    if let Some(day) = day {
        let date = NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .with_context(|| format!("'{}' is not a date, use YYYY-MM-DD", day))?;
        println!();
        println_colored!(SKY, "  {}", date.format("%d %B %Y"));
        println!();
        match recorder.day(date).filter(|d| d.has_activity()) {
            Some(d) => {
                println!("  Swipes:    {}", d.swipe_count);
                println!("  Time:      {}", format_short_duration(d.session_time));
                println!("  Sessions:  {}", d.session_count());
                if let Some(avg) = d.average_session() {
                    println!("  Average:   {}", format_short_duration(avg));
                }
            }
            None => println_colored!(DIM, "  No activity recorded for this day."),
        }
        println!();
        return Ok(());
    }

    println!();
    println_colored!(SKY, "  Statistics");
    println!();
    println_colored!(
        BOLD,
        "  {} swipes  ·  {}  ·  {} active days",
        stats.total_swipes,
        format_total_time_detailed(stats.total_time),
        stats.total_days
    );

    let mut recent: Vec<_> = stats.daily_stats.iter().filter(|d| d.has_activity()).collect();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    if !recent.is_empty() {
        println!();
        println_colored!(DIM, "  Recent days");
        for d in recent.iter().take(RECENT_DAYS) {
            println!(
                "  {}  {:>5} swipes  {:>7}  {} sessions",
                d.date,
                d.swipe_count,
                format_total_time(d.session_time),
                d.session_count()
            );
        }
    }
    println!();
    Ok(())
}

pub fn handle_stats_reset(config: &AppConfig, yes: bool) -> Result<()> {
    if !yes {
        let answer = prompt("  Delete every recorded session? Type 'yes' to confirm: ")?;
        if answer.trim() != "yes" {
            println_colored!(DIM, "  Nothing changed");
            return Ok(());
        }
    }
    let mut recorder = SessionRecorder::load(&config.stats_path()?);
    recorder.reset_all();
    println_colored!(GREEN, "  ✓ Statistics reset");
    Ok(())
}

// ─── Settings ────────────────────────────────────────────────────────────────

/// Apply one settings change and describe the result.
pub fn apply_settings_command(settings: &mut GameSettings, action: &SettingsCommands) -> Result<String> {
    let msg = match action {
        SettingsCommands::Show => return Ok(String::new()),
        SettingsCommands::Arrows { count } => {
            settings.set_standard_arrow_count(*count);
            format!("Arrows per picture: {}", settings.standard_arrow_count)
        }
        SettingsCommands::DisplayTime { seconds } => {
            settings.set_display_time(*seconds);
            format!("Picture time: {}", format_seconds(settings.image_display_time))
        }
        SettingsCommands::Sequence { action } => match action {
            SequenceCommands::Enable => {
                settings.set_advanced(true);
                "Advanced sequence on".to_string()
            }
            SequenceCommands::Disable => {
                settings.set_advanced(false);
                "Advanced sequence off".to_string()
            }
            SequenceCommands::Add { arrows } => {
                settings.add_step(*arrows);
                format!("Added step {}", settings.advanced_sequence.len())
            }
            SequenceCommands::Remove { step } => {
                let idx = step_index(settings, *step)?;
                if !settings.remove_step(idx) {
                    return Err(anyhow!("The sequence needs at least one step"));
                }
                format!("Removed step {}", step)
            }
            SequenceCommands::Set { step, arrows } => {
                let idx = step_index(settings, *step)?;
                settings.update_step(idx, *arrows);
                format!("Step {}: {} arrows", step, settings.advanced_sequence[idx])
            }
        },
    };
    Ok(msg)
}

fn step_index(settings: &GameSettings, step: usize) -> Result<usize> {
    let len = settings.advanced_sequence.len();
    if step == 0 || step > len {
        return Err(anyhow!("No step {}; the sequence has {} steps", step, len));
    }
    Ok(step - 1)
}

pub fn handle_settings(config: &AppConfig, action: Option<&SettingsCommands>) -> Result<()> {
    let path = config.settings_path()?;
    let mut settings = SettingsRepo::load_or_default(&path);

    if let Some(action) = action.filter(|a| !matches!(a, SettingsCommands::Show)) {
        let msg = apply_settings_command(&mut settings, action)?;
        SettingsRepo::save(&path, &settings)?;
        println_colored!(GREEN, "  ✓ {}", msg);
        return Ok(());
    }

    println!();
    println_colored!(SKY, "  Settings");
    println!();
    println!("  Arrows per picture:  {}", settings.standard_arrow_count);
    println!("  Picture time:        {}", format_seconds(settings.image_display_time));
    println!(
        "  Advanced sequence:   {}",
        if settings.advanced_sequence_enabled { "on" } else { "off" }
    );
    let n = settings.advanced_sequence.len();
    for (i, arrows) in settings.advanced_sequence.iter().enumerate() {
        if n > 0 && i == settings.current_sequence_index % n {
            println_colored!(AMBER, "    {}. {} arrows  ◂ next", i + 1, arrows);
        } else {
            println!("    {}. {} arrows", i + 1, arrows);
        }
    }
    println!();
    println_colored!(DIM, "  Now: {}", settings.mode_label());
    println!();
    Ok(())
}

// ─── Images ──────────────────────────────────────────────────────────────────

pub fn handle_images(config: &AppConfig, action: &ImagesCommands) -> Result<()> {
    let mut store = ImageStore::open(&config.images_dir()?, config.gallery.max_images)?;

    match action {
        ImagesCommands::List => {
            println!();
            if store.is_empty() {
                println_colored!(DIM, "  No pictures yet. Add one with `respiro images add <PATH>`");
            } else {
                println_colored!(SKY, "  Pictures ({}/{})", store.len(), store.max_images());
                println!();
                for path in store.images() {
                    let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
                    println!("  {}", name);
                }
            }
            println!();
        }
        ImagesCommands::Add { path } => {
            let saved = store.add(path)?;
            let name = saved.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
            println_colored!(GREEN, "  ✓ Saved as {}", name);
        }
        ImagesCommands::Remove { name } => {
            let target = store
                .find(name)
                .cloned()
                .ok_or_else(|| anyhow!("No picture named '{}'", name))?;
            store.remove(&target)?;
            println_colored!(RED, "  ✗ Deleted {}", name);
        }
    }
    Ok(())
}

// ─── Config ──────────────────────────────────────────────────────────────────

pub fn handle_config(config: &AppConfig, action: &ConfigCommands) -> Result<()> {
    let path = AppConfig::config_path()?;
    match action {
        ConfigCommands::Path => println!("{}", path.display()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                println_colored!(AMBER, "  {} already exists. Use --force to overwrite.", path.display());
                return Ok(());
            }
            config.save()?;
            println_colored!(GREEN, "  ✓ Wrote {}", path.display());
        }
    }
    Ok(())
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(action: SequenceCommands) -> SettingsCommands {
        SettingsCommands::Sequence { action }
    }

    #[test]
    fn test_arrows_and_display_time_are_clamped() {
        let mut s = GameSettings::default();
        let msg = apply_settings_command(&mut s, &SettingsCommands::Arrows { count: 99 }).unwrap();
        assert_eq!(msg, "Arrows per picture: 20");
        apply_settings_command(&mut s, &SettingsCommands::DisplayTime { seconds: 1.3 }).unwrap();
        assert_eq!(s.image_display_time, 1.5);
    }

    #[test]
    fn test_sequence_steps_are_numbered_from_one() {
        let mut s = GameSettings::default();
        apply_settings_command(&mut s, &sequence(SequenceCommands::Set { step: 1, arrows: 8 })).unwrap();
        assert_eq!(s.advanced_sequence, vec![8, 5, 7]);

        apply_settings_command(&mut s, &sequence(SequenceCommands::Remove { step: 3 })).unwrap();
        assert_eq!(s.advanced_sequence, vec![8, 5]);

        assert!(apply_settings_command(&mut s, &sequence(SequenceCommands::Remove { step: 0 })).is_err());
        assert!(apply_settings_command(&mut s, &sequence(SequenceCommands::Set { step: 3, arrows: 1 })).is_err());
    }

    #[test]
    fn test_last_step_cannot_be_removed() {
        let mut s = GameSettings::default();
        s.advanced_sequence = vec![4];
        let err = apply_settings_command(&mut s, &sequence(SequenceCommands::Remove { step: 1 }));
        assert!(err.is_err());
        assert_eq!(s.advanced_sequence, vec![4]);
    }
}
