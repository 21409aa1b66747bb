use std::path::{Path, PathBuf};

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::session;
use icalplan_core::ics::write_calendar_file;
use icalplan_core::preferences::Preferences;

pub fn run(file: &Path, prefs: &Preferences, output: Option<PathBuf>) -> Result<()> {
    let store = session::load(file)?;

    let dir = output
        .or_else(|| prefs.export_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));
    let path = write_calendar_file(&dir, &store, &prefs.calendar_name)?;

    let count = store.len();
    println!(
        "{}",
        format!(
            "  Exported {} {} to {}",
            count,
            if count == 1 { "event" } else { "events" },
            path.display()
        )
        .green()
    );

    Ok(())
}
