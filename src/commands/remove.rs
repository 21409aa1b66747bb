use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::session;
use icalplan_core::preferences::Preferences;

pub fn run(file: &Path, prefs: &Preferences, id: &str) -> Result<()> {
    let mut store = session::load(file)?;

    match store.remove(id) {
        Some(event) => {
            session::save(file, &store, &prefs.calendar_name)?;
            println!("{}", format!("  Removed: {}", event.title).green());
            Ok(())
        }
        None => anyhow::bail!("No event with id '{}'", id),
    }
}
