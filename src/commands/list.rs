use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::render::Render;
use crate::session;

pub fn run(file: &Path) -> Result<()> {
    let store = session::load(file)?;

    if store.is_empty() {
        println!("{}", "No events planned yet".dimmed());
        return Ok(());
    }

    for event in store.list() {
        println!("   {}  {}", event.id.dimmed(), event.render());
    }

    let count = store.len();
    println!(
        "\n{} {}",
        count,
        if count == 1 { "event" } else { "events" }
    );

    Ok(())
}
