//! ICS interchange format support.
//!
//! `generate` turns an [`EventStore`] into a VCALENDAR document, `parse`
//! does the reverse. The session file the CLI keeps between runs is just
//! this round trip applied to a path on disk.

mod generate;
mod parse;

pub use generate::generate_calendar;
pub use parse::parse_calendar;

use std::path::{Path, PathBuf};

use crate::error::PlanResult;
use crate::store::EventStore;

/// Write the calendar to `<dir>/<slugged name>.ics` and return the path.
pub fn write_calendar_file(
    dir: &Path,
    store: &EventStore,
    calendar_name: &str,
) -> PlanResult<PathBuf> {
    let content = generate_calendar(store, calendar_name)?;
    let path = dir.join(format!("{}.ics", slug::slugify(calendar_name)));
    std::fs::create_dir_all(dir)?;
    std::fs::write(&path, content)?;
    Ok(path)
}
