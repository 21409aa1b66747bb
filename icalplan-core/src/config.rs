//! Config file loading.

use std::path::{Path, PathBuf};

use config::{Config, File};

use crate::error::{PlanError, PlanResult};
use crate::preferences::Preferences;

/// Location of the user config file, `~/.config/icalplan/config.toml`.
pub fn config_path() -> PlanResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| PlanError::Config("Could not determine config directory".into()))?
        .join("icalplan");

    Ok(config_dir.join("config.toml"))
}

/// Load preferences from `path`, or from the default location.
///
/// When the default config file does not exist yet it is created with
/// all options commented out, so a first run leaves the user a template.
pub fn load_preferences(path: Option<&Path>) -> PlanResult<Preferences> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let path = config_path()?;
            if !path.exists() {
                create_default_config(&path)?;
            }
            path
        }
    };

    let mut prefs: Preferences = Config::builder()
        .add_source(File::from(path).required(false))
        .build()
        .map_err(|e| PlanError::Config(e.to_string()))?
        .try_deserialize()
        .map_err(|e| PlanError::Config(e.to_string()))?;

    if let Some(dir) = prefs.export_dir.take() {
        let expanded = shellexpand::tilde(&dir.to_string_lossy()).into_owned();
        prefs.export_dir = Some(PathBuf::from(expanded));
    }

    validate(&prefs)?;
    Ok(prefs)
}

fn validate(prefs: &Preferences) -> PlanResult<()> {
    if let Some(hours) = &prefs.work_hours {
        if hours.start >= hours.end {
            return Err(PlanError::Config(
                "work_hours.start must be before work_hours.end".into(),
            ));
        }
    }
    for task in &prefs.recurring_tasks {
        if task.title.trim().is_empty() {
            return Err(PlanError::Config("Recurring tasks need a title".into()));
        }
        if task.duration.is_zero() {
            return Err(PlanError::Config(format!(
                "Recurring task '{}' has a zero duration",
                task.title
            )));
        }
    }
    Ok(())
}

/// Create a default config file with all options commented out.
fn create_default_config(path: &Path) -> PlanResult<()> {
    let contents = "\
# icalplan configuration

# Name of the exported calendar:
# calendar_name = \"icalplan\"

# Where `export` writes .ics files (defaults to the current directory):
# export_dir = \"~/calendars\"

# [work_hours]
# start = \"09:00\"
# end = \"17:00\"
# days = [\"Mon\", \"Tue\", \"Wed\", \"Thu\", \"Fri\"]

# [[recurring_tasks]]
# title = \"Gym\"
# start = \"06:30\"
# duration = \"1h\"
# frequency = \"weekly\"
# days = [\"Mon\", \"Wed\", \"Fri\"]
# category = \"fitness\"
";

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| PlanError::Config(format!("Could not create config directory: {e}")))?;
    }

    std::fs::write(path, contents)
        .map_err(|e| PlanError::Config(format!("Could not write config file: {e}")))?;

    Ok(())
}
