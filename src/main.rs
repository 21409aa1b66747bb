mod commands;
mod render;
mod session;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use icalplan_core::config::load_preferences;
use icalplan_core::date_range::DateRange;

#[derive(Parser)]
#[command(name = "icalplan")]
#[command(about = "Plan your weeks from a prompt and keep the result as an .ics calendar")]
struct Cli {
    /// The plan file to operate on
    #[arg(long, global = true, default_value = "plan.ics")]
    file: PathBuf,

    /// Use this config file instead of ~/.config/icalplan/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draft events from a prompt and schedule the ones that fit
    Generate {
        prompt: String,

        /// Only draft events in these categories (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        categories: Vec<String>,

        /// Generator to draft with (resolved as icalplan-generator-<name>)
        #[arg(short, long, default_value = "openai")]
        generator: String,

        /// Plan from this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Plan until this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Add a single event by hand
    Add {
        title: Option<String>,

        /// Start date/time (e.g., "2025-03-20T15:00", or "2025-03-20" with --all-day)
        #[arg(short, long)]
        start: Option<String>,

        /// End date/time, same format as --start
        #[arg(short, long)]
        end: Option<String>,

        /// Length of the event (e.g., "1h 30m"), ignored when --end is given
        #[arg(short, long)]
        duration: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        /// Schedule category (e.g., "fitness", "social")
        #[arg(long)]
        category: Option<String>,

        /// Create an all-day event
        #[arg(long)]
        all_day: bool,
    },
    /// Remove an event by id
    Remove { id: String },
    /// List the planned events
    List,
    /// Write the plan to the export directory under its calendar name
    Export {
        /// Write here instead of the configured export_dir
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let prefs = load_preferences(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            prompt,
            categories,
            generator,
            from,
            to,
        } => {
            let range = DateRange::from_args(from.as_deref(), to.as_deref())?;
            commands::generate::run(&cli.file, &prefs, prompt, categories, &generator, range).await
        }
        Commands::Add {
            title,
            start,
            end,
            duration,
            location,
            category,
            all_day,
        } => commands::add::run(
            &cli.file, &prefs, title, start, end, duration, location, category, all_day,
        ),
        Commands::Remove { id } => commands::remove::run(&cli.file, &prefs, &id),
        Commands::List => commands::list::run(&cli.file),
        Commands::Export { output } => commands::export::run(&cli.file, &prefs, output),
    }
}
