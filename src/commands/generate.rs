use std::path::Path;

use anyhow::Result;
use owo_colors::OwoColorize;

use super::create_spinner;
use crate::render::Render;
use crate::session;
use icalplan_core::constraints::Constraints;
use icalplan_core::date_range::DateRange;
use icalplan_core::event::ScheduleCategory;
use icalplan_core::generator::protocol::DraftRequest;
use icalplan_core::generator::Generator;
use icalplan_core::preferences::Preferences;
use icalplan_core::resolver::resolve;

pub async fn run(
    file: &Path,
    prefs: &Preferences,
    prompt: String,
    categories: Vec<String>,
    generator: &str,
    range: DateRange,
) -> Result<()> {
    let mut store = session::load(file)?;

    let categories: Vec<ScheduleCategory> = categories
        .iter()
        .map(|raw| ScheduleCategory::from_label(raw))
        .collect();

    let generator = Generator::from_name(generator);
    let request = DraftRequest {
        prompt,
        categories,
        work_hours: prefs.work_hours.clone(),
        recurring_tasks: prefs.recurring_tasks.clone(),
        range_start: range.from,
        range_end: range.to,
    };

    let spinner = create_spinner(format!("Drafting with {}", generator.name()));
    let result = generator.generate(request).await;
    spinner.finish_and_clear();
    let candidates = result?;

    let drafted = candidates.len();
    let constraints = Constraints::from_preferences(prefs);
    let resolution = resolve(candidates, &store, &constraints, &range);

    let mut planned = 0;
    for event in &resolution.accepted {
        match store.add(event.clone()) {
            Ok(()) => planned += 1,
            Err(e) => println!("   {}", e.to_string().red()),
        }
    }
    session::save(file, &store, &prefs.calendar_name)?;

    println!("{}", resolution.render());
    println!(
        "\nPlanned {} of {} drafted {}",
        planned,
        drafted,
        if drafted == 1 { "event" } else { "events" }
    );

    Ok(())
}
