//! Terminal rendering for plan types.
//!
//! Extension traits that add colored output to icalplan-core types
//! using owo_colors.

use icalplan_core::event::CalendarEvent;
use icalplan_core::resolver::Resolution;
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for CalendarEvent {
    fn render(&self) -> String {
        let mut summary = self.title.clone();
        if let Some(category) = &self.category {
            summary.push_str(&format!(" [{}]", category.label()));
        }
        format!("{} {}", summary, render_event_time(self).dimmed())
    }
}

impl Render for Resolution {
    fn render(&self) -> String {
        if self.accepted.is_empty() && self.rejected.is_empty() {
            return "   Nothing to schedule".dimmed().to_string();
        }

        let mut lines = Vec::new();
        for event in &self.accepted {
            lines.push(format!("   {} {}", "+".green(), event.render()));
        }
        for rejected in &self.rejected {
            let reason = format!("({})", rejected.reason);
            lines.push(format!(
                "   {} {} {}",
                "-".red(),
                rejected.candidate.render(),
                reason.dimmed()
            ));
        }
        lines.join("\n")
    }
}

fn render_event_time(event: &CalendarEvent) -> String {
    if event.is_all_day {
        format!("{} (all day)", event.start.format("%Y-%m-%d"))
    } else {
        format!(
            "{} {} - {}",
            event.start.format("%Y-%m-%d"),
            event.start.format("%H:%M"),
            event.end.format("%H:%M")
        )
    }
}
