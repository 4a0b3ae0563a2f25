//! Terminal rendering for hackdeck types.
//!
//! Extension traits that add colored output to hackdeck-core types using
//! owo_colors.

use chrono::Local;
use hackdeck_core::event::{Event, EventType};
use hackdeck_core::filter::{TypeCounts, TypeFilter};
use hackdeck_core::schedule::DayGroup;
use hackdeck_core::stats::EventStats;
use hackdeck_core::time::{format_date_range, format_duration};
use hackdeck_core::youtube::youtube_embed_url;
use owo_colors::OwoColorize;

/// Descriptions longer than this are cut in list views
const SUMMARY_CHARS: usize = 100;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventType {
    fn render(&self) -> String {
        let badge = format!("[{}]", self.label());
        match self {
            EventType::Workshop => badge.blue().to_string(),
            EventType::TechTalk => badge.magenta().to_string(),
            EventType::Activity => badge.green().to_string(),
        }
    }
}

/// One card in the grid view
impl Render for Event {
    fn render(&self) -> String {
        let mut lines = Vec::new();

        let private = if self.is_private() {
            format!(" {}", "private".yellow())
        } else {
            String::new()
        };
        lines.push(format!(
            "{} {}{} {}",
            self.event_type.render(),
            self.name.bold(),
            private,
            format!("#{}", self.id).dimmed()
        ));

        lines.push(format!(
            "   {}  {}",
            format_date_range(self.start_time, self.end_time),
            format!("({})", format_duration(self.duration_minutes())).dimmed()
        ));

        let speakers = self.speaker_names();
        if !speakers.is_empty() {
            lines.push(format!("   {} {}", "with".dimmed(), speakers.join(", ")));
        }

        if let Some(description) = &self.description {
            lines.push(format!("   {}", truncate(description, SUMMARY_CHARS).dimmed()));
        }

        lines.join("\n")
    }
}

/// A schedule day: heading plus one line per event
impl Render for DayGroup<'_> {
    fn render(&self) -> String {
        let mut lines = vec![self.label.bold().to_string()];

        for event in &self.events {
            let time = event.start().with_timezone(&Local).format("%-I:%M %p").to_string();
            lines.push(format!(
                "  {:>8}  {} {} {}",
                time,
                event.event_type.render(),
                event.name,
                format!("({})", format_duration(event.duration_minutes())).dimmed()
            ));
        }

        lines.join("\n")
    }
}

/// Filter bar with a count per type, the active one highlighted
pub fn render_type_counts(counts: &TypeCounts, active: TypeFilter) -> String {
    let mut filters = vec![TypeFilter::All];
    filters.extend(EventType::ALL.iter().map(|t| TypeFilter::Only(*t)));

    filters
        .into_iter()
        .map(|filter| {
            let label = match filter {
                TypeFilter::All => "All",
                TypeFilter::Only(t) => t.label(),
            };
            let badge = format!("{label} ({})", counts.get(filter));
            if filter == active {
                badge.bold().underline().to_string()
            } else {
                badge.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Full detail view of one event
pub fn render_detail(event: &Event, related: &[&Event], authenticated: bool) -> String {
    let mut lines = vec![
        format!("{} {}", event.event_type.render(), event.name.bold()),
        String::new(),
        format!("{:>10} {}", "When:".dimmed(), format_date_range(event.start_time, event.end_time)),
        format!("{:>10} {}", "Duration:".dimmed(), format_duration(event.duration_minutes())),
    ];

    if event.is_private() {
        lines.push(format!("{:>10} {}", "Access:".dimmed(), "Private".yellow()));
    }

    if !event.speakers.is_empty() {
        lines.push(format!("{:>10} {}", "Speakers:".dimmed(), event.speaker_names().join(", ")));
    }

    if let Some(link) = event.link_for(authenticated) {
        lines.push(format!("{:>10} {}", "Link:".dimmed(), link.cyan()));
    }

    if let Some(embed) = event.public_url().and_then(youtube_embed_url) {
        lines.push(format!("{:>10} {}", "Video:".dimmed(), embed.cyan()));
    }

    if let Some(description) = &event.description {
        lines.push(String::new());
        lines.push(description.clone());
    }

    if !related.is_empty() {
        lines.push(String::new());
        lines.push("Related events".bold().to_string());
        for other in related {
            lines.push(format!(
                "  {} {} {}",
                other.event_type.render(),
                other.name,
                format!("#{}", other.id).dimmed()
            ));
        }
    }

    lines.join("\n")
}

impl Render for EventStats {
    fn render(&self) -> String {
        let row = |label: &str, value: String| format!("  {:<18} {}", label.dimmed(), value);

        [
            "At a glance".bold().to_string(),
            row("Events", self.counts.all.to_string()),
            row("Workshops", self.counts.workshop.to_string()),
            row("Tech talks", self.counts.tech_talk.to_string()),
            row("Activities", self.counts.activity.to_string()),
            row("Days", self.days.to_string()),
            row("Total time", format_duration(self.total_minutes)),
            row("Average length", format_duration(self.average_minutes)),
            row("Speakers", self.speakers.to_string()),
            row("With recording", self.with_recording.to_string()),
            row("Public / private", format!("{} / {}", self.public, self.private)),
        ]
        .join("\n")
    }
}

/// Cut to at most `max` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max: usize) -> String {
    let text = text.trim();
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", text[..cut].trim_end()),
        None => text.to_string(),
    }
}
