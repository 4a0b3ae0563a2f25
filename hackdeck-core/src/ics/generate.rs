//! ICS file generation.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component};

use crate::event::Event;

const PRODID: &str = "-//Hackdeck//Events//EN";

/// Generate .ics content for a single event.
///
/// Times are written in UTC. The description combines the event description,
/// its speakers and the public recording link, separated by blank lines.
pub fn generate_ics(event: &Event) -> String {
    let mut cal = Calendar::new();

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&format!("event-{}@hackdeck", event.id));
    ics_event.summary(&event.name);

    // DTSTAMP is required by RFC 5545; derive it from the event so the output
    // only depends on its input
    ics_event.add_property("DTSTAMP", utc_stamp(event.start()));
    ics_event.add_property("DTSTART", utc_stamp(event.start()));
    ics_event.add_property("DTEND", utc_stamp(event.end()));

    ics_event.description(&description_for(event));

    let ics_event = ics_event.done();
    cal.push(ics_event);
    let cal = cal.done();

    strip_ics_bloat(&cal.to_string())
}

/// Download file name for an event: non-alphanumerics become underscores.
pub fn ics_filename(event: &Event) -> String {
    let stem: String = event
        .name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    format!("{stem}.ics")
}

fn utc_stamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Newlines here are escaped to a literal `\n` by the text encoder.
fn description_for(event: &Event) -> String {
    let speakers = event.speaker_names().join(", ");

    let parts = [
        event.description.clone().unwrap_or_default(),
        if speakers.is_empty() {
            String::new()
        } else {
            format!("Speaker(s): {speakers}")
        },
        event
            .public_url()
            .map(|url| format!("Recording: {url}"))
            .unwrap_or_default(),
    ];

    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
