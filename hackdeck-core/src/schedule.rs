//! Grouping events into calendar days for the schedule view.

use chrono::{Local, TimeZone};

use crate::event::Event;
use crate::time::at;

/// One calendar day of the schedule
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup<'a> {
    /// e.g. "Friday, Sep 13, 2024"
    pub label: String,
    pub events: Vec<&'a Event>,
}

/// Group events by local calendar day.
///
/// Days appear in the order they are first encountered, and events keep their
/// input order within a day. Sort by date first for a chronological schedule.
pub fn group_by_day(events: &[Event]) -> Vec<DayGroup<'_>> {
    group_by_day_in(events.iter(), &Local)
}

/// Like [`group_by_day`], in an explicit time zone.
pub fn group_by_day_in<'a, Tz>(events: impl IntoIterator<Item = &'a Event>, tz: &Tz) -> Vec<DayGroup<'a>>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let mut groups: Vec<DayGroup<'a>> = Vec::new();

    for event in events {
        let label = at(event.start_time, tz).format("%A, %b %-d, %Y").to_string();

        match groups.iter_mut().find(|g| g.label == label) {
            Some(group) => group.events.push(event),
            None => groups.push(DayGroup {
                label,
                events: vec![event],
            }),
        }
    }

    groups
}
