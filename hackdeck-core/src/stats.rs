//! At-a-glance statistics over the visible catalog.

use std::collections::HashSet;

use chrono::{Local, TimeZone};

use crate::event::{Event, Permission};
use crate::filter::{TypeCounts, count_by_type};
use crate::time::at;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventStats {
    pub counts: TypeCounts,
    pub total_minutes: i64,
    /// Rounded mean duration, 0 when there are no events
    pub average_minutes: i64,
    /// Distinct speaker names
    pub speakers: usize,
    pub with_recording: usize,
    pub public: usize,
    pub private: usize,
    /// Distinct local calendar days with at least one event starting
    pub days: usize,
}

impl EventStats {
    /// Compute statistics over the events visible with the current auth state.
    pub fn compute(events: &[Event], authenticated: bool) -> Self {
        Self::compute_in(events, authenticated, &Local)
    }

    pub fn compute_in<Tz: TimeZone>(events: &[Event], authenticated: bool, tz: &Tz) -> Self {
        let visible: Vec<&Event> = events
            .iter()
            .filter(|e| e.is_visible_to(authenticated))
            .collect();

        let total_minutes: i64 = visible.iter().map(|e| e.duration_minutes()).sum();
        let average_minutes = if visible.is_empty() {
            0
        } else {
            (total_minutes as f64 / visible.len() as f64).round() as i64
        };

        let speakers: HashSet<&str> = visible
            .iter()
            .flat_map(|e| e.speakers.iter().map(|s| s.name.as_str()))
            .collect();

        let days: HashSet<_> = visible
            .iter()
            .map(|e| at(e.start_time, tz).date_naive())
            .collect();

        EventStats {
            counts: count_by_type(events, authenticated),
            total_minutes,
            average_minutes,
            speakers: speakers.len(),
            with_recording: visible.iter().filter(|e| e.public_url().is_some()).count(),
            public: visible.iter().filter(|e| e.permission == Permission::Public).count(),
            private: visible.iter().filter(|e| e.permission == Permission::Private).count(),
            days: days.len(),
        }
    }
}
