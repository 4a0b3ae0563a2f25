//! Event types as served by the events API.
//!
//! Events are owned by the API: hackdeck only reads, filters, sorts and
//! derives presentational values from them. The serde shape matches the wire
//! format exactly, and anything that does not fit is rejected at
//! deserialization time.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::time::duration_minutes;

/// A scheduled session (workshop, tech talk or activity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub event_type: EventType,
    /// Milliseconds since the Unix epoch
    pub start_time: i64,
    /// Milliseconds since the Unix epoch
    pub end_time: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub speakers: Vec<Speaker>,
    pub permission: Permission,
    #[serde(default)]
    pub public_url: Option<String>,
    #[serde(default)]
    pub private_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_events: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Speaker {
    pub name: String,
    #[serde(default)]
    pub profile_pic: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Workshop,
    TechTalk,
    Activity,
}

/// Visibility class of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    Public,
    /// Only visible once logged in
    Private,
}

impl EventType {
    pub const ALL: [EventType; 3] = [EventType::Workshop, EventType::TechTalk, EventType::Activity];

    /// Name used on the wire and in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Workshop => "workshop",
            EventType::TechTalk => "tech_talk",
            EventType::Activity => "activity",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            EventType::Workshop => "Workshop",
            EventType::TechTalk => "Tech Talk",
            EventType::Activity => "Activity",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| {
                format!("Unknown event type '{s}'. Expected one of: workshop, tech_talk, activity")
            })
    }
}

impl Event {
    pub fn is_private(&self) -> bool {
        self.permission == Permission::Private
    }

    /// Public events are always visible; private ones only when authenticated.
    pub fn is_visible_to(&self, authenticated: bool) -> bool {
        authenticated || !self.is_private()
    }

    pub fn start(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.start_time).unwrap_or_default()
    }

    pub fn end(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.end_time).unwrap_or_default()
    }

    pub fn duration_minutes(&self) -> i64 {
        duration_minutes(self.start_time, self.end_time)
    }

    /// Recording or landing page link, if any
    pub fn public_url(&self) -> Option<&str> {
        non_empty(self.public_url.as_deref())
    }

    pub fn private_url(&self) -> Option<&str> {
        non_empty(self.private_url.as_deref())
    }

    /// The link to show for the given auth state: the private link when
    /// logged in, otherwise the public one.
    pub fn link_for(&self, authenticated: bool) -> Option<&str> {
        if authenticated {
            self.private_url()
        } else {
            self.public_url()
        }
    }

    pub fn speaker_names(&self) -> Vec<&str> {
        self.speakers.iter().map(|s| s.name.as_str()).collect()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

/// The API sends `null` for empty lists on some records.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Minimal public workshop starting at `start_time`, one hour long.
    pub(crate) fn make_event(id: u64, start_time: i64) -> Event {
        Event {
            id,
            name: format!("Event {id}"),
            description: None,
            event_type: EventType::Workshop,
            start_time,
            end_time: start_time + 60 * 60 * 1000,
            speakers: vec![],
            permission: Permission::Public,
            public_url: None,
            private_url: None,
            related_events: vec![],
        }
    }

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "id": 3,
            "name": "Intro to Rust",
            "event_type": "tech_talk",
            "permission": "private",
            "start_time": 1610494200000,
            "end_time": 1610496000000,
            "description": "Ownership and borrowing",
            "speakers": [{"name": "Ferris", "profile_pic": "https://example.com/f.png"}],
            "public_url": "",
            "private_url": "https://zoom.example.com/j/1",
            "related_events": [1, 2]
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();

        assert_eq!(event.event_type, EventType::TechTalk);
        assert!(event.is_private());
        assert_eq!(event.speaker_names(), vec!["Ferris"]);
        assert_eq!(event.related_events, vec![1, 2]);
        assert_eq!(event.duration_minutes(), 30);
        // Empty strings count as no link
        assert_eq!(event.public_url(), None);
        assert_eq!(event.link_for(true), Some("https://zoom.example.com/j/1"));
    }

    #[test]
    fn test_deserialize_tolerates_missing_and_null_optionals() {
        let json = r#"{
            "id": 1,
            "name": "Opening",
            "event_type": "activity",
            "permission": "public",
            "start_time": 0,
            "end_time": 0,
            "speakers": null
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();

        assert!(event.speakers.is_empty());
        assert!(event.related_events.is_empty());
        assert_eq!(event.description, None);
    }

    #[test]
    fn test_deserialize_rejects_unknown_event_type() {
        let json = r#"{
            "id": 1, "name": "x", "event_type": "panel", "permission": "public",
            "start_time": 0, "end_time": 0
        }"#;

        assert!(serde_json::from_str::<Event>(json).is_err());
    }

    #[test]
    fn test_event_type_from_str() {
        assert_eq!("tech_talk".parse::<EventType>(), Ok(EventType::TechTalk));
        assert!("Tech Talk".parse::<EventType>().is_err());
    }

    #[test]
    fn test_visibility() {
        let mut event = make_event(1, 0);
        assert!(event.is_visible_to(false));

        event.permission = Permission::Private;
        assert!(!event.is_visible_to(false));
        assert!(event.is_visible_to(true));
    }
}
