//! Visibility, search and sort pipeline.
//!
//! Everything here is a pure projection over the fetched events: the input
//! slice is never modified, and the same inputs always give the same output.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::event::{Event, EventType};

/// Which event types to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(EventType),
}

/// Ordering of the visible events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Earliest first
    #[default]
    Date,
    /// Alphabetical
    Name,
    /// Longest first
    Duration,
    /// Grouped by type, earliest first within a type
    Type,
}

/// Number of visible events per type, for filter badges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TypeCounts {
    pub all: usize,
    pub workshop: usize,
    pub tech_talk: usize,
    pub activity: usize,
}

impl TypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFilter::All => "all",
            TypeFilter::Only(t) => t.as_str(),
        }
    }

    pub fn matches(&self, event: &Event) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => event.event_type == *t,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TypeFilter::All),
            other => other.parse().map(TypeFilter::Only),
        }
    }
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [SortKey::Date, SortKey::Name, SortKey::Duration, SortKey::Type];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Name => "name",
            SortKey::Duration => "duration",
            SortKey::Type => "type",
        }
    }

    fn compare(&self, a: &Event, b: &Event) -> Ordering {
        match self {
            SortKey::Date => a.start_time.cmp(&b.start_time),
            SortKey::Name => compare_names(&a.name, &b.name),
            SortKey::Duration => b.duration_minutes().cmp(&a.duration_minutes()),
            SortKey::Type => a
                .event_type
                .as_str()
                .cmp(b.event_type.as_str())
                .then(a.start_time.cmp(&b.start_time)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("Unknown sort key '{s}'. Expected one of: date, name, duration, type"))
    }
}

impl TypeCounts {
    pub fn get(&self, filter: TypeFilter) -> usize {
        match filter {
            TypeFilter::All => self.all,
            TypeFilter::Only(EventType::Workshop) => self.workshop,
            TypeFilter::Only(EventType::TechTalk) => self.tech_talk,
            TypeFilter::Only(EventType::Activity) => self.activity,
        }
    }
}

/// Select the events to display, in display order.
///
/// Private events are dropped unless `authenticated`; then the type filter and
/// the (already debounced) search query narrow the set, and the result is
/// stable-sorted by `sort`. The query is matched as typed, surrounding
/// whitespace included.
pub fn select_visible_events<'a>(
    events: &'a [Event],
    authenticated: bool,
    filter: TypeFilter,
    query: &str,
    sort: SortKey,
) -> Vec<&'a Event> {
    let query = query.to_lowercase();

    let mut visible: Vec<&Event> = events
        .iter()
        .filter(|e| e.is_visible_to(authenticated))
        .filter(|e| filter.matches(e))
        .filter(|e| matches_query(e, &query))
        .collect();

    // sort_by is stable, so ties keep their API order
    visible.sort_by(|a, b| sort.compare(a, b));
    visible
}

/// Per-type tally over the events visible with the current auth state.
///
/// Ignores the type filter and search query so that badge counts stay put
/// while the user narrows the list.
pub fn count_by_type(events: &[Event], authenticated: bool) -> TypeCounts {
    events
        .iter()
        .filter(|e| e.is_visible_to(authenticated))
        .fold(TypeCounts::default(), |mut counts, e| {
            counts.all += 1;
            match e.event_type {
                EventType::Workshop => counts.workshop += 1,
                EventType::TechTalk => counts.tech_talk += 1,
                EventType::Activity => counts.activity += 1,
            }
            counts
        })
}

/// Resolve an event's related ids against the full collection.
///
/// Unknown ids are skipped, as are private events when logged out.
pub fn related_events<'a>(event: &Event, all: &'a [Event], authenticated: bool) -> Vec<&'a Event> {
    event
        .related_events
        .iter()
        .filter_map(|id| all.iter().find(|e| e.id == *id))
        .filter(|e| e.is_visible_to(authenticated))
        .collect()
}

/// Case-insensitive substring match on name, description and speaker names.
/// `query` must already be lowercased; an empty query matches everything.
fn matches_query(event: &Event, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let contains = |s: &str| s.to_lowercase().contains(query);

    contains(&event.name)
        || event.description.as_deref().is_some_and(contains)
        || event.speakers.iter().any(|s| contains(&s.name))
}

/// Alphabetical ordering that ignores case first, so "apple" sorts next to
/// "Apple" rather than after "Zebra".
///
/// Not locale-aware: lowercased names compare by code point, so accented
/// initials sort after unaccented ones ("Eve" before "Émile").
fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::tests::make_event;
    use crate::event::{Permission, Speaker};
    use proptest::prelude::*;

    const HOUR: i64 = 60 * 60 * 1000;

    fn ids(events: &[&Event]) -> Vec<u64> {
        events.iter().map(|e| e.id).collect()
    }

    fn sample_events() -> Vec<Event> {
        let mut rust = make_event(1, 3 * HOUR);
        rust.name = "Intro to Rust".to_string();
        rust.event_type = EventType::TechTalk;
        rust.speakers = vec![Speaker {
            name: "Ferris Crab".to_string(),
            profile_pic: None,
        }];

        let mut hardware = make_event(2, HOUR);
        hardware.name = "hardware hacking".to_string();
        hardware.end_time = hardware.start_time + 3 * HOUR;
        hardware.description = Some("Solder your own badge".to_string());

        let mut yoga = make_event(3, 2 * HOUR);
        yoga.name = "Yoga".to_string();
        yoga.event_type = EventType::Activity;
        yoga.permission = Permission::Private;

        let mut api = make_event(4, 0);
        api.name = "API Design".to_string();
        api.event_type = EventType::TechTalk;
        api.end_time = api.start_time + 30 * 60 * 1000;

        vec![rust, hardware, yoga, api]
    }

    #[test]
    fn test_private_event_hidden_when_logged_out() {
        let mut private = make_event(1, HOUR);
        private.permission = Permission::Private;
        let mut public = make_event(2, 0);
        public.event_type = EventType::TechTalk;
        let events = vec![private, public];

        let visible = select_visible_events(&events, false, TypeFilter::All, "", SortKey::Date);

        assert_eq!(ids(&visible), vec![2]);
    }

    #[test]
    fn test_private_event_shown_when_logged_in() {
        let events = sample_events();

        let visible = select_visible_events(&events, true, TypeFilter::All, "", SortKey::Date);

        assert_eq!(ids(&visible), vec![4, 2, 3, 1]);
    }

    #[test]
    fn test_type_filter() {
        let events = sample_events();

        let visible = select_visible_events(
            &events,
            true,
            TypeFilter::Only(EventType::TechTalk),
            "",
            SortKey::Date,
        );

        assert_eq!(ids(&visible), vec![4, 1]);
    }

    #[test]
    fn test_search_matches_name_description_and_speakers() {
        let events = sample_events();
        let search = |q: &str| ids(&select_visible_events(&events, true, TypeFilter::All, q, SortKey::Date));

        assert_eq!(search("RUST"), vec![1]);
        assert_eq!(search("badge"), vec![2]);
        assert_eq!(search("ferris"), vec![1]);
        assert_eq!(search("nothing matches this"), Vec::<u64>::new());
        assert_eq!(search(""), vec![4, 2, 3, 1]);
        assert_eq!(search("   "), Vec::<u64>::new());
    }

    #[test]
    fn test_search_keeps_surrounding_whitespace() {
        let mut intro = make_event(1, 0);
        intro.name = "Intro to Rust".to_string();
        let mut workshop = make_event(2, HOUR);
        workshop.name = "Rust Workshop".to_string();
        let events = vec![intro, workshop];

        let visible = select_visible_events(&events, false, TypeFilter::All, "rust ", SortKey::Date);

        assert_eq!(ids(&visible), vec![2]);
    }

    #[test]
    fn test_date_and_type_ties_keep_input_order() {
        let mut events: Vec<Event> = [5, 2, 8, 1].into_iter().map(|id| make_event(id, HOUR)).collect();
        events[1].event_type = EventType::Activity;
        events[3].event_type = EventType::Activity;

        let by_date = select_visible_events(&events, false, TypeFilter::All, "", SortKey::Date);
        assert_eq!(ids(&by_date), vec![5, 2, 8, 1]);

        let by_type = select_visible_events(&events, false, TypeFilter::All, "", SortKey::Type);
        assert_eq!(ids(&by_type), vec![2, 1, 5, 8]);
    }

    #[test]
    fn test_sort_by_name_is_not_locale_aware() {
        let mut emile = make_event(1, 0);
        emile.name = "Émile".to_string();
        let mut eve = make_event(2, HOUR);
        eve.name = "Eve".to_string();
        let events = vec![emile, eve];

        let visible = select_visible_events(&events, false, TypeFilter::All, "", SortKey::Name);

        assert_eq!(ids(&visible), vec![2, 1]);
    }

    #[test]
    fn test_sort_by_name_ignores_case() {
        let events = sample_events();

        let visible = select_visible_events(&events, true, TypeFilter::All, "", SortKey::Name);

        assert_eq!(ids(&visible), vec![4, 2, 1, 3]);
    }

    #[test]
    fn test_sort_by_duration_longest_first_stable() {
        let events = sample_events();

        let visible = select_visible_events(&events, true, TypeFilter::All, "", SortKey::Duration);

        // 1 and 3 are both one hour long and keep their input order
        assert_eq!(ids(&visible), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_sort_by_type_then_start() {
        let events = sample_events();

        let visible = select_visible_events(&events, true, TypeFilter::All, "", SortKey::Type);

        // activity < tech_talk < workshop
        assert_eq!(ids(&visible), vec![3, 4, 1, 2]);
    }

    #[test]
    fn test_counts_ignore_filter_and_search() {
        let events = sample_events();

        let logged_out = count_by_type(&events, false);
        assert_eq!(
            logged_out,
            TypeCounts {
                all: 3,
                workshop: 1,
                tech_talk: 2,
                activity: 0
            }
        );

        let logged_in = count_by_type(&events, true);
        assert_eq!(logged_in.all, 4);
        assert_eq!(logged_in.get(TypeFilter::Only(EventType::Activity)), 1);
    }

    #[test]
    fn test_related_events_resolution() {
        let events = sample_events();
        let mut event = make_event(10, 0);
        event.related_events = vec![3, 99, 1];

        assert_eq!(ids(&related_events(&event, &events, false)), vec![1]);
        assert_eq!(ids(&related_events(&event, &events, true)), vec![3, 1]);
    }

    #[test]
    fn test_filter_and_sort_key_parsing() {
        assert_eq!("all".parse::<TypeFilter>(), Ok(TypeFilter::All));
        assert_eq!(
            "workshop".parse::<TypeFilter>(),
            Ok(TypeFilter::Only(EventType::Workshop))
        );
        assert!("panel".parse::<TypeFilter>().is_err());

        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>(), Ok(key));
        }
    }

    fn arb_event() -> impl Strategy<Value = Event> {
        (
            0u64..20,
            "[a-zA-Z ]{0,8}",
            prop_oneof![
                Just(EventType::Workshop),
                Just(EventType::TechTalk),
                Just(EventType::Activity)
            ],
            any::<bool>(),
            0i64..10 * HOUR,
            0i64..5 * HOUR,
        )
            .prop_map(|(id, name, event_type, private, start, length)| {
                let mut event = make_event(id, start);
                event.name = name;
                event.event_type = event_type;
                event.end_time = start + length;
                if private {
                    event.permission = Permission::Private;
                }
                event
            })
    }

    fn arb_filter() -> impl Strategy<Value = TypeFilter> {
        prop_oneof![
            Just(TypeFilter::All),
            Just(TypeFilter::Only(EventType::Workshop)),
            Just(TypeFilter::Only(EventType::TechTalk)),
            Just(TypeFilter::Only(EventType::Activity)),
        ]
    }

    fn arb_sort() -> impl Strategy<Value = SortKey> {
        prop_oneof![
            Just(SortKey::Date),
            Just(SortKey::Name),
            Just(SortKey::Duration),
            Just(SortKey::Type),
        ]
    }

    proptest! {
        #[test]
        fn prop_output_is_gated_sorted_subset(
            events in prop::collection::vec(arb_event(), 0..30),
            authenticated in any::<bool>(),
            filter in arb_filter(),
            query in "[a-z]{0,2}",
            sort in arb_sort(),
        ) {
            let visible = select_visible_events(&events, authenticated, filter, &query, sort);

            for e in &visible {
                prop_assert!(events.iter().any(|x| std::ptr::eq(x, *e)));
                prop_assert!(authenticated || !e.is_private());
                prop_assert!(filter.matches(e));
            }
            for pair in visible.windows(2) {
                prop_assert_ne!(sort.compare(pair[0], pair[1]), Ordering::Greater);
            }
        }

        #[test]
        fn prop_selection_is_idempotent(
            events in prop::collection::vec(arb_event(), 0..30),
            authenticated in any::<bool>(),
            filter in arb_filter(),
            query in "[a-z]{0,2}",
            sort in arb_sort(),
        ) {
            let first = select_visible_events(&events, authenticated, filter, &query, sort);
            let second = select_visible_events(&events, authenticated, filter, &query, sort);

            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_counts_are_consistent(
            events in prop::collection::vec(arb_event(), 0..30),
            authenticated in any::<bool>(),
        ) {
            let counts = count_by_type(&events, authenticated);
            let gated = events.iter().filter(|e| e.is_visible_to(authenticated)).count();

            prop_assert_eq!(counts.all, gated);
            prop_assert_eq!(counts.workshop + counts.tech_talk + counts.activity, counts.all);
        }
    }
}
