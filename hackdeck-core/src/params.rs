//! Shareable list state as a URL query string.
//!
//! Parameters equal to their default are left out, so the default view is
//! the empty string.

use std::fmt;
use std::str::FromStr;

use url::form_urlencoded;

use crate::filter::{SortKey, TypeFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    /// Grouped by day
    Schedule,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::Schedule => "schedule",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(ViewMode::Grid),
            "schedule" => Ok(ViewMode::Schedule),
            other => Err(format!("Unknown view '{other}'. Expected grid or schedule")),
        }
    }
}

/// Everything that determines what the event list shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListParams {
    pub query: String,
    pub filter: TypeFilter,
    pub sort: SortKey,
    pub view: ViewMode,
}

impl ListParams {
    /// Parse a query string such as `q=rust&type=workshop`. A leading `?` is
    /// allowed. Unknown keys are ignored and unrecognized values fall back to
    /// the default.
    pub fn parse(query_string: &str) -> Self {
        let query_string = query_string.strip_prefix('?').unwrap_or(query_string);
        let mut params = ListParams::default();

        for (key, value) in form_urlencoded::parse(query_string.as_bytes()) {
            match key.as_ref() {
                "q" => params.query = value.into_owned(),
                "type" => params.filter = value.parse().unwrap_or_default(),
                "sort" => params.sort = value.parse().unwrap_or_default(),
                "view" => params.view = value.parse().unwrap_or_default(),
                _ => {}
            }
        }

        params
    }

    /// Encode without the leading `?`; empty for the default view.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());

        if !self.query.is_empty() {
            serializer.append_pair("q", &self.query);
        }
        if self.filter != TypeFilter::default() {
            serializer.append_pair("type", self.filter.as_str());
        }
        if self.sort != SortKey::default() {
            serializer.append_pair("sort", self.sort.as_str());
        }
        if self.view != ViewMode::default() {
            serializer.append_pair("view", self.view.as_str());
        }

        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;

    #[test]
    fn test_defaults_are_omitted() {
        assert_eq!(ListParams::default().to_query_string(), "");

        let params = ListParams {
            sort: SortKey::Name,
            ..Default::default()
        };
        assert_eq!(params.to_query_string(), "sort=name");
    }

    #[test]
    fn test_encode_all_params() {
        let params = ListParams {
            query: "rust & wasm".to_string(),
            filter: TypeFilter::Only(EventType::TechTalk),
            sort: SortKey::Duration,
            view: ViewMode::Schedule,
        };

        let encoded = params.to_query_string();

        assert_eq!(encoded, "q=rust+%26+wasm&type=tech_talk&sort=duration&view=schedule");
        assert_eq!(ListParams::parse(&encoded), params);
    }

    #[test]
    fn test_parse_is_lenient() {
        let params = ListParams::parse("?type=panel&sort=name&view=list&utm_source=x");

        assert_eq!(params.filter, TypeFilter::All);
        assert_eq!(params.sort, SortKey::Name);
        assert_eq!(params.view, ViewMode::Grid);
        assert_eq!(ListParams::parse(""), ListParams::default());
    }
}
