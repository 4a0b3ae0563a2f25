//! HTTP client for the events API.
//!
//! Results are cached in memory for the staleness window, so repeated reads
//! within one process (e.g. `hackdeck browse`) don't refetch. Nothing is
//! written to disk.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::config::HackdeckConfig;
use crate::error::{HackdeckError, HackdeckResult};
use crate::event::Event;

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub base_url: String,
    pub stale_after: Duration,
    /// Extra attempts after a transient failure
    pub retries: u32,
    pub retry_delay: Duration,
    pub timeout: Duration,
}

impl From<&HackdeckConfig> for ClientOptions {
    fn from(config: &HackdeckConfig) -> Self {
        ClientOptions {
            base_url: config.api_base_url.clone(),
            stale_after: config.stale_after(),
            retries: config.retries,
            retry_delay: config.retry_delay(),
            timeout: config.request_timeout(),
        }
    }
}

struct Cached<T> {
    value: T,
    fetched_at: Instant,
}

impl<T> Cached<T> {
    fn new(value: T) -> Self {
        Cached {
            value,
            fetched_at: Instant::now(),
        }
    }

    fn is_fresh(&self, stale_after: Duration) -> bool {
        self.fetched_at.elapsed() < stale_after
    }
}

/// Client for `GET /events` and `GET /events/:id`
pub struct EventClient {
    http: reqwest::Client,
    options: ClientOptions,
    all_events: Option<Cached<Arc<Vec<Event>>>>,
    by_id: HashMap<u64, Cached<Event>>,
}

impl EventClient {
    pub fn new(options: ClientOptions) -> HackdeckResult<Self> {
        let http = reqwest::Client::builder().timeout(options.timeout).build()?;

        Ok(EventClient {
            http,
            options,
            all_events: None,
            by_id: HashMap::new(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.options.base_url.trim_end_matches('/'), path)
    }

    /// GET /events
    pub async fn events(&mut self) -> HackdeckResult<Arc<Vec<Event>>> {
        if let Some(cached) = &self.all_events
            && cached.is_fresh(self.options.stale_after)
        {
            debug!("Serving event list from cache");
            return Ok(Arc::clone(&cached.value));
        }

        let events: Arc<Vec<Event>> = Arc::new(self.get_json(&self.url("events")).await?);
        debug!(count = events.len(), "Fetched events");

        self.all_events = Some(Cached::new(Arc::clone(&events)));
        Ok(events)
    }

    /// GET /events/:id
    ///
    /// A missing id is reported as [`HackdeckError::NotFound`], separate from
    /// other fetch failures.
    pub async fn event(&mut self, id: u64) -> HackdeckResult<Event> {
        if let Some(cached) = self.by_id.get(&id)
            && cached.is_fresh(self.options.stale_after)
        {
            debug!(id, "Serving event from cache");
            return Ok(cached.value.clone());
        }

        let event: Event = match self.get_json(&self.url(&format!("events/{id}"))).await {
            Ok(event) => event,
            Err(HackdeckError::Fetch { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                return Err(HackdeckError::NotFound(id));
            }
            Err(e) => return Err(e),
        };

        self.by_id.insert(id, Cached::new(event.clone()));
        Ok(event)
    }

    /// Drop cached results so the next read refetches.
    pub fn invalidate(&mut self) {
        self.all_events = None;
        self.by_id.clear();
    }

    /// GET with retries on transient failures
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> HackdeckResult<T> {
        let mut attempt = 0;

        loop {
            match self.try_get_json(url).await {
                Err(e) if e.is_transient() && attempt < self.options.retries => {
                    attempt += 1;
                    warn!(url, attempt, error = %e, "Request failed, retrying");
                    tokio::time::sleep(self.options.retry_delay).await;
                }
                result => return result,
            }
        }
    }

    async fn try_get_json<T: DeserializeOwned>(&self, url: &str) -> HackdeckResult<T> {
        debug!(url, "GET");
        let resp = self.http.get(url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(HackdeckError::Fetch {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = resp.bytes().await?;
        serde_json::from_slice(&body).map_err(|source| HackdeckError::MalformedPayload {
            url: url.to_string(),
            source,
        })
    }
}
