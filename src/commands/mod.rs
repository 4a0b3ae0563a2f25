pub mod auth;
pub mod browse;
pub mod export;
pub mod list;
pub mod show;
pub mod stats;

use std::sync::Arc;

use anyhow::{Context as _, Result};
use hackdeck_core::client::{ClientOptions, EventClient};
use hackdeck_core::config::HackdeckConfig;
use hackdeck_core::event::Event;
use hackdeck_core::session::{FileSessionStore, Session};
use tracing::debug;

use crate::utils::tui::create_spinner;

/// Everything a command needs: config, API client and the login state.
pub struct Context {
    pub config: HackdeckConfig,
    pub client: EventClient,
    pub session: Session<FileSessionStore>,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config = HackdeckConfig::load().context("Failed to load configuration")?;
        debug!(api = %config.api_base_url, "Loaded configuration");

        let client = EventClient::new(ClientOptions::from(&config))?;

        let store = FileSessionStore::for_terminal(config.session_dir().as_deref());
        debug!(path = %store.path().display(), "Session store");
        let session = Session::restore(store);

        Ok(Context {
            config,
            client,
            session,
        })
    }

    pub fn authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Fetch the full event list behind a spinner.
    pub async fn events(&mut self) -> Result<Arc<Vec<Event>>> {
        let spinner = create_spinner("Loading events...".to_string());
        let result = self.client.events().await;
        spinner.finish_and_clear();

        Ok(result.context("Failed to load events")?)
    }

    /// Fetch one event behind a spinner.
    pub async fn event(&mut self, id: u64) -> Result<Event> {
        let spinner = create_spinner(format!("Loading event {id}..."));
        let result = self.client.event(id).await;
        spinner.finish_and_clear();

        Ok(result?)
    }
}
