//! Demo login state.
//!
//! A two-state machine gating private events. The state lives for one
//! terminal session: it is written to a small JSON document keyed by the
//! parent shell, so it survives between commands but not across terminals.
//!
//! This is a demo gate with a hardcoded credential pair, not an auth system.

use std::cell::RefCell;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{DEMO_PASSWORD, DEMO_USERNAME, SESSION_KEY};
use crate::error::{AuthError, HackdeckError, HackdeckResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthState {
    #[default]
    LoggedOut,
    LoggedIn,
}

/// Where the auth document is kept between commands
pub trait SessionStore {
    /// Raw stored document, `None` if nothing has been stored yet.
    fn load(&self) -> HackdeckResult<Option<String>>;
    fn save(&self, contents: &str) -> HackdeckResult<()>;
}

/// Owns the auth state. Only `login` and `logout` change it.
pub struct Session<S: SessionStore> {
    state: AuthState,
    store: S,
}

/// Persisted layout: `{"isAuthenticated": true}`
#[derive(Serialize, Deserialize)]
struct StoredAuth {
    #[serde(rename = "isAuthenticated")]
    is_authenticated: bool,
}

impl<S: SessionStore> Session<S> {
    /// Rehydrate from the store. Anything unreadable counts as logged out.
    pub fn restore(store: S) -> Self {
        let state = match store.load() {
            Ok(Some(contents)) => parse_state(&contents),
            Ok(None) => AuthState::LoggedOut,
            Err(e) => {
                debug!(error = %e, "Session store unreadable, starting logged out");
                AuthState::LoggedOut
            }
        };

        Session { state, store }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state == AuthState::LoggedIn
    }

    /// Log in with the demo credentials.
    ///
    /// A mismatch leaves the state untouched and reports a single generic
    /// error regardless of which field was wrong.
    pub fn login(&mut self, username: &str, password: &str) -> Result<(), AuthError> {
        if username != DEMO_USERNAME || password != DEMO_PASSWORD {
            debug!("Rejected login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        self.transition(AuthState::LoggedIn);
        Ok(())
    }

    pub fn logout(&mut self) {
        self.transition(AuthState::LoggedOut);
    }

    fn transition(&mut self, state: AuthState) {
        self.state = state;

        let doc = StoredAuth {
            is_authenticated: state == AuthState::LoggedIn,
        };

        // The in-memory state stays authoritative if the write fails
        let result = serde_json::to_string(&doc)
            .map_err(|e| HackdeckError::Session(e.to_string()))
            .and_then(|contents| self.store.save(&contents));

        if let Err(e) = result {
            warn!(error = %e, "Could not persist session state");
        }
    }
}

fn parse_state(contents: &str) -> AuthState {
    match serde_json::from_str::<StoredAuth>(contents) {
        Ok(StoredAuth {
            is_authenticated: true,
        }) => AuthState::LoggedIn,
        Ok(_) => AuthState::LoggedOut,
        Err(e) => {
            debug!(error = %e, "Ignoring malformed session document");
            AuthState::LoggedOut
        }
    }
}

/// Session document stored as a file
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: PathBuf) -> Self {
        FileSessionStore { path }
    }

    /// Store scoped to the current terminal session, inside `dir` or the OS
    /// temp directory.
    pub fn for_terminal(dir: Option<&Path>) -> Self {
        let dir = dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| std::env::temp_dir().join("hackdeck"));

        Self::new(dir.join(format!("{}-{}.json", SESSION_KEY, terminal_key())))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> HackdeckResult<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, contents: &str) -> HackdeckResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// The parent process is the shell that launched us, which stands in for a
/// browser tab.
#[cfg(unix)]
fn terminal_key() -> String {
    std::os::unix::process::parent_id().to_string()
}

#[cfg(not(unix))]
fn terminal_key() -> String {
    "default".to_string()
}

/// In-memory store, for tests and one-shot embedding
#[derive(Default)]
pub struct MemorySessionStore {
    contents: RefCell<Option<String>>,
}

impl MemorySessionStore {
    pub fn with_contents(contents: &str) -> Self {
        MemorySessionStore {
            contents: RefCell::new(Some(contents.to_string())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> HackdeckResult<Option<String>> {
        Ok(self.contents.borrow().clone())
    }

    fn save(&self, contents: &str) -> HackdeckResult<()> {
        *self.contents.borrow_mut() = Some(contents.to_string());
        Ok(())
    }
}

impl<T: SessionStore + ?Sized> SessionStore for &T {
    fn load(&self) -> HackdeckResult<Option<String>> {
        (**self).load()
    }

    fn save(&self, contents: &str) -> HackdeckResult<()> {
        (**self).save(contents)
    }
}
