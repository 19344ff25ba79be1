//! Initial load of the user collection.
//!
//! A [`UserSource`] knows how to produce the records (the HTTP implementation
//! talks to the mock REST endpoint). The [`Loader`] makes sure that happens at
//! most once per session: the fetch runs on its own worker thread and the
//! outcome comes back over a channel that the UI thread polls, so the cache is
//! never touched off the UI thread.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::FetchError;
use crate::model::{RemoteUser, User};

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";

type FetchOutcome = Result<Vec<User>, FetchError>;

/// Something that can produce the initial set of users.
pub trait UserSource: Send + 'static {
    fn fetch_users(&self) -> Result<Vec<User>, FetchError>;

    /// Short label used in logs.
    fn describe(&self) -> String {
        "user source".to_string()
    }
}

/// GET a JSON array of users from a fixed URL.
pub struct HttpUserSource {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpUserSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("userdeck/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl UserSource for HttpUserSource {
    fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        debug!(url = %self.url, "GET");
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        let body = response.text()?;
        let remote: Vec<RemoteUser> = serde_json::from_str(&body)?;
        Ok(remote.into_iter().map(User::from).collect())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Where the one-off fetch stands. `Loaded` and `Failed` are final.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    NotStarted,
    InFlight,
    Loaded,
    Failed(String),
}

pub struct Loader {
    state: LoadState,
    source: Option<Box<dyn UserSource>>,
    rx: Option<Receiver<FetchOutcome>>,
}

impl Loader {
    pub fn new(source: impl UserSource) -> Self {
        Self {
            state: LoadState::NotStarted,
            source: Some(Box::new(source)),
            rx: None,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Kick off the fetch. Only the first call does anything.
    pub fn start(&mut self) -> bool {
        if self.state != LoadState::NotStarted {
            debug!(state = ?self.state, "fetch already started; ignoring");
            return false;
        }
        let Some(source) = self.source.take() else {
            return false;
        };
        info!(source = %source.describe(), "fetching users");

        let (tx, rx) = mpsc::channel();
        let spawned = thread::Builder::new()
            .name("user-fetch".to_string())
            .spawn(move || {
                let outcome = source.fetch_users();
                // receiver may already be gone if the UI exited
                let _ = tx.send(outcome);
            });
        match spawned {
            Ok(_) => {
                self.rx = Some(rx);
                self.state = LoadState::InFlight;
            }
            Err(e) => {
                warn!(error = %e, "could not spawn fetch worker");
                self.state = LoadState::Failed(FetchError::Transport(e.to_string()).to_string());
            }
        }
        true
    }

    /// Check for a finished fetch without blocking. Returns the records once, on success.
    pub fn poll(&mut self) -> Option<Vec<User>> {
        let outcome = match self.rx.as_ref()?.try_recv() {
            Ok(outcome) => outcome,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(FetchError::WorkerGone),
        };
        self.finish(outcome)
    }

    /// Block until the in-flight fetch finishes.
    pub fn wait(&mut self) -> Option<Vec<User>> {
        let outcome = match self.rx.as_ref()?.recv() {
            Ok(outcome) => outcome,
            Err(_) => Err(FetchError::WorkerGone),
        };
        self.finish(outcome)
    }

    fn finish(&mut self, outcome: FetchOutcome) -> Option<Vec<User>> {
        self.rx = None;
        match outcome {
            Ok(users) => {
                info!(count = users.len(), "users loaded");
                self.state = LoadState::Loaded;
                Some(users)
            }
            Err(e) => {
                warn!(error = %e, "user fetch failed");
                self.state = LoadState::Failed(e.to_string());
                None
            }
        }
    }
}
