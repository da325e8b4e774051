//! Implements a struct that holds the state of the REST server.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;

use crate::{Error, auth::BasicAuthState, ledger::Ledger, store::DocumentStore};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The in-memory ledger document and the store it is saved to.
    pub ledger: Arc<Mutex<Ledger>>,

    /// The credentials every request must present.
    pub auth: BasicAuthState,
}

impl AppState {
    /// Create a new [AppState] from the document in `store`.
    ///
    /// If `store` is empty the ledger starts with the default categories.
    ///
    /// # Errors
    /// Returns an error if the store cannot be read.
    pub fn new(
        store: impl DocumentStore + Send + 'static,
        username: &str,
        password: &str,
    ) -> Result<Self, Error> {
        let ledger = Ledger::open(store)?;

        Ok(Self {
            ledger: Arc::new(Mutex::new(ledger)),
            auth: BasicAuthState::new(username, password),
        })
    }
}

/// The state needed by handlers that read or change the ledger.
#[derive(Debug, Clone)]
pub struct LedgerState {
    /// The shared ledger.
    pub ledger: Arc<Mutex<Ledger>>,
}

impl LedgerState {
    /// Lock the ledger for a single load-mutate-save step.
    pub fn lock(&self) -> Result<MutexGuard<'_, Ledger>, Error> {
        self.ledger.lock().map_err(|error| {
            tracing::error!("could not acquire ledger lock: {error}");
            Error::LedgerLockError
        })
    }
}

impl FromRef<AppState> for LedgerState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

impl FromRef<AppState> for BasicAuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
