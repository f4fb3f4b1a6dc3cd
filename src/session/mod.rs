//! Operator session lifecycle: restore on start, login, logout.
//!
//! [`SessionStore`] owns the durable record and a [`SessionHandle`]. The
//! handle is cloned into the gateway, which reads the bearer token from it on
//! every request, and into the services, which refuse to run without a
//! session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use validator::Validate;

use crate::domain::session::Session;
use crate::forms::login::LoginForm;
use crate::gateway::AuthGateway;
use crate::gateway::errors::GatewayError;

pub mod storage;

pub use storage::{
    FileSessionStorage, MemorySessionStorage, SESSION_STORAGE_KEY, SessionStorage,
    SessionStorageError,
};

/// Message shown when the backend does not issue a token.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
/// Message shown when the login form is incomplete.
pub const MISSING_CREDENTIALS: &str = "Email and password are required";
/// Message shown when the authentication call itself fails.
pub const LOGIN_UNAVAILABLE: &str = "Unable to reach the authentication service";
/// Message shown when the session could not be persisted.
pub const SESSION_NOT_SAVED: &str = "Unable to save the session";

/// Shared view of the current session.
#[derive(Clone, Debug, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<Session>>>,
}

impl SessionHandle {
    pub fn current(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Bearer token of the current session.
    pub fn token(&self) -> Option<String> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    fn replace(&self, session: Option<Session>) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = session;
    }
}

/// Result of a login attempt. Login never fails with an error value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn,
    Rejected { reason: String },
}

impl LoginOutcome {
    fn rejected(reason: &str) -> Self {
        LoginOutcome::Rejected {
            reason: reason.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, LoginOutcome::LoggedIn)
    }

    /// User-facing reason for a rejected login.
    pub fn error(&self) -> Option<&str> {
        match self {
            LoginOutcome::LoggedIn => None,
            LoginOutcome::Rejected { reason } => Some(reason),
        }
    }
}

/// Holds at most one active session and keeps it in sync with storage.
pub struct SessionStore<S> {
    storage: S,
    handle: SessionHandle,
    ready: AtomicBool,
    login_lock: Mutex<()>,
}

impl<S: SessionStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            handle: SessionHandle::default(),
            ready: AtomicBool::new(false),
            login_lock: Mutex::new(()),
        }
    }

    /// Handle sharing this store's current session.
    pub fn handle(&self) -> SessionHandle {
        self.handle.clone()
    }

    pub fn current(&self) -> Option<Session> {
        self.handle.current()
    }

    /// `false` until [`SessionStore::restore`] has completed.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Adopts the persisted session, if any, and marks the store ready.
    ///
    /// An unreadable record is logged and treated as absent.
    pub fn restore(&self) -> Option<Session> {
        let restored = match self.storage.load() {
            Ok(session) => session,
            Err(err) => {
                log::warn!("Failed to restore session: {err}");
                None
            }
        };

        if let Some(session) = &restored {
            log::info!("Restored session for {}", session.email);
            self.handle.replace(Some(session.clone()));
        }
        self.ready.store(true, Ordering::Release);

        restored
    }

    /// Authenticates against the backend and persists the new session.
    ///
    /// Every failure, including transport errors, is reported as
    /// [`LoginOutcome::Rejected`] and leaves the current session untouched.
    pub async fn login<A>(&self, auth: &A, email: &str, password: &str) -> LoginOutcome
    where
        A: AuthGateway + ?Sized,
    {
        let form = LoginForm::new(email, password);
        if let Err(err) = form.validate() {
            log::error!("Failed to validate login form: {err}");
            return LoginOutcome::rejected(MISSING_CREDENTIALS);
        }

        let _guard = self.login_lock.lock().await;

        let token = match auth.authenticate(form.email.trim(), &form.password).await {
            Ok(response) => response.into_token(),
            Err(GatewayError::Unauthorized) => None,
            Err(err) => {
                log::error!("Failed to authenticate: {err}");
                return LoginOutcome::rejected(LOGIN_UNAVAILABLE);
            }
        };

        let Some(token) = token else {
            log::warn!("Login rejected for {}", form.email.trim());
            return LoginOutcome::rejected(INVALID_CREDENTIALS);
        };

        let session = Session::for_operator(&form.email, token);
        if let Err(err) = self.storage.save(&session) {
            log::error!("Failed to persist session: {err}");
            return LoginOutcome::rejected(SESSION_NOT_SAVED);
        }

        log::info!("Signed in as {}", session.email);
        self.handle.replace(Some(session));
        LoginOutcome::LoggedIn
    }

    /// Drops the session from memory and storage. Storage errors are logged.
    ///
    /// Waits for an in-flight login so the two never interleave.
    pub async fn logout(&self) {
        let _guard = self.login_lock.lock().await;
        self.handle.replace(None);
        if let Err(err) = self.storage.clear() {
            log::error!("Failed to clear persisted session: {err}");
        }
    }
}
