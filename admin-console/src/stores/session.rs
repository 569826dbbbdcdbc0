//! In-memory session mirrored to durable storage.
//!
//! Token and user are always written and cleared together. All mutations
//! happen inside a single write lock so concurrent tasks observe either the
//! old or the new session, never a mix.

use crate::models::SessionUser;
use crate::services::storage::DurableStorage;
use secrecy::{ExposeSecret, Secret};
use std::sync::{Arc, PoisonError, RwLock};

pub const TOKEN_KEY: &str = "mxcsec_token";
pub const USER_KEY: &str = "mxcsec_user";

#[derive(Default)]
struct Session {
    token: Option<Secret<String>>,
    user: Option<SessionUser>,
}

impl Session {
    fn holds(&self, token: &str) -> bool {
        self.token
            .as_ref()
            .is_some_and(|held| held.expose_secret() == token)
    }
}

pub struct SessionState {
    storage: Arc<dyn DurableStorage>,
    inner: RwLock<Session>,
}

impl SessionState {
    /// Build the session from whatever durable storage currently holds.
    pub fn hydrate(storage: Arc<dyn DurableStorage>) -> Self {
        let token = storage
            .get_item(TOKEN_KEY)
            .filter(|t| !t.is_empty())
            .map(Secret::new);

        let user = match (token.is_some(), storage.get_item(USER_KEY)) {
            (true, Some(raw)) => match serde_json::from_str::<SessionUser>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "Discarding unreadable persisted user");
                    None
                }
            },
            (false, Some(_)) => {
                tracing::warn!("Discarding persisted user without a token");
                if let Err(e) = storage.remove_item(USER_KEY) {
                    tracing::warn!(error = %e, "Failed to remove orphaned user");
                }
                None
            }
            (_, None) => None,
        };

        tracing::debug!(authenticated = token.is_some(), "Session hydrated");

        Self {
            storage,
            inner: RwLock::new(Session { token, user }),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.read().token.is_some()
    }

    pub fn token(&self) -> Option<String> {
        self.read()
            .token
            .as_ref()
            .map(|t| t.expose_secret().clone())
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.read().user.clone()
    }

    /// Store a freshly issued token and its user.
    pub fn establish(&self, token: &str, user: SessionUser) {
        let mut session = self.write();
        session.token = Some(Secret::new(token.to_string()));
        self.persist_token(token);
        self.persist_user(&user);
        session.user = Some(user);
    }

    /// Replace the cached user, provided `token` is still the active one.
    /// Returns `false` when the session changed in the meantime.
    pub fn refresh_user(&self, token: &str, user: SessionUser) -> bool {
        let mut session = self.write();
        if !session.holds(token) {
            return false;
        }
        self.persist_user(&user);
        session.user = Some(user);
        true
    }

    /// Clear token and user. Returns whether a session was present.
    pub fn clear(&self) -> bool {
        let mut session = self.write();
        let was_present = session.token.is_some() || session.user.is_some();
        self.teardown(&mut session);
        was_present
    }

    /// Clear the session only if it still holds `token`.
    ///
    /// Exactly one caller per token gets `true`; stale tokens never clear a
    /// newer session.
    pub fn expire(&self, token: &str) -> bool {
        let mut session = self.write();
        if !session.holds(token) {
            return false;
        }
        self.teardown(&mut session);
        true
    }

    fn teardown(&self, session: &mut Session) {
        session.token = None;
        session.user = None;
        for key in [TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                tracing::warn!(key = %key, error = %e, "Failed to clear persisted session");
            }
        }
    }

    fn persist_token(&self, token: &str) {
        if let Err(e) = self.storage.set_item(TOKEN_KEY, token) {
            tracing::warn!(error = %e, "Failed to persist session token");
        }
    }

    fn persist_user(&self, user: &SessionUser) {
        let encoded = match serde_json::to_string(user) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to encode session user");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(USER_KEY, &encoded) {
            tracing::warn!(error = %e, "Failed to persist session user");
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Session> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Session> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
