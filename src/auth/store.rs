//! Client-side authentication state with persistence.

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::auth::service::{AuthError, AuthProvider};
use crate::auth::session::{AuthUser, Session};
use crate::auth::token;
use crate::storage::Storage;

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "auth_token";
/// Storage key for the cached user JSON.
pub const USER_KEY: &str = "auth_user";

/// Authentication state holder: the current session, a loading flag, and
/// write-through persistence so a restart picks up where the user left
/// off.
///
/// The store is generic over the [`AuthProvider`] it authenticates
/// against and the [`Storage`] it persists into; both are injected at
/// construction, so there is no hidden global state.
///
/// # Lifecycle
///
/// ```rust,ignore
/// use adminkit::auth::{AuthStore, MockAuthService};
/// use adminkit::storage::MemoryStorage;
///
/// let mut auth = AuthStore::new(MockAuthService::new(), MemoryStorage::new());
///
/// auth.init().await;                // restore a persisted session, if valid
/// if !auth.is_authenticated() {
///     auth.login("jane.doe@example.com", "secret").await?;
/// }
/// // ... later
/// auth.logout().await;
/// ```
pub struct AuthStore<A, S> {
    provider: A,
    storage: S,
    session: Option<Session>,
    loading: bool,
}

impl<A: AuthProvider, S: Storage> AuthStore<A, S> {
    /// Creates a store with no active session.
    pub const fn new(provider: A, storage: S) -> Self {
        Self {
            provider,
            storage,
            session: None,
            loading: false,
        }
    }

    /// Restores a persisted session, called once at startup.
    ///
    /// A missing, malformed, or expired token clears whatever is
    /// persisted. A valid token with no cached user falls back to asking
    /// the provider and re-caching the answer.
    pub async fn init(&mut self) {
        let Some(stored_token) = self.storage.get(TOKEN_KEY) else {
            self.clear();
            return;
        };

        let expires = match token::decode(&stored_token) {
            Ok(claims) => expiry_instant(claims.exp),
            Err(err) => {
                warn!(error = %err, "persisted token rejected; clearing auth state");
                self.clear();
                return;
            }
        };

        let cached_user = self
            .storage
            .get(USER_KEY)
            .and_then(|raw| serde_json::from_str::<AuthUser>(&raw).ok());

        let user = if let Some(user) = cached_user {
            user
        } else {
            let looked_up = self.provider.current_user(&stored_token).await;
            match looked_up {
                Ok(user) => {
                    self.cache_user(&user);
                    user
                }
                Err(err) => {
                    warn!(error = %err, "could not resolve user for persisted token");
                    self.clear();
                    return;
                }
            }
        };

        self.session = Some(Session::new(user, stored_token, expires));
    }

    /// Authenticates and persists the resulting session.
    ///
    /// # Errors
    ///
    /// Propagates the provider's rejection; local state is unchanged on
    /// failure.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        self.loading = true;
        let result = self.provider.login(email, password).await;
        let outcome = match result {
            Ok(session) => {
                self.storage.set(TOKEN_KEY, &session.token);
                self.cache_user(&session.user);
                self.session = Some(session);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "login rejected");
                Err(err)
            }
        };
        self.loading = false;
        outcome
    }

    /// Ends the session.
    ///
    /// Local state and persisted keys are cleared even when the provider
    /// call fails — the user asked to be logged out.
    pub async fn logout(&mut self) {
        self.loading = true;
        if let Err(err) = self.provider.logout().await {
            warn!(error = %err, "provider logout failed; clearing local session anyway");
        }
        self.clear();
        self.loading = false;
    }

    /// Returns `true` while a session with a valid token is held.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|session| session.is_active() && token::is_valid(&session.token))
    }

    /// The current session, if any.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The authenticated user, if any.
    #[must_use]
    pub fn user(&self) -> Option<&AuthUser> {
        self.session.as_ref().map(|session| &session.user)
    }

    /// The bearer token, if a session is held.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.token.as_str())
    }

    /// `true` while a login or logout is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    fn cache_user(&self, user: &AuthUser) {
        if let Ok(raw) = serde_json::to_string(user) {
            self.storage.set(USER_KEY, &raw);
        }
    }

    fn clear(&mut self) {
        self.session = None;
        self.storage.remove(TOKEN_KEY);
        self.storage.remove(USER_KEY);
    }
}

fn expiry_instant(exp: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(exp, 0).unwrap_or_else(Utc::now)
}
