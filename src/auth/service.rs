//! The authentication provider seam and its mock implementation.
//!
//! [`AuthProvider`] is what the [`AuthStore`](crate::auth::AuthStore)
//! talks to; [`MockAuthService`] is the development implementation that
//! accepts any non-empty credentials, fabricates a user from the email
//! address, and issues a mock bearer token. Swap in a real provider by
//! implementing the trait against a live backend.

use std::time::Duration;

use chrono::Utc;
use thiserror::Error;

use crate::auth::session::{AuthUser, Session};
use crate::auth::token::{self, TokenError, TOKEN_TTL_SECS};
use crate::mock::{delay, ApiEnvelope};
use crate::resource::ResourceError;

/// Errors produced by an authentication provider.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The provider rejected the request (bad credentials, missing
    /// fields). Carries the backend's message and status code.
    #[error("{message}")]
    Rejected {
        /// Human-readable rejection reason.
        message: String,
        /// Backend status code (400 for bad input, 401 for bad tokens).
        code: u16,
    },

    /// The presented token did not decode or has expired.
    #[error(transparent)]
    Token(#[from] TokenError),
}

/// An authentication backend.
///
/// The store calls `login` and `logout` around the user's session and
/// `current_user` to rehydrate an identity from a persisted token.
#[allow(async_fn_in_trait)]
pub trait AuthProvider: Send + Sync {
    /// Exchanges credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Rejected`] when the credentials are refused.
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError>;

    /// Ends the provider-side session, if the backend tracks one.
    ///
    /// # Errors
    ///
    /// Backend-defined; callers clear local state regardless.
    async fn logout(&self) -> Result<(), AuthError>;

    /// Resolves the user a token was issued to.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Token`] for invalid or expired tokens.
    async fn current_user(&self, token: &str) -> Result<AuthUser, AuthError>;
}

/// Simulated response times for the mock auth provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthLatency {
    /// Delay for `login` calls.
    pub login: Duration,
    /// Delay for `logout` calls.
    pub logout: Duration,
    /// Delay for `current_user` calls.
    pub lookup: Duration,
}

impl AuthLatency {
    /// A profile with every delay at zero, for tests.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            login: Duration::ZERO,
            logout: Duration::ZERO,
            lookup: Duration::ZERO,
        }
    }
}

impl Default for AuthLatency {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(800),
            logout: Duration::from_millis(300),
            lookup: Duration::from_millis(300),
        }
    }
}

/// The development auth backend.
///
/// Accepts any non-empty email/password pair, derives a display name from
/// the email's local part (`jane.doe@…` becomes "Jane Doe"), and issues a
/// fabricated token. Responses are composed as
/// [`ApiEnvelope`](crate::mock::ApiEnvelope)s internally and converted at
/// the trait boundary, the way a live backend's wire shape would be.
///
/// **Not a security mechanism** — see [`auth::token`](crate::auth::token).
#[derive(Debug, Clone, Default)]
pub struct MockAuthService {
    latency: AuthLatency,
}

impl MockAuthService {
    /// Creates a service with the default latency profile.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service with a custom latency profile.
    #[must_use]
    pub const fn with_latency(latency: AuthLatency) -> Self {
        Self { latency }
    }

    fn login_envelope(email: &str, password: &str) -> ApiEnvelope<Session> {
        if email.trim().is_empty() || password.is_empty() {
            return ApiEnvelope::err("email and password are required", 400);
        }

        let user = AuthUser {
            id: "1".to_string(),
            name: display_name_from_email(email),
            email: email.trim().to_string(),
            avatar: None,
        };
        let token = token::issue(&user.id, &user.name, &user.email);
        let expires = Utc::now() + chrono::Duration::seconds(TOKEN_TTL_SECS);

        ApiEnvelope::ok(Session::new(user, token, expires))
    }

    fn unwrap_envelope<T>(envelope: ApiEnvelope<T>) -> Result<T, AuthError> {
        envelope.into_result().map_err(|err| match err {
            ResourceError::Transport { message, code } => AuthError::Rejected {
                message,
                code: code.unwrap_or(500),
            },
            other => AuthError::Rejected {
                message: other.to_string(),
                code: 500,
            },
        })
    }
}

impl AuthProvider for MockAuthService {
    async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        delay(self.latency.login).await;
        Self::unwrap_envelope(Self::login_envelope(email, password))
    }

    async fn logout(&self) -> Result<(), AuthError> {
        delay(self.latency.logout).await;
        Self::unwrap_envelope(ApiEnvelope::ok_with_message((), "logged out"))
    }

    async fn current_user(&self, token: &str) -> Result<AuthUser, AuthError> {
        delay(self.latency.lookup).await;
        let claims = token::decode(token)?;
        Ok(AuthUser {
            id: claims.sub,
            name: claims.name,
            email: claims.email,
            avatar: None,
        })
    }
}

/// Derives a presentable display name from an email's local part.
///
/// Separators (`.`, `_`, `-`) become spaces and each word is
/// title-cased; an empty local part falls back to "User".
fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or_default().trim();
    let words: Vec<String> = local
        .split(['.', '_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + chars.as_str()
            })
        })
        .collect();

    if words.is_empty() {
        "User".to_string()
    } else {
        words.join(" ")
    }
}
