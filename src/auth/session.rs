//! Authenticated session state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user's identity, as the auth provider reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable user id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar URL, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// An authenticated session: the user, their bearer token, and when the
/// token stops being honored.
///
/// Sessions are immutable after creation; re-authenticating produces a
/// new one.
///
/// # Example
///
/// ```rust
/// use adminkit::auth::{AuthUser, Session};
/// use chrono::{Duration, Utc};
///
/// let session = Session::new(
///     AuthUser {
///         id: "1".to_string(),
///         name: "Sarah Smith".to_string(),
///         email: "sarah.smith@example.com".to_string(),
///         avatar: None,
///     },
///     "token".to_string(),
///     Utc::now() + Duration::hours(24),
/// );
///
/// assert!(session.is_active());
/// assert!(!session.expired());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// The authenticated user.
    pub user: AuthUser,
    /// The bearer token presented on requests.
    pub token: String,
    /// When the token expires.
    pub expires: DateTime<Utc>,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub const fn new(user: AuthUser, token: String, expires: DateTime<Utc>) -> Self {
        Self {
            user,
            token,
            expires,
        }
    }

    /// Returns `true` once the expiry instant has passed.
    #[must_use]
    pub fn expired(&self) -> bool {
        Utc::now() > self.expires
    }

    /// Returns `true` while the session holds a token that has not
    /// expired.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.token.is_empty() && !self.expired()
    }
}

// Verify Session is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user() -> AuthUser {
        AuthUser {
            id: "1".to_string(),
            name: "Sarah Smith".to_string(),
            email: "sarah.smith@example.com".to_string(),
            avatar: None,
        }
    }

    #[test]
    fn test_session_expiry() {
        let expired = Session::new(user(), "t".to_string(), Utc::now() - Duration::hours(1));
        assert!(expired.expired());
        assert!(!expired.is_active());

        let valid = Session::new(user(), "t".to_string(), Utc::now() + Duration::hours(1));
        assert!(!valid.expired());
        assert!(valid.is_active());
    }

    #[test]
    fn test_empty_token_is_not_active() {
        let session = Session::new(user(), String::new(), Utc::now() + Duration::hours(1));
        assert!(!session.is_active());
    }

    #[test]
    fn test_session_serde_round_trip() {
        let session = Session::new(user(), "t".to_string(), Utc::now() + Duration::hours(1));
        let json = serde_json::to_string(&session).unwrap();
        let back: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(back, session);
    }
}
