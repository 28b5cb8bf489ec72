//! The users resource — the crate's reference resource.
//!
//! Demonstrates what a concrete resource looks like end to end: the item
//! model, creation and partial-update payloads, a typed filter set with
//! its patch, and [`InMemoryUserService`], an in-memory
//! [`ResourceService`](crate::resource::ResourceService) implementation
//! seeded with fixture data. New resources (products, orders, …) follow
//! the same pattern.

mod service;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::resource::FilterSet;

pub use service::InMemoryUserService;

/// A user's access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full administrative access.
    Admin,
    /// Can modify content.
    Editor,
    /// Read-only access.
    Viewer,
}

impl UserRole {
    /// The canonical lowercase form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user account's lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    /// Can sign in.
    Active,
    /// Disabled by an administrator.
    Inactive,
    /// Invited but not yet activated.
    Pending,
}

impl UserStatus {
    /// The canonical lowercase form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Email address (stored lowercase).
    pub email: String,
    /// Access level.
    pub role: UserRole,
    /// Account state.
    pub status: UserStatus,
    /// Avatar URL, when one exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Most recent sign-in; `None` for accounts that never signed in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<DateTime<Utc>>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a user.
///
/// The id, creation timestamp, and sign-in history are service-assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUser {
    /// Display name; must be non-empty.
    pub name: String,
    /// Email address; must contain `@`.
    pub email: String,
    /// Access level.
    pub role: UserRole,
    /// Account state.
    pub status: UserStatus,
    /// Avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Partial update for a user: present fields overwrite, absent fields
/// keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateUser {
    /// Replacement display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Replacement email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Replacement access level.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Replacement account state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    /// Replacement avatar URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// The active filters for a user listing.
///
/// `search` matches name or email case-insensitively; `role` and `status`
/// are exact matches. `None` means the predicate is off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFilter {
    /// Free-text query over name and email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Restrict to one role.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    /// Restrict to one status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
}

/// Partial update for [`UserFilter`].
///
/// The outer `Option` is "was this field provided"; for the categorical
/// filters the inner `Option` distinguishes setting a value from clearing
/// the predicate (`Some(None)` clears it).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilterPatch {
    /// Replacement search query.
    pub search: Option<String>,
    /// `Some(Some(role))` narrows, `Some(None)` clears.
    pub role: Option<Option<UserRole>>,
    /// `Some(Some(status))` narrows, `Some(None)` clears.
    pub status: Option<Option<UserStatus>>,
}

impl FilterSet for UserFilter {
    type Patch = UserFilterPatch;

    fn set_search(&mut self, query: String) {
        self.search = Some(query);
    }

    fn merge(&mut self, patch: UserFilterPatch) {
        if let Some(search) = patch.search {
            self.search = Some(search);
        }
        if let Some(role) = patch.role {
            self.role = role;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_and_status_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
        assert_eq!(
            serde_json::to_string(&UserStatus::Pending).unwrap(),
            "\"pending\""
        );
    }

    #[test]
    fn test_user_serde_round_trip() {
        let user = User {
            id: "abc123def".to_string(),
            name: "Sarah Smith".to_string(),
            email: "sarah.smith@example.com".to_string(),
            role: UserRole::Admin,
            status: UserStatus::Active,
            avatar: Some("https://i.pravatar.cc/150?u=1".to_string()),
            last_login: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_absent_optional_fields_omitted_from_json() {
        let user = User {
            id: "x".to_string(),
            name: "N".to_string(),
            email: "n@example.com".to_string(),
            role: UserRole::Viewer,
            status: UserStatus::Pending,
            avatar: None,
            last_login: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("avatar"));
        assert!(!json.contains("last_login"));
    }

    #[test]
    fn test_filter_merge_overwrites_only_present_fields() {
        let mut filters = UserFilter {
            search: Some("smith".to_string()),
            role: Some(UserRole::Admin),
            status: None,
        };

        filters.merge(UserFilterPatch {
            search: None,
            role: Some(None),
            status: Some(Some(UserStatus::Active)),
        });

        assert_eq!(filters.search.as_deref(), Some("smith"));
        assert_eq!(filters.role, None);
        assert_eq!(filters.status, Some(UserStatus::Active));
    }

    #[test]
    fn test_set_search_replaces_query() {
        let mut filters = UserFilter::default();
        filters.set_search("wilson".to_string());
        assert_eq!(filters.search.as_deref(), Some("wilson"));
    }
}
