//! Error types for resource service operations.
//!
//! Every failure a [`ResourceService`](crate::resource::ResourceService)
//! can produce falls into one of three buckets:
//!
//! - [`ResourceError::NotFound`] — the id has no matching item
//! - [`ResourceError::Validation`] — the payload or filters were unusable
//! - [`ResourceError::Transport`] — the underlying call itself failed,
//!   whatever the backend (HTTP status, lock poisoning, simulated outage)
//!
//! The CRUD controller treats all three uniformly: it catches them at its
//! boundary, reports them, and preserves its prior state.

use std::collections::HashMap;

use thiserror::Error;

/// Error type for resource service operations.
///
/// # Example
///
/// ```rust
/// use adminkit::resource::ResourceError;
///
/// let error = ResourceError::not_found("User", "u-123");
/// assert!(error.to_string().contains("User"));
/// assert!(error.to_string().contains("u-123"));
///
/// let error = ResourceError::validation("email", "must contain '@'");
/// assert!(matches!(error, ResourceError::Validation { .. }));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResourceError {
    /// No item matches the requested id.
    #[error("{resource} with id {id} not found")]
    NotFound {
        /// The type name of the resource (e.g., "User").
        resource: &'static str,
        /// The id that was requested.
        id: String,
    },

    /// The caller passed an unusable payload or filter set.
    ///
    /// Carries a map of field names to human-readable messages, so callers
    /// can surface per-field feedback.
    #[error("validation failed: {errors:?}")]
    Validation {
        /// Field name to error messages.
        errors: HashMap<String, Vec<String>>,
    },

    /// The underlying call failed for any reason the contract does not
    /// model: a backend outage, a timeout, a poisoned lock in an in-memory
    /// service.
    #[error("transport error: {message}")]
    Transport {
        /// Backend-defined failure description.
        message: String,
        /// Backend status code, when one exists.
        code: Option<u16>,
    },
}

impl ResourceError {
    /// Creates a [`ResourceError::NotFound`] for the given resource and id.
    #[must_use]
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Creates a single-field [`ResourceError::Validation`].
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = HashMap::new();
        errors.insert(field.into(), vec![message.into()]);
        Self::Validation { errors }
    }

    /// Creates a [`ResourceError::Transport`] with no status code.
    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            code: None,
        }
    }

    /// Returns `true` for the not-found variant.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// Verify ResourceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ResourceError>();
};
