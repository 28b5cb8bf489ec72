//! The `{success, data, message, code}` response envelope.
//!
//! Mock backends in this crate speak the same envelope shape a real admin
//! API would, so a service can be swapped from mock to live without the
//! consuming side noticing. Adopting the envelope is optional — resource
//! services may return [`Result`] directly — but services that do adopt it
//! convert at their boundary with [`ApiEnvelope::into_result`].

use serde::{Deserialize, Serialize};

use crate::resource::ResourceError;

/// A backend response envelope.
///
/// # Example
///
/// ```rust
/// use adminkit::mock::ApiEnvelope;
///
/// let ok = ApiEnvelope::ok(vec![1, 2, 3]);
/// assert_eq!(ok.into_result().unwrap(), vec![1, 2, 3]);
///
/// let err = ApiEnvelope::<()>::err("session expired", 401);
/// assert!(err.into_result().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the request succeeded.
    pub success: bool,
    /// The payload; present on success, absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Human-readable outcome description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Backend status code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
}

impl<T> ApiEnvelope<T> {
    /// Creates a success envelope carrying `data` with code 200.
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            code: Some(200),
        }
    }

    /// Creates a success envelope with an accompanying message.
    #[must_use]
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
            code: Some(200),
        }
    }

    /// Creates a failure envelope with a message and status code.
    #[must_use]
    pub fn err(message: impl Into<String>, code: u16) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            code: Some(code),
        }
    }

    /// Converts the envelope into a [`Result`].
    ///
    /// Failure envelopes map by status code the way an HTTP layer would:
    /// 422 becomes [`ResourceError::Validation`] (under the `base` field),
    /// everything else becomes [`ResourceError::Transport`] carrying the
    /// code. Use [`into_result_for`](Self::into_result_for) when a 404
    /// should surface as a typed not-found.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Transport`] for a success envelope with no
    /// payload, and the mapped error for failure envelopes.
    pub fn into_result(self) -> Result<T, ResourceError> {
        if self.success {
            return self
                .data
                .ok_or_else(|| ResourceError::transport("success envelope carried no data"));
        }
        let message = self
            .message
            .unwrap_or_else(|| "request failed".to_string());
        match self.code {
            Some(422) => Err(ResourceError::validation("base", message)),
            code => Err(ResourceError::Transport { message, code }),
        }
    }

    /// Converts the envelope into a [`Result`], mapping a 404 failure to
    /// [`ResourceError::NotFound`] for the given resource and id.
    ///
    /// # Errors
    ///
    /// As [`into_result`](Self::into_result), plus the typed not-found
    /// mapping.
    pub fn into_result_for(
        self,
        resource: &'static str,
        id: &str,
    ) -> Result<T, ResourceError> {
        if !self.success && self.code == Some(404) {
            return Err(ResourceError::not_found(resource, id));
        }
        self.into_result()
    }
}
