//! Error types for application-context configuration.
//!
//! All context parsing returns `Result<T, ContextError>` to enable
//! fail-fast validation; error messages name the accepted values.
//!
//! # Example
//!
//! ```rust
//! use adminkit::{ContextError, ThemeMode};
//!
//! let result: Result<ThemeMode, _> = "sepia".parse();
//! assert!(matches!(result, Err(ContextError::UnknownThemeMode { .. })));
//! ```

use thiserror::Error;

/// Errors that can occur while parsing application-context preferences.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContextError {
    /// Theme mode string is not one of the accepted values.
    #[error("Unknown theme mode '{value}'. Expected 'light', 'dark', or 'system'.")]
    UnknownThemeMode {
        /// The rejected value.
        value: String,
    },

    /// Locale string is not one of the supported locales.
    #[error("Unknown locale '{value}'. Expected 'en' or 'id'.")]
    UnknownLocale {
        /// The rejected value.
        value: String,
    },
}
