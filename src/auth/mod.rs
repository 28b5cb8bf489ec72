//! The authentication collaborator.
//!
//! Supplies the bearer token and session state the rest of the
//! application consumes. The pieces:
//!
//! - [`token`]: the fabricated (non-cryptographic) bearer token codec
//! - [`Session`] / [`AuthUser`]: session state
//! - [`AuthProvider`] / [`MockAuthService`]: the backend seam and its
//!   development implementation
//! - [`AuthStore`]: stateful holder with write-through persistence
//!
//! **None of this is a security design.** The token is unsigned and the
//! mock provider accepts any non-empty credentials; a real deployment
//! replaces the provider and token scheme while keeping the same seams.

pub mod token;

mod service;
mod session;
mod store;

pub use service::{AuthError, AuthLatency, AuthProvider, MockAuthService};
pub use session::{AuthUser, Session};
pub use store::{AuthStore, TOKEN_KEY, USER_KEY};
