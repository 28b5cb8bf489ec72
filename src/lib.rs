//! # adminkit
//!
//! A Rust toolkit for admin-dashboard data layers: generic CRUD
//! orchestration over pluggable resource services, with an in-memory mock
//! backend, a mock authentication collaborator, and injectable
//! application state.
//!
//! ## Overview
//!
//! This crate provides:
//! - A resource service contract via [`ResourceService`] and [`FilterSet`]
//! - A stateful CRUD controller via [`CrudController`] (pagination,
//!   filtering, search, mutations with automatic re-fetch)
//! - A reference resource — [`users`] — with an in-memory mock service,
//!   fixture data, and simulated latency
//! - A mock authentication collaborator via [`AuthStore`] and
//!   [`MockAuthService`], with fabricated bearer tokens
//! - Key-value persistence via [`Storage`] (the browser-local-storage
//!   analog) and [`MemoryStorage`]
//! - An injectable application context via [`AppContext`]
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use adminkit::crud::CrudController;
//! use adminkit::users::{CreateUser, InMemoryUserService, UserFilter, UserRole, UserStatus};
//!
//! let service = InMemoryUserService::new();
//! let mut users = CrudController::new(service, UserFilter::default());
//!
//! // Load the first page.
//! users.fetch().await;
//! assert_eq!(users.items().len(), 10);
//! assert_eq!(users.pagination().total, 25);
//!
//! // Search resets to page 1 and re-fetches.
//! users.search("smith").await;
//!
//! // Mutations re-fetch instead of patching local state.
//! let ok = users
//!     .create(CreateUser {
//!         name: "New Person".to_string(),
//!         email: "new.person@example.com".to_string(),
//!         role: UserRole::Editor,
//!         status: UserStatus::Pending,
//!         avatar: None,
//!     })
//!     .await;
//! assert!(ok);
//! ```
//!
//! ## Authentication
//!
//! The auth collaborator issues a fabricated bearer token and persists the
//! session across restarts. It is development scaffolding, **not** a
//! security mechanism:
//!
//! ```rust,ignore
//! use adminkit::auth::{AuthStore, MockAuthService};
//! use adminkit::storage::MemoryStorage;
//!
//! let mut auth = AuthStore::new(MockAuthService::new(), MemoryStorage::new());
//! auth.init().await; // restore a persisted session, if still valid
//!
//! if !auth.is_authenticated() {
//!     auth.login("jane.doe@example.com", "secret").await?;
//! }
//! let bearer = auth.token().unwrap();
//! ```
//!
//! ## Writing a New Resource
//!
//! Implement [`FilterSet`] for the resource's filter struct and
//! [`ResourceService`] for its backend; a [`CrudController`] then drives
//! it with no further glue. The [`users`] module is the worked example.
//!
//! ## Design Principles
//!
//! - **No global state**: services, storage, and the app context are
//!   constructed and injected explicitly
//! - **The service is the source of truth**: mutations re-fetch rather
//!   than patching local state, so failures never need rollback
//! - **Errors stop at the controller**: operations report through a
//!   side channel and preserve prior state instead of propagating
//! - **Async-first**: designed for use with the Tokio runtime

pub mod auth;
pub mod context;
pub mod crud;
pub mod error;
pub mod mock;
pub mod resource;
pub mod storage;
pub mod users;

// Re-export the main types at the crate root for convenience
pub use auth::{AuthError, AuthProvider, AuthStore, AuthUser, MockAuthService, Session};
pub use context::{AppContext, AppContextBuilder, Locale, ThemeMode};
pub use crud::CrudController;
pub use error::ContextError;
pub use mock::{ApiEnvelope, Latency};
pub use resource::{
    FilterSet, Listing, PageRequest, Pagination, ResourceError, ResourceService,
};
pub use storage::{MemoryStorage, Storage};
