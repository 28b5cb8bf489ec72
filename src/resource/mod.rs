//! The resource service contract and its supporting types.
//!
//! This module is the leaf of the crate: everything else composes on top
//! of it. It defines
//!
//! - [`ResourceService`]: the interface any concrete resource backend must
//!   satisfy (list with paging/filtering, fetch by id, create, update,
//!   delete, optional bulk delete)
//! - [`FilterSet`]: the typed filter contract with its per-resource patch
//! - [`PageRequest`] / [`Pagination`] / [`Listing`]: pagination primitives
//! - [`ResourceError`]: the three-bucket error taxonomy

mod contract;
mod errors;
mod page;

pub use contract::{FilterSet, ResourceService};
pub use errors::ResourceError;
pub use page::{Listing, PageRequest, Pagination, DEFAULT_PAGE_LIMIT};
