//! The CRUD orchestration layer.
//!
//! [`CrudController`] is the stateful controller a view layer drives: it
//! owns the loaded items, loading flag, pagination cursor, and active
//! filters for one resource, and exposes the operations (fetch, page
//! change, search, filter change, create, update, delete, bulk delete)
//! that keep them consistent. It is parameterized by any
//! [`ResourceService`](crate::resource::ResourceService) implementation.

mod controller;

pub use controller::CrudController;
