//! The resource service contract.
//!
//! This module defines [`ResourceService`], the interface every concrete
//! backend — an HTTP API, a local database, the in-memory mocks in this
//! crate — must satisfy to be driven by a
//! [`CrudController`](crate::crud::CrudController), and [`FilterSet`], the
//! typed filter contract a resource's filter struct implements.
//!
//! # Implementing a Service
//!
//! 1. Define the resource item, creation payload, partial-update payload,
//!    and filter struct (with serde derives where they cross a wire)
//! 2. Implement [`FilterSet`] for the filter struct
//! 3. Implement [`ResourceService`] with the associated types and the five
//!    required operations
//!
//! # Example
//!
//! ```rust,ignore
//! use adminkit::resource::{
//!     FilterSet, Listing, PageRequest, ResourceError, ResourceService,
//! };
//!
//! #[derive(Debug, Clone)]
//! struct Product {
//!     id: String,
//!     title: String,
//! }
//!
//! #[derive(Debug, Clone, Default)]
//! struct ProductFilter {
//!     search: Option<String>,
//! }
//!
//! #[derive(Debug, Default)]
//! struct ProductFilterPatch {
//!     search: Option<String>,
//! }
//!
//! impl FilterSet for ProductFilter {
//!     type Patch = ProductFilterPatch;
//!
//!     fn set_search(&mut self, query: String) {
//!         self.search = Some(query);
//!     }
//!
//!     fn merge(&mut self, patch: ProductFilterPatch) {
//!         if let Some(search) = patch.search {
//!             self.search = Some(search);
//!         }
//!     }
//! }
//!
//! struct ProductService { /* storage handle */ }
//!
//! impl ResourceService for ProductService {
//!     type Item = Product;
//!     type Id = String;
//!     type Create = NewProduct;
//!     type Update = ProductPatch;
//!     type Filter = ProductFilter;
//!
//!     const NAME: &'static str = "Product";
//!
//!     async fn list(
//!         &self,
//!         filters: &ProductFilter,
//!         page: PageRequest,
//!     ) -> Result<Listing<Product>, ResourceError> {
//!         // filter first, count the total, then slice the page
//!         # unimplemented!()
//!     }
//!     // ... get / create / update / delete
//! }
//! ```

use std::fmt::Display;

use super::{Listing, PageRequest, ResourceError};

/// The typed filter contract for a resource listing.
///
/// A filter set is the active collection of query predicates narrowing a
/// listing. Every filter set carries a free-text search key (set through
/// [`set_search`](Self::set_search)) alongside whatever categorical keys
/// the concrete resource defines. Partial updates go through a dedicated
/// [`Patch`](Self::Patch) struct so each field overwrite is statically
/// typed — there is no stringly-typed merge.
pub trait FilterSet: Clone + Send + Sync {
    /// The partial-update structure for this filter set.
    ///
    /// Each present field shallowly overwrites the corresponding filter
    /// field; absent fields leave the current value untouched.
    type Patch: Send;

    /// Replaces the free-text search query.
    fn set_search(&mut self, query: String);

    /// Merges a partial update into this filter set (shallow field
    /// overwrite).
    fn merge(&mut self, patch: Self::Patch);
}

/// A backend that manages one resource type through CRUD operations.
///
/// This is the seam between the stateful
/// [`CrudController`](crate::crud::CrudController) and whatever actually
/// stores the data. The controller never inspects items beyond identity;
/// filtering, totals, and id assignment are entirely the service's job.
///
/// # Listing Semantics
///
/// [`list`](Self::list) must apply *all* filter predicates before computing
/// the total — case-insensitive substring match for the search text against
/// the resource's searchable fields, exact match for categorical filters —
/// and only then slice out the requested page. The returned
/// [`Listing::total`] therefore reflects the filtered count, never the page
/// size.
///
/// # Bulk Deletion
///
/// [`delete_many`](Self::delete_many) is optional in spirit: the default
/// body deletes sequentially and stops at the first error, and
/// [`supports_delete_many`](Self::supports_delete_many) reports `false`.
/// A service with a native batch operation overrides both. Callers that
/// need failure-tolerant batching (the CRUD controller does) consult the
/// capability flag and fall back to per-id deletion themselves.
#[allow(async_fn_in_trait)]
pub trait ResourceService: Send + Sync {
    /// The resource item type. Opaque to the controller beyond identity.
    type Item: Clone + Send + Sync;

    /// The item identifier type (a string or equivalent stable id).
    type Id: Display + PartialEq + Clone + Send + Sync;

    /// The creation payload.
    type Create: Send;

    /// The partial-update payload.
    type Update: Send;

    /// The filter set for listings.
    type Filter: FilterSet;

    /// The resource's display name, used in errors and logging.
    const NAME: &'static str;

    /// Lists one page of items matching the filters.
    ///
    /// # Errors
    ///
    /// Transport and validation failures are backend-defined; `NotFound`
    /// is not expected from a listing.
    async fn list(
        &self,
        filters: &Self::Filter,
        page: PageRequest,
    ) -> Result<Listing<Self::Item>, ResourceError>;

    /// Fetches a single item by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when no item matches.
    async fn get(&self, id: &Self::Id) -> Result<Self::Item, ResourceError>;

    /// Creates an item, assigning a fresh unique id and stamping creation
    /// metadata.
    ///
    /// Where the new item lands relative to existing ones (prepended vs
    /// appended) is the service's choice, but must stay consistent for a
    /// given service instance.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::Validation`] when the payload is rejected
    /// at the contract boundary.
    async fn create(&self, data: Self::Create) -> Result<Self::Item, ResourceError>;

    /// Applies a partial-field merge over the existing item.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the id is absent.
    async fn update(
        &self,
        id: &Self::Id,
        data: Self::Update,
    ) -> Result<Self::Item, ResourceError>;

    /// Deletes an item by id.
    ///
    /// # Errors
    ///
    /// Returns [`ResourceError::NotFound`] when the id is absent.
    async fn delete(&self, id: &Self::Id) -> Result<(), ResourceError>;

    /// Returns `true` if [`delete_many`](Self::delete_many) is backed by a
    /// native batch operation rather than the sequential default.
    fn supports_delete_many(&self) -> bool {
        false
    }

    /// Deletes a batch of items.
    ///
    /// The default implementation deletes sequentially and propagates the
    /// first error, leaving later ids untouched. Override together with
    /// [`supports_delete_many`](Self::supports_delete_many) when the
    /// backend can delete a batch natively.
    ///
    /// # Errors
    ///
    /// Returns the first per-id error in the default implementation;
    /// native implementations define their own failure atomicity.
    async fn delete_many(&self, ids: &[Self::Id]) -> Result<(), ResourceError> {
        for id in ids {
            self.delete(id).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::RwLock;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: String,
        body: String,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct NoteFilter {
        search: Option<String>,
    }

    #[derive(Debug, Default)]
    struct NoteFilterPatch {
        search: Option<String>,
    }

    impl FilterSet for NoteFilter {
        type Patch = NoteFilterPatch;

        fn set_search(&mut self, query: String) {
            self.search = Some(query);
        }

        fn merge(&mut self, patch: NoteFilterPatch) {
            if let Some(search) = patch.search {
                self.search = Some(search);
            }
        }
    }

    struct NoteService {
        notes: RwLock<Vec<Note>>,
        delete_calls: AtomicUsize,
    }

    impl NoteService {
        fn seeded(ids: &[&str]) -> Self {
            Self {
                notes: RwLock::new(
                    ids.iter()
                        .map(|id| Note {
                            id: (*id).to_string(),
                            body: format!("note {id}"),
                        })
                        .collect(),
                ),
                delete_calls: AtomicUsize::new(0),
            }
        }
    }

    impl ResourceService for NoteService {
        type Item = Note;
        type Id = String;
        type Create = String;
        type Update = String;
        type Filter = NoteFilter;

        const NAME: &'static str = "Note";

        async fn list(
            &self,
            filters: &NoteFilter,
            page: PageRequest,
        ) -> Result<Listing<Note>, ResourceError> {
            let notes = self
                .notes
                .read()
                .map_err(|_| ResourceError::transport("lock poisoned"))?;
            let filtered: Vec<Note> = notes
                .iter()
                .filter(|note| {
                    filters
                        .search
                        .as_deref()
                        .map_or(true, |query| note.body.contains(query))
                })
                .cloned()
                .collect();
            let total = filtered.len() as u64;
            Ok(Listing::new(page.paginate(filtered), total))
        }

        async fn get(&self, id: &String) -> Result<Note, ResourceError> {
            let notes = self
                .notes
                .read()
                .map_err(|_| ResourceError::transport("lock poisoned"))?;
            notes
                .iter()
                .find(|note| &note.id == id)
                .cloned()
                .ok_or_else(|| ResourceError::not_found(Self::NAME, id))
        }

        async fn create(&self, body: String) -> Result<Note, ResourceError> {
            let note = Note {
                id: format!("n{body}"),
                body,
            };
            let mut notes = self
                .notes
                .write()
                .map_err(|_| ResourceError::transport("lock poisoned"))?;
            notes.push(note.clone());
            Ok(note)
        }

        async fn update(&self, id: &String, body: String) -> Result<Note, ResourceError> {
            let mut notes = self
                .notes
                .write()
                .map_err(|_| ResourceError::transport("lock poisoned"))?;
            let note = notes
                .iter_mut()
                .find(|note| &note.id == id)
                .ok_or_else(|| ResourceError::not_found(Self::NAME, id))?;
            note.body = body;
            Ok(note.clone())
        }

        async fn delete(&self, id: &String) -> Result<(), ResourceError> {
            self.delete_calls.fetch_add(1, Ordering::SeqCst);
            let mut notes = self
                .notes
                .write()
                .map_err(|_| ResourceError::transport("lock poisoned"))?;
            let position = notes
                .iter()
                .position(|note| &note.id == id)
                .ok_or_else(|| ResourceError::not_found(Self::NAME, id))?;
            notes.remove(position);
            Ok(())
        }
    }

    #[test]
    fn test_supports_delete_many_defaults_to_false() {
        let service = NoteService::seeded(&[]);
        assert!(!service.supports_delete_many());
    }

    #[tokio::test]
    async fn test_default_delete_many_deletes_each_id() {
        let service = NoteService::seeded(&["a", "b", "c"]);
        let ids = vec!["a".to_string(), "c".to_string()];
        service.delete_many(&ids).await.unwrap();

        assert_eq!(service.delete_calls.load(Ordering::SeqCst), 2);
        let remaining = service
            .list(&NoteFilter::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(remaining.total, 1);
        assert_eq!(remaining.data[0].id, "b");
    }

    #[tokio::test]
    async fn test_default_delete_many_stops_at_first_error() {
        let service = NoteService::seeded(&["a", "c"]);
        let ids = vec![
            "a".to_string(),
            "missing".to_string(),
            "c".to_string(),
        ];

        let result = service.delete_many(&ids).await;
        assert!(matches!(result, Err(ResourceError::NotFound { .. })));

        // "a" was deleted, the error stopped the batch before "c".
        assert_eq!(service.delete_calls.load(Ordering::SeqCst), 2);
        let remaining = service
            .list(&NoteFilter::default(), PageRequest::default())
            .await
            .unwrap();
        assert_eq!(remaining.data[0].id, "c");
    }

    #[test]
    fn test_filter_set_merge_overwrites_present_fields() {
        let mut filters = NoteFilter {
            search: Some("old".to_string()),
        };
        filters.merge(NoteFilterPatch { search: None });
        assert_eq!(filters.search.as_deref(), Some("old"));

        filters.merge(NoteFilterPatch {
            search: Some("new".to_string()),
        });
        assert_eq!(filters.search.as_deref(), Some("new"));
    }
}
