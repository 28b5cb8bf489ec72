//! The stateful CRUD controller.

use tracing::{debug, error};

use crate::resource::{FilterSet, Pagination, ResourceError, ResourceService};

/// A stateful controller coordinating fetches and mutations for one
/// resource.
///
/// The controller owns the loaded page of items, the loading flag, the
/// pagination cursor, and the active filter set, and keeps them in sync
/// across every operation. Consumers (typically a view layer) read the
/// state through the accessors and invoke the operations; they never
/// mutate the state directly.
///
/// # State Rules
///
/// - The item collection is *replaced wholesale* on every successful
///   fetch — never patched incrementally.
/// - `total` always comes from the service's filtered count.
/// - Every mutation re-fetches on success instead of editing the local
///   collection: the service is the source of truth, so there is nothing
///   to roll back when a call fails.
/// - A failed call leaves items, pagination, and filters exactly as they
///   were; the failure is recorded in [`last_error`](Self::last_error)
///   and logged, never propagated.
/// - The loading flag is `true` for the full duration of each operation
///   and cleared on every exit path.
///
/// # Operation Overlap
///
/// All operations take `&mut self`, so a given controller can only run
/// one operation at a time — overlapping invocations cannot race to
/// clobber each other's state updates. There is no queueing,
/// cancellation, or timeout: an issued call runs to completion.
///
/// # Example
///
/// ```rust,ignore
/// use adminkit::crud::CrudController;
/// use adminkit::users::{InMemoryUserService, UserFilter};
///
/// let service = InMemoryUserService::new();
/// let mut users = CrudController::new(service, UserFilter::default());
///
/// users.fetch().await;
/// assert_eq!(users.items().len(), 10);
///
/// users.search("smith").await;
/// assert_eq!(users.pagination().page, 1);
/// ```
pub struct CrudController<S: ResourceService> {
    service: S,
    items: Vec<S::Item>,
    loading: bool,
    pagination: Pagination,
    filters: S::Filter,
    selected: Option<S::Item>,
    last_error: Option<ResourceError>,
}

impl<S: ResourceService> CrudController<S> {
    /// Creates a controller over `service` with the given filter baseline.
    ///
    /// The pagination cursor starts at page 1 with the default limit and a
    /// zero total; the item collection starts empty. Nothing is fetched
    /// until the first operation runs.
    pub fn new(service: S, default_filters: S::Filter) -> Self {
        Self {
            service,
            items: Vec::new(),
            loading: false,
            pagination: Pagination::initial(),
            filters: default_filters,
            selected: None,
            last_error: None,
        }
    }

    // ─── Read accessors ────────────────────────────────────────────────

    /// The currently loaded page of items.
    #[must_use]
    pub fn items(&self) -> &[S::Item] {
        &self.items
    }

    /// `true` while an operation is in flight.
    #[must_use]
    pub const fn loading(&self) -> bool {
        self.loading
    }

    /// The current pagination cursor.
    #[must_use]
    pub const fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// The active filter set.
    #[must_use]
    pub const fn filters(&self) -> &S::Filter {
        &self.filters
    }

    /// The caller-selected item, if any.
    #[must_use]
    pub const fn selected(&self) -> Option<&S::Item> {
        self.selected.as_ref()
    }

    /// The error reported by the most recent operation, if it failed.
    ///
    /// Cleared at the start of every operation, so `None` after an
    /// operation means it succeeded.
    #[must_use]
    pub const fn last_error(&self) -> Option<&ResourceError> {
        self.last_error.as_ref()
    }

    // ─── Selection (caller-driven; fetches never touch it) ─────────────

    /// Marks an item as selected, e.g. for an edit dialog.
    pub fn select(&mut self, item: S::Item) {
        self.selected = Some(item);
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    // ─── Operations ────────────────────────────────────────────────────

    /// Fetches the current page under the current filters.
    ///
    /// On success the item collection and `total` are replaced from the
    /// response; on failure both keep their previous values.
    pub async fn fetch(&mut self) {
        self.begin();
        self.fetch_inner().await;
        self.loading = false;
    }

    /// Moves to a different page and/or page size, then fetches.
    pub async fn change_page(&mut self, page: u32, limit: u32) {
        self.begin();
        self.pagination.page = page.max(1);
        self.pagination.limit = limit.max(1);
        self.fetch_inner().await;
        self.loading = false;
    }

    /// Replaces the free-text search query, resets to page 1, and fetches.
    pub async fn search(&mut self, query: impl Into<String>) {
        self.begin();
        self.filters.set_search(query.into());
        self.pagination.page = 1;
        self.fetch_inner().await;
        self.loading = false;
    }

    /// Merges a filter patch, resets to page 1, and fetches.
    pub async fn change_filters(&mut self, patch: <S::Filter as FilterSet>::Patch) {
        self.begin();
        self.filters.merge(patch);
        self.pagination.page = 1;
        self.fetch_inner().await;
        self.loading = false;
    }

    /// Creates an item through the service, then re-fetches.
    ///
    /// There is no optimistic local insert — the re-fetch is what makes
    /// the new item visible. Returns `true` when the creation itself
    /// succeeded (a subsequent fetch failure is reported through
    /// [`last_error`](Self::last_error) but does not change the return
    /// value, mirroring the fetch contract).
    pub async fn create(&mut self, data: S::Create) -> bool {
        self.begin();
        let result = self.service.create(data).await;
        let created = match result {
            Ok(_) => {
                self.fetch_inner().await;
                true
            }
            Err(err) => {
                self.report("create", err);
                false
            }
        };
        self.loading = false;
        created
    }

    /// Updates an item through the service, then re-fetches.
    ///
    /// Same success/failure contract as [`create`](Self::create).
    pub async fn update(&mut self, id: &S::Id, data: S::Update) -> bool {
        self.begin();
        let result = self.service.update(id, data).await;
        let updated = match result {
            Ok(_) => {
                self.fetch_inner().await;
                true
            }
            Err(err) => {
                self.report("update", err);
                false
            }
        };
        self.loading = false;
        updated
    }

    /// Deletes one item, then re-fetches.
    ///
    /// When the deleted item was the only one on a page past the first,
    /// the cursor steps back a page before the re-fetch so the view does
    /// not land on an empty page.
    pub async fn delete(&mut self, id: &S::Id) -> bool {
        self.begin();
        let result = self.service.delete(id).await;
        let deleted = match result {
            Ok(()) => {
                if self.items.len() == 1 && self.pagination.page > 1 {
                    self.pagination.page -= 1;
                }
                self.fetch_inner().await;
                true
            }
            Err(err) => {
                self.report("delete", err);
                false
            }
        };
        self.loading = false;
        deleted
    }

    /// Deletes a batch of items, then re-fetches.
    ///
    /// Uses the service's native batch operation when
    /// [`supports_delete_many`](ResourceService::supports_delete_many)
    /// says one exists; a native failure is reported and the state is left
    /// untouched. Otherwise every id is deleted individually, and one
    /// failure does not stop the remaining attempts — partial deletion is
    /// accepted and the re-fetch resynchronizes with whatever the service
    /// now holds.
    ///
    /// After the re-fetch, an empty page past the first steps the cursor
    /// back once and fetches again. That single step is a heuristic for
    /// the common trailing-page case, not exact page accounting: a bulk
    /// delete can span unknown page boundaries, and the service remains
    /// the source of truth either way.
    pub async fn delete_many(&mut self, ids: &[S::Id]) -> bool {
        self.begin();
        let all_deleted = if self.service.supports_delete_many() {
            let result = self.service.delete_many(ids).await;
            match result {
                Ok(()) => {
                    self.resync_after_bulk().await;
                    true
                }
                Err(err) => {
                    self.report("delete_many", err);
                    false
                }
            }
        } else {
            let mut all_deleted = true;
            for id in ids {
                let result = self.service.delete(id).await;
                if let Err(err) = result {
                    self.report("delete_many", err);
                    all_deleted = false;
                }
            }
            self.resync_after_bulk().await;
            all_deleted
        };
        self.loading = false;
        all_deleted
    }

    /// The underlying service.
    #[must_use]
    pub const fn service(&self) -> &S {
        &self.service
    }

    /// Consumes the controller, returning the underlying service.
    #[must_use]
    pub fn into_service(self) -> S {
        self.service
    }

    // ─── Internals ─────────────────────────────────────────────────────

    fn begin(&mut self) {
        self.loading = true;
        self.last_error = None;
    }

    async fn fetch_inner(&mut self) {
        debug!(
            resource = S::NAME,
            page = self.pagination.page,
            limit = self.pagination.limit,
            "fetching page"
        );
        let result = self
            .service
            .list(&self.filters, self.pagination.request())
            .await;
        match result {
            Ok(listing) => {
                self.items = listing.data;
                self.pagination.total = listing.total;
            }
            Err(err) => self.report("fetch", err),
        }
    }

    async fn resync_after_bulk(&mut self) {
        self.fetch_inner().await;
        if self.items.is_empty() && self.pagination.page > 1 {
            self.pagination.page -= 1;
            self.fetch_inner().await;
        }
    }

    fn report(&mut self, operation: &'static str, err: ResourceError) {
        error!(
            resource = S::NAME,
            operation,
            error = %err,
            "resource operation failed"
        );
        self.last_error = Some(err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::{Listing, PageRequest};

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: String,
    }

    #[derive(Debug, Clone, Default, PartialEq)]
    struct ItemFilter {
        search: Option<String>,
    }

    #[derive(Debug, Default)]
    struct ItemFilterPatch {
        search: Option<String>,
    }

    impl FilterSet for ItemFilter {
        type Patch = ItemFilterPatch;

        fn set_search(&mut self, query: String) {
            self.search = Some(query);
        }

        fn merge(&mut self, patch: ItemFilterPatch) {
            if let Some(search) = patch.search {
                self.search = Some(search);
            }
        }
    }

    struct EmptyService;

    impl ResourceService for EmptyService {
        type Item = Item;
        type Id = String;
        type Create = ();
        type Update = ();
        type Filter = ItemFilter;

        const NAME: &'static str = "Item";

        async fn list(
            &self,
            _filters: &ItemFilter,
            _page: PageRequest,
        ) -> Result<Listing<Item>, ResourceError> {
            Ok(Listing::new(Vec::new(), 0))
        }

        async fn get(&self, id: &String) -> Result<Item, ResourceError> {
            Err(ResourceError::not_found(Self::NAME, id))
        }

        async fn create(&self, _data: ()) -> Result<Item, ResourceError> {
            Err(ResourceError::transport("unavailable"))
        }

        async fn update(&self, id: &String, _data: ()) -> Result<Item, ResourceError> {
            Err(ResourceError::not_found(Self::NAME, id))
        }

        async fn delete(&self, id: &String) -> Result<(), ResourceError> {
            Err(ResourceError::not_found(Self::NAME, id))
        }
    }

    #[test]
    fn test_initial_state() {
        let controller = CrudController::new(EmptyService, ItemFilter::default());
        assert!(controller.items().is_empty());
        assert!(!controller.loading());
        assert_eq!(controller.pagination().page, 1);
        assert_eq!(controller.pagination().limit, 10);
        assert_eq!(controller.pagination().total, 0);
        assert!(controller.selected().is_none());
        assert!(controller.last_error().is_none());
    }

    #[test]
    fn test_selection_is_caller_driven() {
        let mut controller = CrudController::new(EmptyService, ItemFilter::default());
        controller.select(Item {
            id: "x".to_string(),
        });
        assert_eq!(controller.selected().map(|item| item.id.as_str()), Some("x"));

        controller.clear_selection();
        assert!(controller.selected().is_none());
    }

    #[tokio::test]
    async fn test_fetch_does_not_touch_selection() {
        let mut controller = CrudController::new(EmptyService, ItemFilter::default());
        controller.select(Item {
            id: "kept".to_string(),
        });
        controller.fetch().await;
        assert!(controller.selected().is_some());
    }

    #[tokio::test]
    async fn test_failed_mutation_records_error_and_clears_loading() {
        let mut controller = CrudController::new(EmptyService, ItemFilter::default());
        let ok = controller.create(()).await;
        assert!(!ok);
        assert!(!controller.loading());
        assert!(matches!(
            controller.last_error(),
            Some(ResourceError::Transport { .. })
        ));

        // The next operation starts with a clean report channel.
        controller.fetch().await;
        assert!(controller.last_error().is_none());
    }

    #[tokio::test]
    async fn test_into_service_returns_backend() {
        let controller = CrudController::new(EmptyService, ItemFilter::default());
        let _service: EmptyService = controller.into_service();
    }
}
