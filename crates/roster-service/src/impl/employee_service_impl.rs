//! Cache-augmented employee service.

use crate::cache::metrics::{CacheMetrics, EntryKind};
use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::{
    EmployeeListQuery, EmployeeListResponse, EmployeeRequest, MutationResponse,
    PatchEmployeeRequest,
};
use crate::employee_service::EmployeeService;
use async_trait::async_trait;
use roster_config::{CacheConfig, InvalidationStrategy};
use roster_core::{
    Employee, EmployeeField, EmployeeId, EmployeePatch, HealthStatus, ListScope, NewEmployee,
    Page, PageRequest, RosterError, RosterResult, ValidateExt, EMPLOYEE_RESOURCE,
};
use roster_repository::EmployeeStore;
use serde::{de::DeserializeOwned, Serialize};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// How long entries live and how writes find the collections to drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub ttl: Duration,
    pub invalidation: InvalidationStrategy,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60),
            invalidation: InvalidationStrategy::Index,
        }
    }
}

impl From<&CacheConfig> for CachePolicy {
    fn from(config: &CacheConfig) -> Self {
        Self {
            ttl: config.ttl(),
            invalidation: config.invalidation,
        }
    }
}

const fn strategy_label(strategy: InvalidationStrategy) -> &'static str {
    match strategy {
        InvalidationStrategy::Index => "index",
        InvalidationStrategy::Pattern => "pattern",
    }
}

/// Maps an affected-row count to the outcome of a single-row mutation.
fn expect_single_row(operation: &'static str, id: EmployeeId, affected: u64) -> RosterResult<()> {
    match affected {
        1 => Ok(()),
        0 => Err(RosterError::not_found(EMPLOYEE_RESOURCE, id)),
        affected => Err(RosterError::AffectedRows { operation, affected }),
    }
}

/// Employee service backed by an [`EmployeeStore`] and a [`CacheInterface`].
///
/// The cache only ever makes reads cheaper. Read-side cache failures fall
/// back to the store, and a write that reached the store is never reported
/// as failed because invalidation did not complete.
#[derive(Component)]
#[shaku(interface = EmployeeService)]
pub struct EmployeeServiceImpl {
    #[shaku(inject)]
    store: Arc<dyn EmployeeStore>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    policy: CachePolicy,
}

impl EmployeeServiceImpl {
    /// Creates a new employee service.
    pub fn new(store: Arc<dyn EmployeeStore>, cache: Arc<dyn CacheInterface>, policy: CachePolicy) -> Self {
        Self { store, cache, policy }
    }

    /// Cached value for `key`. Errors and undecodable payloads count as a miss.
    async fn cached<T: DeserializeOwned + Send>(&self, key: &str, kind: EntryKind) -> Option<T> {
        match self.cache.get::<T>(key).await {
            Ok(Some(value)) => {
                debug!("Cache hit for key '{}'", key);
                CacheMetrics::hit(kind);
                Some(value)
            }
            Ok(None) => {
                debug!("Cache miss for key '{}'", key);
                CacheMetrics::miss(kind);
                None
            }
            Err(e) => {
                warn!(key, error = %e, "Cache read failed, falling back to store");
                CacheMetrics::error("get");
                CacheMetrics::miss(kind);
                None
            }
        }
    }

    async fn remember<T: Serialize + Send + Sync>(&self, key: &str, value: &T) {
        if let Err(e) = self.cache.set(key, value, self.policy.ttl).await {
            warn!(key, error = %e, "Failed to cache value");
            CacheMetrics::error("set");
        }
    }

    /// Caches a collection page. Under the index strategy the key is
    /// registered first and the page is only written once registered.
    async fn remember_collection(&self, key: &str, response: &EmployeeListResponse) {
        if self.policy.invalidation == InvalidationStrategy::Index {
            let index = cache_keys::collection_index();
            if let Err(e) = self.cache.index_add(&index, key, self.policy.ttl).await {
                warn!(key, error = %e, "Failed to index collection key, not caching");
                CacheMetrics::error("index_add");
                return;
            }
        }
        self.remember(key, response).await;
    }

    async fn page_of(&self, scope: ListScope, page: PageRequest) -> RosterResult<EmployeeListResponse> {
        let key = cache_keys::employee_collection(&scope, page);
        if let Some(response) = self.cached(&key, EntryKind::Collection).await {
            return Ok(response);
        }

        // Two statements, no transaction: a concurrent write can make the
        // total disagree with the window.
        let records = self.store.find_page(&scope, page).await?;
        let total = self.store.count(&scope).await?;
        let response = EmployeeListResponse::from(Page::new(records, page, total));

        self.remember_collection(&key, &response).await;
        Ok(response)
    }

    async fn drop_collections(&self) -> RosterResult<u64> {
        match self.policy.invalidation {
            InvalidationStrategy::Index => {
                // Not atomic: a key indexed between SMEMBERS and DEL loses its
                // index entry and lives until its own TTL.
                let index = cache_keys::collection_index();
                let mut keys = self.cache.index_members(&index).await?;
                keys.push(index);
                self.cache.delete_many(&keys).await
            }
            InvalidationStrategy::Pattern => {
                self.cache
                    .delete_pattern(&cache_keys::collection_pattern())
                    .await
            }
        }
    }

    /// Drops the item entry (if any) and every collection entry.
    ///
    /// Returns false if some stale entry may survive until it expires.
    async fn invalidate(&self, item: Option<EmployeeId>) -> bool {
        let strategy = strategy_label(self.policy.invalidation);
        let mut complete = true;

        if let Some(id) = item {
            let key = cache_keys::employee_by_id(id);
            if let Err(e) = self.cache.delete(&key).await {
                error!(key, error = %e, "Failed to invalidate cached employee");
                complete = false;
            }
        }

        match self.drop_collections().await {
            Ok(deleted) => debug!("Invalidated {} cached collection entries", deleted),
            Err(e) => {
                error!(strategy, error = %e, "Failed to invalidate cached collections");
                complete = false;
            }
        }

        if complete {
            CacheMetrics::invalidated(strategy);
        } else {
            CacheMetrics::invalidation_failed(strategy);
        }
        complete
    }
}

#[async_trait]
impl EmployeeService for EmployeeServiceImpl {
    async fn get_employee(&self, id: EmployeeId) -> RosterResult<Employee> {
        debug!("Getting employee: {}", id);

        let key = cache_keys::employee_by_id(id);
        if let Some(employee) = self.cached(&key, EntryKind::Item).await {
            return Ok(employee);
        }

        let employee = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| RosterError::not_found(EMPLOYEE_RESOURCE, id))?;

        self.remember(&key, &employee).await;
        Ok(employee)
    }

    async fn list_employees(&self, query: EmployeeListQuery) -> RosterResult<EmployeeListResponse> {
        debug!(
            page = query.page.page,
            size = query.page.size,
            filter = ?query.filter,
            "Listing employees"
        );

        self.page_of(ListScope::from_filter(query.filter), query.page).await
    }

    async fn search_employees(
        &self,
        field: EmployeeField,
        term: &str,
        page: PageRequest,
    ) -> RosterResult<EmployeeListResponse> {
        debug!("Searching employees: {} contains '{}'", field, term);

        let scope = ListScope::search(field, term)?;
        self.page_of(scope, page).await
    }

    async fn create_employee(&self, request: EmployeeRequest) -> RosterResult<MutationResponse> {
        debug!("Creating employee: {}", request.email);

        request.validate_request()?;

        let employee = NewEmployee::from(request);
        let outcome = self.store.insert(&employee).await?;
        if outcome.affected != 1 {
            return Err(RosterError::AffectedRows {
                operation: "insert",
                affected: outcome.affected,
            });
        }

        let cache_invalidated = self.invalidate(None).await;
        let id = outcome
            .id
            .ok_or_else(|| RosterError::internal("insert did not report the new id"))?;

        info!(employee_id = %id, cache_invalidated, "Employee created");
        Ok(MutationResponse { id, cache_invalidated })
    }

    async fn update_employee(
        &self,
        id: EmployeeId,
        request: EmployeeRequest,
    ) -> RosterResult<MutationResponse> {
        debug!("Updating employee: {}", id);

        request.validate_request()?;

        let affected = self.store.update(id, &NewEmployee::from(request)).await?;
        expect_single_row("update", id, affected)?;

        let cache_invalidated = self.invalidate(Some(id)).await;
        info!(employee_id = %id, cache_invalidated, "Employee updated");
        Ok(MutationResponse { id, cache_invalidated })
    }

    async fn patch_employee(
        &self,
        id: EmployeeId,
        request: PatchEmployeeRequest,
    ) -> RosterResult<MutationResponse> {
        debug!("Patching employee: {}", id);

        request.validate_request()?;
        let patch = EmployeePatch::from(request);
        if patch.is_empty() {
            return Err(RosterError::validation("patch must contain at least one field"));
        }

        let affected = self.store.patch(id, &patch).await?;
        expect_single_row("patch", id, affected)?;

        let cache_invalidated = self.invalidate(Some(id)).await;
        info!(employee_id = %id, cache_invalidated, "Employee patched");
        Ok(MutationResponse { id, cache_invalidated })
    }

    async fn delete_employee(&self, id: EmployeeId) -> RosterResult<MutationResponse> {
        debug!("Deleting employee: {}", id);

        let affected = self.store.delete(id).await?;
        expect_single_row("delete", id, affected)?;

        let cache_invalidated = self.invalidate(Some(id)).await;
        info!(employee_id = %id, cache_invalidated, "Employee deleted");
        Ok(MutationResponse { id, cache_invalidated })
    }

    async fn health_check(&self) -> HealthStatus {
        if let Err(e) = self.store.ping().await {
            return HealthStatus::Unhealthy(format!("store: {e}"));
        }
        if self.cache.is_enabled() {
            if let Err(e) = self.cache.get_raw(&cache_keys::health_probe()).await {
                return HealthStatus::Degraded(format!("cache: {e}"));
            }
        }
        HealthStatus::Healthy
    }
}

impl std::fmt::Debug for EmployeeServiceImpl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmployeeServiceImpl")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCache;
    use mockall::mock;
    use roster_core::Filter;
    use roster_repository::{InMemoryEmployeeStore, InsertOutcome};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Store wrapper counting every call that reaches the backing store.
    struct CountingStore {
        inner: InMemoryEmployeeStore,
        find_by_id: AtomicUsize,
        find_page: AtomicUsize,
        count: AtomicUsize,
        mutations: AtomicUsize,
        forced_affected: Option<u64>,
    }

    impl CountingStore {
        fn seeded(records: usize) -> Self {
            Self {
                inner: InMemoryEmployeeStore::with_employees((0..records).map(|n| {
                    let last = if n % 5 == 0 { "Diaz" } else { "Perez" };
                    new_employee("Ana", last, n)
                })),
                find_by_id: AtomicUsize::new(0),
                find_page: AtomicUsize::new(0),
                count: AtomicUsize::new(0),
                mutations: AtomicUsize::new(0),
                forced_affected: None,
            }
        }

        /// Every mutation reports `affected` rows without touching data.
        fn reporting(affected: u64) -> Self {
            Self {
                forced_affected: Some(affected),
                ..Self::seeded(3)
            }
        }

        fn calls(counter: &AtomicUsize) -> usize {
            counter.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl EmployeeStore for CountingStore {
        async fn find_by_id(&self, id: EmployeeId) -> RosterResult<Option<Employee>> {
            self.find_by_id.fetch_add(1, Ordering::SeqCst);
            self.inner.find_by_id(id).await
        }

        async fn find_page(&self, scope: &ListScope, page: PageRequest) -> RosterResult<Vec<Employee>> {
            self.find_page.fetch_add(1, Ordering::SeqCst);
            self.inner.find_page(scope, page).await
        }

        async fn count(&self, scope: &ListScope) -> RosterResult<u64> {
            self.count.fetch_add(1, Ordering::SeqCst);
            self.inner.count(scope).await
        }

        async fn insert(&self, employee: &NewEmployee) -> RosterResult<InsertOutcome> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            match self.forced_affected {
                Some(affected) => Ok(InsertOutcome { affected, id: None }),
                None => self.inner.insert(employee).await,
            }
        }

        async fn update(&self, id: EmployeeId, employee: &NewEmployee) -> RosterResult<u64> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            match self.forced_affected {
                Some(affected) => Ok(affected),
                None => self.inner.update(id, employee).await,
            }
        }

        async fn patch(&self, id: EmployeeId, patch: &EmployeePatch) -> RosterResult<u64> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            match self.forced_affected {
                Some(affected) => Ok(affected),
                None => self.inner.patch(id, patch).await,
            }
        }

        async fn delete(&self, id: EmployeeId) -> RosterResult<u64> {
            self.mutations.fetch_add(1, Ordering::SeqCst);
            match self.forced_affected {
                Some(affected) => Ok(affected),
                None => self.inner.delete(id).await,
            }
        }

        async fn ping(&self) -> RosterResult<()> {
            self.inner.ping().await
        }
    }

    mock! {
        pub Cache {}

        #[async_trait]
        impl CacheInterface for Cache {
            async fn get_raw(&self, key: &str) -> RosterResult<Option<String>>;
            async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> RosterResult<()>;
            async fn delete(&self, key: &str) -> RosterResult<bool>;
            async fn delete_many(&self, keys: &[String]) -> RosterResult<u64>;
            async fn delete_pattern(&self, pattern: &str) -> RosterResult<u64>;
            async fn index_add(&self, index: &str, member: &str, ttl: Duration) -> RosterResult<()>;
            async fn index_members(&self, index: &str) -> RosterResult<Vec<String>>;
            fn is_enabled(&self) -> bool;
        }
    }

    fn new_employee(first: &str, last: &str, n: usize) -> NewEmployee {
        NewEmployee {
            first_names: first.to_string(),
            last_names: last.to_string(),
            phone: format!("555-{n:04}"),
            email: format!("{}.{}{}@empresa.com", first.to_lowercase(), last.to_lowercase(), n),
            address: format!("Calle {n}"),
        }
    }

    fn request(first: &str, last: &str, n: usize) -> EmployeeRequest {
        let employee = new_employee(first, last, n);
        EmployeeRequest {
            first_names: employee.first_names,
            last_names: employee.last_names,
            phone: employee.phone,
            email: employee.email,
            address: employee.address,
        }
    }

    fn page(p: u32, s: u32) -> PageRequest {
        PageRequest::new(p, s).unwrap()
    }

    fn diaz() -> Option<Filter> {
        Some(Filter::new(EmployeeField::LastNames, "Diaz"))
    }

    struct Fixture {
        store: Arc<CountingStore>,
        cache: Arc<InMemoryCache>,
        service: EmployeeServiceImpl,
    }

    fn fixture_with(store: CountingStore, policy: CachePolicy) -> Fixture {
        let store = Arc::new(store);
        let cache = Arc::new(InMemoryCache::new());
        let service = EmployeeServiceImpl::new(store.clone(), cache.clone(), policy);
        Fixture { store, cache, service }
    }

    fn fixture(records: usize) -> Fixture {
        fixture_with(CountingStore::seeded(records), CachePolicy::default())
    }

    fn with_mock_cache(store: CountingStore, cache: MockCache) -> (Arc<CountingStore>, EmployeeServiceImpl) {
        let store = Arc::new(store);
        let service = EmployeeServiceImpl::new(store.clone(), Arc::new(cache), CachePolicy::default());
        (store, service)
    }

    #[tokio::test]
    async fn test_list_reads_through_once() {
        let f = fixture(25);
        let query = EmployeeListQuery::all(page(2, 10));

        let first = f.service.list_employees(query.clone()).await.unwrap();
        let second = f.service.list_employees(query).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(CountingStore::calls(&f.store.find_page), 1);
        assert_eq!(CountingStore::calls(&f.store.count), 1);
    }

    #[tokio::test]
    async fn test_pagination_reports_population_total() {
        let f = fixture(25);

        let response = f
            .service
            .list_employees(EmployeeListQuery::all(page(2, 10)))
            .await
            .unwrap();

        assert_eq!(response.data.len(), 10);
        assert_eq!(response.total, 25);
        assert_eq!(response.page, 2);
        assert_eq!(response.limit, 10);
        assert_eq!(response.total_pages, 3);
        assert_eq!(response.data[0].id, EmployeeId::new(11));

        let beyond = f
            .service
            .list_employees(EmployeeListQuery::all(page(9, 10)))
            .await
            .unwrap();
        assert!(beyond.data.is_empty());
        assert_eq!(beyond.total, 25);
    }

    #[tokio::test]
    async fn test_filtered_and_unfiltered_views_are_isolated() {
        let f = fixture(25);
        let filtered = EmployeeListQuery {
            filter: diaz(),
            page: page(1, 10),
        };
        let unfiltered = EmployeeListQuery::all(page(1, 10));

        let diaz_page = f.service.list_employees(filtered.clone()).await.unwrap();
        let all_page = f.service.list_employees(unfiltered.clone()).await.unwrap();

        assert_eq!(diaz_page.total, 5);
        assert!(diaz_page.data.iter().all(|e| e.last_names == "Diaz"));
        assert_eq!(all_page.total, 25);
        assert_eq!(CountingStore::calls(&f.store.find_page), 2);

        assert_eq!(f.service.list_employees(filtered).await.unwrap(), diaz_page);
        assert_eq!(f.service.list_employees(unfiltered).await.unwrap(), all_page);
        assert_eq!(CountingStore::calls(&f.store.find_page), 2);
    }

    #[tokio::test]
    async fn test_get_employee_reads_through() {
        let f = fixture(3);
        let id = EmployeeId::new(2);

        let first = f.service.get_employee(id).await.unwrap();
        let second = f.service.get_employee(id).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(CountingStore::calls(&f.store.find_by_id), 1);
        assert!(f.cache.contains(&cache_keys::employee_by_id(id)));
    }

    #[tokio::test]
    async fn test_not_found_is_not_cached() {
        let f = fixture(3);
        let missing = EmployeeId::new(4);

        for _ in 0..2 {
            match f.service.get_employee(missing).await.unwrap_err() {
                RosterError::NotFound { resource_type, id } => {
                    assert_eq!(resource_type, EMPLOYEE_RESOURCE);
                    assert_eq!(id, "4");
                }
                other => panic!("Expected NotFound, got {other:?}"),
            }
        }

        assert_eq!(CountingStore::calls(&f.store.find_by_id), 2);
        assert!(!f.cache.contains(&cache_keys::employee_by_id(missing)));

        let created = f.service.create_employee(request("Eva", "Luna", 4)).await.unwrap();
        assert_eq!(created.id, missing);

        let found = f.service.get_employee(missing).await.unwrap();
        assert_eq!(found.first_names, "Eva");
        assert_eq!(CountingStore::calls(&f.store.find_by_id), 3);
    }

    #[tokio::test]
    async fn test_update_invalidates_item_and_collections() {
        let f = fixture(25);
        let id = EmployeeId::new(1);
        let query = EmployeeListQuery::all(page(1, 10));

        f.service.get_employee(id).await.unwrap();
        f.service.list_employees(query.clone()).await.unwrap();

        let response = f.service.update_employee(id, request("Eva", "Luna", 99)).await.unwrap();
        assert_eq!(response.id, id);
        assert!(response.cache_invalidated);
        assert!(!f.cache.contains(&cache_keys::employee_by_id(id)));
        assert!(!f.cache.contains(&cache_keys::collection_index()));

        let fresh = f.service.get_employee(id).await.unwrap();
        assert_eq!(fresh.first_names, "Eva");
        assert_eq!(CountingStore::calls(&f.store.find_by_id), 2);

        let listed = f.service.list_employees(query).await.unwrap();
        assert_eq!(listed.data[0].last_names, "Luna");
        assert_eq!(CountingStore::calls(&f.store.find_page), 2);
    }

    #[tokio::test]
    async fn test_create_invalidates_every_collection_view() {
        let f = fixture(25);
        let filtered = EmployeeListQuery {
            filter: diaz(),
            page: page(1, 10),
        };
        f.service.list_employees(filtered.clone()).await.unwrap();
        f.service
            .search_employees(EmployeeField::LastNames, "iaz", page(1, 10))
            .await
            .unwrap();

        let created = f.service.create_employee(request("Luis", "Diaz", 500)).await.unwrap();
        assert_eq!(created.id, EmployeeId::new(26));
        assert!(created.cache_invalidated);

        let after = f.service.list_employees(filtered).await.unwrap();
        assert_eq!(after.total, 6);
        let searched = f
            .service
            .search_employees(EmployeeField::LastNames, "iaz", page(1, 10))
            .await
            .unwrap();
        assert_eq!(searched.total, 6);
        assert_eq!(CountingStore::calls(&f.store.find_page), 4);
    }

    #[tokio::test]
    async fn test_patch_and_delete_invalidate() {
        let f = fixture(5);
        let id = EmployeeId::new(3);
        f.service.get_employee(id).await.unwrap();

        let patch = PatchEmployeeRequest {
            phone: Some("999-0000".to_string()),
            ..PatchEmployeeRequest::default()
        };
        assert!(f.service.patch_employee(id, patch).await.unwrap().cache_invalidated);
        assert_eq!(f.service.get_employee(id).await.unwrap().phone, "999-0000");

        assert!(f.service.delete_employee(id).await.unwrap().cache_invalidated);
        assert!(matches!(
            f.service.get_employee(id).await,
            Err(RosterError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_pattern_strategy_invalidates_without_index() {
        let policy = CachePolicy {
            invalidation: InvalidationStrategy::Pattern,
            ..CachePolicy::default()
        };
        let f = fixture_with(CountingStore::seeded(10), policy);
        let query = EmployeeListQuery::all(page(1, 5));

        f.service.list_employees(query.clone()).await.unwrap();
        assert!(!f.cache.contains(&cache_keys::collection_index()));

        f.service.delete_employee(EmployeeId::new(1)).await.unwrap();
        let after = f.service.list_employees(query).await.unwrap();
        assert_eq!(after.total, 9);
        assert_eq!(CountingStore::calls(&f.store.find_page), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let f = fixture(25);
        let query = EmployeeListQuery::all(page(1, 10));

        f.service.list_employees(query.clone()).await.unwrap();
        tokio::time::advance(Duration::from_secs(59)).await;
        f.service.list_employees(query.clone()).await.unwrap();
        assert_eq!(CountingStore::calls(&f.store.find_page), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        f.service.list_employees(query).await.unwrap();
        assert_eq!(CountingStore::calls(&f.store.find_page), 2);
        assert_eq!(CountingStore::calls(&f.store.count), 2);
    }

    #[tokio::test]
    async fn test_corrupt_entry_is_a_miss() {
        let f = fixture(3);
        let id = EmployeeId::new(1);
        let key = cache_keys::employee_by_id(id);
        f.cache.set_raw(&key, "{not json", Duration::from_secs(60)).await.unwrap();

        let employee = f.service.get_employee(id).await.unwrap();
        assert_eq!(employee.id, id);
        assert_eq!(CountingStore::calls(&f.store.find_by_id), 1);

        f.service.get_employee(id).await.unwrap();
        assert_eq!(CountingStore::calls(&f.store.find_by_id), 1);
    }

    #[tokio::test]
    async fn test_search_rejects_blank_term() {
        let f = fixture(3);

        let err = f
            .service
            .search_employees(EmployeeField::LastNames, "  ", PageRequest::first())
            .await
            .unwrap_err();

        assert!(matches!(err, RosterError::Validation(_)));
        assert_eq!(CountingStore::calls(&f.store.find_page), 0);
    }

    #[tokio::test]
    async fn test_zero_affected_mutations_touch_no_cache() {
        // No expectations: any cache call panics.
        let (store, service) = with_mock_cache(CountingStore::reporting(0), MockCache::new());
        let id = EmployeeId::new(42);

        let update = service.update_employee(id, request("Eva", "Luna", 1)).await;
        assert!(matches!(update, Err(RosterError::NotFound { .. })));

        let patch = PatchEmployeeRequest {
            address: Some("Nueva 1".to_string()),
            ..PatchEmployeeRequest::default()
        };
        assert!(matches!(
            service.patch_employee(id, patch).await,
            Err(RosterError::NotFound { .. })
        ));
        assert!(matches!(
            service.delete_employee(id).await,
            Err(RosterError::NotFound { .. })
        ));

        match service.create_employee(request("Eva", "Luna", 2)).await.unwrap_err() {
            RosterError::AffectedRows { operation, affected } => {
                assert_eq!(operation, "insert");
                assert_eq!(affected, 0);
            }
            other => panic!("Expected AffectedRows, got {other:?}"),
        }
        assert_eq!(CountingStore::calls(&store.mutations), 4);
    }

    #[tokio::test]
    async fn test_multi_row_mutation_is_persistence_error() {
        let (_, service) = with_mock_cache(CountingStore::reporting(2), MockCache::new());

        let err = service.delete_employee(EmployeeId::new(1)).await.unwrap_err();
        assert!(err.is_persistence());
        assert!(matches!(err, RosterError::AffectedRows { affected: 2, .. }));
    }

    #[tokio::test]
    async fn test_validation_precedes_store_and_cache() {
        let (store, service) = with_mock_cache(CountingStore::seeded(3), MockCache::new());

        let mut invalid = request("Eva", "Luna", 1);
        invalid.email = "nope".to_string();
        assert!(matches!(
            service.create_employee(invalid.clone()).await,
            Err(RosterError::Validation(_))
        ));
        assert!(matches!(
            service.update_employee(EmployeeId::new(1), invalid).await,
            Err(RosterError::Validation(_))
        ));
        assert!(matches!(
            service
                .patch_employee(EmployeeId::new(1), PatchEmployeeRequest::default())
                .await,
            Err(RosterError::Validation(_))
        ));

        assert_eq!(CountingStore::calls(&store.mutations), 0);
    }

    #[tokio::test]
    async fn test_store_errors_propagate_before_cache() {
        let (_, service) = with_mock_cache(CountingStore::seeded(3), MockCache::new());

        // Seeded employee 0 owns this email.
        let duplicate = request("Ana", "Diaz", 0);
        let err = service.create_employee(duplicate).await.unwrap_err();
        assert!(matches!(err, RosterError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_invalidation_failure_is_reported_not_raised() {
        let mut cache = MockCache::new();
        cache
            .expect_delete()
            .times(1)
            .returning(|_| Err(RosterError::cache("connection reset")));
        cache
            .expect_index_members()
            .times(1)
            .returning(|_| Err(RosterError::cache("connection reset")));
        let (store, service) = with_mock_cache(CountingStore::seeded(3), cache);
        let id = EmployeeId::new(1);

        let response = service.update_employee(id, request("Eva", "Luna", 7)).await.unwrap();

        assert_eq!(response.id, id);
        assert!(!response.cache_invalidated);
        let stored = store.inner.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.first_names, "Eva");
    }

    #[tokio::test]
    async fn test_index_strategy_deletes_listed_keys_and_index() {
        let mut cache = MockCache::new();
        cache
            .expect_index_members()
            .returning(|_| Ok(vec!["a".to_string(), "b".to_string()]));
        cache
            .expect_delete_many()
            .withf(|keys| keys.len() == 3 && keys[2] == cache_keys::collection_index())
            .times(1)
            .returning(|keys| Ok(keys.len() as u64));
        let (_, service) = with_mock_cache(CountingStore::seeded(3), cache);

        let created = service.create_employee(request("Eva", "Luna", 7)).await.unwrap();
        assert!(created.cache_invalidated);
    }

    #[tokio::test]
    async fn test_cache_outage_falls_back_to_store() {
        let mut cache = MockCache::new();
        cache
            .expect_get_raw()
            .returning(|_| Err(RosterError::cache("down")));
        cache
            .expect_set_raw()
            .returning(|_, _, _| Err(RosterError::cache("down")));
        cache
            .expect_index_add()
            .returning(|_, _, _| Err(RosterError::cache("down")));
        let (store, service) = with_mock_cache(CountingStore::seeded(25), cache);

        let employee = service.get_employee(EmployeeId::new(4)).await.unwrap();
        assert_eq!(employee.id, EmployeeId::new(4));

        let listed = service
            .list_employees(EmployeeListQuery::all(page(1, 10)))
            .await
            .unwrap();
        assert_eq!(listed.total, 25);
        assert_eq!(CountingStore::calls(&store.find_page), 1);
    }

    #[tokio::test]
    async fn test_unindexed_collection_is_not_cached() {
        let mut cache = MockCache::new();
        cache.expect_get_raw().returning(|_| Ok(None));
        cache
            .expect_index_add()
            .times(1)
            .returning(|_, _, _| Err(RosterError::cache("down")));
        cache.expect_set_raw().never();
        let (_, service) = with_mock_cache(CountingStore::seeded(5), cache);

        service
            .list_employees(EmployeeListQuery::all(page(1, 10)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_health_check() {
        let f = fixture(1);
        assert_eq!(f.service.health_check().await, HealthStatus::Healthy);

        let mut cache = MockCache::new();
        cache.expect_is_enabled().return_const(true);
        cache
            .expect_get_raw()
            .returning(|_| Err(RosterError::cache("down")));
        let (_, service) = with_mock_cache(CountingStore::seeded(1), cache);
        assert!(matches!(service.health_check().await, HealthStatus::Degraded(_)));
    }

    #[test]
    fn test_policy_from_config() {
        let config = CacheConfig {
            ttl_secs: 30,
            invalidation: InvalidationStrategy::Pattern,
            ..CacheConfig::default()
        };
        let policy = CachePolicy::from(&config);
        assert_eq!(policy.ttl, Duration::from_secs(30));
        assert_eq!(policy.invalidation, InvalidationStrategy::Pattern);
        assert_eq!(CachePolicy::default().ttl, Duration::from_secs(60));
    }
}
