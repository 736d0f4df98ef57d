//! Prometheus metrics for the employee cache.

use metrics::{counter, describe_counter};

/// Metric names for the cache layer.
pub mod names {
    /// Lookups answered from the cache.
    pub const CACHE_HITS_TOTAL: &str = "roster_cache_hits_total";
    /// Lookups that fell through to the store.
    pub const CACHE_MISSES_TOTAL: &str = "roster_cache_misses_total";
    /// Cache operations that failed and were bypassed.
    pub const CACHE_ERRORS_TOTAL: &str = "roster_cache_errors_total";
    /// Successful invalidation passes after a write.
    pub const CACHE_INVALIDATIONS_TOTAL: &str = "roster_cache_invalidations_total";
    /// Invalidation passes that could not complete.
    pub const CACHE_INVALIDATION_FAILURES_TOTAL: &str = "roster_cache_invalidation_failures_total";
}

/// Which family of cache entry an event concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A single employee.
    Item,
    /// A page of a list or search.
    Collection,
}

impl EntryKind {
    /// Label value for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Collection => "collection",
        }
    }
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Total number of cache hits");
    describe_counter!(names::CACHE_MISSES_TOTAL, "Total number of cache misses");
    describe_counter!(
        names::CACHE_ERRORS_TOTAL,
        "Total number of cache operations that failed and were bypassed"
    );
    describe_counter!(
        names::CACHE_INVALIDATIONS_TOTAL,
        "Total number of completed cache invalidations"
    );
    describe_counter!(
        names::CACHE_INVALIDATION_FAILURES_TOTAL,
        "Total number of cache invalidations that failed after a successful write"
    );
}

/// Helper for recording cache metrics.
pub struct CacheMetrics;

impl CacheMetrics {
    /// Record a cache hit.
    pub fn hit(kind: EntryKind) {
        counter!(names::CACHE_HITS_TOTAL, "kind" => kind.as_str()).increment(1);
    }

    /// Record a cache miss.
    pub fn miss(kind: EntryKind) {
        counter!(names::CACHE_MISSES_TOTAL, "kind" => kind.as_str()).increment(1);
    }

    /// Record a failed cache operation.
    pub fn error(operation: &'static str) {
        counter!(names::CACHE_ERRORS_TOTAL, "operation" => operation).increment(1);
    }

    /// Record a completed invalidation.
    pub fn invalidated(strategy: &'static str) {
        counter!(names::CACHE_INVALIDATIONS_TOTAL, "strategy" => strategy).increment(1);
    }

    /// Record a failed invalidation.
    pub fn invalidation_failed(strategy: &'static str) {
        counter!(names::CACHE_INVALIDATION_FAILURES_TOTAL, "strategy" => strategy).increment(1);
    }
}
