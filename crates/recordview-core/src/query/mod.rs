//! Record query pipeline.
//!
//! A query runs three pure stages over the cached collection, always in the
//! same order: filter, then a stable sort, then pagination. The cached
//! collection is only borrowed; the returned page owns copies of its records.

mod filter;
mod paginate;
mod sort;

pub use filter::{filter_records, FilterSpec};
pub use paginate::{
    count_pages, paginate, PageRequest, PageResult, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
pub use sort::{sort_records, SortField, SortOrder, SortSpec};

use std::sync::Arc;

use tracing::debug;

use crate::cache::RecordCache;
use crate::error::LoadError;
use crate::loader::Loader;
use crate::model::Record;

/// A complete, validated record query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordQuery {
    /// Which records to keep.
    pub filter: FilterSpec,
    /// How to order them.
    pub sort: SortSpec,
    /// Which slice to return.
    pub page: PageRequest,
}

impl RecordQuery {
    /// Query with no filter, id ascending, first page of 20.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter.
    pub fn with_filter(mut self, filter: FilterSpec) -> Self {
        self.filter = filter;
        self
    }

    /// Set the sort.
    pub fn with_sort(mut self, sort: SortSpec) -> Self {
        self.sort = sort;
        self
    }

    /// Set the page.
    pub fn with_page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }
}

/// Run filter, sort and paginate over `records`.
pub fn execute(records: &[Record], query: &RecordQuery) -> PageResult {
    let filtered = filter_records(records, &query.filter);
    let sorted = sort_records(filtered, &query.sort);
    paginate(&sorted, &query.page)
}

/// Answers record queries from a lazily loaded cache.
pub struct RecordService {
    cache: RecordCache,
}

impl RecordService {
    /// Create a service whose cache is populated by `loader`.
    pub fn new(loader: Arc<dyn Loader>) -> Self {
        Self {
            cache: RecordCache::new(loader),
        }
    }

    /// Run `query` against the cached collection, loading it first if needed.
    pub async fn query(&self, query: &RecordQuery) -> Result<PageResult, LoadError> {
        let records = self.cache.get().await?;
        let result = execute(&records, query);

        debug!(
            name = ?query.filter.name,
            status = ?query.filter.status,
            sort_field = %query.sort.field,
            sort_order = %query.sort.order,
            page = query.page.page(),
            page_size = query.page.page_size(),
            total_records = result.total_records,
            items = result.items.len(),
            "Executed record query"
        );

        Ok(result)
    }

    /// Load the collection ahead of the first query.
    pub async fn warm(&self) -> Result<usize, LoadError> {
        Ok(self.cache.get().await?.len())
    }

    /// The underlying cache.
    pub fn cache(&self) -> &RecordCache {
        &self.cache
    }
}
