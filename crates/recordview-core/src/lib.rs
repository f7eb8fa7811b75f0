//! recordview core - record loading, caching and the query pipeline.
//!
//! Records are fetched once from an object store by a [`Loader`], held by a
//! [`RecordCache`] for the life of the process, and served through
//! [`RecordService`], which filters, sorts and paginates them per query.

pub mod cache;
pub mod error;
pub mod loader;
pub mod model;
pub mod query;

pub use cache::{CacheStats, RecordCache};
pub use error::{InvalidQueryError, LoadError};
pub use loader::{decode_records, Loader, RecordSource, SourceConfig};
pub use model::{Record, RecordCollection, Status};
pub use query::{
    execute, FilterSpec, PageRequest, PageResult, RecordQuery, RecordService, SortField,
    SortOrder, SortSpec,
};
