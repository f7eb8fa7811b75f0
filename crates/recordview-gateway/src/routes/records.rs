//! Records endpoint.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use recordview_core::{
    FilterSpec, InvalidQueryError, PageRequest, PageResult, RecordQuery, SortField, SortOrder,
    SortSpec, Status,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::AppState;

/// Records routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/records", get(handle_get_records))
}

/// Raw query parameters for the records endpoint.
///
/// Everything is taken as text so that malformed values are reported through
/// [`InvalidQueryError`] rather than the extractor's own rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsParams {
    /// Case-insensitive name substring.
    pub name: Option<String>,
    /// Exact status.
    pub status: Option<String>,
    /// One-based page number.
    pub page: Option<String>,
    /// Records per page.
    pub page_size: Option<String>,
    /// Sort field.
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<String>,
}

/// Treat empty parameters as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl TryFrom<&RecordsParams> for RecordQuery {
    type Error = InvalidQueryError;

    fn try_from(params: &RecordsParams) -> Result<Self, Self::Error> {
        let mut filter = FilterSpec::new();
        if let Some(name) = params.name.as_deref().filter(|s| !s.is_empty()) {
            filter = filter.with_name(name);
        }
        if let Some(status) = present(&params.status) {
            filter = filter.with_status(Status::parse(status)?);
        }

        let order = present(&params.sort_order)
            .map(SortOrder::parse)
            .transpose()?
            .unwrap_or_default();
        // An order without a field falls back to ID ascending.
        let sort = match present(&params.sort_by) {
            Some(field) => SortSpec::new(SortField::parse(field)?, order),
            None => SortSpec::default(),
        };

        let page = PageRequest::parse(present(&params.page), present(&params.page_size))?;

        Ok(RecordQuery::new()
            .with_filter(filter)
            .with_sort(sort)
            .with_page(page))
    }
}

/// Handle a paginated records query.
async fn handle_get_records(
    State(state): State<AppState>,
    Query(params): Query<RecordsParams>,
) -> Result<Json<PageResult>, AppError> {
    let query = RecordQuery::try_from(&params)?;
    let page = state.service.query(&query).await?;
    Ok(Json(page))
}
