//! Sort stage.

use std::cmp::Ordering;
use std::fmt;

use crate::error::InvalidQueryError;
use crate::model::Record;

/// Field to order records by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortField {
    /// Numeric record id.
    #[default]
    Id,
    /// Record name, ignoring case.
    Name,
    /// Creation time.
    CreatedOn,
}

impl SortField {
    /// Parse a sort field name, ignoring case.
    ///
    /// Accepts `id`, `name`, `createdOn` and `created_on`.
    pub fn parse(value: &str) -> Result<Self, InvalidQueryError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ID" => Ok(SortField::Id),
            "NAME" => Ok(SortField::Name),
            "CREATEDON" | "CREATED_ON" => Ok(SortField::CreatedOn),
            _ => Err(InvalidQueryError::InvalidSortField(value.to_string())),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortField::Id => "id",
            SortField::Name => "name",
            SortField::CreatedOn => "createdOn",
        })
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortOrder {
    /// Parse `asc` or `desc`, ignoring case.
    pub fn parse(value: &str) -> Result<Self, InvalidQueryError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            _ => Err(InvalidQueryError::InvalidSortOrder(value.to_string())),
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

/// Sort key and direction. Defaults to id ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to order by.
    pub field: SortField,
    /// Direction.
    pub order: SortOrder,
}

impl SortSpec {
    /// Create a sort spec.
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    /// Ascending sort on `field`.
    pub fn asc(field: SortField) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    /// Descending sort on `field`.
    pub fn desc(field: SortField) -> Self {
        Self::new(field, SortOrder::Desc)
    }
}

/// Stable sort of a record view. Records with equal keys keep their input order
/// in both directions.
pub fn sort_records<'a>(mut records: Vec<&'a Record>, sort: &SortSpec) -> Vec<&'a Record> {
    let order = sort.order;

    match sort.field {
        SortField::Id => {
            records.sort_by(|a, b| order.apply(a.id.cmp(&b.id)));
            records
        }
        SortField::CreatedOn => {
            records.sort_by(|a, b| order.apply(a.created_on.cmp(&b.created_on)));
            records
        }
        SortField::Name => {
            // Lower-case each name once rather than on every comparison.
            let mut keyed: Vec<(String, &'a Record)> = records
                .into_iter()
                .map(|r| (r.name.to_lowercase(), r))
                .collect();
            keyed.sort_by(|a, b| order.apply(a.0.cmp(&b.0)));
            keyed.into_iter().map(|(_, r)| r).collect()
        }
    }
}
