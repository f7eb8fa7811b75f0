//! Paginate stage.

use serde::{Deserialize, Serialize};

use crate::error::InvalidQueryError;
use crate::model::Record;

/// Default page number.
pub const DEFAULT_PAGE: usize = 1;

/// Default page size.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest allowed page size.
pub const MAX_PAGE_SIZE: usize = 100;

/// Largest page number representable on this target.
const MAX_PAGE: i64 = if usize::BITS < i64::BITS {
    usize::MAX as i64
} else {
    i64::MAX
};

/// A validated page request. `page >= 1`, `1 <= page_size <= 100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    page_size: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Validate a page number and page size.
    pub fn new(page: i64, page_size: i64) -> Result<Self, InvalidQueryError> {
        let page_out_of_range = || InvalidQueryError::OutOfRange {
            param: "page",
            value: page,
            min: 1,
            max: MAX_PAGE,
        };
        let page_size_out_of_range = || InvalidQueryError::OutOfRange {
            param: "pageSize",
            value: page_size,
            min: 1,
            max: MAX_PAGE_SIZE as i64,
        };

        if page < 1 {
            return Err(page_out_of_range());
        }
        if !(1..=MAX_PAGE_SIZE as i64).contains(&page_size) {
            return Err(page_size_out_of_range());
        }

        Ok(Self {
            page: usize::try_from(page).map_err(|_| page_out_of_range())?,
            page_size: usize::try_from(page_size).map_err(|_| page_size_out_of_range())?,
        })
    }

    /// Parse optional textual parameters, applying defaults for absent or empty ones.
    pub fn parse(page: Option<&str>, page_size: Option<&str>) -> Result<Self, InvalidQueryError> {
        let page = parse_number("page", page)?.unwrap_or(DEFAULT_PAGE as i64);
        let page_size = parse_number("pageSize", page_size)?.unwrap_or(DEFAULT_PAGE_SIZE as i64);
        Self::new(page, page_size)
    }

    /// One-based page number.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Records per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Half-open index range `[begin, end)` of this page within `total` records.
    pub fn bounds(&self, total: usize) -> (usize, usize) {
        let begin = self.page_size.saturating_mul(self.page - 1);
        let end = self.page_size.saturating_mul(self.page).min(total);
        (begin, end)
    }
}

fn parse_number(param: &'static str, raw: Option<&str>) -> Result<Option<i64>, InvalidQueryError> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(text) => text
            .parse::<i64>()
            .map(Some)
            .map_err(|_| InvalidQueryError::InvalidNumber {
                param,
                value: text.to_string(),
            }),
    }
}

/// One page of records plus totals over the whole filtered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    /// `ceil(total_records / page_size)`; zero when there are no records.
    pub total_pages: usize,
    /// Number of records after filtering, before slicing.
    pub total_records: usize,
    /// Records on the requested page, in sorted order.
    pub items: Vec<Record>,
}

/// Number of pages needed for `total` records.
pub fn count_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size)
}

/// Slice the requested page out of `records`, copying the selected records.
///
/// A page past the end yields no items; it is not an error.
pub fn paginate(records: &[&Record], page: &PageRequest) -> PageResult {
    let total = records.len();
    let (begin, end) = page.bounds(total);

    let items = if begin >= total {
        Vec::new()
    } else {
        records[begin..end].iter().map(|r| (*r).clone()).collect()
    };

    PageResult {
        total_pages: count_pages(total, page.page_size()),
        total_records: total,
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;

    fn sequence(n: i64) -> Vec<Record> {
        (1..=n)
            .map(|i| Record::new(i, format!("record_{}", i), Status::Completed))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let page = PageRequest::default();
        assert_eq!(page.page(), 1);
        assert_eq!(page.page_size(), 20);
        assert_eq!(PageRequest::parse(None, None).unwrap(), page);
        assert_eq!(PageRequest::parse(Some(""), Some(" ")).unwrap(), page);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(matches!(
            PageRequest::new(0, 20),
            Err(InvalidQueryError::OutOfRange { param: "page", .. })
        ));
        assert!(matches!(
            PageRequest::new(1, 0),
            Err(InvalidQueryError::OutOfRange { param: "pageSize", .. })
        ));
        assert!(matches!(
            PageRequest::new(1, 101),
            Err(InvalidQueryError::OutOfRange { param: "pageSize", .. })
        ));
        assert!(PageRequest::new(1, 100).is_ok());
    }

    #[test]
    fn test_rejects_non_numeric() {
        assert_eq!(
            PageRequest::parse(Some("two"), None),
            Err(InvalidQueryError::InvalidNumber {
                param: "page",
                value: "two".to_string(),
            })
        );
        assert!(PageRequest::parse(None, Some("1.5")).is_err());
    }

    #[test]
    fn test_count_pages() {
        assert_eq!(count_pages(0, 20), 0);
        assert_eq!(count_pages(1, 20), 1);
        assert_eq!(count_pages(20, 20), 1);
        assert_eq!(count_pages(21, 20), 2);
        assert_eq!(count_pages(45, 20), 3);
    }

    #[test]
    fn test_last_partial_page() {
        let data = sequence(45);
        let view: Vec<&Record> = data.iter().collect();
        let result = paginate(&view, &PageRequest::new(3, 20).unwrap());

        assert_eq!(result.total_pages, 3);
        assert_eq!(result.total_records, 45);
        let ids: Vec<i64> = result.items.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![41, 42, 43, 44, 45]);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let data = sequence(5);
        let view: Vec<&Record> = data.iter().collect();
        let result = paginate(&view, &PageRequest::new(2, 5).unwrap());

        assert!(result.items.is_empty());
        assert_eq!(result.total_records, 5);
        assert_eq!(result.total_pages, 1);
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let data = sequence(3);
        let view: Vec<&Record> = data.iter().collect();
        let page = PageRequest::new(MAX_PAGE, 100).unwrap();
        assert_eq!(page.page(), usize::MAX.min(i64::MAX as usize));

        let result = paginate(&view, &page);
        assert!(result.items.is_empty());
        assert_eq!(result.total_records, 3);
    }

    #[cfg(target_pointer_width = "32")]
    #[test]
    fn test_page_beyond_usize_is_rejected() {
        let page = i64::from(u32::MAX) + 1;
        assert_eq!(
            PageRequest::new(page, 20),
            Err(InvalidQueryError::OutOfRange {
                param: "page",
                value: page,
                min: 1,
                max: MAX_PAGE,
            })
        );
    }

    #[test]
    fn test_empty_input() {
        let result = paginate(&[], &PageRequest::default());
        assert_eq!(result.total_pages, 0);
        assert_eq!(result.total_records, 0);
        assert!(result.items.is_empty());
    }
}
