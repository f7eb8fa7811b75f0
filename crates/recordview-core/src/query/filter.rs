//! Filter stage.
//!
//! Selects records matching an optional case-insensitive name substring and
//! an optional exact status. Both predicates are conjunctive; an empty filter
//! keeps every record in its original order.

use crate::model::{Record, Status};

/// Record filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Substring the record name must contain, ignoring case.
    pub name: Option<String>,
    /// Status the record must have.
    pub status: Option<Status>,
}

impl FilterSpec {
    /// Create an empty filter that keeps every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Require the record name to contain `name`, ignoring case.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Require the record status to equal `status`.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Whether no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.name_needle().is_none() && self.status.is_none()
    }

    /// Lower-cased name needle, or `None` when absent or empty.
    fn name_needle(&self) -> Option<String> {
        self.name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(str::to_lowercase)
    }

    /// Evaluate the filter against a single record.
    pub fn matches(&self, record: &Record) -> bool {
        FilterEvaluator::new(self).matches(record)
    }
}

/// A filter prepared for repeated evaluation.
struct FilterEvaluator {
    needle: Option<String>,
    status: Option<Status>,
}

impl FilterEvaluator {
    fn new(spec: &FilterSpec) -> Self {
        Self {
            needle: spec.name_needle(),
            status: spec.status,
        }
    }

    fn matches(&self, record: &Record) -> bool {
        if let Some(status) = self.status {
            if record.status != status {
                return false;
            }
        }
        match &self.needle {
            // The record name is the haystack, the filter text the needle.
            Some(needle) => record.name.to_lowercase().contains(needle.as_str()),
            None => true,
        }
    }
}

/// Keep the records matching `filter`, preserving their relative order.
pub fn filter_records<'a>(records: &'a [Record], filter: &FilterSpec) -> Vec<&'a Record> {
    if filter.is_empty() {
        return records.iter().collect();
    }

    let evaluator = FilterEvaluator::new(filter);
    records.iter().filter(|r| evaluator.matches(r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<Record> {
        vec![
            Record::new(2988, "agitated_galileo", Status::Completed),
            Record::new(1389, "vibrant_hypatia", Status::Completed),
            Record::new(4256, "quizzical_yalow", Status::Canceled),
            Record::new(3589, "eloquent_davinci", Status::Completed),
            Record::new(5985, "fervent_nightingale", Status::Error),
        ]
    }

    fn ids(records: &[&Record]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let data = records();
        let kept = filter_records(&data, &FilterSpec::new());
        assert_eq!(ids(&kept), vec![2988, 1389, 4256, 3589, 5985]);
    }

    #[test]
    fn test_empty_name_is_ignored() {
        let data = records();
        let kept = filter_records(&data, &FilterSpec::new().with_name(""));
        assert_eq!(kept.len(), data.len());
    }

    #[test]
    fn test_name_is_case_insensitive_substring() {
        let data = records();
        let kept = filter_records(&data, &FilterSpec::new().with_name("HYPAT"));
        assert_eq!(ids(&kept), vec![1389]);

        let kept = filter_records(&data, &FilterSpec::new().with_name("a"));
        assert_eq!(ids(&kept), vec![2988, 1389, 4256, 3589, 5985]);
    }

    #[test]
    fn test_name_filter_is_not_reversed() {
        // A filter longer than the name must not match just because it
        // contains the name.
        let data = records();
        let kept = filter_records(&data, &FilterSpec::new().with_name("xx_vibrant_hypatia_xx"));
        assert!(kept.is_empty());
    }

    #[test]
    fn test_status_exact_match() {
        let data = records();
        let kept = filter_records(&data, &FilterSpec::new().with_status(Status::Completed));
        assert_eq!(ids(&kept), vec![2988, 1389, 3589]);
    }

    #[test]
    fn test_filters_are_conjunctive() {
        let data = records();
        let filter = FilterSpec::new().with_name("i").with_status(Status::Completed);
        let kept = filter_records(&data, &filter);
        assert_eq!(ids(&kept), vec![2988, 1389, 3589]);

        let filter = FilterSpec::new().with_name("yalow").with_status(Status::Completed);
        assert!(filter_records(&data, &filter).is_empty());
    }

    #[test]
    fn test_matches_single_record() {
        let record = Record::new(1, "Quizzical_Yalow", Status::Canceled);
        assert!(FilterSpec::new().with_name("zical_y").matches(&record));
        assert!(!FilterSpec::new().with_status(Status::Error).matches(&record));
    }
}
