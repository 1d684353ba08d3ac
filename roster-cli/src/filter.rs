//! Filter predicates over merged records
//!
//! Search is a lower-cased substring match on the name; categorical
//! filters are exact; the late-only filter keys off the derived deadline
//! status. Distinct-value helpers feed the CLI the same option lists the
//! original dropdowns showed.

use std::collections::BTreeSet;

use crate::types::{DateStatus, InventoryRecord, Merged, ProcessRow};

/// Inventory filter; empty fields match everything.
#[derive(Debug, Clone, Default)]
pub struct InventoryFilter {
    pub search: String,
    pub category: Option<String>,
    pub tag: Option<String>,
}

impl InventoryFilter {
    pub fn matches(&self, row: &Merged<InventoryRecord>) -> bool {
        let search_ok = self.search.is_empty()
            || row
                .record
                .full_name
                .to_lowercase()
                .contains(&self.search.to_lowercase());
        let category_ok = self
            .category
            .as_ref()
            .is_none_or(|c| &row.record.category == c);
        let tag_ok = self.tag.as_ref().is_none_or(|t| &row.record.tag == t);
        search_ok && category_ok && tag_ok
    }

    pub fn apply<'a>(&self, rows: &'a [Merged<InventoryRecord>]) -> Vec<&'a Merged<InventoryRecord>> {
        rows.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Process filter; search also matches the tracking number's string form.
#[derive(Debug, Clone, Default)]
pub struct ProcessFilter {
    pub search: String,
    pub status: Option<String>,
    pub reference: Option<String>,
    pub late_only: bool,
}

impl ProcessFilter {
    pub fn matches(&self, row: &ProcessRow) -> bool {
        let record = &row.merged.record;
        let search = self.search.to_lowercase();
        let search_ok = search.is_empty()
            || record.full_name.to_lowercase().contains(&search)
            || record.s_nu.to_string().contains(&search);
        let status_ok = self
            .status
            .as_ref()
            .is_none_or(|s| &record.status.to_string() == s);
        let reference_ok = self
            .reference
            .as_ref()
            .is_none_or(|r| &record.reference.to_string() == r);
        let late_ok = !self.late_only || row.date_status == DateStatus::Late;
        search_ok && status_ok && reference_ok && late_ok
    }

    pub fn apply<'a>(&self, rows: &'a [ProcessRow]) -> Vec<&'a ProcessRow> {
        rows.iter().filter(|r| self.matches(r)).collect()
    }
}

/// Sorted unique non-empty values for a field of the merged records.
pub fn distinct_values<T, F>(rows: &[T], field: F) -> Vec<String>
where
    F: Fn(&T) -> String,
{
    rows.iter()
        .map(|r| field(r))
        .filter(|v| !v.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
