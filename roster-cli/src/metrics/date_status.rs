//! Deadline status derivation for process records
//!
//! A process record's description cell sometimes carries a follow-up date
//! (as an Excel serial or a `DD.MM.YYYY` substring). Relative to the
//! caller-supplied current date that yields late / closing / normal.
//! Stateless: recomputed against `today` on every load cycle.

use chrono::NaiveDate;

use crate::ingest::dates::normalize_date;
use crate::types::{DateStatus, Merged, ProcessRecord, ProcessRow};

/// Days ahead (inclusive) that count as "closing".
const CLOSING_WINDOW_DAYS: i64 = 7;

/// Classify one extracted date against today.
fn classify(date: NaiveDate, today: NaiveDate) -> DateStatus {
    let diff_days = (date - today).num_days();
    if diff_days < 0 {
        DateStatus::Late
    } else if diff_days <= CLOSING_WINDOW_DAYS {
        DateStatus::Closing
    } else {
        DateStatus::Normal
    }
}

/// Attach a deadline status to every merged process record.
pub fn augment_process_dates(records: Vec<Merged<ProcessRecord>>, today: NaiveDate) -> Vec<ProcessRow> {
    records
        .into_iter()
        .map(|merged| {
            let date_status = normalize_date(&merged.record.description)
                .map(|d| classify(d, today))
                .unwrap_or_default();
            ProcessRow { merged, date_status }
        })
        .collect()
}
