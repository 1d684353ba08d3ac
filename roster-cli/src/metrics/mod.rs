//! Aggregate metrics and data-quality checks
//!
//! Pure functions over the merged dataset, recomputed on every load.
//! Quality findings are advisory values, never errors.

pub mod date_status;

use std::collections::{HashMap, HashSet};

use crate::ingest::departures::{MONTHS_TR, UNDETERMINED_MONTH};
use crate::types::{
    CategoryCount, DepartureRecord, DepartureStats, InventoryRecord, Merged, Metrics, ProcessRow,
    QualityNote,
};

const UNDETERMINED: &str = "BELİRSİZ";

/// Aggregate counts over inventory and process records.
///
/// `focus_category` selects the category whose role (tag) breakdown is
/// reported separately. Max-category ties resolve to the category seen
/// first in input order.
pub fn calculate_metrics(
    inventory: &[Merged<InventoryRecord>],
    process: &[ProcessRow],
    focus_category: &str,
) -> Metrics {
    let mut metrics = Metrics {
        total_inventory: inventory.len(),
        total_process: process.len(),
        ..Default::default()
    };

    for row in inventory {
        let category = row.record.category.clone();
        let count = metrics.category_counts.entry(category.clone()).or_insert(0);
        if *count == 0 {
            metrics.category_order.push(category.clone());
        }
        *count += 1;

        if row.record.category == focus_category {
            let role = if row.record.tag.trim().is_empty() {
                UNDETERMINED.to_string()
            } else {
                row.record.tag.clone()
            };
            *metrics.focus_roles.entry(role).or_insert(0) += 1;
        }
    }

    let mut max_count = 0;
    for category in &metrics.category_order {
        let count = metrics.category_counts[category];
        if count > max_count {
            max_count = count;
            metrics.max_category = Some(CategoryCount {
                name: category.clone(),
                count,
            });
        }
    }

    for row in process {
        let status = match row.merged.record.status.to_string().trim() {
            "" => UNDETERMINED.to_string(),
            s => s.to_uppercase(),
        };
        *metrics.status_breakdown.entry(status).or_insert(0) += 1;
    }

    metrics
}

/// Run the fixed content-integrity rule set.
///
/// Each rule yields at most one note; only the baseline count check emits
/// an explicit ok, every other rule stays silent at zero findings.
pub fn run_quality_checks(
    inventory: &[Merged<InventoryRecord>],
    process: &[ProcessRow],
    expected_total: usize,
) -> Vec<QualityNote> {
    let mut checks = Vec::new();

    if inventory.len() == expected_total {
        checks.push(QualityNote::ok(
            "Personel Sayısı",
            format!("Beklenen sayı ({}) doğrulandı.", expected_total),
        ));
    } else {
        checks.push(QualityNote::warn(
            "Personel Sayısı",
            format!(
                "Beklenen {}, bulunan {}. Veri eksik veya fazla olabilir.",
                expected_total,
                inventory.len()
            ),
        ));
    }

    let mut seen = HashSet::new();
    let mut dupes = Vec::new();
    for row in inventory {
        if !seen.insert(row.record.full_name.clone()) {
            dupes.push(row.record.full_name.clone());
        }
    }
    if !dupes.is_empty() {
        checks.push(QualityNote::fail(
            "Mükerrer (Envanter)",
            format!("{} tekrar: {}...", dupes.len(), dupes[..dupes.len().min(2)].join(", ")),
        ));
    }

    let empty_refs = process
        .iter()
        .filter(|p| p.merged.record.reference.is_missing())
        .count();
    if empty_refs > 0 {
        checks.push(QualityNote::warn(
            "Eksik Sorumlu",
            format!("{} kayıtta sorumlu yok.", empty_refs),
        ));
    }

    let missing_tracking = process
        .iter()
        .filter(|p| p.merged.record.app_no.is_missing() && p.merged.record.s_nu.is_missing())
        .count();
    if missing_tracking > 0 {
        checks.push(QualityNote::fail(
            "Eksik Başvuru No",
            format!("{} kayıtta takip numarası yok.", missing_tracking),
        ));
    }

    checks
}

/// Departure counts per month plus the peak month. Records bucketed as
/// undetermined count toward the total but not toward any month.
pub fn departure_stats(records: &[Merged<DepartureRecord>]) -> DepartureStats {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for row in records {
        if row.record.exit_month != UNDETERMINED_MONTH {
            *counts.entry(row.record.exit_month.as_str()).or_insert(0) += 1;
        }
    }

    let by_month: Vec<(String, usize)> = MONTHS_TR
        .iter()
        .map(|m| (m.to_string(), counts.get(m).copied().unwrap_or(0)))
        .collect();

    let mut peak_month = UNDETERMINED_MONTH.to_string();
    let mut peak_count = 0;
    for (month, count) in &by_month {
        if *count > peak_count {
            peak_count = *count;
            peak_month = month.clone();
        }
    }

    DepartureStats {
        by_month,
        peak_month,
        peak_count,
        total: records.len(),
    }
}
