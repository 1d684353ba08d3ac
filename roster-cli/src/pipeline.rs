//! The load cycle
//!
//! Fetch all four sources concurrently (all-or-nothing), parse, overlay
//! overrides, derive deadline statuses, then compute metrics and quality
//! checks. Either the whole snapshot is produced or the cycle fails with a
//! single error — no partial dataset is ever assembled.

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};

use crate::config::Config;
use crate::fetch::fetch_workbook;
use crate::ingest::{extract_departures, extract_inventory, extract_leave, extract_process};
use crate::metrics::date_status::augment_process_dates;
use crate::metrics::{calculate_metrics, departure_stats, run_quality_checks};
use crate::overrides::{OverrideStore, merge_with_overrides};
use crate::types::{
    DepartureRecord, DepartureStats, Domain, InventoryRecord, LeaveRecord, Merged, Metrics,
    ProcessRow, QualityNote,
};

/// One fully-reconciled load of all four domains.
pub struct Snapshot {
    pub inventory: Vec<Merged<InventoryRecord>>,
    pub process: Vec<ProcessRow>,
    pub leave: Vec<Merged<LeaveRecord>>,
    pub departures: Vec<Merged<DepartureRecord>>,
    /// Structural notes from extraction plus content checks from the
    /// quality engine, in that order
    pub quality: Vec<QualityNote>,
    pub metrics: Metrics,
    pub departure_stats: DepartureStats,
    pub loaded_at: DateTime<Utc>,
}

/// Run one load cycle against `today`.
pub async fn load_snapshot(
    config: &Config,
    store: &dyn OverrideStore,
    today: NaiveDate,
) -> Result<Snapshot> {
    log::info!("load cycle started");

    let (mut inv_wb, mut proc_wb, mut leave_wb, mut dep_wb) = tokio::try_join!(
        fetch_workbook(&config.sources.inventory),
        fetch_workbook(&config.sources.process),
        fetch_workbook(&config.sources.leave),
        fetch_workbook(&config.sources.departures),
    )?;

    let inventory = extract_inventory(&mut inv_wb);
    let process = extract_process(&mut proc_wb).context("Takip çizelgesi okunamadı")?;
    let leave = extract_leave(&mut leave_wb, &config.leave_period);
    let departures = extract_departures(&mut dep_wb);

    let mut quality = Vec::new();
    quality.extend(inventory.notes);
    quality.extend(process.notes);
    quality.extend(leave.notes);
    quality.extend(departures.notes);

    let overrides = store.load().await?;

    let inventory = merge_with_overrides(inventory.records, Domain::Inventory, &overrides)?;
    let process = merge_with_overrides(process.records, Domain::Process, &overrides)?;
    let leave = merge_with_overrides(leave.records, Domain::Leave, &overrides)?;
    let departures = merge_with_overrides(departures.records, Domain::Departure, &overrides)?;

    let process = augment_process_dates(process, today);

    let metrics = calculate_metrics(&inventory, &process, &config.focus_category);
    quality.extend(run_quality_checks(&inventory, &process, config.expected_total));
    let departure_stats = departure_stats(&departures);

    log::info!(
        "load cycle done: {} inventory, {} process, {} leave, {} departures, {} notes",
        inventory.len(),
        process.len(),
        leave.len(),
        departures.len(),
        quality.len()
    );

    Ok(Snapshot {
        inventory,
        process,
        leave,
        departures,
        quality,
        metrics,
        departure_stats,
        loaded_at: Utc::now(),
    })
}
