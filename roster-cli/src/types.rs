//! Domain types shared across the ingest, merge and metrics layers

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single spreadsheet cell value after coercion.
///
/// Source cells arrive as text, numbers (including Excel date serials) or
/// nothing at all; fields that can legitimately hold either shape (tracking
/// numbers, free-text descriptions that are sometimes dates) keep this
/// scalar form instead of being forced to a string at extraction time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Number(f64),
    Text(String),
}

impl Scalar {
    /// True when the cell holds nothing useful (empty or whitespace text
    /// counts as missing, same as an empty cell).
    pub fn is_missing(&self) -> bool {
        match self {
            Scalar::Null => true,
            Scalar::Text(s) => s.trim().is_empty(),
            Scalar::Number(_) => false,
        }
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::Null
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => Ok(()),
            // Whole-number serials print without the trailing ".0"
            Scalar::Number(n) if n.fract() == 0.0 => write!(f, "{}", *n as i64),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Text(s) => write!(f, "{}", s),
        }
    }
}

/// One personnel inventory row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub full_name: String,
    pub category: String,
    pub tag: String,
    /// Fields added by overrides that have no typed counterpart
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One process-tracking row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRecord {
    pub s_nu: Scalar,
    pub full_name: String,
    pub job: Scalar,
    pub app_no: Scalar,
    pub status: Scalar,
    /// Free text or a date (text `DD.MM.YYYY` or an Excel serial)
    pub description: Scalar,
    pub reference: Scalar,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One leave row for the configured period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaveRecord {
    pub full_name: String,
    pub leave_type: String,
    pub start_date: Scalar,
    pub end_date: Scalar,
    pub days: Scalar,
    pub notes: Scalar,
    pub period: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One departure row, bucketed by exit month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartureRecord {
    pub full_name: String,
    pub entry_date: Scalar,
    pub exit_date: Scalar,
    /// Turkish month name, or `BELİRSİZ` when the exit date is unparseable
    pub exit_month: String,
    pub reason: Scalar,
    pub category: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Time-relative classification of a process record's deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStatus {
    #[default]
    Normal,
    Late,
    Closing,
}

impl fmt::Display for DateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateStatus::Normal => write!(f, "normal"),
            DateStatus::Late => write!(f, "late"),
            DateStatus::Closing => write!(f, "closing"),
        }
    }
}

/// A raw record paired with its derived identity and override state.
///
/// Produced only by the merge step; every raw record yields exactly one
/// `Merged` in input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merged<T> {
    pub id: String,
    pub modified: bool,
    #[serde(flatten)]
    pub record: T,
}

/// Derived deadline status of a merged process record, recomputed against
/// the caller-supplied current date on every load cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessRow {
    #[serde(flatten)]
    pub merged: Merged<ProcessRecord>,
    pub date_status: DateStatus,
}

/// Severity of an advisory finding. Never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Ok,
    Warn,
    Fail,
}

/// An advisory finding about structural or content integrity, rebuilt on
/// every load and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityNote {
    pub severity: Severity,
    pub label: String,
    pub message: String,
}

impl QualityNote {
    pub fn new(severity: Severity, label: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            label: label.into(),
            message: message.into(),
        }
    }

    pub fn ok(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Ok, label, message)
    }

    pub fn warn(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, label, message)
    }

    pub fn fail(label: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Fail, label, message)
    }
}

/// Aggregate counts over the merged dataset. Purely computed, not stored.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Metrics {
    pub total_inventory: usize,
    pub total_process: usize,
    pub category_counts: HashMap<String, usize>,
    /// Categories in first-appearance order, so max-category ties resolve
    /// deterministically (first seen wins)
    pub category_order: Vec<String>,
    /// Role breakdown within the configured focus category
    pub focus_roles: HashMap<String, usize>,
    pub status_breakdown: HashMap<String, usize>,
    pub max_category: Option<CategoryCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Departure counts per Turkish month plus the peak month.
#[derive(Debug, Clone, Serialize)]
pub struct DepartureStats {
    /// (month, count) in calendar order; `BELİRSİZ` records are excluded
    /// from the buckets but included in `total`
    pub by_month: Vec<(String, usize)>,
    pub peak_month: String,
    pub peak_count: usize,
    pub total: usize,
}

/// The four record domains the override store distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Inventory,
    Process,
    Leave,
    Departure,
}

impl Domain {
    pub const ALL: [Domain; 4] = [
        Domain::Inventory,
        Domain::Process,
        Domain::Leave,
        Domain::Departure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Inventory => "inventory",
            Domain::Process => "process",
            Domain::Leave => "leave",
            Domain::Departure => "departure",
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Domain {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inventory" => Ok(Domain::Inventory),
            "process" => Ok(Domain::Process),
            "leave" => Ok(Domain::Leave),
            "departure" | "departures" => Ok(Domain::Departure),
            other => anyhow::bail!("unknown domain '{}'", other),
        }
    }
}
