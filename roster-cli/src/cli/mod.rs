//! Command-line interface definitions

pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "roster-cli",
    about = "Reconcile personnel roster spreadsheets with local edits",
    version
)]
pub struct Cli {
    /// Override database path (defaults to the user data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Current date for deadline statuses, YYYY-MM-DD (defaults to today)
    #[arg(long, global = true)]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load all sources and print KPIs and quality notes
    Load,

    /// Export a domain's merged records as CSV
    Export(ExportArgs),

    /// Manage persisted row edits
    #[command(subcommand)]
    Override(OverrideCommands),

    /// Departure statistics by month
    Departures,
}

#[derive(clap::Args)]
pub struct ExportArgs {
    /// Domain to export: inventory, process, leave or departures
    pub domain: String,

    /// Output CSV path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Substring match on the name (process: also the tracking number)
    #[arg(long, default_value = "")]
    pub search: String,

    /// Exact category (inventory)
    #[arg(long)]
    pub category: Option<String>,

    /// Exact tag (inventory)
    #[arg(long)]
    pub tag: Option<String>,

    /// Exact status (process)
    #[arg(long)]
    pub status: Option<String>,

    /// Exact reference/owner (process)
    #[arg(long)]
    pub reference: Option<String>,

    /// Only records whose deadline has passed (process)
    #[arg(long)]
    pub late_only: bool,
}

#[derive(Subcommand)]
pub enum OverrideCommands {
    /// Save field corrections for one record identity
    Set {
        /// Domain: inventory, process, leave or departures
        domain: String,
        /// Record identity, e.g. AHMET_YILMAZ_REPSAM
        identity: String,
        /// Corrections as field=value pairs
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// Delete every saved edit in every domain
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}
