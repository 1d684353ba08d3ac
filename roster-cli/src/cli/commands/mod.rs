//! Command handlers

pub mod departures;
pub mod export;
pub mod load;
pub mod overrides;

use anyhow::{Context, Result};
use chrono::NaiveDate;

use crate::cli::Cli;
use crate::config::Config;
use crate::overrides::SqliteOverrideStore;

/// Shared handler context: config, store and the effective current date.
pub struct Ctx {
    pub config: Config,
    pub store: SqliteOverrideStore,
    pub today: NaiveDate,
}

impl Ctx {
    pub async fn build(cli: &Cli) -> Result<Self> {
        let mut config = Config::load()?;
        if let Some(db) = &cli.db {
            config.db_path = Some(db.clone());
        }

        let today = match &cli.today {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("Invalid --today value: {}", raw))?,
            None => chrono::Local::now().date_naive(),
        };

        let store = SqliteOverrideStore::open(&config.resolve_db_path()).await?;

        Ok(Self {
            config,
            store,
            today,
        })
    }
}
