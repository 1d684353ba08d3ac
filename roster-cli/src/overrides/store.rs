//! Override persistence
//!
//! The whole override mapping is one JSON blob stored under a single
//! versioned key in a SQLite key/value table. Loading never fails: absent
//! or corrupt data yields the empty default. `save` is read-modify-write
//! (last write wins per field); `clear` wipes every domain at once.
//!
//! `save` assumes a single writer process. Concurrent writers would need
//! the read-modify-write made atomic (a transaction over the key) or they
//! can lose each other's updates.

use std::collections::HashMap;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::path::Path;
use tokio::sync::Mutex;

use crate::types::Domain;

/// Versioned storage key. Bumping it invalidates (wipes) all overrides —
/// the only supported migration for identity-derivation changes.
pub const OVERRIDES_KEY: &str = "roster_overrides_v1";

/// domain -> identity -> partial field map
pub type OverrideMap = HashMap<Domain, HashMap<String, Map<String, Value>>>;

/// Durable store for user overrides.
#[async_trait]
pub trait OverrideStore: Send + Sync {
    /// Current store contents; empty default when absent or corrupt.
    async fn load(&self) -> Result<OverrideMap>;

    /// Merge `fields` into the override for `identity` and persist the
    /// whole store.
    async fn save(&self, domain: Domain, identity: &str, fields: Map<String, Value>) -> Result<()>;

    /// Durably empty the entire store, all domains.
    async fn clear(&self) -> Result<()>;
}

fn merge_into(store: &mut OverrideMap, domain: Domain, identity: &str, fields: Map<String, Value>) {
    let entry = store
        .entry(domain)
        .or_default()
        .entry(identity.to_string())
        .or_default();
    for (key, value) in fields {
        entry.insert(key, value);
    }
}

fn decode(raw: Option<String>) -> OverrideMap {
    match raw {
        None => OverrideMap::default(),
        Some(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
            log::warn!("override store is corrupt, starting empty: {}", err);
            OverrideMap::default()
        }),
    }
}

/// SQLite-backed override store.
pub struct SqliteOverrideStore {
    pool: SqlitePool,
}

impl SqliteOverrideStore {
    /// Open (creating if missing) the override database at `path`.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
        }
        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePool::connect_with(options)
            .await
            .with_context(|| format!("Failed to open override store at {}", path.display()))?;
        Self::with_pool(pool).await
    }

    pub async fn with_pool(pool: SqlitePool) -> Result<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS overrides (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
        )
        .execute(&pool)
        .await
        .context("Failed to create overrides table")?;
        Ok(Self { pool })
    }

    async fn load_raw(&self) -> Result<Option<String>> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM overrides WHERE key = ?")
                .bind(OVERRIDES_KEY)
                .fetch_optional(&self.pool)
                .await
                .context("Failed to read override store")?;
        Ok(row.map(|(value,)| value))
    }
}

#[async_trait]
impl OverrideStore for SqliteOverrideStore {
    async fn load(&self) -> Result<OverrideMap> {
        Ok(decode(self.load_raw().await?))
    }

    async fn save(&self, domain: Domain, identity: &str, fields: Map<String, Value>) -> Result<()> {
        let mut store = self.load().await?;
        merge_into(&mut store, domain, identity, fields);

        let json = serde_json::to_string(&store).context("Failed to serialize overrides")?;
        sqlx::query("INSERT OR REPLACE INTO overrides (key, value) VALUES (?, ?)")
            .bind(OVERRIDES_KEY)
            .bind(&json)
            .execute(&self.pool)
            .await
            .context("Failed to persist override store")?;

        log::debug!("override saved: {} {}", domain, identity);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        sqlx::query("DELETE FROM overrides WHERE key = ?")
            .bind(OVERRIDES_KEY)
            .execute(&self.pool)
            .await
            .context("Failed to clear override store")?;
        log::info!("override store cleared");
        Ok(())
    }
}

/// In-memory store used by tests and dry runs.
#[derive(Default)]
pub struct MemoryOverrideStore {
    inner: Mutex<OverrideMap>,
}

impl MemoryOverrideStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OverrideStore for MemoryOverrideStore {
    async fn load(&self) -> Result<OverrideMap> {
        Ok(self.inner.lock().await.clone())
    }

    async fn save(&self, domain: Domain, identity: &str, fields: Map<String, Value>) -> Result<()> {
        let mut store = self.inner.lock().await;
        merge_into(&mut store, domain, identity, fields);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.inner.lock().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(pairs: &[(&str, Value)]) -> Map<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    async fn memory_db() -> SqliteOverrideStore {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        SqliteOverrideStore::with_pool(pool).await.unwrap()
    }

    #[tokio::test]
    async fn test_roundtrip_and_field_merge() {
        let store = memory_db().await;

        store
            .save(
                Domain::Inventory,
                "AHMET_YILMAZ_REPSAM",
                fields(&[("tag", json!("USTA")), ("note", json!("x"))]),
            )
            .await
            .unwrap();
        // Second save merges per field, keeping the untouched one
        store
            .save(
                Domain::Inventory,
                "AHMET_YILMAZ_REPSAM",
                fields(&[("tag", json!("KALIP"))]),
            )
            .await
            .unwrap();

        let loaded = store.load().await.unwrap();
        let entry = &loaded[&Domain::Inventory]["AHMET_YILMAZ_REPSAM"];
        assert_eq!(entry["tag"], json!("KALIP"));
        assert_eq!(entry["note"], json!("x"));
    }

    #[tokio::test]
    async fn test_clear_wipes_all_domains() {
        let store = memory_db().await;
        store
            .save(Domain::Inventory, "A", fields(&[("x", json!(1))]))
            .await
            .unwrap();
        store
            .save(Domain::Process, "B_PROCESS", fields(&[("y", json!(2))]))
            .await
            .unwrap();

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_payload_loads_empty() {
        let store = memory_db().await;
        sqlx::query("INSERT OR REPLACE INTO overrides (key, value) VALUES (?, ?)")
            .bind(OVERRIDES_KEY)
            .bind("{not json")
            .execute(&store.pool)
            .await
            .unwrap();

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_absent_key_loads_empty() {
        let store = memory_db().await;
        assert!(store.load().await.unwrap().is_empty());
    }
}
