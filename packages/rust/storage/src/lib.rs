//! libSQL record store for agent outputs.
//!
//! The [`Storage`] handle is opened explicitly by the caller and passed to
//! whatever needs to persist records; there is no process-wide connection.
//! Records are JSON documents grouped by collection name.

mod migrations;

use std::path::Path;

use campaign_shared::{CampaignError, Result};
use chrono::Utc;
use libsql::{Connection, Database, params};
use serde::Serialize;
use uuid::Uuid;

/// A stored JSON document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    pub id: String,
    pub collection: String,
    pub data: serde_json::Value,
    pub created_at: String,
}

/// Storage handle wrapping a libSQL database.
pub struct Storage {
    #[allow(dead_code)]
    db: Database,
    conn: Connection,
}

impl Storage {
    /// Open or create a database at `path`, applying pending migrations.
    pub async fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CampaignError::io(parent, e))?;
        }

        let db = libsql::Builder::new_local(path)
            .build()
            .await
            .map_err(|e| CampaignError::Storage(e.to_string()))?;

        let conn = db
            .connect()
            .map_err(|e| CampaignError::Storage(e.to_string()))?;

        let storage = Self { db, conn };
        storage.run_migrations().await?;
        tracing::debug!(path = %path.display(), "storage opened");
        Ok(storage)
    }

    /// Close the handle. Dropping it has the same effect.
    pub fn close(self) {
        tracing::debug!("storage closed");
    }

    async fn run_migrations(&self) -> Result<()> {
        let current_version = self.get_schema_version().await;

        for migration in migrations::all_migrations() {
            if migration.version > current_version {
                tracing::info!(
                    version = migration.version,
                    description = migration.description,
                    "applying migration"
                );
                self.conn
                    .execute_batch(migration.sql)
                    .await
                    .map_err(|e| {
                        CampaignError::Storage(format!(
                            "migration v{} failed: {e}",
                            migration.version
                        ))
                    })?;
            }
        }
        Ok(())
    }

    /// Current schema version, or 0 before the first migration.
    async fn get_schema_version(&self) -> u32 {
        let result = self
            .conn
            .query("SELECT MAX(version) FROM schema_migrations", params![])
            .await;

        match result {
            Ok(mut rows) => match rows.next().await {
                Ok(Some(row)) => row.get::<u32>(0).unwrap_or(0),
                _ => 0,
            },
            Err(_) => 0, // table doesn't exist yet
        }
    }

    // -----------------------------------------------------------------------
    // Records
    // -----------------------------------------------------------------------

    /// Store `data` in `collection` and return the new record id.
    pub async fn insert_record(&self, collection: &str, data: &serde_json::Value) -> Result<String> {
        if collection.trim().is_empty() {
            return Err(CampaignError::validation("collection name must not be empty"));
        }

        let id = Uuid::now_v7().to_string();
        let body = serde_json::to_string(data).map_err(|e| CampaignError::Storage(e.to_string()))?;
        let now = Utc::now().to_rfc3339();

        self.conn
            .execute(
                "INSERT INTO records (id, collection, body_json, created_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![id.as_str(), collection, body, now],
            )
            .await
            .map_err(|e| CampaignError::Storage(e.to_string()))?;

        tracing::debug!(%id, collection, "record inserted");
        Ok(id)
    }

    /// Fetch a record by id.
    pub async fn get_record(&self, id: &str) -> Result<Option<Record>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, collection, body_json, created_at FROM records WHERE id = ?1",
                params![id],
            )
            .await
            .map_err(|e| CampaignError::Storage(e.to_string()))?;

        match rows.next().await {
            Ok(Some(row)) => Ok(Some(row_to_record(&row)?)),
            Ok(None) => Ok(None),
            Err(e) => Err(CampaignError::Storage(e.to_string())),
        }
    }

    /// All records in `collection`, oldest first.
    pub async fn list_records(&self, collection: &str) -> Result<Vec<Record>> {
        let mut rows = self
            .conn
            .query(
                "SELECT id, collection, body_json, created_at FROM records
                 WHERE collection = ?1 ORDER BY created_at, id",
                params![collection],
            )
            .await
            .map_err(|e| CampaignError::Storage(e.to_string()))?;

        let mut results = Vec::new();
        while let Some(row) = rows
            .next()
            .await
            .map_err(|e| CampaignError::Storage(e.to_string()))?
        {
            results.push(row_to_record(&row)?);
        }
        Ok(results)
    }
}

fn row_to_record(row: &libsql::Row) -> Result<Record> {
    let get = |idx: i32| {
        row.get::<String>(idx)
            .map_err(|e| CampaignError::Storage(e.to_string()))
    };
    let body = get(2)?;
    let data = serde_json::from_str(&body)
        .map_err(|e| CampaignError::Storage(format!("corrupt record body: {e}")))?;

    Ok(Record {
        id: get(0)?,
        collection: get(1)?,
        data,
        created_at: get(3)?,
    })
}
