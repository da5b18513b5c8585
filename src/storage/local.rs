// file: src/storage/local.rs
//! Local fallback backend.
//!
//! All events are kept as a single JSON array under [`STORAGE_KEY`] in a
//! SQLite key-value table. Every operation reads and rewrites the whole
//! array; the app holds a few dozen events at most.

use std::path::Path;
use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePool, Sqlite};
use tokio::sync::Mutex;

use super::{EventStore, SortOrder};
use crate::error::StorageError;
use crate::models::{palette, EventPatch, EventRecord, NewEvent};
use crate::utils::logging;

pub const STORAGE_KEY: &str = "calendar_events";

const BACKEND: &str = "local";

pub struct LocalStore {
    pool: SqlitePool,
    // Serializes read-modify-write cycles.
    lock: Mutex<()>,
}

impl LocalStore {
    /// Open (creating if needed) the store file at `path`.
    pub async fn open(path: &Path) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::setup(format!("cannot create {}: {}", parent.display(), e))
            })?;
        }

        let db_url = format!("sqlite:{}?mode=rwc", path.display());
        if !Sqlite::database_exists(&db_url).await? {
            info!("Creating local event store");
            Sqlite::create_database(&db_url).await?;
        }

        let pool = SqlitePool::connect(&db_url).await?;
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool, creating the key-value table if missing.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StorageError> {
        sqlx::query(include_str!("schema.sql")).execute(&pool).await?;
        Ok(Self {
            pool,
            lock: Mutex::new(()),
        })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    async fn read_events(&self) -> Result<Vec<EventRecord>, StorageError> {
        let stored: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?")
            .bind(STORAGE_KEY)
            .fetch_optional(&self.pool)
            .await?;

        match stored {
            Some(json) => match serde_json::from_str(&json) {
                Ok(events) => Ok(events),
                Err(e) => {
                    warn!("Stored events are unreadable, starting empty: {}", e);
                    Ok(Vec::new())
                }
            },
            None => {
                info!("Seeding local event store with sample events");
                let seeded = sample_events(Utc::now());
                self.write_events(&seeded).await?;
                Ok(seeded)
            }
        }
    }

    async fn write_events(&self, events: &[EventRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_string(events)?;
        sqlx::query(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?, ?, CURRENT_TIMESTAMP)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = CURRENT_TIMESTAMP",
        )
        .bind(STORAGE_KEY)
        .bind(json)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

/// The two records a fresh store starts with.
pub fn sample_events(now: DateTime<Utc>) -> Vec<EventRecord> {
    let tomorrow = now + Duration::hours(24);
    vec![
        EventRecord {
            id: "1".to_string(),
            title: "Welcome to Calendar App".to_string(),
            start: now,
            end: Some(now + Duration::hours(2)),
            color: palette::DEFAULT_BACKGROUND.to_string(),
            created_at: now,
        },
        EventRecord {
            id: "2".to_string(),
            title: "Sample Event Tomorrow".to_string(),
            start: tomorrow,
            end: Some(tomorrow + Duration::hours(3)),
            color: "#28a745".to_string(),
            created_at: now,
        },
    ]
}

/// Millisecond timestamp id, bumped until it does not collide.
fn next_id(existing: &[EventRecord], now: DateTime<Utc>) -> String {
    let mut candidate = now.timestamp_millis();
    loop {
        let id = candidate.to_string();
        if !existing.iter().any(|e| e.id == id) {
            return id;
        }
        candidate += 1;
    }
}

#[async_trait]
impl EventStore for LocalStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    async fn select(&self, order: SortOrder) -> Result<Vec<EventRecord>, StorageError> {
        let started = Instant::now();
        let _guard = self.lock.lock().await;

        let mut events = self.read_events().await?;
        order.sort(&mut events);
        logging::log_storage_operation("select", BACKEND, events.len(), started.elapsed());
        Ok(events)
    }

    async fn insert(&self, event: NewEvent) -> Result<EventRecord, StorageError> {
        let started = Instant::now();
        let _guard = self.lock.lock().await;

        let mut events = self.read_events().await?;
        let now = Utc::now();
        let created = event.into_record(next_id(&events, now), now);
        events.push(created.clone());
        self.write_events(&events).await?;
        logging::log_storage_operation("insert", BACKEND, 1, started.elapsed());
        Ok(created)
    }

    async fn update(&self, id: &str, patch: EventPatch) -> Result<EventRecord, StorageError> {
        let started = Instant::now();
        let _guard = self.lock.lock().await;

        let mut events = self.read_events().await?;
        let record = events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StorageError::not_found(id))?;
        patch.apply_to(record);
        let updated = record.clone();

        self.write_events(&events).await?;
        logging::log_storage_operation("update", BACKEND, 1, started.elapsed());
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let started = Instant::now();
        let _guard = self.lock.lock().await;

        let mut events = self.read_events().await?;
        let before = events.len();
        events.retain(|e| e.id != id);
        self.write_events(&events).await?;
        logging::log_storage_operation("delete", BACKEND, before - events.len(), started.elapsed());
        Ok(())
    }
}
