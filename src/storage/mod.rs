// file: src/storage/mod.rs
//! Event persistence behind a single interface.
//!
//! [`connect`] picks the backend once at startup: the remote data service
//! when its settings validate and the client can be built, otherwise the
//! local key-value store.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};

use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::models::{EventPatch, EventRecord, NewEvent};

// Declare submodules
pub mod local;
pub mod remote;

pub use local::LocalStore;
pub use remote::RemoteStore;

/// Logical resource name on both backends.
pub const EVENTS_TABLE: &str = "events";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Start,
    End,
    Color,
    CreatedAt,
}

impl SortField {
    pub fn column(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Start => "start",
            SortField::End => "end",
            SortField::Color => "color",
            SortField::CreatedAt => "created_at",
        }
    }

    fn compare(&self, a: &EventRecord, b: &EventRecord) -> Ordering {
        match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Start => a.start.cmp(&b.start),
            // None sorts before any timestamp
            SortField::End => a.end.cmp(&b.end),
            SortField::Color => a.color.cmp(&b.color),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: SortField,
    pub ascending: bool,
}

impl SortOrder {
    pub fn ascending(field: SortField) -> Self {
        Self { field, ascending: true }
    }

    pub fn descending(field: SortField) -> Self {
        Self { field, ascending: false }
    }

    /// PostgREST `order` parameter value, e.g. `start.asc`.
    pub fn to_query(&self) -> String {
        let direction = if self.ascending { "asc" } else { "desc" };
        format!("{}.{}", self.field.column(), direction)
    }

    /// Stable in-place sort.
    pub fn sort(&self, records: &mut [EventRecord]) {
        records.sort_by(|a, b| {
            let ordering = self.field.compare(a, b);
            if self.ascending {
                ordering
            } else {
                ordering.reverse()
            }
        });
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self::ascending(SortField::Start)
    }
}

/// Storage adapter over the `events` resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Short backend label for logs and the status footer.
    fn backend_name(&self) -> &'static str;

    async fn select(&self, order: SortOrder) -> Result<Vec<EventRecord>, StorageError>;

    async fn insert(&self, event: NewEvent) -> Result<EventRecord, StorageError>;

    /// Fails with [`StorageError::NotFound`] when no record has `id`.
    async fn update(&self, id: &str, patch: EventPatch) -> Result<EventRecord, StorageError>;

    /// Deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;
}

/// Choose and open the storage backend.
///
/// Configuration problems and remote construction failures are logged
/// and resolved by using the local store. Only a failure to open the
/// local store is returned.
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn EventStore>, StorageError> {
    match config.remote_settings() {
        Ok(settings) => match RemoteStore::new(&settings) {
            Ok(remote) => {
                info!("Using remote data service for events");
                let probe = remote.clone();
                tokio::spawn(async move { probe.check_connection().await });
                return Ok(Arc::new(remote));
            }
            Err(e) => warn!("Failed to initialize remote data service: {}", e),
        },
        Err(e) => {
            warn!("Remote data service not configured ({}). Using local storage fallback.", e);
        }
    }

    let local = LocalStore::open(&config.local_db_path).await?;
    info!("Using local event store at {}", config.local_db_path.display());
    Ok(Arc::new(local))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(id: &str, title: &str, day: u32, end: Option<u32>) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            title: title.to_string(),
            start: Utc.with_ymd_and_hms(2024, 1, day, 10, 0, 0).unwrap(),
            end: end.map(|d| Utc.with_ymd_and_hms(2024, 1, d, 11, 0, 0).unwrap()),
            color: "#3788d8".to_string(),
            created_at: Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_order_query() {
        assert_eq!(SortOrder::default().to_query(), "start.asc");
        assert_eq!(SortOrder::descending(SortField::CreatedAt).to_query(), "created_at.desc");
    }

    #[test]
    fn test_sort_by_start() {
        let mut records = vec![
            record("2", "b", 2, None),
            record("1", "a", 1, None),
            record("3", "c", 3, None),
        ];
        SortOrder::ascending(SortField::Start).sort(&mut records);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);

        SortOrder::descending(SortField::Start).sort(&mut records);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["3", "2", "1"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut records = vec![
            record("b", "same", 1, None),
            record("a", "same", 1, None),
        ];
        SortOrder::ascending(SortField::Start).sort(&mut records);
        assert_eq!(records[0].id, "b");
        assert_eq!(records[1].id, "a");
    }

    #[test]
    fn test_sort_by_end_puts_missing_first() {
        let mut records = vec![record("1", "a", 1, Some(2)), record("2", "b", 1, None)];
        SortOrder::ascending(SortField::End).sort(&mut records);
        assert_eq!(records[0].id, "2");
    }

    #[tokio::test]
    async fn test_connect_falls_back_to_local() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            remote_url: Some("http://insecure.example.com".to_string()),
            remote_key: Some("short".to_string()),
            local_db_path: dir.path().join("calendar.db"),
        };
        let store = connect(&config).await.unwrap();
        assert_eq!(store.backend_name(), "local");
    }
}
