// file: src/storage/remote.rs
//! Remote data service backend.
//!
//! Talks to a PostgREST-style endpoint (`/rest/v1/events`) over HTTPS.

use std::time::Instant;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use url::Url;

use super::{EventStore, SortOrder, EVENTS_TABLE};
use crate::config::RemoteSettings;
use crate::error::StorageError;
use crate::http_config::HttpConfig;
use crate::models::{EventPatch, EventRecord, NewEvent};
use crate::utils::logging;

const BACKEND: &str = "remote";

#[derive(Debug, Deserialize)]
struct ServiceError {
    message: String,
}

#[derive(Debug, Clone)]
pub struct RemoteStore {
    client: Client,
    endpoint: Url,
}

impl RemoteStore {
    pub fn new(settings: &RemoteSettings) -> Result<Self, StorageError> {
        Self::with_config(settings, &HttpConfig::default())
    }

    pub fn with_config(settings: &RemoteSettings, http: &HttpConfig) -> Result<Self, StorageError> {
        let endpoint = table_endpoint(&settings.url, EVENTS_TABLE)?;
        let client = http.build_client(settings)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// One-row probe; only logs the outcome.
    pub async fn check_connection(&self) {
        let request = self
            .client
            .get(self.endpoint.clone())
            .query(&[("select", "id"), ("limit", "1")]);

        match send(request).await {
            Ok(_) => info!("Remote data service connection test successful"),
            Err(e) => warn!("Remote data service connection test failed: {}", e),
        }
    }

    fn filter_by_id(&self, request: RequestBuilder, id: &str) -> RequestBuilder {
        request.query(&[("id", format!("eq.{}", id))])
    }

    fn returning(request: RequestBuilder) -> RequestBuilder {
        request.header("Prefer", "return=representation")
    }
}

/// `{base}/rest/v1/{table}`, keeping any path prefix on the base URL.
pub fn table_endpoint(base: &Url, table: &str) -> Result<Url, StorageError> {
    let raw = format!("{}/rest/v1/{}", base.as_str().trim_end_matches('/'), table);
    Url::parse(&raw).map_err(|e| StorageError::setup(format!("invalid endpoint {}: {}", raw, e)))
}

async fn send(request: RequestBuilder) -> Result<Response, StorageError> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ServiceError>(&body)
        .map(|e| e.message)
        .unwrap_or_else(|_| {
            if body.trim().is_empty() {
                status.to_string()
            } else {
                body
            }
        });
    debug!("Data service returned {}: {}", status, message);

    Err(StorageError::Remote {
        status: status.as_u16(),
        message,
    })
}

async fn rows(response: Response) -> Result<Vec<EventRecord>, StorageError> {
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[async_trait]
impl EventStore for RemoteStore {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    async fn select(&self, order: SortOrder) -> Result<Vec<EventRecord>, StorageError> {
        let started = Instant::now();
        let request = self
            .client
            .get(self.endpoint.clone())
            .query(&[("select", "*".to_string()), ("order", order.to_query())]);

        let records = rows(send(request).await?).await?;
        logging::log_storage_operation("select", BACKEND, records.len(), started.elapsed());
        Ok(records)
    }

    async fn insert(&self, event: NewEvent) -> Result<EventRecord, StorageError> {
        let started = Instant::now();
        let request = Self::returning(self.client.post(self.endpoint.clone())).json(&event);

        let created = rows(send(request).await?)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::Remote {
                status: 200,
                message: "Insert returned no rows".to_string(),
            })?;
        logging::log_storage_operation("insert", BACKEND, 1, started.elapsed());
        Ok(created)
    }

    async fn update(&self, id: &str, patch: EventPatch) -> Result<EventRecord, StorageError> {
        let started = Instant::now();
        let request = self.filter_by_id(self.client.patch(self.endpoint.clone()), id);
        let request = Self::returning(request).json(&patch);

        let updated = rows(send(request).await?)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StorageError::not_found(id))?;
        logging::log_storage_operation("update", BACKEND, 1, started.elapsed());
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let started = Instant::now();
        let request = self.filter_by_id(self.client.delete(self.endpoint.clone()), id);

        send(request).await?;
        logging::log_storage_operation("delete", BACKEND, 1, started.elapsed());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn settings(url: &str) -> RemoteSettings {
        RemoteSettings {
            url: Url::parse(url).unwrap(),
            anon_key: "k".repeat(64),
        }
    }

    #[test]
    fn test_endpoint_from_bare_host() {
        let store = RemoteStore::new(&settings("https://demo.supabase.co")).unwrap();
        assert_eq!(store.endpoint().as_str(), "https://demo.supabase.co/rest/v1/events");
    }

    #[test]
    fn test_endpoint_keeps_path_prefix() {
        let base = Url::parse("https://proxy.example.com/calendar/").unwrap();
        let endpoint = table_endpoint(&base, EVENTS_TABLE).unwrap();
        assert_eq!(endpoint.as_str(), "https://proxy.example.com/calendar/rest/v1/events");
    }

    #[test]
    fn test_backend_name() {
        let store = RemoteStore::new(&settings("https://demo.supabase.co")).unwrap();
        assert_eq!(store.backend_name(), "remote");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_network_error() {
        // Nothing listens on port 1; the connection is refused immediately.
        let store = RemoteStore::new(&settings("https://127.0.0.1:1")).unwrap();
        let result = store
            .insert(NewEvent {
                title: "Offline".to_string(),
                start: Utc::now(),
                end: None,
                color: "#3788d8".to_string(),
            })
            .await;
        assert!(matches!(result, Err(StorageError::Network(_))));
    }
}
