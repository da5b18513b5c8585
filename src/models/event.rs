// file: src/models/event.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::palette;

/// A persisted event row, identical in both backends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub color: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload. The backend fills in `id` and `created_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub color: String,
}

impl NewEvent {
    pub fn into_record(self, id: String, created_at: DateTime<Utc>) -> EventRecord {
        EventRecord {
            id,
            title: self.title,
            start: self.start,
            end: self.end,
            color: self.color,
            created_at,
        }
    }
}

/// Partial update. Absent fields are left untouched; `end: Some(None)`
/// clears the end time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<Option<DateTime<Utc>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.start.is_none() && self.end.is_none() && self.color.is_none()
    }

    pub fn apply_to(self, record: &mut EventRecord) {
        if let Some(title) = self.title {
            record.title = title;
        }
        if let Some(start) = self.start {
            record.start = start;
        }
        if let Some(end) = self.end {
            record.end = end;
        }
        if let Some(color) = self.color {
            record.color = color;
        }
    }
}

impl From<NewEvent> for EventPatch {
    fn from(event: NewEvent) -> Self {
        Self {
            title: Some(event.title),
            start: Some(event.start),
            end: Some(event.end),
            color: Some(event.color),
        }
    }
}

/// Display-event handed to the calendar grid and list views.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub background_color: String,
    pub border_color: String,
}

impl From<&EventRecord> for CalendarEvent {
    fn from(record: &EventRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: record.title.clone(),
            start: record.start,
            end: record.end,
            background_color: record.color.clone(),
            border_color: palette::border_color(&record.color).to_string(),
        }
    }
}

impl From<EventRecord> for CalendarEvent {
    fn from(record: EventRecord) -> Self {
        Self::from(&record)
    }
}

impl CalendarEvent {
    pub fn is_past(&self) -> bool {
        self.end.unwrap_or(self.start) < Utc::now()
    }

    pub fn duration(&self) -> Option<chrono::Duration> {
        self.end.map(|end| end - self.start)
    }
}
