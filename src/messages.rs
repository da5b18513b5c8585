use chrono::{DateTime, NaiveDate, Utc};

use crate::models::EventRecord;

/// Unified application message type
///
/// Store results travel as `Result<_, String>` so messages stay `Clone`.
#[derive(Debug, Clone)]
pub enum Message {
    // ===== Header =====
    /// Open the empty add form
    AddEvent,
    /// Switch between the month grid and the list
    ToggleView,

    // ===== Month grid =====
    PrevMonth,
    NextMonth,
    /// A day cell was clicked
    DateClicked(NaiveDate),
    /// An event chip or list card was clicked
    EventClicked(String),
    /// Move an event to a new time range
    RescheduleEvent {
        id: String,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    },

    // ===== Modal form =====
    TitleChanged(String),
    StartChanged(String),
    EndChanged(String),
    ColorPicked(&'static str),
    SaveEvent,
    DeleteEvent(String),
    CloseModal,

    // ===== Async results =====
    EventsLoaded(Result<Vec<EventRecord>, String>),
    EventSaved(Result<EventRecord, String>),
    EventRescheduled(Result<EventRecord, String>),
    EventDeleted(String, Result<(), String>),

    // ===== Notifications =====
    DismissError,
    /// Auto-dismiss timer fired for the given generation
    ErrorExpired(u64),
}
