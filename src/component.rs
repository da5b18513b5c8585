//! Event calendar component
//!
//! Owns the in-memory events and all view state, and drives the storage
//! adapter. Each async operation is also exposed as a `begin_*` /
//! `finish_*` pair so a UI runtime can execute the storage future itself
//! and feed the result back.

use std::sync::Arc;

use chrono::{DateTime, Local, NaiveDate, Utc};
use log::{debug, error, info};

use crate::error::{AppError, StorageError, ValidationError};
use crate::models::{CalendarEvent, EventPatch, EventRecord, NewEvent};
use crate::storage::{EventStore, SortField, SortOrder};
use crate::ui_state::{EventForm, ModalState, Notification, ViewMode};
use crate::utils::{normalize_title, parse_input_datetime, INPUT_FORMAT};

pub const EMPTY_EVENTS_MESSAGE: &str = "No events yet. Click \"Add Event\" to create one.";

/// A validated write waiting to be sent to the store.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingSave {
    Insert(NewEvent),
    Update { id: String, patch: EventPatch },
}

impl PendingSave {
    pub async fn execute(self, store: &dyn EventStore) -> Result<EventRecord, StorageError> {
        match self {
            PendingSave::Insert(event) => store.insert(event).await,
            PendingSave::Update { id, patch } => store.update(&id, patch).await,
        }
    }
}

/// Check the form in order and build the fields to persist.
pub fn validate_form(form: &EventForm) -> Result<NewEvent, ValidationError> {
    let title = normalize_title(&form.title);
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if form.start.trim().is_empty() {
        return Err(ValidationError::StartRequired);
    }
    if form.end.trim().is_empty() {
        return Err(ValidationError::EndRequired);
    }

    let start = parse_input_datetime(&form.start).ok_or(ValidationError::StartInvalid)?;
    let end = parse_input_datetime(&form.end).ok_or(ValidationError::EndInvalid)?;
    if end <= start {
        return Err(ValidationError::EndBeforeStart);
    }

    Ok(NewEvent {
        title,
        start,
        end: Some(end),
        color: form.background_color.clone(),
    })
}

pub struct EventCalendar {
    store: Arc<dyn EventStore>,
    events: Vec<CalendarEvent>,
    form: EventForm,
    modal: ModalState,
    view: ViewMode,
    loading: bool,
    notification: Notification,
}

impl EventCalendar {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            store,
            events: Vec::new(),
            form: EventForm::default(),
            modal: ModalState::Closed,
            view: ViewMode::default(),
            loading: false,
            notification: Notification::default(),
        }
    }

    pub fn store(&self) -> Arc<dyn EventStore> {
        self.store.clone()
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn replace_events(&mut self, events: Vec<CalendarEvent>) {
        self.events = events;
    }

    pub fn form(&self) -> &EventForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut EventForm {
        &mut self.form
    }

    pub fn modal(&self) -> &ModalState {
        &self.modal
    }

    pub fn show_modal(&self) -> bool {
        self.modal.is_open()
    }

    pub fn is_editing(&self) -> bool {
        self.modal.is_editing()
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_message(&self) -> Option<&str> {
        self.notification.message()
    }

    // --- Loading ---

    pub fn begin_load(&mut self) -> SortOrder {
        info!("Loading events from {} storage", self.backend_name());
        self.loading = true;
        SortOrder::ascending(SortField::Start)
    }

    pub fn finish_load<E: Into<AppError>>(&mut self, result: Result<Vec<EventRecord>, E>) {
        self.loading = false;
        match result {
            Ok(records) => {
                self.events = records.iter().map(CalendarEvent::from).collect();
                self.notification.clear();
                info!("Loaded {} events", self.events.len());
            }
            Err(e) => {
                self.report("load events", e.into());
            }
        }
    }

    pub async fn load_events(&mut self) {
        let order = self.begin_load();
        let store = self.store.clone();
        let result = store.select(order).await;
        self.finish_load(result);
    }

    // --- Modal form ---

    pub fn open_add_form(&mut self) {
        self.form = EventForm::default();
        self.modal = ModalState::AddingNew;
    }

    /// Date-click entry point: add form pre-filled for 09:00-10:00 that day.
    pub fn open_add_form_on(&mut self, date: NaiveDate) {
        self.open_add_form();
        if let (Some(start), Some(end)) = (date.and_hms_opt(9, 0, 0), date.and_hms_opt(10, 0, 0)) {
            self.form.start = start.format(INPUT_FORMAT).to_string();
            self.form.end = end.format(INPUT_FORMAT).to_string();
        }
    }

    pub fn open_edit_form(&mut self, event: &CalendarEvent) {
        self.form = EventForm::from(event);
        self.modal = ModalState::Editing(event.id.clone());
    }

    /// Event-click entry point. Returns false for an unknown id.
    pub fn open_edit_form_by_id(&mut self, id: &str) -> bool {
        match self.events.iter().find(|e| e.id == id).cloned() {
            Some(event) => {
                self.open_edit_form(&event);
                true
            }
            None => false,
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = ModalState::Closed;
        self.form = EventForm::default();
    }

    // --- Saving ---

    /// Validate the form. On failure the error is shown and nothing is
    /// sent to the store.
    pub fn prepare_save(&mut self) -> Result<PendingSave, ValidationError> {
        let fields = match validate_form(&self.form) {
            Ok(fields) => fields,
            Err(e) => {
                self.report("save event", e.clone().into());
                return Err(e);
            }
        };

        self.loading = true;
        Ok(match &self.modal {
            ModalState::Editing(id) => PendingSave::Update {
                id: id.clone(),
                patch: fields.into(),
            },
            _ => PendingSave::Insert(fields),
        })
    }

    pub fn finish_save<E: Into<AppError>>(&mut self, result: Result<EventRecord, E>) {
        self.loading = false;
        match result {
            Ok(record) => {
                info!("Saved event {}", record.id);
                self.upsert(&record);
                self.close_modal();
                self.notification.clear();
            }
            Err(e) => {
                self.report("save event", e.into());
            }
        }
    }

    pub async fn save_event(&mut self) {
        let Ok(pending) = self.prepare_save() else {
            return;
        };
        let store = self.store.clone();
        let result = pending.execute(store.as_ref()).await;
        self.finish_save(result);
    }

    /// Drop entry point: move an event without touching the form.
    pub fn reschedule(
        &mut self,
        id: &str,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<PendingSave, ValidationError> {
        if end.map_or(false, |end| end <= start) {
            let e = ValidationError::EndBeforeStart;
            self.report("reschedule event", e.clone().into());
            return Err(e);
        }

        self.loading = true;
        Ok(PendingSave::Update {
            id: id.to_string(),
            patch: EventPatch {
                start: Some(start),
                end: Some(end),
                ..Default::default()
            },
        })
    }

    pub fn finish_reschedule<E: Into<AppError>>(&mut self, result: Result<EventRecord, E>) {
        self.loading = false;
        match result {
            Ok(record) => {
                self.upsert(&record);
                self.notification.clear();
            }
            Err(e) => {
                self.report("reschedule event", e.into());
            }
        }
    }

    fn upsert(&mut self, record: &EventRecord) {
        let event = CalendarEvent::from(record);
        match self.events.iter_mut().find(|e| e.id == event.id) {
            Some(existing) => *existing = event,
            None => self.events.push(event),
        }
    }

    // --- Deleting ---

    pub fn begin_delete(&mut self, id: &str) {
        info!("Deleting event {}", id);
        self.loading = true;
    }

    pub fn finish_delete<E: Into<AppError>>(&mut self, id: &str, result: Result<(), E>) {
        self.loading = false;
        match result {
            Ok(()) => {
                self.events.retain(|e| e.id != id);
                if self.modal.editing_id() == Some(id) {
                    self.close_modal();
                }
                self.notification.clear();
            }
            Err(e) => {
                self.report("delete event", e.into());
            }
        }
    }

    pub async fn delete_event(&mut self, id: &str) {
        self.begin_delete(id);
        let store = self.store.clone();
        let result = store.delete(id).await;
        self.finish_delete(id, result);
    }

    // --- View ---

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggled();
    }

    /// Events ascending by start; ties keep their current order.
    pub fn sorted_events(&self) -> Vec<&CalendarEvent> {
        let mut sorted: Vec<&CalendarEvent> = self.events.iter().collect();
        sorted.sort_by_key(|e| e.start);
        sorted
    }

    /// Projection consumed by the calendar grid.
    pub fn calendar_events(&self) -> Vec<CalendarEvent> {
        self.events.clone()
    }

    /// Events starting on `date` in local time, in start order.
    pub fn events_on(&self, date: NaiveDate) -> Vec<&CalendarEvent> {
        self.sorted_events()
            .into_iter()
            .filter(|e| e.start.with_timezone(&Local).date_naive() == date)
            .collect()
    }

    pub fn events_count_label(&self) -> String {
        format!("{} totals", self.events.len())
    }

    pub fn empty_events_message(&self) -> &'static str {
        EMPTY_EVENTS_MESSAGE
    }

    // --- Notifications ---

    pub fn raise_error(&mut self, message: impl Into<String>) -> u64 {
        self.notification.raise(message)
    }

    /// Auto-dismiss hook; a stale generation leaves newer messages alone.
    pub fn expire_error(&mut self, generation: u64) -> bool {
        self.notification.expire(generation)
    }

    /// Generation of the message on screen, if one is showing.
    pub fn error_generation(&self) -> Option<u64> {
        self.notification.current()
    }

    fn report(&mut self, operation: &str, err: AppError) -> u64 {
        if err.is_user_error() {
            debug!("Failed to {}: {}", operation, err);
        } else {
            error!("Failed to {}: {}", operation, err);
        }
        self.notification.raise(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MockEventStore;
    use chrono::{Duration, TimeZone};

    fn record(id: &str, title: &str, start: DateTime<Utc>) -> EventRecord {
        EventRecord {
            id: id.to_string(),
            title: title.to_string(),
            start,
            end: Some(start + Duration::hours(1)),
            color: "#3788d8".to_string(),
            created_at: Utc::now(),
        }
    }

    fn calendar_with(mock: MockEventStore) -> EventCalendar {
        EventCalendar::new(Arc::new(mock))
    }

    fn fill_form(calendar: &mut EventCalendar, title: &str, start: &str, end: &str) {
        let form = calendar.form_mut();
        form.title = title.to_string();
        form.start = start.to_string();
        form.end = end.to_string();
    }

    #[test]
    fn test_initial_state() {
        let calendar = calendar_with(MockEventStore::new());
        assert_eq!(calendar.view_mode(), ViewMode::Grid);
        assert!(!calendar.show_modal());
        assert!(!calendar.is_editing());
        assert!(!calendar.is_loading());
        assert!(calendar.events().is_empty());
        assert!(calendar.error_message().is_none());
    }

    #[tokio::test]
    async fn test_empty_title_never_reaches_store() {
        // No expectations: any store call panics.
        let mut calendar = calendar_with(MockEventStore::new());
        calendar.open_add_form();
        fill_form(&mut calendar, "   ", "2024-01-01T10:00", "2024-01-01T11:00");

        calendar.save_event().await;
        assert_eq!(calendar.error_message(), Some("Event title is required"));
        assert!(calendar.show_modal());
        assert!(!calendar.is_loading());
    }

    #[tokio::test]
    async fn test_validation_order() {
        let mut calendar = calendar_with(MockEventStore::new());
        calendar.open_add_form();

        fill_form(&mut calendar, "Test Event", "", "2024-01-01T11:00:00");
        calendar.save_event().await;
        assert_eq!(calendar.error_message(), Some("Start date is required"));

        fill_form(&mut calendar, "Test Event", "2024-01-01T10:00:00", "");
        calendar.save_event().await;
        assert_eq!(calendar.error_message(), Some("End date is required"));

        fill_form(&mut calendar, "Test Event", "2024-01-01T11:00:00", "2024-01-01T10:00:00");
        calendar.save_event().await;
        assert_eq!(calendar.error_message(), Some("End date must be after start date"));

        fill_form(&mut calendar, "Test Event", "2024-01-01T10:00", "2024-01-01T10:00");
        assert_eq!(calendar.prepare_save(), Err(ValidationError::EndBeforeStart));

        fill_form(&mut calendar, "Test Event", "soon", "2024-01-01T10:00");
        assert_eq!(calendar.prepare_save(), Err(ValidationError::StartInvalid));
    }

    #[tokio::test]
    async fn test_add_inserts_and_appends() {
        let mut mock = MockEventStore::new();
        mock.expect_backend_name().return_const("mock");
        mock.expect_insert()
            .withf(|event: &NewEvent| event.title == "Test Event" && event.color == "#dc3545")
            .times(1)
            .returning(|event| Ok(event.into_record("42".to_string(), Utc::now())));

        let mut calendar = calendar_with(mock);
        calendar.open_add_form();
        fill_form(&mut calendar, " Test Event ", "2024-01-01T10:00", "2024-01-01T11:00");
        calendar.form_mut().background_color = "#dc3545".to_string();

        calendar.save_event().await;
        assert!(calendar.error_message().is_none());
        assert!(!calendar.show_modal());
        assert_eq!(calendar.form(), &EventForm::default());
        assert_eq!(calendar.events().len(), 1);
        assert_eq!(calendar.events()[0].id, "42");
        assert_eq!(calendar.events()[0].border_color, "#c82333");
    }

    #[tokio::test]
    async fn test_edit_updates_in_place() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let mut mock = MockEventStore::new();
        mock.expect_update()
            .withf(|id: &str, patch: &EventPatch| id == "1" && patch.title.as_deref() == Some("Updated Event"))
            .times(1)
            .returning(move |id, patch| {
                let mut updated = record(id, "Test Event", start);
                patch.apply_to(&mut updated);
                Ok(updated)
            });

        let mut calendar = calendar_with(mock);
        calendar.replace_events(vec![
            CalendarEvent::from(record("1", "Test Event", start)),
            CalendarEvent::from(record("2", "Other", start + Duration::days(1))),
        ]);

        assert!(calendar.open_edit_form_by_id("1"));
        assert!(calendar.is_editing() && calendar.show_modal());
        calendar.form_mut().title = "Updated Event".to_string();

        calendar.save_event().await;
        assert_eq!(calendar.events().len(), 2);
        assert_eq!(calendar.events()[0].title, "Updated Event");
        assert!(!calendar.show_modal() && !calendar.is_editing());
    }

    #[tokio::test]
    async fn test_storage_failure_keeps_modal_open() {
        let mut mock = MockEventStore::new();
        mock.expect_backend_name().return_const("mock");
        mock.expect_update()
            .returning(|id, _| Err(StorageError::not_found(id)));

        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let mut calendar = calendar_with(mock);
        calendar.open_edit_form(&CalendarEvent::from(record("9", "Gone", start)));

        calendar.save_event().await;
        assert_eq!(calendar.error_message(), Some("Event not found"));
        assert!(calendar.is_editing());
        assert!(!calendar.is_loading());
    }

    #[tokio::test]
    async fn test_load_failure_sets_error() {
        let mut mock = MockEventStore::new();
        mock.expect_backend_name().return_const("mock");
        mock.expect_select()
            .withf(|order: &SortOrder| *order == SortOrder::ascending(SortField::Start))
            .returning(|_| Err(StorageError::Network("connection refused".to_string())));

        let mut calendar = calendar_with(mock);
        calendar.load_events().await;
        assert_eq!(calendar.error_message(), Some("Network error: connection refused"));
        assert!(!calendar.is_loading());
    }

    #[tokio::test]
    async fn test_successful_load_clears_error() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let mut mock = MockEventStore::new();
        mock.expect_backend_name().return_const("mock");
        mock.expect_select()
            .returning(move |_| Ok(vec![record("1", "Test Event", start)]));

        let mut calendar = calendar_with(mock);
        calendar.raise_error("old problem");
        calendar.load_events().await;
        assert!(calendar.error_message().is_none());
        assert_eq!(calendar.events()[0].border_color, "#2c5aa0");
    }

    #[tokio::test]
    async fn test_delete_closes_matching_modal() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let mut mock = MockEventStore::new();
        mock.expect_delete().times(1).returning(|_| Ok(()));

        let mut calendar = calendar_with(mock);
        let event = CalendarEvent::from(record("1", "Test Event", start));
        calendar.replace_events(vec![event.clone()]);
        calendar.open_edit_form(&event);

        calendar.delete_event("1").await;
        assert!(calendar.events().is_empty());
        assert!(!calendar.show_modal());
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_events() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let mut mock = MockEventStore::new();
        mock.expect_delete().returning(|_| {
            Err(StorageError::Remote {
                status: 500,
                message: "upstream unavailable".to_string(),
            })
        });

        let mut calendar = calendar_with(mock);
        calendar.replace_events(vec![CalendarEvent::from(record("1", "Keep", start))]);
        calendar.delete_event("1").await;
        assert_eq!(calendar.events().len(), 1);
        assert_eq!(calendar.error_message(), Some("upstream unavailable"));
    }

    #[test]
    fn test_sorted_events_does_not_mutate() {
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let mut calendar = calendar_with(MockEventStore::new());
        calendar.replace_events(vec![
            CalendarEvent::from(record("2", "Event 2", base + Duration::days(1))),
            CalendarEvent::from(record("1", "Event 1", base)),
            CalendarEvent::from(record("3", "Event 3", base + Duration::days(2))),
        ]);

        let ids: Vec<_> = calendar.sorted_events().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3"]);
        assert_eq!(calendar.events()[0].id, "2");
        assert_eq!(calendar.calendar_events(), calendar.events().to_vec());
    }

    #[test]
    fn test_count_label_kept_literal() {
        let mut calendar = calendar_with(MockEventStore::new());
        assert_eq!(calendar.events_count_label(), "0 totals");
        calendar.replace_events(vec![CalendarEvent::from(record("1", "Solo", Utc::now()))]);
        assert_eq!(calendar.events_count_label(), "1 totals");
    }

    #[test]
    fn test_open_add_form_on_date() {
        let mut calendar = calendar_with(MockEventStore::new());
        calendar.form_mut().title = "leftover".to_string();
        calendar.open_add_form_on(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());

        assert_eq!(calendar.modal(), &ModalState::AddingNew);
        assert!(calendar.form().title.is_empty());
        assert_eq!(calendar.form().start, "2024-03-15T09:00");
        assert_eq!(calendar.form().end, "2024-03-15T10:00");
    }

    #[test]
    fn test_unknown_edit_id_is_ignored() {
        let mut calendar = calendar_with(MockEventStore::new());
        assert!(!calendar.open_edit_form_by_id("missing"));
        assert!(!calendar.show_modal());
    }

    #[test]
    fn test_reschedule_rejects_inverted_range() {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 10, 0, 0).unwrap();
        let mut calendar = calendar_with(MockEventStore::new());
        let result = calendar.reschedule("1", start, Some(start - Duration::hours(1)));
        assert_eq!(result, Err(ValidationError::EndBeforeStart));
        assert!(!calendar.is_loading());
    }

    #[test]
    fn test_error_expiry_uses_generation() {
        let mut calendar = calendar_with(MockEventStore::new());
        let first = calendar.raise_error("first");
        let second = calendar.raise_error("second");
        assert_eq!(calendar.error_generation(), Some(second));

        assert!(!calendar.expire_error(first));
        assert!(calendar.expire_error(second));
        assert!(calendar.error_message().is_none());
        assert_eq!(calendar.error_generation(), None);
    }
}
