//! UI state management module
//!
//! Plain state types for the event calendar: which view is shown, what
//! the modal is doing, the form edit buffer, and the transient error
//! notification.

use crate::models::{palette, CalendarEvent};
use crate::utils::format_date_for_input;

/// Which projection of the events is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }

    /// Label for the button that switches away from this view.
    pub fn toggle_label(self) -> &'static str {
        match self {
            ViewMode::Grid => "Events View",
            ViewMode::List => "Calendar View",
        }
    }
}

/// The event modal. Editing always implies the modal is open.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    AddingNew,
    Editing(String),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, ModalState::Editing(_))
    }

    pub fn editing_id(&self) -> Option<&str> {
        match self {
            ModalState::Editing(id) => Some(id.as_str()),
            _ => None,
        }
    }
}

/// Transient edit buffer behind the modal form.
///
/// `start` and `end` hold raw input text (`YYYY-MM-DDTHH:mm`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventForm {
    pub id: Option<String>,
    pub title: String,
    pub start: String,
    pub end: String,
    pub background_color: String,
}

impl Default for EventForm {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            start: String::new(),
            end: String::new(),
            background_color: palette::DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl From<&CalendarEvent> for EventForm {
    fn from(event: &CalendarEvent) -> Self {
        Self {
            id: Some(event.id.clone()),
            title: event.title.clone(),
            start: format_date_for_input(Some(&event.start)),
            end: format_date_for_input(event.end.as_ref()),
            background_color: event.background_color.clone(),
        }
    }
}

/// Error message with a generation counter, so a delayed auto-dismiss
/// never clears a newer message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    message: Option<String>,
    generation: u64,
}

impl Notification {
    pub fn raise(&mut self, message: impl Into<String>) -> u64 {
        self.generation += 1;
        self.message = Some(message.into());
        self.generation
    }

    /// Clear only if nothing newer was raised since `generation`.
    pub fn expire(&mut self, generation: u64) -> bool {
        if self.generation == generation && self.message.is_some() {
            self.message = None;
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.message = None;
    }

    /// Generation of the visible message, if any.
    pub fn current(&self) -> Option<u64> {
        self.message.as_ref().map(|_| self.generation)
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}
