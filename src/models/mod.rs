// Declare modules
pub mod event;
pub mod palette;

// Re-export so callers can use `crate::models::CalendarEvent` directly.
pub use event::{CalendarEvent, EventPatch, EventRecord, NewEvent};
pub use palette::{border_color, Swatch, SWATCHES};
